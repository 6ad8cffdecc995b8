// Copyright (c) 2025 - Cowboy AI, Inc.
//! Check Orchestration
//!
//! Drives the reconciliation engine over every configured check:
//!
//! ```text
//! NAM (once) ─────────────┐
//!                         ▼
//! for each CheckTarget:  check_started
//!                         ▼
//!                     NetBox VLANs ∥ NetBox prefixes
//!                         ▼
//!                     checker::check
//!                         ▼
//!                  check_finished
//!                         ▼
//!              notifiers (only on drift)
//! ```
//!
//! The inventories and notifiers are traits so the service runs unchanged
//! against the HTTP clients or against in-memory fixtures.
//!
//! # Failure policy
//!
//! Any fetch or notification failure for a check is handled according to
//! [`FetchFailurePolicy`]: `Abort` ends the run with the error, `Skip` records
//! the check in [`RunSummary::skipped`] and moves on. A failure to fetch the
//! overlay inventory always aborts since no check can run without it.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::checker::{self, CheckContext, CheckResult};
use crate::config::{CheckTarget, FetchFailurePolicy};
use crate::domain::{DocumentedPrefix, DocumentedVlan, OverlaySegment};
use crate::errors::{CheckError, InfraCheckResult};

/// Source of the overlay (NAM) inventory
#[async_trait]
pub trait OverlayInventory: Send + Sync {
    async fn fetch_segments(&self) -> InfraCheckResult<Vec<OverlaySegment>>;
}

/// Source of the documentation (NetBox) inventory, scoped per site
#[async_trait]
pub trait DocumentationInventory: Send + Sync {
    async fn fetch_vlans(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedVlan>>;

    async fn fetch_prefixes(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedPrefix>>;
}

/// Receiver of drifting check results
///
/// Called only when [`CheckResult::has_drift`] is true, but implementations
/// re-check it so they are safe to call directly.
#[async_trait]
pub trait DriftNotifier: Send + Sync {
    async fn notify(&self, result: &CheckResult) -> InfraCheckResult<()>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Progress hooks for a run
///
/// `check_started` fires before any fetch for the check, so it is seen even
/// for checks that later fail or are skipped.
pub trait RunObserver {
    fn check_started(&mut self, _target: &CheckTarget) {}

    fn check_finished(&mut self, _target: &CheckTarget, _result: &CheckResult) {}
}

struct ResultCallback<F>(F);

impl<F> RunObserver for ResultCallback<F>
where
    F: FnMut(&CheckTarget, &CheckResult),
{
    fn check_finished(&mut self, target: &CheckTarget, result: &CheckResult) {
        (self.0)(target, result)
    }
}

/// Result of one configured check
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub target: CheckTarget,
    pub result: CheckResult,
}

/// Check that was skipped under [`FetchFailurePolicy::Skip`]
#[derive(Debug, Clone)]
pub struct SkippedCheck {
    pub target: CheckTarget,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<CheckReport>,
    pub skipped: Vec<SkippedCheck>,
}

impl RunSummary {
    /// Number of checks that found drift
    pub fn drift_count(&self) -> usize {
        self.reports.iter().filter(|r| r.result.has_drift()).count()
    }
}

pub struct InfraCheckService<O, D> {
    overlay: O,
    documentation: D,
    notifiers: Vec<Box<dyn DriftNotifier>>,
    checks: Vec<CheckTarget>,
    context: CheckContext,
    policy: FetchFailurePolicy,
}

impl<O, D> InfraCheckService<O, D>
where
    O: OverlayInventory,
    D: DocumentationInventory,
{
    pub fn new(
        overlay: O,
        documentation: D,
        checks: Vec<CheckTarget>,
        context: CheckContext,
    ) -> Self {
        Self {
            overlay,
            documentation,
            notifiers: Vec::new(),
            checks,
            context,
            policy: FetchFailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FetchFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Notifiers run in the order they were added
    pub fn with_notifier(mut self, notifier: Box<dyn DriftNotifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub async fn run(&self) -> InfraCheckResult<RunSummary> {
        self.run_with(|_, _| {}).await
    }

    /// Run every check, calling `on_result` before notifiers fire
    pub async fn run_with<F>(&self, on_result: F) -> InfraCheckResult<RunSummary>
    where
        F: FnMut(&CheckTarget, &CheckResult),
    {
        self.run_observed(&mut ResultCallback(on_result)).await
    }

    /// Run every check, reporting progress to `observer`
    pub async fn run_observed<R>(&self, observer: &mut R) -> InfraCheckResult<RunSummary>
    where
        R: RunObserver,
    {
        let segments = self.overlay.fetch_segments().await?;
        if segments.is_empty() {
            return Err(CheckError::EmptyInventory(
                "no NAM VxLANs fetched - check API URL or token".to_string(),
            ));
        }

        let mut summary = RunSummary::default();
        for target in &self.checks {
            observer.check_started(target);
            match self.run_check(target, &segments, observer).await {
                Ok(result) => summary.reports.push(CheckReport {
                    target: target.clone(),
                    result,
                }),
                Err(e) => match self.policy {
                    FetchFailurePolicy::Abort => {
                        error!("Check '{}' failed: {}", target.group_name, e);
                        return Err(e);
                    }
                    FetchFailurePolicy::Skip => {
                        warn!("Skipping check '{}': {}", target.group_name, e);
                        summary.skipped.push(SkippedCheck {
                            target: target.clone(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        info!(
            "Completed {} checks ({} with drift, {} skipped)",
            summary.reports.len(),
            summary.drift_count(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    async fn run_check<R>(
        &self,
        target: &CheckTarget,
        segments: &[OverlaySegment],
        observer: &mut R,
    ) -> InfraCheckResult<CheckResult>
    where
        R: RunObserver,
    {
        let site_id = target.netbox_site_id;
        let (vlans, prefixes) = futures::try_join!(
            self.documentation.fetch_vlans(site_id),
            self.documentation.fetch_prefixes(site_id)
        )?;

        if vlans.is_empty() {
            return Err(CheckError::EmptyInventory(format!(
                "no Netbox VLANs fetched for site {} - check API URL or token",
                site_id
            )));
        }

        let result = checker::check(
            &target.group_name,
            &target.infra,
            segments,
            &vlans,
            &prefixes,
            &self.context,
        );
        observer.check_finished(target, &result);

        if result.has_drift() {
            for notifier in &self.notifiers {
                notifier.notify(&result).await.map_err(|e| {
                    error!("Notifier '{}' failed: {}", notifier.name(), e);
                    e
                })?;
            }
        }

        Ok(result)
    }
}
