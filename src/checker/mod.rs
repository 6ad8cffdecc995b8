// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reconciliation Engine
//!
//! Pairs NAM overlay segments with NetBox VLANs and prefixes for one
//! (group, infra) check and sorts the differences into four drift classes.
//!
//! # Pipeline
//!
//! ```text
//! segments ──► group_subset ──┐
//!                             ├─► moved_segments
//! vlans ─────► infra_subset ──┼─► misconfigured_segments ──► name_mismatches
//!                             │
//! prefixes (unfiltered) ──────┴─► wrong_prefixes
//!                                          │
//!                                          ▼
//!                                     CheckResult ──► report::render
//! ```
//!
//! The engine is pure and synchronous. It borrows the inventory snapshots and
//! returns an owned [`CheckResult`], so checks for different groups can run on
//! the same snapshots concurrently.
//!
//! # Example
//!
//! ```rust
//! use netbox_infra_check::checker::{check, CheckContext};
//! use netbox_infra_check::domain::{DocumentedVlan, GroupRef, OverlaySegment};
//!
//! let segments = vec![OverlaySegment::new(100, "srv-100").in_group(GroupRef::new(1, "DC1"))];
//! let vlans = vec![DocumentedVlan::new(1, 100, "srv-100").with_infra("prod")];
//!
//! let result = check("DC1", "prod", &segments, &vlans, &[], &CheckContext::default());
//! assert!(!result.has_drift());
//! ```

pub mod report;
pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DocumentedPrefix, DocumentedVlan, NamingMarkers, OverlaySegment};

pub use report::{render, NO_DRIFT_LINE};
pub use rules::{MovedSegment, WrongPrefix};

/// Per-run settings the rules and the renderer need
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckContext {
    /// Label naming the documentation system in report titles (its base URL)
    pub target_label: String,
    pub markers: NamingMarkers,
}

impl CheckContext {
    pub fn new(target_label: impl Into<String>, markers: NamingMarkers) -> Self {
        Self {
            target_label: target_label.into(),
            markers,
        }
    }
}

/// Outcome of one (group, infra) check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub group_name: String,
    pub infra: String,
    pub moved: Vec<MovedSegment>,
    pub misconfigured: Vec<OverlaySegment>,
    pub name_mismatches: Vec<OverlaySegment>,
    pub wrong_prefixes: Vec<WrongPrefix>,
    /// Rendered report text
    pub output: String,
}

impl CheckResult {
    /// True when any drift class is non-empty
    pub fn has_drift(&self) -> bool {
        !self.moved.is_empty()
            || !self.misconfigured.is_empty()
            || !self.name_mismatches.is_empty()
            || !self.wrong_prefixes.is_empty()
    }

    /// Total number of reported items across all classes
    pub fn finding_count(&self) -> usize {
        self.moved.len()
            + self.misconfigured.len()
            + self.name_mismatches.len()
            + self.wrong_prefixes.len()
    }
}

/// Run every detector for one group and infra, then render the report
pub fn check(
    group_name: &str,
    infra: &str,
    segments: &[OverlaySegment],
    vlans: &[DocumentedVlan],
    prefixes: &[DocumentedPrefix],
    context: &CheckContext,
) -> CheckResult {
    let group_segments = rules::group_subset(segments, group_name);
    let infra_vlans = rules::infra_subset(vlans, infra);
    debug!(
        "Checking {} segments in '{}' against {} VLANs with infra '{}'",
        group_segments.len(),
        group_name,
        infra_vlans.len(),
        infra
    );

    let moved = rules::moved_segments(&group_segments, &infra_vlans, &context.markers);
    let misconfigured = rules::misconfigured_segments(&group_segments, &infra_vlans);
    let name_mismatches = rules::name_mismatches(&group_segments, &infra_vlans, &misconfigured);
    let wrong_prefixes = rules::wrong_prefixes(&group_segments, prefixes, infra);

    let mut result = CheckResult {
        group_name: group_name.to_string(),
        infra: infra.to_string(),
        moved,
        misconfigured,
        name_mismatches,
        wrong_prefixes,
        output: String::new(),
    };
    result.output = render(&result, context);

    debug!(
        "Check '{}'/'{}': {} moved, {} misconfigured, {} name mismatches, {} wrong prefixes",
        group_name,
        infra,
        result.moved.len(),
        result.misconfigured.len(),
        result.name_mismatches.len(),
        result.wrong_prefixes.len()
    );

    result
}
