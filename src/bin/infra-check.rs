// Copyright (c) 2025 - Cowboy AI, Inc.
//! Infra Check
//!
//! Runs every configured (group, infra) check once and exits:
//! - NAM VxLANs fetched once
//! - NetBox VLANs and prefixes fetched per site
//! - drift reports printed to stdout
//! - ESM ticket and optional Slack message per drifting check
//!
//! Run with: cargo run --bin infra-check
//!
//! Prerequisites:
//! 1. config/config.json (or INFRA_CHECK_CONFIG)
//! 2. secrets/{netbox,nam,esm}.secret (or INFRA_CHECK_SECRETS_DIR)

use anyhow::{Context, Result};
use netbox_infra_check::adapters::{EsmClient, NamClient, NetBoxClient, SlackNotifier};
use netbox_infra_check::config::CheckTarget;
use netbox_infra_check::{CheckResult, Config, InfraCheckService, RunObserver};
use tracing::info;

/// Prints a banner per check, then its report
struct ConsoleReport {
    kind: &'static str,
}

impl RunObserver for ConsoleReport {
    fn check_started(&mut self, target: &CheckTarget) {
        println!("\n");
        println!("==================================");
        println!("Sjekker {} {}", self.kind, target.group_name.to_uppercase());
        println!("==================================\n");
    }

    fn check_finished(&mut self, _target: &CheckTarget, result: &CheckResult) {
        print!("{}", result.output);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    info!("Configuration loaded:");
    info!("  - NetBox URL: {}", config.netbox_url);
    info!("  - NAM URL: {}", config.nam_url);
    info!("  - Checks: {}", config.checks.len());
    info!("  - On fetch failure: {:?}", config.on_fetch_failure);

    let netbox = NetBoxClient::new(config.netbox()).context("Failed to create NetBox client")?;
    let nam = NamClient::new(config.nam()).context("Failed to create NAM client")?;

    let mut service = InfraCheckService::new(
        nam,
        netbox,
        config.checks.clone(),
        config.check_context(),
    )
    .with_policy(config.on_fetch_failure);

    if config.ticketing_enabled() {
        let esm = EsmClient::new(config.esm()).context("Failed to create ESM client")?;
        service = service.with_notifier(Box::new(esm));
    } else {
        info!("ESM URL not configured, tickets disabled");
    }

    let slack = SlackNotifier::new(config.slack()).context("Failed to create Slack notifier")?;
    if slack.is_enabled() {
        service = service.with_notifier(Box::new(slack));
    }

    let mut console = ConsoleReport {
        kind: config.group_kind.console_label(),
    };
    let summary = service
        .run_observed(&mut console)
        .await
        .context("Infra check aborted")?;

    for skipped in &summary.skipped {
        println!(
            "✗ Hoppet over '{}' ({}): {}",
            skipped.target.group_name, skipped.target.infra, skipped.reason
        );
    }

    println!("\n======================");
    println!("Alle sjekker fullført!");
    println!("======================\n");

    Ok(())
}
