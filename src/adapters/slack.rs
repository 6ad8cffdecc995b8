// Copyright (c) 2025 - Cowboy AI, Inc.

//! Slack webhook notifier
//!
//! Posts a Block Kit attachment with the first lines of the report. Does
//! nothing when no webhook is configured or the check found no drift.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use super::{build_client, ensure_status};
use crate::checker::CheckResult;
use crate::errors::{CheckError, InfraCheckResult};
use crate::service::DriftNotifier;

const SYSTEM: &str = "Slack";

/// Maximum report lines included in a message
pub const MAX_PREVIEW_LINES: usize = 50;

pub const TRUNCATION_MARKER: &str = "(… truncated …)";

const ATTACHMENT_COLOR: &str = "#FF7900";

#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Empty disables the notifier
    pub webhook_url: String,
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: 10,
        }
    }
}

pub struct SlackNotifier {
    config: SlackConfig,
    client: Client,
}

/// Cut `output` to `max_lines` lines, appending the truncation marker
pub fn truncate_preview(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.split('\n').collect();
    if lines.len() <= max_lines {
        return output.to_string();
    }
    format!("{}\n{}", lines[..max_lines].join("\n"), TRUNCATION_MARKER)
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> InfraCheckResult<Self> {
        let client = build_client(config.timeout_secs, None, SYSTEM)?;
        Ok(Self { config, client })
    }

    pub fn is_enabled(&self) -> bool {
        !self.config.webhook_url.trim().is_empty()
    }

    pub fn build_payload(&self, result: &CheckResult) -> Value {
        let preview = truncate_preview(&result.output, MAX_PREVIEW_LINES);

        let blocks = json!([
            {
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("VLAN OG PREFIX RAPPORT FOR {}", result.group_name.to_uppercase()),
                }
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": "vlan og prefixer funnet har ikke korrekt 'infrastructure' eller navn satt i Netbox, og må korrigeres.",
                }
            },
            { "type": "divider" },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("```{}```", preview),
                }
            }
        ]);

        json!({
            "attachments": [
                { "color": ATTACHMENT_COLOR, "blocks": blocks }
            ]
        })
    }
}

#[async_trait]
impl DriftNotifier for SlackNotifier {
    async fn notify(&self, result: &CheckResult) -> InfraCheckResult<()> {
        if !self.is_enabled() || !result.has_drift() {
            return Ok(());
        }

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&self.build_payload(result))
            .send()
            .await
            .map_err(|e| {
                CheckError::Notification(format!("failed to send Slack notification: {}", e))
            })?;
        ensure_status(response, &[StatusCode::OK], SYSTEM).await?;

        debug!("Posted Slack notification for '{}'", result.group_name);
        Ok(())
    }

    fn name(&self) -> &str {
        "slack"
    }
}
