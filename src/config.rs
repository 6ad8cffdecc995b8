// Copyright (c) 2025 - Cowboy AI, Inc.
//! Run configuration
//!
//! Loaded from a JSON file holding URLs, ticket fields and the list of
//! checks, plus one secret file per credential:
//!
//! ```text
//! config/config.json
//! secrets/netbox.secret
//! secrets/nam.secret
//! secrets/esm.secret
//! ```
//!
//! `INFRA_CHECK_CONFIG` and `INFRA_CHECK_SECRETS_DIR` override the two
//! locations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::esm::{EsmConfig, TicketFields};
use crate::adapters::nam::NamConfig;
use crate::adapters::netbox::NetBoxConfig;
use crate::adapters::slack::SlackConfig;
use crate::checker::CheckContext;
use crate::domain::NamingMarkers;
use crate::errors::{CheckError, InfraCheckResult};

pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";
pub const DEFAULT_SECRETS_DIR: &str = "secrets";

/// Credential that never shows up in logs or serialized output
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// What the grouping key means for this deployment
///
/// Datacenter and virtual-datacenter checks run the same engine; only the
/// wording of console banners and ticket labels differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    #[default]
    Datacenter,
    VirtualDatacenter,
}

impl GroupKind {
    /// Norwegian noun used in console banners
    pub fn console_label(&self) -> &'static str {
        match self {
            GroupKind::Datacenter => "datasenter",
            GroupKind::VirtualDatacenter => "virtuelt datasenter",
        }
    }

    /// Leading part of the ticket display label
    pub fn ticket_label_prefix(&self) -> &'static str {
        match self {
            GroupKind::Datacenter => "DC Infra Check",
            GroupKind::VirtualDatacenter => "VDC Infra Check",
        }
    }
}

/// How the run reacts when fetching or notifying fails for one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Stop the whole run with the error
    #[default]
    Abort,
    /// Log, record the group as skipped and continue
    Skip,
}

/// One (group, infra) check bound to a NetBox site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTarget {
    pub netbox_site_id: i64,
    pub infra: String,
    #[serde(alias = "dc_name", alias = "vdc_name")]
    pub group_name: String,
}

/// Full run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub netbox_url: String,
    pub nam_url: String,
    #[serde(default)]
    pub esm_url: String,
    #[serde(default)]
    pub esm_user: String,
    #[serde(default)]
    pub esm_tenant_id: i64,
    #[serde(default)]
    pub esm_offering_id: String,
    #[serde(default)]
    pub esm_requester_id: String,
    #[serde(default)]
    pub esm_service_id: String,
    #[serde(default)]
    pub esm_team_id: String,
    /// Empty or missing disables chat notifications
    #[serde(default, rename = "slack_webhook_url")]
    pub slack_webhook: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default)]
    pub naming: NamingMarkers,
    #[serde(default)]
    pub on_fetch_failure: FetchFailurePolicy,
    #[serde(default)]
    pub group_kind: GroupKind,

    pub checks: Vec<CheckTarget>,

    #[serde(skip)]
    pub netbox_api_token: Secret,
    #[serde(skip)]
    pub nam_api_token: Secret,
    #[serde(skip)]
    pub esm_password: Secret,
}

fn default_timeout() -> u64 {
    30
}

fn default_page_limit() -> u32 {
    1000
}

impl Config {
    /// Load from the default locations, honouring the environment overrides
    pub fn load() -> InfraCheckResult<Self> {
        let config_path = std::env::var("INFRA_CHECK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let secrets_dir = std::env::var("INFRA_CHECK_SECRETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_DIR));

        Self::load_from(&config_path, &secrets_dir)
    }

    /// Load the JSON file and the three secret files
    pub fn load_from(config_path: &Path, secrets_dir: &Path) -> InfraCheckResult<Self> {
        let raw = std::fs::read_to_string(config_path).map_err(|e| {
            CheckError::Configuration(format!(
                "failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let mut config = Self::from_json(&raw)?;
        config.netbox_api_token = read_secret(&secrets_dir.join("netbox.secret"), "Netbox token")?;
        config.nam_api_token = read_secret(&secrets_dir.join("nam.secret"), "NAM token")?;
        config.esm_password = read_secret(&secrets_dir.join("esm.secret"), "ESM password")?;

        config.validate()?;
        Ok(config)
    }

    /// Parse the JSON part only; secrets stay empty
    pub fn from_json(raw: &str) -> InfraCheckResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| CheckError::Configuration(format!("failed to parse config JSON: {}", e)))
    }

    pub fn validate(&self) -> InfraCheckResult<()> {
        if self.netbox_url.trim().is_empty() {
            return Err(CheckError::Configuration("netbox_url is empty".to_string()));
        }
        if self.nam_url.trim().is_empty() {
            return Err(CheckError::Configuration("nam_url is empty".to_string()));
        }
        if self.checks.is_empty() {
            return Err(CheckError::Configuration("no checks configured".to_string()));
        }
        if let Some(check) = self.checks.iter().find(|c| c.group_name.is_empty()) {
            return Err(CheckError::Configuration(format!(
                "check for site {} has an empty group name",
                check.netbox_site_id
            )));
        }
        if self.naming.new.is_empty() {
            return Err(CheckError::Configuration(
                "naming.new marker is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Engine settings; NetBox URL doubles as the report's target label
    pub fn check_context(&self) -> CheckContext {
        CheckContext::new(self.netbox_url.clone(), self.naming.clone())
    }

    pub fn netbox(&self) -> NetBoxConfig {
        NetBoxConfig {
            base_url: self.netbox_url.clone(),
            api_token: self.netbox_api_token.clone(),
            timeout_secs: self.timeout_secs,
            page_limit: self.page_limit,
        }
    }

    pub fn nam(&self) -> NamConfig {
        NamConfig {
            base_url: self.nam_url.clone(),
            api_token: self.nam_api_token.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn esm(&self) -> EsmConfig {
        EsmConfig {
            base_url: self.esm_url.clone(),
            user: self.esm_user.clone(),
            password: self.esm_password.clone(),
            tenant_id: self.esm_tenant_id,
            timeout_secs: self.timeout_secs,
            fields: TicketFields {
                offering_id: self.esm_offering_id.clone(),
                requester_id: self.esm_requester_id.clone(),
                service_id: self.esm_service_id.clone(),
                team_id: self.esm_team_id.clone(),
                label_prefix: self.group_kind.ticket_label_prefix().to_string(),
            },
        }
    }

    /// Ticketing is wired only when an ESM endpoint is configured
    pub fn ticketing_enabled(&self) -> bool {
        !self.esm_url.trim().is_empty()
    }

    pub fn slack(&self) -> SlackConfig {
        SlackConfig {
            webhook_url: self.slack_webhook.clone(),
            timeout_secs: 10,
        }
    }
}

fn read_secret(path: &Path, what: &str) -> InfraCheckResult<Secret> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CheckError::Configuration(format!("failed to read {} from {}: {}", what, path.display(), e))
    })?;
    Ok(Secret::new(raw.trim()))
}
