// Copyright (c) 2025 - Cowboy AI, Inc.

//! NetBox IPAM Client
//!
//! Read-only access to the VLAN and prefix documentation of one NetBox site:
//!
//! ```text
//! GET /api/ipam/vlans/?site_id={site}&limit={limit}
//! GET /api/ipam/prefixes/?site_id={site}&limit={limit}
//! ```
//!
//! Both listings are paginated; `next` links are followed until exhausted.
//!
//! # Example
//!
//! ```rust,no_run
//! use netbox_infra_check::adapters::{NetBoxClient, NetBoxConfig};
//! use netbox_infra_check::config::Secret;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NetBoxClient::new(NetBoxConfig {
//!         base_url: "https://netbox.example".to_string(),
//!         api_token: Secret::new("your-token-here"),
//!         ..Default::default()
//!     })?;
//!
//!     let vlans = client.fetch_vlans(3).await?;
//!     println!("{} VLANs", vlans.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::{build_client, fetch_all_pages};
use crate::config::Secret;
use crate::domain::{DocumentedPrefix, DocumentedVlan};
use crate::errors::InfraCheckResult;
use crate::service::DocumentationInventory;

const SYSTEM: &str = "Netbox";

/// Configuration for NetBox connection
#[derive(Debug, Clone)]
pub struct NetBoxConfig {
    /// NetBox base URL (e.g., "https://netbox.example")
    pub base_url: String,

    /// API token, sent as `Authorization: Token ...`
    pub api_token: Secret,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Page size requested per listing call
    pub page_limit: u32,
}

impl Default for NetBoxConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: Secret::default(),
            timeout_secs: 30,
            page_limit: 1000,
        }
    }
}

pub struct NetBoxClient {
    config: NetBoxConfig,
    client: Client,
}

impl NetBoxClient {
    pub fn new(config: NetBoxConfig) -> InfraCheckResult<Self> {
        let client = build_client(
            config.timeout_secs,
            Some(format!("Token {}", config.api_token.expose())),
            SYSTEM,
        )?;
        Ok(Self { config, client })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub fn vlans_url(&self, site_id: i64) -> String {
        format!(
            "{}/api/ipam/vlans/?site_id={}&limit={}",
            self.base_url(),
            site_id,
            self.config.page_limit
        )
    }

    pub fn prefixes_url(&self, site_id: i64) -> String {
        format!(
            "{}/api/ipam/prefixes/?site_id={}&limit={}",
            self.base_url(),
            site_id,
            self.config.page_limit
        )
    }

    /// All VLANs documented for a site
    pub async fn fetch_vlans(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedVlan>> {
        let vlans = fetch_all_pages(&self.client, self.vlans_url(site_id), SYSTEM, "VLANs").await?;
        info!("Fetched {} Netbox VLANs for site {}", vlans.len(), site_id);
        Ok(vlans)
    }

    /// All prefixes documented for a site
    pub async fn fetch_prefixes(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedPrefix>> {
        let prefixes =
            fetch_all_pages(&self.client, self.prefixes_url(site_id), SYSTEM, "prefixes").await?;
        info!("Fetched {} Netbox prefixes for site {}", prefixes.len(), site_id);
        Ok(prefixes)
    }
}

#[async_trait]
impl DocumentationInventory for NetBoxClient {
    async fn fetch_vlans(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedVlan>> {
        NetBoxClient::fetch_vlans(self, site_id).await
    }

    async fn fetch_prefixes(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedPrefix>> {
        NetBoxClient::fetch_prefixes(self, site_id).await
    }
}
