// Copyright (c) 2025 - Cowboy AI, Inc.

//! NAM VxLAN Client
//!
//! Fetches the whole overlay inventory once per run with the container
//! (group) memberships expanded.

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::{build_client, fetch_all_pages};
use crate::config::Secret;
use crate::domain::OverlaySegment;
use crate::errors::InfraCheckResult;
use crate::service::OverlayInventory;

const SYSTEM: &str = "NAM";

/// Configuration for NAM connection
#[derive(Debug, Clone)]
pub struct NamConfig {
    pub base_url: String,
    /// Sent as `Authorization: Bearer ...`
    pub api_token: Secret,
    pub timeout_secs: u64,
}

pub struct NamClient {
    config: NamConfig,
    client: Client,
}

impl NamClient {
    pub fn new(config: NamConfig) -> InfraCheckResult<Self> {
        let client = build_client(
            config.timeout_secs,
            Some(format!("Bearer {}", config.api_token.expose())),
            SYSTEM,
        )?;
        Ok(Self { config, client })
    }

    pub fn vxlans_url(&self) -> String {
        format!(
            "{}/api/ipam/vxlans/?expand=1",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Every VxLAN known to NAM
    pub async fn fetch_segments(&self) -> InfraCheckResult<Vec<OverlaySegment>> {
        let segments = fetch_all_pages(&self.client, self.vxlans_url(), SYSTEM, "VxLANs").await?;
        info!("Fetched {} NAM VxLANs", segments.len());
        Ok(segments)
    }
}

#[async_trait]
impl OverlayInventory for NamClient {
    async fn fetch_segments(&self) -> InfraCheckResult<Vec<OverlaySegment>> {
        NamClient::fetch_segments(self).await
    }
}
