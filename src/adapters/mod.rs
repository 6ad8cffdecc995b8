// Copyright (c) 2025 - Cowboy AI, Inc.

//! HTTP collaborators around the reconciliation engine
//!
//! - [`NetBoxClient`] and [`NamClient`] fetch the two inventories
//! - [`EsmClient`] opens a ticket for a drifting check
//! - [`SlackNotifier`] posts a truncated preview to a webhook
//!
//! The clients implement the seams in [`crate::service`], so the service can
//! be driven by in-memory inventories in tests.

pub mod esm;
pub mod nam;
pub mod netbox;
pub mod slack;

pub use esm::{EsmClient, EsmConfig, EsmRequest, EsmSession, TicketFields};
pub use nam::{NamClient, NamConfig};
pub use netbox::{NetBoxClient, NetBoxConfig};
pub use slack::{SlackConfig, SlackNotifier};

use std::collections::HashSet;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{CheckError, InfraCheckResult};

/// Paginated list envelope shared by NetBox and NAM
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<T>,
}

/// Build a client with a timeout and optional `Authorization` header
pub(crate) fn build_client(
    timeout_secs: u64,
    authorization: Option<String>,
    system: &'static str,
) -> InfraCheckResult<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(value) = authorization {
        let value = HeaderValue::from_str(&value).map_err(|e| {
            CheckError::Configuration(format!("Invalid {} API token: {}", system, e))
        })?;
        headers.insert(AUTHORIZATION, value);
    }

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|e| {
            CheckError::Transport(format!("Failed to create {} HTTP client: {}", system, e))
        })
}

/// Turn a non-success response into a [`CheckError::Status`]
pub(crate) async fn ensure_status(
    response: reqwest::Response,
    accepted: &[StatusCode],
    system: &'static str,
) -> InfraCheckResult<reqwest::Response> {
    if accepted.contains(&response.status()) {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(CheckError::Status {
        system,
        status,
        body,
    })
}

/// GET `first_url` and follow `next` links until the listing is exhausted
///
/// A `next` link to a page already fetched ends the walk.
pub(crate) async fn fetch_all_pages<T>(
    client: &Client,
    first_url: String,
    system: &'static str,
    what: &str,
) -> InfraCheckResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let mut records = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(first_url);

    while let Some(url) = next.take() {
        visited.insert(url.clone());

        let response = client.get(&url).send().await.map_err(|e| {
            CheckError::Transport(format!("failed to fetch {} from {}: {}", what, system, e))
        })?;
        let response = ensure_status(response, &[StatusCode::OK], system).await?;

        let page: Page<T> = response.json().await.map_err(|e| {
            CheckError::Deserialization(format!(
                "failed to parse {} {} response: {}",
                system, what, e
            ))
        })?;
        debug!(
            "Fetched {} {} from {} (total reported: {:?})",
            page.results.len(),
            what,
            system,
            page.count
        );
        records.extend(page.results);

        next = match page.next {
            Some(link) if visited.contains(&link) => {
                warn!(
                    "{} returned a next link to an already fetched page for {}: {}",
                    system, what, link
                );
                None
            }
            other => other,
        };
    }

    Ok(records)
}
