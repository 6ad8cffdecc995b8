// Copyright (c) 2025 - Cowboy AI, Inc.

//! ESM Ticketing Client
//!
//! Opens a service request carrying the rendered drift report:
//!
//! ```text
//! POST /auth/authentication-endpoint/authenticate/token   {login, password} → raw token
//! POST /rest/{tenant}/ems/bulk                             Bearer token, CREATE Request
//! ```
//!
//! The report's newlines become `<br>` since the description field is HTML.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{build_client, ensure_status};
use crate::checker::CheckResult;
use crate::config::Secret;
use crate::errors::{CheckError, InfraCheckResult};
use crate::service::DriftNotifier;

const SYSTEM: &str = "ESM";
const ACCEPTED: [StatusCode; 2] = [StatusCode::OK, StatusCode::CREATED];

/// Request fields that differ per deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFields {
    pub offering_id: String,
    pub requester_id: String,
    pub service_id: String,
    pub team_id: String,
    /// Leading part of the display label, e.g. "DC Infra Check"
    pub label_prefix: String,
}

#[derive(Debug, Clone)]
pub struct EsmConfig {
    pub base_url: String,
    pub user: String,
    pub password: Secret,
    pub tenant_id: i64,
    pub timeout_secs: u64,
    pub fields: TicketFields,
}

#[derive(Serialize)]
struct Credentials<'a> {
    login: &'a str,
    password: &'a str,
}

/// Bulk request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsmRequest {
    pub entities: Vec<EsmEntity>,
    pub operation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsmEntity {
    pub entity_type: String,
    pub properties: EsmProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EsmProperties {
    pub requests_offering: String,
    pub creation_source: String,
    pub requested_by_person: String,
    pub requested_for_person: String,
    pub user_options: String,
    pub display_label: String,
    pub description: String,
    pub public_scope: String,
}

/// Bearer token obtained from [`EsmClient::authenticate`]
#[derive(Debug, Clone)]
pub struct EsmSession {
    token: Secret,
}

impl EsmSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token),
        }
    }
}

pub struct EsmClient {
    config: EsmConfig,
    client: Client,
}

impl EsmClient {
    pub fn new(config: EsmConfig) -> InfraCheckResult<Self> {
        let client = build_client(config.timeout_secs, None, SYSTEM)?;
        Ok(Self { config, client })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Log in and return the session token
    pub async fn authenticate(&self) -> InfraCheckResult<EsmSession> {
        let url = format!(
            "{}/auth/authentication-endpoint/authenticate/token",
            self.base_url()
        );
        let response = self
            .client
            .post(&url)
            .json(&Credentials {
                login: &self.config.user,
                password: self.config.password.expose(),
            })
            .send()
            .await
            .map_err(|e| CheckError::Authentication(format!("ESM login failed: {}", e)))?;

        if !ACCEPTED.contains(&response.status()) {
            return Err(CheckError::Authentication(format!(
                "ESM login did not return OK: {}",
                response.status()
            )));
        }

        let token = response
            .text()
            .await
            .map_err(|e| CheckError::Authentication(format!("ESM token unreadable: {}", e)))?;
        debug!("Authenticated to ESM as {}", self.config.user);
        Ok(EsmSession::new(token.trim()))
    }

    /// Build the CREATE request for a drifting check
    pub fn build_request(&self, result: &CheckResult) -> EsmRequest {
        let fields = &self.config.fields;
        let user_options = serde_json::json!({
            "complexTypeProperties": [{
                "properties": {
                    "Tjeneste_c": fields.service_id,
                    "Team_c": fields.team_id,
                }
            }]
        });

        let properties = EsmProperties {
            requests_offering: fields.offering_id.clone(),
            creation_source: "CreationSourceEss".to_string(),
            requested_by_person: fields.requester_id.clone(),
            requested_for_person: fields.requester_id.clone(),
            user_options: user_options.to_string(),
            display_label: format!(
                "{} - {} - {}",
                fields.label_prefix, result.group_name, result.infra
            ),
            description: result.output.replace('\n', "<br>"),
            public_scope: "Private".to_string(),
        };

        EsmRequest {
            entities: vec![EsmEntity {
                entity_type: "Request".to_string(),
                properties,
            }],
            operation: "CREATE".to_string(),
        }
    }

    /// Submit a request with a session from [`Self::authenticate`]
    pub async fn send_request(
        &self,
        session: &EsmSession,
        request: &EsmRequest,
    ) -> InfraCheckResult<()> {
        if session.token.is_empty() {
            return Err(CheckError::Authentication(
                "ESM session has no token".to_string(),
            ));
        }

        let url = format!("{}/rest/{}/ems/bulk", self.base_url(), self.config.tenant_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(session.token.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| CheckError::Ticket(format!("ESM request failed: {}", e)))?;

        ensure_status(response, &ACCEPTED, SYSTEM).await?;
        Ok(())
    }
}

#[async_trait]
impl DriftNotifier for EsmClient {
    async fn notify(&self, result: &CheckResult) -> InfraCheckResult<()> {
        if !result.has_drift() {
            return Ok(());
        }
        let session = self.authenticate().await?;
        let request = self.build_request(result);
        self.send_request(&session, &request).await?;
        info!(
            "Created ESM request for '{}' / '{}'",
            result.group_name, result.infra
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "esm"
    }
}
