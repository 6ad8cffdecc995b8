// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for the inventory collaborators
//!
//! The reconciliation engine itself is total and never produces these. They
//! originate in fetching, configuration loading and notification delivery.

use thiserror::Error;

/// Errors that can occur around an infra check run
#[derive(Debug, Error)]
pub enum CheckError {
    /// Transport-level HTTP failure (connect, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote system answered with an unexpected status
    #[error("{system} API returned status {status}: {body}")]
    Status {
        system: &'static str,
        status: u16,
        body: String,
    },

    /// Payload could not be decoded
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Configuration or secret file problem
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Ticketing login failed or was skipped
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Ticket creation failed
    #[error("Ticket error: {0}")]
    Ticket(String),

    /// Chat notification failed
    #[error("Notification error: {0}")]
    Notification(String),

    /// A fetch returned nothing where records are required
    #[error("Empty inventory: {0}")]
    EmptyInventory(String),
}

/// Result type for infra check collaborators
pub type InfraCheckResult<T> = Result<T, CheckError>;

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CheckError::Deserialization(err.to_string())
        } else {
            CheckError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(err: serde_json::Error) -> Self {
        CheckError::Deserialization(err.to_string())
    }
}
