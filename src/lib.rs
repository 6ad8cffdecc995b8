// Copyright (c) 2025 - Cowboy AI, Inc.
//! NetBox / NAM infra drift auditor
//!
//! Compares the VxLAN inventory in NAM with the VLAN and prefix documentation
//! in NetBox for a group (datacenter or virtual datacenter) and an infra
//! class, and reports four kinds of drift. Nothing is ever written back to
//! either system.
//!
//! - [`checker`] - the pure reconciliation engine and report renderer
//! - [`domain`] - inventory records and name normalization
//! - [`adapters`] - NetBox, NAM, ESM and Slack HTTP clients
//! - [`service`] - per-check orchestration over the adapter traits
//! - [`config`] - JSON configuration and secret files

pub mod adapters;
pub mod checker;
pub mod config;
pub mod domain;
pub mod errors;
pub mod service;

// Re-export commonly used types
pub use checker::{check, CheckContext, CheckResult};
pub use config::{CheckTarget, Config, FetchFailurePolicy, GroupKind};
pub use errors::{CheckError, InfraCheckResult};
pub use service::{InfraCheckService, RunObserver, RunSummary};
