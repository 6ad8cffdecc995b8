// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for netbox-infra-check
//!
//! Deterministic inventory builders and in-memory implementations of the
//! service traits. [`http`] is a loopback stub for the HTTP clients.

#![allow(dead_code)]

pub mod http;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use netbox_infra_check::checker::{CheckContext, CheckResult};
use netbox_infra_check::domain::{
    DocumentedPrefix, DocumentedVlan, GroupRef, NamingMarkers, OverlaySegment, VlanReference,
};
use netbox_infra_check::errors::{CheckError, InfraCheckResult};
use netbox_infra_check::service::{DocumentationInventory, DriftNotifier, OverlayInventory};

pub const GROUP: &str = "DC1";
pub const INFRA: &str = "prod";
pub const NETBOX_LABEL: &str = "https://netbox.example";

pub fn context() -> CheckContext {
    CheckContext::new(NETBOX_LABEL, NamingMarkers::default())
}

/// Segment whose only group is `group`
pub fn segment_in(id: i64, name: &str, group: &str) -> OverlaySegment {
    OverlaySegment::new(id, name).in_group(GroupRef::new(1, group))
}

/// Segment in [`GROUP`]
pub fn segment(id: i64, name: &str) -> OverlaySegment {
    segment_in(id, name, GROUP)
}

/// VLAN with `id == tag` under `infra`
pub fn vlan(tag: i64, name: &str, infra: &str) -> DocumentedVlan {
    DocumentedVlan::new(tag, tag, name).with_infra(infra)
}

/// Prefix bound to a VLAN reference, optionally with an infra
pub fn prefix(cidr: &str, tag: i64, vlan_name: &str, infra: Option<&str>) -> DocumentedPrefix {
    let prefix = DocumentedPrefix::new(tag, cidr).bound_to(VlanReference::new(tag, tag, vlan_name));
    match infra {
        Some(infra) => prefix.with_infra(infra),
        None => prefix,
    }
}

/// Overlay inventory served from memory
#[derive(Clone, Default)]
pub struct StaticOverlay {
    pub segments: Vec<OverlaySegment>,
    pub fail: bool,
}

#[async_trait]
impl OverlayInventory for StaticOverlay {
    async fn fetch_segments(&self) -> InfraCheckResult<Vec<OverlaySegment>> {
        if self.fail {
            return Err(CheckError::Transport("NAM unreachable".to_string()));
        }
        Ok(self.segments.clone())
    }
}

/// Documentation inventory keyed by site id; unknown sites fail
#[derive(Clone, Default)]
pub struct StaticDocumentation {
    pub sites: HashMap<i64, (Vec<DocumentedVlan>, Vec<DocumentedPrefix>)>,
}

impl StaticDocumentation {
    pub fn with_site(
        mut self,
        site_id: i64,
        vlans: Vec<DocumentedVlan>,
        prefixes: Vec<DocumentedPrefix>,
    ) -> Self {
        self.sites.insert(site_id, (vlans, prefixes));
        self
    }
}

#[async_trait]
impl DocumentationInventory for StaticDocumentation {
    async fn fetch_vlans(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedVlan>> {
        self.sites
            .get(&site_id)
            .map(|(vlans, _)| vlans.clone())
            .ok_or_else(|| CheckError::Status {
                system: "Netbox",
                status: 404,
                body: format!("site {} not found", site_id),
            })
    }

    async fn fetch_prefixes(&self, site_id: i64) -> InfraCheckResult<Vec<DocumentedPrefix>> {
        self.sites
            .get(&site_id)
            .map(|(_, prefixes)| prefixes.clone())
            .ok_or_else(|| CheckError::Status {
                system: "Netbox",
                status: 404,
                body: format!("site {} not found", site_id),
            })
    }
}

/// Notifier that records the group names it was called for
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriftNotifier for RecordingNotifier {
    async fn notify(&self, result: &CheckResult) -> InfraCheckResult<()> {
        self.calls.lock().unwrap().push(result.group_name.clone());
        if self.fail {
            return Err(CheckError::Ticket("ticket queue down".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
