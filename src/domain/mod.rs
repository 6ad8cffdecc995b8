// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Read-only records from the two systems of record and the naming helpers
//! the reconciliation rules compare them with.
//!
//! # Records
//!
//! - [`OverlaySegment`] - NAM VxLAN with ordered group memberships
//! - [`DocumentedVlan`] - NetBox VLAN with custom fields
//! - [`DocumentedPrefix`] - NetBox prefix, optionally bound to a VLAN
//!
//! # Naming
//!
//! - [`normalize`] - trim + lowercase for fuzzy name equality
//! - [`NamingMarkers`] - old/new site generation tokens

pub mod inventory;
pub mod naming;

pub use inventory::{
    CustomFields, DocumentedPrefix, DocumentedVlan, GroupRef, OverlaySegment, VlanReference,
    INFRA_FIELD,
};
pub use naming::{normalize, NamingMarkers};
