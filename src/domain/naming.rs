// Copyright (c) 2025 - Cowboy AI, Inc.
//! Name canonicalization and naming-generation markers

use serde::{Deserialize, Serialize};

/// Canonical form for fuzzy name comparison: trimmed and lowercased
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Site/generation tokens embedded in segment names
///
/// A VLAN whose documented name carries `new` while NAM still carries `old`
/// has been moved without being relabeled in NAM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingMarkers {
    pub old: String,
    pub new: String,
}

impl NamingMarkers {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Rewrite every occurrence of the new marker back to the old one
    pub fn to_old_generation(&self, name: &str) -> String {
        name.replace(&self.new, &self.old)
    }
}

impl Default for NamingMarkers {
    fn default() -> Self {
        Self::new("nam-01", "nam-03")
    }
}
