// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Records from NAM and NetBox
//!
//! These are the already-deserialized snapshots the reconciliation engine
//! reads. They are constructed by the HTTP clients (or by tests) and never
//! mutated afterwards.
//!
//! # Join key
//!
//! [`OverlaySegment::id`] is the cross-system tag number and is compared
//! against [`DocumentedVlan::tag`] and [`VlanReference::tag`]. Neither system
//! guarantees the tag is unique.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Custom field key holding the infra classification in NetBox
pub const INFRA_FIELD: &str = "infra";

/// Open-ended NetBox custom field bag with typed accessors
///
/// NetBox may send `null`, omit the map, or store any JSON type under a key.
/// Accessors never fail: a missing key or a value of the wrong type yields the
/// documented default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomFields(Map<String, Value>);

impl CustomFields {
    /// Create an empty field bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// String value of `key`, or `""` when absent or not a string
    pub fn str_or_empty(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// The `infra` classification, or `""`
    pub fn infra(&self) -> &str {
        self.str_or_empty(INFRA_FIELD)
    }
}

impl<'de> Deserialize<'de> for CustomFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Self(map.unwrap_or_default()))
    }
}

/// Group membership of an overlay segment (a NAM "container")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: i64,
    pub name: String,
}

impl GroupRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Virtual network segment from NAM (a VxLAN)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySegment {
    /// Segment id, doubling as the cross-system tag number
    pub id: i64,
    pub name: String,
    /// Ordered group memberships; only the first one scopes a check
    #[serde(rename = "containers", default)]
    pub groups: Vec<GroupRef>,
}

impl OverlaySegment {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Append a group membership
    pub fn in_group(mut self, group: GroupRef) -> Self {
        self.groups.push(group);
        self
    }

    /// Name of the first group, or `""` when the segment belongs to none
    pub fn primary_group(&self) -> &str {
        self.groups.first().map(|g| g.name.as_str()).unwrap_or("")
    }
}

/// VLAN record documented in NetBox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentedVlan {
    pub id: i64,
    /// 802.1Q / VxLAN tag number (NetBox `vid`)
    #[serde(rename = "vid")]
    pub tag: i64,
    pub name: String,
    #[serde(default)]
    pub custom_fields: CustomFields,
}

impl DocumentedVlan {
    pub fn new(id: i64, tag: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            tag,
            name: name.into(),
            custom_fields: CustomFields::new(),
        }
    }

    /// Set the `infra` custom field
    pub fn with_infra(mut self, infra: impl Into<String>) -> Self {
        self.custom_fields = self.custom_fields.with(INFRA_FIELD, infra.into());
        self
    }

    /// Replace the whole custom field bag
    pub fn with_custom_fields(mut self, fields: CustomFields) -> Self {
        self.custom_fields = fields;
        self
    }

    /// Infra classification, `""` when missing or not a string
    pub fn infra_class(&self) -> &str {
        self.custom_fields.infra()
    }
}

/// Nested VLAN reference embedded in a NetBox prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanReference {
    pub id: i64,
    #[serde(rename = "vid")]
    pub tag: i64,
    pub name: String,
}

impl VlanReference {
    pub fn new(id: i64, tag: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            tag,
            name: name.into(),
        }
    }
}

/// Address block documented in NetBox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentedPrefix {
    pub id: i64,
    /// CIDR notation, e.g. "10.0.0.0/24"
    pub prefix: String,
    #[serde(default)]
    pub vlan: Option<VlanReference>,
    #[serde(default)]
    pub custom_fields: CustomFields,
}

impl DocumentedPrefix {
    pub fn new(id: i64, prefix: impl Into<String>) -> Self {
        Self {
            id,
            prefix: prefix.into(),
            vlan: None,
            custom_fields: CustomFields::new(),
        }
    }

    /// Bind the prefix to a VLAN
    pub fn bound_to(mut self, vlan: VlanReference) -> Self {
        self.vlan = Some(vlan);
        self
    }

    /// Set the `infra` custom field
    pub fn with_infra(mut self, infra: impl Into<String>) -> Self {
        self.custom_fields = self.custom_fields.with(INFRA_FIELD, infra.into());
        self
    }

    /// Infra classification, `""` when missing or not a string
    pub fn infra_class(&self) -> &str {
        self.custom_fields.infra()
    }
}
