// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subset filter and drift detectors
//!
//! All functions are pure. Outer iteration is over segments in input order,
//! inner iteration over VLANs or prefixes in input order, so results are
//! deterministic. Duplicate tags produce one match per candidate; nothing is
//! deduplicated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{normalize, DocumentedPrefix, DocumentedVlan, NamingMarkers, OverlaySegment};

/// Segment whose NetBox VLAN was renamed to the new generation while NAM
/// still carries the old name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovedSegment {
    pub segment: OverlaySegment,
    pub vlan: DocumentedVlan,
}

/// Prefix bound to a segment of this group but classified under another infra
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrongPrefix {
    pub segment: OverlaySegment,
    pub prefix: DocumentedPrefix,
}

/// Segments whose primary group is exactly `group_name` (case-sensitive)
pub fn group_subset<'a>(
    segments: &'a [OverlaySegment],
    group_name: &str,
) -> Vec<&'a OverlaySegment> {
    segments
        .iter()
        .filter(|segment| segment.primary_group() == group_name)
        .collect()
}

/// VLANs whose `infra` custom field is exactly `infra`
pub fn infra_subset<'a>(vlans: &'a [DocumentedVlan], infra: &str) -> Vec<&'a DocumentedVlan> {
    vlans
        .iter()
        .filter(|vlan| vlan.infra_class() == infra)
        .collect()
}

/// Moved-but-not-relabeled pairs
pub fn moved_segments(
    segments: &[&OverlaySegment],
    infra_vlans: &[&DocumentedVlan],
    markers: &NamingMarkers,
) -> Vec<MovedSegment> {
    let mut moved = Vec::new();
    for segment in segments {
        let segment_name = normalize(&segment.name);
        for vlan in infra_vlans {
            if vlan.name.contains(markers.new.as_str())
                && vlan.tag == segment.id
                && segment_name == normalize(&markers.to_old_generation(&vlan.name))
            {
                moved.push(MovedSegment {
                    segment: (*segment).clone(),
                    vlan: (*vlan).clone(),
                });
            }
        }
    }
    moved
}

/// Segments with no VLAN of the same tag under the target infra
pub fn misconfigured_segments(
    segments: &[&OverlaySegment],
    infra_vlans: &[&DocumentedVlan],
) -> Vec<OverlaySegment> {
    segments
        .iter()
        .filter(|segment| !infra_vlans.iter().any(|vlan| vlan.tag == segment.id))
        .map(|segment| (*segment).clone())
        .collect()
}

/// Segments tagged under the right infra whose name drifted
///
/// `misconfigured` is excluded first, so a segment never lands in both
/// classes. A segment passes when any same-tag VLAN carries an equal
/// normalized name; everything else that reaches the loop is reported.
pub fn name_mismatches(
    segments: &[&OverlaySegment],
    infra_vlans: &[&DocumentedVlan],
    misconfigured: &[OverlaySegment],
) -> Vec<OverlaySegment> {
    let excluded: HashSet<i64> = misconfigured.iter().map(|segment| segment.id).collect();

    segments
        .iter()
        .filter(|segment| !excluded.contains(&segment.id))
        .filter(|segment| {
            let name = normalize(&segment.name);
            !infra_vlans
                .iter()
                .any(|vlan| vlan.tag == segment.id && normalize(&vlan.name) == name)
        })
        .map(|segment| (*segment).clone())
        .collect()
}

/// Prefixes bound to a group segment but carrying a different infra
///
/// Runs over every prefix, not only the infra subset. The reference name is
/// compared raw against the segment name, unlike the other rules.
pub fn wrong_prefixes(
    segments: &[&OverlaySegment],
    prefixes: &[DocumentedPrefix],
    infra: &str,
) -> Vec<WrongPrefix> {
    let mut wrong = Vec::new();
    for segment in segments {
        for prefix in prefixes {
            let Some(vlan_ref) = &prefix.vlan else {
                continue;
            };
            if vlan_ref.tag == segment.id
                && vlan_ref.name == segment.name
                && prefix.infra_class() != infra
            {
                wrong.push(WrongPrefix {
                    segment: (*segment).clone(),
                    prefix: prefix.clone(),
                });
            }
        }
    }
    wrong
}
