// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Reconciliation Engine
//!
//! Inventories are drawn from a deliberately small vocabulary of tags, names
//! and groups so that matches, duplicates and near-misses are frequent.

use netbox_infra_check::checker::{check, rules, CheckContext, NO_DRIFT_LINE};
use netbox_infra_check::domain::{
    normalize, DocumentedPrefix, DocumentedVlan, GroupRef, NamingMarkers, OverlaySegment,
    VlanReference,
};
use proptest::prelude::*;

const GROUP: &str = "DC1";
const INFRA: &str = "prod";

// ============================================================================
// Property Test Strategies
// ============================================================================

fn tag() -> impl Strategy<Value = i64> {
    100i64..106
}

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("srv-a".to_string()),
        Just("SRV-A ".to_string()),
        Just("srv-b".to_string()),
        Just("srv-a-nam-01".to_string()),
        Just("srv-a-nam-03".to_string()),
        Just("srv-b-nam-03".to_string()),
    ]
}

fn infra() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![Just(Some("prod")), Just(Some("dev")), Just(None)]
}

fn segment() -> impl Strategy<Value = OverlaySegment> {
    (
        tag(),
        name(),
        prop::collection::vec(prop_oneof![Just("DC1"), Just("DC2"), Just("dc1")], 0..3),
    )
        .prop_map(|(id, name, groups)| {
            groups
                .into_iter()
                .enumerate()
                .fold(OverlaySegment::new(id, name), |segment, (i, group)| {
                    segment.in_group(GroupRef::new(i as i64, group))
                })
        })
}

fn vlan() -> impl Strategy<Value = DocumentedVlan> {
    (0i64..1000, tag(), name(), infra()).prop_map(|(id, tag, name, infra)| {
        let vlan = DocumentedVlan::new(id, tag, name);
        match infra {
            Some(infra) => vlan.with_infra(infra),
            None => vlan,
        }
    })
}

fn prefix() -> impl Strategy<Value = DocumentedPrefix> {
    (
        0i64..1000,
        prop::option::of((tag(), name())),
        infra(),
    )
        .prop_map(|(id, vlan_ref, infra)| {
            let mut prefix = DocumentedPrefix::new(id, format!("10.{}.0.0/24", id % 256));
            if let Some((tag, name)) = vlan_ref {
                prefix = prefix.bound_to(VlanReference::new(tag, tag, name));
            }
            match infra {
                Some(infra) => prefix.with_infra(infra),
                None => prefix,
            }
        })
}

type Inventory = (Vec<OverlaySegment>, Vec<DocumentedVlan>, Vec<DocumentedPrefix>);

fn inventory() -> impl Strategy<Value = Inventory> {
    (
        prop::collection::vec(segment(), 0..12),
        prop::collection::vec(vlan(), 0..12),
        prop::collection::vec(prefix(), 0..8),
    )
}

fn context() -> CheckContext {
    CheckContext::new("https://netbox.example", NamingMarkers::default())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Identical inputs give identical results and text
    #[test]
    fn prop_check_is_deterministic((segments, vlans, prefixes) in inventory()) {
        let first = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());
        let second = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());

        prop_assert_eq!(first, second, "Same inventories must produce same result");
    }

    /// Property: No segment is both misconfigured and a name mismatch
    #[test]
    fn prop_misconfigured_and_mismatch_are_disjoint((segments, vlans, prefixes) in inventory()) {
        let result = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());

        for mismatch in &result.name_mismatches {
            prop_assert!(
                !result.misconfigured.iter().any(|m| m.id == mismatch.id),
                "Segment {} reported in both classes",
                mismatch.id
            );
        }
    }

    /// Property: has_drift ⇔ some list non-empty ⇔ output is not the no-drift line
    #[test]
    fn prop_empty_drift_invariant((segments, vlans, prefixes) in inventory()) {
        let result = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());

        let any_items = !result.moved.is_empty()
            || !result.misconfigured.is_empty()
            || !result.name_mismatches.is_empty()
            || !result.wrong_prefixes.is_empty();

        prop_assert_eq!(result.has_drift(), any_items);
        prop_assert_eq!(result.output == NO_DRIFT_LINE, !any_items);
    }

    /// Property: Every in-group segment is either misconfigured or has a tag match
    #[test]
    fn prop_misconfigured_is_exactly_untagged((segments, vlans, prefixes) in inventory()) {
        let result = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());
        let infra_vlans = rules::infra_subset(&vlans, INFRA);

        for segment in rules::group_subset(&segments, GROUP) {
            let tagged = infra_vlans.iter().any(|v| v.tag == segment.id);
            let flagged = result.misconfigured.iter().any(|m| m == segment);
            prop_assert_eq!(tagged, !flagged);
        }
    }

    /// Property: Reported items all belong to the checked group
    #[test]
    fn prop_results_scoped_to_group((segments, vlans, prefixes) in inventory()) {
        let result = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());

        let reported = result
            .misconfigured
            .iter()
            .chain(result.name_mismatches.iter())
            .chain(result.moved.iter().map(|m| &m.segment))
            .chain(result.wrong_prefixes.iter().map(|w| &w.segment));
        for segment in reported {
            prop_assert_eq!(segment.primary_group(), GROUP);
        }
    }

    /// Property: Moved pairs use VLANs of the checked infra and the same tag
    #[test]
    fn prop_moved_pairs_are_consistent((segments, vlans, prefixes) in inventory()) {
        let result = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());

        for pair in &result.moved {
            prop_assert_eq!(pair.vlan.infra_class(), INFRA);
            prop_assert_eq!(pair.vlan.tag, pair.segment.id);
            prop_assert!(pair.vlan.name.contains("nam-03"));
            prop_assert_eq!(
                normalize(&pair.segment.name),
                normalize(&pair.vlan.name.replace("nam-03", "nam-01"))
            );
        }
    }

    /// Property: Wrong prefixes never carry the target infra
    #[test]
    fn prop_wrong_prefixes_have_other_infra((segments, vlans, prefixes) in inventory()) {
        let result = check(GROUP, INFRA, &segments, &vlans, &prefixes, &context());

        for wrong in &result.wrong_prefixes {
            prop_assert_ne!(wrong.prefix.infra_class(), INFRA);
            let vlan_ref = wrong.prefix.vlan.as_ref();
            prop_assert!(vlan_ref.is_some());
            prop_assert_eq!(&vlan_ref.unwrap().name, &wrong.segment.name);
        }
    }
}
