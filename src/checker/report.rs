// Copyright (c) 2025 - Cowboy AI, Inc.
//! Plain-text drift report
//!
//! Sections appear in a fixed order (moved, misconfigured, name mismatch,
//! wrong prefix) and only when they have items. Titles are in Norwegian.

use super::{CheckContext, CheckResult};

/// Width of the `=` rule framing each section title
pub const RULE_WIDTH: usize = 75;

/// Entire report when nothing drifted
pub const NO_DRIFT_LINE: &str = "✓ Ingen avvik funnet!\n";

struct ReportWriter {
    buf: String,
}

impl ReportWriter {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn section<I>(&mut self, title: &str, items: I)
    where
        I: IntoIterator<Item = String>,
    {
        let rule = "=".repeat(RULE_WIDTH);
        self.line(&rule);
        self.line(title);
        self.line(&rule);
        for item in items {
            self.line(&format!("✗ {item}"));
        }
        self.buf.push('\n');
    }

    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Render a result into the report text
pub fn render(result: &CheckResult, context: &CheckContext) -> String {
    if !result.has_drift() {
        return NO_DRIFT_LINE.to_string();
    }

    let group = &result.group_name;
    let infra = &result.infra;
    let label = &context.target_label;
    let mut out = ReportWriter::new();

    if !result.moved.is_empty() {
        out.section(
            &format!(
                "Vxlans i '{group}' som ikke er oppdatert i NAM etter flytting til {} for '{infra}'",
                context.markers.new
            ),
            result.moved.iter().map(|m| {
                format!(
                    "[NAM VLAN ID {}] Netbox='{}' -> NAM='{}'",
                    m.segment.id, m.vlan.name, m.segment.name
                )
            }),
        );
    }

    if !result.misconfigured.is_empty() {
        out.section(
            &format!(
                "Vxlans i '{group}' som mangler eller ikke er registrert som '{infra}' i Netbox ({label})"
            ),
            result
                .misconfigured
                .iter()
                .map(|s| format!("[NAM VLAN ID {}]: -> {}", s.id, s.name)),
        );
    }

    if !result.name_mismatches.is_empty() {
        out.section(
            &format!("Vxlans i '{group}' som ikke har samme navn i Netbox ({label})"),
            result
                .name_mismatches
                .iter()
                .map(|s| format!("[NAM VLAN ID {}]: -> {}", s.id, s.name)),
        );
    }

    if !result.wrong_prefixes.is_empty() {
        out.section(
            &format!("Prefixes i '{group}' som har feil 'infra i Netbox ({label})'"),
            result.wrong_prefixes.iter().map(|w| {
                format!(
                    "[NAM VLAN ID {}] -> {} har 'infra' = '{}'",
                    w.segment.id,
                    w.prefix.prefix,
                    w.prefix.infra_class()
                )
            }),
        );
    }

    out.finish()
}
