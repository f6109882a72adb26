//! Report rendering: the fixed-format text report and the serializable
//! payloads behind `--format json`. Pure formatting — every value printed
//! here was computed upstream.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::faults::SeveritySummary;
use crate::domain::types::{FaultRecord, NodeStatusRow};

const BANNER: &str = "==================================================";
const RULE: &str = "--------------------------------------------------";

/// Fault descriptions are cut at this many characters for display.
const DESCRIPTION_CHARS: usize = 70;

/// The complete report payload: fault summary plus reconciled node status.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub generated_at: DateTime<Utc>,
    pub total_faults: usize,
    pub summary: SeveritySummary,
    pub notable_faults: Vec<FaultRecord>,
    pub nodes: Vec<NodeStatusRow>,
}

impl HealthReport {
    pub fn render(&self) -> String {
        format!(
            "{}\n\n{}\n\nGenerated: {}",
            fault_section(&self.summary, self.total_faults, &self.notable_faults),
            node_section(&self.nodes),
            self.generated_at.to_rfc3339(),
        )
    }
}

/// Fault summary payload for `fabricheck faults`.
#[derive(Debug, Serialize)]
pub struct FaultSummaryReport {
    pub total_faults: usize,
    pub summary: SeveritySummary,
    pub notable_faults: Vec<FaultRecord>,
}

impl FaultSummaryReport {
    pub fn render(&self) -> String {
        fault_section(&self.summary, self.total_faults, &self.notable_faults)
    }
}

/// Node status payload for `fabricheck nodes`.
#[derive(Debug, Serialize)]
pub struct NodeStatusReport {
    pub nodes: Vec<NodeStatusRow>,
}

impl NodeStatusReport {
    pub fn render(&self) -> String {
        node_section(&self.nodes)
    }
}

/// Banner, total, the four fixed tier lines, and the notable-fault detail
/// section (only when any notable fault exists).
pub fn fault_section(
    summary: &SeveritySummary,
    total_faults: usize,
    notable: &[FaultRecord],
) -> String {
    let mut lines = vec![
        BANNER.to_string(),
        "ACI Health Check Report".to_string(),
        BANNER.to_string(),
        String::new(),
        format!("Total Faults: {total_faults}"),
        format!("  - Critical: {}", summary.critical),
        format!("  - Major: {}", summary.major),
        format!("  - Minor: {}", summary.minor),
        format!("  - Warning: {}", summary.warning),
    ];

    if !notable.is_empty() {
        lines.push(String::new());
        lines.push("[Critical & Major Faults]".to_string());
        lines.push(RULE.to_string());
        for fault in notable {
            lines.push(format!(
                "[{}] {}",
                fault.severity.label().to_uppercase(),
                truncate(&fault.description, DESCRIPTION_CHARS),
            ));
        }
    }

    lines.join("\n")
}

/// Fixed-width node table: name, role, unified status.
pub fn node_section(nodes: &[NodeStatusRow]) -> String {
    let mut lines = vec!["[Node Status]".to_string(), RULE.to_string()];
    for row in nodes {
        lines.push(format!("{:<15} | {:<10} | {}", row.name, row.role, row.status));
    }
    lines.join("\n")
}

/// Cut at a character boundary, not a byte offset.
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::faults::summarize;
    use crate::domain::types::{NodeRole, Severity, UnifiedStatus};

    fn fault(severity: &str, description: &str) -> FaultRecord {
        FaultRecord {
            severity: Severity::from(severity.to_string()),
            description: description.to_string(),
        }
    }

    #[test]
    fn fault_section_matches_expected_layout() {
        let faults = vec![fault("critical", "link down"), fault("minor", "x")];
        let summary = summarize(&faults);
        let notable = vec![faults[0].clone()];

        let text = fault_section(&summary, faults.len(), &notable);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], "ACI Health Check Report");
        assert_eq!(lines[2], BANNER);
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Total Faults: 2");
        assert_eq!(lines[5], "  - Critical: 1");
        assert_eq!(lines[6], "  - Major: 0");
        assert_eq!(lines[7], "  - Minor: 1");
        assert_eq!(lines[8], "  - Warning: 0");
        assert_eq!(lines[10], "[Critical & Major Faults]");
        assert_eq!(lines[11], RULE);
        assert_eq!(lines[12], "[CRITICAL] link down");
    }

    #[test]
    fn banner_and_rule_are_fifty_chars() {
        assert_eq!(BANNER.len(), 50);
        assert_eq!(RULE.len(), 50);
    }

    #[test]
    fn notable_detail_section_is_omitted_when_empty() {
        let faults = vec![fault("minor", "x")];
        let text = fault_section(&summarize(&faults), faults.len(), &[]);
        assert!(!text.contains("[Critical & Major Faults]"));
    }

    #[test]
    fn long_descriptions_are_cut_at_seventy_chars() {
        let description = "d".repeat(90);
        let notable = vec![fault("major", &description)];
        let text = fault_section(&summarize(&notable), 1, &notable);
        let detail = text.lines().last().unwrap();
        assert_eq!(detail, format!("[MAJOR] {}", "d".repeat(70)));
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        let description = "장애".repeat(50);
        assert_eq!(truncate(&description, 70).chars().count(), 70);
    }

    #[test]
    fn node_section_uses_fixed_width_columns() {
        let nodes = vec![
            NodeStatusRow {
                name: "leaf1".to_string(),
                role: NodeRole::Leaf,
                status: UnifiedStatus::Ok,
            },
            NodeStatusRow {
                name: "ctrl1".to_string(),
                role: NodeRole::Controller,
                status: UnifiedStatus::Unknown,
            },
        ];
        let text = node_section(&nodes);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[Node Status]");
        assert_eq!(lines[1], RULE);
        assert_eq!(lines[2], "leaf1           | leaf       | OK");
        assert_eq!(lines[3], "ctrl1           | controller | UNKNOWN");
    }

    #[test]
    fn full_report_orders_sections_and_stamps_generation_time() {
        let report = HealthReport {
            generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            total_faults: 0,
            summary: SeveritySummary::default(),
            notable_faults: Vec::new(),
            nodes: Vec::new(),
        };
        let text = report.render();
        let faults_at = text.find("Total Faults").unwrap();
        let nodes_at = text.find("[Node Status]").unwrap();
        assert!(faults_at < nodes_at);
        assert!(text.ends_with("Generated: 2024-06-01T12:00:00+00:00"));
    }

    #[test]
    fn json_payload_exposes_display_ready_statuses() {
        let report = NodeStatusReport {
            nodes: vec![NodeStatusRow {
                name: "apic1".to_string(),
                role: NodeRole::Controller,
                status: UnifiedStatus::Health("DEGRADED".to_string()),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["nodes"][0]["status"], "DEGRADED");
        assert_eq!(json["nodes"][0]["role"], "controller");
    }
}
