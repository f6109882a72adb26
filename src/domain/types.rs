//! Domain records shared by the aggregation, reconciliation, and rendering
//! stages. Everything here is immutable once retrieved and lives only for
//! the duration of one report run.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Faults ─────────────────────────────────────────────────

/// Fault severity as emitted by the controller.
///
/// The four known tiers are matched case-sensitively against the lowercase
/// literals the APIC uses; anything else lands in `Other` with the raw
/// string preserved. Unknown severities are tolerated everywhere and never
/// attributed to a tier count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Warning,
    Other(String),
}

impl Severity {
    /// The wire label: one of the four tier literals, or the raw string.
    pub fn label(&self) -> &str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Warning => "warning",
            Severity::Other(raw) => raw,
        }
    }

    /// Whether this fault belongs in the notable (critical & major) view.
    pub fn is_notable(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Major)
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "critical" => Severity::Critical,
            "major" => Severity::Major,
            "minor" => Severity::Minor,
            "warning" => Severity::Warning,
            _ => Severity::Other(raw),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One raised fault instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultRecord {
    pub severity: Severity,
    pub description: String,
}

// ── Nodes ──────────────────────────────────────────────────

/// Role of a fabric node. Controllers are status-checked through a
/// different vocabulary than spines and leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeRole {
    Controller,
    Spine,
    Leaf,
    Other(String),
}

impl From<String> for NodeRole {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "controller" => NodeRole::Controller,
            "spine" => NodeRole::Spine,
            "leaf" => NodeRole::Leaf,
            _ => NodeRole::Other(raw),
        }
    }
}

impl From<NodeRole> for String {
    fn from(role: NodeRole) -> Self {
        match role {
            NodeRole::Controller => "controller".to_string(),
            NodeRole::Spine => "spine".to_string(),
            NodeRole::Leaf => "leaf".to_string(),
            NodeRole::Other(raw) => raw,
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Controller => f.write_str("controller"),
            NodeRole::Spine => f.write_str("spine"),
            NodeRole::Leaf => f.write_str("leaf"),
            NodeRole::Other(raw) => f.write_str(raw),
        }
    }
}

/// One registered fabric node. `name` is the join key for the controller
/// health side table. `fabric_state` is only meaningful for switches; the
/// APIC may omit it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricNode {
    pub name: String,
    pub role: NodeRole,
    pub fabric_state: Option<String>,
}

/// Controller health side table row, keyed by node *name*.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerHealthEntry {
    pub node_name: String,
    pub health: String,
}

// ── Unified status ─────────────────────────────────────────

/// The reconciled, display-ready status of one node.
///
/// `Unknown` only ever arises for controllers missing from the health side
/// table; switches that are not `active` are `Down`. A controller health
/// string other than `fully-fit` passes through uppercased in `Health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum UnifiedStatus {
    Ok,
    Down,
    Unknown,
    Health(String),
}

impl From<UnifiedStatus> for String {
    fn from(status: UnifiedStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for UnifiedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifiedStatus::Ok => f.write_str("OK"),
            UnifiedStatus::Down => f.write_str("DOWN"),
            UnifiedStatus::Unknown => f.write_str("UNKNOWN"),
            UnifiedStatus::Health(raw) => f.write_str(raw),
        }
    }
}

/// One reconciled row of the node status table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStatusRow {
    pub name: String,
    pub role: NodeRole,
    pub status: UnifiedStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_known_tiers() {
        assert_eq!(Severity::from("critical".to_string()), Severity::Critical);
        assert_eq!(Severity::from("major".to_string()), Severity::Major);
        assert_eq!(Severity::from("minor".to_string()), Severity::Minor);
        assert_eq!(Severity::from("warning".to_string()), Severity::Warning);
    }

    #[test]
    fn severity_match_is_case_sensitive() {
        assert_eq!(
            Severity::from("Critical".to_string()),
            Severity::Other("Critical".to_string())
        );
    }

    #[test]
    fn unknown_severity_keeps_raw_label() {
        let sev = Severity::from("cleared".to_string());
        assert_eq!(sev, Severity::Other("cleared".to_string()));
        assert_eq!(sev.label(), "cleared");
        assert!(!sev.is_notable());
    }

    #[test]
    fn severity_serializes_to_wire_label() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let json = serde_json::to_string(&Severity::Other("cleared".into())).unwrap();
        assert_eq!(json, "\"cleared\"");
    }

    #[test]
    fn role_parses_and_displays() {
        assert_eq!(NodeRole::from("controller".to_string()), NodeRole::Controller);
        assert_eq!(NodeRole::from("leaf".to_string()), NodeRole::Leaf);
        let other = NodeRole::from("remote-leaf-wan".to_string());
        assert_eq!(other.to_string(), "remote-leaf-wan");
    }

    #[test]
    fn unified_status_display_forms() {
        assert_eq!(UnifiedStatus::Ok.to_string(), "OK");
        assert_eq!(UnifiedStatus::Down.to_string(), "DOWN");
        assert_eq!(UnifiedStatus::Unknown.to_string(), "UNKNOWN");
        assert_eq!(
            UnifiedStatus::Health("DEGRADED".to_string()).to_string(),
            "DEGRADED"
        );
    }

    #[test]
    fn unified_status_serializes_as_display_string() {
        let json = serde_json::to_string(&UnifiedStatus::Unknown).unwrap();
        assert_eq!(json, "\"UNKNOWN\"");
    }
}
