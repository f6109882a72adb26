//! Fault aggregation: per-tier severity counts and the notable-fault view.

use serde::Serialize;

use crate::domain::types::{FaultRecord, Severity};

/// Per-tier fault counts. All four known tiers are always present; faults
/// with a severity outside them are not attributed to any tier and only
/// show up in the separately-carried grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeveritySummary {
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
    pub warning: usize,
}

impl SeveritySummary {
    /// Sum of the four tier counters. At most the length of the input
    /// fault list; strictly less when unknown severities were present.
    pub fn tier_total(&self) -> usize {
        self.critical + self.major + self.minor + self.warning
    }
}

/// Count faults per severity tier in a single pass.
pub fn summarize(faults: &[FaultRecord]) -> SeveritySummary {
    let mut summary = SeveritySummary::default();
    for fault in faults {
        match fault.severity {
            Severity::Critical => summary.critical += 1,
            Severity::Major => summary.major += 1,
            Severity::Minor => summary.minor += 1,
            Severity::Warning => summary.warning += 1,
            Severity::Other(_) => {}
        }
    }
    summary
}

/// Critical and major faults, in their original order. Descriptions are
/// left untouched; truncation and label uppercasing happen at render time.
pub fn notable(faults: &[FaultRecord]) -> Vec<&FaultRecord> {
    faults.iter().filter(|f| f.severity.is_notable()).collect()
}
