//! Node status reconciliation across the two APIC status vocabularies.
//!
//! Spines and leaves report a fabric registration *state*; controllers
//! report a *health* string through a separate side table keyed by node
//! name. The two vocabularies never mix: a controller missing from the
//! side table is UNKNOWN, a switch that is not `active` is DOWN.

use std::collections::HashMap;

use crate::domain::types::{FabricNode, NodeRole, NodeStatusRow, UnifiedStatus};

/// Produce one unified status row per input node, in input order.
pub fn reconcile(
    nodes: &[FabricNode],
    controller_health: &HashMap<String, String>,
) -> Vec<NodeStatusRow> {
    nodes
        .iter()
        .map(|node| {
            let status = match node.role {
                NodeRole::Controller => controller_status(
                    controller_health.get(&node.name).map(String::as_str),
                ),
                _ => fabric_status(node.fabric_state.as_deref()),
            };
            NodeStatusRow {
                name: node.name.clone(),
                role: node.role.clone(),
                status,
            }
        })
        .collect()
}

/// Health vocabulary, controllers only. `fully-fit` is the sole healthy
/// value; any other health string passes through uppercased rather than
/// being mapped to DOWN.
fn controller_status(health: Option<&str>) -> UnifiedStatus {
    match health {
        None => UnifiedStatus::Unknown,
        Some("fully-fit") => UnifiedStatus::Ok,
        Some(other) => UnifiedStatus::Health(other.to_uppercase()),
    }
}

/// State vocabulary, everyone else. A missing fabric state is simply not
/// `active`, so it resolves to DOWN, never to an error.
fn fabric_status(state: Option<&str>) -> UnifiedStatus {
    if state == Some("active") {
        UnifiedStatus::Ok
    } else {
        UnifiedStatus::Down
    }
}
