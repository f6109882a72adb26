//! `fabricheck nodes` — reconciled node status without the fault summary.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::connect;
use crate::config;
use crate::domain::reconcile;
use crate::domain::report::NodeStatusReport;

pub fn run(config_path: &Path, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(config_path, format))
}

async fn run_async(config_path: &Path, format: &str) -> Result<()> {
    let cfg = config::load(config_path)?;
    let session = connect(&cfg).await?;

    let nodes = session.fabric_nodes().await.context("fetching fabric nodes")?;
    let controller_health: HashMap<String, String> = session
        .controller_health()
        .await
        .context("fetching controller health")?
        .into_iter()
        .map(|entry| (entry.node_name, entry.health))
        .collect();

    let report = NodeStatusReport {
        nodes: reconcile::reconcile(&nodes, &controller_health),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!("{}", report.render()),
    }

    session.logout().await;
    Ok(())
}
