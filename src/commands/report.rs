//! `fabricheck report` — the full fabric health report.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;

use crate::commands::connect;
use crate::config;
use crate::domain::faults;
use crate::domain::reconcile;
use crate::domain::report::HealthReport;

pub fn run(config_path: &Path, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(config_path, format))
}

async fn run_async(config_path: &Path, format: &str) -> Result<()> {
    let cfg = config::load(config_path)?;
    let session = connect(&cfg).await?;
    if format != "json" {
        println!("{}\n", "Login Success".green());
    }

    let fault_records = session.faults().await.context("fetching fault records")?;
    let nodes = session.fabric_nodes().await.context("fetching fabric nodes")?;
    let controller_health: HashMap<String, String> = session
        .controller_health()
        .await
        .context("fetching controller health")?
        .into_iter()
        .map(|entry| (entry.node_name, entry.health))
        .collect();

    let report = HealthReport {
        generated_at: Utc::now(),
        total_faults: fault_records.len(),
        summary: faults::summarize(&fault_records),
        notable_faults: faults::notable(&fault_records)
            .into_iter()
            .cloned()
            .collect(),
        nodes: reconcile::reconcile(&nodes, &controller_health),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!("{}", report.render()),
    }

    session.logout().await;
    Ok(())
}
