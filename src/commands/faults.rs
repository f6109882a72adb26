//! `fabricheck faults` — fault summary without the node table.

use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::connect;
use crate::config;
use crate::domain::faults;
use crate::domain::report::FaultSummaryReport;

pub fn run(config_path: &Path, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(config_path, format))
}

async fn run_async(config_path: &Path, format: &str) -> Result<()> {
    let cfg = config::load(config_path)?;
    let session = connect(&cfg).await?;

    let fault_records = session.faults().await.context("fetching fault records")?;
    let report = FaultSummaryReport {
        total_faults: fault_records.len(),
        summary: faults::summarize(&fault_records),
        notable_faults: faults::notable(&fault_records)
            .into_iter()
            .cloned()
            .collect(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!("{}", report.render()),
    }

    session.logout().await;
    Ok(())
}
