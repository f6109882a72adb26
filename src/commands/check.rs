//! `fabricheck check` — verify controller reachability and credentials.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::client::ApicClient;
use crate::config;

pub fn run(config_path: &Path) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(config_path))
}

async fn run_async(config_path: &Path) -> Result<()> {
    let cfg = config::load(config_path)?;
    let client = ApicClient::new(&cfg.apic)?;

    println!("{}", "fabricheck check".bold());
    println!("  apic: {}", cfg.apic.host);

    match client
        .login(&cfg.apic.username, &cfg.apic.password)
        .await
    {
        Ok(session) => {
            println!("  auth: {}", "ok".green());
            session.logout().await;
            Ok(())
        }
        Err(err) => {
            println!("  auth: {}", "failed".red());
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
