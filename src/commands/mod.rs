//! Subcommand drivers. Each command owns one report run: load config,
//! authenticate, fetch, aggregate, print, log out.

pub mod check;
pub mod faults;
pub mod nodes;
pub mod report;

use colored::Colorize;

use crate::client::{ApicClient, ApicSession};
use crate::config::Config;

/// Build a client and log in. Authentication failure is terminal: one
/// plain message, exit 1, nothing further attempted.
async fn connect(config: &Config) -> anyhow::Result<ApicSession> {
    let client = ApicClient::new(&config.apic)?;
    match client
        .login(&config.apic.username, &config.apic.password)
        .await
    {
        Ok(session) => Ok(session),
        Err(err) => {
            eprintln!("{} {}", "Login failed:".red().bold(), err);
            std::process::exit(1);
        }
    }
}
