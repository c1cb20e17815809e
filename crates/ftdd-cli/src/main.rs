//! Fused TDD Demo - Main Entry Point

use ftdd_cli::{init_logging, run, DemoConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::load()?;
    init_logging(&config.log_level, config.json_logs)?;

    info!("=== fTDD demo v{} ===", env!("CARGO_PKG_VERSION"));

    let report = run(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
