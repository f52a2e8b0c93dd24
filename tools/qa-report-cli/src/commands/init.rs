//! `init` subcommand: persist the default configuration to its standard
//! location.

use qa_common::AppConfig;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    config.save()?;
    println!("Wrote default configuration.");
    Ok(())
}
