//! `info` subcommand: print the resolved default configuration.

use qa_common::AppConfig;

pub fn run(config: &AppConfig) {
    println!("Default manifest path: {}", config.report.manifest_path.display());
    println!("Default gates path:    {}", config.report.gates_path.display());
    println!("Default sample rate:   {} Hz", config.report.sample_rate_hz);
    println!("Log level:             {}", config.logging.level);
}
