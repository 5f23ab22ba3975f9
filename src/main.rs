//! cfctl - Main entry point

use clap::Parser;
use log::info;

use cfctl::{commands, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting cfctl v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
