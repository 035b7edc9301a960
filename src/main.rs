use clap::Parser;

use fiscalizo_rs::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (settings, environment) = load_and_merge_config(&cli).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    init_logger_from_settings(&settings)?;

    if let Err(e) = execute_command(&cli, settings, environment).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e);
    }
    Ok(())
}
