use anyhow::Result;
use clap::Parser;
use tracing::debug;

use tax_assistant::app;
use tax_assistant::cli::{Cli, Command};
use tax_assistant::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let registry = app::build_registry();
    debug!(backends = ?registry.available_backends(), "advisory backends registered");

    let output = match &cli.command {
        Command::Calculate(args) => app::run_calculate(&registry, args).await?,
        Command::Ask(args) => app::run_ask(&registry, args).await,
    };

    println!("{}", output.trim_end());

    Ok(())
}
