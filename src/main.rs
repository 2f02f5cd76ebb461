use clap::Parser;

use inventory_api::cli::{self, Cli};
use inventory_api::logger;
use inventory_api::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    logger::init(&settings.logger)?;

    cli::execute_command(&cli, settings.clone()).await?;

    if cli::wants_server(&cli) {
        Server::new(settings).run().await?;
    }

    Ok(())
}
