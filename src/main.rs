mod cli;
mod client;
mod config;
mod error;
mod feed;
mod flatten;
mod gui;
mod store;
mod tables;

use anyhow::Result;
use clap::Parser;
use cli::{command, Cli, Commands};
use config::{log_level, Settings};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = Settings::from_cli(&cli);

    match &cli.command {
        Commands::Areas {} => {
            let count = command::areas(&settings).await?;
            println!("{} areas saved to `{}`", count, settings.db_path.display());
        }
        Commands::Forecasts { offices } => {
            let summary = command::forecasts(&settings, offices).await?;
            print!("{}", summary);
        }
        Commands::Sync {} => {
            let summary = command::sync(&settings).await?;
            print!("{}", summary);
        }
        Commands::Show { office, area } => {
            let entries = command::show(&settings, office, area.as_deref()).await?;
            if entries.is_empty() {
                println!("No forecast entries found");
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        Commands::Weekly { office, code } => {
            let outlook = command::weekly(&settings, office, code).await?;
            print!("{}", outlook);
        }
        Commands::View { font } => command::view(&settings, font.as_deref())?,
    }

    Ok(())
}
