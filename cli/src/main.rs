use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    commands::{CommandExec, list::ListCommand},
    config::Config,
};

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
/// Lists the contents of publicly readable S3 style buckets.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct CLI {
    #[command(flatten)]
    command: ListCommand,
}
fn main() -> anyhow::Result<()> {
    let cli = CLI::parse();
    init_logging();
    let config = config::load_config()?;
    let app_instance = AppInstance { config };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(cli.command.exec(app_instance))?;
    Ok(())
}
/// Logs go to stderr so stdout only carries the table.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(writer)
        .with(filter)
        .init();
}

pub struct AppInstance {
    pub config: Config,
}
