use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use room_meta_sync::config::{
    DEFAULT_ENV_FILE, DEFAULT_OUTPUT_PATH, load_proxy_config, load_sync_config,
};
use room_meta_sync::core::error::AppError;
use room_meta_sync::features::room_meta::handle_sync;
use room_meta_sync::server::run_proxy;

#[derive(Debug, Parser)]
#[command(name = "room-meta-sync", version, about = "Sync LibCal room capacities to a JSON file")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    sync: SyncArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch room capacities and write them to the output file (default)
    Sync(SyncArgs),
    /// Run the development proxy for `/api` and `/token-refresh`
    Proxy {
        #[arg(long, default_value = DEFAULT_ENV_FILE)]
        env_file: PathBuf,
        /// Overrides PROXY_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, clap::Args)]
struct SyncArgs {
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::Sync(args)) => sync(args).await,
        Some(Command::Proxy { env_file, port }) => proxy(env_file, port).await,
        None => sync(cli.sync).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn sync(args: SyncArgs) -> Result<(), AppError> {
    let config = load_sync_config(&args.env_file, args.output)?;
    tracing::info!(
        rooms = config.room_item_ids.len(),
        base_url = %config.base_url,
        "syncing room capacities"
    );
    handle_sync(&config).await?;
    Ok(())
}

async fn proxy(env_file: PathBuf, port: Option<u16>) -> Result<(), AppError> {
    let config = load_proxy_config(&env_file, port)?;
    run_proxy(config).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
