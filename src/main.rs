use clap::Parser;
use sleeper_site::cli::Cli;
use sleeper_site::error::AppError;
use sleeper_site::{commands, logging};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let (log_file_path, _guard) = logging::setup_logging(&cli).await?;
    info!("Logs are being written to: {log_file_path}");

    let result = commands::run(cli).await;
    if let Err(e) = &result {
        error!("{e}");
    }
    result
}
