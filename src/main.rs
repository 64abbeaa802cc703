use clap::Parser;

use trial_link::config::cli::CliArgs;
use trial_link::config::AppConfig;
use trial_link::utils::logger::init_logger;
use trial_link::web::{serve, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logger(args.verbose);

    let config = AppConfig::from_file(&args.config)?;
    config.validate_config()?;

    let state = AppState::from_config(config)?;
    serve(state).await?;

    Ok(())
}
