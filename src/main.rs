use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use stock_screener::logging::init_logging;
use stock_screener::models::Config;
use stock_screener::scheduler::run_daily;
use stock_screener::screening::run_and_log;

#[derive(Parser)]
#[command(name = "stock-screener")]
#[command(about = "Daily Hong Kong stock return screener with Telegram delivery")]
struct Args {
    /// Run the screening once and exit instead of starting the daily scheduler
    #[arg(long)]
    run_once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_dir);

    if let Err(e) = std::fs::create_dir_all(&config.output_dir) {
        error!(
            "❌ Could not create output directory {}: {}",
            config.output_dir.display(),
            e
        );
    }

    if args.run_once {
        info!("Running stock screening once...");
        run_and_log(&config).await;
    } else {
        info!("Starting daily stock screening scheduler...");
        run_daily(Arc::new(config)).await;
    }

    ExitCode::SUCCESS
}
