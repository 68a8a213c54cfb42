use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mosaic::cli;
use mosaic::error::AppError;
use mosaic::models::RunOutcome;
use mosaic::services::MosaicService;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = match cli::parse_args(std::env::args_os()) {
        Ok(config) => config,
        // --help and --version are reported through clap::Error as well
        Err(e) if !e.use_stderr() => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            let error = AppError::from(e);
            eprint!("{error}");
            return Ok(ExitCode::from(error.exit_code()));
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mosaic=info,block_mosaic=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let service = MosaicService::new(config);

    let cancel = service.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping workers");
            cancel.cancel();
        }
    });

    match service.run().await {
        Ok(outcome) => {
            match outcome {
                RunOutcome::Completed { .. } => println!("{}", outcome.message()),
                _ => eprintln!("{}", outcome.message()),
            }
            Ok(ExitCode::from(outcome.exit_code()))
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
