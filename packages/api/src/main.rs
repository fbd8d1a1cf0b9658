use std::process::ExitCode;

use clap::Parser;
use proxyfetch::cli::{self, Args};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let response = match cli::run(&args).await {
        Ok(response) => response,
        Err(err) => {
            let code = cli::exit_code(&err);
            eprintln!("error: {:#}", anyhow::Error::new(err));
            return ExitCode::from(code);
        }
    };

    eprintln!("code: {}", response.status_code());
    tracing::debug!(timings = ?response.timings(), "request complete");

    let mut stdout = tokio::io::stdout();
    let written = async {
        if args.include {
            stdout.write_all(cli::format_head(&response).as_bytes()).await?;
        }
        stdout.write_all(response.body()).await?;
        stdout.flush().await
    }
    .await;

    if let Err(err) = written {
        eprintln!("error: writing response: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
