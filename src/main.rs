use std::process::ExitCode;

use clap::Parser;
use tfschema::cli::{run, Cli};
use tfschema::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    tracing::info!(command = ?cli.command, "Starting tfschema");

    match run(cli).await {
        Ok(out) => {
            println!("{}", out.trim_end_matches('\n'));
            ExitCode::SUCCESS
        },
        Err(e) => {
            if e.is_user_error() {
                tracing::debug!(error = ?e, "Command rejected");
            } else {
                tracing::warn!(error = ?e, "Command failed");
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
