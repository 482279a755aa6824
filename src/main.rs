//! ghostenv - serve tokens, not secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ghostenv::cli::output;
use ghostenv::cli::{execute, Cli};
use ghostenv::error::Error;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("GHOSTENV_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ghostenv=debug")
        } else {
            EnvFilter::new("ghostenv=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::EnvFileNotFound(_) => Some("create a .env file or pass --env-file"),
            Error::InvalidToken => {
                Some("the signing key may have been rotated; re-issue with: ghostenv convert")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
