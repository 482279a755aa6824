//! Command-line interface.

pub mod convert;
pub mod init;
pub mod output;
pub mod rotate;
pub mod serve;
pub mod unwrap;
pub mod wrap;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::constants::{DEFAULT_PORT, DEFAULT_TTL_DAYS, ENV_FILE, OUTPUT_FILE};

/// ghostenv - serve tokens, not secrets.
#[derive(Parser)]
#[command(
    name = "ghostenv",
    about = "Signed, expiring token bridge for .env secrets",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate the signing key if it does not exist yet
    Init,

    /// Replace the signing key, invalidating every issued token
    Rotate,

    /// Read a .env file and print its values as wrapped tokens
    Wrap {
        /// Path to the .env file
        #[arg(long, default_value = ENV_FILE)]
        env_file: String,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,

        /// Token lifetime in days
        #[arg(long, default_value_t = DEFAULT_TTL_DAYS)]
        ttl_days: i64,
    },

    /// Redeem a wrapped token for its plaintext value
    Unwrap {
        /// The token to unwrap
        token: String,
    },

    /// Rewrite a .env file with every value replaced by its wrapped token
    Convert {
        /// Input .env file path
        #[arg(short, long, default_value = ENV_FILE)]
        input: String,

        /// Output file path
        #[arg(short, long, default_value = OUTPUT_FILE)]
        output: String,

        /// Token lifetime in days
        #[arg(long, default_value_t = DEFAULT_TTL_DAYS)]
        ttl_days: i64,
    },

    /// Serve wrapped variables over HTTP (localhost only)
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Path to the .env file
        #[arg(long, default_value = ENV_FILE)]
        env_file: String,
    },
}

/// Output formats for `wrap`.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    /// JSON object of name → token
    Json,
    /// KEY=token lines
    Env,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    match command {
        Command::Init => init::execute(),
        Command::Rotate => rotate::execute(),
        Command::Wrap {
            env_file,
            format,
            ttl_days,
        } => wrap::execute(&env_file, format, ttl_days),
        Command::Unwrap { token } => unwrap::execute(&token),
        Command::Convert {
            input,
            output,
            ttl_days,
        } => convert::execute(&input, &output, ttl_days),
        Command::Serve { port, env_file } => serve::execute(port, &env_file),
    }
}
