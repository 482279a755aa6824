//! Constants used throughout ghostenv.
//!
//! Centralizes magic strings and configuration values.

/// Prefix identifying a wrapped token.
pub const TOKEN_PREFIX: &str = "gho_env.";

/// Minimum total length for a string to classify as a wrapped token.
///
/// Rejects degenerate strings that start with the prefix but are obviously
/// not real tokens. Kept for format compatibility; not a security control.
pub const MIN_TOKEN_LEN: usize = 20;

/// Default token lifetime in days.
pub const DEFAULT_TTL_DAYS: i64 = 365;

/// Configuration directory name under the user config root.
pub const CONFIG_DIR: &str = "ghostenv";

/// Signing key file name inside the configuration directory.
pub const KEY_FILE: &str = "signing_key.txt";

/// Default environment file (.env).
pub const ENV_FILE: &str = ".env";

/// Default output file for `convert` (ghost.env).
pub const OUTPUT_FILE: &str = "ghost.env";

/// Default port for `serve`.
pub const DEFAULT_PORT: u16 = 8787;
