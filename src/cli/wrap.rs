//! `wrap` command: read a .env file and print wrapped values.

use std::path::PathBuf;

use chrono::Duration;

use crate::cli::Format;
use crate::core::envfile::EnvFile;
use crate::core::keystore::KeyStore;
use crate::core::token;
use crate::error::{Error, Result};

pub fn execute(env_file: &str, format: Format, ttl_days: i64) -> Result<()> {
    let key = KeyStore::open_default().ensure()?;
    let vars = EnvFile::load(env_file)?.vars();

    if vars.is_empty() {
        return Err(Error::EmptyEnvFile(PathBuf::from(env_file)));
    }

    let wrapped = token::wrap_all_with_ttl(&vars, &key, Duration::days(ttl_days));

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&wrapped)?),
        Format::Env => {
            for (name, value) in &wrapped {
                println!("{}={}", name, value);
            }
        }
    }

    Ok(())
}
