//! `convert` command: rewrite a .env file with wrapped values.
//!
//! Comments, blank lines, and quote styles are preserved; only pair values
//! change. Already-wrapped values are left alone, so converting a converted
//! file is a no-op apart from the file write.

use chrono::Duration;

use crate::cli::output;
use crate::core::envfile::EnvFile;
use crate::core::keystore::KeyStore;
use crate::core::token;
use crate::error::Result;

pub fn execute(input: &str, output_path: &str, ttl_days: i64) -> Result<()> {
    let key = KeyStore::open_default().ensure()?;
    let mut file = EnvFile::load(input)?;

    let ttl = Duration::days(ttl_days);
    let wrapped = file.map_values(|_, value| {
        if token::is_wrapped(value) {
            None
        } else {
            Some(token::wrap_with_ttl(value, &key, ttl))
        }
    });

    file.write(output_path)?;

    output::success(&format!("converted {} environment variable(s)", wrapped));
    output::success(&format!(
        "wrapped values written to {}",
        output::path(output_path)
    ));

    Ok(())
}
