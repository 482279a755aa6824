//! `init` command: ensure the signing key exists.

use crate::cli::output;
use crate::core::keystore::KeyStore;
use crate::error::Result;

pub fn execute() -> Result<()> {
    let store = KeyStore::open_default();
    let existed = store.exists();
    store.ensure()?;

    let dir = store.dir().display().to_string();
    if existed {
        output::success(&format!("signing key already present in {}", output::path(&dir)));
    } else {
        output::success(&format!("signing key generated and saved to {}", output::path(&dir)));
    }
    output::success("ghostenv is ready to use");
    println!();
    println!("Next: {} to wrap a .env file", output::cmd("ghostenv convert"));

    Ok(())
}
