//! `rotate` command: replace the signing key.

use crate::cli::output;
use crate::core::keystore::KeyStore;
use crate::error::Result;

pub fn execute() -> Result<()> {
    let store = KeyStore::open_default();
    store.rotate()?;

    output::success("new signing key generated");
    output::warn("all previously issued tokens are now invalid");
    output::hint("re-run ghostenv convert to issue fresh tokens");

    Ok(())
}
