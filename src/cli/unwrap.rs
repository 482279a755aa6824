//! `unwrap` command: redeem one token for its plaintext value.

use crate::core::keystore::KeyStore;
use crate::core::token;
use crate::error::{Error, Result};

pub fn execute(tok: &str) -> Result<()> {
    let key = KeyStore::open_default().ensure()?;

    match token::unwrap(tok, &key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(Error::InvalidToken),
    }
}
