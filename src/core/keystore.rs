//! Signing key generation and storage.
//!
//! Manages the single long-lived HMAC secret, persisted as one line of text
//! at `<config-dir>/ghostenv/signing_key.txt` with 0600 permissions on Unix.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::constants::{CONFIG_DIR, KEY_FILE};
use crate::error::{Error, Result};

/// Raw entropy in the generated key, before text encoding.
const KEY_BYTES: usize = 32;

/// The symmetric secret used to sign and verify tokens.
///
/// Held as url-safe base64 text, zeroized on drop. `Debug` never prints
/// the key material.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(String);

impl SigningKey {
    /// Generate a fresh key from 32 bytes of OS randomness.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let key = SigningKey(URL_SAFE_NO_PAD.encode(&bytes));
        bytes.zeroize();
        key
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<&str> for SigningKey {
    fn from(s: &str) -> Self {
        SigningKey(s.to_string())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// Handle to the on-disk key store.
///
/// Explicitly constructed (not a module-level singleton) so tests can inject
/// an isolated directory.
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    /// Key store rooted at an explicit directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        KeyStore { dir: dir.into() }
    }

    /// Key store at the user's configuration directory.
    ///
    /// Honors `XDG_CONFIG_HOME` when set, otherwise falls back to the
    /// platform config dir (`~/.config` on Linux).
    pub fn open_default() -> Self {
        let root = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(dirs::config_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        KeyStore {
            dir: root.join(CONFIG_DIR),
        }
    }

    /// Directory holding the key file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the signing key file.
    pub fn key_path(&self) -> PathBuf {
        self.dir.join(KEY_FILE)
    }

    /// Whether a persisted key exists.
    pub fn exists(&self) -> bool {
        self.key_path().exists()
    }

    /// Load the persisted key, if any.
    ///
    /// Surrounding whitespace is trimmed. An empty or whitespace-only file
    /// is treated as absent (corrupt) so `ensure` can replace it.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyStore` if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<SigningKey>> {
        let path = self.key_path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SigningKey::from(trimmed)))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::keystore(path, e)),
        }
    }

    /// Load the key, generating and persisting one on first use.
    ///
    /// Idempotent: repeated calls return the same key until `rotate` runs.
    /// First-time initialization uses exclusive file creation, so when two
    /// processes race here only one generated key is ever persisted; the
    /// loser re-reads the winner's key instead of writing its own.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyStore` if the store location is unreadable or
    /// unwritable. There is no fallback to an ephemeral in-memory key.
    pub fn ensure(&self) -> Result<SigningKey> {
        if let Some(key) = self.load()? {
            return Ok(key);
        }

        let key = SigningKey::generate();
        match self.persist(&key, false) {
            Ok(()) => {
                debug!(path = %self.key_path().display(), "generated new signing key");
                Ok(key)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                // Lost the creation race. The winner's key is authoritative.
                match self.load()? {
                    Some(winner) => Ok(winner),
                    // Existing file is empty: corrupt store, replace it.
                    None => {
                        self.persist(&key, true)
                            .map_err(|e| Error::keystore(self.key_path(), e))?;
                        Ok(key)
                    }
                }
            }
            Err(e) => Err(Error::keystore(self.key_path(), e)),
        }
    }

    /// Replace the persisted key with a freshly generated one.
    ///
    /// Every token signed under the previous key becomes permanently
    /// unverifiable. Do not rotate while a `serve` instance is handing out
    /// tokens signed under the old key; in-flight unwraps will start
    /// failing immediately.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyStore` if the store location is unwritable.
    pub fn rotate(&self) -> Result<SigningKey> {
        let key = SigningKey::generate();
        self.persist(&key, true)
            .map_err(|e| Error::keystore(self.key_path(), e))?;
        debug!(path = %self.key_path().display(), "rotated signing key");
        Ok(key)
    }

    /// Write the key file, creating the parent directory if needed.
    ///
    /// With `overwrite` false the open uses `create_new`, which fails with
    /// `AlreadyExists` if another writer got there first.
    fn persist(&self, key: &SigningKey, overwrite: bool) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let mut opts = OpenOptions::new();
        opts.write(true);
        if overwrite {
            opts.create(true).truncate(true);
        } else {
            opts.create_new(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }

        let path = self.key_path();
        let mut file = opts.open(&path)?;
        file.write_all(key.as_str().as_bytes())?;
        file.write_all(b"\n")?;

        // mode() only applies at creation; re-assert on overwrite.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_distinct_and_urlsafe() {
        let a = SigningKey::generate();
        let b = SigningKey::generate();
        assert_ne!(a, b);
        // 32 bytes of entropy -> 43 chars of unpadded base64url
        assert_eq!(a.as_str().len(), 43);
        assert!(a
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn debug_redacts_key_material() {
        let key = SigningKey::generate();
        let debug = format!("{:?}", key);
        assert_eq!(debug, "SigningKey(..)");
        assert!(!debug.contains(key.as_str()));
    }
}
