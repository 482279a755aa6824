use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("key store unavailable at {path}: {source}")]
    KeyStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("env file not found: {0}")]
    EnvFileNotFound(PathBuf),

    #[error("no environment variables found in {0}")]
    EmptyEnvFile(PathBuf),

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn keystore(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::KeyStore {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
