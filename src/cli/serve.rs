//! `serve` command: wrap a .env file and serve it over HTTP.
//!
//! The env file is read and wrapped once at startup; the signing key and the
//! wrapped map are shared read-only across requests. Rotating the key while
//! a server is running invalidates everything it is serving.

use std::sync::Arc;

use tracing::info;

use crate::cli::output;
use crate::core::envfile::EnvFile;
use crate::core::keystore::KeyStore;
use crate::core::token;
use crate::error::Result;
use crate::server::{self, AppState};

pub fn execute(port: u16, env_file: &str) -> Result<()> {
    let key = KeyStore::open_default().ensure()?;
    let vars = EnvFile::load(env_file)?.vars();

    if vars.is_empty() {
        output::warn(&format!("no environment variables found in {}", env_file));
    }

    let wrapped = token::wrap_all(&vars, &key);
    info!(count = wrapped.len(), port, "serving wrapped variables");

    let state = Arc::new(AppState { vars: wrapped, key });
    let app = server::router(state);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        // Localhost only: these endpoints carry no authentication.
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;

        println!(
            "ghostenv server running on {}",
            output::path(&format!("http://localhost:{}", port))
        );
        println!("  GET  /env.json - all wrapped environment variables");
        println!("  POST /unwrap   - redeem a wrapped token");
        println!("  GET  /health   - health check");
        println!();
        output::dimmed("press Ctrl+C to stop");

        axum::serve(listener, app).await?;
        Ok(())
    })
}
