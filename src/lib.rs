//! ghostenv - serve tokens, not secrets.
//!
//! Wraps plaintext `.env` values into signed, expiring tokens so consuming
//! processes (IDE plugins, local tooling) receive tokens instead of raw
//! secrets, and can redeem a token for its original value only while the
//! signature and expiry hold.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Ensure the signing key exists
//! │   ├── rotate        # Replace the signing key
//! │   ├── wrap          # Print wrapped values (json | env lines)
//! │   ├── unwrap        # Redeem one token
//! │   ├── convert       # .env → ghost.env, format-preserving
//! │   └── serve         # HTTP server over wrapped values
//! ├── core/             # Core library components
//! │   ├── keystore      # Signing key lifecycle (ensure / rotate)
//! │   ├── token         # HS256 compact-JWS wrap / unwrap codec
//! │   └── envfile       # Line-preserving .env parsing
//! └── server            # axum routes and handlers
//! ```
//!
//! # Token format
//!
//! `gho_env.` + a compact JWS: `b64url(header).b64url(claims).b64url(sig)`
//! with HMAC-SHA256 over the signing input and claims
//! `{value, iat, exp}`. Verification fails closed: malformed, tampered,
//! wrong-key, and expired tokens are all indistinguishably rejected.

pub mod cli;
pub mod core;
pub mod error;
pub mod server;
