//! Core library components.
//!
//! The signing-key lifecycle and the token codec live here, along with the
//! line-preserving `.env` parser they operate over.

pub mod constants;
pub mod envfile;
pub mod keystore;
pub mod token;
