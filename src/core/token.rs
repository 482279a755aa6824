//! Token codec: signed, expiring envelopes around plaintext values.
//!
//! A wrapped token is `gho_env.` followed by a compact JWS (HS256):
//! `base64url(header).base64url(claims).base64url(signature)`, with claims
//! `{value, iat, exp}` in seconds since the epoch. Tokens issued by other
//! implementations of the same format verify here and vice versa.
//!
//! Verification fails closed: malformed structure, a bad signature, and an
//! elapsed expiry all collapse to `None`. Callers cannot tell the causes
//! apart, which keeps the codec from acting as an oracle for why a token
//! was rejected.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::core::constants::{DEFAULT_TTL_DAYS, MIN_TOKEN_LEN, TOKEN_PREFIX};
use crate::core::envfile::EnvMap;
use crate::core::keystore::SigningKey;

type HmacSha256 = Hmac<Sha256>;

const ALG: &str = "HS256";

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    value: String,
    iat: i64,
    exp: i64,
}

/// Wrap a plaintext value into a signed token with the default lifetime
/// (365 days).
pub fn wrap(value: &str, key: &SigningKey) -> String {
    wrap_with_ttl(value, key, Duration::days(DEFAULT_TTL_DAYS))
}

/// Wrap a plaintext value into a signed token expiring after `ttl`.
///
/// The only non-determinism in the output is the embedded issue timestamp.
pub fn wrap_with_ttl(value: &str, key: &SigningKey, ttl: Duration) -> String {
    let now = Utc::now().timestamp();
    let header = Header {
        alg: ALG.to_string(),
        typ: Some("JWT".to_string()),
    };
    let claims = Claims {
        value: value.to_string(),
        iat: now,
        exp: now + ttl.num_seconds(),
    };

    // Serializing these flat structs cannot fail.
    let header_json = serde_json::to_vec(&header).expect("header serialization");
    let claims_json = serde_json::to_vec(&claims).expect("claims serialization");

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );

    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(signing_input.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}{}.{}",
        TOKEN_PREFIX,
        signing_input,
        URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Unwrap a token back to its plaintext value.
///
/// Accepts the token with or without the `gho_env.` prefix. Returns `None`
/// if the payload is malformed, the signature does not verify under `key`,
/// or the expiry has passed.
pub fn unwrap(token: &str, key: &SigningKey) -> Option<String> {
    let compact = token.strip_prefix(TOKEN_PREFIX).unwrap_or(token);

    let mut parts = compact.split('.');
    let header_b64 = parts.next()?;
    let claims_b64 = parts.next()?;
    let signature_b64 = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let header: Header = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header_b64).ok()?).ok()?;
    if header.alg != ALG {
        return None;
    }

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).ok()?;
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(claims_b64.as_bytes());
    // Constant-time comparison.
    mac.verify_slice(&signature).ok()?;

    let claims: Claims = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(claims_b64).ok()?).ok()?;
    if Utc::now().timestamp() > claims.exp {
        return None;
    }

    Some(claims.value)
}

/// Cheap classifier for wrapped tokens.
///
/// True iff the string carries the `gho_env.` prefix and is longer than 20
/// characters. No signature check; the length floor only rejects degenerate
/// strings that happen to start with the prefix.
pub fn is_wrapped(value: &str) -> bool {
    value.starts_with(TOKEN_PREFIX) && value.len() > MIN_TOKEN_LEN
}

/// Wrap every plain value in an env map.
///
/// Entries already classifying as wrapped are passed through unchanged, so
/// wrapping twice equals wrapping once.
pub fn wrap_all(vars: &EnvMap, key: &SigningKey) -> EnvMap {
    wrap_all_with_ttl(vars, key, Duration::days(DEFAULT_TTL_DAYS))
}

/// `wrap_all` with an explicit token lifetime.
pub fn wrap_all_with_ttl(vars: &EnvMap, key: &SigningKey, ttl: Duration) -> EnvMap {
    vars.iter()
        .map(|(name, value)| {
            let wrapped = if is_wrapped(value) {
                value.clone()
            } else {
                wrap_with_ttl(value, key, ttl)
            };
            (name.clone(), wrapped)
        })
        .collect()
}

/// Unwrap every wrapped value in an env map.
///
/// Plain values pass through. A wrapped entry that fails verification keeps
/// its original token value; entries are never dropped or nulled.
pub fn unwrap_all(vars: &EnvMap, key: &SigningKey) -> EnvMap {
    vars.iter()
        .map(|(name, value)| {
            let out = if is_wrapped(value) {
                unwrap(value, key).unwrap_or_else(|| value.clone())
            } else {
                value.clone()
            };
            (name.clone(), out)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_emits_prefixed_three_part_token() {
        let key = SigningKey::generate();
        let token = wrap("hello", &key);
        assert!(token.starts_with(TOKEN_PREFIX));
        let compact = token.strip_prefix(TOKEN_PREFIX).unwrap();
        assert_eq!(compact.split('.').count(), 3);
    }

    #[test]
    fn unwrap_accepts_bare_compact_form() {
        let key = SigningKey::generate();
        let token = wrap("no prefix needed", &key);
        let bare = token.strip_prefix(TOKEN_PREFIX).unwrap();
        assert_eq!(unwrap(bare, &key).as_deref(), Some("no prefix needed"));
    }

    #[test]
    fn unwrap_rejects_tampered_claims() {
        let key = SigningKey::generate();
        let token = wrap("original", &key);
        let compact = token.strip_prefix(TOKEN_PREFIX).unwrap();
        let mut parts: Vec<&str> = compact.split('.').collect();

        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&Claims {
                value: "forged".to_string(),
                iat: Utc::now().timestamp(),
                exp: Utc::now().timestamp() + 3600,
            })
            .unwrap(),
        );
        parts[1] = &forged_claims;
        let forged = format!("{}{}", TOKEN_PREFIX, parts.join("."));

        assert_eq!(unwrap(&forged, &key), None);
    }

    #[test]
    fn unwrap_rejects_unexpected_algorithm() {
        let key = SigningKey::generate();
        let token = wrap("v", &key);
        let compact = token.strip_prefix(TOKEN_PREFIX).unwrap();
        let mut parts: Vec<&str> = compact.split('.').collect();

        let none_header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        parts[0] = &none_header;
        let downgraded = parts.join(".");

        assert_eq!(unwrap(&downgraded, &key), None);
    }

    #[test]
    fn unwrap_rejects_garbage() {
        let key = SigningKey::generate();
        assert_eq!(unwrap("", &key), None);
        assert_eq!(unwrap("gho_env.", &key), None);
        assert_eq!(unwrap("gho_env.not.a.real.token", &key), None);
        assert_eq!(unwrap("gho_env.a.b.c", &key), None);
    }

    #[test]
    fn is_wrapped_checks_prefix_and_length() {
        assert!(is_wrapped("gho_env.aaaaaaaaaaaaaaaaaaaa"));
        // Exactly 20 chars total is still too short.
        assert_eq!("gho_env.aaaaaaaaaaaa".len(), 20);
        assert!(!is_wrapped("gho_env.aaaaaaaaaaaa"));
        assert!(!is_wrapped("gho_env."));
        assert!(!is_wrapped("plain value that is quite long"));
        assert!(!is_wrapped(""));
    }
}
