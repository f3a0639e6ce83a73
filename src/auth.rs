//! Account credentials and bearer sessions.
//!
//! Passwords are stored as `salt$hash` (both base64) derived with
//! PBKDF2-HMAC-SHA256. Bearer tokens are random URL-safe strings; only
//! their SHA-256 hash is kept in the in-memory session store.

use std::collections::HashMap;

use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};

use crate::models::enums::Role;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 32;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);

    let b64 = base64::engine::general_purpose::STANDARD_NO_PAD;
    format!("{}${}", b64.encode(salt), b64.encode(hash))
}

/// Verify a password against a stored `salt$hash` string.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let b64 = base64::engine::general_purpose::STANDARD_NO_PAD;
    let Some((salt_b64, hash_b64)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (b64.decode(salt_b64), b64.decode(hash_b64)) else {
        return false;
    };

    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);
    hash.as_slice() == expected.as_slice()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Authenticated identity attached to each protected request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub role: Role,
}

/// In-memory bearer session store, keyed by token hash.
///
/// Tokens are issued by login/register and stay valid for the process
/// lifetime; a restart invalidates all sessions.
pub struct SessionStore {
    sessions: HashMap<[u8; 32], AuthUser>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Issue a fresh token for the given identity.
    pub fn issue(&mut self, user: AuthUser) -> String {
        let token = generate_token();
        self.sessions.insert(hash_token(&token), user);
        token
    }

    /// Resolve a bearer token to its identity, if known.
    pub fn resolve(&self, token: &str) -> Option<AuthUser> {
        self.sessions.get(&hash_token(token)).cloned()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_roundtrip() {
        let stored = hash_password("123456");
        assert!(verify_password("123456", &stored));
    }

    #[test]
    fn wrong_password_rejected() {
        let stored = hash_password("123456");
        assert!(!verify_password("654321", &stored));
    }

    #[test]
    fn malformed_stored_hash_rejected() {
        assert!(!verify_password("123456", "not-a-valid-record"));
        assert!(!verify_password("123456", "!!$!!"));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per hash
        assert_ne!(hash_password("123456"), hash_password("123456"));
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn session_store_issue_and_resolve() {
        let mut store = SessionStore::new();
        let token = store.issue(AuthUser {
            id: 7,
            role: Role::Patient,
        });

        let user = store.resolve(&token).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Patient);
    }

    #[test]
    fn session_store_unknown_token() {
        let store = SessionStore::new();
        assert!(store.resolve("nonexistent").is_none());
    }
}
