//! PBKDF2 password hashing.
//!
//! Hashes are stored as `pbkdf2:iterations:hex_salt:hex_hash`
//! (HMAC-SHA256, 16-byte salt, 32-byte output).

use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

const SCHEME: &str = "pbkdf2";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum PasswordHashError {
    #[error("Unsupported hash format")]
    Format,

    #[error("Invalid iteration count: {0}")]
    Iterations(String),

    #[error("Invalid hex in hash: {0}")]
    Hex(#[from] hex::FromHexError),
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> String {
    let iterations = iterations.max(1);
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let hash = derive(password, &salt, iterations);
    format!(
        "{}:{}:{}:{}",
        SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(hash)
    )
}

/// Check `password` against an encoded hash.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, PasswordHashError> {
    let mut parts = encoded.split(':');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordHashError::Format);
    };

    let iterations: u32 = iterations
        .parse()
        .map_err(|_| PasswordHashError::Iterations(iterations.to_string()))?;
    if iterations == 0 {
        return Err(PasswordHashError::Iterations(iterations.to_string()));
    }
    let salt = hex::decode(salt)?;
    let expected = hex::decode(expected)?;

    let actual = derive(password, &salt, iterations);
    Ok(constant_time_eq(&actual, &expected))
}
