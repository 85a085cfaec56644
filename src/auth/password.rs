//! One-way password hashing with constant-time verification.
//!
//! Records are encoded as `salt:digest` in hex, with a fresh 16-byte random
//! salt per hash and an Argon2id digest. Verification recomputes the digest
//! for the candidate password and compares with `subtle` so timing does not
//! leak how many prefix bytes matched. Malformed records verify as `false`,
//! never as an error.
//!
//! Hashing is deliberately expensive; request handlers run it on the blocking
//! pool (`actix_web::web::block`) so it cannot stall the async executor.

use argon2::Argon2;
use rand::RngCore;
use subtle::ConstantTimeEq;
use thiserror::Error;

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

#[derive(Debug, Error)]
#[error("password hashing failed")]
pub struct HashError;

/// Hashes a password into a `salt:digest` hex record with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);

    let mut digest = [0u8; DIGEST_LEN];
    Argon2::default()
        .hash_password_into(password.as_bytes(), &salt, &mut digest)
        .map_err(|_| HashError)?;

    Ok(format!("{}:{}", hex::encode(salt), hex::encode(digest)))
}

/// Verifies a password against a stored record. Returns `false` on malformed
/// records, wrong digest length or mismatch.
pub fn verify_password(password: &str, record: &str) -> bool {
    let Some((salt_hex, digest_hex)) = record.split_once(':') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(stored) = hex::decode(digest_hex) else {
        return false;
    };
    if salt.is_empty() || stored.len() != DIGEST_LEN {
        return false;
    }

    let mut digest = [0u8; DIGEST_LEN];
    if Argon2::default()
        .hash_password_into(password.as_bytes(), &salt, &mut digest)
        .is_err()
    {
        return false;
    }

    digest.ct_eq(stored.as_slice()).into()
}
