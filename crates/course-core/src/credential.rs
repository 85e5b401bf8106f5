//! Credential hashing.
//!
//! Record files and the registry only ever hold the output of
//! [`hash_password`]; plaintext exists only as the argument to a login call.

use sha2::{Digest, Sha256};

/// Hashes a plaintext password into its stored credential form: the
/// lowercase hex SHA-256 digest (64 characters).
pub fn hash_password(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns `true` if `plaintext` hashes to `stored`.
pub fn verify_password(plaintext: &str, stored: &str) -> bool {
    hash_password(plaintext) == stored
}
