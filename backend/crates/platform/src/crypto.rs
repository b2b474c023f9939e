//! Random Generation Utilities

use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a random alphanumeric code of the given length
///
/// Used for one-time activation codes.
pub fn random_code(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a random lowercase-hex name of `len_bytes * 2` characters
///
/// Used for blob names so stored assets never collide with or leak the
/// client-supplied filename.
pub fn random_hex(len_bytes: usize) -> String {
    random_bytes(len_bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
