//! Keyed byte-shift cipher wrapped in base64.
//!
//! Each plaintext byte is shifted by the matching key byte (the key
//! repeats), modulo 256.  Works on UTF-8 bytes, so any `&str` round-trips.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{SecurityError, SecurityResult};

/// Text shown in place of a plaintext that could not be recovered.
pub const DECRYPT_NOTICE: &str = "Error decrypting: Invalid input";

pub fn encrypt(text: &str, key: &str) -> SecurityResult<String> {
    let key = key_bytes(key)?;
    let shifted: Vec<u8> = text
        .bytes()
        .zip(key.iter().cycle())
        .map(|(b, k)| b.wrapping_add(*k))
        .collect();
    Ok(STANDARD.encode(shifted))
}

/// Inverse of [`encrypt`].  Fails on malformed base64 or when the shifted
/// bytes do not form UTF-8, which is what a wrong key usually produces.
pub fn decrypt(text: &str, key: &str) -> SecurityResult<String> {
    let key = key_bytes(key)?;
    let decoded = STANDARD.decode(text.trim())?;
    let plain: Vec<u8> = decoded
        .iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b.wrapping_sub(*k))
        .collect();
    Ok(String::from_utf8(plain)?)
}

/// [`decrypt`], with any failure replaced by [`DECRYPT_NOTICE`].
pub fn decrypt_or_notice(text: &str, key: &str) -> String {
    decrypt(text, key).unwrap_or_else(|e| {
        log::debug!("decrypt failed: {e}");
        DECRYPT_NOTICE.to_owned()
    })
}

fn key_bytes(key: &str) -> SecurityResult<&[u8]> {
    if key.is_empty() {
        return Err(SecurityError::EmptyKey);
    }
    Ok(key.as_bytes())
}
