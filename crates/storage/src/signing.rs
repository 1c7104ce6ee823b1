//! Expiring HMAC tokens for asset downloads.
//!
//! The API never hands out raw storage keys. A download URL carries a
//! token of the form `hex(payload).hex(mac)` where the payload is
//! `"{expires_unix}:{key}"` and the MAC is HMAC-SHA256 over the payload.
//! Redeeming verifies the MAC before trusting anything in the payload,
//! then checks the expiry.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::StorageError;

type HmacSha256 = Hmac<Sha256>;

/// Verified contents of a download token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadToken {
    /// Storage key the token grants access to.
    pub key: String,
    /// Unix timestamp (seconds) after which the token is rejected.
    pub expires_at: i64,
}

fn mac_hex(secret: &[u8], payload: &[u8]) -> String {
    // HMAC accepts keys of any length; new_from_slice cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret).expect("hmac accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Issue a token granting access to `key` until `expires_at`.
pub fn sign_download(secret: &[u8], key: &str, expires_at: i64) -> String {
    let payload = format!("{expires_at}:{key}");
    let mac = mac_hex(secret, payload.as_bytes());
    format!("{}.{mac}", hex::encode(payload.as_bytes()))
}

/// Verify `token` and return its contents.
///
/// Fails with [`StorageError::InvalidToken`] on any parse or signature
/// problem and [`StorageError::TokenExpired`] when `now` is past the
/// embedded expiry.
pub fn verify_download(secret: &[u8], token: &str, now: i64) -> Result<DownloadToken, StorageError> {
    let (payload_hex, mac) = token.split_once('.').ok_or(StorageError::InvalidToken)?;
    let payload = hex::decode(payload_hex).map_err(|_| StorageError::InvalidToken)?;

    let expected = mac_hex(secret, &payload);
    // Compare MACs in constant time.
    let mut mismatch = (expected.len() != mac.len()) as u8;
    for (a, b) in expected.bytes().zip(mac.bytes()) {
        mismatch |= a ^ b;
    }
    if mismatch != 0 {
        return Err(StorageError::InvalidToken);
    }

    let payload = String::from_utf8(payload).map_err(|_| StorageError::InvalidToken)?;
    let (expires_str, key) = payload.split_once(':').ok_or(StorageError::InvalidToken)?;
    let expires_at: i64 = expires_str.parse().map_err(|_| StorageError::InvalidToken)?;

    if now > expires_at {
        return Err(StorageError::TokenExpired);
    }

    Ok(DownloadToken {
        key: key.to_string(),
        expires_at,
    })
}
