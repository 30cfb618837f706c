//! Keyed hash primitive used for auth message signatures.

use hmac::{Hmac, Mac};
use sha1::Sha1;

/// Compute HMAC-SHA1 of the input data with the given key.
///
/// # Arguments
/// * `key` - The HMAC key bytes.
/// * `data` - The message bytes to authenticate.
///
/// # Returns
/// A 20-byte HMAC-SHA1 tag.
pub fn sha1_hmac(key: &[u8], data: &[u8]) -> [u8; 20] {
    type HmacSha1 = Hmac<Sha1>;
    let mut mac = HmacSha1::new_from_slice(key)
        .expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize();
    let mut output = [0u8; 20];
    output.copy_from_slice(&result.into_bytes());
    output
}
