pub mod random;

pub use random::{RandomSource, ThreadRandom};

use crate::errors::{FlatlinkerError, Result};

/// 短码字符集：小写字母、大写字母、数字，共 62 个
pub const KEY_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draw `length` symbols uniformly from [`KEY_ALPHABET`].
pub fn generate_random_code(length: usize, random: &dyn RandomSource) -> String {
    use std::iter;

    iter::repeat_with(|| KEY_ALPHABET[random.index(KEY_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Whether every character of `code` belongs to the generated-key alphabet.
#[inline]
pub fn is_alphabet_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Boundary check for keys coming from outside (URL paths, explicit hashes).
///
/// The store is a single flat directory, so a key must name exactly one entry
/// directly inside it.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(FlatlinkerError::bad_request("shorturl key cannot be empty"));
    }
    if key.contains('/') {
        return Err(FlatlinkerError::bad_request("URL shouldn't contain '/'"));
    }
    if key.contains('\\') {
        return Err(FlatlinkerError::bad_request("URL shouldn't contain '\\'"));
    }
    if key.contains('\0') {
        return Err(FlatlinkerError::bad_request(
            "shorturl key contains a NUL byte",
        ));
    }
    if key == "." || key == ".." {
        return Err(FlatlinkerError::bad_request(format!(
            "'{}' is not a valid shorturl key",
            key
        )));
    }
    Ok(())
}
