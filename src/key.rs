//! Key validation.
//!
//! Every pool operation that takes a key (or a set of keys) runs the key
//! through [`validate_key`] before any backend access. A key is legal iff
//! every character falls in `[A-Za-z0-9_.]`; anything else, Unicode
//! included, is rejected with [`PoolError::InvalidKey`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PoolError, PoolResult};

/// Matches any character a key is not allowed to contain.
static ILLEGAL_KEY_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.]").expect("illegal-key pattern is valid"));

/// Check that `key` contains only legal characters.
///
/// Returns [`PoolError::InvalidKey`] carrying the offending key otherwise.
/// The empty key contains no illegal character and is accepted.
pub fn validate_key(key: &str) -> PoolResult<()> {
    if ILLEGAL_KEY_CHAR.is_match(key) {
        return Err(PoolError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Validate every key in a batch, failing on the first illegal one.
///
/// A single bad key rejects the whole batch before any backend call.
pub fn validate_keys<'a, I>(keys: I) -> PoolResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    for key in keys {
        validate_key(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keys_are_valid() {
        for key in ["user.42", "Session_Token", "a", "0", "...", "_"] {
            assert!(validate_key(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn test_empty_key_is_valid() {
        assert!(validate_key("").is_ok());
    }

    #[test]
    fn test_separator_characters_are_rejected() {
        for key in ["user:42", "a b", "tab\tkey", "slash/key", "{braces}"] {
            let err = validate_key(key).unwrap_err();
            assert_eq!(
                err,
                PoolError::InvalidKey {
                    key: key.to_string()
                }
            );
        }
    }

    #[test]
    fn test_unicode_is_rejected() {
        assert!(validate_key("clé").is_err());
        assert!(validate_key("ключ").is_err());
        assert!(validate_key("🔑").is_err());
    }

    #[test]
    fn test_batch_fails_on_first_bad_key() {
        let err = validate_keys(["good", "bad key", "also good"]).unwrap_err();
        assert_eq!(
            err,
            PoolError::InvalidKey {
                key: "bad key".to_string()
            }
        );
        assert!(validate_keys(["good", "also.good"]).is_ok());
    }
}
