//! Canonical parameter serialization and HMAC-SHA1 signing.
//!
//! The server recomputes the signature from the parameters it receives, so
//! the canonical form here must match it byte for byte:
//!
//! 1. Every top-level field except `signature` becomes `key=value`. A field
//!    holding a flat mapping becomes `key[sub]=value` for each entry, sorted
//!    and joined with `&` into a single part.
//! 2. The parts are sorted in byte order and joined with `&`.
//!
//! The signature is the lowercase hex HMAC-SHA1 of that string, keyed by the
//! application's auth secret.

use serde_json::Value;

use crate::error::SigningError;
use crate::hash::sha1_hmac;

/// Name of the field that carries the signature. Never part of the signed data.
pub const SIGNATURE_FIELD: &str = "signature";

/// Build the canonical string for a message.
///
/// `message` must be a JSON object whose values are strings, numbers,
/// booleans, or flat objects of those. `null`, arrays, and mappings nested
/// more than one level are rejected.
pub fn canonical_string(message: &Value) -> Result<String, SigningError> {
    let fields = message.as_object().ok_or(SigningError::NotAnObject)?;

    let mut parts = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        if key == SIGNATURE_FIELD {
            continue;
        }

        match value {
            Value::Object(nested) => {
                let mut pairs = Vec::with_capacity(nested.len());
                for (sub_key, sub_value) in nested {
                    let name = format!("{key}[{sub_key}]");
                    if sub_value.is_object() {
                        return Err(SigningError::NestingTooDeep { key: name });
                    }
                    let rendered = render_scalar(&name, sub_value)?;
                    pairs.push(format!("{name}={rendered}"));
                }
                pairs.sort();
                parts.push(pairs.join("&"));
            }
            _ => {
                let rendered = render_scalar(key, value)?;
                parts.push(format!("{key}={rendered}"));
            }
        }
    }

    parts.sort();
    Ok(parts.join("&"))
}

/// Sign a message with the shared secret.
///
/// Returns the lowercase hex HMAC-SHA1 of [`canonical_string`]. An empty
/// secret is a configuration error and is reported, not signed with.
pub fn sign(message: &Value, secret: &str) -> Result<String, SigningError> {
    if secret.is_empty() {
        return Err(SigningError::MissingSecret);
    }

    let canonical = canonical_string(message)?;
    let mac = sha1_hmac(secret.as_bytes(), canonical.as_bytes());
    Ok(hex::encode(mac))
}

/// Render a scalar field value the way it appears in the canonical string.
fn render_scalar(key: &str, value: &Value) -> Result<String, SigningError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(SigningError::UnsupportedValue {
            key: key.to_string(),
            kind: "null",
        }),
        Value::Array(_) => Err(SigningError::UnsupportedValue {
            key: key.to_string(),
            kind: "array",
        }),
        Value::Object(_) => Err(SigningError::UnsupportedValue {
            key: key.to_string(),
            kind: "object",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_string_flat_message() {
        let message = json!({
            "timestamp": 1000000,
            "nonce": 1234,
            "auth_key": "K",
            "application_id": 5
        });
        assert_eq!(
            canonical_string(&message).unwrap(),
            "application_id=5&auth_key=K&nonce=1234&timestamp=1000000"
        );
    }

    #[test]
    fn test_canonical_string_folds_nested_fields() {
        let message = json!({
            "extra": {"b": 2, "a": 1},
            "application_id": 5
        });
        assert_eq!(
            canonical_string(&message).unwrap(),
            "application_id=5&extra[a]=1&extra[b]=2"
        );
    }

    #[test]
    fn test_canonical_string_sorts_nested_group_as_one_part() {
        // The nested group sorts by its joined text, so `user[...]` lands
        // after `timestamp` even though it holds several pairs.
        let message = json!({
            "user": {"password": "p", "login": "l"},
            "timestamp": 1,
            "nonce": 2
        });
        assert_eq!(
            canonical_string(&message).unwrap(),
            "nonce=2&timestamp=1&user[login]=l&user[password]=p"
        );
    }

    #[test]
    fn test_canonical_string_sorts_by_byte_order() {
        // Uppercase sorts before lowercase, `[` (0x5b) before `_` (0x5f).
        let message = json!({
            "b": 1,
            "user_x": 2,
            "a_": 3,
            "user": {"x": 1},
            "a": 4,
            "B": 2
        });
        assert_eq!(
            canonical_string(&message).unwrap(),
            "B=2&a=4&a_=3&b=1&user[x]=1&user_x=2"
        );
    }

    #[test]
    fn test_canonical_string_skips_signature() {
        let message = json!({
            "application_id": 5,
            "signature": "deadbeef"
        });
        assert_eq!(canonical_string(&message).unwrap(), "application_id=5");
    }

    #[test]
    fn test_canonical_string_renders_booleans() {
        let message = json!({"flag": true, "other": false});
        assert_eq!(
            canonical_string(&message).unwrap(),
            "flag=true&other=false"
        );
    }

    #[test]
    fn test_canonical_string_rejects_null() {
        let err = canonical_string(&json!({"auth_key": null})).unwrap_err();
        assert!(matches!(
            err,
            SigningError::UnsupportedValue { ref key, kind: "null" } if key == "auth_key"
        ));
    }

    #[test]
    fn test_canonical_string_rejects_arrays() {
        let err = canonical_string(&json!({"ids": [1, 2]})).unwrap_err();
        assert!(matches!(err, SigningError::UnsupportedValue { kind: "array", .. }));

        let err = canonical_string(&json!({"user": {"ids": [1]}})).unwrap_err();
        assert!(matches!(
            err,
            SigningError::UnsupportedValue { ref key, kind: "array" } if key == "user[ids]"
        ));
    }

    #[test]
    fn test_canonical_string_rejects_deep_nesting() {
        let err = canonical_string(&json!({"a": {"b": {"c": 1}}})).unwrap_err();
        assert!(matches!(
            err,
            SigningError::NestingTooDeep { ref key } if key == "a[b]"
        ));
    }

    #[test]
    fn test_canonical_string_rejects_non_object() {
        assert!(matches!(
            canonical_string(&json!([1, 2, 3])),
            Err(SigningError::NotAnObject)
        ));
        assert!(matches!(
            canonical_string(&json!("application_id=5")),
            Err(SigningError::NotAnObject)
        ));
    }

    #[test]
    fn test_sign_known_answer() {
        let message = json!({
            "application_id": 5,
            "auth_key": "K",
            "nonce": 1234,
            "timestamp": 1000000
        });
        assert_eq!(
            sign(&message, "secret").unwrap(),
            "7616bdefc376c17bd257179fe4400a6a46e3dceb"
        );
    }

    #[test]
    fn test_sign_rejects_empty_secret() {
        let message = json!({"application_id": 5});
        assert!(matches!(sign(&message, ""), Err(SigningError::MissingSecret)));
    }

    #[test]
    fn test_sign_is_lowercase_hex() {
        let sig = sign(&json!({"application_id": 5}), "secret").unwrap();
        assert_eq!(sig.len(), 40);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
