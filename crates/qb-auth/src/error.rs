//! Error types for auth message signing.

/// Errors raised while building or signing an auth message.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// No signing secret was configured, or it was empty.
    #[error("auth secret is missing or empty")]
    MissingSecret,

    /// The message to sign is not a key-value mapping.
    #[error("auth message must be a JSON object")]
    NotAnObject,

    /// A field holds a value the canonical form cannot express.
    #[error("unsupported value for `{key}`: {kind}")]
    UnsupportedValue {
        /// The offending field, `outer[inner]` for nested fields.
        key: String,
        /// The JSON kind that was rejected (`null`, `array`, ...).
        kind: &'static str,
    },

    /// A nested mapping contains another mapping.
    #[error("`{key}` is nested more than one level deep")]
    NestingTooDeep {
        /// The offending field in `outer[inner]` form.
        key: String,
    },

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
