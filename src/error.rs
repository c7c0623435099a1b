//! Structured error types for dayline.
//!
//! Replaces `Result<T, String>` throughout the codebase with proper error types.

/// All errors that can occur while building or driving the day strip.
#[derive(Debug, thiserror::Error)]
pub enum DaylineError {
    /// A date string was not valid `YYYY-MM-DD`.
    #[error("Invalid date: {0}")]
    Date(String),

    /// An IANA timezone identifier could not be resolved.
    #[error("Unknown timezone: {0}")]
    Timezone(String),

    /// A requested index or date fell outside the addressable range.
    #[error("Out of range: {0}")]
    Range(String),

    /// Slot list decoding error.
    #[error("Slot decode: {0}")]
    Slot(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DaylineError>;

impl From<String> for DaylineError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for DaylineError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<chrono::ParseError> for DaylineError {
    fn from(e: chrono::ParseError) -> Self {
        Self::Date(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DaylineError> for wasm_bindgen::JsValue {
    fn from(e: DaylineError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
