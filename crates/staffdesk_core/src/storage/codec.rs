//! JSON decode boundary for persisted values.
//!
//! Corruption recovery is kept as a pure, unit-testable function: callers
//! decide what to do with a [`CorruptValue`] (clear the key, fall back to
//! defaults) instead of burying that logic in a generic catch-all.

use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A persisted value that no longer decodes as its expected shape.
#[derive(Debug)]
pub struct CorruptValue {
    detail: serde_json::Error,
}

impl Display for CorruptValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "corrupt persisted value: {}", self.detail)
    }
}

impl Error for CorruptValue {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.detail)
    }
}

/// Decodes one raw stored string as JSON.
///
/// # Errors
/// - Returns [`CorruptValue`] when `raw` is not valid JSON for `T`.
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> Result<T, CorruptValue> {
    serde_json::from_str(raw).map_err(|detail| CorruptValue { detail })
}
