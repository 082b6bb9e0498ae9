//! JSON serialization helpers with structured errors.

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};

/// Serializes data to compact JSON.
pub fn to_json<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(serde_json::to_string(data)?)
}

/// Serializes data to pretty-printed JSON.
pub fn to_json_pretty<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(serde_json::to_string_pretty(data)?)
}

/// Deserializes data from a JSON string; an empty string is rejected before
/// parsing so the caller gets a validation error, not a parse error.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(ExportError::validation("empty JSON string"));
    }
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let data = vec![1u32, 2, 3];
        let json = to_json(&data).unwrap();
        let back: Vec<u32> = from_json(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn empty_string_is_a_validation_error() {
        let result: Result<Vec<u32>> = from_json("   ");
        assert!(matches!(result, Err(ExportError::Validation(_))));
    }
}
