//! JSON rendering for style profiles.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::style::StyleProfile;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a profile to JSON.
pub fn to_json(profile: &StyleProfile, format: JsonFormat) -> Result<String> {
    serialize(profile, format)
}

/// Serialize any inspection value (summaries, paragraph lists) the same way.
pub fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&StyleProfile::default(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"fonts\""));
        assert!(json.contains("\"body\""));
        assert!(json.contains("Calibri"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&StyleProfile::default(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(json.contains("\"heading1\""));
    }

    #[test]
    fn test_to_json_stable() {
        let profile = StyleProfile::default();
        assert_eq!(
            to_json(&profile, JsonFormat::Compact).unwrap(),
            to_json(&profile.clone(), JsonFormat::Compact).unwrap()
        );
    }
}
