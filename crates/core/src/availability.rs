//! Availability classification.
//!
//! The registry stores availability as a free-form string. [`classify`]
//! maps any string onto one of three display states; [`AvailabilityStatus::Unknown`]
//! is reserved for assets that report no availability attribute at all.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const STATUS_AVAILABLE: &str = "AVAILABLE";
pub const STATUS_UNAVAILABLE: &str = "UNAVAILABLE";
pub const STATUS_UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "raw", rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    /// A value outside the two canonical ones, kept as reported.
    Other(String),
    /// The asset has no availability attribute.
    Unknown,
}

impl AvailabilityStatus {
    /// Text shown in listings.
    pub fn label(&self) -> &str {
        match self {
            Self::Available => STATUS_AVAILABLE,
            Self::Unavailable => STATUS_UNAVAILABLE,
            Self::Other(raw) => raw,
            Self::Unknown => STATUS_UNKNOWN,
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a raw availability value. Case-insensitive for the canonical
/// values; anything else (including the empty string) is returned verbatim
/// as [`AvailabilityStatus::Other`].
pub fn classify(raw: &str) -> AvailabilityStatus {
    if raw.eq_ignore_ascii_case(STATUS_AVAILABLE) {
        AvailabilityStatus::Available
    } else if raw.eq_ignore_ascii_case(STATUS_UNAVAILABLE) {
        AvailabilityStatus::Unavailable
    } else {
        AvailabilityStatus::Other(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_values_ignore_case() {
        assert_eq!(classify("available"), AvailabilityStatus::Available);
        assert_eq!(classify("AVAILABLE"), AvailabilityStatus::Available);
        assert_eq!(classify("Available"), AvailabilityStatus::Available);
        assert_eq!(classify("unavailable"), AvailabilityStatus::Unavailable);
        assert_eq!(classify("UNAVAILABLE"), AvailabilityStatus::Unavailable);
    }

    #[test]
    fn other_values_keep_original_case() {
        assert_eq!(classify("foo"), AvailabilityStatus::Other("foo".to_string()));
        assert_eq!(
            classify("Starting"),
            AvailabilityStatus::Other("Starting".to_string())
        );
    }

    #[test]
    fn surrounding_whitespace_is_not_stripped() {
        assert_eq!(
            classify(" AVAILABLE"),
            AvailabilityStatus::Other(" AVAILABLE".to_string())
        );
    }

    #[test]
    fn empty_string_is_other() {
        assert_eq!(classify(""), AvailabilityStatus::Other(String::new()));
    }

    #[test]
    fn classification_is_deterministic() {
        for raw in ["available", "UNAVAILABLE", "foo", ""] {
            assert_eq!(classify(raw), classify(raw));
        }
    }

    #[test]
    fn labels() {
        assert_eq!(AvailabilityStatus::Available.label(), "AVAILABLE");
        assert_eq!(AvailabilityStatus::Unknown.to_string(), "UNKNOWN");
        assert_eq!(classify("Starting").label(), "Starting");
    }
}
