use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Opaque identifier of an asset in the registry.
///
/// The registry uses free-form strings (e.g. `PROVER3018`,
/// `PROVER3018-AGENT`), not RFC 4122 UUIDs. The only constraint enforced
/// here is that the identifier is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetUuid(String);

impl AssetUuid {
    /// Build an identifier, rejecting empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "Asset UUID must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier formed by appending `-{suffix}` to this one.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}-{suffix}", self.0))
    }
}

impl fmt::Display for AssetUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
