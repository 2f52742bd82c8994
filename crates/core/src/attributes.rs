//! Attribute rows as stored in the `assets` materialized view.

use serde::{Deserialize, Serialize};

/// Generic availability attribute reported by devices, producers,
/// supervisors and apps.
pub const KEY_AVAILABILITY: &str = "avail";

/// Availability attribute an MTConnect agent reports about itself.
pub const KEY_AGENT_AVAILABILITY: &str = "agent_avail";

/// Name of the Docker service running the asset.
pub const KEY_DOCKER_SERVICE: &str = "DockerService";

pub const KEY_APPLICATION_MANUFACTURER: &str = "application_manufacturer";
pub const KEY_APPLICATION_VERSION: &str = "application_version";
pub const KEY_APPLICATION_LICENSE: &str = "application_license";

/// Reverse references (comma-separated UUIDs of assets referencing this one).
pub const KEY_REFERENCES_BELOW: &str = "references_below";

/// Category of an attribute as reported in the registry `TYPE` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Sample,
    Event,
    Condition,
    /// Any other registry category (e.g. `OpenFactory`, `Method`).
    Other(String),
}

impl AttributeType {
    /// Map a raw `TYPE` column value. MTConnect uses plural names for the
    /// first two categories; both forms are accepted.
    pub fn from_registry(raw: &str) -> Self {
        match raw {
            "Samples" | "Sample" => Self::Sample,
            "Events" | "Event" => Self::Event,
            "Condition" | "Conditions" => Self::Condition,
            other => Self::Other(other.to_string()),
        }
    }

    /// Human-readable label used in listings.
    pub fn label(&self) -> &str {
        match self {
            Self::Sample => "Sample",
            Self::Event => "Event",
            Self::Condition => "Condition",
            Self::Other(raw) => raw,
        }
    }
}

/// One current attribute value of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRow {
    pub id: String,
    pub value: String,
    pub tag: String,
    pub attribute_type: AttributeType,
}

impl AttributeRow {
    pub fn new(
        id: impl Into<String>,
        value: impl Into<String>,
        tag: impl Into<String>,
        attribute_type: AttributeType,
    ) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            tag: tag.into(),
            attribute_type,
        }
    }
}
