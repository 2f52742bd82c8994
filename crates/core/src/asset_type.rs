//! Asset type tags and the per-type attribute lookup table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::{KEY_AGENT_AVAILABILITY, KEY_AVAILABILITY};

pub const TYPE_MTCONNECT_AGENT: &str = "MTConnectAgent";
pub const TYPE_DEVICE: &str = "Device";
pub const TYPE_PRODUCER: &str = "KafkaProducer";
pub const TYPE_SUPERVISOR: &str = "Supervisor";
pub const TYPE_APPLICATION: &str = "OpenFactoryApp";

/// Type tag of an asset, as stored in the `assets_type` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    MtConnectAgent,
    Device,
    Producer,
    Supervisor,
    Application,
    Other(String),
    /// No type row exists for the asset.
    Unknown,
}

impl AssetType {
    /// Map a raw registry tag. Short aliases (`Producer`, `Application`)
    /// are accepted alongside the registry's own names.
    pub fn from_registry(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Unknown,
            Some(TYPE_MTCONNECT_AGENT) => Self::MtConnectAgent,
            Some(TYPE_DEVICE) => Self::Device,
            Some(TYPE_PRODUCER) | Some("Producer") => Self::Producer,
            Some(TYPE_SUPERVISOR) => Self::Supervisor,
            Some(TYPE_APPLICATION) | Some("Application") => Self::Application,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::MtConnectAgent => TYPE_MTCONNECT_AGENT,
            Self::Device => TYPE_DEVICE,
            Self::Producer => TYPE_PRODUCER,
            Self::Supervisor => TYPE_SUPERVISOR,
            Self::Application => TYPE_APPLICATION,
            Self::Other(raw) => raw,
            Self::Unknown => "",
        }
    }

    /// Attribute ID holding this asset's availability.
    pub fn availability_key(&self) -> &'static str {
        AVAILABILITY_KEYS
            .iter()
            .find(|(tag, _)| *tag == self.as_str())
            .map(|(_, key)| *key)
            .unwrap_or(KEY_AVAILABILITY)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types whose availability lives under a non-default attribute ID.
/// Types not listed here use [`KEY_AVAILABILITY`].
pub const AVAILABILITY_KEYS: &[(&str, &str)] = &[(TYPE_MTCONNECT_AGENT, KEY_AGENT_AVAILABILITY)];

/// Subsets of the registry that can be enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Device,
    Application,
    /// Every asset regardless of type.
    Any,
}

impl TypeFilter {
    /// Registry type tag to filter on, or `None` for no filter.
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            Self::Device => Some(TYPE_DEVICE),
            Self::Application => Some(TYPE_APPLICATION),
            Self::Any => None,
        }
    }
}
