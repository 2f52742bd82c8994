//! Typed view over one asset's current attributes.
//!
//! An [`Asset`] is built fresh for each query and dropped after
//! rendering. It never writes back to the registry.

use crate::asset_type::AssetType;
use crate::attributes::{
    AttributeRow, AttributeType, KEY_APPLICATION_LICENSE, KEY_APPLICATION_MANUFACTURER,
    KEY_APPLICATION_VERSION, KEY_DOCKER_SERVICE,
};
use crate::availability::{classify, AvailabilityStatus};
use crate::references::ReferenceIndex;
use crate::registry::{Registry, RegistryError};
use crate::types::AssetUuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    uuid: AssetUuid,
    asset_type: AssetType,
    attributes: Vec<AttributeRow>,
}

impl Asset {
    /// Build an asset from raw rows.
    ///
    /// Attribute IDs are unique per asset: when the same ID appears more
    /// than once the last row wins, keeping the position of the first.
    pub fn from_rows(uuid: AssetUuid, asset_type: AssetType, rows: Vec<AttributeRow>) -> Self {
        let mut attributes: Vec<AttributeRow> = Vec::with_capacity(rows.len());
        for row in rows {
            match attributes.iter_mut().find(|a| a.id == row.id) {
                Some(existing) => *existing = row,
                None => attributes.push(row),
            }
        }
        Self {
            uuid,
            asset_type,
            attributes,
        }
    }

    /// Load an asset's type and attributes from the registry.
    pub async fn fetch(registry: &dyn Registry, uuid: &AssetUuid) -> Result<Self, RegistryError> {
        let raw_type = registry.fetch_asset_type(uuid).await?;
        let asset_type = AssetType::from_registry(raw_type.as_deref());
        Self::fetch_as(registry, uuid, asset_type).await
    }

    /// Load an asset's attributes when its type is already known.
    pub async fn fetch_as(
        registry: &dyn Registry,
        uuid: &AssetUuid,
        asset_type: AssetType,
    ) -> Result<Self, RegistryError> {
        let rows = registry.fetch_attributes(uuid).await?;
        Ok(Self::from_rows(uuid.clone(), asset_type, rows))
    }

    pub fn uuid(&self) -> &AssetUuid {
        &self.uuid
    }

    pub fn asset_type(&self) -> &AssetType {
        &self.asset_type
    }

    pub fn attributes(&self) -> &[AttributeRow] {
        &self.attributes
    }

    /// `true` when the registry holds no attributes for this UUID.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Current value of the attribute with the given ID.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.value.as_str())
    }

    /// Availability read from the attribute matching this asset's type.
    pub fn availability(&self) -> AvailabilityStatus {
        match self.value(self.asset_type.availability_key()) {
            Some(raw) => classify(raw),
            None => AvailabilityStatus::Unknown,
        }
    }

    pub fn samples(&self) -> Vec<&AttributeRow> {
        self.of_type(&AttributeType::Sample)
    }

    pub fn events(&self) -> Vec<&AttributeRow> {
        self.of_type(&AttributeType::Event)
    }

    pub fn conditions(&self) -> Vec<&AttributeRow> {
        self.of_type(&AttributeType::Condition)
    }

    pub fn docker_service(&self) -> Option<&str> {
        self.value(KEY_DOCKER_SERVICE)
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.value(KEY_APPLICATION_MANUFACTURER)
    }

    pub fn version(&self) -> Option<&str> {
        self.value(KEY_APPLICATION_VERSION)
    }

    pub fn license(&self) -> Option<&str> {
        self.value(KEY_APPLICATION_LICENSE)
    }

    /// Assets currently referencing this one.
    pub async fn references_below(
        &self,
        registry: &dyn Registry,
    ) -> Result<ReferenceIndex, RegistryError> {
        ReferenceIndex::fetch(registry, &self.uuid).await
    }

    fn of_type(&self, attribute_type: &AttributeType) -> Vec<&AttributeRow> {
        self.attributes
            .iter()
            .filter(|a| &a.attribute_type == attribute_type)
            .collect()
    }
}
