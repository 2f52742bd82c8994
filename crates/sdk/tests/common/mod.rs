//! In-memory registry for driving the listing operations in tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use openfactory_core::asset_type::TypeFilter;
use openfactory_core::attributes::{AttributeRow, AttributeType};
use openfactory_core::registry::{Registry, RegistryError};
use openfactory_core::types::AssetUuid;

struct StoredAsset {
    uuid: AssetUuid,
    type_tag: Option<String>,
    rows: Vec<AttributeRow>,
}

/// Registry backed by vectors, preserving insertion order like the
/// ksqlDB enumeration would.
#[derive(Default)]
pub struct InMemoryRegistry {
    assets: Vec<StoredAsset>,
    references: HashMap<AssetUuid, BTreeSet<AssetUuid>>,
    unavailable: bool,
    queries: AtomicUsize,
}

#[allow(dead_code)]
impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose every query fails as if the server were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn with_asset(mut self, uuid: &str, type_tag: Option<&str>, rows: Vec<AttributeRow>) -> Self {
        self.assets.push(StoredAsset {
            uuid: uuid_of(uuid),
            type_tag: type_tag.map(str::to_string),
            rows,
        });
        self
    }

    pub fn with_references(mut self, uuid: &str, referencing: &[&str]) -> Self {
        self.references.insert(
            uuid_of(uuid),
            referencing.iter().map(|r| uuid_of(r)).collect(),
        );
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), RegistryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(RegistryError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn fetch_attributes(&self, uuid: &AssetUuid) -> Result<Vec<AttributeRow>, RegistryError> {
        self.check()?;
        Ok(self
            .assets
            .iter()
            .find(|a| &a.uuid == uuid)
            .map(|a| a.rows.clone())
            .unwrap_or_default())
    }

    async fn fetch_all(&self, filter: TypeFilter) -> Result<Vec<AssetUuid>, RegistryError> {
        self.check()?;
        Ok(self
            .assets
            .iter()
            .filter(|a| match filter.type_tag() {
                Some(tag) => a.type_tag.as_deref() == Some(tag),
                None => true,
            })
            .map(|a| a.uuid.clone())
            .collect())
    }

    async fn fetch_referencing_uuids(
        &self,
        uuid: &AssetUuid,
    ) -> Result<BTreeSet<AssetUuid>, RegistryError> {
        self.check()?;
        Ok(self.references.get(uuid).cloned().unwrap_or_default())
    }

    async fn fetch_asset_type(&self, uuid: &AssetUuid) -> Result<Option<String>, RegistryError> {
        self.check()?;
        Ok(self
            .assets
            .iter()
            .find(|a| &a.uuid == uuid)
            .and_then(|a| a.type_tag.clone()))
    }
}

pub fn uuid_of(s: &str) -> AssetUuid {
    AssetUuid::parse(s).expect("test UUIDs are non-empty")
}

#[allow(dead_code)]
pub fn sample(id: &str, value: &str) -> AttributeRow {
    AttributeRow::new(id, value, "Position", AttributeType::Sample)
}

#[allow(dead_code)]
pub fn event(id: &str, value: &str) -> AttributeRow {
    AttributeRow::new(id, value, "Availability", AttributeType::Event)
}

#[allow(dead_code)]
pub fn condition(id: &str, value: &str) -> AttributeRow {
    AttributeRow::new(id, value, "System", AttributeType::Condition)
}
