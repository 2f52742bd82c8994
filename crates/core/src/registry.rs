//! Query capability of the asset registry.
//!
//! The registry is an external streaming store exposing the current
//! attribute state of every asset. Implementations are read-only and safe
//! to call repeatedly; a single handle is shared across all operations of
//! one process.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::asset_type::TypeFilter;
use crate::attributes::AttributeRow;
use crate::types::AssetUuid;

/// Errors surfaced by a [`Registry`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The backing query engine cannot be reached.
    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    /// The engine was reached but rejected or failed the query.
    #[error("Registry query failed: {0}")]
    Query(String),
}

#[async_trait]
pub trait Registry: Send + Sync {
    /// Current attribute rows of one asset, in registry order.
    ///
    /// An unknown UUID yields an empty vector, not an error.
    async fn fetch_attributes(&self, uuid: &AssetUuid) -> Result<Vec<AttributeRow>, RegistryError>;

    /// UUIDs of all assets matching `filter`, in registry order.
    async fn fetch_all(&self, filter: TypeFilter) -> Result<Vec<AssetUuid>, RegistryError>;

    /// UUIDs of the assets currently referencing `uuid`.
    async fn fetch_referencing_uuids(
        &self,
        uuid: &AssetUuid,
    ) -> Result<BTreeSet<AssetUuid>, RegistryError>;

    /// Raw type tag of an asset, or `None` when the registry has no type
    /// row for it.
    async fn fetch_asset_type(&self, uuid: &AssetUuid) -> Result<Option<String>, RegistryError>;
}
