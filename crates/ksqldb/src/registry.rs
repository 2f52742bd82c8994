//! [`Registry`] implementation backed by ksqlDB pull queries.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::Value;

use openfactory_core::asset_type::TypeFilter;
use openfactory_core::attributes::{AttributeRow, AttributeType};
use openfactory_core::registry::{Registry, RegistryError};
use openfactory_core::types::AssetUuid;

use crate::client::{KsqlClient, KsqlError};
use crate::response::column_text;
use crate::statements;

impl From<KsqlError> for RegistryError {
    fn from(err: KsqlError) -> Self {
        match err {
            KsqlError::Request(_) => RegistryError::Unavailable(err.to_string()),
            KsqlError::Api { status, .. } if status >= 500 => {
                RegistryError::Unavailable(err.to_string())
            }
            other => RegistryError::Query(other.to_string()),
        }
    }
}

#[async_trait]
impl Registry for KsqlClient {
    async fn fetch_attributes(&self, uuid: &AssetUuid) -> Result<Vec<AttributeRow>, RegistryError> {
        let result = self
            .pull_query(&statements::select_attributes(uuid))
            .await?;
        Ok(decode_attribute_rows(uuid, &result.rows))
    }

    async fn fetch_all(&self, filter: TypeFilter) -> Result<Vec<AssetUuid>, RegistryError> {
        let result = self
            .pull_query(&statements::select_asset_uuids(filter))
            .await?;
        Ok(decode_uuid_rows(&result.rows))
    }

    async fn fetch_referencing_uuids(
        &self,
        uuid: &AssetUuid,
    ) -> Result<BTreeSet<AssetUuid>, RegistryError> {
        let result = self
            .pull_query(&statements::select_references_below(uuid))
            .await?;
        let Some(row) = result.rows.first() else {
            return Ok(BTreeSet::new());
        };
        let raw = column_text(row, 0)?;
        Ok(parse_reference_list(&raw))
    }

    async fn fetch_asset_type(&self, uuid: &AssetUuid) -> Result<Option<String>, RegistryError> {
        let result = self
            .pull_query(&statements::select_asset_type(uuid))
            .await?;
        let Some(row) = result.rows.first() else {
            return Ok(None);
        };
        let raw = column_text(row, 0)?;
        Ok(Some(raw).filter(|t| !t.is_empty()))
    }
}

/// Decode `ID, VALUE, TAG, TYPE` rows. Malformed rows are logged and
/// skipped so one bad attribute never hides the rest of the asset.
fn decode_attribute_rows(uuid: &AssetUuid, rows: &[Vec<Value>]) -> Vec<AttributeRow> {
    rows.iter()
        .filter_map(|row| match decode_attribute_row(row) {
            Ok(attr) => Some(attr),
            Err(e) => {
                tracing::warn!(asset_uuid = %uuid, error = %e, "Skipping malformed attribute row");
                None
            }
        })
        .collect()
}

fn decode_attribute_row(row: &[Value]) -> Result<AttributeRow, KsqlError> {
    Ok(AttributeRow {
        id: column_text(row, 0)?,
        value: column_text(row, 1)?,
        tag: column_text(row, 2)?,
        attribute_type: AttributeType::from_registry(&column_text(row, 3)?),
    })
}

fn decode_uuid_rows(rows: &[Vec<Value>]) -> Vec<AssetUuid> {
    rows.iter()
        .filter_map(|row| column_text(row, 0).ok())
        .filter_map(|raw| AssetUuid::parse(&raw).ok())
        .collect()
}

/// Split a comma-separated `references_below` value, dropping blanks.
fn parse_reference_list(raw: &str) -> BTreeSet<AssetUuid> {
    raw.split(',')
        .filter_map(|part| AssetUuid::parse(part).ok())
        .collect()
}
