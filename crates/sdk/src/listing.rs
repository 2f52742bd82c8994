//! Listing and inspection operations.
//!
//! Each operation is a single read pass over the registry: enumerate the
//! relevant UUIDs, load each asset, derive its display row. Rows follow
//! the registry's enumeration order. Per-asset anomalies (missing
//! attributes, odd availability values) end up as visible row values;
//! only registry failures are returned as errors.

use serde::Serialize;

use openfactory_core::asset::Asset;
use openfactory_core::asset_type::{AssetType, TypeFilter};
use openfactory_core::attributes::{AttributeRow, AttributeType};
use openfactory_core::availability::AvailabilityStatus;
use openfactory_core::references::{ChildRole, Deployment};
use openfactory_core::registry::{Registry, RegistryError};
use openfactory_core::types::AssetUuid;

/// One line of the device listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRow {
    pub uuid: AssetUuid,
    pub availability: AvailabilityStatus,
    pub agent: Deployment,
    pub producer: Deployment,
    pub supervisor: Deployment,
}

/// One line of the application listing. Missing fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationRow {
    pub uuid: AssetUuid,
    pub availability: AvailabilityStatus,
    pub manufacturer: String,
    pub version: String,
    pub license: String,
}

/// One line of the generic asset listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRow {
    pub uuid: AssetUuid,
    pub availability: AvailabilityStatus,
    pub asset_type: String,
    pub docker_service: String,
}

/// Samples, events and conditions of one asset, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub uuid: AssetUuid,
    pub rows: Vec<AttributeRow>,
}

impl Inspection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count(&self, attribute_type: &AttributeType) -> usize {
        self.rows
            .iter()
            .filter(|r| &r.attribute_type == attribute_type)
            .count()
    }
}

/// Rows that can be ordered by asset UUID.
pub trait HasUuid {
    fn uuid(&self) -> &AssetUuid;
}

macro_rules! impl_has_uuid {
    ($($ty:ty),*) => {
        $(impl HasUuid for $ty {
            fn uuid(&self) -> &AssetUuid {
                &self.uuid
            }
        })*
    };
}

impl_has_uuid!(DeviceRow, ApplicationRow, AssetRow);

/// Sort listing rows by UUID, for output independent of registry order.
pub fn sort_by_uuid<T: HasUuid>(rows: &mut [T]) {
    rows.sort_by(|a, b| a.uuid().cmp(b.uuid()));
}

/// Every device with its availability and the deployment state of its
/// agent, producer and supervisor.
pub async fn list_devices(registry: &dyn Registry) -> Result<Vec<DeviceRow>, RegistryError> {
    let uuids = registry.fetch_all(TypeFilter::Device).await?;
    let mut rows = Vec::with_capacity(uuids.len());

    for uuid in uuids {
        let device = Asset::fetch_as(registry, &uuid, AssetType::Device).await?;
        let references = device.references_below(registry).await?;
        tracing::debug!(
            asset_uuid = %uuid,
            references = references.referencing().len(),
            "Loaded device",
        );

        let [agent, producer, supervisor] = ChildRole::ALL.map(|role| references.deployment(role));
        rows.push(DeviceRow {
            availability: device.availability(),
            uuid,
            agent,
            producer,
            supervisor,
        });
    }

    Ok(rows)
}

/// Every application with its availability, vendor, version and license.
pub async fn list_applications(
    registry: &dyn Registry,
) -> Result<Vec<ApplicationRow>, RegistryError> {
    let uuids = registry.fetch_all(TypeFilter::Application).await?;
    let mut rows = Vec::with_capacity(uuids.len());

    for uuid in uuids {
        let app = Asset::fetch_as(registry, &uuid, AssetType::Application).await?;
        tracing::debug!(asset_uuid = %uuid, attributes = app.attributes().len(), "Loaded app");

        rows.push(ApplicationRow {
            availability: app.availability(),
            manufacturer: app.manufacturer().unwrap_or_default().to_string(),
            version: app.version().unwrap_or_default().to_string(),
            license: app.license().unwrap_or_default().to_string(),
            uuid,
        });
    }

    Ok(rows)
}

/// Every asset with its availability (read from the attribute its type
/// dictates), type tag and Docker service.
pub async fn list_assets(registry: &dyn Registry) -> Result<Vec<AssetRow>, RegistryError> {
    let uuids = registry.fetch_all(TypeFilter::Any).await?;
    let mut rows = Vec::with_capacity(uuids.len());

    for uuid in uuids {
        let asset = Asset::fetch(registry, &uuid).await?;
        tracing::debug!(
            asset_uuid = %uuid,
            asset_type = %asset.asset_type(),
            "Loaded asset",
        );

        rows.push(AssetRow {
            availability: asset.availability(),
            asset_type: asset.asset_type().to_string(),
            docker_service: asset.docker_service().unwrap_or_default().to_string(),
            uuid,
        });
    }

    Ok(rows)
}

/// All samples, events and conditions of one asset. An unknown UUID
/// yields an empty inspection.
pub async fn inspect(
    registry: &dyn Registry,
    uuid: &AssetUuid,
) -> Result<Inspection, RegistryError> {
    let asset = Asset::fetch_as(registry, uuid, AssetType::Unknown).await?;
    if asset.is_empty() {
        tracing::info!(asset_uuid = %uuid, "No attributes found for asset");
    }

    let rows = asset
        .samples()
        .into_iter()
        .chain(asset.events())
        .chain(asset.conditions())
        .cloned()
        .collect();

    Ok(Inspection {
        uuid: uuid.clone(),
        rows,
    })
}
