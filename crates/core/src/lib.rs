//! Domain model for inspecting OpenFactory assets.
//!
//! Everything here is a read-only projection of the asset registry. The
//! crate has no network dependencies; the registry is reached through the
//! [`registry::Registry`] trait, implemented by the ksqlDB client crate.

pub mod asset;
pub mod asset_type;
pub mod attributes;
pub mod availability;
pub mod error;
pub mod references;
pub mod registry;
pub mod types;
