//! ksqlDB client for the OpenFactory asset registry.
//!
//! Issues pull queries against the `assets` and `assets_type` materialized
//! views over the ksqlDB REST API and exposes them through the
//! [`openfactory_core::registry::Registry`] trait.

pub mod client;
pub mod registry;
pub mod response;
pub mod retry;
pub mod statements;
