//! `openfactory-sdk` library crate.
//!
//! Read-only listing and inspection of assets deployed on a local
//! OpenFactory infrastructure. The binary entrypoint lives in `main.rs`;
//! the modules are exposed for integration testing.

pub mod config;
pub mod listing;
pub mod render;
