//! Pull-query statements against the OpenFactory materialized views.

use openfactory_core::asset_type::TypeFilter;
use openfactory_core::attributes::KEY_REFERENCES_BELOW;
use openfactory_core::types::AssetUuid;

/// Current attribute values, keyed by `ASSET_UUID|ID`.
pub const ASSETS_TABLE: &str = "assets";

/// One row per asset with its type tag and Docker service.
pub const ASSETS_TYPE_TABLE: &str = "assets_type";

/// Render a string literal, doubling embedded single quotes.
pub fn quote(literal: &str) -> String {
    format!("'{}'", literal.replace('\'', "''"))
}

/// `ID, VALUE, TAG, TYPE` of every attribute of one asset.
pub fn select_attributes(uuid: &AssetUuid) -> String {
    format!(
        "SELECT ID, VALUE, TAG, TYPE FROM {ASSETS_TABLE} WHERE ASSET_UUID={};",
        quote(uuid.as_str())
    )
}

/// UUIDs of all assets, optionally restricted to one type.
pub fn select_asset_uuids(filter: TypeFilter) -> String {
    match filter.type_tag() {
        Some(tag) => format!(
            "SELECT ASSET_UUID FROM {ASSETS_TYPE_TABLE} WHERE TYPE={};",
            quote(tag)
        ),
        None => format!("SELECT ASSET_UUID FROM {ASSETS_TYPE_TABLE};"),
    }
}

pub fn select_asset_type(uuid: &AssetUuid) -> String {
    format!(
        "SELECT TYPE FROM {ASSETS_TYPE_TABLE} WHERE ASSET_UUID={};",
        quote(uuid.as_str())
    )
}

/// The `references_below` attribute, looked up by its composite key.
pub fn select_references_below(uuid: &AssetUuid) -> String {
    let key = format!("{}|{KEY_REFERENCES_BELOW}", uuid.as_str());
    format!(
        "SELECT VALUE FROM {ASSETS_TABLE} WHERE KEY={};",
        quote(&key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(s: &str) -> AssetUuid {
        AssetUuid::parse(s).unwrap()
    }

    #[test]
    fn quote_escapes_single_quotes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("o'brien"), "'o''brien'");
        assert_eq!(quote("x' OR '1'='1"), "'x'' OR ''1''=''1'");
    }

    #[test]
    fn attributes_statement() {
        assert_eq!(
            select_attributes(&uuid("PROVER3018")),
            "SELECT ID, VALUE, TAG, TYPE FROM assets WHERE ASSET_UUID='PROVER3018';"
        );
    }

    #[test]
    fn asset_uuid_statements_by_filter() {
        assert_eq!(
            select_asset_uuids(TypeFilter::Device),
            "SELECT ASSET_UUID FROM assets_type WHERE TYPE='Device';"
        );
        assert_eq!(
            select_asset_uuids(TypeFilter::Application),
            "SELECT ASSET_UUID FROM assets_type WHERE TYPE='OpenFactoryApp';"
        );
        assert_eq!(
            select_asset_uuids(TypeFilter::Any),
            "SELECT ASSET_UUID FROM assets_type;"
        );
    }

    #[test]
    fn references_statement_uses_composite_key() {
        assert_eq!(
            select_references_below(&uuid("D")),
            "SELECT VALUE FROM assets WHERE KEY='D|references_below';"
        );
    }

    #[test]
    fn asset_type_statement() {
        assert_eq!(
            select_asset_type(&uuid("D-AGENT")),
            "SELECT TYPE FROM assets_type WHERE ASSET_UUID='D-AGENT';"
        );
    }
}
