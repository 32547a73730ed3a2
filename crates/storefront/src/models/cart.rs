//! Cart domain types.

use serde::Serialize;

use tamarind_core::CartEntryId;

use super::Item;

/// A cart entry joined with live catalog data.
///
/// Cart reads always reflect the catalog at read time; only orders freeze
/// prices.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: CartEntryId,
    pub quantity: i32,
    pub item: Item,
}
