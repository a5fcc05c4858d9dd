use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::columns;
use crate::types::{CityLabel, OrderId, ProductName, RawTimestamp};

/// One row of the raw export, prior to screening and validation.
///
/// Fields decode by header name so exports with reordered columns (or
/// without the identifier column) still load. Every field defaults so short
/// rows decode and can be screened instead of aborting the batch.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawRecord {
    /// Export-assigned order identifier; dropped downstream.
    #[serde(rename = "Order ID", default)]
    pub order_id: Option<OrderId>,
    /// Product name text.
    #[serde(rename = "Product", default)]
    pub product: ProductName,
    /// Ordered quantity as exported (text, possibly unclean).
    #[serde(rename = "Quantity Ordered", default)]
    pub quantity_ordered: String,
    /// Unit price as exported (text, possibly unclean).
    #[serde(rename = "Price Each", default)]
    pub price_each: String,
    /// Order timestamp as exported (text, possibly missing century/seconds).
    #[serde(rename = "Order Date", default)]
    pub order_date: RawTimestamp,
    /// Free-text purchase address (`street, city, state zip[, country]`).
    #[serde(rename = "Purchase Address", default)]
    pub purchase_address: String,
}

impl RawRecord {
    /// Returns `true` when every field is blank (an empty export line).
    pub fn is_blank(&self) -> bool {
        self.order_id.as_deref().unwrap_or("").trim().is_empty()
            && self.product.trim().is_empty()
            && self.quantity_ordered.trim().is_empty()
            && self.price_each.trim().is_empty()
            && self.order_date.trim().is_empty()
            && self.purchase_address.trim().is_empty()
    }

    /// Returns `true` when the row is a duplicated header re-appearing as
    /// data (an artifact of concatenated exports).
    pub fn is_repeated_header(&self) -> bool {
        self.product.trim() == columns::PRODUCT
    }

    /// Returns `true` when any required field is missing or empty.
    pub fn has_missing_fields(&self) -> bool {
        self.product.trim().is_empty()
            || self.quantity_ordered.trim().is_empty()
            || self.price_each.trim().is_empty()
            || self.order_date.trim().is_empty()
            || self.purchase_address.trim().is_empty()
    }
}

/// A validated transaction with typed and derived fields.
///
/// Immutable once built; tables of these are shared read-only across view
/// requests.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SalesRecord {
    /// Product name.
    pub product: ProductName,
    /// Ordered quantity, strictly positive.
    pub quantity_ordered: u32,
    /// Unit price, non-negative.
    pub price_each: f64,
    /// Raw order-timestamp text, retained for the detail table.
    pub order_date: RawTimestamp,
    /// Raw purchase address the city was derived from.
    pub purchase_address: String,
    /// Timezone-naive timestamp parsed from the repaired order date.
    pub order_timestamp: NaiveDateTime,
    /// Hour component of the timestamp, 0-23.
    pub hour: u32,
    /// Calendar date component of the timestamp.
    pub date: NaiveDate,
    /// Month component of the timestamp, 1-12.
    pub month: u32,
    /// Revenue for the row: `quantity_ordered * price_each`.
    pub sales_amount: f64,
    /// `"{city}, {state}"` derived from the purchase address.
    pub city: CityLabel,
}
