//! Field coercion and derived-field computation.
//!
//! Timestamp handling is a two-step policy: detect the shape of the raw
//! text, repair it into canonical form (expand two-digit years, pad missing
//! seconds), then parse with one fixed format per shape. Both the
//! "already clean" and "needs repair" export variants go through the same
//! path, so no control flow branches on parse exceptions.

use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::debug;

use crate::constants::calendar::ASSUMED_CENTURY;
use crate::errors::RowError;
use crate::record::{RawRecord, SalesRecord};
use crate::types::CityLabel;

/// Shape of a raw timestamp, detected before any repair is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimestampShape {
    /// `MM/DD/YY HH:MM` or `MM/DD/YYYY HH:MM[:SS]`, slash-delimited exports.
    SlashDelimited,
    /// `YYYY-MM-DD HH:MM[:SS]`, already ISO-like.
    IsoLike,
}

/// Detect which repair rules apply to a raw timestamp.
pub fn detect_shape(raw: &str) -> TimestampShape {
    if raw.contains('/') {
        TimestampShape::SlashDelimited
    } else {
        TimestampShape::IsoLike
    }
}

/// Parse a raw order timestamp, repairing known export defects first.
///
/// Two-digit years are expanded into the 2000s and a missing seconds (or
/// whole time-of-day) component is padded with zeros before parsing.
pub fn parse_order_timestamp(raw: &str) -> Result<NaiveDateTime, RowError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RowError::MalformedDate(raw.to_string()));
    }
    let shape = detect_shape(trimmed);
    let repaired = repair(trimmed, shape).ok_or_else(|| RowError::MalformedDate(raw.to_string()))?;
    let format = match shape {
        TimestampShape::SlashDelimited => "%m/%d/%Y %H:%M:%S",
        TimestampShape::IsoLike => "%Y-%m-%d %H:%M:%S",
    };
    NaiveDateTime::parse_from_str(&repaired, format)
        .map_err(|_| RowError::MalformedDate(raw.to_string()))
}

/// Rewrite `raw` into the canonical text for its shape, or `None` when the
/// layout is beyond repair.
fn repair(raw: &str, shape: TimestampShape) -> Option<String> {
    let mut parts = raw.split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next().unwrap_or("00:00:00");
    if parts.next().is_some() {
        return None;
    }
    let date = match shape {
        TimestampShape::SlashDelimited => expand_two_digit_year(date_part)?,
        TimestampShape::IsoLike => date_part.to_string(),
    };
    Some(format!("{date} {}", pad_time(time_part)))
}

/// Expand `MM/DD/YY` into `MM/DD/YYYY`, assuming the 2000s.
fn expand_two_digit_year(date_part: &str) -> Option<String> {
    let segments: Vec<&str> = date_part.split('/').collect();
    let [month, day, year] = segments.as_slice() else {
        return None;
    };
    match year.len() {
        2 => {
            let short: i32 = year.parse().ok()?;
            Some(format!("{month}/{day}/{}", ASSUMED_CENTURY + short))
        }
        4 => Some(date_part.to_string()),
        _ => None,
    }
}

/// Zero-pad a time-of-day down to full `HH:MM:SS` precision.
fn pad_time(time_part: &str) -> String {
    match time_part.matches(':').count() {
        0 => format!("{time_part}:00:00"),
        1 => format!("{time_part}:00"),
        _ => time_part.to_string(),
    }
}

/// Derive `"{city}, {state}"` from a free-text purchase address.
///
/// The city is the second comma-separated segment; the state code is the
/// first whitespace-delimited token of the third segment.
pub fn derive_city(address: &str) -> Result<CityLabel, RowError> {
    let segments: Vec<&str> = address.split(',').collect();
    if segments.len() < 3 {
        return Err(RowError::MalformedAddress(address.to_string()));
    }
    let city = segments[1].trim();
    let state = segments[2].split_whitespace().next().unwrap_or("");
    if city.is_empty() || state.is_empty() {
        return Err(RowError::MalformedAddress(address.to_string()));
    }
    Ok(format!("{city}, {state}"))
}

/// Validate one screened row into a `SalesRecord`.
pub fn normalize_row(row: &RawRecord) -> Result<SalesRecord, RowError> {
    let quantity: u32 = row
        .quantity_ordered
        .trim()
        .parse()
        .map_err(|_| RowError::BadQuantity(row.quantity_ordered.clone()))?;
    if quantity == 0 {
        return Err(RowError::BadQuantity(row.quantity_ordered.clone()));
    }
    let price: f64 = row
        .price_each
        .trim()
        .parse()
        .map_err(|_| RowError::BadPrice(row.price_each.clone()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(RowError::BadPrice(row.price_each.clone()));
    }
    let order_timestamp = parse_order_timestamp(&row.order_date)?;
    let city = derive_city(&row.purchase_address)?;
    // Revenue is only computed once both numeric fields validated.
    let sales_amount = f64::from(quantity) * price;
    Ok(SalesRecord {
        product: row.product.trim().to_string(),
        quantity_ordered: quantity,
        price_each: price,
        order_date: row.order_date.clone(),
        purchase_address: row.purchase_address.clone(),
        hour: order_timestamp.hour(),
        date: order_timestamp.date(),
        month: order_timestamp.date().month(),
        order_timestamp,
        sales_amount,
        city,
    })
}

/// Per-batch normalization drop accounting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Rows handed to the normalizer.
    pub rows_in: usize,
    /// Rows dropped for an unparseable timestamp.
    pub malformed_dates: usize,
    /// Rows dropped for an underspecified purchase address.
    pub malformed_addresses: usize,
    /// Rows dropped for a non-numeric quantity or price.
    pub bad_numbers: usize,
}

impl NormalizeStats {
    /// Rows dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.malformed_dates + self.malformed_addresses + self.bad_numbers
    }
}

/// A normalized batch plus its drop accounting.
#[derive(Clone, Debug)]
pub struct NormalizedBatch {
    /// Records that validated, in source order.
    pub records: Vec<SalesRecord>,
    /// Per-reason drop counters.
    pub stats: NormalizeStats,
}

/// Normalize a batch, reporting per-reason drop counts.
///
/// Pure over its input: calling this twice on the same rows yields
/// identical output.
pub fn normalize_with_stats(rows: &[RawRecord]) -> NormalizedBatch {
    let mut records = Vec::with_capacity(rows.len());
    let mut stats = NormalizeStats::default();
    for row in rows {
        stats.rows_in += 1;
        match normalize_row(row) {
            Ok(record) => records.push(record),
            Err(err) => {
                match err {
                    RowError::MalformedDate(_) => stats.malformed_dates += 1,
                    RowError::MalformedAddress(_) => stats.malformed_addresses += 1,
                    RowError::BadQuantity(_) | RowError::BadPrice(_) => stats.bad_numbers += 1,
                }
                debug!(%err, "dropping row that failed validation");
            }
        }
    }
    NormalizedBatch { records, stats }
}

/// Normalize a batch, dropping any row that fails validation.
pub fn normalize(rows: &[RawRecord]) -> Vec<SalesRecord> {
    normalize_with_stats(rows).records
}
