//! Aggregation views and series construction.
//!
//! Every view is a pure reduction over an immutable normalized table:
//! repeatable, state-free, and safe to compute concurrently with other
//! views over the same shared table. A single dispatch over the tagged
//! `ViewKind` replaces per-menu duplicated grouping code.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::constants::calendar::{HOURS_PER_DAY, MONTH_NAMES};
use crate::record::SalesRecord;
use crate::types::{CityLabel, ProductName};

/// The six supported aggregation modes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Total sales per calendar month, January through December.
    MonthlySales,
    /// Total sales per derived city, in first-seen order.
    CitySales,
    /// Transaction count per hour of day, 0 through 23.
    HourlyVolume,
    /// Transaction count per product with a normalized popularity weight.
    ProductDemand,
    /// Total sales per calendar date, ascending.
    DailyTotal,
    /// One daily-sales trace per requested product, in caller order.
    ProductTrend(Vec<ProductName>),
}

/// X-axis position of a series point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesKey {
    /// Categorical axis entry (month name, city, or product).
    Category(String),
    /// Linear hour-of-day axis entry.
    Hour(u32),
    /// Datetime axis entry.
    Date(NaiveDate),
}

/// One aggregated point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Axis position.
    pub key: SeriesKey,
    /// Aggregated value (revenue sum or transaction count).
    pub value: f64,
    /// Normalized popularity weight in (0, 1]; product demand only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl SeriesPoint {
    fn new(key: SeriesKey, value: f64) -> Self {
        Self {
            key,
            value,
            radius: None,
        }
    }
}

/// One named, ordered trace of aggregated points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    /// Legend label for the trace.
    pub label: String,
    /// Points in axis order.
    pub points: Vec<SeriesPoint>,
}

/// Aggregated output for one view, consumed by the chart renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Aggregation {
    /// Traces in legend order; empty for an empty trend selection.
    pub series: Vec<Series>,
    /// Hour with the highest transaction count; ties resolve to the
    /// smallest hour. Present for `HourlyVolume` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<u32>,
}

impl Aggregation {
    fn single(series: Series) -> Self {
        Self {
            series: vec![series],
            peak_hour: None,
        }
    }
}

/// Reduce a normalized table into the series for `view`.
pub fn aggregate(records: &[SalesRecord], view: &ViewKind) -> Aggregation {
    match view {
        ViewKind::MonthlySales => monthly_sales(records),
        ViewKind::CitySales => city_sales(records),
        ViewKind::HourlyVolume => hourly_volume(records),
        ViewKind::ProductDemand => product_demand(records),
        ViewKind::DailyTotal => daily_total(records),
        ViewKind::ProductTrend(products) => product_trend(records, products),
    }
}

/// Distinct product names in first-seen order, backing the trend selector.
pub fn distinct_products(records: &[SalesRecord]) -> Vec<ProductName> {
    let mut products: IndexSet<ProductName> = IndexSet::new();
    for record in records {
        if !products.contains(&record.product) {
            products.insert(record.product.clone());
        }
    }
    products.into_iter().collect()
}

fn monthly_sales(records: &[SalesRecord]) -> Aggregation {
    // Fixed 12-slot axis: months without transactions stay at zero.
    let mut totals = [0.0_f64; 12];
    for record in records {
        totals[(record.month - 1) as usize] += record.sales_amount;
    }
    let points = totals
        .iter()
        .zip(MONTH_NAMES)
        .map(|(total, name)| SeriesPoint::new(SeriesKey::Category(name.to_string()), *total))
        .collect();
    Aggregation::single(Series {
        label: "Monthly sales".to_string(),
        points,
    })
}

fn city_sales(records: &[SalesRecord]) -> Aggregation {
    let mut totals: IndexMap<CityLabel, f64> = IndexMap::new();
    for record in records {
        *totals.entry(record.city.clone()).or_insert(0.0) += record.sales_amount;
    }
    let points = totals
        .into_iter()
        .map(|(city, total)| SeriesPoint::new(SeriesKey::Category(city), total))
        .collect();
    Aggregation::single(Series {
        label: "City sales".to_string(),
        points,
    })
}

fn hourly_volume(records: &[SalesRecord]) -> Aggregation {
    // Fixed 24-slot axis: hours without transactions stay at zero.
    let mut counts = [0_u64; HOURS_PER_DAY as usize];
    for record in records {
        counts[record.hour as usize] += 1;
    }
    let points = counts
        .iter()
        .enumerate()
        .map(|(hour, count)| SeriesPoint::new(SeriesKey::Hour(hour as u32), *count as f64))
        .collect();

    // Strict-greater scan from hour 0 upward, so ties keep the smallest hour.
    let mut peak_hour = 0_u32;
    let mut peak_count = counts[0];
    for (hour, count) in counts.iter().enumerate().skip(1) {
        if *count > peak_count {
            peak_count = *count;
            peak_hour = hour as u32;
        }
    }

    Aggregation {
        series: vec![Series {
            label: "Hourly transactions".to_string(),
            points,
        }],
        peak_hour: Some(peak_hour),
    }
}

fn product_demand(records: &[SalesRecord]) -> Aggregation {
    let mut counts: IndexMap<ProductName, u64> = IndexMap::new();
    for record in records {
        *counts.entry(record.product.clone()).or_insert(0) += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(0);
    let points = counts
        .into_iter()
        .map(|(product, count)| SeriesPoint {
            key: SeriesKey::Category(product),
            value: count as f64,
            radius: Some(count as f64 / max_count as f64),
        })
        .collect();
    Aggregation::single(Series {
        label: "Product demand".to_string(),
        points,
    })
}

fn daily_total(records: &[SalesRecord]) -> Aggregation {
    Aggregation::single(Series {
        label: "Daily sales".to_string(),
        points: daily_points(records.iter()),
    })
}

fn product_trend(records: &[SalesRecord], products: &[ProductName]) -> Aggregation {
    let series = products
        .iter()
        .map(|product| Series {
            label: product.clone(),
            points: daily_points(records.iter().filter(|record| &record.product == product)),
        })
        .collect();
    Aggregation {
        series,
        peak_hour: None,
    }
}

/// Sum sales per calendar date, ascending.
fn daily_points<'a>(records: impl Iterator<Item = &'a SalesRecord>) -> Vec<SeriesPoint> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(0.0) += record.sales_amount;
    }
    totals
        .into_iter()
        .map(|(date, total)| SeriesPoint::new(SeriesKey::Date(date), total))
        .collect()
}
