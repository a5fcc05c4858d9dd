use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use salesboard::{
    CsvFileSource, MenuChoice, PipelineError, RecordSource, SeriesKey, TableCache, ViewKind,
    aggregate, detail_table_for, normalize_with_stats, plan_for, DashboardConfig,
};

/// A concatenated-export fixture: clean and needs-repair timestamps, a
/// commas-only line, a duplicated header row, and one row per drop reason.
const MESSY_EXPORT: &str = "\
Order ID,Product,Quantity Ordered,Price Each,Order Date,Purchase Address
176558,USB-C Charging Cable,2,11.95,04/19/19 08:46,\"917 1st St, Dallas, TX 75001\"
176559,27in Monitor,1,150.0,2019-04-19 22:30:00,\"14 Pine St, Boston, MA 02215\"
,,,,,
Order ID,Product,Quantity Ordered,Price Each,Order Date,Purchase Address
176560,Wired Headphones,2,11.99,12/30/19 09:27,\"381 Wilson St, San Francisco, CA 94016\"
176561,Widget,1,5.0,someday,\"1 A St, Austin, TX 73301\"
176562,Widget,1,5.0,04/20/19 10:00,plain address without commas
176563,Widget,zero,5.0,04/20/19 10:00,\"1 B St, Austin, TX 73301\"
176564,Widget,1,,04/20/19 10:00,\"1 C St, Austin, TX 73301\"
";

fn write_export(dir: &Path) -> PathBuf {
    let path = dir.join("sales_data.csv");
    fs::write(&path, MESSY_EXPORT).unwrap();
    path
}

#[test]
fn messy_export_loads_with_per_reason_accounting() {
    let dir = TempDir::new().unwrap();
    let source = CsvFileSource::new(write_export(dir.path()));

    let batch = source.load().unwrap();
    assert_eq!(batch.stats.rows_read, 9);
    assert_eq!(batch.stats.blank_rows, 1);
    assert_eq!(batch.stats.repeated_headers, 1);
    assert_eq!(batch.stats.unreadable_rows, 1);
    assert_eq!(batch.rows.len(), 6);

    let normalized = normalize_with_stats(&batch.rows);
    assert_eq!(normalized.stats.malformed_dates, 1);
    assert_eq!(normalized.stats.malformed_addresses, 1);
    assert_eq!(normalized.stats.bad_numbers, 1);
    assert_eq!(normalized.records.len(), 3);
}

#[test]
fn views_reflect_only_the_valid_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_export(dir.path());
    let cache = TableCache::new();
    let table = cache.table(&path).unwrap();
    assert_eq!(table.len(), 3);

    let expected_total = 2.0 * 11.95 + 150.0 + 2.0 * 11.99;
    let monthly = aggregate(&table, &ViewKind::MonthlySales);
    let monthly_total: f64 = monthly.series[0].points.iter().map(|p| p.value).sum();
    assert!((monthly_total - expected_total).abs() < 1e-9);
    assert!((monthly.series[0].points[3].value - (2.0 * 11.95 + 150.0)).abs() < 1e-9);

    let cities = aggregate(&table, &ViewKind::CitySales);
    let labels: Vec<_> = cities.series[0]
        .points
        .iter()
        .map(|point| point.key.clone())
        .collect();
    assert_eq!(
        labels,
        vec![
            SeriesKey::Category("Dallas, TX".to_string()),
            SeriesKey::Category("Boston, MA".to_string()),
            SeriesKey::Category("San Francisco, CA".to_string()),
        ]
    );

    // One transaction each at 8, 22, and 9: the tie resolves to hour 8.
    let hourly = aggregate(&table, &ViewKind::HourlyVolume);
    assert_eq!(hourly.peak_hour, Some(8));
}

#[test]
fn cache_shares_tables_until_invalidated() {
    let dir = TempDir::new().unwrap();
    let path = write_export(dir.path());
    let cache = TableCache::new();

    let first = cache.table(&path).unwrap();
    let second = cache.table(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    cache.invalidate(&path.to_string_lossy());
    let third = cache.table(&path).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[test]
fn unreadable_source_surfaces_a_fatal_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("not_exported.csv");

    let cache = TableCache::new();
    let err = cache.table(&missing).unwrap_err();
    assert!(matches!(err, PipelineError::DataSource { .. }));

    let source = CsvFileSource::new(&missing);
    assert!(matches!(
        source.load(),
        Err(PipelineError::DataSource { .. })
    ));
}

#[test]
fn home_plan_produces_daily_series_and_detail_table() {
    let dir = TempDir::new().unwrap();
    let path = write_export(dir.path());
    let table = TableCache::new().table(&path).unwrap();

    let plan = plan_for(&MenuChoice::Home);
    assert!(plan.with_detail_table);
    let aggregation = aggregate(&table, &plan.view);
    let dates: Vec<_> = aggregation.series[0]
        .points
        .iter()
        .map(|point| point.key.clone())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by_key(|key| match key {
        SeriesKey::Date(date) => *date,
        _ => unreachable!("home view is date-keyed"),
    });
    assert_eq!(dates, sorted);

    let mut rng = StdRng::from_seed([7_u8; 32]);
    let detail = detail_table_for(&table, &DashboardConfig::default(), &mut rng);
    assert_eq!(
        detail.headers,
        ["Product", "Qty", "Price", "Order Date", "City"]
    );
    assert_eq!(detail.rows.len(), 3);
    // The raw order-date text survives into the table unchanged.
    assert!(detail.rows.iter().any(|row| row.order_date == "04/19/19 08:46"));
}

#[test]
fn renderer_payload_serializes_with_plain_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_export(dir.path());
    let table = TableCache::new().table(&path).unwrap();

    let plan = plan_for(&MenuChoice::MonthlySales);
    let payload = serde_json::to_value(aggregate(&table, &plan.view)).unwrap();
    assert_eq!(payload["series"][0]["points"][0]["key"], "January");
    assert_eq!(payload["series"][0]["points"][0]["value"], 0.0);

    let chart = serde_json::to_value(&plan.chart).unwrap();
    assert_eq!(chart["x_label"], "Months");
    assert_eq!(chart["x_axis"], "Categorical");
    assert_eq!(chart["tooltips"][0]["label"], "Month");

    let hourly = serde_json::to_value(aggregate(&table, &ViewKind::HourlyVolume)).unwrap();
    assert_eq!(hourly["peak_hour"], 8);
    assert_eq!(hourly["series"][0]["points"][8]["key"], 8);

    let daily = serde_json::to_value(aggregate(&table, &ViewKind::DailyTotal)).unwrap();
    assert_eq!(daily["series"][0]["points"][0]["key"], "2019-04-19");
    assert!(daily.get("peak_hour").is_none());
}
