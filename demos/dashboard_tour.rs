//! Walk the dashboard views over an export and print renderer payloads.
//!
//! Each view prints its chart parameters plus the aggregated series as
//! JSON, which is exactly what the external chart component consumes.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use salesboard::{
    DashboardConfig, MenuChoice, RawRecord, SalesRecord, TableCache, aggregate, detail_table_for,
    distinct_products, normalize, plan_for,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewArg {
    Home,
    Monthly,
    City,
    Hourly,
    Demand,
    Daily,
    Trend,
}

#[derive(Debug, Parser)]
#[command(
    name = "dashboard_tour",
    disable_help_subcommand = true,
    about = "Print dashboard view payloads as JSON",
    long_about = "Load a sales export (or built-in sample rows), run one or all views, and print the chart configuration and aggregated series each view hands to the renderer."
)]
struct Cli {
    #[arg(
        long,
        value_name = "PATH",
        help = "CSV export to load; built-in sample rows when omitted"
    )]
    source: Option<PathBuf>,
    #[arg(long, value_enum, help = "Single view to render; all views when omitted")]
    view: Option<ViewArg>,
    #[arg(
        long = "product",
        value_name = "NAME",
        help = "Product selection for the trend view, repeat as needed"
    )]
    products: Vec<String>,
}

fn sample_rows() -> Vec<RawRecord> {
    let rows = [
        ("27in Monitor", "2", "150.0", "04/19/19 08:46", "917 1st St, Dallas, TX 75001"),
        ("USB-C Charging Cable", "3", "11.95", "04/19/19 20:15", "14 Pine St, Boston, MA 02215"),
        ("27in Monitor", "1", "150.0", "2019-06-02 11:05:00", "917 1st St, Dallas, TX 75001"),
        ("Wired Headphones", "2", "11.99", "09/30/19 09:27", "669 Spruce St, Los Angeles, CA 90001"),
        ("USB-C Charging Cable", "1", "11.95", "12/28/19 19:14", "381 Wilson St, San Francisco, CA 94016"),
        ("Wired Headphones", "1", "11.99", "12/30/19 21:33", "669 Spruce St, Los Angeles, CA 90001"),
    ];
    rows.into_iter()
        .map(|(product, quantity, price, date, address)| RawRecord {
            order_id: None,
            product: product.to_string(),
            quantity_ordered: quantity.to_string(),
            price_each: price.to_string(),
            order_date: date.to_string(),
            purchase_address: address.to_string(),
        })
        .collect()
}

fn choices_for(view: Option<ViewArg>, products: Vec<String>, table: &[SalesRecord]) -> Vec<MenuChoice> {
    let selection = if products.is_empty() {
        distinct_products(table)
    } else {
        products
    };
    match view {
        Some(ViewArg::Home) => vec![MenuChoice::Home],
        Some(ViewArg::Monthly) => vec![MenuChoice::MonthlySales],
        Some(ViewArg::City) => vec![MenuChoice::CitySales],
        Some(ViewArg::Hourly) => vec![MenuChoice::HourlyVolume],
        Some(ViewArg::Demand) => vec![MenuChoice::ProductDemand],
        Some(ViewArg::Daily) => vec![MenuChoice::DailyTotal],
        Some(ViewArg::Trend) => vec![MenuChoice::ProductTrend(selection)],
        None => vec![
            MenuChoice::Home,
            MenuChoice::MonthlySales,
            MenuChoice::CitySales,
            MenuChoice::HourlyVolume,
            MenuChoice::ProductDemand,
            MenuChoice::ProductTrend(selection),
        ],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let table: Vec<SalesRecord> = match &cli.source {
        Some(path) => TableCache::new().table(path)?.as_ref().clone(),
        None => normalize(&sample_rows()),
    };

    for choice in choices_for(cli.view, cli.products.clone(), &table) {
        let plan = plan_for(&choice);
        let aggregation = aggregate(&table, &plan.view);
        let peak_hour = aggregation.peak_hour;

        println!("## {}", choice.label());
        let payload = serde_json::json!({
            "chart": plan.chart,
            "data": aggregation,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);

        if let Some(peak) = peak_hour {
            println!("The peak purchasing time is {peak}h");
        }
        if plan.with_detail_table {
            let mut rng = rand::rng();
            let detail = detail_table_for(&table, &DashboardConfig::default(), &mut rng);
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
    }
    Ok(())
}
