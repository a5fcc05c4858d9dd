//! View-selection boundary: menu choices, chart parameters, detail tables.
//!
//! Nothing here aggregates. The module maps a user-facing menu choice onto
//! one `ViewKind` plus the chart configuration the external renderer
//! consumes, and projects the optional home-view detail table.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::aggregate::ViewKind;
use crate::config::DashboardConfig;
use crate::constants::views::DETAIL_HEADERS;
use crate::record::SalesRecord;
use crate::types::{CityLabel, ProductName, RawTimestamp};

/// Sidebar menu options, one per supported view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Default composite view: daily totals plus an optional detail table.
    Home,
    /// Best and worst months for sales.
    MonthlySales,
    /// Highest- and lowest-earning cities.
    CitySales,
    /// Peak purchasing time profile.
    HourlyVolume,
    /// Per-product demand with popularity-sized markers.
    ProductDemand,
    /// Daily sales time series.
    DailyTotal,
    /// Trend comparison across the given products.
    ProductTrend(Vec<ProductName>),
}

impl MenuChoice {
    /// Sidebar label shown for this choice.
    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Home => "Home",
            MenuChoice::MonthlySales => "What were the best and worst months for sales?",
            MenuChoice::CitySales => "Which cities had the highest and lowest sales?",
            MenuChoice::HourlyVolume => "What is the peak purchasing time?",
            MenuChoice::ProductDemand => "What is the demand for each product?",
            MenuChoice::DailyTotal | MenuChoice::ProductTrend(_) => "Sales trend analysis",
        }
    }
}

/// X-axis flavor the renderer should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AxisKind {
    /// Discrete labeled categories.
    Categorical,
    /// Continuous numeric axis.
    Linear,
    /// Continuous datetime axis.
    DateTime,
}

/// Color palette family assigned to a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Palette {
    /// Twelve-color paired palette for small category counts.
    Paired,
    /// Twenty-color palette for product-scale category counts.
    Category20,
}

/// One tooltip line: display label plus the series field it reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    /// Label shown to the user.
    pub label: &'static str,
    /// Series field backing the value, `$`-prefixed for currency display.
    pub field: &'static str,
}

/// Renderer-facing chart parameters for one view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Optional chart title.
    pub title: Option<&'static str>,
    /// X-axis label.
    pub x_label: &'static str,
    /// Y-axis label.
    pub y_label: &'static str,
    /// Render height in pixels.
    pub height: u32,
    /// X-axis flavor.
    pub x_axis: AxisKind,
    /// Whether category labels render vertically.
    pub vertical_x_labels: bool,
    /// Palette family for trace coloring.
    pub palette: Palette,
    /// Tooltip lines in display order.
    pub tooltips: Vec<Tooltip>,
}

/// Everything the shell needs to render one menu choice.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewPlan {
    /// Aggregation to run.
    pub view: ViewKind,
    /// Chart parameters for the renderer.
    pub chart: ChartSpec,
    /// Whether the plan offers the optional detail table (home only).
    pub with_detail_table: bool,
}

/// Map a menu choice onto its aggregation call and chart parameters.
pub fn plan_for(choice: &MenuChoice) -> ViewPlan {
    match choice {
        MenuChoice::Home => ViewPlan {
            view: ViewKind::DailyTotal,
            chart: ChartSpec {
                title: None,
                x_label: "Date",
                y_label: "Sales",
                height: 300,
                x_axis: AxisKind::DateTime,
                vertical_x_labels: false,
                palette: Palette::Paired,
                tooltips: vec![Tooltip {
                    label: "Sales",
                    field: "$value",
                }],
            },
            with_detail_table: true,
        },
        MenuChoice::MonthlySales => ViewPlan {
            view: ViewKind::MonthlySales,
            chart: ChartSpec {
                title: None,
                x_label: "Months",
                y_label: "Sales in USD ($)",
                height: 400,
                x_axis: AxisKind::Categorical,
                vertical_x_labels: false,
                palette: Palette::Paired,
                tooltips: vec![
                    Tooltip {
                        label: "Month",
                        field: "key",
                    },
                    Tooltip {
                        label: "Sales",
                        field: "$value",
                    },
                ],
            },
            with_detail_table: false,
        },
        MenuChoice::CitySales => ViewPlan {
            view: ViewKind::CitySales,
            chart: ChartSpec {
                title: None,
                x_label: "Cities",
                y_label: "Sales in USD ($)",
                height: 400,
                x_axis: AxisKind::Categorical,
                vertical_x_labels: true,
                palette: Palette::Paired,
                tooltips: vec![
                    Tooltip {
                        label: "City",
                        field: "key",
                    },
                    Tooltip {
                        label: "Sales",
                        field: "$value",
                    },
                ],
            },
            with_detail_table: false,
        },
        MenuChoice::HourlyVolume => ViewPlan {
            view: ViewKind::HourlyVolume,
            chart: ChartSpec {
                title: Some("Daily purchase profile"),
                x_label: "Hours",
                y_label: "No. of transactions",
                height: 400,
                x_axis: AxisKind::Linear,
                vertical_x_labels: false,
                palette: Palette::Paired,
                tooltips: vec![
                    Tooltip {
                        label: "Transactions",
                        field: "value",
                    },
                    Tooltip {
                        label: "Hour",
                        field: "key",
                    },
                ],
            },
            with_detail_table: false,
        },
        MenuChoice::ProductDemand => ViewPlan {
            view: ViewKind::ProductDemand,
            chart: ChartSpec {
                title: None,
                x_label: "Product",
                y_label: "Products sold annually",
                height: 500,
                x_axis: AxisKind::Categorical,
                vertical_x_labels: true,
                palette: Palette::Category20,
                tooltips: vec![
                    Tooltip {
                        label: "Product name",
                        field: "key",
                    },
                    Tooltip {
                        label: "# Units sold",
                        field: "value",
                    },
                ],
            },
            with_detail_table: false,
        },
        MenuChoice::DailyTotal => ViewPlan {
            view: ViewKind::DailyTotal,
            chart: ChartSpec {
                title: None,
                x_label: "Date",
                y_label: "Daily sales",
                height: 300,
                x_axis: AxisKind::DateTime,
                vertical_x_labels: false,
                palette: Palette::Paired,
                tooltips: vec![Tooltip {
                    label: "Sales",
                    field: "$value",
                }],
            },
            with_detail_table: false,
        },
        MenuChoice::ProductTrend(products) => ViewPlan {
            view: ViewKind::ProductTrend(products.clone()),
            chart: ChartSpec {
                title: None,
                x_label: "Date",
                y_label: "Daily sales",
                height: 300,
                x_axis: AxisKind::DateTime,
                vertical_x_labels: false,
                palette: Palette::Category20,
                tooltips: vec![Tooltip {
                    label: "Sales",
                    field: "$value",
                }],
            },
            with_detail_table: false,
        },
    }
}

/// One projected row of the home detail table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailRow {
    /// Product name.
    pub product: ProductName,
    /// Ordered quantity, shown under the `Qty` header.
    pub quantity: u32,
    /// Unit price, shown under the `Price` header.
    pub price: f64,
    /// Raw order-date text as exported.
    pub order_date: RawTimestamp,
    /// Derived city label.
    pub city: CityLabel,
}

/// Projected table of renamed columns backing the home view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailTable {
    /// Column headers after relabeling.
    pub headers: [&'static str; 5],
    /// Projected rows.
    pub rows: Vec<DetailRow>,
}

/// Project up to `sample` randomly chosen rows; `None` keeps the full set.
pub fn detail_table<R: Rng + ?Sized>(
    records: &[SalesRecord],
    sample: Option<usize>,
    rng: &mut R,
) -> DetailTable {
    let picked: Vec<&SalesRecord> = match sample {
        Some(limit) if records.len() > limit => records.choose_multiple(rng, limit).collect(),
        _ => records.iter().collect(),
    };
    DetailTable {
        headers: DETAIL_HEADERS,
        rows: picked
            .into_iter()
            .map(|record| DetailRow {
                product: record.product.clone(),
                quantity: record.quantity_ordered,
                price: record.price_each,
                order_date: record.order_date.clone(),
                city: record.city.clone(),
            })
            .collect(),
    }
}

/// Project the detail table according to the dashboard configuration.
pub fn detail_table_for<R: Rng + ?Sized>(
    records: &[SalesRecord],
    config: &DashboardConfig,
    rng: &mut R,
) -> DetailTable {
    let sample = if config.full_detail_table {
        None
    } else {
        Some(config.detail_sample_rows)
    };
    detail_table(records, sample, rng)
}
