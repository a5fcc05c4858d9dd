/// Product name as it appears in the export.
/// Example: `27in Monitor`
pub type ProductName = String;
/// City label derived from a purchase address (`"{city}, {state}"`).
/// Example: `Dallas, TX`
pub type CityLabel = String;
/// Identity key for a loaded source (canonical path or logical id).
/// Examples: `./sales_data.csv`, `fixture_rows`
pub type SourceKey = String;
/// Order identifier carried by some exports; unused downstream.
/// Example: `176558`
pub type OrderId = String;
/// Raw timestamp text prior to repair.
/// Examples: `04/19/19 08:46`, `2019-04-19 08:46:00`
pub type RawTimestamp = String;
