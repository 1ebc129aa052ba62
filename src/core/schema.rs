//! Fixed identifiers of the measurement table.
//!
//! Every ingested CSV lands in one table with a known key column, a
//! timestamp column, and a measured value column. These names come from
//! the test-bench export format and are not configurable.

/// The single table all CSV data is loaded into.
pub const TABLE_NAME: &str = "csv_data_table";

/// Column used for exact-match row retrieval.
pub const KEY_COLUMN: &str = "Engine no";

/// Column holding the event timestamp, formatted `minutes:seconds.fraction`.
pub const TIMESTAMP_COLUMN: &str = "Reception date/time";

/// Numeric column plotted against the timestamp axis.
pub const MEASUREMENT_COLUMN: &str = "Torque";

/// Synthetic column tagging each row with the file it came from.
pub const SOURCE_FILE_COLUMN: &str = "source_file";

/// chrono format string for [`TIMESTAMP_COLUMN`] values, hour included:
/// the exported values carry only `minutes:seconds.fraction`, so parsing
/// prefixes a zero hour. `%.f` accepts any fractional-second width.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.f";
