use thiserror::Error;

/// Errors produced by the tracebench crate.
///
/// Variants carry rendered strings rather than source errors so they stay
/// comparable in tests and cheap to clone across the service boundary.
#[derive(Debug, Error, PartialEq)]
pub enum TraceError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Store unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Store write failed: {0}")]
    WriteError(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("Timestamp parse failed: {0}")]
    TimestampParseError(String),

    #[error("Chart render failed: {0}")]
    ChartError(String),
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        TraceError::IoError(err.to_string())
    }
}

impl From<rusqlite::Error> for TraceError {
    fn from(err: rusqlite::Error) -> Self {
        TraceError::QueryError(err.to_string())
    }
}
