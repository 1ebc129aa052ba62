use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::core::TraceError;
use crate::core::schema::{SOURCE_FILE_COLUMN, TABLE_NAME};
use crate::store::{SqliteStore, Table, Value};

/// What one ingestion cycle did. [`ingest`] never fails; skipped files
/// and a failed install show up here and in the log.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IngestStats {
    pub files_loaded: usize,
    pub files_failed: usize,
    pub rows_loaded: usize,
    pub replaced: bool,
}

impl IngestStats {
    /// True when every listed file parsed and the new table was
    /// installed. Only clean cycles may be fingerprinted for reload
    /// skipping, so any failure forces the next cycle to reload.
    pub fn clean(&self) -> bool {
        self.files_failed == 0 && self.replaced
    }
}

/// Parses one CSV file into a table. The first row names the columns;
/// a short data row pads with nulls, a row wider than the header is an
/// error, as are duplicate or empty column names.
pub fn read_csv_table(path: &Path) -> Result<Table, TraceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| TraceError::CsvParseError(format!("opening {}: {e}", path.display())))?;

    let headers = reader.headers().map_err(|e| {
        TraceError::CsvParseError(format!("reading header of {}: {e}", path.display()))
    })?;
    let columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    if columns.is_empty() {
        return Err(TraceError::CsvParseError(format!(
            "{}: no header row",
            path.display()
        )));
    }

    let mut seen = HashSet::new();
    for name in &columns {
        if name.is_empty() {
            return Err(TraceError::CsvParseError(format!(
                "{}: empty column name in header",
                path.display()
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(TraceError::CsvParseError(format!(
                "{}: duplicate column {name:?}",
                path.display()
            )));
        }
    }

    let mut table = Table::new(columns);
    let ncols = table.num_columns();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            TraceError::CsvParseError(format!("{} row {}: {e}", path.display(), idx + 1))
        })?;
        if record.len() > ncols {
            return Err(TraceError::CsvParseError(format!(
                "{} row {}: {} fields but header has {}",
                path.display(),
                idx + 1,
                record.len(),
                ncols
            )));
        }
        let mut row: Vec<Value> = record.iter().map(Value::infer).collect();
        row.resize(ncols, Value::Null);
        table.rows.push(row);
    }
    Ok(table)
}

/// Concatenates per-file tables into the one canonical table. Columns
/// are the ordered union of the file headers with `source_file` last;
/// cells a file lacks pad with null. A `source_file` column declared by
/// a CSV itself is discarded in favor of the actual origin stem.
pub fn merge_tables(parts: &[(String, Table)]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for (_, table) in parts {
        for column in &table.columns {
            if column != SOURCE_FILE_COLUMN && !columns.iter().any(|c| c == column) {
                columns.push(column.clone());
            }
        }
    }
    columns.push(SOURCE_FILE_COLUMN.to_string());

    let mut merged = Table::new(columns);
    for (stem, table) in parts {
        let mapping: Vec<Option<usize>> = merged.columns[..merged.columns.len() - 1]
            .iter()
            .map(|c| table.column_index(c))
            .collect();
        for row in &table.rows {
            let mut out: Vec<Value> = mapping
                .iter()
                .map(|idx| idx.map(|i| row[i].clone()).unwrap_or(Value::Null))
                .collect();
            out.push(Value::Text(stem.clone()));
            merged.rows.push(out);
        }
    }
    merged
}

/// Runs one ingestion cycle: parse every listed file, concatenate in
/// enumeration order, and install the result with a single replace. A
/// parse failure skips that file only; a failed install (and a cycle in
/// which every file failed) leaves the store at its prior contents.
pub fn ingest(store: &mut SqliteStore, paths: &[PathBuf]) -> IngestStats {
    let mut stats = IngestStats::default();
    if paths.is_empty() {
        return stats;
    }

    let mut parts: Vec<(String, Table)> = Vec::new();
    for path in paths {
        debug!("processing csv file {}", path.display());
        match read_csv_table(path) {
            Ok(table) => {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                parts.push((stem, table));
            }
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                stats.files_failed += 1;
            }
        }
    }

    if parts.is_empty() {
        warn!("no csv file in this cycle parsed; keeping prior table contents");
        return stats;
    }

    let merged = merge_tables(&parts);
    stats.files_loaded = parts.len();
    stats.rows_loaded = merged.num_rows();

    match store.replace_table(TABLE_NAME, &merged) {
        Ok(()) => {
            stats.replaced = true;
            debug!(
                "installed {} rows from {} files into {TABLE_NAME}",
                stats.rows_loaded, stats.files_loaded
            );
        }
        Err(e) => {
            error!("installing {TABLE_NAME}: {e}");
        }
    }
    stats
}
