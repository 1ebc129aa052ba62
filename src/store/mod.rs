mod row;

pub use row::{Table, Value};

use std::path::Path;

use log::warn;
use rusqlite::{Connection, params, params_from_iter};

use crate::core::TraceError;

/// Embedded SQLite store holding the one measurement table.
///
/// The connection is a single long-lived handle; callers serialize access
/// to it. After [`SqliteStore::close`] every operation fails with
/// `StorageUnavailable`.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Option<Connection>,
}

impl SqliteStore {
    /// Opens or creates the store file. The schema-version probe catches
    /// an existing file that is not a SQLite database, which a bare
    /// `Connection::open` would only surface on first use.
    pub fn open(path: &Path) -> Result<Self, TraceError> {
        let conn = Connection::open(path).map_err(|e| {
            TraceError::StorageUnavailable(format!("opening {}: {e}", path.display()))
        })?;
        conn.query_row("PRAGMA schema_version", [], |_| Ok(()))
            .map_err(|e| {
                TraceError::StorageUnavailable(format!("probing {}: {e}", path.display()))
            })?;
        Ok(Self { conn: Some(conn) })
    }

    fn conn(&self) -> Result<&Connection, TraceError> {
        self.conn
            .as_ref()
            .ok_or_else(|| TraceError::StorageUnavailable("store is closed".to_string()))
    }

    /// Drops and recreates `name` with the given rows inside one
    /// transaction. A failure rolls back, leaving the prior table intact.
    pub fn replace_table(&mut self, name: &str, table: &Table) -> Result<(), TraceError> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| TraceError::StorageUnavailable("store is closed".to_string()))?;

        let table_ident = quote_ident(name).map_err(TraceError::WriteError)?;
        let mut column_decls = Vec::with_capacity(table.num_columns());
        for (idx, column) in table.columns.iter().enumerate() {
            let ident = quote_ident(column).map_err(TraceError::WriteError)?;
            column_decls.push(format!("{} {}", ident, column_affinity(table, idx)));
        }

        let tx = conn
            .transaction()
            .map_err(|e| TraceError::WriteError(e.to_string()))?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table_ident}; CREATE TABLE {table_ident} ({});",
            column_decls.join(", ")
        ))
        .map_err(|e| TraceError::WriteError(format!("recreating {name}: {e}")))?;

        {
            let placeholders: Vec<String> =
                (1..=table.num_columns()).map(|i| format!("?{i}")).collect();
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {table_ident} VALUES ({})",
                    placeholders.join(", ")
                ))
                .map_err(|e| TraceError::WriteError(e.to_string()))?;
            for row in &table.rows {
                stmt.execute(params_from_iter(row.iter()))
                    .map_err(|e| TraceError::WriteError(format!("inserting into {name}: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| TraceError::WriteError(format!("committing {name}: {e}")))
    }

    /// All rows where `key_column` equals `key_value`. Empty result when
    /// nothing matches; `QueryError` when the table or column does not
    /// exist. Matching follows SQLite affinity, so a string key finds
    /// rows in an INTEGER-typed column.
    pub fn query_exact(
        &self,
        name: &str,
        key_column: &str,
        key_value: &str,
    ) -> Result<Table, TraceError> {
        let conn = self.conn()?;
        let table_ident = quote_ident(name).map_err(TraceError::QueryError)?;
        let key_ident = quote_ident(key_column).map_err(TraceError::QueryError)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {table_ident} WHERE {key_ident} = ?1"
        ))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        // SQLite's double-quote fallback reads an unknown quoted column
        // as a string literal instead of failing the prepare, so resolve
        // the name against the result columns ourselves.
        if !columns.iter().any(|c| c == key_column) {
            return Err(TraceError::QueryError(format!(
                "no such column {key_column:?} in {name}"
            )));
        }
        let ncols = stmt.column_count();

        let mut result = Table::new(columns);
        let rows = stmt.query_map(params![key_value], |row| {
            (0..ncols)
                .map(|i| row.get_ref(i).map(Value::from))
                .collect::<rusqlite::Result<Vec<Value>>>()
        })?;
        for row in rows {
            result.rows.push(row?);
        }
        Ok(result)
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Releases the connection. Idempotent; later operations fail with
    /// `StorageUnavailable`.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                warn!("closing store: {e}");
            }
        }
    }
}

/// Double-quote escaping for table and column identifiers. Identifiers
/// come from CSV headers, so arbitrary text must stay inert in SQL.
fn quote_ident(name: &str) -> Result<String, String> {
    if name.contains('\0') {
        return Err(format!("identifier contains NUL: {name:?}"));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Column type for CREATE TABLE, from the cells actually present:
/// all-integer columns declare INTEGER, numeric ones REAL, anything
/// else (including all-null) TEXT. The declared affinity is what makes
/// string key parameters compare equal to numeric key cells.
fn column_affinity(table: &Table, idx: usize) -> &'static str {
    let mut seen_any = false;
    let mut all_integer = true;
    let mut all_numeric = true;
    for row in &table.rows {
        match row.get(idx) {
            Some(Value::Null) | None => {}
            Some(Value::Integer(_)) => {
                seen_any = true;
            }
            Some(Value::Real(_)) => {
                seen_any = true;
                all_integer = false;
            }
            Some(Value::Text(_)) => {
                seen_any = true;
                all_integer = false;
                all_numeric = false;
            }
        }
    }
    if !seen_any {
        "TEXT"
    } else if all_integer {
        "INTEGER"
    } else if all_numeric {
        "REAL"
    } else {
        "TEXT"
    }
}
