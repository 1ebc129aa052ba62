//! Request-driven lookup pipeline.
//!
//! Every lookup runs the same cycle: list the CSV directory, reload the
//! store from whatever is on disk, query for the key, and render the
//! result into HTML fragments. The store lives behind a [`Mutex`] so
//! concurrent requests serialize their reload-then-query sections and
//! never observe a half-replaced table.

use std::path::PathBuf;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::conf::{Config, ReloadMode};
use crate::core::TraceError;
use crate::discovery::{SourceFingerprint, list_csv_files};
use crate::ingest::ingest;
use crate::lookup::find_by_key;
use crate::render::{Series, chart_img_tag, escape, render_png, render_table, style_table};
use crate::store::SqliteStore;

/// Error body text when the source directory has no CSV files at all.
pub const NO_CSV_FILES_MESSAGE: &str = "No CSV files found in the specified folder.";

/// Rendered fragments for one lookup, ready to drop into the result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationPayload {
    pub table_html: String,
    pub chart_html: String,
}

/// Outcome of one lookup request.
///
/// An empty source directory is its own state rather than an error:
/// callers report it as a machine-readable message instead of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    NoSourceFiles,
    Page(PresentationPayload),
}

struct StoreState {
    store: SqliteStore,
    fingerprint: Option<SourceFingerprint>,
}

/// Owns the store and serves the reload-query-render cycle.
pub struct TraceService {
    state: Mutex<StoreState>,
    config: Config,
}

impl TraceService {
    pub fn new(config: Config) -> Result<Self, TraceError> {
        let store = SqliteStore::open(&config.storage.db_path)?;
        info!("opened store at '{}'", config.storage.db_path.display());
        Ok(Self {
            state: Mutex::new(StoreState {
                store,
                fingerprint: None,
            }),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one full lookup cycle for `key`.
    ///
    /// The source directory is re-listed and re-ingested on every call
    /// (unless `reload = "on-change"` and the files are untouched), so
    /// the answer always reflects the files currently on disk. A row
    /// that matches nothing still produces a page; the only error is a
    /// store that has already been closed.
    pub async fn handle_lookup_request(&self, key: &str) -> Result<LookupOutcome, TraceError> {
        let files = match list_csv_files(&self.config.source.csv_dir) {
            Ok(files) => files,
            Err(e) => {
                warn!(
                    "failed to list source directory '{}': {e}",
                    self.config.source.csv_dir.display()
                );
                Vec::new()
            }
        };
        if files.is_empty() {
            return Ok(LookupOutcome::NoSourceFiles);
        }

        let mut state = self.state.lock().await;
        if !state.store.is_open() {
            return Err(TraceError::StorageUnavailable(
                "store is closed".to_string(),
            ));
        }
        self.reload(&mut state, &files);
        let result = find_by_key(&state.store, key);
        drop(state);

        if result.is_empty() {
            // The key is user input flowing into a page; escape it like
            // any other cell text.
            return Ok(LookupOutcome::Page(PresentationPayload {
                table_html: format!(
                    "No row found for Engine no. {} or table is empty.",
                    escape(key)
                ),
                chart_html: "Not found.".to_string(),
            }));
        }

        let styles = style_table(&result);
        let table_html = render_table(&result, &styles);
        let chart_html = match Series::from_table(&result).and_then(|s| render_png(&s)) {
            Ok(png) => chart_img_tag(&png),
            Err(e) => {
                warn!("chart for '{key}' not rendered: {e}");
                String::new()
            }
        };
        Ok(LookupOutcome::Page(PresentationPayload {
            table_html,
            chart_html,
        }))
    }

    /// Replaces the stored table from `files`, unless change detection
    /// says the previous load is still current.
    fn reload(&self, state: &mut StoreState, files: &[PathBuf]) {
        let fingerprint = match self.config.source.reload {
            ReloadMode::Always => None,
            ReloadMode::OnChange => match SourceFingerprint::capture(files) {
                Ok(fp) => Some(fp),
                Err(e) => {
                    warn!("failed to fingerprint source files, reloading: {e}");
                    None
                }
            },
        };
        let unchanged = match (&fingerprint, &state.fingerprint) {
            (Some(current), Some(previous)) => current == previous,
            _ => false,
        };
        if unchanged {
            debug!("source files unchanged, keeping loaded table");
            return;
        }

        let stats = ingest(&mut state.store, files);
        debug!(
            "reload finished: {} files loaded, {} failed, {} rows",
            stats.files_loaded, stats.files_failed, stats.rows_loaded
        );
        // Only remember a fingerprint for a fully successful cycle so a
        // partial load is retried on the next request.
        state.fingerprint = if stats.clean() { fingerprint } else { None };
    }

    /// Closes the underlying store. Requests after this fail with
    /// `StorageUnavailable`.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.store.close();
        info!("store closed");
    }
}
