use log::warn;

use crate::core::schema::{KEY_COLUMN, TABLE_NAME};
use crate::store::{SqliteStore, Table};

/// Exact-match lookup on the fixed table and key column. No trimming or
/// case folding is applied to the key. Store-level failures are logged
/// and collapse to an empty result; an absent key is simply an empty
/// table, not an error.
pub fn find_by_key(store: &SqliteStore, key_value: &str) -> Table {
    match store.query_exact(TABLE_NAME, KEY_COLUMN, key_value) {
        Ok(result) => result,
        Err(e) => {
            warn!("lookup for {key_value:?} failed: {e}");
            Table::default()
        }
    }
}
