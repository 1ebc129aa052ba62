use std::fs;
use std::path::Path;

use tracebench::conf::{Config, ReloadMode, SourceConfig, StorageConfig};
use tracebench::service::TraceService;

/// Config rooted in `root`: source files under `root/csv`, store file at
/// `root/trace.db`, reload on every request.
pub fn test_config(root: &Path) -> Config {
    Config {
        source: SourceConfig {
            csv_dir: root.join("csv"),
            reload: ReloadMode::Always,
        },
        storage: StorageConfig {
            db_path: root.join("trace.db"),
        },
        ..Config::default()
    }
}

/// Creates the source directory and a service whose store lives under `root`.
pub fn test_service(root: &Path) -> TraceService {
    let config = test_config(root);
    fs::create_dir_all(&config.source.csv_dir).unwrap();
    TraceService::new(config).unwrap()
}

/// Writes a CSV file into the source directory under `root`.
pub fn write_csv(root: &Path, name: &str, contents: &str) {
    fs::write(root.join("csv").join(name), contents).unwrap();
}
