mod config;
mod server;
mod source;
mod storage;

pub use config::Config;
pub use server::ServerConfig;
pub use source::{ReloadMode, SourceConfig};
pub use storage::StorageConfig;
