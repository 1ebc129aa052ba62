mod args;
mod error;
mod logger;
pub mod schema;

pub use args::CliArgs;
pub use error::TraceError;
pub use logger::setup_logging;
