pub mod api;
pub mod conf;
pub mod core;
pub mod discovery;
pub mod ingest;
pub mod lookup;
pub mod render;
pub mod service;
pub mod store;
