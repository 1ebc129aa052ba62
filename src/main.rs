use clap::Parser;
use log::{error, info};

use tracebench::api::TraceApi;
use tracebench::conf::Config;
use tracebench::core::{CliArgs, TraceError, setup_logging};
use tracebench::service::TraceService;

#[tokio::main]
async fn main() {
    setup_logging();
    let args = CliArgs::parse();
    info!(args; "Tracebench started.");

    if let Err(e) = run(args).await {
        error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), TraceError> {
    let config = Config::load(args.config.as_deref())?;
    let addr = config.server.addr();
    let service = TraceService::new(config)?;
    TraceApi::new(service).serve(&addr).await
}
