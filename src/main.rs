//! CodeBuilder Worker Service Entry Point
//!
//! Loads configuration, sizes the Tokio runtime from it, and runs the HTTP server.

use codebuilder_worker::config::AppConfig;
use codebuilder_worker::run;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if config.server.workers > 0 {
        builder.worker_threads(config.server.workers);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(run(config))
}
