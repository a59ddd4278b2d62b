use std::io;

use tracing_subscriber::EnvFilter;

mod command;
mod render;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    init_logging();
    command::run()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
