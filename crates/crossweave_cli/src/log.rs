use tracing_subscriber::EnvFilter;

use crate::args::Args;

/// Installs the stderr subscriber; `RUST_LOG` wins over the `--debug` flag
pub fn init(args: &Args) {
    let fallback = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
