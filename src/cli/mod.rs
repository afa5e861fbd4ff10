use tracing_subscriber::EnvFilter;

pub mod cli_parser;
pub mod settings;
pub mod summary;

/// Diagnostics go to stderr; `-v` turns on debug output for this crate,
/// otherwise `RUST_LOG` decides and defaults to warnings only.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tracedash=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
