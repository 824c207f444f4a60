use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity level.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // also captures the `log` records of the other crates
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        log::debug!("logging already initialized: {err}");
    }
}
