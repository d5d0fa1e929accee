use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

/// Initializes a tracing subscriber that writes to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level for the extraction crates,
/// `warn` at 0, `info` at 1, `debug` at 2 and `trace` above that.
pub fn subscriber(verbosity: u8) {
    let registry = tracing_subscriber::Registry::default().with(env_filter(verbosity));
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);
    if registry.with(fmt).try_init().is_err() {
        debug!("tracing subscriber already installed");
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}
