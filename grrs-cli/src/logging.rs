use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Maps `-v`/`-q` counts to a log level; `None` defers to the configured level
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> Option<String> {
    if quiet {
        return Some("error".to_string());
    }
    let level = match verbose {
        0 => return None,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Some(level.to_string())
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| anyhow!("invalid log level `{}`: {}", level, e))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}
