//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never interleave with the board and prompts on
//! stdout. Verbosity follows `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls leave the first one in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::info!("logging initialized twice");
    }
}
