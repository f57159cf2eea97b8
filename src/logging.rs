//! Tracing subscriber setup

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Default level for this crate at a given `-v` count
fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` wins when set; otherwise only this crate logs, at a level
/// raised by `verbosity`. Later calls are ignored.
pub fn init_logging(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new(format!("wallet_ledger={}", default_level(verbosity))),
        };

        // a subscriber installed elsewhere (tests) is kept
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
