//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so that `--json` output on stdout stays machine-readable.

use std::io;
use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity` when set.
///
/// Only the first call has an effect.
pub fn init_logging(verbosity: u8, json: bool) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));
        let registry = tracing_subscriber::registry().with(env_filter);

        let result = if json {
            registry.with(fmt::layer().json().with_writer(io::stderr)).try_init()
        } else {
            registry.with(fmt::layer().with_target(false).with_writer(io::stderr)).try_init()
        };
        if let Err(err) = result {
            eprintln!("Warning: logging already initialised: {err}");
        }
    });
}
