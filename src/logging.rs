//! Tracing subscriber setup for the command-line tool.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level
/// (0 = off, 1 = debug, 2+ = trace). Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = match (std::env::var("RUST_LOG"), verbosity) {
            (Ok(_), _) => EnvFilter::from_default_env(),
            (Err(_), 0) => return,
            (Err(_), 1) => EnvFilter::new("patgram=debug"),
            (Err(_), _) => EnvFilter::new("patgram=trace"),
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
