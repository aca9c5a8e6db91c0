//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with listing output. `BASM_LOG`
//! takes an `EnvFilter` directive; otherwise `-v` raises the level from
//! `warn` to `info`, `-vv` to `debug`.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG: &str = "BASM_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber; later calls are no-ops
pub fn init_logging(verbosity: u8) {
    INIT.call_once(|| {
        let default_level = match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let env_filter = EnvFilter::try_from_env(ENV_LOG)
            .unwrap_or_else(|_| EnvFilter::new(format!("basm={}", default_level)));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .init();
    });
}
