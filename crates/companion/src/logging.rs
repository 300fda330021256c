#![forbid(unsafe_code)]

//! Logging helpers.
//!
//! The crates only emit `tracing` events; installing a subscriber is up to the
//! host. With the `tracing-json` feature, [`init_json`] installs a JSON
//! formatter filtered by [`LOG_ENV`].
//!
//! | Target                 | Level   | Event                       |
//! |------------------------|---------|-----------------------------|
//! | `companion::prototype` | `debug` | property bound              |
//! | `companion::prototype` | `trace` | bound write, initializers   |
//! | `companion_registry`   | `trace` | slot / source creation      |
//! | `companion_registry`   | `debug` | prune and auto-sweep        |
//! | `companion_stream`     | `trace` | emit                        |

/// Environment variable holding the `EnvFilter` directive for [`init_json`].
pub const LOG_ENV: &str = "COMPANION_LOG";

/// Install a global JSON subscriber filtered by `COMPANION_LOG`
/// (default `warn`).
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
}
