//! Tracing initialization.

pub mod events;
pub mod spans;

use std::sync::Once;

use linscm_core::config::ObservabilityConfig;
use linscm_core::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging with human-readable output.
///
/// Reads `LINSCM_LOG` for per-crate levels, e.g.
/// `LINSCM_LOG=linscm_covariance=debug,linscm_sampler=info`, and falls back
/// to `linscm=info` when it is unset or invalid.
///
/// Only the first call in a process has any effect. Returns whether this
/// call installed the global subscriber.
pub fn init_tracing() -> bool {
    init_tracing_with_config(&ObservabilityConfig {
        log_level: DEFAULT_LOG_FILTER.to_string(),
        json: false,
    })
}

/// Initialize logging from config. `LINSCM_LOG` still takes precedence
/// over `log_level`.
///
/// Returns `false` when an earlier call already ran or a host application
/// owns the global subscriber.
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let result = if config.json {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_target(true))
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        };
        match result {
            Ok(()) => installed = true,
            Err(err) => debug!(error = %err, "global subscriber already set, keeping it"),
        }
    });
    installed
}
