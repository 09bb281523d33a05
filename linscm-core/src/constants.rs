/// linscm version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Attribute text that marks an arrow line as a feedback (cross time-slice) arrow.
pub const FEEDBACK_ARROW_MARKER: &str = "green";

/// Environment variable read by the tracing subscriber for log filtering.
pub const LOG_ENV_VAR: &str = "LINSCM_LOG";

/// Filter used when `LINSCM_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "linscm=info";

/// Name used for growth-matrix entries in rendered output.
pub const GROWTH_MATRIX_NAME: &str = "G";
