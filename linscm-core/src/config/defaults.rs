//! Default values for every config field.

pub const DEFAULT_ALPHA_BOUND: f64 = 1.0;
pub const DEFAULT_NOISE_MEAN: f64 = 1.0;
pub const DEFAULT_NUM_ROWS: usize = 100;

pub const DEFAULT_RENDER_VERBOSE: bool = false;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
