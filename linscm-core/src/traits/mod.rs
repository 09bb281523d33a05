mod calculator;

pub use calculator::{ICovarianceCalculator, IGrowthCalculator};
