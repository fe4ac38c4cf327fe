//! Pure helpers with no I/O

pub mod interval;
pub mod metrics;

pub use interval::{interval_to_duration, lookback_window, IntervalUnit};
pub use metrics::max_metric_period;
