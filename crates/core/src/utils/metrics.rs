//! Datasource definition inspection
//!
//! A datasource definition carries a transform pipeline. Periodic metric
//! steps (currently only `moving_average`) need `period` points of history
//! before they produce output, so the largest configured period tells a
//! caller how far back to read raw data.
//!
//! ```
//! use serde_json::json;
//! use socrates_core::utils::metrics::max_metric_period;
//!
//! let definition = json!({
//!     "transforms": [
//!         {"type": "metric", "name": "moving_average", "period": 5},
//!         {"type": "metric", "name": "moving_average", "period": 20}
//!     ]
//! });
//! assert_eq!(max_metric_period(&definition).unwrap(), 20);
//! ```

use serde_json::Value;
use socrates_domain::constants::PERIODIC_METRICS;
use socrates_domain::ValidationError;

const METRIC_STEP: &str = "metric";

fn is_periodic_metric(step: &Value) -> bool {
    step.get("type").and_then(Value::as_str) == Some(METRIC_STEP)
        && step
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| PERIODIC_METRICS.contains(&name))
}

/// Largest `period` among periodic metric steps; 0 when there are none.
///
/// Steps that are not periodic metrics are skipped whatever their shape.
///
/// # Errors
/// [`ValidationError::InvalidDefinition`] when `transforms` is present but is
/// not an array, or when a periodic metric step has a `period` that is not a
/// non-negative integer.
pub fn max_metric_period(definition: &Value) -> Result<u64, ValidationError> {
    let steps = match definition.get("transforms") {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Array(steps)) => steps,
        Some(other) => {
            return Err(ValidationError::InvalidDefinition(format!(
                "transforms: expected an array, found {other}"
            )))
        }
    };

    let mut max = 0;
    for (index, step) in steps.iter().enumerate().filter(|(_, step)| is_periodic_metric(step)) {
        let period = match step.get("period") {
            None | Some(Value::Null) => continue,
            Some(period) => period.as_u64().ok_or_else(|| {
                ValidationError::InvalidDefinition(format!(
                    "transforms[{index}].period: expected a non-negative integer, found {period}"
                ))
            })?,
        };
        max = max.max(period);
    }
    Ok(max)
}
