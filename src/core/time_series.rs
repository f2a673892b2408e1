//! TimeSeries data structure for representing temporal data.

use crate::error::{ArimaError, Result};
use chrono::{DateTime, Duration, Utc};

/// An immutable, chronologically ordered numeric series.
///
/// Timestamps are optional: the engine only uses them to label forecast
/// periods. Values must be finite and, when timestamps are present, the
/// timestamps must be strictly increasing and match the values in length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Option<Vec<DateTime<Utc>>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from values alone.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        Self::validate_values(&values)?;
        Ok(Self {
            timestamps: None,
            values,
        })
    }

    /// Create a series with timestamps.
    pub fn with_timestamps(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        Self::validate_values(&values)?;
        if timestamps.len() != values.len() {
            return Err(ArimaError::TimestampError(format!(
                "timestamp count {} does not match value count {}",
                timestamps.len(),
                values.len()
            )));
        }
        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ArimaError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self {
            timestamps: Some(timestamps),
            values,
        })
    }

    fn validate_values(values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Err(ArimaError::InsufficientData { needed: 1, got: 0 });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ArimaError::NonFiniteData);
        }
        Ok(())
    }

    /// Observed values in chronological order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Timestamps, if the series carries them.
    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no observations. Unreachable for
    /// constructed instances, kept for the conventional pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last timestamp and the spacing between the final two observations,
    /// used to label forecast periods. `None` when timestamps are absent
    /// or there are fewer than two of them.
    pub fn period_hint(&self) -> Option<(DateTime<Utc>, Duration)> {
        let ts = self.timestamps.as_ref()?;
        if ts.len() < 2 {
            return None;
        }
        let last = ts[ts.len() - 1];
        let step = last - ts[ts.len() - 2];
        Some((last, step))
    }
}
