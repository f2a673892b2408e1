//! Forecast result structure for holding predictions and intervals.

use chrono::{DateTime, Utc};

/// Point forecasts with two-sided prediction intervals.
///
/// Produced fresh by each forecast call. The interval bounds are stored at
/// the confidence level the caller requested; `timestamps` labels the
/// forecast periods when the training series carried timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    point: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    level: f64,
    timestamps: Option<Vec<DateTime<Utc>>>,
}

impl ForecastResult {
    pub(crate) fn new(
        point: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        level: f64,
        timestamps: Option<Vec<DateTime<Utc>>>,
    ) -> Self {
        debug_assert_eq!(point.len(), lower.len());
        debug_assert_eq!(point.len(), upper.len());
        Self {
            point,
            lower,
            upper,
            level,
            timestamps,
        }
    }

    /// Point forecasts, one per step ahead.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Lower interval bounds.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper interval bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Confidence level the intervals were computed at.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// The (lower, upper) pair at a zero-based step index.
    pub fn interval(&self, step: usize) -> Option<(f64, f64)> {
        Some((*self.lower.get(step)?, *self.upper.get(step)?))
    }

    /// Interval width at a zero-based step index.
    pub fn width(&self, step: usize) -> Option<f64> {
        self.interval(step).map(|(lo, hi)| hi - lo)
    }

    /// Labels for the forecast periods, when available.
    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }
}
