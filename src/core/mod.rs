//! Core data structures shared by the estimator and forecaster.

mod forecast;
mod time_series;

pub use forecast::ForecastResult;
pub use time_series::TimeSeries;
