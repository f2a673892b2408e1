//! # arima-forecast
//!
//! A self-contained ARIMA(p, d, q) fitting and forecasting engine.
//!
//! The engine differences a series to stationarity, estimates AR and MA
//! coefficients by maximizing the exact Gaussian likelihood through a
//! companion-form Kalman recursion, and projects the fitted process
//! forward with prediction intervals. It consumes an already-validated,
//! chronologically ordered numeric series; ingestion and presentation are
//! the caller's concern.
//!
//! ```
//! use arima_forecast::prelude::*;
//!
//! let series = TimeSeries::from_values(
//!     (0..60).map(|i| 10.0 + 0.5 * i as f64 + (i as f64 * 0.3).sin()).collect(),
//! )?;
//! let model = fit(&series, Order::new(1, 1, 0)?)?;
//! let fc = forecast(&model, 5, 0.95)?;
//! assert_eq!(fc.horizon(), 5);
//! # Ok::<(), arima_forecast::ArimaError>(())
//! ```

pub mod core;
pub mod error;
pub mod model;
pub mod utils;

pub use error::{ArimaError, Result};

pub mod prelude {
    pub use crate::core::{ForecastResult, TimeSeries};
    pub use crate::error::{ArimaError, Result};
    pub use crate::model::{fit, fit_with_config, forecast, FitConfig, ModelResult, Order};
}
