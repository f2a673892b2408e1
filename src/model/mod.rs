//! ARIMA model: differencing, likelihood evaluation, estimation, and
//! forecasting.

pub mod diff;
mod estimator;
mod forecaster;
pub mod kalman;
mod order;
mod result;
pub mod stability;
mod state_space;

pub use estimator::{fit, fit_with_config, FitConfig};
pub use forecaster::forecast;
pub use order::Order;
pub use result::{Coefficients, ModelResult};
