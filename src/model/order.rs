//! ARIMA model order.

use crate::error::{ArimaError, Result};

/// An ARIMA(p, d, q) order: AR order, differencing order, MA order.
///
/// Construction enforces `p + q >= 1`; a model with differencing alone has
/// no coefficients to estimate and is rejected as degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Order {
    p: usize,
    d: usize,
    q: usize,
}

impl Order {
    /// Create a validated order.
    ///
    /// # Errors
    /// `InvalidOrder` when `p + q == 0`.
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p + q == 0 {
            return Err(ArimaError::InvalidOrder(format!(
                "({p}, {d}, {q}) has no AR or MA terms to estimate"
            )));
        }
        Ok(Self { p, d, q })
    }

    /// AR order.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Differencing order.
    pub fn d(&self) -> usize {
        self.d
    }

    /// MA order.
    pub fn q(&self) -> usize {
        self.q
    }

    /// Number of estimated parameters: AR + MA coefficients plus the
    /// innovation variance.
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }

    /// Companion-form state dimension, max(p, q + 1).
    pub fn state_dim(&self) -> usize {
        self.p.max(self.q + 1)
    }
}

impl Default for Order {
    /// ARIMA(1, 1, 1), the conventional starting order.
    fn default() -> Self {
        Self { p: 1, d: 1, q: 1 }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({}, {}, {})", self.p, self.d, self.q)
    }
}
