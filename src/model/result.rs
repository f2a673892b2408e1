//! Fitted model results.

use chrono::{DateTime, Duration, Utc};

use crate::model::order::Order;

/// Estimated ARMA coefficients plus the innovation variance.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    /// AR coefficients φ1..φp.
    pub ar: Vec<f64>,
    /// MA coefficients θ1..θq.
    pub ma: Vec<f64>,
    /// Innovation variance σ².
    pub sigma2: f64,
}

/// A fitted ARIMA model.
///
/// Produced only by a successful [`fit`](crate::model::fit) call and
/// immutable afterwards. Holds the estimated coefficients with their
/// standard errors, fit diagnostics, and everything the forecaster needs:
/// the one-step-ahead predicted state, the mean of the differenced series,
/// and the last `d` observations for re-integration.
#[derive(Debug, Clone)]
pub struct ModelResult {
    order: Order,
    coefficients: Coefficients,
    std_errors: Coefficients,
    log_likelihood: f64,
    aic: f64,
    bic: f64,
    residuals: Vec<f64>,
    differenced: Vec<f64>,
    mean: f64,
    history: Vec<f64>,
    final_state: Vec<f64>,
    converged: bool,
    period_hint: Option<(DateTime<Utc>, Duration)>,
}

impl ModelResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        order: Order,
        coefficients: Coefficients,
        std_errors: Coefficients,
        log_likelihood: f64,
        aic: f64,
        bic: f64,
        residuals: Vec<f64>,
        differenced: Vec<f64>,
        mean: f64,
        history: Vec<f64>,
        final_state: Vec<f64>,
        converged: bool,
        period_hint: Option<(DateTime<Utc>, Duration)>,
    ) -> Self {
        Self {
            order,
            coefficients,
            std_errors,
            log_likelihood,
            aic,
            bic,
            residuals,
            differenced,
            mean,
            history,
            final_state,
            converged,
            period_hint,
        }
    }

    /// The (p, d, q) order this model was fit with.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Estimated coefficients.
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// AR coefficients φ1..φp.
    pub fn ar(&self) -> &[f64] {
        &self.coefficients.ar
    }

    /// MA coefficients θ1..θq.
    pub fn ma(&self) -> &[f64] {
        &self.coefficients.ma
    }

    /// Innovation variance σ².
    pub fn sigma2(&self) -> f64 {
        self.coefficients.sigma2
    }

    /// Standard errors, shaped like [`Self::coefficients`]. Entries are
    /// NaN when the observed information matrix was not invertible.
    pub fn std_errors(&self) -> &Coefficients {
        &self.std_errors
    }

    /// Maximized log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Akaike information criterion, −2L + 2k with k = p + q + 1.
    pub fn aic(&self) -> f64 {
        self.aic
    }

    /// Bayesian information criterion, −2L + k·ln(m) over the differenced
    /// length m.
    pub fn bic(&self) -> f64 {
        self.bic
    }

    /// One-step-ahead prediction errors on the differenced scale.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// The differenced (not centered) series the model was fit on.
    pub fn differenced(&self) -> &[f64] {
        &self.differenced
    }

    /// Mean of the differenced series, added back when forecasting.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Last `d` observations of the original series, the seed for
    /// re-integration.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// One-step-ahead predicted state after the final observation.
    pub(crate) fn final_state(&self) -> &[f64] {
        &self.final_state
    }

    /// False when the optimizer hit its iteration cap before meeting the
    /// tolerance. The coefficients are the best found; treat them with
    /// care.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub(crate) fn period_hint(&self) -> Option<(DateTime<Utc>, Duration)> {
        self.period_hint
    }

    /// Plain-text summary of the fit for a presentation layer.
    pub fn summary(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.order);
        if !self.converged {
            let _ = writeln!(out, "warning: optimizer did not converge");
        }
        for (i, (phi, se)) in self
            .coefficients
            .ar
            .iter()
            .zip(self.std_errors.ar.iter())
            .enumerate()
        {
            let _ = writeln!(out, "  ar.L{}    {:>12.4}  (se {:.4})", i + 1, phi, se);
        }
        for (i, (theta, se)) in self
            .coefficients
            .ma
            .iter()
            .zip(self.std_errors.ma.iter())
            .enumerate()
        {
            let _ = writeln!(out, "  ma.L{}    {:>12.4}  (se {:.4})", i + 1, theta, se);
        }
        let _ = writeln!(
            out,
            "  sigma2  {:>12.4}  (se {:.4})",
            self.coefficients.sigma2, self.std_errors.sigma2
        );
        let _ = writeln!(out, "  log-likelihood {:.4}", self.log_likelihood);
        let _ = writeln!(out, "  AIC {:.4}  BIC {:.4}", self.aic, self.bic);
        out
    }
}
