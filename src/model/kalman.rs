//! Exact Gaussian likelihood of an ARMA process via the Kalman filter.
//!
//! Runs the prediction-error decomposition on the companion-form state
//! space from [`super::state_space`]. The innovation variance is
//! concentrated out of the likelihood, so the filter operates with unit
//! noise variance and rescales at the end. The log-likelihood accumulates
//! `Σ ln v_t` in the log domain; no products of per-step variances are
//! formed.
//!
//! The filter does not enforce stationarity. For unit-circle or explosive
//! coefficients the stationary initialization has no solution (or the
//! filtered variance degenerates) and [`filter`] returns `None` — callers
//! treat that as an infinitely bad likelihood.

use crate::model::state_space::StateSpace;
use crate::utils::linalg::solve_dense;

/// Output of one filtering pass over a stationary series.
#[derive(Debug, Clone)]
pub struct FilterOutput {
    /// One-step-ahead prediction errors `e_t`.
    pub innovations: Vec<f64>,
    /// Prediction-error variances `v_t` in units of the innovation
    /// variance (multiply by `sigma2` for absolute variances).
    pub scaled_variances: Vec<f64>,
    /// Concentrated maximum-likelihood estimate of the innovation variance.
    pub sigma2: f64,
    /// Exact Gaussian log-likelihood at `sigma2`.
    pub log_likelihood: f64,
    /// One-step-ahead predicted state after the final observation; the
    /// forecaster's starting point.
    pub final_state: Vec<f64>,
}

impl FilterOutput {
    /// Innovations scaled to unit variance, `e_t / sqrt(sigma2 * v_t)`.
    pub fn standardized_innovations(&self) -> Vec<f64> {
        let scale = self.sigma2.sqrt();
        self.innovations
            .iter()
            .zip(self.scaled_variances.iter())
            .map(|(e, v)| e / (scale * v.sqrt()))
            .collect()
    }
}

/// Evaluate the exact Gaussian likelihood of `series` under an ARMA model
/// with the given coefficients.
///
/// `series` must already be stationary (differenced and centered).
/// Returns `None` when the coefficients admit no stationary state
/// distribution or the recursion degenerates numerically.
pub fn filter(ar: &[f64], ma: &[f64], series: &[f64]) -> Option<FilterOutput> {
    let n = series.len();
    if n == 0 {
        return None;
    }

    let ss = StateSpace::new(ar, ma);
    let r = ss.dim();

    let mut state = vec![0.0; r];
    let mut cov = stationary_covariance(&ss)?;

    let mut innovations = Vec::with_capacity(n);
    let mut scaled_variances = Vec::with_capacity(n);
    let mut sum_log_v = 0.0;
    let mut sum_sq = 0.0;

    for &y in series {
        let v = cov[0];
        if !(v.is_finite() && v > 0.0) {
            return None;
        }
        let e = y - state[0];
        if !e.is_finite() {
            return None;
        }

        innovations.push(e);
        scaled_variances.push(v);
        sum_log_v += v.ln();
        sum_sq += e * e / v;

        // Measurement update: K = P[:,0] / v.
        let gain: Vec<f64> = (0..r).map(|i| cov[i * r] / v).collect();
        let mut filtered_state = state.clone();
        for i in 0..r {
            filtered_state[i] += gain[i] * e;
        }
        let mut filtered_cov = cov.clone();
        for i in 0..r {
            for j in 0..r {
                filtered_cov[i * r + j] -= gain[i] * cov[j * r];
            }
        }

        // Time update.
        state = ss.apply_transition(&filtered_state);
        cov = ss.propagate_covariance(&filtered_cov);
    }

    let n_f = n as f64;
    let sigma2 = sum_sq / n_f;
    if !(sigma2.is_finite() && sigma2 > 0.0) {
        return None;
    }
    let log_likelihood = -0.5 * n_f * ((2.0 * std::f64::consts::PI).ln() + 1.0 + sigma2.ln())
        - 0.5 * sum_log_v;
    if !log_likelihood.is_finite() {
        return None;
    }

    Some(FilterOutput {
        innovations,
        scaled_variances,
        sigma2,
        log_likelihood,
        final_state: state,
    })
}

/// Stationary state covariance: the solution of the discrete Lyapunov
/// equation `P = T P Tᵀ + R Rᵀ`, obtained by solving the vectorized
/// system `(I - T ⊗ T) vec(P) = vec(R Rᵀ)`. Returns `None` when the
/// system is singular, which is exactly the unit-root case.
fn stationary_covariance(ss: &StateSpace) -> Option<Vec<f64>> {
    let r = ss.dim();
    let m = r * r;

    let mut system = vec![vec![0.0; m]; m];
    let mut rhs = vec![0.0; m];
    for i in 0..r {
        for j in 0..r {
            let row = i * r + j;
            rhs[row] = ss.noise()[i] * ss.noise()[j];
            for k in 0..r {
                for l in 0..r {
                    let col = k * r + l;
                    let mut value = -ss.t(i, k) * ss.t(j, l);
                    if row == col {
                        value += 1.0;
                    }
                    system[row][col] = value;
                }
            }
        }
    }

    let p = solve_dense(&system, &rhs)?;
    if p.iter().any(|x| !x.is_finite()) {
        return None;
    }
    Some(p)
}
