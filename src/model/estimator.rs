//! Maximum-likelihood estimation of ARIMA models.

use crate::core::TimeSeries;
use crate::error::{ArimaError, Result};
use crate::model::diff;
use crate::model::kalman;
use crate::model::order::Order;
use crate::model::result::{Coefficients, ModelResult};
use crate::model::stability::{ar_is_stationary, ma_is_invertible};
use crate::utils::linalg::{invert_symmetric, solve_symmetric};
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats;

/// Tuning knobs for the likelihood optimizer.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Iteration cap for the Nelder-Mead search. Hitting it yields a
    /// result flagged as non-converged.
    pub max_iterations: usize,
    /// Relative log-likelihood improvement below which the search stops.
    pub tolerance: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1e-8,
        }
    }
}

/// Fit an ARIMA model of the given order by exact maximum likelihood.
///
/// Deterministic: identical inputs produce identical coefficients. An
/// optimizer that exhausts its iteration cap still returns the best
/// coefficients found, flagged via [`ModelResult::converged`].
///
/// # Errors
/// - `InsufficientData` when the series is too short for the order.
/// - `SingularData` when the differenced series has zero variance.
pub fn fit(series: &TimeSeries, order: Order) -> Result<ModelResult> {
    fit_with_config(series, order, &FitConfig::default())
}

/// [`fit`] with explicit optimizer configuration.
pub fn fit_with_config(
    series: &TimeSeries,
    order: Order,
    config: &FitConfig,
) -> Result<ModelResult> {
    let values = series.values();
    let (p, d, q) = (order.p(), order.d(), order.q());

    let min_len = d + p.max(q) + 2;
    if values.len() < min_len {
        return Err(ArimaError::InsufficientData {
            needed: min_len,
            got: values.len(),
        });
    }

    let differenced = diff::difference(values, d)?;
    let spread = differenced
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    if spread.1 - spread.0 < f64::EPSILON {
        return Err(ArimaError::SingularData);
    }

    let mean = stats::mean(&differenced);
    let centered: Vec<f64> = differenced.iter().map(|x| x - mean).collect();

    // Negative concentrated log-likelihood; trial points outside the
    // stationary/invertible region score f64::MAX so the simplex backs
    // away from them.
    let objective = |params: &[f64]| -> f64 {
        let (ar, ma) = params.split_at(p);
        if !ar_is_stationary(ar) || !ma_is_invertible(ma) {
            return f64::MAX;
        }
        match kalman::filter(ar, ma, &centered) {
            Some(output) => -output.log_likelihood,
            None => f64::MAX,
        }
    };

    let initial = initial_coefficients(&centered, p, q);
    let nm_config = NelderMeadConfig {
        max_iter: config.max_iterations,
        tolerance: config.tolerance,
        ..Default::default()
    };
    let search = nelder_mead(&objective, &initial, &nm_config);

    let (ar, ma) = search.optimal_point.split_at(p);
    let output = match kalman::filter(ar, ma, &centered) {
        Some(output) if ar_is_stationary(ar) && ma_is_invertible(ma) => output,
        // The seed is feasible, so the best point can only be infeasible
        // when every likelihood evaluation degenerated.
        _ => return Err(ArimaError::SingularData),
    };

    let m = centered.len() as f64;
    let k = order.num_params() as f64;
    let log_likelihood = output.log_likelihood;
    let aic = -2.0 * log_likelihood + 2.0 * k;
    let bic = -2.0 * log_likelihood + k * m.ln();

    let coefficient_se = standard_errors(&objective, &search.optimal_point);
    let sigma2_se = output.sigma2 * (2.0 / m).sqrt();
    let (ar_se, ma_se) = coefficient_se.split_at(p);

    Ok(ModelResult::new(
        order,
        Coefficients {
            ar: ar.to_vec(),
            ma: ma.to_vec(),
            sigma2: output.sigma2,
        },
        Coefficients {
            ar: ar_se.to_vec(),
            ma: ma_se.to_vec(),
            sigma2: sigma2_se,
        },
        log_likelihood,
        aic,
        bic,
        output.innovations.clone(),
        differenced,
        mean,
        diff::history(values, d)?,
        output.final_state.clone(),
        search.converged,
        series.period_hint(),
    ))
}

/// Seed coefficients: Yule-Walker for the AR part, zeros for the MA part.
///
/// The Yule-Walker system solves the Toeplitz autocorrelation equations;
/// its solution is shrunk towards zero until stationary if numerical
/// noise pushes it onto the boundary, and zeroed entirely as a last
/// resort (zero is always a feasible seed).
fn initial_coefficients(centered: &[f64], p: usize, q: usize) -> Vec<f64> {
    let mut seed = vec![0.0; p + q];
    if p == 0 {
        return seed;
    }

    let acf = stats::autocorrelations(centered, p);
    if acf.len() != p + 1 {
        return seed;
    }

    let mut toeplitz = vec![vec![0.0; p]; p];
    for i in 0..p {
        for j in 0..p {
            toeplitz[i][j] = acf[i.abs_diff(j)];
        }
    }
    let rhs = &acf[1..=p];

    if let Some(mut phi) = solve_symmetric(&toeplitz, rhs) {
        for _ in 0..8 {
            if ar_is_stationary(&phi) {
                seed[..p].copy_from_slice(&phi);
                return seed;
            }
            for coefficient in &mut phi {
                *coefficient *= 0.5;
            }
        }
    }
    seed
}

/// Standard errors from the observed information matrix: the central
/// finite-difference Hessian of the negative log-likelihood at the
/// optimum, inverted by Cholesky. Any numerical failure yields NaN
/// standard errors rather than failing the fit.
fn standard_errors<F>(negative_loglik: &F, optimum: &[f64]) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = optimum.len();
    let nan = vec![f64::NAN; n];
    if n == 0 {
        return nan;
    }

    let eval = |point: &[f64]| -> Option<f64> {
        let value = negative_loglik(point);
        (value.is_finite() && value < f64::MAX).then_some(value)
    };
    let center = match eval(optimum) {
        Some(value) => value,
        None => return nan,
    };

    let steps: Vec<f64> = optimum.iter().map(|x| 1e-4 * (1.0 + x.abs())).collect();
    let mut hessian = vec![vec![0.0; n]; n];

    for i in 0..n {
        let mut plus = optimum.to_vec();
        let mut minus = optimum.to_vec();
        plus[i] += steps[i];
        minus[i] -= steps[i];
        let (fp, fm) = match (eval(&plus), eval(&minus)) {
            (Some(fp), Some(fm)) => (fp, fm),
            _ => return nan,
        };
        hessian[i][i] = (fp - 2.0 * center + fm) / (steps[i] * steps[i]);

        for j in i + 1..n {
            let mut pp = optimum.to_vec();
            let mut pm = optimum.to_vec();
            let mut mp = optimum.to_vec();
            let mut mm = optimum.to_vec();
            pp[i] += steps[i];
            pp[j] += steps[j];
            pm[i] += steps[i];
            pm[j] -= steps[j];
            mp[i] -= steps[i];
            mp[j] += steps[j];
            mm[i] -= steps[i];
            mm[j] -= steps[j];
            let value = match (eval(&pp), eval(&pm), eval(&mp), eval(&mm)) {
                (Some(a), Some(b), Some(c), Some(d)) => {
                    (a - b - c + d) / (4.0 * steps[i] * steps[j])
                }
                _ => return nan,
            };
            hessian[i][j] = value;
            hessian[j][i] = value;
        }
    }

    match invert_symmetric(&hessian) {
        Some(covariance) => (0..n)
            .map(|i| {
                let variance = covariance[i][i];
                if variance > 0.0 {
                    variance.sqrt()
                } else {
                    f64::NAN
                }
            })
            .collect(),
        None => nan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_series(values: Vec<f64>) -> TimeSeries {
        TimeSeries::from_values(values).unwrap()
    }

    fn trending_series(n: usize) -> TimeSeries {
        make_series(
            (0..n)
                .map(|i| 10.0 + 0.5 * i as f64 + (i as f64 * 0.3).sin())
                .collect(),
        )
    }

    #[test]
    fn fit_ar1_with_differencing() {
        let result = fit(&trending_series(60), Order::new(1, 1, 0).unwrap()).unwrap();
        assert_eq!(result.ar().len(), 1);
        assert!(result.ma().is_empty());
        assert!(result.sigma2() > 0.0);
        assert!(result.log_likelihood().is_finite());
        assert!(result.converged());
        assert!(ar_is_stationary(result.ar()));
    }

    #[test]
    fn fit_arima_111() {
        let result = fit(&trending_series(80), Order::default()).unwrap();
        assert_eq!(result.ar().len(), 1);
        assert_eq!(result.ma().len(), 1);
        assert!(ma_is_invertible(result.ma()));
        assert_eq!(result.residuals().len(), 79);
        assert_eq!(result.history().len(), 1);
    }

    #[test]
    fn fit_is_deterministic() {
        let series = trending_series(50);
        let order = Order::new(2, 0, 1).unwrap();
        let a = fit(&series, order).unwrap();
        let b = fit(&series, order).unwrap();
        assert_eq!(a.ar(), b.ar());
        assert_eq!(a.ma(), b.ma());
        assert_eq!(a.sigma2().to_bits(), b.sigma2().to_bits());
        assert_eq!(a.log_likelihood().to_bits(), b.log_likelihood().to_bits());
    }

    #[test]
    fn insufficient_data_rejected() {
        let series = make_series(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            fit(&series, Order::new(2, 1, 1).unwrap()),
            Err(ArimaError::InsufficientData { .. })
        ));
    }

    #[test]
    fn constant_series_is_singular() {
        let series = make_series(vec![5.0; 30]);
        assert!(matches!(
            fit(&series, Order::new(1, 0, 0).unwrap()),
            Err(ArimaError::SingularData)
        ));
    }

    #[test]
    fn linear_trend_is_singular_after_differencing() {
        let series = make_series((0..30).map(|i| 2.0 * i as f64).collect());
        assert!(matches!(
            fit(&series, Order::new(1, 1, 0).unwrap()),
            Err(ArimaError::SingularData)
        ));
    }

    #[test]
    fn iteration_cap_flags_non_convergence() {
        let config = FitConfig {
            max_iterations: 2,
            tolerance: 1e-14,
        };
        let result =
            fit_with_config(&trending_series(60), Order::new(2, 1, 2).unwrap(), &config).unwrap();
        assert!(!result.converged());
        // Best-found coefficients are still usable.
        assert_eq!(result.ar().len(), 2);
        assert_eq!(result.ma().len(), 2);
        assert!(result.sigma2() > 0.0);
    }

    #[test]
    fn information_criteria_relationship() {
        // With m >= 8 observations, ln(m) > 2 so BIC > AIC.
        let result = fit(&trending_series(50), Order::new(1, 0, 0).unwrap()).unwrap();
        assert!(result.bic() > result.aic());
        let k = 2.0;
        assert_relative_eq!(
            result.aic(),
            -2.0 * result.log_likelihood() + 2.0 * k,
            epsilon = 1e-10
        );
    }

    #[test]
    fn standard_errors_are_positive_for_well_posed_fit() {
        let result = fit(&trending_series(120), Order::new(1, 1, 0).unwrap()).unwrap();
        let se = result.std_errors();
        assert_eq!(se.ar.len(), 1);
        assert!(se.ar[0] > 0.0);
        assert!(se.sigma2 > 0.0);
    }

    #[test]
    fn yule_walker_seed_recovers_ar_sign() {
        // Alternating series has strongly negative lag-1 autocorrelation.
        let centered: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let seed = initial_coefficients(&centered, 1, 0);
        assert!(seed[0] < -0.5);
        assert!(ar_is_stationary(&seed[..1]));
    }

    #[test]
    fn yule_walker_seed_is_zero_for_ma_only() {
        let centered: Vec<f64> = (0..20).map(|i| (i as f64 * 0.7).sin()).collect();
        assert_eq!(initial_coefficients(&centered, 0, 2), vec![0.0, 0.0]);
    }
}
