//! Multi-step forecasting from a fitted model.

use crate::core::ForecastResult;
use crate::error::{ArimaError, Result};
use crate::model::diff;
use crate::model::result::ModelResult;
use crate::model::state_space::StateSpace;
use crate::utils::stats::quantile_normal;

/// Project a fitted model `steps` periods ahead with two-sided prediction
/// intervals at `confidence_level`.
///
/// Point forecasts extend the fitted state-space recursion with zero
/// future innovations and are re-integrated to the original scale through
/// the model's stored history. Predictive variances come from the
/// ψ-weights of the integrated process, so interval widths never shrink
/// as the horizon grows.
///
/// # Errors
/// - `InvalidArgument` when `steps < 1` or `confidence_level` is outside
///   the open interval (0, 1).
pub fn forecast(
    model: &ModelResult,
    steps: usize,
    confidence_level: f64,
) -> Result<ForecastResult> {
    if steps < 1 {
        return Err(ArimaError::InvalidArgument(
            "steps must be at least 1".to_string(),
        ));
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ArimaError::InvalidArgument(format!(
            "confidence level must be in (0, 1), got {confidence_level}"
        )));
    }

    let order = model.order();

    // Point forecasts on the differenced scale: propagate the predicted
    // state with zero innovations, adding back the stored mean.
    let ss = StateSpace::new(model.ar(), model.ma());
    let mut state = model.final_state().to_vec();
    let mut diff_forecasts = Vec::with_capacity(steps);
    for _ in 0..steps {
        diff_forecasts.push(state[0] + model.mean());
        state = ss.apply_transition(&state);
    }

    let point = diff::integrate(&diff_forecasts, model.history(), order.d())?;

    // Predictive variance on the original scale accumulates squared
    // ψ-weights of the differenced-and-integrated process.
    let psi = psi_weights(model.ar(), model.ma(), order.d(), steps);
    let z = quantile_normal((1.0 + confidence_level) / 2.0);
    let sigma2 = model.sigma2();

    let mut lower = Vec::with_capacity(steps);
    let mut upper = Vec::with_capacity(steps);
    let mut cumulative = 0.0;
    for (h, &center) in point.iter().enumerate() {
        cumulative += psi[h] * psi[h];
        let half_width = z * (sigma2 * cumulative).sqrt();
        lower.push(center - half_width);
        upper.push(center + half_width);
    }

    let timestamps = model.period_hint().map(|(last, step)| {
        (1..=steps as i32).map(|h| last + step * h).collect()
    });

    Ok(ForecastResult::new(
        point,
        lower,
        upper,
        confidence_level,
        timestamps,
    ))
}

/// ψ-weights of the integrated ARMA process: the impulse responses of
/// `(1 - φ1 B - …)(1 - B)^d y = (1 + θ1 B + …) e`. The generalized AR
/// polynomial is the product of the AR polynomial with `(1 - B)^d`; the
/// recursion then folds the MA terms in.
fn psi_weights(ar: &[f64], ma: &[f64], d: usize, count: usize) -> Vec<f64> {
    // Polynomial 1 - φ1 B - … - φp B^p, convolved with (1 - B) d times.
    let mut poly = Vec::with_capacity(ar.len() + d + 1);
    poly.push(1.0);
    poly.extend(ar.iter().map(|phi| -phi));
    for _ in 0..d {
        let mut next = vec![0.0; poly.len() + 1];
        for (i, &c) in poly.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c;
        }
        poly = next;
    }
    // Recursion coefficients of the generalized process.
    let ar_star: Vec<f64> = poly[1..].iter().map(|c| -c).collect();

    let mut psi = Vec::with_capacity(count);
    psi.push(1.0);
    for j in 1..count {
        let mut value = if j <= ma.len() { ma[j - 1] } else { 0.0 };
        for (i, &coefficient) in ar_star.iter().enumerate().take(j) {
            value += coefficient * psi[j - 1 - i];
        }
        psi.push(value);
    }
    psi
}
