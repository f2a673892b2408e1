//! Statistical utility functions.

use statrs::distribution::{ContinuousCDF, Normal};

/// Quantile function of the standard normal distribution.
///
/// # Example
/// ```
/// use arima_forecast::utils::quantile_normal;
///
/// // 95% confidence level -> z ≈ 1.96
/// let z = quantile_normal(0.975);
/// assert!((z - 1.96).abs() < 0.01);
/// ```
pub fn quantile_normal(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    let standard_normal = Normal::new(0.0, 1.0).unwrap();
    standard_normal.inverse_cdf(p)
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (sample variance with n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Sample autocorrelations at lags 0..=max_lag, normalized by lag-0
/// autocovariance. Returns an empty vector when the series is too short
/// or has zero variance.
pub fn autocorrelations(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    if n <= max_lag || n < 2 {
        return Vec::new();
    }
    let m = mean(values);
    let c0: f64 = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n as f64;
    if c0 == 0.0 {
        return Vec::new();
    }
    (0..=max_lag)
        .map(|lag| {
            let ck: f64 = values[lag..]
                .iter()
                .zip(values.iter())
                .map(|(a, b)| (a - m) * (b - m))
                .sum::<f64>()
                / n as f64;
            ck / c0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quantile_normal_known_values() {
        assert_relative_eq!(quantile_normal(0.5), 0.0, epsilon = 1e-8);
        assert_relative_eq!(quantile_normal(0.975), 1.959964, epsilon = 1e-4);
        assert_relative_eq!(quantile_normal(0.025), -1.959964, epsilon = 1e-4);
        assert_relative_eq!(quantile_normal(0.995), 2.575829, epsilon = 1e-4);
    }

    #[test]
    fn quantile_normal_boundary_values() {
        assert_eq!(quantile_normal(0.0), f64::NEG_INFINITY);
        assert_eq!(quantile_normal(1.0), f64::INFINITY);
    }

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn variance_calculates_correctly() {
        assert_relative_eq!(variance(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2.5, epsilon = 1e-10);
        assert!(variance(&[1.0]).is_nan());
    }

    #[test]
    fn autocorrelations_lag_zero_is_one() {
        let values = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.0, 8.0];
        let acf = autocorrelations(&values, 2);
        assert_eq!(acf.len(), 3);
        assert_relative_eq!(acf[0], 1.0, epsilon = 1e-12);
        assert!(acf[1].abs() <= 1.0);
    }

    #[test]
    fn autocorrelations_of_persistent_series_are_positive() {
        // A slow trend has strongly positive low-lag autocorrelation.
        let values: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let acf = autocorrelations(&values, 1);
        assert!(acf[1] > 0.8);
    }

    #[test]
    fn autocorrelations_degenerate_inputs() {
        assert!(autocorrelations(&[1.0], 1).is_empty());
        assert!(autocorrelations(&[5.0, 5.0, 5.0, 5.0], 2).is_empty());
    }
}
