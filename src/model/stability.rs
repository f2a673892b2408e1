//! Stationarity and invertibility checks for candidate coefficients.
//!
//! Uses the Schur-Cohn criterion via the inverse Levinson-Durbin
//! recursion: an AR polynomial `1 - φ1 B - … - φp B^p` has all roots
//! outside the unit circle exactly when every reflection coefficient
//! recovered from the φ's lies strictly inside (-1, 1). The same test on
//! the MA coefficients decides invertibility.

/// Margin keeping accepted coefficients strictly inside the unit circle,
/// so the stationary covariance solve stays well conditioned.
const REFLECTION_BOUND: f64 = 1.0 - 1e-8;

/// True when the AR polynomial implied by `ar` has all roots strictly
/// outside the unit circle.
pub fn ar_is_stationary(ar: &[f64]) -> bool {
    reflection_coefficients_in_bounds(ar)
}

/// True when the MA polynomial implied by `ma` is invertible.
pub fn ma_is_invertible(ma: &[f64]) -> bool {
    reflection_coefficients_in_bounds(ma)
}

/// Inverse Levinson-Durbin recursion: peel back the order-k coefficient
/// vectors, extracting the reflection coefficient at each order. Any
/// reflection coefficient on or outside the unit interval means a root on
/// or inside the unit circle.
fn reflection_coefficients_in_bounds(coeffs: &[f64]) -> bool {
    if coeffs.iter().any(|c| !c.is_finite()) {
        return false;
    }
    let mut current = coeffs.to_vec();
    for k in (0..current.len()).rev() {
        let r = current[k];
        if r.abs() >= REFLECTION_BOUND {
            return false;
        }
        if k == 0 {
            break;
        }
        let denom = 1.0 - r * r;
        let prev = current.clone();
        for j in 0..k {
            current[j] = (prev[j] + r * prev[k - 1 - j]) / denom;
        }
        current.truncate(k);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_coefficients_are_stationary() {
        assert!(ar_is_stationary(&[]));
        assert!(ma_is_invertible(&[]));
    }

    #[test]
    fn ar1_boundary() {
        assert!(ar_is_stationary(&[0.99]));
        assert!(ar_is_stationary(&[-0.99]));
        assert!(!ar_is_stationary(&[1.0]));
        assert!(!ar_is_stationary(&[-1.0]));
        assert!(!ar_is_stationary(&[1.5]));
    }

    #[test]
    fn ar2_triangle_conditions() {
        // AR(2) is stationary iff |phi2| < 1, phi2 + phi1 < 1, phi2 - phi1 < 1.
        assert!(ar_is_stationary(&[0.5, -0.3]));
        assert!(ar_is_stationary(&[1.4, -0.45]));
        assert!(!ar_is_stationary(&[0.6, 0.5]));
        assert!(!ar_is_stationary(&[0.0, 1.0]));
        assert!(!ar_is_stationary(&[2.0, -0.5]));
    }

    #[test]
    fn random_walk_coefficients_rejected() {
        assert!(!ar_is_stationary(&[1.0]));
        // Sum of coefficients equal to one puts a root at B = 1.
        assert!(!ar_is_stationary(&[0.5, 0.5]));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(!ar_is_stationary(&[f64::NAN]));
        assert!(!ma_is_invertible(&[f64::INFINITY]));
    }

    #[test]
    fn invertibility_mirrors_stationarity() {
        assert!(ma_is_invertible(&[0.8]));
        assert!(!ma_is_invertible(&[1.1]));
        assert!(ma_is_invertible(&[0.4, 0.2]));
    }
}
