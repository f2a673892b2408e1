//! Differencing and exact re-integration.

use crate::error::{ArimaError, Result};

/// Apply the discrete difference operator `d` times.
///
/// The result has length `series.len() - d`.
///
/// # Errors
/// `InsufficientData` when `series.len() <= d`.
pub fn difference(series: &[f64], d: usize) -> Result<Vec<f64>> {
    if series.len() <= d {
        return Err(ArimaError::InsufficientData {
            needed: d + 1,
            got: series.len(),
        });
    }
    let mut result = series.to_vec();
    for _ in 0..d {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(result)
}

/// The seed values needed to re-integrate a continuation of `series`:
/// its last `d` observations.
///
/// # Errors
/// `InsufficientData` when `series.len() < d`.
pub fn history(series: &[f64], d: usize) -> Result<Vec<f64>> {
    if series.len() < d {
        return Err(ArimaError::InsufficientData {
            needed: d,
            got: series.len(),
        });
    }
    Ok(series[series.len() - d..].to_vec())
}

/// Exact inverse of [`difference`] for a block that continues `history`.
///
/// `history` holds the `d` original-scale values immediately preceding the
/// block being reconstructed. The per-level seeds are the last entries of
/// the difference pyramid of `history`; each level is then undone by
/// cumulative summation from its seed. With `d = 0` the input is returned
/// unchanged.
///
/// Round-trip law: for `diffed = difference(x, d)` and `seed` the first
/// `d` values of `x`, `seed ++ integrate(diffed, seed, d)` reproduces `x`
/// under the same floating-point summation order.
///
/// # Errors
/// `InsufficientData` when `history.len() < d`.
pub fn integrate(differenced: &[f64], history: &[f64], d: usize) -> Result<Vec<f64>> {
    if history.len() < d {
        return Err(ArimaError::InsufficientData {
            needed: d,
            got: history.len(),
        });
    }
    if d == 0 || differenced.is_empty() {
        return Ok(differenced.to_vec());
    }

    // Difference pyramid of the seed block: level k has length d - k and
    // its last entry seeds the undo of level k.
    let seed_block = &history[history.len() - d..];
    let mut pyramid: Vec<Vec<f64>> = Vec::with_capacity(d);
    pyramid.push(seed_block.to_vec());
    for level in 1..d {
        let prev = &pyramid[level - 1];
        pyramid.push(prev.windows(2).map(|w| w[1] - w[0]).collect());
    }

    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let mut cumsum = *pyramid[level].last().unwrap_or(&0.0);
        for value in &mut result {
            cumsum += *value;
            *value = cumsum;
        }
    }
    Ok(result)
}
