use crate::error::{CoreError, CoreResult};

/// `n` evenly spaced samples from `start` to `end`, both inclusive.
///
/// The last sample is pinned to `end` so it matches the requested boundary
/// exactly. `n == 1` yields `[start]`, `n == 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * delta).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// `n` logarithmically spaced samples from `start` to `end`.
///
/// Fails with [`CoreError::InvalidArg`] when either bound is not strictly
/// positive.
pub fn logspace(start: f64, end: f64, n: usize) -> CoreResult<Vec<f64>> {
    if start.is_nan() || end.is_nan() || start <= 0.0 || end <= 0.0 {
        return Err(CoreError::InvalidArg {
            what: format!("logarithmic bounds must be positive, got {} and {}", start, end),
        });
    }
    let mut points: Vec<f64> = linspace(start.ln(), end.ln(), n)
        .into_iter()
        .map(f64::exp)
        .collect();
    if let Some(first) = points.first_mut() {
        *first = start;
    }
    if n > 1 {
        points[n - 1] = end;
    }
    Ok(points)
}
