//! Simple moving average with midpoint ordinal alignment.
//!
//! ```text
//! cumsum[0] = 0,  cumsum[i] = cumsum[i-1] + value[i-1]
//! avg[k]    = (cumsum[k + w] - cumsum[k]) / w        for k in 0..=n-w
//! ord[k]    = ordinals[k + w/2 - 1]
//! ```
//!
//! The ordinal offset is the slice `ordinals[w/2 - 1 .. n - w/2]` zipped
//! with the averages, so each point sits under the middle of its window
//! instead of its trailing edge. For odd windows the slice is one longer
//! than the averages and the tail is dropped by the zip.

use crate::error::SmoothingError;
use crate::types::{Point, Series, SmoothedSeries};

/// Smooth `series` with a `window`-point moving average.
///
/// Fails before any arithmetic if `window` is 0 or longer than the series,
/// which also rejects every empty series.
pub fn moving_average(series: &Series, window: usize) -> Result<SmoothedSeries, SmoothingError> {
    let values = series.values();
    let averages = moving_average_values(&values, window)?;
    let ordinals = series.ordinals();

    let points = aligned_ordinals(&ordinals, window)
        .iter()
        .zip(averages)
        .map(|(&ordinal, value)| Point::new(ordinal, value))
        .collect();

    Ok(SmoothedSeries {
        name: series.name.clone(),
        window,
        points,
    })
}

/// Moving average over bare values. Output length is `values.len() - window + 1`.
pub fn moving_average_values(values: &[f64], window: usize) -> Result<Vec<f64>, SmoothingError> {
    check_window(values.len(), window)?;

    if window == 1 {
        return Ok(values.to_vec());
    }

    let mut cumsum = Vec::with_capacity(values.len() + 1);
    let mut acc = 0.0;
    cumsum.push(acc);
    for value in values {
        acc += value;
        cumsum.push(acc);
    }

    let w = window as f64;
    let upper = &cumsum[window..];
    let lower = &cumsum[..cumsum.len() - window];
    Ok(upper
        .iter()
        .zip(lower)
        .map(|(hi, lo)| (hi - lo) / w)
        .collect())
}

/// Ordinals that line up with the output of a `window`-point average.
///
/// Returns `ordinals[w/2 - 1 .. n - w/2]`, with the start saturating at 0
/// for `w == 1`. The slice is never shorter than the averaged output.
pub fn aligned_ordinals(ordinals: &[i64], window: usize) -> &[i64] {
    let half = window / 2;
    let end = ordinals.len().saturating_sub(half);
    let start = half.saturating_sub(1).min(end);
    &ordinals[start..end]
}

fn check_window(len: usize, window: usize) -> Result<(), SmoothingError> {
    if window == 0 || window > len {
        return Err(SmoothingError::InvalidWindow { window, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> Series {
        Series::new(
            "reward",
            points.iter().map(|&(o, v)| Point::new(o, v)).collect(),
        )
    }

    /// Direct O(n * w) windowed sum used as the reference.
    fn naive(values: &[f64], window: usize) -> Vec<f64> {
        values
            .windows(window)
            .map(|w| w.iter().sum::<f64>() / window as f64)
            .collect()
    }

    /// Deterministic xorshift stream so failures reproduce.
    fn stream(seed: u64, len: usize) -> Vec<f64> {
        let mut state = seed.max(1);
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 11) as f64 / (1u64 << 53) as f64
            })
            .collect()
    }

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            let tol = 1e-9 * x.abs().max(y.abs()).max(1.0);
            assert!((x - y).abs() <= tol, "index {i}: {x} vs {y}");
        }
    }

    #[test]
    fn test_concrete_scenario() {
        let s = series(&[(1, 10.0), (2, 20.0), (3, 30.0)]);
        let smoothed = moving_average(&s, 2).unwrap();
        assert_eq!(smoothed.points, vec![Point::new(1, 15.0), Point::new(2, 25.0)]);
        assert_eq!(smoothed.window, 2);
        assert_eq!(smoothed.name, "reward");
    }

    #[test]
    fn test_output_length() {
        let values = stream(7, 97);
        let s = Series::new(
            "r",
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Point::new(i as i64, v))
                .collect(),
        );
        for window in 1..=s.len() {
            let smoothed = moving_average(&s, window).unwrap();
            assert_eq!(smoothed.len(), s.len() - window + 1, "window {window}");
        }
    }

    #[test]
    fn test_window_one_is_identity() {
        let s = series(&[(0, 0.1), (1, 0.2), (2, -7.3), (5, 1e9)]);
        let smoothed = moving_average(&s, 1).unwrap();
        assert_eq!(smoothed.points, s.points);
    }

    #[test]
    fn test_window_equal_to_length() {
        for len in 2..12usize {
            let points: Vec<_> = (0..len).map(|i| (10 * i as i64 + 3, i as f64)).collect();
            let s = series(&points);
            let smoothed = moving_average(&s, len).unwrap();
            assert_eq!(smoothed.len(), 1);
            assert_eq!(smoothed.points[0].ordinal, s.points[len / 2 - 1].ordinal);
            let expected = (0..len).map(|i| i as f64).sum::<f64>() / len as f64;
            assert!((smoothed.points[0].value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ordinal_alignment_even_and_odd() {
        let ordinals: Vec<i64> = (100..110).collect();
        // w = 4: slice [1 .. 8], 7 averages
        assert_eq!(aligned_ordinals(&ordinals, 4), &ordinals[1..8]);
        // w = 5: slice [1 .. 8], 6 averages; the zip drops the last ordinal
        assert_eq!(aligned_ordinals(&ordinals, 5), &ordinals[1..8]);
        // w = 2: slice [0 .. 9]
        assert_eq!(aligned_ordinals(&ordinals, 2), &ordinals[0..9]);
        assert_eq!(aligned_ordinals(&ordinals, 1), &ordinals[..]);

        let s = series(&ordinals.iter().map(|&o| (o, 1.0)).collect::<Vec<_>>());
        let smoothed = moving_average(&s, 5).unwrap();
        let got: Vec<i64> = smoothed.points.iter().map(|p| p.ordinal).collect();
        assert_eq!(got, vec![101, 102, 103, 104, 105, 106]);
    }

    #[test]
    fn test_ordinals_strictly_increasing() {
        let points: Vec<_> = (0..50).map(|i| (i * 3, (i % 7) as f64)).collect();
        let s = series(&points);
        for window in [1, 2, 3, 10, 49, 50] {
            let smoothed = moving_average(&s, window).unwrap();
            assert!(
                smoothed.points.windows(2).all(|p| p[0].ordinal < p[1].ordinal),
                "window {window}"
            );
        }
    }

    #[test]
    fn test_invalid_windows() {
        let s = series(&[(0, 1.0), (1, 2.0)]);
        assert_eq!(
            moving_average(&s, 0).unwrap_err(),
            SmoothingError::InvalidWindow { window: 0, len: 2 }
        );
        assert_eq!(
            moving_average(&s, 3).unwrap_err(),
            SmoothingError::InvalidWindow { window: 3, len: 2 }
        );
    }

    #[test]
    fn test_empty_series_rejected() {
        let s = Series::new("empty", vec![]);
        assert!(moving_average(&s, 1).is_err());
    }

    #[test]
    fn test_matches_naive_on_exact_values() {
        // Quarter steps keep every partial sum exact, so both paths agree bit for bit.
        let values: Vec<f64> = (0..10_000).map(|i| ((i * 37 % 8_001) as f64 - 4_000.0) / 4.0).collect();
        for window in [2, 3, 50, 100, 1000, 9_999, 10_000] {
            let fast = moving_average_values(&values, window).unwrap();
            assert_eq!(fast, naive(&values, window), "window {window}");
        }
    }

    #[test]
    fn test_matches_naive_within_tolerance() {
        for seed in 1..6u64 {
            let values = stream(seed, 2_000);
            for window in [2, 7, 64, 500, 1_999, 2_000] {
                let fast = moving_average_values(&values, window).unwrap();
                assert_close(&fast, &naive(&values, window));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let values = stream(42, 500);
        let a = moving_average_values(&values, 25).unwrap();
        let b = moving_average_values(&values, 25).unwrap();
        assert_eq!(a, b);
    }
}
