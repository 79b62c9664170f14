// Small statistics helpers for validating displacement distributions

/// Arithmetic mean of a sample; 0 for an empty slice
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Unbiased sample variance (Bessel's correction); 0 for fewer than two samples
pub fn sample_variance(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    samples.iter().map(|s| (s - m).powi(2)).sum::<f64>() / (samples.len() - 1) as f64
}

/// Percentage deviation of `actual` from `expected`.
///
/// Infinite when `expected` is zero but `actual` is not.
pub fn deviation(actual: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        if actual.abs() < f64::EPSILON {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        ((actual - expected).abs() / expected.abs()) * 100.0
    }
}

/// Assert that `actual` deviates from `expected` by less than
/// `max_deviation` percent. Used by the statistical calibration tests,
/// where tolerances scale with sample count rather than being exact.
#[macro_export]
macro_rules! assert_deviation {
    ($actual:expr, $expected:expr, $max_deviation:expr) => {{
        let actual_val = $actual;
        let expected_val = $expected;
        let dev = $crate::stats::deviation(actual_val, expected_val);
        if dev >= $max_deviation {
            panic!(
                "assertion failed: deviation {:.2}% >= {:.2}%\n  actual: {:?}\n  expected: {:?}",
                dev, $max_deviation, actual_val, expected_val
            );
        }
    }};
    ($actual:expr, $expected:expr, $max_deviation:expr, $($arg:tt)+) => {{
        let actual_val = $actual;
        let expected_val = $expected;
        let dev = $crate::stats::deviation(actual_val, expected_val);
        if dev >= $max_deviation {
            panic!(
                "assertion failed: deviation {:.2}% >= {:.2}%: {}\n  actual: {:?}\n  expected: {:?}",
                dev, $max_deviation, format_args!($($arg)+), actual_val, expected_val
            );
        }
    }};
}
