//! Descriptive statistics over price series.
//!
//! The quantile uses linear interpolation between order statistics and the
//! standard deviation is the sample estimator (n-1 denominator).

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation. Zero for fewer than two values.
pub fn sample_stddev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Quantile of an ascending-sorted slice, `q` in [0, 1], interpolating
/// linearly between neighboring order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

pub fn median(sorted: &[f64]) -> f64 {
    quantile(sorted, 0.5)
}

/// Interquartile range Q3 - Q1 of an ascending-sorted slice.
pub fn iqr(sorted: &[f64]) -> f64 {
    quantile(sorted, 0.75) - quantile(sorted, 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_basic() {
        assert_relative_eq!(mean(&[10.0, 20.0, 30.0]), 20.0);
    }

    #[test]
    fn mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn stddev_known_values() {
        // Sample stddev of [2,4,4,4,5,5,7,9]: population is exactly 2,
        // sample is sqrt(32/7).
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(
            sample_stddev(&values),
            (32.0_f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn stddev_constant_series_is_zero() {
        assert_eq!(sample_stddev(&[42.0, 42.0, 42.0, 42.0]), 0.0);
    }

    #[test]
    fn stddev_single_value_is_zero() {
        assert_eq!(sample_stddev(&[5.0]), 0.0);
    }

    #[test]
    fn quantile_endpoints() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn quantile_interpolates() {
        // Position 0.25 * 3 = 0.75 between 1 and 2.
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&sorted, 0.25), 1.75);
        assert_relative_eq!(quantile(&sorted, 0.5), 2.5);
        assert_relative_eq!(quantile(&sorted, 0.75), 3.25);
    }

    #[test]
    fn median_odd_length() {
        assert_eq!(median(&[1.0, 5.0, 9.0]), 5.0);
    }

    #[test]
    fn iqr_flat_quartiles() {
        // Q1 and Q3 both land on 10, so the outlier never widens the range.
        let sorted = [10.0, 10.0, 10.0, 10.0, 100.0];
        assert_eq!(iqr(&sorted), 0.0);
        assert_eq!(median(&sorted), 10.0);
    }

    #[test]
    fn iqr_spread_series() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(iqr(&sorted), 2.0);
    }
}
