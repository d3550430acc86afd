use crate::error::{StatsError, StatsResult};

fn non_empty(statistic: &'static str, values: &[f64]) -> StatsResult<()> {
    if values.is_empty() {
        return Err(StatsError::computation(statistic, "no values"));
    }
    Ok(())
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> StatsResult<f64> {
    non_empty("average", values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn max(values: &[f64]) -> StatsResult<f64> {
    non_empty("max", values)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn min(values: &[f64]) -> StatsResult<f64> {
    non_empty("min", values)?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Middle of the sorted values; mean of the two middle values for even counts.
pub fn median(values: &[f64]) -> StatsResult<f64> {
    non_empty("median", values)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Sample standard deviation (n − 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> StatsResult<f64> {
    if values.len() < 2 {
        return Err(StatsError::computation(
            "stddev",
            format!("needs at least 2 values, got {}", values.len()),
        ));
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok((ss / (values.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn mean_min_max() {
        let v = [3.0, 1.0, 2.0];
        assert!((mean(&v).unwrap() - 2.0).abs() < EPS);
        assert_eq!(max(&v).unwrap(), 3.0);
        assert_eq!(min(&v).unwrap(), 1.0);
    }

    #[test]
    fn average_between_extremes() {
        let samples: [&[f64]; 4] = [
            &[5.0],
            &[-3.0, 8.5, 0.0],
            &[1e6, 1e-3, 42.0, 42.0],
            &[-1.0, -2.0, -3.0, -4.0, -5.0],
        ];
        for v in samples {
            let avg = mean(v).unwrap();
            assert!(min(v).unwrap() <= avg && avg <= max(v).unwrap());
        }
    }

    #[test]
    fn median_odd_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn median_ignores_order() {
        let a = [7.0, 1.0, 4.0, 9.0, 2.0, 2.0];
        let mut b = a;
        b.reverse();
        let mut c = a;
        c.sort_by(f64::total_cmp);
        assert_eq!(median(&a).unwrap(), median(&b).unwrap());
        assert_eq!(median(&a).unwrap(), median(&c).unwrap());
    }

    #[test]
    fn std_dev_is_sample() {
        // var = ((−1)² + 0² + 1²) / 2 = 1
        assert!((sample_std_dev(&[1.0, 2.0, 3.0]).unwrap() - 1.0).abs() < EPS);
        assert!((sample_std_dev(&[100.0, 150.0, 200.0]).unwrap() - 50.0).abs() < EPS);
    }

    #[test]
    fn std_dev_single_value_fails() {
        assert!(matches!(
            sample_std_dev(&[4.0]),
            Err(StatsError::Computation { statistic: "stddev", .. })
        ));
    }

    #[test]
    fn empty_input_fails() {
        assert!(mean(&[]).is_err());
        assert!(median(&[]).is_err());
        assert!(min(&[]).is_err());
        assert!(max(&[]).is_err());
    }
}
