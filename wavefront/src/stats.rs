//! Surface error statistics for phase maps
//!
//! Each statistic skips non-finite samples, so maps masked with NaN outside
//! the pupil can be passed directly.

use ndarray::{ArrayBase, Data, Dimension};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("no finite samples among {0} values")]
    NoFiniteSamples(usize),
}

fn finite_values<S, D>(data: &ArrayBase<S, D>) -> Result<Vec<f64>, StatsError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let values: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return Err(StatsError::NoFiniteSamples(data.len()));
    }
    Ok(values)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Peak-to-valley: maximum minus minimum. DIN/ISO St.
pub fn pv<S, D>(data: &ArrayBase<S, D>) -> Result<f64, StatsError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let values = finite_values(data)?;
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    Ok(max - min)
}

/// Root mean square about zero. DIN/ISO Sq.
pub fn rms<S, D>(data: &ArrayBase<S, D>) -> Result<f64, StatsError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let values = finite_values(data)?;
    let squares: Vec<f64> = values.iter().map(|v| v * v).collect();
    Ok(mean(&squares).sqrt())
}

/// Mean absolute deviation about the mean. DIN/ISO Sa.
pub fn sa<S, D>(data: &ArrayBase<S, D>) -> Result<f64, StatsError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let values = finite_values(data)?;
    let mu = mean(&values);
    Ok(values.iter().map(|v| (v - mu).abs()).sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std<S, D>(data: &ArrayBase<S, D>) -> Result<f64, StatsError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let values = finite_values(data)?;
    let mu = mean(&values);
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_pv() {
        let data = array![[1.0, -2.0], [3.5, 0.0]];
        assert_relative_eq!(pv(&data).unwrap(), 5.5);
    }

    #[test]
    fn test_rms_is_about_zero_not_mean() {
        let data = array![[2.0, 2.0], [2.0, 2.0]];
        assert_relative_eq!(rms(&data).unwrap(), 2.0);
        assert_relative_eq!(std(&data).unwrap(), 0.0);
    }

    #[test]
    fn test_sa_and_std() {
        let data = array![[1.0, 3.0], [1.0, 3.0]];
        assert_relative_eq!(sa(&data).unwrap(), 1.0);
        assert_relative_eq!(std(&data).unwrap(), 1.0);
        assert_relative_eq!(rms(&data).unwrap(), 5.0_f64.sqrt());
    }

    #[test]
    fn test_nan_samples_ignored() {
        let data = array![[f64::NAN, 1.0], [3.0, f64::INFINITY]];
        assert_relative_eq!(pv(&data).unwrap(), 2.0);
        assert_relative_eq!(sa(&data).unwrap(), 1.0);
    }

    #[test]
    fn test_all_nan_is_error() {
        let data = array![[f64::NAN, f64::NAN]];
        assert_eq!(pv(&data), Err(StatsError::NoFiniteSamples(2)));
        assert!(rms(&data).is_err());
        assert!(sa(&data).is_err());
        assert!(std(&data).is_err());
    }

    #[test]
    fn test_works_on_views_and_1d() {
        let data = array![[0.0, 4.0, 8.0], [1.0, 2.0, 3.0]];
        assert_relative_eq!(pv(&data.row(0)).unwrap(), 8.0);
        assert_relative_eq!(pv(&data.column(2)).unwrap(), 5.0);
    }
}
