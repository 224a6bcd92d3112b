use super::engine::Prediction;
use crate::error::{RecommendError, Result};
use serde::Serialize;

/// Pearson correlation coefficient of two equal-length sequences.
///
/// Fails on mismatched lengths, on fewer than two values, on non-finite
/// values and when either side has zero variance, since the coefficient
/// is undefined there.
pub fn correlation(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    let n = predicted.len();
    if n != actual.len() {
        return Err(RecommendError::InvalidInput(format!(
            "correlation needs equal lengths, got {} predicted and {} actual",
            n,
            actual.len()
        )));
    }
    if n < 2 {
        return Err(RecommendError::InvalidInput(format!(
            "correlation needs at least 2 values, got {}",
            n
        )));
    }
    if predicted.iter().chain(actual).any(|v| !v.is_finite()) {
        return Err(RecommendError::InvalidInput(
            "correlation of non-finite values".to_string(),
        ));
    }

    let x_mean = predicted.iter().sum::<f64>() / n as f64;
    let y_mean = actual.iter().sum::<f64>() / n as f64;

    let mut cov_sum = 0.0;
    let mut x_var_sum = 0.0;
    let mut y_var_sum = 0.0;
    for (&x, &y) in predicted.iter().zip(actual) {
        let x_diff = x - x_mean;
        let y_diff = y - y_mean;
        cov_sum += x_diff * y_diff;
        x_var_sum += x_diff * x_diff;
        y_var_sum += y_diff * y_diff;
    }

    if x_var_sum < 1e-12 || y_var_sum < 1e-12 {
        return Err(RecommendError::InvalidInput(
            "correlation undefined for zero variance".to_string(),
        ));
    }

    // rounding can push a perfect fit just past the bounds
    Ok((cov_sum / (x_var_sum.sqrt() * y_var_sum.sqrt())).clamp(-1.0, 1.0))
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub predictions: Vec<Prediction>,
    pub correlation: Option<f64>,
    pub mean_absolute_error: Option<f64>,
}

impl Report {
    pub fn new(predictions: Vec<Prediction>, correlation: Option<f64>) -> Self {
        let mean_absolute_error = if predictions.is_empty() {
            None
        } else {
            let total = predictions
                .iter()
                .map(|p| (p.predicted - p.actual).abs())
                .sum::<f64>();
            Some(total / predictions.len() as f64)
        };

        Self {
            predictions,
            correlation,
            mean_absolute_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(predicted: f64, actual: f64) -> Prediction {
        Prediction {
            user: 1,
            title: "A".to_string(),
            predicted,
            actual,
        }
    }

    #[test]
    fn identical_sequences_correlate_perfectly() {
        let c = correlation(&[5.0, 3.0, 1.0], &[5.0, 3.0, 1.0]).unwrap();
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_sequences_anticorrelate() {
        let c = correlation(&[5.0, 3.0, 1.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!((c + 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(correlation(&[1.0, 2.0], &[1.0]).is_err());
        assert!(correlation(&[1.0], &[1.0]).is_err());
        assert!(correlation(&[], &[]).is_err());
        assert!(correlation(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
        assert!(correlation(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn report_computes_mean_absolute_error() {
        let report = Report::new(
            vec![
                prediction(4.0, 5.0),
                prediction(3.0, 3.0),
                prediction(2.0, 1.0),
            ],
            Some(1.0),
        );
        assert_eq!(report.correlation, Some(1.0));
        assert!((report.mean_absolute_error.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_report_has_no_error() {
        let report = Report::new(Vec::new(), None);
        assert_eq!(report.mean_absolute_error, None);
    }
}
