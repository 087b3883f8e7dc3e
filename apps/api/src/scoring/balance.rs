//! Balance Calculator: rewards evenly competent resumes over spiky ones.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub mean: f64,
    pub stdev: f64,
    pub score: u8,
}

/// Mean and population standard deviation of the base sub-scores, banded on stdev.
pub fn compute_balance(scores: &[u8]) -> BalanceReport {
    let n = scores.len().max(1) as f64;
    let mean = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / n;
    let variance = scores
        .iter()
        .map(|&s| (f64::from(s) - mean).powi(2))
        .sum::<f64>()
        / n;
    let stdev = variance.sqrt();

    let score = match stdev {
        s if s < 8.0 => 100,
        s if s < 15.0 => 80,
        s if s < 25.0 => 60,
        _ => 40,
    };

    BalanceReport { mean, stdev, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_scores_are_perfectly_balanced() {
        let report = compute_balance(&[70; 8]);
        assert_eq!(report.mean, 70.0);
        assert_eq!(report.stdev, 0.0);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_population_stdev() {
        // mean 5, population stdev 2
        let report = compute_balance(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert!((report.mean - 5.0).abs() < 1e-9);
        assert!((report.stdev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bands() {
        assert_eq!(compute_balance(&[50, 70]).score, 80); // stdev 10
        assert_eq!(compute_balance(&[40, 80]).score, 60); // stdev 20
        assert_eq!(compute_balance(&[0, 100]).score, 40); // stdev 50
    }

    #[test]
    fn test_same_mean_spiky_profile_scores_lower() {
        let even = compute_balance(&[60, 60, 60, 60]);
        let spiky = compute_balance(&[100, 20, 100, 20]);
        assert_eq!(even.mean, spiky.mean);
        assert!(even.score > spiky.score);
    }

    #[test]
    fn test_empty_input_does_not_divide_by_zero() {
        let report = compute_balance(&[]);
        assert_eq!(report.mean, 0.0);
        assert_eq!(report.score, 100);
    }
}
