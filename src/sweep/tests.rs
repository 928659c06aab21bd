//! Tests for the sweep orchestrator and curve fitting

use super::*;
use crate::error::Error;
use crate::optim::{SampleCountOptimizer, SearchBudget};
use approx::assert_relative_eq;

fn fast_sweep() -> Sweep {
    Sweep::new(SampleCountOptimizer::default().with_budget(SearchBudget::new(12, 4))).with_workers(4)
}

#[test]
fn test_sweep_returns_one_entry_per_bit_width() {
    let report = fast_sweep().run(&[4, 8, 12, 16]).unwrap();
    assert_eq!(report.len(), 4);
    assert!(report.is_complete());
    let optima = report.optima();
    assert_eq!(optima.keys().copied().collect::<Vec<_>>(), vec![4, 8, 12, 16]);
    assert!(report.fit.is_ok());
}

#[test]
fn test_sweep_results_independent_of_other_bit_widths() {
    let full = fast_sweep().run(&[4, 8, 12, 16]).unwrap().optima();
    let partial = fast_sweep().run(&[4, 8, 16]).unwrap().optima();
    assert_eq!(partial.len(), 3);
    for bits in [4, 8, 16] {
        assert_eq!(partial[&bits], full[&bits], "bit width {bits}");
    }
}

#[test]
fn test_sweep_isolates_infeasible_bit_width() {
    // 32 bits would need tables of 2^33 entries; it must fail without allocating
    let report = fast_sweep().run(&[4, 32]).unwrap();
    assert_eq!(report.len(), 2);
    assert!(report.get(4).unwrap().is_ok());
    match report.get(32) {
        Some(Err(SweepTaskError::Failed(msg))) => assert!(msg.contains("explicit bounds")),
        other => panic!("expected a failed task for 32 bits, got {other:?}"),
    }
}

#[test]
fn test_sweep_matches_standalone_optimize() {
    let sweep = fast_sweep();
    let report = sweep.run(&[5, 9]).unwrap();
    for bits in [5, 9] {
        let alone = sweep.optimizer().optimize(bits).unwrap();
        assert_eq!(report.get(bits).unwrap().as_ref().unwrap(), &alone);
    }
}

#[test]
fn test_sweep_deduplicates_and_orders_keys() {
    let report = fast_sweep().run(&[6, 3, 6, 3]).unwrap();
    assert_eq!(report.outcomes.keys().copied().collect::<Vec<_>>(), vec![3, 6]);
}

#[test]
fn test_sweep_isolates_failures() {
    let report = fast_sweep().run(&[0, 4, 8, 40]).unwrap();
    assert_eq!(report.len(), 4);
    assert!(!report.is_complete());
    assert!(matches!(report.get(0), Some(Err(SweepTaskError::Failed(_)))));
    assert!(matches!(report.get(40), Some(Err(SweepTaskError::Failed(_)))));
    assert!(report.get(4).unwrap().is_ok());
    assert!(report.get(8).unwrap().is_ok());
    assert_eq!(report.failures().len(), 2);
    // two successes are not enough for a three-parameter fit
    assert_eq!(report.fit, Err(CurveFitError::InsufficientPoints(2)));

    match report.into_result() {
        Err(Error::PartialSweepFailure { failed, succeeded }) => {
            assert_eq!(failed, vec![0, 40]);
            assert_eq!(succeeded, 2);
        }
        other => panic!("expected partial failure, got {other:?}"),
    }
}

#[test]
fn test_sweep_cancelled_before_start() {
    let sweep = fast_sweep();
    sweep.cancellation().cancel();
    let report = sweep.run(&[4, 5, 6]).unwrap();
    assert_eq!(report.len(), 3);
    assert!(report
        .outcomes
        .values()
        .all(|o| matches!(o, Err(SweepTaskError::Cancelled))));
    assert!(report.optima().is_empty());
}

#[test]
fn test_sweep_into_result_success() {
    let (optima, fit) = fast_sweep().run(&[3, 4, 5, 6]).unwrap().into_result().unwrap();
    assert_eq!(optima.len(), 4);
    assert!(fit.residual.is_finite());
}

#[test]
fn test_sweep_empty_input() {
    let report = fast_sweep().run(&[]).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.fit, Err(CurveFitError::InsufficientPoints(0)));
}

#[test]
fn test_fit_recovers_known_parameters() {
    let (a, b, c) = (3.5, 0.45, 12.0);
    let xs: Vec<f64> = (2..=16).map(f64::from).collect();
    let ys: Vec<f64> = xs.iter().map(|x| a * (b * x).exp() + c).collect();
    let fit = fit_exponential(&xs, &ys).unwrap();
    assert!(fit.residual < 1e-6, "residual {}", fit.residual);
    assert_relative_eq!(fit.a, a, max_relative = 1e-4);
    assert_relative_eq!(fit.b, b, max_relative = 1e-4);
    assert_relative_eq!(fit.c, c, max_relative = 1e-4);
    assert_relative_eq!(fit.predict(10.0), a * (b * 10.0f64).exp() + c, max_relative = 1e-6);
}

#[test]
fn test_fit_recovers_negative_offset() {
    let (a, b, c) = (1.2, 0.7, -5.0);
    let xs: Vec<f64> = (1..=10).map(f64::from).collect();
    let ys: Vec<f64> = xs.iter().map(|x| a * (b * x).exp() + c).collect();
    let fit = fit_exponential(&xs, &ys).unwrap();
    assert!(fit.residual < 1e-6, "residual {}", fit.residual);
    assert!(fit.rmse() < 1e-3);
}

#[test]
fn test_fit_input_errors() {
    assert_eq!(
        fit_exponential(&[1.0, 2.0], &[1.0, 2.0]),
        Err(CurveFitError::InsufficientPoints(2))
    );
    assert_eq!(
        fit_exponential(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
        Err(CurveFitError::LengthMismatch { xs: 3, ys: 2 })
    );
    assert_eq!(
        fit_exponential(&[1.0, 2.0, f64::NAN], &[1.0, 2.0, 3.0]),
        Err(CurveFitError::NonFinite)
    );
    assert_eq!(
        fit_exponential(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(CurveFitError::Degenerate)
    );
}
