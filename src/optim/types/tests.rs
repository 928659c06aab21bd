//! Tests for search types

use super::*;
use crate::error::Error;
use crate::quant::{MAX_BIT_WIDTH, MAX_SAMPLE_COUNT};
use approx::assert_abs_diff_eq;

#[test]
fn test_bounds_new_rejects_inverted() {
    assert!(matches!(SearchBounds::new(64, 64), Err(Error::Configuration(_))));
    assert!(matches!(SearchBounds::new(65, 64), Err(Error::Configuration(_))));
    assert!(matches!(SearchBounds::new(2, 64), Err(Error::Configuration(_))));
    assert!(SearchBounds::new(4, 5).is_ok());
}

#[test]
fn test_bounds_for_bit_width() {
    assert_eq!(
        SearchBounds::for_bit_width(8).unwrap(),
        SearchBounds::new(128, 1024).unwrap()
    );
    assert_eq!(
        SearchBounds::for_bit_width(3).unwrap(),
        SearchBounds::new(18, 32).unwrap()
    );
    // 2·1² = 2 is clamped to the minimum sample count
    assert_eq!(
        SearchBounds::for_bit_width(1).unwrap(),
        SearchBounds::new(4, 8).unwrap()
    );
    assert!(SearchBounds::for_bit_width(0).is_err());
}

#[test]
fn test_bounds_reject_infeasible_sample_counts() {
    // 4·2^22 is the widest default range that stays within the limit
    assert_eq!(
        SearchBounds::for_bit_width(22).unwrap().max(),
        MAX_SAMPLE_COUNT
    );
    for bits in 23..=MAX_BIT_WIDTH {
        assert!(matches!(
            SearchBounds::for_bit_width(bits),
            Err(Error::Configuration(_))
        ));
    }
    assert!(matches!(
        SearchBounds::new(4, MAX_SAMPLE_COUNT + 1),
        Err(Error::Configuration(_))
    ));
    assert!(SearchBounds::new(4, MAX_SAMPLE_COUNT).is_ok());
}

#[test]
fn test_bounds_deserialize_validates() {
    let bounds: SearchBounds = serde_json::from_str(r#"{"min": 16, "max": 64}"#).unwrap();
    assert_eq!(bounds, SearchBounds::new(16, 64).unwrap());
    assert!(serde_json::from_str::<SearchBounds>(r#"{"min": 100, "max": 50}"#).is_err());
}

#[test]
fn test_bounds_normalize_roundtrip_endpoints() {
    let bounds = SearchBounds::new(10, 110).unwrap();
    assert_eq!(bounds.size(), 101);
    assert_eq!((bounds.min(), bounds.max()), (10, 110));
    assert_abs_diff_eq!(bounds.normalize(10), 0.0);
    assert_abs_diff_eq!(bounds.normalize(60), 0.5);
    assert_abs_diff_eq!(bounds.normalize(110), 1.0);
    assert_eq!(bounds.denormalize(0.0), 10);
    assert_eq!(bounds.denormalize(1.0), 110);
    assert_eq!(bounds.denormalize(2.0), 110);
    assert_eq!(bounds.denormalize(-1.0), 10);
    assert!(bounds.contains(10) && bounds.contains(110) && !bounds.contains(111));
}

#[test]
fn test_budget_validate() {
    assert!(SearchBudget::default().validate().is_ok());
    assert!(matches!(
        SearchBudget::new(5, 10).validate(),
        Err(Error::SearchBudget {
            initial_points: 10,
            total_calls: 5
        })
    ));
    assert!(matches!(
        SearchBudget::new(0, 0).validate(),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        SearchBudget::new(10, 0).validate(),
        Err(Error::Configuration(_))
    ));
    assert_eq!(SearchBudget::new(30, 10).guided_calls(), 20);
}

#[test]
fn test_expected_improvement() {
    let ei = AcquisitionFunction::ExpectedImprovement { xi: 0.0 };
    // zero variance collapses to plain improvement
    assert_abs_diff_eq!(ei.evaluate(1.0, 0.0, 3.0), 2.0);
    assert_abs_diff_eq!(ei.evaluate(5.0, 0.0, 3.0), 0.0);
    // mean at incumbent: EI = std * φ(0)
    assert_abs_diff_eq!(ei.evaluate(3.0, 1.0, 3.0), normal_pdf_zero(), epsilon = 1e-6);
    // lower mean is better
    assert!(ei.evaluate(2.0, 1.0, 3.0) > ei.evaluate(2.5, 1.0, 3.0));
    // more uncertainty is better at equal mean
    assert!(ei.evaluate(3.0, 2.0, 3.0) > ei.evaluate(3.0, 1.0, 3.0));
}

fn normal_pdf_zero() -> f64 {
    1.0 / (2.0 * std::f64::consts::PI).sqrt()
}

#[test]
fn test_probability_of_improvement() {
    let pi = AcquisitionFunction::ProbabilityOfImprovement { xi: 0.0 };
    assert_abs_diff_eq!(pi.evaluate(3.0, 1.0, 3.0), 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(pi.evaluate(1.0, 0.0, 3.0), 1.0);
    assert_abs_diff_eq!(pi.evaluate(4.0, 0.0, 3.0), 0.0);
}

#[test]
fn test_lower_confidence_bound() {
    let lcb = AcquisitionFunction::LowerConfidenceBound { kappa: 2.0 };
    assert_abs_diff_eq!(lcb.evaluate(1.0, 0.5, 0.0), 0.0);
    assert!(lcb.evaluate(0.0, 1.0, 0.0) > lcb.evaluate(1.0, 1.0, 0.0));
}

#[test]
fn test_result_convergence_and_phase_count() {
    let result = OptimizationResult {
        bit_width: 4,
        best_sample_count: 40,
        best_loss: 1.0,
        trace: vec![
            Evaluation { sample_count: 50, loss: 3.0, phase: EvaluationPhase::Initial },
            Evaluation { sample_count: 40, loss: 1.0, phase: EvaluationPhase::Initial },
            Evaluation { sample_count: 45, loss: 2.0, phase: EvaluationPhase::Guided },
        ],
    };
    assert_eq!(result.n_evaluations(), 3);
    assert_eq!(result.phase_count(EvaluationPhase::Initial), 2);
    assert_eq!(result.phase_count(EvaluationPhase::Guided), 1);
    assert_eq!(result.convergence(), vec![3.0, 1.0, 1.0]);
}

#[test]
fn test_acquisition_serde_roundtrip() {
    let acq = AcquisitionFunction::LowerConfidenceBound { kappa: 1.96 };
    let yaml = serde_yaml::to_string(&acq).unwrap();
    assert!(yaml.contains("lower_confidence_bound"));
    let back: AcquisitionFunction = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, acq);
}
