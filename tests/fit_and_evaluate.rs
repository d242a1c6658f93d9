//! End-to-end properties of the fitter/evaluator pair.

use approx::assert_relative_eq;

use best_fit::data::synthetic::{SyntheticSpec, generate_samples};
use best_fit::fit::fit_candidate;
use best_fit::{
    EvaluationRequest, FitError, ModelKind, SampleSet, evaluate, evaluate_model, evaluate_request,
    fit_and_select, fit_best,
};

#[test]
fn exact_line_is_linear_with_unit_score() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [2.0, 4.0, 6.0, 8.0, 10.0];

    let best = fit_best(&x, &y).unwrap();
    assert_eq!(best.kind, ModelKind::Linear);
    assert_eq!(best.coefficients.len(), 1);
    assert_relative_eq!(best.coefficients[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(best.intercept, 0.0, epsilon = 1e-9);
    assert_relative_eq!(best.score, 1.0, epsilon = 1e-12);
}

#[test]
fn offset_line_recovers_slope_and_intercept() {
    let x: Vec<f64> = (0..12).map(|i| i as f64 * 0.75 - 3.0).collect();
    let y: Vec<f64> = x.iter().map(|v| -1.25 * v + 7.5).collect();

    let best = fit_best(&x, &y).unwrap();
    assert_eq!(best.kind, ModelKind::Linear);
    assert_relative_eq!(best.coefficients[0], -1.25, epsilon = 1e-9);
    assert_relative_eq!(best.intercept, 7.5, epsilon = 1e-9);
}

#[test]
fn pure_quadratic_beats_linear() {
    let samples = SampleSet::from_slices(&[1.0, 2.0, 3.0], &[1.0, 4.0, 9.0]).unwrap();
    let linear = fit_candidate(ModelKind::Linear, &samples).unwrap().unwrap();
    let poly = fit_candidate(ModelKind::Polynomial2, &samples).unwrap().unwrap();
    assert!(poly.score > linear.score);

    let best = fit_and_select(&samples).unwrap().best;
    assert_eq!(best.kind, ModelKind::Polynomial2);
    assert_eq!(best.coefficients.len(), 3);
    assert_relative_eq!(best.coefficients[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(best.coefficients[1], 0.0, epsilon = 1e-9);
    assert_relative_eq!(best.coefficients[2], 1.0, epsilon = 1e-9);
}

#[test]
fn non_positive_x_never_selects_logarithmic() {
    let x = [-5.0, -3.5, -2.0, -1.0, 0.0];
    let y = [3.0, 1.0, 4.0, 1.0, 5.0];

    let samples = SampleSet::from_slices(&x, &y).unwrap();
    assert_eq!(fit_candidate(ModelKind::Logarithmic, &samples).unwrap(), None);

    let selection = fit_and_select(&samples).unwrap();
    assert_ne!(selection.best.kind, ModelKind::Logarithmic);
    assert!(selection.fits.iter().all(|f| f.kind != ModelKind::Logarithmic));
}

#[test]
fn evaluate_reproduces_noiseless_samples() {
    let cases: Vec<(ModelKind, Vec<f64>, f64)> = vec![
        (ModelKind::Linear, vec![0.8], -2.0),
        (ModelKind::Polynomial2, vec![3.0, -1.5, 0.4], 0.0),
        (ModelKind::Logarithmic, vec![4.0], 0.5),
    ];

    for (kind, coefficients, intercept) in cases {
        let spec = SyntheticSpec {
            kind,
            coefficients,
            intercept,
            n: 25,
            x_min: 0.5,
            x_max: 12.0,
            noise: 0.0,
            seed: 11,
        };
        let samples = generate_samples(&spec).unwrap();
        let best = fit_best(samples.x(), samples.y()).unwrap();
        assert_eq!(best.kind, kind, "wrong shape selected for {kind}");

        for (xi, yi) in samples.iter() {
            let y_hat = evaluate(best.kind, &best.coefficients, best.intercept, xi).unwrap();
            assert_relative_eq!(y_hat, yi, epsilon = 1e-7, max_relative = 1e-9);
        }
    }
}

#[test]
fn selection_score_dominates_every_candidate() {
    for seed in 0..20u64 {
        let kind = ModelKind::ALL[(seed % 3) as usize];
        let spec = SyntheticSpec {
            kind,
            coefficients: vec![1.5, -0.5, 0.1],
            intercept: 2.0,
            n: 30,
            x_min: 0.2,
            x_max: 15.0,
            noise: 1.0,
            seed,
        };
        let samples = generate_samples(&spec).unwrap();
        let best = fit_and_select(&samples).unwrap().best;

        for candidate in ModelKind::ALL {
            if let Ok(Some(fit)) = fit_candidate(candidate, &samples) {
                assert!(
                    best.score >= fit.score,
                    "seed {seed}: selected {} ({}) below {candidate} ({})",
                    best.kind,
                    best.score,
                    fit.score
                );
            }
        }
    }
}

#[test]
fn logarithmic_evaluation_rejects_non_positive_x() {
    for x in [0.0, -0.001, -10.0] {
        let err = evaluate(ModelKind::Logarithmic, &[1.0], 0.0, x).unwrap_err();
        assert!(matches!(err, FitError::DomainError { .. }));
    }
}

#[test]
fn linear_evaluation_example() {
    assert_eq!(evaluate(ModelKind::Linear, &[3.0], 1.0, 5.0).unwrap(), 16.0);

    let req: EvaluationRequest =
        serde_json::from_str(r#"{"model": "Linear", "coeffs": [3], "intercept": 1, "x": 5}"#).unwrap();
    let resp = evaluate_request(&req).unwrap();
    assert_eq!(resp.x, 5.0);
    assert_eq!(resp.y, 16.0);
}

#[test]
fn fitted_model_survives_json_and_still_evaluates() {
    let best = fit_best(&[1.0, 2.0, 3.0, 4.0], &[2.0, 5.0, 10.0, 17.0]).unwrap();
    let json = serde_json::to_string(&best).unwrap();
    let loaded: best_fit::FittedModel = serde_json::from_str(&json).unwrap();

    assert_eq!(loaded.kind, ModelKind::Polynomial2);
    assert_relative_eq!(evaluate_model(&loaded, 5.0).unwrap(), 26.0, epsilon = 1e-8);
}

#[test]
fn degenerate_inputs_fail_cleanly() {
    assert_eq!(
        fit_best(&[1.0, 2.0], &[1.0]).unwrap_err(),
        FitError::DimensionMismatch { x_len: 2, y_len: 1 }
    );
    assert_eq!(
        fit_best(&[], &[]).unwrap_err(),
        FitError::InsufficientData { required: 2, got: 0 }
    );
    assert_eq!(fit_best(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap_err(), FitError::NoViableModel);
}
