//! Statistical properties of the Monte-Carlo tolerance engine
//!
//! These tests run seeded simulations and check the engine's outputs
//! against distributional facts with tolerance bands.

use tolerance_confidence::ToleranceEngine;
use tolerance_core::{linspace, LocationScaleFamily, Normal, Uniform};

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn coverage_entries_stay_in_unit_interval() {
    let mut engine = ToleranceEngine::new(Normal::standard()).with_seed(42);
    let factors = linspace(0.0, 5.0, 10);
    let tensor = engine.compute_coverages(10, 200, &factors, &factors).unwrap();

    assert!(
        tensor.entries().iter().all(|&c| (0.0..=1.0).contains(&c)),
        "Every coverage entry must lie in [0, 1]"
    );
}

#[test]
fn confidence_is_monotone_in_threshold() {
    let mut engine = ToleranceEngine::new(Normal::standard()).with_seed(7);
    let factors = linspace(0.5, 3.0, 6);
    engine.compute_coverages(10, 500, &factors, &factors).unwrap();

    let thresholds = [0.5, 0.8, 0.9, 0.99];
    let surfaces = engine.compute_confidence(&thresholds).unwrap().to_vec();

    for pair in surfaces.windows(2) {
        for i in 0..pair[0].n_lower() {
            for j in 0..pair[0].n_upper() {
                assert!(
                    pair[0].get(i, j) >= pair[1].get(i, j),
                    "Confidence must be non-increasing in the threshold at ({i}, {j})"
                );
            }
        }
    }
}

#[test]
fn symmetric_pair_tracks_population_mass() {
    // With k1 = k2 = 2 and a symmetric population, coverage concentrates
    // around cdf(2) - cdf(-2)
    let family = Normal::standard();
    let expected = family.cdf(2.0) - family.cdf(-2.0);

    let mut engine = ToleranceEngine::new(family).with_seed(11);
    let tensor = engine.compute_coverages(50, 2_000, &[2.0], &[2.0]).unwrap();

    let mean_coverage =
        tensor.entries().iter().sum::<f64>() / tensor.entries().len() as f64;
    println!("mean coverage {mean_coverage:.4}, population mass {expected:.4}");

    assert!(
        (mean_coverage - expected).abs() < 0.03,
        "Mean coverage {mean_coverage} should be near {expected}"
    );
}

#[test]
fn confidence_approaches_one_for_generous_factors() {
    // A +/- 3 sigma interval covers ~99.7% of the population, so its
    // confidence of reaching 95% coverage should be nearly certain
    let mut engine = ToleranceEngine::new(Normal::standard()).with_seed(3);
    engine.compute_coverages(30, 5_000, &[3.0], &[3.0]).unwrap();

    let confidence = engine.confidence_for_single_pair(0.95).unwrap();
    println!("confidence at 0.95 threshold: {confidence:.4}");

    assert!((0.0..=1.0).contains(&confidence));
    assert!(
        confidence > 0.95,
        "Confidence {confidence} should be close to 1 for generous factors"
    );
}

#[test]
fn single_pair_confidence_matches_surface_entry() {
    let mut engine = ToleranceEngine::new(Normal::standard()).with_seed(19);
    engine.compute_coverages(10, 500, &[2.0], &[2.0]).unwrap();

    let surface = engine.compute_confidence(&[0.9]).unwrap()[0].clone();
    let scalar = engine.confidence_for_single_pair(0.9).unwrap();

    assert_eq!(
        scalar,
        surface.get(0, 0),
        "Scalar confidence must equal the singleton surface entry"
    );
}

#[test]
fn estimated_coverage_sits_near_median_coverage() {
    // k = 0.6745 puts the median coverage of a symmetric interval near 0.5,
    // so requiring 50% confidence should estimate a coverage near 0.5
    let mut engine = ToleranceEngine::new(Normal::standard()).with_seed(23);
    engine
        .compute_coverages(50, 2_000, &[0.6745], &[0.6745])
        .unwrap();

    let estimate = engine.estimate_required_coverage(0.5).unwrap();
    println!("estimated coverage: {estimate:.4}");

    assert!(
        (estimate - 0.5).abs() < 0.1,
        "Estimate {estimate} should sit near the median coverage 0.5"
    );
}

#[test]
fn tolerance_bound_recovers_three_sigma_coverage() {
    // End-to-end inversion: a sample from the population itself with a
    // +/- 3 sigma acceptance criterion should land on a coverage close to
    // the nominal 0.9973 of a three-sigma interval
    let family = Normal::standard();
    let mut engine = ToleranceEngine::new(family).with_seed(31);

    let factors = linspace(0.0, 5.0, 11);
    engine.compute_coverages(50, 1_500, &factors, &factors).unwrap();
    engine.compute_confidence(&linspace(0.0, 1.0, 51)).unwrap();

    let mut rng = StdRng::seed_from_u64(101);
    let observed = Normal::standard().sample(&mut rng, 100);

    let coverage = engine
        .estimate_tolerance_bound(&observed, 0.95, -3.0, 3.0)
        .unwrap();
    println!("estimated coverage for +/- 3 sigma criterion: {coverage:.4}");

    assert!(
        (coverage - 0.9973).abs() < 0.05,
        "Coverage {coverage} should be near the nominal 0.9973"
    );
}

#[test]
fn uniform_family_runs_end_to_end() {
    let mut engine =
        ToleranceEngine::new(Uniform::new(0.0, 1.0).unwrap()).with_seed(13);
    let factors = linspace(0.0, 2.0, 5);
    let tensor = engine.compute_coverages(20, 300, &factors, &factors).unwrap();

    assert!(tensor.entries().iter().all(|&c| (0.0..=1.0).contains(&c)));

    let surfaces = engine.compute_confidence(&[0.5, 0.9]).unwrap();
    assert_eq!(surfaces.len(), 2);
}
