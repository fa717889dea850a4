//! Monte-Carlo tolerance engine
//!
//! The engine simulates repeated sampling from a reference distribution,
//! fits location/scale parameters per trial, evaluates the coverage of every
//! candidate tolerance interval, and derives empirical confidence levels as
//! order statistics over the trials. The coverage/confidence mapping can be
//! inverted two ways: by nearest-neighbor lookup over a precomputed grid, or
//! by simplex minimization for a single factor pair.

use crate::simplex::NelderMead;
use crate::types::{ConfidenceSurface, CoverageTensor, ToleranceFactorGrid};
use rand::prelude::*;
use tolerance_core::{search_nearest, Error, FittedParameters, LocationScaleFamily, Result};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Coverage state produced by one simulation run
#[derive(Debug, Clone)]
struct CoverageState {
    grid: ToleranceFactorGrid,
    coverages: CoverageTensor,
}

/// Thresholds paired with the confidence surfaces computed for them
#[derive(Debug, Clone)]
struct ConfidenceSet {
    thresholds: Vec<f64>,
    surfaces: Vec<ConfidenceSurface>,
}

/// Monte-Carlo engine for tolerance interval coverage and confidence
///
/// Operations have a fixed order: [`compute_coverages`] must run before
/// [`compute_confidence`], which must run before
/// [`estimate_tolerance_bound`]. Each producing call fully overwrites the
/// state of the previous one; recomputing coverages discards cached
/// confidence surfaces, since they describe the discarded tensor. The
/// engine is a single-writer object: concurrent producing calls require
/// external synchronization.
///
/// Coverage is stored with axes `(lower factor, trial, upper factor)`;
/// confidence reduces the trial axis.
///
/// [`compute_coverages`]: ToleranceEngine::compute_coverages
/// [`compute_confidence`]: ToleranceEngine::compute_confidence
/// [`estimate_tolerance_bound`]: ToleranceEngine::estimate_tolerance_bound
#[derive(Debug, Clone)]
pub struct ToleranceEngine<D> {
    distribution: D,
    seed: Option<u64>,
    minimizer: NelderMead,
    state: Option<CoverageState>,
    confidence: Option<ConfidenceSet>,
}

impl<D: LocationScaleFamily> ToleranceEngine<D> {
    /// Create an engine over the given reference distribution
    pub fn new(distribution: D) -> Self {
        Self {
            distribution,
            seed: None,
            minimizer: NelderMead::new(),
            state: None,
            confidence: None,
        }
    }

    /// Set a random seed for reproducible simulation
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the minimizer used by [`estimate_required_coverage`]
    ///
    /// [`estimate_required_coverage`]: ToleranceEngine::estimate_required_coverage
    pub fn with_minimizer(mut self, minimizer: NelderMead) -> Self {
        self.minimizer = minimizer;
        self
    }

    /// The reference distribution
    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    /// The coverage tensor from the last simulation, if any
    pub fn coverages(&self) -> Option<&CoverageTensor> {
        self.state.as_ref().map(|s| &s.coverages)
    }

    /// The factor grid from the last simulation, if any
    pub fn factor_grid(&self) -> Option<&ToleranceFactorGrid> {
        self.state.as_ref().map(|s| &s.grid)
    }

    /// The cached thresholds and confidence surfaces, if any
    pub fn confidence_pairs(&self) -> Option<(&[f64], &[ConfidenceSurface])> {
        self.confidence
            .as_ref()
            .map(|c| (c.thresholds.as_slice(), c.surfaces.as_slice()))
    }

    /// Simulate trials and compute the coverage tensor
    ///
    /// Draws `num_trials` independent samples of size `sample_size`, fits
    /// (location, scale) per trial, and evaluates the coverage
    /// `cdf(loc + k2 * scale) - cdf(loc - k1 * scale)` for every factor pair
    /// in the outer product of `lower_factors` and `upper_factors`.
    ///
    /// A fit that degenerates on any trial fails the whole computation;
    /// trials are never silently skipped.
    #[instrument(skip(self, lower_factors, upper_factors), fields(n_lower = lower_factors.len(), n_upper = upper_factors.len()))]
    pub fn compute_coverages(
        &mut self,
        sample_size: usize,
        num_trials: usize,
        lower_factors: &[f64],
        upper_factors: &[f64],
    ) -> Result<&CoverageTensor> {
        if sample_size < 1 {
            return Err(Error::InvalidParameter(
                "sample_size must be at least 1".to_string(),
            ));
        }
        if num_trials < 1 {
            return Err(Error::InvalidParameter(
                "num_trials must be at least 1".to_string(),
            ));
        }
        let grid = ToleranceFactorGrid::new(lower_factors, upper_factors)?;

        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        debug!(
            "Simulating {} trials of size {} from the {} family",
            num_trials,
            sample_size,
            self.distribution.name()
        );

        let fitted = self.fit_trials(seed, sample_size, num_trials)?;

        let n_lower = grid.lower().len();
        let n_upper = grid.upper().len();
        let mut data = Vec::with_capacity(n_lower * num_trials * n_upper);
        for &k1 in grid.lower() {
            for params in &fitted {
                let lower_mass = self.distribution.cdf(params.location - k1 * params.scale);
                for &k2 in grid.upper() {
                    let upper_mass = self.distribution.cdf(params.location + k2 * params.scale);
                    data.push(upper_mass - lower_mass);
                }
            }
        }

        debug!("Coverage tensor computed: {}x{}x{}", n_lower, num_trials, n_upper);

        // Surfaces cached from a previous run describe the discarded tensor
        self.confidence = None;
        let state = self.state.insert(CoverageState {
            grid,
            coverages: CoverageTensor::from_parts(data, n_lower, num_trials, n_upper),
        });
        Ok(&state.coverages)
    }

    /// Compute one confidence surface per coverage threshold
    ///
    /// Entry `(i, j)` of a surface is the fraction of trials whose coverage
    /// at factor pair `(i, j)` meets or exceeds the threshold. The
    /// thresholds and surfaces are cached for later inversion via
    /// [`estimate_tolerance_bound`].
    ///
    /// [`estimate_tolerance_bound`]: ToleranceEngine::estimate_tolerance_bound
    pub fn compute_confidence(&mut self, thresholds: &[f64]) -> Result<&[ConfidenceSurface]> {
        let state = self.state.as_ref().ok_or_else(|| {
            Error::precursor("compute_confidence", "compute_coverages")
        })?;
        if thresholds.is_empty() {
            return Err(Error::InvalidParameter(
                "coverage thresholds must be non-empty".to_string(),
            ));
        }
        if let Some(&bad) = thresholds.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(Error::invalid_threshold(bad));
        }

        let surfaces: Vec<ConfidenceSurface> = thresholds
            .iter()
            .map(|&p| confidence_surface(&state.coverages, p))
            .collect();

        debug!("Computed {} confidence surfaces", surfaces.len());

        let set = self.confidence.insert(ConfidenceSet {
            thresholds: thresholds.to_vec(),
            surfaces,
        });
        Ok(&set.surfaces)
    }

    /// Scalar confidence for a single factor pair
    ///
    /// Requires singleton factor grids (one lower and one upper factor).
    /// Reads the stored coverage tensor directly and leaves the cached
    /// threshold/surface pairs untouched.
    pub fn confidence_for_single_pair(&self, threshold: f64) -> Result<f64> {
        let state = self.single_pair_state("confidence_for_single_pair")?;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::invalid_threshold(threshold));
        }
        Ok(single_pair_confidence(&state.coverages, threshold))
    }

    /// Estimate the coverage level whose confidence matches a requirement
    ///
    /// Minimizes `(required_confidence - confidence(p))^2` over `p` in
    /// [0, 1] with a simplex search started at `p = 0.5`. The objective is
    /// piecewise constant, so the result is approximate and sensitive to
    /// the starting point; the search stops on simplex collapse or fails
    /// with [`Error::ConvergenceFailure`] at its iteration budget.
    pub fn estimate_required_coverage(&self, required_confidence: f64) -> Result<f64> {
        if !(required_confidence > 0.0 && required_confidence < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "Required confidence {required_confidence} must be in (0, 1)"
            )));
        }
        let state = self.single_pair_state("estimate_required_coverage")?;
        let tensor = &state.coverages;

        let objective = |p: f64| {
            // The simplex may probe outside the threshold domain
            let confidence = single_pair_confidence(tensor, p.clamp(0.0, 1.0));
            let distance = required_confidence - confidence;
            distance * distance
        };

        let p = self.minimizer.minimize(objective, 0.5)?;
        let estimate = p.clamp(0.0, 1.0);
        debug!(
            "Estimated coverage {} for required confidence {}",
            estimate, required_confidence
        );
        Ok(estimate)
    }

    /// Estimate the coverage achieved by an acceptance criterion
    ///
    /// Fits the observed `sample`, converts the criterion interval
    /// `[lower_criterion_bound, upper_criterion_bound]` into ideal tolerance
    /// factors, snaps those to the nearest grid entries, and scans the
    /// cached threshold/surface pairs for the threshold whose confidence at
    /// that grid point is closest to `required_confidence`. Returns the
    /// winning coverage threshold. On equal distances a later threshold
    /// replaces an earlier one.
    pub fn estimate_tolerance_bound(
        &self,
        sample: &[f64],
        required_confidence: f64,
        lower_criterion_bound: f64,
        upper_criterion_bound: f64,
    ) -> Result<f64> {
        if sample.is_empty() {
            return Err(Error::EmptySample);
        }
        let state = self.state.as_ref().ok_or_else(|| {
            Error::precursor("estimate_tolerance_bound", "compute_coverages")
        })?;
        let set = self.confidence.as_ref().ok_or_else(|| {
            Error::precursor("estimate_tolerance_bound", "compute_confidence")
        })?;

        let fitted = self.distribution.fit(sample)?;
        let k1_estimate = (fitted.location - lower_criterion_bound) / fitted.scale;
        let k2_estimate = (upper_criterion_bound - fitted.location) / fitted.scale;

        let lower_index = search_nearest(state.grid.lower(), k1_estimate)
            .ok_or_else(|| Error::InvalidParameter("lower factor grid is empty".to_string()))?;
        let upper_index = search_nearest(state.grid.upper(), k2_estimate)
            .ok_or_else(|| Error::InvalidParameter("upper factor grid is empty".to_string()))?;

        debug!(
            "Criterion factors ({:.4}, {:.4}) snapped to grid indices ({}, {})",
            k1_estimate, k2_estimate, lower_index, upper_index
        );

        let mut best_distance = f64::INFINITY;
        let mut estimate = set.thresholds[0];
        for (&threshold, surface) in set.thresholds.iter().zip(&set.surfaces) {
            let confidence = surface.get(lower_index, upper_index);
            let distance = (confidence - required_confidence).abs();
            if distance <= best_distance {
                best_distance = distance;
                estimate = threshold;
            }
        }
        Ok(estimate)
    }

    fn single_pair_state(&self, operation: &str) -> Result<&CoverageState> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| Error::precursor(operation, "compute_coverages"))?;
        if !state.grid.is_single_pair() {
            return Err(Error::InvalidParameter(format!(
                "{operation} requires singleton factor grids, got {}x{}",
                state.grid.lower().len(),
                state.grid.upper().len()
            )));
        }
        Ok(state)
    }

    #[cfg(not(feature = "parallel"))]
    fn fit_trials(
        &self,
        seed: u64,
        sample_size: usize,
        num_trials: usize,
    ) -> Result<Vec<FittedParameters>> {
        (0..num_trials)
            .map(|i| self.fit_one_trial(seed.wrapping_add(i as u64), sample_size))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn fit_trials(
        &self,
        seed: u64,
        sample_size: usize,
        num_trials: usize,
    ) -> Result<Vec<FittedParameters>> {
        (0..num_trials)
            .into_par_iter()
            .map(|i| self.fit_one_trial(seed.wrapping_add(i as u64), sample_size))
            .collect()
    }

    fn fit_one_trial(
        &self,
        trial_seed: u64,
        sample_size: usize,
    ) -> Result<FittedParameters> {
        let mut rng = StdRng::seed_from_u64(trial_seed);
        let sample = self.distribution.sample(&mut rng, sample_size);
        self.distribution.fit(&sample)
    }
}

/// Confidence surface for one threshold: fraction of trials per factor
/// pair whose coverage meets the threshold
fn confidence_surface(tensor: &CoverageTensor, threshold: f64) -> ConfidenceSurface {
    let num_trials = tensor.n_trials() as f64;
    let mut data = Vec::with_capacity(tensor.n_lower() * tensor.n_upper());
    for i in 0..tensor.n_lower() {
        for j in 0..tensor.n_upper() {
            let successes = (0..tensor.n_trials())
                .filter(|&t| tensor.get(i, t, j) >= threshold)
                .count();
            data.push(successes as f64 / num_trials);
        }
    }
    ConfidenceSurface::from_parts(data, tensor.n_lower(), tensor.n_upper())
}

fn single_pair_confidence(tensor: &CoverageTensor, threshold: f64) -> f64 {
    let successes = (0..tensor.n_trials())
        .filter(|&t| tensor.get(0, t, 0) >= threshold)
        .count();
    successes as f64 / tensor.n_trials() as f64
}
