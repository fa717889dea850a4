//! Value types for coverage and confidence computations

use tolerance_core::{Error, Result};

/// Rectangular grid of candidate tolerance-factor pairs
///
/// Two ordered sequences of non-negative finite reals. Every pair
/// `(lower[i], upper[j])` describes a candidate tolerance interval
/// `[loc - lower[i] * scale, loc + upper[j] * scale]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceFactorGrid {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ToleranceFactorGrid {
    /// Create a factor grid from lower and upper factor sequences
    pub fn new(lower: &[f64], upper: &[f64]) -> Result<Self> {
        Self::validate_factors(lower, "lower")?;
        Self::validate_factors(upper, "upper")?;
        Ok(Self {
            lower: lower.to_vec(),
            upper: upper.to_vec(),
        })
    }

    fn validate_factors(factors: &[f64], side: &str) -> Result<()> {
        if factors.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "{side} tolerance factors must be non-empty"
            )));
        }
        if let Some(&bad) = factors.iter().find(|f| !f.is_finite() || **f < 0.0) {
            return Err(Error::InvalidParameter(format!(
                "{side} tolerance factor {bad} must be non-negative and finite"
            )));
        }
        Ok(())
    }

    /// Lower tolerance factors
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper tolerance factors
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Whether the grid holds exactly one factor pair
    pub fn is_single_pair(&self) -> bool {
        self.lower.len() == 1 && self.upper.len() == 1
    }
}

/// Coverage fractions indexed by (lower factor, trial, upper factor)
///
/// Entry `(i, t, j)` is the population mass the trial-`t` interval built
/// from factors `(lower[i], upper[j])` actually covers. The trial axis is
/// the middle one; confidence computations reduce over it.
#[derive(Debug, Clone)]
pub struct CoverageTensor {
    data: Vec<f64>,
    n_lower: usize,
    n_trials: usize,
    n_upper: usize,
}

impl CoverageTensor {
    pub(crate) fn from_parts(
        data: Vec<f64>,
        n_lower: usize,
        n_trials: usize,
        n_upper: usize,
    ) -> Self {
        debug_assert_eq!(data.len(), n_lower * n_trials * n_upper);
        Self {
            data,
            n_lower,
            n_trials,
            n_upper,
        }
    }

    /// Coverage for (lower factor index, trial index, upper factor index)
    #[inline]
    pub fn get(&self, lower: usize, trial: usize, upper: usize) -> f64 {
        self.data[(lower * self.n_trials + trial) * self.n_upper + upper]
    }

    /// Number of lower tolerance factors
    pub fn n_lower(&self) -> usize {
        self.n_lower
    }

    /// Number of simulated trials
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Number of upper tolerance factors
    pub fn n_upper(&self) -> usize {
        self.n_upper
    }

    /// All coverage entries in memory order
    pub fn entries(&self) -> &[f64] {
        &self.data
    }
}

/// Fraction of trials meeting a coverage threshold, per factor pair
///
/// Entry `(i, j)` is the empirical confidence that the interval built from
/// factors `(lower[i], upper[j])` covers at least the queried fraction of
/// the population.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceSurface {
    data: Vec<f64>,
    n_lower: usize,
    n_upper: usize,
}

impl ConfidenceSurface {
    pub(crate) fn from_parts(data: Vec<f64>, n_lower: usize, n_upper: usize) -> Self {
        debug_assert_eq!(data.len(), n_lower * n_upper);
        Self {
            data,
            n_lower,
            n_upper,
        }
    }

    /// Confidence for (lower factor index, upper factor index)
    #[inline]
    pub fn get(&self, lower: usize, upper: usize) -> f64 {
        self.data[lower * self.n_upper + upper]
    }

    /// Number of lower tolerance factors
    pub fn n_lower(&self) -> usize {
        self.n_lower
    }

    /// Number of upper tolerance factors
    pub fn n_upper(&self) -> usize {
        self.n_upper
    }

    /// All confidence entries in memory order
    pub fn entries(&self) -> &[f64] {
        &self.data
    }
}
