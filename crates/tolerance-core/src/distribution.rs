//! Location-scale distribution families
//!
//! The tolerance engine is polymorphic over a reference distribution that can
//! draw samples, fit location/scale parameters to a raw sample, and evaluate
//! its cumulative distribution function. Sampling goes through `rand_distr`,
//! CDF evaluation through `statrs`.

use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::Distribution as _;
use statrs::distribution::ContinuousCDF;

/// Fitted location and scale parameters for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedParameters {
    /// Location parameter (e.g. the mean for a normal family)
    pub location: f64,
    /// Scale parameter (e.g. the standard deviation for a normal family)
    pub scale: f64,
}

impl FittedParameters {
    /// Create fitted parameters
    pub fn new(location: f64, scale: f64) -> Self {
        Self { location, scale }
    }
}

/// A continuous location-scale distribution family
///
/// Implementations provide the three capabilities the tolerance engine
/// needs: drawing a sample of a given size, fitting (location, scale) to a
/// raw sample, and evaluating the population CDF elementwise. Families are
/// `Send + Sync` so trials can be simulated in parallel.
pub trait LocationScaleFamily: Send + Sync {
    /// Draw `n` observations from the population
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64>;

    /// Fit location and scale parameters to a raw sample
    ///
    /// Fails with [`Error::InsufficientData`] on an empty sample and
    /// [`Error::FitFailure`] when the fit degenerates (non-finite or
    /// non-positive scale, e.g. a constant sample).
    fn fit(&self, sample: &[f64]) -> Result<FittedParameters>;

    /// Cumulative distribution function of the population
    fn cdf(&self, x: f64) -> f64;

    /// Family name for diagnostics
    fn name(&self) -> &str;
}

/// Normal (Gaussian) location-scale family
///
/// Fitting uses the maximum-likelihood estimates: the sample mean and the
/// biased standard deviation (divisor `n`).
#[derive(Debug, Clone)]
pub struct Normal {
    sampler: rand_distr::Normal<f64>,
    reference: statrs::distribution::Normal,
}

impl Normal {
    /// Create a normal family with the given mean and standard deviation
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        let sampler = rand_distr::Normal::new(mean, std_dev).map_err(|e| {
            Error::InvalidParameter(format!("Invalid normal parameters: {e}"))
        })?;
        let reference = statrs::distribution::Normal::new(mean, std_dev).map_err(|e| {
            Error::InvalidParameter(format!("Invalid normal parameters: {e}"))
        })?;
        Ok(Self { sampler, reference })
    }

    /// The standard normal family N(0, 1)
    pub fn standard() -> Self {
        Self::new(0.0, 1.0).expect("standard normal parameters are valid")
    }
}

impl LocationScaleFamily for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sampler.sample(rng)).collect()
    }

    fn fit(&self, sample: &[f64]) -> Result<FittedParameters> {
        if sample.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }

        let n = sample.len() as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let variance = sample
            .iter()
            .map(|&x| {
                let diff = x - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        let scale = variance.sqrt();

        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::degenerate_fit(scale));
        }

        Ok(FittedParameters::new(mean, scale))
    }

    fn cdf(&self, x: f64) -> f64 {
        self.reference.cdf(x)
    }

    fn name(&self) -> &str {
        "normal"
    }
}

/// Uniform location-scale family on [min, max]
///
/// Location is the lower endpoint, scale the interval width. Fitting uses
/// the maximum-likelihood estimates (sample minimum and range).
#[derive(Debug, Clone)]
pub struct Uniform {
    min: f64,
    max: f64,
    reference: statrs::distribution::Uniform,
}

impl Uniform {
    /// Create a uniform family on [min, max]
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(Error::InvalidParameter(format!(
                "Invalid uniform bounds: [{min}, {max}]"
            )));
        }
        let reference = statrs::distribution::Uniform::new(min, max).map_err(|e| {
            Error::InvalidParameter(format!("Invalid uniform bounds: {e}"))
        })?;
        Ok(Self { min, max, reference })
    }
}

impl LocationScaleFamily for Uniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        let sampler = rand_distr::Uniform::new(self.min, self.max);
        (0..n).map(|_| sampler.sample(rng)).collect()
    }

    fn fit(&self, sample: &[f64]) -> Result<FittedParameters> {
        if sample.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }

        let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let scale = max - min;

        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::degenerate_fit(scale));
        }

        Ok(FittedParameters::new(min, scale))
    }

    fn cdf(&self, x: f64) -> f64 {
        self.reference.cdf(x)
    }

    fn name(&self) -> &str {
        "uniform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_normal_fit_recovers_parameters() {
        let family = Normal::standard();
        let mut rng = StdRng::seed_from_u64(42);
        let sample = family.sample(&mut rng, 10_000);

        let fitted = family.fit(&sample).unwrap();
        assert_relative_eq!(fitted.location, 0.0, epsilon = 0.05);
        assert_relative_eq!(fitted.scale, 1.0, epsilon = 0.05);
    }

    #[test]
    fn test_normal_cdf() {
        let family = Normal::standard();
        assert_relative_eq!(family.cdf(0.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(family.cdf(1.96), 0.975, epsilon = 1e-3);
        assert!(family.cdf(-8.0) < 1e-10);
    }

    #[test]
    fn test_normal_fit_empty_sample() {
        let family = Normal::standard();
        assert!(matches!(
            family.fit(&[]),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_normal_fit_constant_sample() {
        let family = Normal::standard();
        assert!(matches!(
            family.fit(&[3.0, 3.0, 3.0]),
            Err(Error::FitFailure(_))
        ));
    }

    #[test]
    fn test_normal_invalid_parameters() {
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_uniform_fit_and_cdf() {
        let family = Uniform::new(2.0, 6.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = family.sample(&mut rng, 5_000);

        let fitted = family.fit(&sample).unwrap();
        assert_relative_eq!(fitted.location, 2.0, epsilon = 0.05);
        assert_relative_eq!(fitted.scale, 4.0, epsilon = 0.1);

        assert_relative_eq!(family.cdf(4.0), 0.5, epsilon = 1e-12);
        assert_eq!(family.cdf(1.0), 0.0);
        assert_eq!(family.cdf(7.0), 1.0);
    }

    #[test]
    fn test_uniform_invalid_bounds() {
        assert!(Uniform::new(3.0, 3.0).is_err());
        assert!(Uniform::new(5.0, 1.0).is_err());
    }
}
