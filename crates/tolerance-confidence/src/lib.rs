//! Monte-Carlo coverage and confidence estimation for tolerance intervals
//!
//! A tolerance interval `[loc - k1 * scale, loc + k2 * scale]` is built from
//! sample statistics and intended to cover a specified proportion of a
//! population. This crate estimates, by simulation, the fraction of the
//! population such intervals actually cover and the confidence with which a
//! required coverage is met, and inverts that relationship:
//!
//! - **Coverage**: simulate many samples, fit (location, scale) per trial,
//!   and evaluate `cdf(loc + k2 * scale) - cdf(loc - k1 * scale)` over a
//!   grid of candidate factor pairs
//! - **Confidence**: the fraction of trials whose coverage meets a required
//!   threshold
//! - **Inversion**: nearest-neighbor lookup over the precomputed grid, or a
//!   simplex search against the empirical confidence curve
//!
//! # Example
//!
//! ```rust
//! use tolerance_confidence::ToleranceEngine;
//! use tolerance_core::Normal;
//!
//! # fn main() -> tolerance_core::Result<()> {
//! let mut engine = ToleranceEngine::new(Normal::standard()).with_seed(42);
//!
//! // Intervals built as mean +/- 2 standard deviations from samples of 10
//! engine.compute_coverages(10, 500, &[2.0], &[2.0])?;
//!
//! // Confidence that such an interval covers at least 90% of the population
//! let confidence = engine.confidence_for_single_pair(0.90)?;
//! assert!((0.0..=1.0).contains(&confidence));
//! # Ok(())
//! # }
//! ```

mod engine;
mod simplex;
mod types;

// Re-exports
pub use engine::ToleranceEngine;
pub use simplex::NelderMead;
pub use types::{ConfidenceSurface, CoverageTensor, ToleranceFactorGrid};
