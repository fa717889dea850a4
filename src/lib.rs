//! Statistical tolerance intervals via Monte-Carlo simulation
//!
//! This is the facade crate for the tolerance-stats workspace. It re-exports
//! the public API of the member crates:
//!
//! - [`tolerance_core`] — the unified error type, the location-scale
//!   distribution abstraction, and grid utilities
//! - [`tolerance_confidence`] — the Monte-Carlo [`ToleranceEngine`] with its
//!   coverage tensor, confidence surfaces, and inversion operations
//!
//! # Example
//!
//! ```rust
//! use tolerance_stats::{linspace, Normal, ToleranceEngine};
//!
//! # fn main() -> tolerance_stats::Result<()> {
//! let mut engine = ToleranceEngine::new(Normal::standard()).with_seed(42);
//!
//! // Coverage of every candidate factor pair over 200 simulated trials
//! let factors = linspace(0.0, 5.0, 11);
//! engine.compute_coverages(10, 200, &factors, &factors)?;
//!
//! // Confidence surfaces for two required coverage levels
//! let surfaces = engine.compute_confidence(&[0.90, 0.99])?;
//! assert_eq!(surfaces.len(), 2);
//! # Ok(())
//! # }
//! ```

pub use tolerance_confidence::{
    ConfidenceSurface, CoverageTensor, NelderMead, ToleranceEngine, ToleranceFactorGrid,
};
pub use tolerance_core::{
    linspace, search_nearest, Error, FittedParameters, LocationScaleFamily, Normal, Result,
    Uniform,
};
