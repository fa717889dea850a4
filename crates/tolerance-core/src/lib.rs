//! Core traits and types for tolerance interval estimation
//!
//! This crate provides the foundations shared by the tolerance-stats
//! ecosystem:
//!
//! - A unified [`Error`] type and [`Result`] alias
//! - The [`LocationScaleFamily`] abstraction over continuous location-scale
//!   distributions (sampling, parameter fitting, CDF evaluation), with
//!   [`Normal`] and [`Uniform`] implementations
//! - Small numeric utilities for grid construction and nearest-value lookup
//!
//! # Example
//!
//! ```rust
//! use tolerance_core::{LocationScaleFamily, Normal};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let family = Normal::standard();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let sample = family.sample(&mut rng, 100);
//! let fitted = family.fit(&sample).unwrap();
//!
//! assert!(fitted.scale > 0.0);
//! assert!((family.cdf(0.0) - 0.5).abs() < 1e-12);
//! ```

pub mod distribution;
pub mod error;
pub mod utils;

// Re-export core types
pub use distribution::{FittedParameters, LocationScaleFamily, Normal, Uniform};
pub use error::{Error, Result};
pub use utils::{linspace, search_nearest};
