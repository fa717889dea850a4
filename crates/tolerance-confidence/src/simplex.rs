//! Derivative-free scalar minimization
//!
//! A one-dimensional Nelder-Mead simplex search with an explicit iteration
//! budget. The engine uses it to invert the empirical confidence curve,
//! which is piecewise constant (an average of indicator functions), so the
//! search terminates on simplex collapse rather than on gradient
//! information and the result is an approximate minimizer.

use tolerance_core::{Error, Result};

const ALPHA: f64 = 1.0; // reflection
const GAMMA: f64 = 2.0; // expansion
const RHO: f64 = 0.5; // contraction
const SIGMA: f64 = 0.5; // shrink

/// One-dimensional Nelder-Mead minimizer
#[derive(Debug, Clone)]
pub struct NelderMead {
    max_iterations: usize,
    x_tolerance: f64,
    f_tolerance: f64,
    initial_step: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            x_tolerance: 1e-4,
            f_tolerance: 1e-4,
            initial_step: 0.05,
        }
    }
}

impl NelderMead {
    /// Create a minimizer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "Iteration budget must be positive");
        self.max_iterations = max_iterations;
        self
    }

    /// Set the termination tolerances on simplex extent and objective spread
    pub fn with_tolerances(mut self, x_tolerance: f64, f_tolerance: f64) -> Self {
        assert!(
            x_tolerance > 0.0 && f_tolerance > 0.0,
            "Tolerances must be positive"
        );
        self.x_tolerance = x_tolerance;
        self.f_tolerance = f_tolerance;
        self
    }

    /// Minimize `objective` starting from `x0`
    ///
    /// Returns the best vertex once the simplex extent and objective spread
    /// fall below the configured tolerances. Fails with
    /// [`Error::ConvergenceFailure`] when the iteration budget is exhausted.
    pub fn minimize<F>(&self, mut objective: F, x0: f64) -> Result<f64>
    where
        F: FnMut(f64) -> f64,
    {
        let mut best = x0;
        let mut f_best = objective(best);
        let mut worst = x0 + self.initial_step;
        let mut f_worst = objective(worst);

        for _ in 0..self.max_iterations {
            if f_worst < f_best {
                std::mem::swap(&mut best, &mut worst);
                std::mem::swap(&mut f_best, &mut f_worst);
            }

            if (worst - best).abs() <= self.x_tolerance
                && (f_worst - f_best).abs() <= self.f_tolerance
            {
                return Ok(best);
            }

            // Reflect the worst vertex through the best
            let reflected = best + ALPHA * (best - worst);
            let f_reflected = objective(reflected);

            if f_reflected < f_best {
                let expanded = best + GAMMA * (best - worst);
                let f_expanded = objective(expanded);
                if f_expanded < f_reflected {
                    worst = expanded;
                    f_worst = f_expanded;
                } else {
                    worst = reflected;
                    f_worst = f_reflected;
                }
            } else if f_reflected < f_worst {
                worst = reflected;
                f_worst = f_reflected;
            } else {
                let contracted = best + RHO * (worst - best);
                let f_contracted = objective(contracted);
                if f_contracted < f_worst {
                    worst = contracted;
                    f_worst = f_contracted;
                } else {
                    worst = best + SIGMA * (worst - best);
                    f_worst = objective(worst);
                }
            }
        }

        Err(Error::ConvergenceFailure(format!(
            "simplex search did not converge within {} iterations",
            self.max_iterations
        )))
    }
}
