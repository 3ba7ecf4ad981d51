//! Monte Carlo integration of a function over the unit interval with importance sampling.
//!
//! A [`MonteCarloIntegrator`] owns a function `f` and a probability density `pdf`, and estimates
//! the integral of `f` over `[0, 1]` by averaging `f(x) / pdf(x)` over sample points `x`. The
//! points are either drawn uniformly ([`SamplingStrategy::Uniform`]) or from the pdf itself with
//! the rejection method ([`SamplingStrategy::Rejection`]).
//!
//! ```
//! use pdfmc::MonteCarloIntegrator;
//!
//! let mut mc = MonteCarloIntegrator::new(|x: f64| 5. * x.powi(4), |x: f64| 3. * x * x);
//! let estimate = mc.estimate(10_000).unwrap();
//! assert!((estimate.mean - 1.).abs() < 0.1);
//! ```
//!
//! The reported variance is the variance of a single weighted sample, so comparing it
//! between densities at a fixed number of samples shows how well each density matches `f`.

mod accumulator;
mod config;
mod error;
mod integrator;

#[cfg(feature = "python_bindings")]
pub mod bindings;
#[cfg(feature = "plotting")]
pub mod plot;

pub use accumulator::{Accumulator, Estimate};
pub use config::{
    DensityBound, IntegratorConfig, SamplingStrategy, DEFAULT_MAX_REJECTION_ATTEMPTS,
};
pub use error::{Error, Result};
pub use integrator::MonteCarloIntegrator;
