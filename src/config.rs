#[cfg(any(feature = "use_serde", feature = "python_bindings"))]
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_REJECTION_ATTEMPTS: usize = 1_000_000;

/// How the sample points are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    any(feature = "use_serde", feature = "python_bindings"),
    derive(Serialize, Deserialize)
)]
pub enum SamplingStrategy {
    /// Draw `x` uniformly and weight `f(x) / pdf(x)` with the density ratio `pdf(x)`.
    /// Unbiased for any pdf, but the variance is that of plain uniform sampling.
    Uniform,
    /// Draw `x` from the pdf with the rejection method and weight with `f(x) / pdf(x)`.
    Rejection,
}

/// Upper bound `M` of the pdf used by rejection sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    any(feature = "use_serde", feature = "python_bindings"),
    derive(Serialize, Deserialize)
)]
pub enum DensityBound {
    /// `M = pdf(1)`. Only an upper bound when the pdf is maximal at `x = 1`.
    UpperEndpoint,
    Explicit(f64),
    /// The largest value of the pdf on `points + 1` equidistant points of `[0, 1]`.
    /// Underestimates the supremum when the peak falls between grid points.
    GridSupremum(usize),
}

impl DensityBound {
    pub fn resolve<P: Fn(f64) -> f64>(&self, pdf: &P) -> f64 {
        match *self {
            DensityBound::UpperEndpoint => pdf(1.0),
            DensityBound::Explicit(m) => m,
            DensityBound::GridSupremum(points) => {
                let points = points.max(1);
                (0..=points)
                    .map(|i| pdf(i as f64 / points as f64))
                    .fold(f64::NEG_INFINITY, f64::max)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    any(feature = "use_serde", feature = "python_bindings"),
    derive(Serialize, Deserialize)
)]
pub struct IntegratorConfig {
    pub strategy: SamplingStrategy,
    pub density_bound: DensityBound,
    /// Maximum number of rejected candidates per sample. `None` retries forever,
    /// `Some(0)` is an invalid argument.
    pub max_rejection_attempts: Option<usize>,
}

impl Default for IntegratorConfig {
    fn default() -> IntegratorConfig {
        IntegratorConfig {
            strategy: SamplingStrategy::Rejection,
            density_bound: DensityBound::UpperEndpoint,
            max_rejection_attempts: Some(DEFAULT_MAX_REJECTION_ATTEMPTS),
        }
    }
}

impl IntegratorConfig {
    pub fn uniform() -> IntegratorConfig {
        IntegratorConfig {
            strategy: SamplingStrategy::Uniform,
            ..IntegratorConfig::default()
        }
    }

    pub fn rejection() -> IntegratorConfig {
        IntegratorConfig::default()
    }

    pub fn with_density_bound(mut self, density_bound: DensityBound) -> IntegratorConfig {
        self.density_bound = density_bound;
        self
    }

    pub fn with_max_rejection_attempts(mut self, attempts: Option<usize>) -> IntegratorConfig {
        self.max_rejection_attempts = attempts;
        self
    }
}
