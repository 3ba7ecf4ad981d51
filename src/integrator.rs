use log::{debug, trace, warn};
use rand::{Rng, SeedableRng};
use tinymt::TinyMT64;

use crate::{Accumulator, Error, Estimate, IntegratorConfig, Result, SamplingStrategy};

/// Monte Carlo integrator of `f` over `[0, 1]`, sampling according to `pdf`.
///
/// The pdf should integrate to 1 over `[0, 1]` and be positive wherever `f` is non-zero.
/// Neither is checked: a zero density at a sampled point shows up as `inf` or `NaN`
/// in the estimate.
///
/// The random state is owned by the integrator and advances with every draw, so
/// repeated calls to [`estimate`](MonteCarloIntegrator::estimate) use fresh samples.
pub struct MonteCarloIntegrator<F, P, R = TinyMT64> {
    f: F,
    pdf: P,
    config: IntegratorConfig,
    rng: R,
}

impl<F, P> MonteCarloIntegrator<F, P, TinyMT64>
where
    F: Fn(f64) -> f64,
    P: Fn(f64) -> f64,
{
    pub fn new(f: F, pdf: P) -> Self {
        Self::with_config(f, pdf, IntegratorConfig::default())
    }

    pub fn with_config(f: F, pdf: P, config: IntegratorConfig) -> Self {
        Self::with_rng(f, pdf, config, TinyMT64::from_entropy())
    }
}

impl<F, P, R> MonteCarloIntegrator<F, P, R>
where
    F: Fn(f64) -> f64,
    P: Fn(f64) -> f64,
    R: Rng,
{
    pub fn with_rng(f: F, pdf: P, config: IntegratorConfig, rng: R) -> Self {
        MonteCarloIntegrator { f, pdf, config, rng }
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: IntegratorConfig) {
        self.config = config;
    }

    /// Estimate the integral of `f` over `[0, 1]` with `samples` draws.
    pub fn estimate(&mut self, samples: usize) -> Result<Estimate> {
        self.estimate_interruptible(samples, samples, || Ok(()))
    }

    /// Estimate in chunks of `chunk_size` samples, calling `interrupt` after every chunk.
    /// An error from `interrupt` stops the estimate and is returned as is.
    pub fn estimate_interruptible<E, I>(
        &mut self,
        samples: usize,
        chunk_size: usize,
        mut interrupt: I,
    ) -> std::result::Result<Estimate, E>
    where
        E: From<Error>,
        I: FnMut() -> std::result::Result<(), E>,
    {
        let chunk_size = chunk_size.max(1);
        let mut acc = Accumulator::new();
        let mut remaining = samples;
        loop {
            let chunk = remaining.min(chunk_size);
            self.add_samples(chunk, &mut acc)?;
            interrupt()?;

            remaining -= chunk;
            if remaining == 0 {
                break;
            }
        }

        let estimate = acc.to_estimate();
        if estimate.non_finite_evals > 0 {
            warn!(
                "{} of {} sampled values were not finite; check that the pdf is positive where f is non-zero (largest finite value {:?})",
                estimate.non_finite_evals, samples, acc.max_eval
            );
        }
        debug!(
            "Estimate with {} samples: mean={}, variance={}, acceptance rate={}",
            samples,
            estimate.mean,
            estimate.variance,
            estimate.acceptance_rate()
        );

        Ok(estimate)
    }

    /// Draw `samples` points and add their weighted values to `acc`.
    ///
    /// Rejection sampling weights a point by `f(x) / pdf(x)`. Uniform sampling draws from
    /// a density of 1 and additionally multiplies by `pdf(x)`, the likelihood ratio of the
    /// pdf to the uniform density, so both strategies estimate the integral of `f`.
    pub fn add_samples(&mut self, samples: usize, acc: &mut Accumulator) -> Result<()> {
        if samples == 0 {
            return Err(Error::InvalidArgument(
                "the number of samples must be at least 1".to_owned(),
            ));
        }

        let bound = self.bound()?;
        for _ in 0..samples {
            let (x, rejected) = self.draw(bound)?;
            acc.rejected_candidates += rejected;

            let p = (self.pdf)(x);
            let y = match self.config.strategy {
                SamplingStrategy::Rejection => (self.f)(x) / p,
                SamplingStrategy::Uniform => (self.f)(x) / p * p,
            };
            acc.add_sample(x, y);
        }

        Ok(())
    }

    /// Draw a single point from the sampling distribution.
    pub fn sample(&mut self) -> Result<f64> {
        let bound = self.bound()?;
        self.draw(bound).map(|(x, _)| x)
    }

    fn bound(&self) -> Result<f64> {
        match self.config.strategy {
            SamplingStrategy::Uniform => Ok(1.),
            SamplingStrategy::Rejection => {
                if self.config.max_rejection_attempts == Some(0) {
                    return Err(Error::InvalidArgument(
                        "the maximum number of rejection attempts must be at least 1".to_owned(),
                    ));
                }

                let bound = self.config.density_bound.resolve(&self.pdf);
                trace!(
                    "Resolved density bound {:?} to {}",
                    self.config.density_bound,
                    bound
                );
                Ok(bound)
            }
        }
    }

    /// Returns the point and the number of rejected candidates before it.
    fn draw(&mut self, bound: f64) -> Result<(f64, usize)> {
        match self.config.strategy {
            SamplingStrategy::Uniform => Ok((self.rng.gen(), 0)),
            SamplingStrategy::Rejection => self.rejection_sample(bound),
        }
    }

    fn rejection_sample(&mut self, bound: f64) -> Result<(f64, usize)> {
        let mut rejected = 0;
        loop {
            let x: f64 = self.rng.gen();
            let u: f64 = self.rng.gen();
            if u * bound <= (self.pdf)(x) {
                return Ok((x, rejected));
            }

            rejected += 1;
            if let Some(max_attempts) = self.config.max_rejection_attempts {
                if rejected >= max_attempts {
                    return Err(Error::NonTerminatingRejection {
                        attempts: rejected,
                        bound,
                    });
                }
            }
        }
    }
}
