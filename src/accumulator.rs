#[cfg(any(feature = "use_serde", feature = "python_bindings"))]
use serde::{Deserialize, Serialize};

/// The outcome of a single `estimate` call.
///
/// `variance` is the empirical variance of the per-sample value `f(x) / pdf(x)`,
/// not the variance of the mean: divide by `samples` for the latter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    any(feature = "use_serde", feature = "python_bindings"),
    derive(Serialize, Deserialize)
)]
pub struct Estimate {
    pub mean: f64,
    pub variance: f64,
    pub samples: usize,
    pub zero_evals: usize,
    pub non_finite_evals: usize,
    /// Candidates rejected while drawing the samples. Always 0 for uniform sampling.
    pub rejected_candidates: usize,
}

impl Estimate {
    /// Standard error of the mean, `sqrt(variance / samples)`. A variance that
    /// cancellation pushed below zero gives an error of 0.
    pub fn error(&self) -> f64 {
        (self.variance.max(0.) / self.samples as f64).sqrt()
    }

    /// Fraction of rejection-sampling candidates that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        self.samples as f64 / (self.samples + self.rejected_candidates) as f64
    }
}

impl From<Estimate> for (f64, f64) {
    fn from(e: Estimate) -> (f64, f64) {
        (e.mean, e.variance)
    }
}

/// Running sums of the per-sample values `f(x) / pdf(x)`.
#[derive(Debug, Clone)]
#[cfg_attr(
    any(feature = "use_serde", feature = "python_bindings"),
    derive(Serialize, Deserialize)
)]
pub struct Accumulator {
    sum: f64,
    sum_sq: f64,
    pub samples: usize,
    pub zero_evals: usize,
    pub non_finite_evals: usize,
    pub rejected_candidates: usize,
    pub max_eval: Option<(f64, f64)>,
    pub min_eval: Option<(f64, f64)>,
}

impl Accumulator {
    pub fn new() -> Accumulator {
        Accumulator {
            sum: 0.,
            sum_sq: 0.,
            samples: 0,
            zero_evals: 0,
            non_finite_evals: 0,
            rejected_candidates: 0,
            max_eval: None,
            min_eval: None,
        }
    }

    /// Add the weighted value `y` obtained at the point `x`.
    pub fn add_sample(&mut self, x: f64, y: f64) {
        self.sum += y;
        self.sum_sq += y * y;
        self.samples += 1;

        if y == 0. {
            self.zero_evals += 1;
        }

        if !y.is_finite() {
            self.non_finite_evals += 1;
            return;
        }

        if self.max_eval.map_or(true, |(_, m)| y > m) {
            self.max_eval = Some((x, y));
        }

        if self.min_eval.map_or(true, |(_, m)| y < m) {
            self.min_eval = Some((x, y));
        }
    }

    /// Merge the samples of an accumulator that was filled independently,
    /// for example by another integrator on another thread.
    pub fn merge(&mut self, other: &Accumulator) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.samples += other.samples;
        self.zero_evals += other.zero_evals;
        self.non_finite_evals += other.non_finite_evals;
        self.rejected_candidates += other.rejected_candidates;

        if let Some((x, y)) = other.max_eval {
            if self.max_eval.map_or(true, |(_, m)| y > m) {
                self.max_eval = Some((x, y));
            }
        }

        if let Some((x, y)) = other.min_eval {
            if self.min_eval.map_or(true, |(_, m)| y < m) {
                self.min_eval = Some((x, y));
            }
        }
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.samples as f64
    }

    /// `E[y^2] - E[y]^2`. Not clamped, so cancellation may make it slightly negative.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.sum_sq / self.samples as f64 - mean * mean
    }

    pub fn to_estimate(&self) -> Estimate {
        Estimate {
            mean: self.mean(),
            variance: self.variance(),
            samples: self.samples,
            zero_evals: self.zero_evals,
            non_finite_evals: self.non_finite_evals,
            rejected_candidates: self.rejected_candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_and_variance_of_known_values() {
        let mut acc = Accumulator::new();
        for (x, y) in [(0.1, 1.), (0.2, 2.), (0.3, 3.), (0.4, 4.)].iter() {
            acc.add_sample(*x, *y);
        }

        // E[y] = 2.5, E[y^2] = 30 / 4
        assert_relative_eq!(acc.mean(), 2.5);
        assert_relative_eq!(acc.variance(), 7.5 - 6.25);
        assert_eq!(acc.max_eval, Some((0.4, 4.)));
        assert_eq!(acc.min_eval, Some((0.1, 1.)));
    }

    #[test]
    fn merge_matches_single_accumulator() {
        let values = [0.5, 1.5, -2., 0., 3.25, 7.];

        let mut single = Accumulator::new();
        let mut left = Accumulator::new();
        let mut right = Accumulator::new();
        for (i, y) in values.iter().enumerate() {
            let x = i as f64 / 10.;
            single.add_sample(x, *y);
            if i % 2 == 0 {
                left.add_sample(x, *y);
            } else {
                right.add_sample(x, *y);
            }
        }

        left.merge(&right);
        assert_eq!(left.samples, single.samples);
        assert_eq!(left.zero_evals, 1);
        assert_relative_eq!(left.mean(), single.mean(), epsilon = 1e-12);
        assert_relative_eq!(left.variance(), single.variance(), epsilon = 1e-12);
        assert_eq!(left.max_eval, Some((0.5, 7.)));
        assert_eq!(left.min_eval, Some((0.2, -2.)));
    }

    #[test]
    fn non_finite_values_propagate() {
        let mut acc = Accumulator::new();
        acc.add_sample(0.5, 1.);
        acc.add_sample(1.0, f64::INFINITY);

        let e = acc.to_estimate();
        assert_eq!(e.non_finite_evals, 1);
        assert!(e.mean.is_infinite());
        assert!(!e.variance.is_finite());
        assert_eq!(acc.max_eval, Some((0.5, 1.)));
    }

    #[test]
    fn cancellation_leaves_variance_negative() {
        let mut acc = Accumulator::new();
        for _ in 0..3 {
            acc.add_sample(0.5, 0.1);
        }

        let e = acc.to_estimate();
        assert!(e.variance < 0., "variance={}", e.variance);
        assert!(e.variance > -1e-15);
        assert_eq!(e.error(), 0.);
    }

    #[test]
    fn estimate_converts_to_pair() {
        let mut acc = Accumulator::new();
        acc.add_sample(0., 2.);
        acc.add_sample(0., 4.);
        let (mean, variance): (f64, f64) = acc.to_estimate().into();
        assert_relative_eq!(mean, 3.);
        assert_relative_eq!(variance, 1.);
    }
}
