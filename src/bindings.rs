use std::sync::{Arc, Mutex, MutexGuard};

use crate::*;
use log::debug;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rand::SeedableRng;
use tinymt::{TinyMT64, TinyMT64Seed};

/// Samples between checks for a failed callable or a pending signal.
const CHUNK_SIZE: usize = 4096;

type PyFunction = Box<dyn Fn(f64) -> f64 + Send>;

/// The first exception raised by `f` or `pdf` during sampling.
type Failure = Arc<Mutex<Option<PyErr>>>;

#[pyclass(name = "MonteCarlo")]
pub struct MonteCarloWrapper {
    integrator: MonteCarloIntegrator<PyFunction, PyFunction, TinyMT64>,
    failure: Failure,
}

fn lock(failure: &Failure) -> MutexGuard<'_, Option<PyErr>> {
    failure.lock().unwrap_or_else(|e| e.into_inner())
}

fn take_failure(failure: &Failure) -> PyResult<()> {
    match lock(failure).take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Store the first error of `call` in `failure`. From then on `call` is no longer
/// invoked and `after_failure` is returned, so the current chunk drains quickly.
fn guarded<C>(failure: Failure, after_failure: f64, call: C) -> PyFunction
where
    C: Fn(f64) -> PyResult<f64> + Send + 'static,
{
    Box::new(move |x| {
        if lock(&failure).is_some() {
            return after_failure;
        }

        call(x).unwrap_or_else(|e| {
            debug!("Callable failed at x={}: {}", x, e);
            let mut slot = lock(&failure);
            if slot.is_none() {
                *slot = Some(e);
            }
            after_failure
        })
    })
}

fn wrap_callable(callable: PyObject, failure: Failure, after_failure: f64) -> PyFunction {
    guarded(failure, after_failure, move |x| {
        Python::with_gil(|py| {
            callable
                .call1(py, (x,))
                .and_then(|r| r.extract::<f64>(py))
        })
    })
}

impl From<Error> for PyErr {
    fn from(e: Error) -> PyErr {
        match e {
            Error::InvalidArgument(_) => PyValueError::new_err(e.to_string()),
            Error::NonTerminatingRejection { .. } => PyRuntimeError::new_err(e.to_string()),
        }
    }
}

#[pymethods]
impl MonteCarloWrapper {
    #[new]
    fn new(f: PyObject, pdf: PyObject, seed: Option<u64>, uniform: Option<bool>) -> Self {
        let config = if uniform.unwrap_or(false) {
            IntegratorConfig::uniform()
        } else {
            IntegratorConfig::rejection()
        };

        let failure = Failure::default();

        // a failed pdf returns inf so rejection sampling accepts at once
        MonteCarloWrapper {
            integrator: MonteCarloIntegrator::with_rng(
                wrap_callable(f, failure.clone(), f64::NAN),
                wrap_callable(pdf, failure.clone(), f64::INFINITY),
                config,
                if let Some(seed) = seed {
                    TinyMT64::from_seed(TinyMT64Seed::from(seed))
                } else {
                    TinyMT64::from_entropy()
                },
            ),
            failure,
        }
    }

    fn load_config(&mut self, filename: &str) -> PyResult<()> {
        let reader = std::fs::OpenOptions::new().read(true).open(filename)?;
        let config =
            serde_yaml::from_reader(&reader).map_err(|e| PyIOError::new_err(e.to_string()))?;
        self.integrator.set_config(config);
        Ok(())
    }

    fn save_config(&self, filename: &str) -> PyResult<()> {
        let writer = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(filename)?;

        serde_yaml::to_writer(writer, self.integrator.config())
            .map_err(|e| PyIOError::new_err(e.to_string()))
    }

    /// Returns the mean and the variance of the per-sample estimator.
    /// An exception raised by `f` or `pdf` aborts the estimate and is re-raised.
    fn estimate(&mut self, py: Python, samples: usize) -> PyResult<(f64, f64)> {
        let failure = self.failure.clone();
        let result = self
            .integrator
            .estimate_interruptible(samples, CHUNK_SIZE, || {
                take_failure(&failure)?;
                py.check_signals()
            });

        take_failure(&self.failure)?;
        result.map(Into::into)
    }

    fn sample(&mut self) -> PyResult<f64> {
        let result = self.integrator.sample();
        take_failure(&self.failure)?;
        Ok(result?)
    }
}

#[pymodule]
fn pdfmc(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<MonteCarloWrapper>()?;

    Ok(())
}
