use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No candidate was accepted within the configured number of attempts.
    /// Usually the density bound is not an upper bound of the pdf.
    #[error("Rejection sampling did not accept a candidate in {attempts} attempts (bound={bound})")]
    NonTerminatingRejection { attempts: usize, bound: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
