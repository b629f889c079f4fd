use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),

    #[error("Invalid intercept fraction: {0}. Must be between 0.0 and 1.0")]
    InvalidFraction(f64),

    #[error("Number of reconciliation blocks must be at least 1")]
    ZeroBlocks,

    #[error("Number of runs must be at least 1")]
    ZeroRuns,

    #[error("Sequence length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

/// Validate probability parameter
pub(crate) fn validate_prob(p: f64) -> Result<(), ParameterError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ParameterError::InvalidProbability(p));
    }
    Ok(())
}

pub(crate) fn validate_fraction(f: f64) -> Result<(), ParameterError> {
    if !(0.0..=1.0).contains(&f) {
        return Err(ParameterError::InvalidFraction(f));
    }
    Ok(())
}

pub(crate) fn check_len(expected: usize, got: usize) -> Result<(), ParameterError> {
    if expected != got {
        return Err(ParameterError::LengthMismatch { expected, got });
    }
    Ok(())
}
