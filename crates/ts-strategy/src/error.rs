use thiserror::Error;
use ts_core::TsError;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("strategy configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] TsError),
}

pub type StrategyResult<T> = Result<T, StrategyError>;

/// Why the green-share solver gave up.  Always recovered by the caller.
#[derive(Debug, Error, PartialEq)]
pub enum OptimizeError {
    #[error("no lanes to allocate")]
    Empty,

    #[error("lane {lane} has non-finite rate estimate {value}")]
    NonFiniteRate { lane: usize, value: f64 },

    #[error("service capacity must be positive, got {0}")]
    NonPositiveCapacity(f64),

    #[error("did not converge within {0} iterations")]
    NotConverged(u32),
}
