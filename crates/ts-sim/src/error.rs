use thiserror::Error;
use ts_core::TsError;
use ts_lane::LaneError;
use ts_strategy::StrategyError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] TsError),

    /// Queue corruption (e.g. a double departure).  Not recoverable.
    #[error("lane state error: {0}")]
    Lane(#[from] LaneError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// A per-vehicle average was requested before any vehicle departed.
    #[error("no completed vehicles")]
    NoCompletedVehicles,

    #[error("tick limit {0} reached before termination condition")]
    TickLimit(u64),

    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;
