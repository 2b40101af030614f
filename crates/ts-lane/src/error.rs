use ts_core::{LaneId, TsError, VehicleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaneError {
    /// A vehicle was departed twice.  Indicates corrupted queue state.
    #[error("{vehicle} on {lane} has already departed")]
    AlreadyDeparted { lane: LaneId, vehicle: VehicleId },

    #[error("{0} is rate-driven and cannot accept pre-generated vehicles")]
    NotPrepopulated(LaneId),

    #[error(transparent)]
    Core(#[from] TsError),
}

pub type LaneResult<T> = Result<T, LaneError>;
