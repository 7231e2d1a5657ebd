//! Error types for the smartfloor system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no overlapping time range across boards")]
    NoCommonTimeRange,

    #[error("sensor index {sensor} is absent from the board data")]
    MissingSensor { sensor: usize },

    #[error("unrecognized board id: {board}")]
    UnknownBoard { board: u8 },

    #[error("walking line collapsed to zero length; gait axes are undefined")]
    DegenerateWalkLine,

    #[error("insufficient data: need {required} footsteps, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
