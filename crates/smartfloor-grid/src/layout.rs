//! Physical layout of the smartfloor sensor array.
//!
//! The floor is a strip of four boards, each 4 tiles wide and 8 tiles high,
//! concatenated left to right into a 16x8 grid. Every board reports 48
//! sensor readings per sample; the position of each sensor within the board
//! is fixed and identical across boards.

use serde::{Deserialize, Serialize};
use smartfloor_core::Timestamp;

/// Tiles per board along x
pub const BOARD_WIDTH: usize = 4;
/// Tiles per board along y
pub const BOARD_HEIGHT: usize = 8;
/// Tiles across the assembled floor
pub const FLOOR_WIDTH: usize = 16;
/// Tiles up the assembled floor
pub const FLOOR_HEIGHT: usize = 8;
/// Readings per board sample row
pub const SENSORS_PER_BOARD: usize = 48;

/// Identifier of one physical floor board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub u8);

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "board {}", self.0)
    }
}

/// Arrangement of sensor indices on each board, top row of tiles first.
///
/// Row `r` of this table maps to floor row `y = 7 - r`: the first table row
/// is the top of the board, while y grows from the bottom of the floor.
pub const SENSOR_LAYOUT: [[usize; BOARD_WIDTH]; BOARD_HEIGHT] = [
    [18, 19, 6, 7],
    [17, 16, 9, 8],
    [22, 23, 2, 3],
    [21, 20, 5, 4],
    [27, 28, 43, 44],
    [26, 25, 46, 45],
    [31, 32, 39, 40],
    [30, 29, 42, 41],
];

/// Board ids in the order they appear left to right on the floor
pub const DEFAULT_BOARD_ORDER: [BoardId; 4] =
    [BoardId(19), BoardId(17), BoardId(21), BoardId(18)];

/// One raw sample from the floor log: a board, the capture time, and that
/// board's sensor readings.
///
/// Rows for different boards may be interleaved in any order; timestamps
/// must be Unix milliseconds, monotonic per board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRow {
    pub board: BoardId,
    pub time: Timestamp,
    pub readings: Vec<u16>,
}

impl SensorRow {
    pub fn new(board: BoardId, time: Timestamp, readings: Vec<u16>) -> Self {
        Self {
            board,
            time,
            readings,
        }
    }
}
