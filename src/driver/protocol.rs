//! Wire format for the 3D streaming connection
//!
//! One JSON frame per line: outbound frames are the full grid as a nested
//! boolean array indexed `[x][y][z]`; inbound messages carry a new broadcast
//! cadence as `{"speed": <milliseconds>}`.

use crate::automaton::Grid3;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while decoding client messages
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed client message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("speed must be a positive number of milliseconds, got {0}")]
    InvalidSpeed(i64),
}

/// Inbound cadence update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedUpdate {
    pub speed: i64,
}

/// Serialize one generation as a nested boolean array frame
pub fn encode_frame(grid: &Grid3) -> serde_json::Result<String> {
    serde_json::to_string(&grid.as_cells())
}

/// Parse an inbound line into the new broadcast cadence
pub fn parse_speed_update(line: &str) -> Result<Duration, ProtocolError> {
    let update: SpeedUpdate = serde_json::from_str(line)?;
    if update.speed <= 0 {
        return Err(ProtocolError::InvalidSpeed(update.speed));
    }
    Ok(Duration::from_millis(update.speed as u64))
}
