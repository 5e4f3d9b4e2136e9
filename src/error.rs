//! Error types for level decoding and board construction

use glam::IVec2;
use thiserror::Error;

use crate::puzzle::TargetSelector;

/// Reasons a level string (or an explicit layout) cannot become a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLevel {
    #[error("level is empty")]
    Empty,

    #[error("unrecognized glyph {glyph:?} at {at}")]
    UnknownGlyph { glyph: char, at: IVec2 },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: i32, expected: i32, found: i32 },

    #[error("level has no exit")]
    MissingExit,

    #[error("level has more than one exit: {first} and {second}")]
    MultipleExits { first: IVec2, second: IVec2 },

    #[error("exit at {at} must sit on the board edge, away from the corners")]
    ExitOffBoundary { at: IVec2 },

    /// Border glyph inside the board, or a piece/empty glyph on the border
    #[error("glyph {glyph:?} at {at} is not allowed there")]
    MisplacedGlyph { glyph: char, at: IVec2 },

    #[error("vehicle anchored at {at} runs outside the playable area")]
    VehicleOutOfBounds { at: IVec2 },

    #[error("vehicles anchored at {first} and {second} overlap")]
    OverlappingVehicles { first: IVec2, second: IVec2 },

    #[error("board is {cols}x{rows}, needs at least 3x3 cells")]
    TooSmall { cols: u32, rows: u32 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed level: {0}")]
    MalformedLevel(#[from] MalformedLevel),

    #[error("tile size must be positive and keep the board within pixel range")]
    InvalidTileSize,

    #[error("no vehicle matches target selector {0:?}")]
    TargetNotFound(TargetSelector),

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
