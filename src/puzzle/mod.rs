//! Puzzle logic module
//!
//! Pure and deterministic:
//! - No rendering, windowing, or I/O
//! - Boards are immutable after construction apart from the selection
//! - Vehicle order is decode order (row-major by lead glyph)

pub mod board;
pub mod level;
pub mod segment;
pub mod vehicle;

pub use board::{Board, TargetSelector};
pub use level::{Dimensions, Level, decode, encode, validate_layout};
pub use segment::{Axis, Segment, overlaps};
pub use vehicle::{Vehicle, VehicleKind};
