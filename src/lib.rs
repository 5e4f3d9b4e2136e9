//! Rush Hour - sliding-block puzzle core
//!
//! Core modules:
//! - `puzzle`: Level decoding, vehicle geometry, board queries (hit-test, win check)
//! - `settings`: Data-driven board construction (tile size, target rule, palette)
//! - `style`: Per-vehicle display attributes handed through to renderers
//! - `levels`: Built-in sample levels
//! - `error`: Error types

pub mod error;
pub mod levels;
pub mod puzzle;
pub mod settings;
pub mod style;

pub use error::{Error, MalformedLevel, Result};
pub use puzzle::{Board, Dimensions, Level, Segment, TargetSelector, Vehicle, VehicleKind};
pub use settings::Settings;
pub use style::{Palette, Rgb, Style};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Default tile edge length in pixels
    pub const DEFAULT_TILE_SIZE: u32 = 20;

    /// Cells covered by a car
    pub const CAR_LENGTH: i32 = 2;
    /// Cells covered by a truck
    pub const TRUCK_LENGTH: i32 = 3;

    /// Smallest board (in cells, border included) that still has a playable interior
    pub const MIN_BOARD_EXTENT: u32 = 3;
}

/// Tile size as a signed pixel length, saturating at `i32::MAX`
#[inline]
fn signed_tile(tile_size: u32) -> i32 {
    i32::try_from(tile_size).unwrap_or(i32::MAX)
}

/// Convert a pixel position to the grid cell containing it.
///
/// Uses floor division so negative pixels map to negative cells instead of
/// collapsing onto row/column 0. `tile_size` must be non-zero.
#[inline]
pub fn pixel_to_tile(pixel: IVec2, tile_size: u32) -> IVec2 {
    pixel.div_euclid(IVec2::splat(signed_tile(tile_size)))
}

/// Top-left pixel of a grid cell
#[inline]
pub fn tile_to_pixel(tile: IVec2, tile_size: u32) -> IVec2 {
    tile * signed_tile(tile_size)
}

/// Pixel at the center of a grid cell
#[inline]
pub fn tile_center(tile: IVec2, tile_size: u32) -> IVec2 {
    tile_to_pixel(tile, tile_size) + IVec2::splat(signed_tile(tile_size) / 2)
}
