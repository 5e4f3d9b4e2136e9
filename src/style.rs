//! Display attributes attached to vehicles
//!
//! Geometry never reads these; they ride along on each vehicle so a renderer
//! can draw it without knowing anything about the decoder.

use serde::{Deserialize, Serialize};

use crate::puzzle::VehicleKind;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);

    /// Packed `0xRRGGBB`
    pub fn to_u32(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }
}

/// Rendering attributes for one vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: Rgb,
}

impl Style {
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }
}

/// Color per vehicle kind, used by the decoder to style new vehicles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub car_horizontal: Rgb,
    pub car_vertical: Rgb,
    pub truck_horizontal: Rgb,
    pub truck_vertical: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            car_horizontal: Rgb::MAGENTA,
            car_vertical: Rgb::BLUE,
            truck_horizontal: Rgb::GREEN,
            truck_vertical: Rgb::YELLOW,
        }
    }
}

impl Palette {
    pub fn style_for(&self, kind: VehicleKind) -> Style {
        let color = match kind {
            VehicleKind::CarHorizontal => self.car_horizontal,
            VehicleKind::CarVertical => self.car_vertical,
            VehicleKind::TruckHorizontal => self.truck_horizontal,
            VehicleKind::TruckVertical => self.truck_vertical,
        };
        Style::new(color)
    }
}
