//! Vehicles: cars and trucks parked on the grid

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::segment::{Axis, Segment};
use crate::consts::{CAR_LENGTH, TRUCK_LENGTH};
use crate::style::Style;

/// Vehicle classification, as encoded by its lead glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    CarHorizontal,
    CarVertical,
    TruckHorizontal,
    TruckVertical,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 4] = [
        VehicleKind::CarHorizontal,
        VehicleKind::CarVertical,
        VehicleKind::TruckHorizontal,
        VehicleKind::TruckVertical,
    ];

    /// Level glyph that anchors this kind
    pub fn glyph(self) -> char {
        match self {
            VehicleKind::CarHorizontal => 'c',
            VehicleKind::CarVertical => 'C',
            VehicleKind::TruckHorizontal => 't',
            VehicleKind::TruckVertical => 'T',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'c' => Some(VehicleKind::CarHorizontal),
            'C' => Some(VehicleKind::CarVertical),
            't' => Some(VehicleKind::TruckHorizontal),
            'T' => Some(VehicleKind::TruckVertical),
            _ => None,
        }
    }

    /// Cells covered
    pub fn length(self) -> i32 {
        match self {
            VehicleKind::CarHorizontal | VehicleKind::CarVertical => CAR_LENGTH,
            VehicleKind::TruckHorizontal | VehicleKind::TruckVertical => TRUCK_LENGTH,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            VehicleKind::CarHorizontal | VehicleKind::TruckHorizontal => Axis::Horizontal,
            VehicleKind::CarVertical | VehicleKind::TruckVertical => Axis::Vertical,
        }
    }

    pub fn is_truck(self) -> bool {
        matches!(self, VehicleKind::TruckHorizontal | VehicleKind::TruckVertical)
    }
}

/// A vehicle: a run of cells, its kind, and how to draw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    segment: Segment,
    kind: VehicleKind,
    style: Style,
}

impl Vehicle {
    /// Create a vehicle spanning `a..=b`.
    ///
    /// The run is not checked against `kind`; endpoints may come in any order.
    pub fn new(a: IVec2, b: IVec2, kind: VehicleKind, style: Style) -> Self {
        Self {
            segment: Segment::new(a, b),
            kind,
            style,
        }
    }

    /// Create a vehicle whose lead cell is `lead`, extending right (horizontal)
    /// or down (vertical) for the kind's length
    pub fn anchored(kind: VehicleKind, lead: IVec2, style: Style) -> Self {
        let tail = lead + kind.axis().step() * (kind.length() - 1);
        Self::new(lead, tail, kind, style)
    }

    #[inline]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Top-left cell
    #[inline]
    pub fn start(&self) -> IVec2 {
        self.segment.start()
    }

    /// Bottom-right cell
    #[inline]
    pub fn end(&self) -> IVec2 {
        self.segment.end()
    }

    pub fn width(&self) -> i32 {
        self.segment.width()
    }

    pub fn height(&self) -> i32 {
        self.segment.height()
    }

    /// Every cell under the vehicle, from `start` to `end`
    pub fn occupied_tiles(&self) -> Vec<IVec2> {
        self.segment.cells()
    }

    /// True if the vehicle covers `cell`
    #[inline]
    pub fn occupies(&self, cell: IVec2) -> bool {
        self.segment.contains(cell)
    }

    /// True if `cell` is the vehicle's first or last cell
    #[inline]
    pub fn contains_endpoint(&self, cell: IVec2) -> bool {
        self.segment.has_endpoint(cell)
    }

    pub fn overlaps(&self, other: &Vehicle) -> bool {
        self.segment.overlaps(&other.segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgb;

    #[test]
    fn test_kind_properties() {
        for kind in VehicleKind::ALL {
            assert_eq!(kind.is_truck(), kind.length() == crate::consts::TRUCK_LENGTH);
            assert_eq!(VehicleKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert!(VehicleKind::TruckVertical.is_truck());
        assert!(!VehicleKind::CarHorizontal.is_truck());
    }

    fn vehicle(x1: i32, y1: i32, x2: i32, y2: i32) -> Vehicle {
        let kind = if y1 == y2 {
            VehicleKind::CarHorizontal
        } else {
            VehicleKind::CarVertical
        };
        Vehicle::new(IVec2::new(x1, y1), IVec2::new(x2, y2), kind, Style::new(Rgb::BLUE))
    }

    #[test]
    fn test_glyph_mapping() {
        for kind in VehicleKind::ALL {
            assert_eq!(VehicleKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(VehicleKind::from_glyph('X'), None);
        assert_eq!(VehicleKind::from_glyph(' '), None);
    }

    #[test]
    fn test_anchored_extends_along_axis() {
        let style = Style::new(Rgb::GREEN);
        let truck = Vehicle::anchored(VehicleKind::TruckVertical, IVec2::new(5, 2), style);
        assert_eq!(truck.start(), IVec2::new(5, 2));
        assert_eq!(truck.end(), IVec2::new(5, 4));
        assert_eq!((truck.width(), truck.height()), (1, 3));

        let car = Vehicle::anchored(VehicleKind::CarHorizontal, IVec2::new(1, 3), style);
        assert_eq!(car.end(), IVec2::new(2, 3));
        assert_eq!((car.width(), car.height()), (2, 1));
    }

    #[test]
    fn test_occupied_tiles() {
        let truck = vehicle(1, 4, 3, 4);
        let tiles = truck.occupied_tiles();
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles.first(), Some(&IVec2::new(1, 4)));
        assert_eq!(tiles.last(), Some(&IVec2::new(3, 4)));
        assert!(tiles.iter().all(|&t| truck.occupies(t)));
    }

    #[test]
    fn test_overlaps() {
        let car1 = vehicle(1, 2, 2, 2);
        let car2 = vehicle(2, 2, 3, 2);
        let truck1 = vehicle(1, 1, 1, 3);
        let truck2 = vehicle(1, 2, 1, 5);

        assert!(car1.overlaps(&car2));
        assert!(car1.overlaps(&truck1));
        assert!(truck1.overlaps(&truck2));
        assert!(!car2.overlaps(&truck2));
    }

    #[test]
    fn test_contains_endpoint() {
        let car = vehicle(2, 3, 1, 3);
        assert!(car.contains_endpoint(IVec2::new(1, 3)));
        assert!(car.contains_endpoint(IVec2::new(2, 3)));
        assert!(!car.contains_endpoint(IVec2::new(3, 3)));
    }
}
