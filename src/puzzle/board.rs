//! The puzzle board: decoded layout plus selection state
//!
//! Everything here is read-only after construction except the selection,
//! which only [`Board::hit_test`] changes.

use std::fmt;

use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};

use super::level::{self, Dimensions, Level};
use super::segment::Axis;
use super::vehicle::Vehicle;
use crate::error::{Error, Result};
use crate::style::Palette;
use crate::{pixel_to_tile, tile_to_pixel};

/// How the target vehicle (the one that must reach the exit) is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum TargetSelector {
    /// The vehicle lined up with the exit and pointing at it: a horizontal
    /// vehicle on the exit's row for left/right exits, a vertical vehicle on
    /// the exit's column for top/bottom exits. Nearest to the exit wins.
    #[default]
    AlignedWithExit,
    /// The n-th vehicle in decode order
    Index(usize),
    /// The vehicle covering this cell
    Occupying(IVec2),
}

impl TargetSelector {
    /// Resolve to an index into `vehicles`.
    ///
    /// `AlignedWithExit` may legitimately find nothing (an empty board, or no
    /// vehicle on the exit lane) and yields `Ok(None)`. The explicit rules
    /// name a vehicle, so a miss is an error.
    pub fn resolve(&self, vehicles: &[Vehicle], dimensions: Dimensions, exit: IVec2) -> Result<Option<usize>> {
        let found = match *self {
            TargetSelector::AlignedWithExit => {
                let side_exit = exit.x == 0 || exit.x == dimensions.cols as i32 - 1;
                let (axis, lane): (Axis, fn(IVec2) -> i32) = if side_exit {
                    (Axis::Horizontal, |cell: IVec2| cell.y)
                } else {
                    (Axis::Vertical, |cell: IVec2| cell.x)
                };
                let aligned = vehicles
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.kind().axis() == axis && lane(v.start()) == lane(exit))
                    .min_by_key(|(_, v)| {
                        let to_start = (v.start() - exit).abs();
                        let to_end = (v.end() - exit).abs();
                        (to_start.x + to_start.y).min(to_end.x + to_end.y)
                    })
                    .map(|(i, _)| i);
                return Ok(aligned);
            }
            TargetSelector::Index(i) => (i < vehicles.len()).then_some(i),
            TargetSelector::Occupying(cell) => vehicles.iter().position(|v| v.occupies(cell)),
        };
        found.map(Some).ok_or(Error::TargetNotFound(*self))
    }
}

/// A playable board
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    dimensions: Dimensions,
    /// Edge length of one cell in pixels
    tile_size: u32,
    vehicles: Vec<Vehicle>,
    exit: IVec2,
    /// Index of the vehicle that must reach the exit, if any lines up
    target: Option<usize>,
    /// Index of the selected vehicle
    selected: Option<usize>,
}

impl Board {
    /// Decode a level and pick the target lined up with the exit
    pub fn from_level(level: &str, tile_size: u32) -> Result<Self> {
        Self::from_level_with(level, tile_size, TargetSelector::default())
    }

    /// Decode a level with an explicit target rule
    pub fn from_level_with(level: &str, tile_size: u32, target: TargetSelector) -> Result<Self> {
        let level = level::decode(level, &Palette::default())?;
        Self::from_decoded(level, tile_size, target)
    }

    /// Build from an already decoded level
    pub fn from_decoded(level: Level, tile_size: u32, target: TargetSelector) -> Result<Self> {
        let Level {
            dimensions,
            vehicles,
            exit,
        } = level;
        Self::new(dimensions, vehicles, exit, tile_size, target)
    }

    /// Build from an explicit layout.
    ///
    /// The layout gets the same checks as decoded levels: exit on the
    /// border, vehicles inside the playable area, no overlaps.
    pub fn new(
        dimensions: Dimensions,
        vehicles: Vec<Vehicle>,
        exit: IVec2,
        tile_size: u32,
        target: TargetSelector,
    ) -> Result<Self> {
        level::validate_layout(dimensions, &vehicles, exit)?;
        if pixel_extent(dimensions, tile_size).is_none() {
            return Err(Error::InvalidTileSize);
        }

        let target_index = target.resolve(&vehicles, dimensions, exit)?;
        match target_index {
            Some(i) => log::info!(
                "Board {}x{} (tile {}px): {} vehicles, exit at {}, target {:?} at {}",
                dimensions.cols,
                dimensions.rows,
                tile_size,
                vehicles.len(),
                exit,
                vehicles[i].kind(),
                vehicles[i].start()
            ),
            None => log::info!(
                "Board {}x{} (tile {}px): {} vehicles, exit at {}, no target lines up with the exit",
                dimensions.cols,
                dimensions.rows,
                tile_size,
                vehicles.len(),
                exit
            ),
        }

        Ok(Self {
            dimensions,
            tile_size,
            vehicles,
            exit,
            target: target_index,
            selected: None,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn exit_coordinate(&self) -> IVec2 {
        self.exit
    }

    /// The vehicle that has to reach the exit
    pub fn target(&self) -> Option<&Vehicle> {
        self.target.map(|i| &self.vehicles[i])
    }

    pub fn target_index(&self) -> Option<usize> {
        self.target
    }

    /// Currently selected vehicle, if any
    pub fn selected(&self) -> Option<&Vehicle> {
        self.selected.map(|i| &self.vehicles[i])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Board size in pixels
    pub fn pixel_size(&self) -> UVec2 {
        let extent = pixel_extent(self.dimensions, self.tile_size).unwrap_or(IVec2::ZERO);
        extent.as_uvec2()
    }

    /// Top-left pixel of a cell, for renderers
    pub fn tile_origin(&self, cell: IVec2) -> IVec2 {
        tile_to_pixel(cell, self.tile_size)
    }

    /// Grid cell under a pixel, or `None` off the board
    pub fn tile_at_pixel(&self, pixel: IVec2) -> Option<IVec2> {
        let cell = pixel_to_tile(pixel, self.tile_size);
        self.dimensions.contains(cell).then_some(cell)
    }

    /// Index of the vehicle covering `cell`.
    ///
    /// Layouts never overlap, so at most one vehicle matches.
    pub fn vehicle_index_at(&self, cell: IVec2) -> Option<usize> {
        self.vehicles.iter().position(|v| v.occupies(cell))
    }

    /// Vehicle covering `cell`
    pub fn vehicle_at(&self, cell: IVec2) -> Option<&Vehicle> {
        self.vehicle_index_at(cell).map(|i| &self.vehicles[i])
    }

    /// Select the vehicle under a pixel.
    ///
    /// A hit replaces the selection; a miss (including anything off the
    /// board) clears it.
    pub fn hit_test(&mut self, pixel: IVec2) -> Option<&Vehicle> {
        let cell = self.tile_at_pixel(pixel);
        self.selected = cell.and_then(|c| self.vehicle_index_at(c));
        log::trace!("Hit test {} -> cell {:?}, vehicle {:?}", pixel, cell, self.selected);
        self.selected()
    }

    /// Whether the target vehicle has an end on the exit.
    ///
    /// A board without a target is never won.
    pub fn win_check(&self) -> bool {
        self.target().is_some_and(|v| v.contains_endpoint(self.exit))
    }
}

/// Board size in pixels, or `None` when the tile size is zero or the board
/// would not fit signed pixel coordinates
fn pixel_extent(dimensions: Dimensions, tile_size: u32) -> Option<IVec2> {
    let tile = i32::try_from(tile_size).ok().filter(|&t| t > 0)?;
    let cols = i32::try_from(dimensions.cols).ok()?.checked_mul(tile)?;
    let rows = i32::try_from(dimensions.rows).ok()?.checked_mul(tile)?;
    Some(IVec2::new(cols, rows))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&level::encode(self.dimensions, &self.vehicles, self.exit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels;
    use crate::puzzle::VehicleKind;
    use crate::style::{Rgb, Style};

    const TILE: u32 = 20;

    fn car(x1: i32, y1: i32, x2: i32, y2: i32) -> Vehicle {
        let kind = if y1 == y2 {
            VehicleKind::CarHorizontal
        } else {
            VehicleKind::CarVertical
        };
        Vehicle::new(IVec2::new(x1, y1), IVec2::new(x2, y2), kind, Style::new(Rgb::BLUE))
    }

    fn center(x: i32, y: i32) -> IVec2 {
        crate::tile_center(IVec2::new(x, y), TILE)
    }

    #[test]
    fn test_from_level_small() {
        let board = Board::from_level(levels::SMALL, TILE).unwrap();
        assert_eq!(board.dimensions(), Dimensions::new(7, 6));
        assert_eq!(board.exit_coordinate(), IVec2::new(6, 3));
        assert_eq!(board.vehicles().len(), 4);
        assert_eq!(board.pixel_size(), UVec2::new(140, 120));
        assert!(board.selected().is_none());

        // The horizontal car on the exit row
        assert_eq!(board.target().map(|v| v.start()), Some(IVec2::new(1, 3)));
        assert!(!board.win_check());
    }

    #[test]
    fn test_hit_test_selects_and_clears() {
        let mut board = Board::from_level(levels::SMALL, TILE).unwrap();

        // Tail cell of the vertical truck at (5,2)-(5,4)
        let hit = board.hit_test(center(5, 4)).cloned();
        assert_eq!(hit.map(|v| v.kind()), Some(VehicleKind::TruckVertical));
        assert_eq!(board.selected().map(|v| v.start()), Some(IVec2::new(5, 2)));

        // Another vehicle replaces the selection
        board.hit_test(center(2, 3));
        assert_eq!(board.selected().map(|v| v.start()), Some(IVec2::new(1, 3)));

        // Empty cell clears it
        assert!(board.hit_test(center(4, 1)).is_none());
        assert!(board.selected().is_none());
    }

    #[test]
    fn test_hit_test_off_board() {
        let mut board = Board::from_level(levels::SMALL, TILE).unwrap();
        board.hit_test(center(1, 3));
        assert!(board.selected().is_some());

        assert!(board.hit_test(IVec2::new(-1, 65)).is_none());
        assert!(board.selected().is_none());

        board.hit_test(center(1, 3));
        assert!(board.hit_test(IVec2::new(140, 10)).is_none());
        assert!(board.hit_test(IVec2::new(10, 120)).is_none());
        assert!(board.selected().is_none());
    }

    #[test]
    fn test_hit_test_pixel_edges() {
        let mut board = Board::from_level(levels::SMALL, TILE).unwrap();
        // Car (1,3)-(2,3) spans pixels x 20..60, y 60..80
        let start_at = |board: &mut Board, x, y| board.hit_test(IVec2::new(x, y)).map(|v| v.start());
        assert_eq!(start_at(&mut board, 20, 60), Some(IVec2::new(1, 3)));
        assert_eq!(start_at(&mut board, 59, 79), Some(IVec2::new(1, 3)));
        // One pixel right is the vertical car (3,2)-(3,3)
        assert_eq!(start_at(&mut board, 60, 79), Some(IVec2::new(3, 2)));
        // One pixel left is the border
        assert_eq!(start_at(&mut board, 19, 70), None);
    }

    #[test]
    fn test_win_check_on_explicit_layout() {
        let dims = Dimensions::new(5, 3);
        let exit = IVec2::new(4, 1);

        let parked = Board::new(dims, vec![car(1, 1, 2, 1)], exit, TILE, TargetSelector::Index(0)).unwrap();
        assert!(!parked.win_check());

        let escaped = Board::new(dims, vec![car(3, 1, 4, 1)], exit, TILE, TargetSelector::Index(0)).unwrap();
        assert!(escaped.win_check());
    }

    #[test]
    fn test_win_check_only_counts_target() {
        // Vertical car nosing into a bottom exit, but the target is the other car
        let dims = Dimensions::new(5, 5);
        let exit = IVec2::new(2, 4);
        let vehicles = vec![car(1, 1, 1, 2), car(2, 3, 2, 4)];

        let board = Board::new(dims, vehicles.clone(), exit, TILE, TargetSelector::Index(0)).unwrap();
        assert!(!board.win_check());

        let board = Board::new(dims, vehicles, exit, TILE, TargetSelector::AlignedWithExit).unwrap();
        assert_eq!(board.target_index(), Some(1));
        assert!(board.win_check());
    }

    #[test]
    fn test_decoded_level_can_start_won() {
        let board = Board::from_level("+---+|  cX+---+", TILE).unwrap();
        assert!(board.win_check());
    }

    #[test]
    fn test_target_selectors() {
        let board = Board::from_level_with(levels::SMALL, TILE, TargetSelector::Index(1)).unwrap();
        assert_eq!(board.target().map(|v| v.kind()), Some(VehicleKind::TruckVertical));

        let board = Board::from_level_with(
            levels::SMALL,
            TILE,
            TargetSelector::Occupying(IVec2::new(3, 4)),
        )
        .unwrap();
        assert_eq!(board.target().map(|v| v.kind()), Some(VehicleKind::TruckHorizontal));

        assert!(matches!(
            Board::from_level_with(levels::SMALL, TILE, TargetSelector::Index(9)),
            Err(Error::TargetNotFound(TargetSelector::Index(9)))
        ));
        assert!(matches!(
            Board::from_level_with(levels::SMALL, TILE, TargetSelector::Occupying(IVec2::new(4, 1))),
            Err(Error::TargetNotFound(_))
        ));
    }

    #[test]
    fn test_aligned_target_prefers_nearest() {
        let dims = Dimensions::new(8, 3);
        let exit = IVec2::new(7, 1);
        let vehicles = vec![car(1, 1, 2, 1), car(4, 1, 5, 1)];
        let board = Board::new(dims, vehicles, exit, TILE, TargetSelector::AlignedWithExit).unwrap();
        assert_eq!(board.target().map(|v| v.start()), Some(IVec2::new(4, 1)));
    }

    #[test]
    fn test_no_aligned_target_still_builds() {
        // Only a vertical car, exit on the right edge
        let mut board = Board::from_level("+----+\n| C  X\n|    |\n+----+", TILE).unwrap();
        assert_eq!(board.vehicles().len(), 1);
        assert!(board.target().is_none());
        assert_eq!(board.target_index(), None);
        assert!(!board.win_check());
        assert!(board.hit_test(center(2, 1)).is_some());

        // No vehicles at all
        let board = Board::from_level("+---+\n|   X\n|   |\n+---+", TILE).unwrap();
        assert!(board.vehicles().is_empty());
        assert!(board.target().is_none());
        assert!(!board.win_check());
    }

    #[test]
    fn test_explicit_target_on_empty_board() {
        assert!(matches!(
            Board::from_level_with("+---+\n|   X\n|   |\n+---+", TILE, TargetSelector::Index(0)),
            Err(Error::TargetNotFound(TargetSelector::Index(0)))
        ));
    }

    #[test]
    fn test_invalid_tile_size() {
        assert!(matches!(
            Board::from_level(levels::SMALL, 0),
            Err(Error::InvalidTileSize)
        ));
        // Beyond signed pixel range
        assert!(matches!(
            Board::from_level("+--+|c X+--+", u32::MAX),
            Err(Error::InvalidTileSize)
        ));
        assert!(matches!(
            Board::from_level("+--+|c X+--+", i32::MAX as u32 + 1),
            Err(Error::InvalidTileSize)
        ));
        // Fits one tile, but not a whole row of them
        assert!(matches!(
            Board::from_level("+--+|c X+--+", i32::MAX as u32 / 2),
            Err(Error::InvalidTileSize)
        ));
    }

    #[test]
    fn test_largest_tile_size_stays_in_range() {
        // 4x3 board: the widest extent is 4 tiles
        let tile = i32::MAX as u32 / 4;
        let mut board = Board::from_level("+--+|c X+--+", tile).unwrap();
        assert_eq!(board.pixel_size(), UVec2::new(tile * 4, tile * 3));
        assert!(board.hit_test(IVec2::new(i32::MIN, 0)).is_none());
        assert!(board.hit_test(IVec2::new(i32::MAX, i32::MAX)).is_none());
        let car = board.hit_test(IVec2::new(tile as i32 + 1, tile as i32 + 1)).map(|v| v.start());
        assert_eq!(car, Some(IVec2::new(1, 1)));
    }

    #[test]
    fn test_tile_origin() {
        let board = Board::from_level(levels::SMALL, TILE).unwrap();
        assert_eq!(board.tile_origin(IVec2::ZERO), IVec2::ZERO);
        assert_eq!(board.tile_origin(IVec2::new(3, 2)), IVec2::new(60, 40));
        let origin = board.tile_origin(IVec2::new(5, 4));
        assert_eq!(board.tile_at_pixel(origin), Some(IVec2::new(5, 4)));
        assert_eq!(board.tile_at_pixel(origin - IVec2::ONE), Some(IVec2::new(4, 3)));
    }

    #[test]
    fn test_selected_index_tracks_hit_test() {
        let mut board = Board::from_level(levels::SMALL, TILE).unwrap();
        assert_eq!(board.selected_index(), None);
        // SMALL decode order: C(3,2), T(5,2), c(1,3), t(1,4)
        board.hit_test(center(5, 3));
        assert_eq!(board.selected_index(), Some(1));
        board.hit_test(center(3, 4));
        assert_eq!(board.selected_index(), Some(3));
        board.hit_test(center(0, 0));
        assert_eq!(board.selected_index(), None);
    }

    #[test]
    fn test_explicit_layout_validation() {
        let dims = Dimensions::new(6, 4);
        let exit = IVec2::new(5, 1);

        let overlapping = vec![car(1, 1, 2, 1), car(2, 1, 2, 2)];
        assert!(matches!(
            Board::new(dims, overlapping, exit, TILE, TargetSelector::Index(0)),
            Err(Error::MalformedLevel(crate::MalformedLevel::OverlappingVehicles { .. }))
        ));

        let on_border = vec![car(0, 1, 1, 1)];
        assert!(matches!(
            Board::new(dims, on_border, exit, TILE, TargetSelector::Index(0)),
            Err(Error::MalformedLevel(crate::MalformedLevel::VehicleOutOfBounds { .. }))
        ));

        assert!(matches!(
            Board::new(dims, vec![car(1, 1, 2, 1)], IVec2::new(2, 2), TILE, TargetSelector::Index(0)),
            Err(Error::MalformedLevel(crate::MalformedLevel::ExitOffBoundary { .. }))
        ));
    }

    #[test]
    fn test_display_reencodes() {
        let board = Board::from_level(levels::CLASSIC, TILE).unwrap();
        let again = Board::from_level(&board.to_string(), TILE).unwrap();
        assert_eq!(again.vehicles(), board.vehicles());
        assert_eq!(again.exit_coordinate(), board.exit_coordinate());
        assert_eq!(again.dimensions(), board.dimensions());
    }

    #[test]
    fn test_snapshot_serializes() {
        let board = Board::from_level(levels::SMALL, TILE).unwrap();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["tile_size"], 20);
        assert_eq!(json["exit"], serde_json::json!([6, 3]));
        assert_eq!(json["vehicles"].as_array().map(Vec::len), Some(4));
    }
}
