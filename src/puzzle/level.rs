//! Level text decoding
//!
//! A level is a fixed-character grid read row-major:
//!
//! | glyph | meaning |
//! |-------|---------|
//! | `+` | border corner |
//! | `-` `\|` `#` | border edge / wall |
//! | ` ` | empty cell |
//! | `X` | exit (exactly one, on an edge, not a corner) |
//! | `c` `C` | car lead, horizontal / vertical (2 cells) |
//! | `t` `T` | truck lead, horizontal / vertical (3 cells) |
//!
//! Rows are either separated by newlines or simply concatenated. In the
//! concatenated form the width is learned from the top row, which runs from
//! corner to corner; every later row is cut after that many glyphs.
//!
//! Decoding is one left-to-right, top-to-bottom pass with a single cursor.
//! Glyphs are buffered for the current row only, and the row is settled
//! (vehicles emitted, exit recorded, edges checked) as soon as it closes.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::vehicle::{Vehicle, VehicleKind};
use crate::consts::MIN_BOARD_EXTENT;
use crate::error::MalformedLevel;
use crate::style::Palette;

pub const CORNER_GLYPH: char = '+';
pub const HORIZONTAL_EDGE_GLYPH: char = '-';
pub const VERTICAL_EDGE_GLYPH: char = '|';
pub const WALL_GLYPH: char = '#';
pub const EMPTY_GLYPH: char = ' ';
pub const EXIT_GLYPH: char = 'X';

/// Board extents in cells, border included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub cols: u32,
    pub rows: u32,
}

impl Dimensions {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    #[inline]
    fn last_col(&self) -> i32 {
        self.cols as i32 - 1
    }

    #[inline]
    fn last_row(&self) -> i32 {
        self.rows as i32 - 1
    }

    /// Cell lies on the board (border included)
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x <= self.last_col() && cell.y <= self.last_row()
    }

    /// Cell lies on the outer border ring
    pub fn is_edge(&self, cell: IVec2) -> bool {
        self.contains(cell)
            && (cell.x == 0 || cell.y == 0 || cell.x == self.last_col() || cell.y == self.last_row())
    }

    pub fn is_corner(&self, cell: IVec2) -> bool {
        self.contains(cell)
            && (cell.x == 0 || cell.x == self.last_col())
            && (cell.y == 0 || cell.y == self.last_row())
    }

    /// Playable cell, inside the border
    pub fn is_interior(&self, cell: IVec2) -> bool {
        self.contains(cell) && !self.is_edge(cell)
    }
}

/// A decoded level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub dimensions: Dimensions,
    /// Vehicles in lead-glyph order (row-major)
    pub vehicles: Vec<Vehicle>,
    pub exit: IVec2,
}

impl Level {
    /// Decode with the default palette
    pub fn parse(text: &str) -> Result<Self, MalformedLevel> {
        decode(text, &Palette::default())
    }

    /// Render back to newline-delimited level text
    pub fn encode(&self) -> String {
        encode(self.dimensions, &self.vehicles, self.exit)
    }
}

/// What a single glyph stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Corner,
    Wall,
    Empty,
    Exit,
    Lead(VehicleKind),
}

impl Glyph {
    fn parse(ch: char) -> Option<Self> {
        match ch {
            CORNER_GLYPH => Some(Glyph::Corner),
            HORIZONTAL_EDGE_GLYPH | VERTICAL_EDGE_GLYPH | WALL_GLYPH => Some(Glyph::Wall),
            EMPTY_GLYPH => Some(Glyph::Empty),
            EXIT_GLYPH => Some(Glyph::Exit),
            _ => VehicleKind::from_glyph(ch).map(Glyph::Lead),
        }
    }

    fn is_border(self) -> bool {
        matches!(self, Glyph::Corner | Glyph::Wall)
    }

    /// Allowed on the outer ring
    fn fits_edge(self) -> bool {
        self.is_border() || self == Glyph::Exit
    }
}

/// Decode level text into dimensions, vehicles and exit.
///
/// Vehicles take their style from `palette`. The result has already passed
/// [`validate_layout`].
pub fn decode(text: &str, palette: &Palette) -> Result<Level, MalformedLevel> {
    let mut decoder = Decoder::new(palette, text.contains('\n'));
    text.chars()
        .try_for_each(|ch| decoder.feed(ch))
        .and_then(|()| decoder.finish())
        .inspect(|level| {
            log::debug!(
                "Decoded {}x{} level: {} vehicles, exit at {}",
                level.dimensions.cols,
                level.dimensions.rows,
                level.vehicles.len(),
                level.exit
            );
        })
        .inspect_err(|e| log::warn!("Rejected level: {}", e))
}

/// Cursor and accumulator for one decoding pass
struct Decoder<'p> {
    palette: &'p Palette,
    /// Rows end at newlines instead of after `width` glyphs
    delimited: bool,
    /// Cursor row (rows closed so far)
    row: i32,
    /// Learned from the first row
    width: Option<i32>,
    /// Glyphs of the row under the cursor
    pending: Vec<(char, Glyph)>,
    vehicles: Vec<Vehicle>,
    exit: Option<IVec2>,
    /// A closed all-wall row below the top; legal only as the last row
    wall_row: Option<(char, IVec2)>,
    /// First empty/piece glyph in the most recent closed row
    last_open: Option<(char, IVec2)>,
}

impl<'p> Decoder<'p> {
    fn new(palette: &'p Palette, delimited: bool) -> Self {
        Self {
            palette,
            delimited,
            row: 0,
            width: None,
            pending: Vec::new(),
            vehicles: Vec::new(),
            exit: None,
            wall_row: None,
            last_open: None,
        }
    }

    #[inline]
    fn cursor(&self) -> IVec2 {
        IVec2::new(self.pending.len() as i32, self.row)
    }

    fn feed(&mut self, ch: char) -> Result<(), MalformedLevel> {
        match ch {
            '\r' => return Ok(()),
            '\n' => {
                // Blank lines carry no cells
                if !self.pending.is_empty() {
                    self.close_row()?;
                }
                return Ok(());
            }
            _ => {}
        }

        let glyph = Glyph::parse(ch).ok_or(MalformedLevel::UnknownGlyph {
            glyph: ch,
            at: self.cursor(),
        })?;
        self.pending.push((ch, glyph));

        if !self.delimited {
            let len = self.pending.len() as i32;
            let closes = match self.width {
                // Top row ends at its second corner
                None => glyph == Glyph::Corner && len > 1,
                Some(width) => len == width,
            };
            if closes {
                self.close_row()?;
            }
        }
        Ok(())
    }

    fn close_row(&mut self) -> Result<(), MalformedLevel> {
        let y = self.row;
        let len = self.pending.len() as i32;
        let width = *self.width.get_or_insert(len);
        if len != width {
            return Err(MalformedLevel::RaggedRow {
                row: y,
                expected: width,
                found: len,
            });
        }

        // A wall row followed by more rows sits inside the board
        if let Some((glyph, at)) = self.wall_row.take() {
            return Err(MalformedLevel::MisplacedGlyph { glyph, at });
        }

        let mut open = None;
        let mut inner_wall = None;
        let cells = std::mem::take(&mut self.pending);
        for (x, &(ch, glyph)) in cells.iter().enumerate() {
            let at = IVec2::new(x as i32, y);
            let on_ring = y == 0 || at.x == 0 || at.x == width - 1;

            if on_ring && !glyph.fits_edge() {
                return Err(MalformedLevel::MisplacedGlyph { glyph: ch, at });
            }
            if !on_ring {
                if glyph.is_border() {
                    inner_wall.get_or_insert((ch, at));
                } else if glyph != Glyph::Exit {
                    open.get_or_insert((ch, at));
                }
            }

            match glyph {
                Glyph::Exit => self.place_exit(at)?,
                Glyph::Lead(kind) => {
                    let vehicle = Vehicle::anchored(kind, at, self.palette.style_for(kind));
                    log::debug!(
                        "{:?} at {} -> {}",
                        kind,
                        vehicle.start(),
                        vehicle.end()
                    );
                    self.vehicles.push(vehicle);
                }
                _ => {}
            }
        }
        self.pending = cells;
        self.pending.clear();

        if let Some(wall) = inner_wall {
            // Walls and playable cells mixed inside one row
            if open.is_some() {
                let (glyph, at) = wall;
                return Err(MalformedLevel::MisplacedGlyph { glyph, at });
            }
            if y > 0 {
                self.wall_row = Some(wall);
            }
        }

        self.last_open = open;
        self.row += 1;
        Ok(())
    }

    fn place_exit(&mut self, at: IVec2) -> Result<(), MalformedLevel> {
        if let Some(first) = self.exit {
            return Err(MalformedLevel::MultipleExits { first, second: at });
        }
        log::debug!("Exit at {}", at);
        self.exit = Some(at);
        Ok(())
    }

    fn finish(mut self) -> Result<Level, MalformedLevel> {
        if !self.pending.is_empty() {
            self.close_row()?;
        }
        let Some(width) = self.width else {
            return Err(MalformedLevel::Empty);
        };

        // The bottom row must be border
        if let Some((glyph, at)) = self.last_open {
            return Err(MalformedLevel::MisplacedGlyph { glyph, at });
        }

        let dimensions = Dimensions::new(width as u32, self.row as u32);
        if dimensions.cols < MIN_BOARD_EXTENT || dimensions.rows < MIN_BOARD_EXTENT {
            return Err(MalformedLevel::TooSmall {
                cols: dimensions.cols,
                rows: dimensions.rows,
            });
        }

        let exit = self.exit.ok_or(MalformedLevel::MissingExit)?;
        validate_layout(dimensions, &self.vehicles, exit)?;

        Ok(Level {
            dimensions,
            vehicles: self.vehicles,
            exit,
        })
    }
}

/// Check the geometric invariants of a board layout:
/// - the board is at least 3x3
/// - the exit sits on the border, not in a corner
/// - every vehicle cell is playable (inside the border, or the exit cell)
/// - no two vehicles share a cell
pub fn validate_layout(
    dimensions: Dimensions,
    vehicles: &[Vehicle],
    exit: IVec2,
) -> Result<(), MalformedLevel> {
    if dimensions.cols < MIN_BOARD_EXTENT || dimensions.rows < MIN_BOARD_EXTENT {
        return Err(MalformedLevel::TooSmall {
            cols: dimensions.cols,
            rows: dimensions.rows,
        });
    }

    if !dimensions.is_edge(exit) || dimensions.is_corner(exit) {
        return Err(MalformedLevel::ExitOffBoundary { at: exit });
    }

    for vehicle in vehicles {
        let playable = vehicle
            .occupied_tiles()
            .into_iter()
            .all(|cell| cell == exit || dimensions.is_interior(cell));
        if !playable {
            return Err(MalformedLevel::VehicleOutOfBounds {
                at: vehicle.start(),
            });
        }
    }

    for (i, a) in vehicles.iter().enumerate() {
        if let Some(b) = vehicles[i + 1..].iter().find(|b| a.overlaps(b)) {
            return Err(MalformedLevel::OverlappingVehicles {
                first: a.start(),
                second: b.start(),
            });
        }
    }

    Ok(())
}

/// Render a layout as newline-delimited level text.
///
/// Each vehicle is written as its lead glyph at its start cell. The exit
/// glyph takes precedence over a lead that would land on it.
pub fn encode(dimensions: Dimensions, vehicles: &[Vehicle], exit: IVec2) -> String {
    let cols = dimensions.cols as usize;
    let rows = dimensions.rows as usize;
    let mut grid: Vec<Vec<char>> = (0..rows)
        .map(|y| {
            (0..cols)
                .map(|x| {
                    let cell = IVec2::new(x as i32, y as i32);
                    if dimensions.is_corner(cell) {
                        CORNER_GLYPH
                    } else if y == 0 || y == rows - 1 {
                        HORIZONTAL_EDGE_GLYPH
                    } else if x == 0 || x == cols - 1 {
                        VERTICAL_EDGE_GLYPH
                    } else {
                        EMPTY_GLYPH
                    }
                })
                .collect()
        })
        .collect();

    for vehicle in vehicles {
        let lead = vehicle.start();
        if dimensions.contains(lead) && lead != exit {
            grid[lead.y as usize][lead.x as usize] = vehicle.kind().glyph();
        }
    }
    if dimensions.contains(exit) {
        grid[exit.y as usize][exit.x as usize] = EXIT_GLYPH;
    }

    let mut text = String::with_capacity(rows * (cols + 1));
    for (y, row) in grid.iter().enumerate() {
        if y > 0 {
            text.push('\n');
        }
        text.extend(row.iter());
    }
    text
}
