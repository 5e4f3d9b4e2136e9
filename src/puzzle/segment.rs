//! Axis-aligned grid segments
//!
//! A segment is an inclusive run of grid cells between two endpoints that
//! share either a column (vertical) or a row (horizontal). Endpoints are
//! stored normalized, `start <= end` on both axes, so every predicate here is
//! independent of the order the caller supplied them in.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis a segment runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Unit step along this axis
    #[inline]
    pub fn step(self) -> IVec2 {
        match self {
            Axis::Horizontal => IVec2::X,
            Axis::Vertical => IVec2::Y,
        }
    }
}

/// An inclusive run of grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    start: IVec2,
    end: IVec2,
}

impl Segment {
    /// Build a segment from two endpoints in any order.
    ///
    /// Length and axis alignment are not checked; the decoder only produces
    /// straight 2- or 3-cell runs.
    pub fn new(a: IVec2, b: IVec2) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn start(&self) -> IVec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> IVec2 {
        self.end
    }

    /// Same row at both ends. A single cell is both horizontal and vertical.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    /// Number of columns covered
    #[inline]
    pub fn width(&self) -> i32 {
        self.end.x - self.start.x + 1
    }

    /// Number of rows covered
    #[inline]
    pub fn height(&self) -> i32 {
        self.end.y - self.start.y + 1
    }

    /// Cells covered along the run
    #[inline]
    pub fn length(&self) -> i32 {
        self.width().max(self.height())
    }

    /// Axis of travel; single cells report horizontal
    pub fn axis(&self) -> Axis {
        if self.is_horizontal() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// True if `cell` is one of the two endpoints
    #[inline]
    pub fn has_endpoint(&self, cell: IVec2) -> bool {
        self.start == cell || self.end == cell
    }

    /// True if `cell` lies anywhere on the run
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= self.start.x && cell.x <= self.end.x && cell.y >= self.start.y && cell.y <= self.end.y
    }

    /// Cells from `start` to `end` inclusive, in unit steps
    pub fn cells(&self) -> Vec<IVec2> {
        let step = self.axis().step();
        (0..self.length()).map(|i| self.start + step * i).collect()
    }

    /// Whether the two runs share at least one cell
    pub fn overlaps(&self, other: &Segment) -> bool {
        overlaps(self, other)
    }
}

/// Check whether two segments share a cell.
///
/// Cases, in order:
/// 1. Both horizontal on the same row: 1-D interval overlap on x
/// 2. Both vertical on the same column: 1-D interval overlap on y
/// 3. Otherwise a "+"/"T" crossing: the vertical run's column falls in the
///    horizontal run's x-range and the horizontal run's row falls in the
///    vertical run's y-range
///
/// Touching ranges count as overlapping (bounds are inclusive).
pub fn overlaps(a: &Segment, b: &Segment) -> bool {
    if a.is_horizontal() && b.is_horizontal() && a.start.y == b.start.y {
        return a.start.x.max(b.start.x) <= a.end.x.min(b.end.x);
    }

    if a.is_vertical() && b.is_vertical() && a.start.x == b.start.x {
        return a.start.y.max(b.start.y) <= a.end.y.min(b.end.y);
    }

    crosses(a, b) || crosses(b, a)
}

/// `horizontal` crossed by `vertical`
#[inline]
fn crosses(horizontal: &Segment, vertical: &Segment) -> bool {
    horizontal.is_horizontal()
        && vertical.is_vertical()
        && vertical.start.x >= horizontal.start.x
        && vertical.start.x <= horizontal.end.x
        && horizontal.start.y >= vertical.start.y
        && horizontal.start.y <= vertical.end.y
}
