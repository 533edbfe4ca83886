//! Tile-grid position type.
//!
//! Hosts report positions as integer tile coordinates on a numbered plane
//! (floor level).  Distances are Euclidean in tile units and are only
//! meaningful between positions on the same plane.

use std::fmt;

/// A tile coordinate on a given plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x:     i32,
    pub y:     i32,
    pub plane: u8,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32, plane: u8) -> Self {
        Self { x, y, plane }
    }

    /// Euclidean distance in tiles.  Ignores the plane; check
    /// [`same_plane`][Self::same_plane] first when it matters.
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn same_plane(self, other: Position) -> bool {
        self.plane == other.plane
    }

    /// Pack into a 32-bit key: `plane(2) | y(15) | x(15)`.
    ///
    /// Coordinates are masked to 15 bits, so two positions more than 32 767
    /// tiles apart on an axis may collide.  Game worlds stay well inside that.
    #[inline]
    pub fn key(self) -> u32 {
        (u32::from(self.plane & 0b11) << 30)
            | ((self.y as u32 & 0x7FFF) << 15)
            | (self.x as u32 & 0x7FFF)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}
