//! Zones and their risk categories.

use std::fmt;

use tb_core::Position;

use crate::Shape;

/// Risk classification of a zone.
///
/// Ordered by severity (`Outside < Exit < Threat`), so "escalation" is simply
/// a move to a greater category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZoneCategory {
    /// Not in any configured zone; ignored by detectors.
    #[default]
    Outside,
    /// Pass-through area (ladder, bank booth, door).  Presence here is most
    /// likely someone leaving, so detectors allow a longer grace window.
    Exit,
    /// Work area.  Presence here is most likely someone staying.
    Threat,
}

impl ZoneCategory {
    /// `true` for categories a detector should react to.
    #[inline]
    pub fn is_tracked(self) -> bool {
        !matches!(self, ZoneCategory::Outside)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneCategory::Outside => "outside",
            ZoneCategory::Exit    => "exit",
            ZoneCategory::Threat  => "threat",
        }
    }
}

impl fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named region on one plane.  Immutable once built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub name:     String,
    pub shape:    Shape,
    pub plane:    u8,
    pub category: ZoneCategory,
}

impl Zone {
    pub fn new(name: impl Into<String>, shape: impl Into<Shape>, plane: u8, category: ZoneCategory) -> Self {
        Self { name: name.into(), shape: shape.into(), plane, category }
    }

    pub fn exit(name: impl Into<String>, shape: impl Into<Shape>, plane: u8) -> Self {
        Self::new(name, shape, plane, ZoneCategory::Exit)
    }

    pub fn threat(name: impl Into<String>, shape: impl Into<Shape>, plane: u8) -> Self {
        Self::new(name, shape, plane, ZoneCategory::Threat)
    }

    /// The sentinel returned when no configured zone matches.
    pub fn outside() -> Self {
        Self::new("outside", Shape::Empty, 0, ZoneCategory::Outside)
    }

    #[inline]
    pub fn is_outside(&self) -> bool {
        self.category == ZoneCategory::Outside
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.plane == pos.plane && self.shape.contains(pos.x, pos.y)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.category)
    }
}
