//! Priority-ordered zone classification.
//!
//! # Spatial index
//!
//! Each zone's bounding box is stored in an R-tree (via `rstar`) so a lookup
//! only runs exact containment tests on zones whose box covers the point.
//! The index is an accelerator only: among exact hits the lowest list index
//! wins, so precedence is identical to a linear first-match scan.

use rstar::{AABB, RTree, RTreeObject};
use tracing::debug;

use tb_core::{Position, ZoneId};

use crate::{Zone, ZoneCategory, ZoneError, ZoneResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Bounding box of one zone, tagged with its priority.
struct ZoneEntry {
    min: [i32; 2],
    max: [i32; 2],
    id:  ZoneId,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[i32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ── ZoneClassifier ────────────────────────────────────────────────────────────

/// Maps positions to the first containing zone of a fixed, ordered list.
///
/// Stateless after construction.  With no zones configured every position
/// classifies as OUTSIDE.
pub struct ZoneClassifier {
    zones:   Vec<Zone>,
    index:   RTree<ZoneEntry>,
    outside: Zone,
}

impl ZoneClassifier {
    /// Build a classifier; list order is precedence order.
    pub fn new(zones: Vec<Zone>) -> ZoneResult<Self> {
        if zones.len() >= usize::from(u16::MAX) {
            return Err(ZoneError::TooManyZones(zones.len()));
        }

        let entries: Vec<ZoneEntry> = zones
            .iter()
            .enumerate()
            .filter_map(|(i, zone)| {
                let (min, max) = zone.shape.bounds()?;
                let id = ZoneId::try_from(i).ok()?;
                Some(ZoneEntry { min, max, id })
            })
            .collect();

        debug!(zones = zones.len(), indexed = entries.len(), "zone classifier built");

        Ok(Self {
            zones,
            index: RTree::bulk_load(entries),
            outside: Zone::outside(),
        })
    }

    /// A classifier with no zones.  Everything is OUTSIDE.
    pub fn empty() -> Self {
        Self {
            zones:   Vec::new(),
            index:   RTree::new(),
            outside: Zone::outside(),
        }
    }

    /// The first zone containing `pos`, if any.
    pub fn classify_id(&self, pos: Position) -> Option<ZoneId> {
        let point = AABB::from_point([pos.x, pos.y]);
        self.index
            .locate_in_envelope_intersecting(&point)
            .map(|entry| entry.id)
            .filter(|id| self.zones[id.index()].contains(pos))
            .min()
    }

    /// The first zone containing `pos`, or the OUTSIDE sentinel.
    pub fn classify(&self, pos: Position) -> &Zone {
        match self.classify_id(pos) {
            Some(id) => &self.zones[id.index()],
            None => &self.outside,
        }
    }

    #[inline]
    pub fn category_of(&self, pos: Position) -> ZoneCategory {
        self.classify(pos).category
    }

    /// `true` if any position lands in a tracked (non-OUTSIDE) zone.
    pub fn contains_any<I>(&self, positions: I) -> bool
    where
        I: IntoIterator<Item = Position>,
    {
        positions.into_iter().any(|p| self.category_of(p).is_tracked())
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for ZoneClassifier {
    fn default() -> Self {
        Self::empty()
    }
}
