//! `tb-zone` — named regions and position classification.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`shape`]      | `Shape` (`Rect`, `Polygon`, `Empty`) containment tests    |
//! | [`zone`]       | `Zone`, `ZoneCategory`                                    |
//! | [`classifier`] | `ZoneClassifier` — first-match classification, R-tree backed |
//! | [`loader`]     | `load_zones_csv`, `load_zones_reader`                     |
//! | [`error`]      | `ZoneError`, `ZoneResult<T>`                              |
//!
//! # Precedence
//!
//! Zones are evaluated in list order; the first zone whose plane matches and
//! whose shape contains the position wins.  Overlapping zones are expected:
//! a small exit zone (ladder, deposit box) usually sits inside a larger
//! threat zone and must be listed before it.

pub mod classifier;
pub mod error;
pub mod loader;
pub mod shape;
pub mod zone;


pub use classifier::ZoneClassifier;
pub use error::{ZoneError, ZoneResult};
pub use loader::{load_zones_csv, load_zones_reader};
pub use shape::{Polygon, Rect, Shape};
pub use zone::{Zone, ZoneCategory};
