//! CSV zone loader.
//!
//! # CSV format
//!
//! One row per zone, in precedence order (first row wins on overlap).
//!
//! ```csv
//! name,category,plane,shape,points
//! ladder,exit,0,rect,2838:9387 2840:9389
//! deposit,exit,0,rect,2841:9382 2844:9385
//! mine,threat,0,rect,2825:9377 2851:9401
//! cave,threat,1,polygon,10:10 20:10 20:20 10:20
//! ```
//!
//! | Column     | Values                                                   |
//! |------------|----------------------------------------------------------|
//! | `category` | `exit` or `threat`                                       |
//! | `shape`    | `rect` (exactly two corner points) or `polygon` (≥ 3)    |
//! | `points`   | whitespace-separated `x:y` pairs                         |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{Polygon, Rect, Shape, Zone, ZoneCategory, ZoneClassifier, ZoneError, ZoneResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ZoneRecord {
    name:     String,
    category: String,
    plane:    u8,
    shape:    String,
    points:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load zones from a CSV file and build a classifier over them.
pub fn load_zones_csv(path: &Path) -> ZoneResult<ZoneClassifier> {
    let file = std::fs::File::open(path)?;
    load_zones_reader(file)
}

/// Like [`load_zones_csv`] but accepts any `Read` source.
pub fn load_zones_reader<R: Read>(reader: R) -> ZoneResult<ZoneClassifier> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut zones = Vec::new();

    for result in csv_reader.deserialize::<ZoneRecord>() {
        let row = result.map_err(|e| ZoneError::Parse(e.to_string()))?;
        zones.push(parse_zone(row)?);
    }

    ZoneClassifier::new(zones)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_zone(row: ZoneRecord) -> ZoneResult<Zone> {
    let category = match row.category.trim() {
        "exit" => ZoneCategory::Exit,
        "threat" => ZoneCategory::Threat,
        other => {
            return Err(ZoneError::Parse(format!(
                "zone {:?}: invalid category {other:?}: expected \"exit\" or \"threat\"",
                row.name
            )));
        }
    };

    let points = parse_points(&row.name, &row.points)?;
    let shape = match row.shape.trim() {
        "rect" => match points.as_slice() {
            [(x0, y0), (x1, y1)] => Shape::Rect(Rect::from_corners(*x0, *y0, *x1, *y1)),
            _ => {
                return Err(ZoneError::InvalidShape {
                    name:   row.name,
                    reason: format!("rect needs exactly 2 corner points, got {}", points.len()),
                });
            }
        },
        "polygon" => {
            let count = points.len();
            match Polygon::new(points) {
                Some(poly) => Shape::Polygon(poly),
                None => {
                    return Err(ZoneError::InvalidShape {
                        name:   row.name,
                        reason: format!("polygon needs at least 3 points, got {count}"),
                    });
                }
            }
        }
        other => {
            return Err(ZoneError::Parse(format!(
                "zone {:?}: invalid shape {other:?}: expected \"rect\" or \"polygon\"",
                row.name
            )));
        }
    };

    Ok(Zone::new(row.name, shape, row.plane, category))
}

fn parse_points(zone: &str, s: &str) -> ZoneResult<Vec<(i32, i32)>> {
    s.split_whitespace()
        .map(|pair| {
            let parsed = pair
                .split_once(':')
                .and_then(|(x, y)| Some((x.parse::<i32>().ok()?, y.parse::<i32>().ok()?)));
            parsed.ok_or_else(|| {
                ZoneError::Parse(format!("zone {zone:?}: invalid point {pair:?}: expected x:y"))
            })
        })
        .collect()
}
