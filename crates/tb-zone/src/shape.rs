//! Containment shapes over the tile grid.

/// Axis-aligned rectangle, inclusive on both corners.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Rectangle spanning two corners in any order.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Rectangle anchored at `(x, y)` extending `width`/`height` tiles past
    /// the anchor, so `sized(x, y, 0, 0)` is the single tile `(x, y)`.
    pub fn sized(x: i32, y: i32, width: u32, height: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self::from_corners(x, y, x.saturating_add(w), y.saturating_add(h))
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Simple polygon given by its vertices in order (closing edge implied).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<(i32, i32)>,
}

impl Polygon {
    /// `None` if fewer than three vertices are supplied.
    pub fn new(vertices: Vec<(i32, i32)>) -> Option<Self> {
        (vertices.len() >= 3).then_some(Self { vertices })
    }

    pub fn vertices(&self) -> &[(i32, i32)] {
        &self.vertices
    }

    /// Even-odd ray cast; points on an edge or vertex count as inside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let (px, py) = (f64::from(x), f64::from(y));

        for i in 0..n {
            let (ax, ay) = self.vertices[i];
            let (bx, by) = self.vertices[(i + 1) % n];
            if on_segment((ax, ay), (bx, by), (x, y)) {
                return true;
            }
            let (ax, ay, bx, by) = (f64::from(ax), f64::from(ay), f64::from(bx), f64::from(by));
            if (ay > py) != (by > py) {
                let cross_x = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < cross_x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    fn bounds(&self) -> ([i32; 2], [i32; 2]) {
        let mut min = [i32::MAX, i32::MAX];
        let mut max = [i32::MIN, i32::MIN];
        for &(x, y) in &self.vertices {
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
        }
        (min, max)
    }
}

/// Integer collinearity + bounding check.  Widened to `i128` so any pair of
/// `i32` coordinates is exact.
fn on_segment(a: (i32, i32), b: (i32, i32), p: (i32, i32)) -> bool {
    let w = |v: i32| i128::from(v);
    let cross = (w(b.0) - w(a.0)) * (w(p.1) - w(a.1)) - (w(b.1) - w(a.1)) * (w(p.0) - w(a.0));
    cross == 0
        && p.0 >= a.0.min(b.0)
        && p.0 <= a.0.max(b.0)
        && p.1 >= a.1.min(b.1)
        && p.1 <= a.1.max(b.1)
}

/// The region a zone covers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
    /// Contains nothing.  Used for the OUTSIDE sentinel.
    Empty,
}

impl Shape {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match self {
            Shape::Rect(r) => r.contains(x, y),
            Shape::Polygon(p) => p.contains(x, y),
            Shape::Empty => false,
        }
    }

    /// Inclusive bounding box as `(min, max)` corners; `None` for `Empty`.
    pub fn bounds(&self) -> Option<([i32; 2], [i32; 2])> {
        match self {
            Shape::Rect(r) => Some(([r.min_x, r.min_y], [r.max_x, r.max_y])),
            Shape::Polygon(p) => Some(p.bounds()),
            Shape::Empty => None,
        }
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Shape::Rect(r)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}
