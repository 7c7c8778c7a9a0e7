//! Planar geometry primitives.
//!
//! Coordinates are in the render surface's projection (map units). The
//! engine only needs lengths, areas and positions along a line, so the math
//! here is deliberately planar; full projection support lives outside the
//! core.

use serde::{Deserialize, Serialize};

/// A 2D coordinate in map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Feature geometry.
///
/// A polygon carries its ring as an ordered coordinate list; during
/// sketching the ring may not be closed yet (first != last), which several
/// overlay rules care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    LineString(Vec<Coordinate>),
    Polygon(Vec<Coordinate>),
}

impl Geometry {
    /// The ordered coordinates of the line or ring.
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Geometry::LineString(coords) | Geometry::Polygon(coords) => coords,
        }
    }

    /// Whether this geometry is a polygon (closed or still being sketched).
    pub fn is_polygon(&self) -> bool {
        matches!(self, Geometry::Polygon(_))
    }

    /// Whether this is a closed polygon ring (first and last coordinate
    /// coincide and the ring has at least three distinct vertices).
    pub fn is_closed(&self) -> bool {
        match self {
            Geometry::Polygon(ring) => ring.len() >= 4 && ring.first() == ring.last(),
            Geometry::LineString(_) => false,
        }
    }

    /// Total segment-sum length in map units.
    ///
    /// For a polygon the ring is measured as a linear path over its
    /// coordinates; a closed ring therefore includes the closing segment.
    pub fn length(&self) -> f64 {
        self.coordinates()
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Enclosed area (shoelace formula). Zero for anything that is not a
    /// closed polygon ring.
    pub fn area(&self) -> f64 {
        if !self.is_closed() {
            return 0.0;
        }
        let ring = self.coordinates();
        let twice_area: f64 = ring
            .windows(2)
            .map(|pair| pair[0].x * pair[1].y - pair[1].x * pair[0].y)
            .sum();
        (twice_area / 2.0).abs()
    }

    /// The last vertex, if any.
    pub fn last_vertex(&self) -> Option<Coordinate> {
        self.coordinates().last().copied()
    }

    /// Centroid of a closed ring (area-weighted); for open geometry the
    /// plain vertex average.
    pub fn centroid(&self) -> Option<Coordinate> {
        let coords = self.coordinates();
        if coords.is_empty() {
            return None;
        }
        if self.is_closed() {
            let twice_area: f64 = coords
                .windows(2)
                .map(|pair| pair[0].x * pair[1].y - pair[1].x * pair[0].y)
                .sum();
            if twice_area.abs() > f64::EPSILON {
                let (mut cx, mut cy) = (0.0, 0.0);
                for pair in coords.windows(2) {
                    let cross = pair[0].x * pair[1].y - pair[1].x * pair[0].y;
                    cx += (pair[0].x + pair[1].x) * cross;
                    cy += (pair[0].y + pair[1].y) * cross;
                }
                let factor = 3.0 * twice_area;
                return Some(Coordinate::new(cx / factor, cy / factor));
            }
        }
        let n = coords.len() as f64;
        let sum_x: f64 = coords.iter().map(|c| c.x).sum();
        let sum_y: f64 = coords.iter().map(|c| c.y).sum();
        Some(Coordinate::new(sum_x / n, sum_y / n))
    }

    /// The coordinate at `distance` map units along the geometry, clamped
    /// to the endpoints. `None` for empty geometry.
    pub fn point_along(&self, distance: f64) -> Option<Coordinate> {
        let coords = self.coordinates();
        let first = coords.first()?;
        if coords.len() == 1 || distance <= 0.0 {
            return Some(*first);
        }
        let mut remaining = distance;
        for pair in coords.windows(2) {
            let segment = pair[0].distance_to(&pair[1]);
            if remaining <= segment && segment > 0.0 {
                let t = remaining / segment;
                return Some(Coordinate::new(
                    pair[0].x + (pair[1].x - pair[0].x) * t,
                    pair[0].y + (pair[1].y - pair[0].y) * t,
                ));
            }
            remaining -= segment;
        }
        self.last_vertex()
    }
}
