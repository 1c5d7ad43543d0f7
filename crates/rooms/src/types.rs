use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::RoomError;

/// Which side of a foreground region a traced boundary runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    /// Outer boundary of a connected foreground region.
    Outer,
    /// Boundary of a hole enclosed by a foreground region.
    Hole,
}

/// One closed boundary extracted from the binary mask.
///
/// `points` is the ordered sequence of boundary pixels with collinear run
/// points removed; only direction-changing vertices are retained. The
/// closing edge back to the first point is implied. `parent` indexes the
/// enclosing contour within the same traced set, if any. The nesting
/// information is recorded but never used to filter results.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedContour {
    pub points: Vec<[i32; 2]>,
    pub kind: BorderKind,
    pub parent: Option<usize>,
}

impl TracedContour {
    /// Enclosed area in px², via the shoelace formula on the boundary
    /// coordinates.
    pub fn area_px(&self) -> f64 {
        ring_area(&self.points)
    }

    /// Closed boundary length in pixels.
    pub fn perimeter_px(&self) -> f64 {
        ring_perimeter(&self.points)
    }
}

/// Shoelace area of a closed ring of pixel coordinates.
pub fn ring_area(points: &[[i32; 2]]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|&[x, y]| Coord {
            x: f64::from(x),
            y: f64::from(y),
        })
        .collect();
    let polygon = Polygon::new(LineString::new(coords), vec![]);

    use geo::Area;
    polygon.unsigned_area()
}

/// Length of a closed ring of pixel coordinates, including the implied
/// closing edge.
pub fn ring_perimeter(points: &[[i32; 2]]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for window in points.windows(2) {
        let dx = f64::from(window[1][0] - window[0][0]);
        let dy = f64::from(window[1][1] - window[0][1]);
        total += (dx * dx + dy * dy).sqrt();
    }
    let first = points[0];
    let last = points[points.len() - 1];
    let dx = f64::from(first[0] - last[0]);
    let dy = f64::from(first[1] - last[1]);
    total + (dx * dx + dy * dy).sqrt()
}

/// One detected room candidate.
///
/// `points` is the simplified polygon (not explicitly closed — the last
/// vertex joins back to the first). Area and perimeter are measured on the
/// original traced contour, not the simplified polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCandidate {
    pub points: Vec<[i32; 2]>,
    pub area_px: f64,
    pub perimeter_px: f64,
}

/// Result of analysing one floor-plan image.
///
/// `rooms` is ordered as the contour tracer discovered the boundaries.
/// That order is an artifact of the hierarchy traversal, not a spatial
/// ordering — callers must not assume left-to-right or top-to-bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub rooms: Vec<RoomCandidate>,
    pub image_width: u32,
    pub image_height: u32,
}

/// Transport envelope returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisResponse {
    Success { rooms: Vec<RoomCandidate> },
    Error { message: String },
}

impl AnalysisResponse {
    pub fn from_result(result: Result<AnalysisResult, RoomError>) -> Self {
        match result {
            Ok(analysis) => Self::Success {
                rooms: analysis.rooms,
            },
            Err(err) => Self::Error {
                message: err.to_string(),
            },
        }
    }
}
