use crate::{traits::PolygonSimplifier, types::ring_perimeter};

/// Douglas-Peucker simplification with a perimeter-relative tolerance.
///
/// Each contour gets its own epsilon: `ratio` times the contour's closed
/// perimeter. Wall jitter at pixel scale disappears while straight wall
/// segments collapse to their endpoints, independent of the contour's
/// absolute size.
#[derive(Debug, Clone)]
pub struct PerimeterRelativeSimplifier {
    pub ratio: f64,
}

impl Default for PerimeterRelativeSimplifier {
    fn default() -> Self {
        Self { ratio: 0.005 }
    }
}

impl PolygonSimplifier for PerimeterRelativeSimplifier {
    fn simplify(&self, points: &[[i32; 2]]) -> Vec<[i32; 2]> {
        if points.len() < 3 {
            return points.to_vec();
        }
        let epsilon = self.ratio * ring_perimeter(points);
        simplify_ring(points, epsilon)
    }
}

/// Simplify a closed ring: split it at the vertex farthest from the first
/// point, simplify both halves as open chains, and rejoin them.
fn simplify_ring(points: &[[i32; 2]], epsilon: f64) -> Vec<[i32; 2]> {
    let far = farthest_from(points, points[0]);
    if far == 0 {
        // All vertices coincide with the anchor.
        return vec![points[0]];
    }

    let first_half = simplify_chain(&points[..=far], epsilon);

    let mut back: Vec<[i32; 2]> = points[far..].to_vec();
    back.push(points[0]);
    let second_half = simplify_chain(&back, epsilon);

    // Both halves keep their endpoints, so drop each half's final vertex
    // to avoid repeating the split vertex and the ring start.
    let mut ring = Vec::with_capacity(first_half.len() + second_half.len() - 2);
    ring.extend_from_slice(&first_half[..first_half.len() - 1]);
    ring.extend_from_slice(&second_half[..second_half.len() - 1]);
    ring
}

fn farthest_from(points: &[[i32; 2]], anchor: [i32; 2]) -> usize {
    let mut best = 0;
    let mut best_dist = 0.0;
    for (i, &p) in points.iter().enumerate() {
        let dx = f64::from(p[0] - anchor[0]);
        let dy = f64::from(p[1] - anchor[1]);
        let dist = dx * dx + dy * dy;
        if dist > best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Recursive Douglas-Peucker over an open chain; endpoints are always
/// kept.
fn simplify_chain(points: &[[i32; 2]], epsilon: f64) -> Vec<[i32; 2]> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let dist = perpendicular_distance(p, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist <= epsilon {
        return vec![first, last];
    }

    let mut left = simplify_chain(&points[..=max_index], epsilon);
    let right = simplify_chain(&points[max_index..], epsilon);
    left.pop();
    left.extend_from_slice(&right);
    left
}

fn perpendicular_distance(point: [i32; 2], a: [i32; 2], b: [i32; 2]) -> f64 {
    let px = f64::from(point[0]);
    let py = f64::from(point[1]);
    let ax = f64::from(a[0]);
    let ay = f64::from(a[1]);
    let bx = f64::from(b[0]);
    let by = f64::from(b[1]);

    let dx = bx - ax;
    let dy = by - ay;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    ((px - ax) * dy - (py - ay) * dx).abs() / length
}
