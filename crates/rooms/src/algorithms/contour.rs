//! Border following over a binary mask, in the manner of Suzuki-Abe:
//! a raster scan discovers outer-border and hole-border starts, each
//! border is followed with clockwise/counter-clockwise neighbour probes
//! while labelling visited pixels, and a parent table records the nesting
//! between borders.

use image::GrayImage;

use crate::{
    error::Result,
    traits::ContourTracer,
    types::{BorderKind, TracedContour},
};

/// 8-neighbourhood in clockwise order (image coordinates, y grows down),
/// starting east.
const NEIGHBOURS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Contour tracer extracting every closed mask boundary together with its
/// outer/hole classification and parent link.
///
/// Borders are emitted in the order the raster scan discovers them, which
/// follows the nesting structure rather than any spatial ordering.
#[derive(Debug, Clone, Default)]
pub struct BorderFollowingTracer;

impl ContourTracer for BorderFollowingTracer {
    fn trace(&self, mask: &GrayImage) -> Result<Vec<TracedContour>> {
        Ok(trace_borders(mask))
    }
}

#[derive(Debug, Clone, Copy)]
struct BorderInfo {
    kind: BorderKind,
    /// Border id of the parent (1 is the implicit frame).
    parent: i32,
}

struct Raster {
    labels: Vec<i32>,
    width: i64,
    height: i64,
}

impl Raster {
    fn from_mask(mask: &GrayImage) -> Self {
        let (width, height) = mask.dimensions();
        let labels = mask
            .as_raw()
            .iter()
            .map(|&px| i32::from(px != 0))
            .collect();
        Self {
            labels,
            width: i64::from(width),
            height: i64::from(height),
        }
    }

    fn get(&self, x: i64, y: i64) -> i32 {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            0
        } else {
            self.labels[(y * self.width + x) as usize]
        }
    }

    fn set(&mut self, x: i64, y: i64, value: i32) {
        self.labels[(y * self.width + x) as usize] = value;
    }
}

fn trace_borders(mask: &GrayImage) -> Vec<TracedContour> {
    let mut raster = Raster::from_mask(mask);

    // Border id 1 is the frame surrounding the image; real borders get
    // ids from 2 upwards, in discovery order.
    let mut borders: Vec<BorderInfo> = vec![BorderInfo {
        kind: BorderKind::Hole,
        parent: 0,
    }];
    let mut contours: Vec<TracedContour> = Vec::new();

    for y in 0..raster.height {
        let mut last_border = 1i32;
        for x in 0..raster.width {
            let label = raster.get(x, y);
            if label == 0 {
                continue;
            }

            let start = if label == 1 && raster.get(x - 1, y) == 0 {
                Some(((x - 1, y), BorderKind::Outer))
            } else if label >= 1 && raster.get(x + 1, y) == 0 {
                if label > 1 {
                    last_border = label;
                }
                Some(((x + 1, y), BorderKind::Hole))
            } else {
                None
            };

            if let Some((entry, kind)) = start {
                let nbd = borders.len() as i32 + 1;
                let reference = borders[(last_border - 1) as usize];
                let parent = match (kind, reference.kind) {
                    (BorderKind::Outer, BorderKind::Outer) => reference.parent,
                    (BorderKind::Outer, BorderKind::Hole) => last_border,
                    (BorderKind::Hole, BorderKind::Outer) => last_border,
                    (BorderKind::Hole, BorderKind::Hole) => reference.parent,
                };
                borders.push(BorderInfo { kind, parent });

                let points = follow_border(&mut raster, (x, y), entry, nbd);
                contours.push(TracedContour {
                    points: compress_collinear(&points),
                    kind,
                    // Parent 0 (none) and 1 (frame) both mean top level.
                    parent: if parent >= 2 {
                        Some((parent - 2) as usize)
                    } else {
                        None
                    },
                });
            }

            let label = raster.get(x, y);
            if label != 1 {
                last_border = label.abs();
            }
        }
    }

    contours
}

/// Follow one border starting at `start`, entered from the background
/// pixel `entry`, labelling pixels with `nbd`. Returns the ordered border
/// pixels.
fn follow_border(
    raster: &mut Raster,
    start: (i64, i64),
    entry: (i64, i64),
    nbd: i32,
) -> Vec<[i32; 2]> {
    let entry_dir = direction_of(start, entry);

    // Probe clockwise from the entry neighbour for a foreground pixel.
    let mut first = None;
    for step in 0..8 {
        let dir = (entry_dir + step) % 8;
        let (dx, dy) = NEIGHBOURS[dir];
        if raster.get(start.0 + dx, start.1 + dy) != 0 {
            first = Some((start.0 + dx, start.1 + dy));
            break;
        }
    }
    let Some(first) = first else {
        // Isolated pixel.
        raster.set(start.0, start.1, -nbd);
        return vec![[start.0 as i32, start.1 as i32]];
    };

    let mut points = Vec::new();
    let mut previous = first;
    let mut current = start;

    loop {
        // Probe counter-clockwise around `current`, starting just after
        // the neighbour we came from, for the next border pixel. Track
        // whether the east neighbour was examined while background.
        let from_dir = direction_of(current, previous);
        let mut east_seen_background = false;
        let mut next = None;
        for step in 1..=8 {
            let dir = ((from_dir as i64 - step).rem_euclid(8)) as usize;
            let (dx, dy) = NEIGHBOURS[dir];
            let candidate = (current.0 + dx, current.1 + dy);
            if raster.get(candidate.0, candidate.1) != 0 {
                next = Some(candidate);
                break;
            }
            if dir == 0 {
                east_seen_background = true;
            }
        }
        // The probe always terminates: at worst it walks the full circle
        // back to `previous`, which is foreground.
        let next = next.expect("closed border has a foreground neighbour");

        if east_seen_background {
            raster.set(current.0, current.1, -nbd);
        } else if raster.get(current.0, current.1) == 1 {
            raster.set(current.0, current.1, nbd);
        }
        points.push([current.0 as i32, current.1 as i32]);

        if next == start && current == first {
            break;
        }
        previous = current;
        current = next;
    }

    points
}

fn direction_of(from: (i64, i64), to: (i64, i64)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    NEIGHBOURS
        .iter()
        .position(|&d| d == delta)
        .expect("points are 8-adjacent")
}

/// Drop collinear run points, keeping only the vertices where the step
/// direction changes. The ring is treated cyclically.
fn compress_collinear(points: &[[i32; 2]]) -> Vec<[i32; 2]> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut compressed = Vec::new();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let current = points[i];
        let next = points[(i + 1) % n];
        let step_in = (current[0] - prev[0], current[1] - prev[1]);
        let step_out = (next[0] - current[0], next[1] - current[1]);
        if step_in != step_out {
            compressed.push(current);
        }
    }
    if compressed.is_empty() {
        // Fully collinear ring; keep the endpoints.
        return vec![points[0], points[n - 1]];
    }
    compressed
}
