//! Panel outline tracing
//!
//! Walks the four sides of a planned panel clockwise from the North-West
//! corner and emits the closed cut outline. Each side is described by its
//! depth profile; a notch on either side of a corner removes the corner
//! square, which is what lets the three panels meeting at a box corner share
//! it without overlap.

use crate::joints::{PlannedPanel, ProfileSegment};
use crate::panels::Side;
use fingerbox_core::{push_unique_point, Point};

/// Walking frame of a side: start corner, direction along the side and the
/// inward normal, in panel-local coordinates.
struct SideFrame {
    origin: Point,
    dir: (f64, f64),
    inward: (f64, f64),
}

impl SideFrame {
    fn for_side(side: Side, width: f64, height: f64) -> Self {
        match side {
            Side::North => Self {
                origin: Point::new(0.0, 0.0),
                dir: (1.0, 0.0),
                inward: (0.0, 1.0),
            },
            Side::East => Self {
                origin: Point::new(width, 0.0),
                dir: (0.0, 1.0),
                inward: (-1.0, 0.0),
            },
            Side::South => Self {
                origin: Point::new(width, height),
                dir: (-1.0, 0.0),
                inward: (0.0, -1.0),
            },
            Side::West => Self {
                origin: Point::new(0.0, height),
                dir: (0.0, -1.0),
                inward: (1.0, 0.0),
            },
        }
    }

    fn at(&self, along: f64, inset: f64) -> Point {
        Point::new(
            self.origin.x + self.dir.0 * along + self.inward.0 * inset,
            self.origin.y + self.dir.1 * along + self.inward.1 * inset,
        )
    }
}

/// Shift segment boundaries so raised runs grow by `kerf` and every inset
/// moves outward by half of it.
fn compensate(profile: &[ProfileSegment], kerf: f64) -> Vec<ProfileSegment> {
    let half = kerf / 2.0;
    let mut out: Vec<ProfileSegment> = profile
        .iter()
        .map(|s| ProfileSegment {
            start: s.start,
            end: s.end,
            inset: s.inset - half,
        })
        .collect();

    for i in 0..out.len().saturating_sub(1) {
        // Raised run followed by a notch moves the step forward, and back
        // for the reverse.
        let shift = if out[i].inset < out[i + 1].inset {
            half
        } else {
            -half
        };
        out[i].end += shift;
        out[i + 1].start += shift;
    }
    out
}

/// Closed outline of `panel` in panel-local coordinates, clockwise, without
/// a repeated closing vertex.
///
/// With `kerf == 0` the outline's bounding box is exactly the nominal
/// `width × height` of the panel.
pub fn trace_outline(panel: &PlannedPanel, kerf: f64) -> Vec<Point> {
    let profiles: Vec<Vec<ProfileSegment>> = panel
        .edges
        .iter()
        .map(|e| compensate(&e.profile(), kerf))
        .collect();

    let mut path: Vec<Point> = Vec::new();

    for side in Side::ALL {
        let i = side.index();
        let prev = &profiles[(i + 3) % 4];
        let next = &profiles[(i + 1) % 4];
        let profile = &profiles[i];
        let frame = SideFrame::for_side(side, panel.width, panel.height);
        let length = panel.edge(side).length();

        // The previous side's inward normal points along this side, so its
        // closing inset is where this side starts; likewise at the far end.
        let start_clamp = prev.last().map_or(0.0, |s| s.inset);
        let end_clamp = length - next.first().map_or(0.0, |s| s.inset);

        let last = profile.len().saturating_sub(1);
        for (j, seg) in profile.iter().enumerate() {
            let start = if j == 0 { start_clamp } else { seg.start };
            let end = if j == last { end_clamp } else { seg.end };
            push_unique_point(&mut path, frame.at(start, seg.inset));
            push_unique_point(&mut path, frame.at(end, seg.inset));
        }
    }

    if path.len() > 1 {
        if let (Some(first), Some(last)) = (path.first(), path.last()) {
            if first.approx_eq(last) {
                path.pop();
            }
        }
    }

    path
}

/// Signed area of a closed outline (positive when clockwise in y-down
/// sheet coordinates).
pub fn signed_area(outline: &[Point]) -> f64 {
    if outline.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in outline.iter().enumerate() {
        let b = &outline[(i + 1) % outline.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}
