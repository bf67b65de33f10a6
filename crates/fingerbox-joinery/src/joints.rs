//! Finger joint planning
//!
//! Every jointed edge is divided into an odd number of equal segments that
//! alternate tab, slot, tab, ... so both ends carry the same feature. The
//! segment width equals the material thickness; whatever length is left over
//! is split evenly between the two ends and absorbed by the outer segments.
//!
//! On a male edge the tabs sit on the panel boundary and the slots are cut
//! one thickness deep; a female edge is the exact complement. Because the
//! pattern only depends on the edge length and both sides of a mating pair
//! share that length, the two edges always interlock.

use crate::error::{GeneratorError, GeneratorResult};
use crate::panels::{Panel, PanelId, Polarity, Side};
use crate::validator::MIN_TAB_COUNT;
use fingerbox_core::Gauge;
use serde::Serialize;
use tracing::{debug, warn};

/// Slack allowed when fitting segments into an edge.
const FIT_EPSILON: f64 = 1e-9;

/// Most segments a single edge may be divided into.
pub const MAX_TAB_COUNT: u32 = 1 << 20;

/// How an edge is joined to its mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JointKind {
    /// Interlocking fingers.
    Finger,
    /// Edge too short for fingers: one full-length segment, the panels
    /// simply butt against each other.
    Butt,
}

/// Segment layout for an edge of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgePlan {
    pub length: f64,
    /// Width of each interior segment.
    pub tab_width: f64,
    /// Number of alternating tab/slot segments (always odd).
    pub tab_count: u32,
    /// Leftover length at each end, absorbed by the first and last segment.
    pub margin: f64,
    pub kind: JointKind,
}

/// Plan the segments of an edge of `length` for material `thickness`.
///
/// Fails with [`GeneratorError::EdgeTooLong`] when the edge would need more
/// than [`MAX_TAB_COUNT`] segments.
pub fn plan_edge(length: f64, thickness: f64) -> GeneratorResult<EdgePlan> {
    let min_count = f64::from(MIN_TAB_COUNT);
    if length + FIT_EPSILON < min_count * thickness {
        return Ok(EdgePlan {
            length,
            tab_width: length,
            tab_count: 1,
            margin: 0.0,
            kind: JointKind::Butt,
        });
    }

    let fits = ((length / thickness) + FIT_EPSILON).floor();
    let max_count = f64::from(MAX_TAB_COUNT);
    if fits.is_nan() || fits > max_count {
        return Err(GeneratorError::EdgeTooLong {
            length,
            max: max_count * thickness,
        });
    }
    // In 3..=MAX_TAB_COUNT, so the conversion is exact.
    let fits = fits as u32;
    let tab_count = if fits % 2 == 0 { fits - 1 } else { fits };
    let margin = ((length - f64::from(tab_count) * thickness) / 2.0).max(0.0);

    Ok(EdgePlan {
        length,
        tab_width: thickness,
        tab_count,
        margin,
        kind: JointKind::Finger,
    })
}

/// A run along an edge at constant depth.
///
/// `inset` is how far the outline sits inside the nominal panel boundary:
/// `0` on the boundary, one thickness at the bottom of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileSegment {
    pub start: f64,
    pub end: f64,
    pub inset: f64,
}

/// A panel side with concrete joint geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointEdge {
    pub panel: PanelId,
    pub side: Side,
    pub mate: PanelId,
    pub polarity: Polarity,
    pub thickness: f64,
    pub plan: EdgePlan,
}

impl JointEdge {
    pub fn length(&self) -> f64 {
        self.plan.length
    }

    pub fn tab_width(&self) -> f64 {
        self.plan.tab_width
    }

    pub fn tab_count(&self) -> u32 {
        self.plan.tab_count
    }

    pub fn kind(&self) -> JointKind {
        self.plan.kind
    }

    /// True when segment `index` lies on the panel boundary.
    fn is_raised(&self, index: u32) -> bool {
        let is_tab = index % 2 == 0;
        match self.polarity {
            Polarity::Male => is_tab,
            Polarity::Female => !is_tab,
        }
    }

    /// Depth profile along the edge, in walking order, covering `0..length`.
    pub fn profile(&self) -> Vec<ProfileSegment> {
        let plan = &self.plan;
        let last = plan.tab_count.saturating_sub(1);
        (0..plan.tab_count)
            .map(|i| {
                let start = if i == 0 {
                    0.0
                } else {
                    plan.margin + f64::from(i) * plan.tab_width
                };
                let end = if i == last {
                    plan.length
                } else {
                    plan.margin + f64::from(i + 1) * plan.tab_width
                };
                let inset = if self.is_raised(i) {
                    0.0
                } else {
                    self.thickness
                };
                ProfileSegment { start, end, inset }
            })
            .collect()
    }

    /// Inset at the start of the edge.
    pub fn start_inset(&self) -> f64 {
        if self.is_raised(0) {
            0.0
        } else {
            self.thickness
        }
    }

    /// Inset at the end of the edge; equal to the start for odd counts.
    pub fn end_inset(&self) -> f64 {
        if self.is_raised(self.plan.tab_count.saturating_sub(1)) {
            0.0
        } else {
            self.thickness
        }
    }
}

/// Non-fatal flag: an edge was too short for fingers and became a butt joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButtJoint {
    pub panel: PanelId,
    pub side: Side,
    pub mate: PanelId,
    pub length: f64,
}

/// A panel whose four edges carry concrete joint geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPanel {
    pub id: PanelId,
    pub width: f64,
    pub height: f64,
    pub edges: [JointEdge; 4],
}

impl PlannedPanel {
    pub fn edge(&self, side: Side) -> &JointEdge {
        &self.edges[side.index()]
    }

    pub fn butt_joints(&self) -> Vec<ButtJoint> {
        self.edges
            .iter()
            .filter(|e| e.kind() == JointKind::Butt)
            .map(|e| ButtJoint {
                panel: e.panel,
                side: e.side,
                mate: e.mate,
                length: e.length(),
            })
            .collect()
    }
}

/// Populate every edge of `panels` with joint geometry for `gauge`.
pub fn plan_joints(panels: &[Panel], gauge: Gauge) -> GeneratorResult<Vec<PlannedPanel>> {
    let thickness = gauge.millimeters();

    panels
        .iter()
        .map(|panel| -> GeneratorResult<PlannedPanel> {
            let [north, east, south, west] =
                panel.edges.map(|edge| plan_edge(edge.length, thickness));
            let plans = [north?, east?, south?, west?];

            let edges = std::array::from_fn(|i| {
                let edge = panel.edges[i];
                let plan = plans[i];
                if plan.kind == JointKind::Butt {
                    warn!(
                        panel = %panel.id,
                        side = %edge.side,
                        length = edge.length,
                        "edge too short for fingers, using butt joint"
                    );
                }
                JointEdge {
                    panel: panel.id,
                    side: edge.side,
                    mate: edge.mate,
                    polarity: edge.polarity,
                    thickness,
                    plan,
                }
            });
            debug!(
                panel = %panel.id,
                tab_counts = ?plans.map(|p| p.tab_count),
                "planned joints"
            );
            Ok(PlannedPanel {
                id: panel.id,
                width: panel.width,
                height: panel.height,
                edges,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::decompose;
    use crate::validator::{validate, BoxSpec};

    #[test]
    fn test_plan_edge_counts() {
        let plan = plan_edge(150.0, 3.0).unwrap();
        assert_eq!(plan.kind, JointKind::Finger);
        assert_eq!(plan.tab_width, 3.0);
        assert_eq!(plan.tab_count, 49);
        assert!((plan.margin - 1.5).abs() < 1e-9);

        let plan = plan_edge(80.0, 3.0).unwrap();
        assert_eq!(plan.tab_count, 25);
        assert!((plan.margin - 2.5).abs() < 1e-9);

        let plan = plan_edge(9.0, 3.0).unwrap();
        assert_eq!(plan.tab_count, 3);
        assert_eq!(plan.margin, 0.0);
    }

    #[test]
    fn test_plan_edge_count_is_odd_and_fits() {
        for tenths in 90..2000 {
            let length = f64::from(tenths) / 10.0;
            let plan = plan_edge(length, 3.0).unwrap();
            assert_eq!(plan.tab_count % 2, 1, "length {length}");
            assert!(plan.tab_count >= 3);
            assert!(f64::from(plan.tab_count) * plan.tab_width <= length + 1e-6);
            assert!(f64::from(plan.tab_count + 2) * plan.tab_width > length);
        }
    }

    #[test]
    fn test_short_edge_becomes_butt_joint() {
        let plan = plan_edge(3.0 * 4.0 - 1e-6, 4.0).unwrap();
        assert_eq!(plan.kind, JointKind::Butt);
        assert_eq!(plan.tab_count, 1);
        assert_eq!(plan.margin, 0.0);

        let plan = plan_edge(12.0, 4.0).unwrap();
        assert_eq!(plan.kind, JointKind::Finger);
        assert_eq!(plan.tab_count, 3);
    }

    #[test]
    fn test_huge_edge_is_rejected() {
        let err = plan_edge(1.0e12, 3.0).unwrap_err();
        match err {
            GeneratorError::EdgeTooLong { length, max } => {
                assert_eq!(length, 1.0e12);
                assert_eq!(max, f64::from(MAX_TAB_COUNT) * 3.0);
            }
            other => panic!("unexpected error: {other}"),
        }

        let longest = f64::from(MAX_TAB_COUNT) * 3.0;
        assert_eq!(plan_edge(longest, 3.0).unwrap().tab_count, MAX_TAB_COUNT - 1);
    }

    #[test]
    fn test_profile_covers_edge() {
        let edge = JointEdge {
            panel: PanelId::Top,
            side: Side::North,
            mate: PanelId::Back,
            polarity: Polarity::Male,
            thickness: 3.0,
            plan: plan_edge(20.0, 3.0).unwrap(),
        };
        let profile = edge.profile();
        assert_eq!(profile.len(), 5);
        assert_eq!(profile[0].start, 0.0);
        assert_eq!(profile[4].end, 20.0);
        for pair in profile.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < 1e-12);
            assert_ne!(pair[0].inset, pair[1].inset);
        }
        assert_eq!(profile[0].inset, 0.0);
        assert_eq!(edge.start_inset(), 0.0);
        assert_eq!(edge.end_inset(), 0.0);

        let female = JointEdge {
            polarity: Polarity::Female,
            ..edge
        };
        let female_profile = female.profile();
        for (m, f) in profile.iter().zip(&female_profile) {
            assert_eq!(m.start, f.start);
            assert_eq!(m.end, f.end);
            assert_eq!(m.inset + f.inset, 3.0);
        }
        assert_eq!(female.start_inset(), 3.0);
    }

    #[test]
    fn test_plan_joints_for_sample_box() {
        let spec = validate(&BoxSpec::new(150.0, 100.0, 80.0, 3.0)).unwrap();
        let planned = plan_joints(&decompose(&spec, false), spec.gauge()).unwrap();
        assert_eq!(planned.len(), 6);
        for panel in &planned {
            assert!(panel.butt_joints().is_empty());
            for edge in &panel.edges {
                assert_eq!(edge.tab_width(), 3.0);
                assert_eq!(edge.tab_count() % 2, 1);
            }
        }

        let front = planned.iter().find(|p| p.id == PanelId::Front).unwrap();
        assert_eq!(front.edge(Side::North).tab_count(), 49);
        assert_eq!(front.edge(Side::East).tab_count(), 33);
    }

    #[test]
    fn test_butt_joint_is_flagged() {
        let panel = Panel {
            id: PanelId::Front,
            width: 8.0,
            height: 40.0,
            edges: Side::ALL.map(|side| crate::panels::PanelEdge {
                side,
                length: side.length(8.0, 40.0),
                mate: PanelId::Top,
                polarity: Polarity::Female,
            }),
        };
        let planned = plan_joints(&[panel], Gauge::Mm3).unwrap();
        let flags = planned[0].butt_joints();
        assert_eq!(flags.len(), 2);
        assert!(flags.iter().all(|f| f.length == 8.0));
        assert_eq!(flags[0].side, Side::North);
        assert_eq!(flags[1].side, Side::South);
    }
}
