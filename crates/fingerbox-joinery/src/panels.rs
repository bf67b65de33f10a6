//! Panel decomposition
//!
//! A box is cut as six rectangular panels. Each panel has four sides, named
//! by compass direction in sheet coordinates (North is the edge at `y = 0`,
//! sides are walked clockwise). [`TOPOLOGY`] fixes which panel every side
//! mates with; both ends of a mating pair always have the same length.

use crate::validator::ValidatedBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// One face of the box.
///
/// Declaration order is the topology order: when two panels mate, the one
/// declared first carries the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
}

impl PanelId {
    pub const ALL: [PanelId; 6] = [
        PanelId::Top,
        PanelId::Bottom,
        PanelId::Front,
        PanelId::Back,
        PanelId::Left,
        PanelId::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Sides of this panel, in [`Side::ALL`] order, mapped to their mates.
    pub fn mates(self) -> [PanelId; 4] {
        TOPOLOGY
            .iter()
            .find(|(id, _)| *id == self)
            .map(|(_, mates)| *mates)
            .unwrap_or([self; 4])
    }

    /// Nominal `(width, height)` of the panel for the given box.
    pub fn size(self, spec: &ValidatedBox) -> (f64, f64) {
        match self {
            Self::Top | Self::Bottom => (spec.width(), spec.depth()),
            Self::Front | Self::Back => (spec.width(), spec.height()),
            Self::Left | Self::Right => (spec.depth(), spec.height()),
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A side of a panel in sheet coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// Clockwise order starting at the North-West corner.
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// Length of this side on a `width` × `height` panel.
    pub fn length(self, width: f64, height: f64) -> f64 {
        match self {
            Self::North | Self::South => width,
            Self::East | Self::West => height,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mating panel for each side (North, East, South, West) of every panel.
pub const TOPOLOGY: [(PanelId, [PanelId; 4]); 6] = [
    (
        PanelId::Top,
        [PanelId::Back, PanelId::Right, PanelId::Front, PanelId::Left],
    ),
    (
        PanelId::Bottom,
        [PanelId::Front, PanelId::Right, PanelId::Back, PanelId::Left],
    ),
    (
        PanelId::Front,
        [PanelId::Top, PanelId::Right, PanelId::Bottom, PanelId::Left],
    ),
    (
        PanelId::Back,
        [PanelId::Top, PanelId::Left, PanelId::Bottom, PanelId::Right],
    ),
    (
        PanelId::Left,
        [PanelId::Top, PanelId::Front, PanelId::Bottom, PanelId::Back],
    ),
    (
        PanelId::Right,
        [PanelId::Top, PanelId::Back, PanelId::Bottom, PanelId::Front],
    ),
];

/// Which half of a finger joint an edge carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Fingers stand proud on the panel boundary.
    Male,
    /// Slots receive the mating panel's fingers.
    Female,
}

impl Polarity {
    /// Polarity of `panel`'s edge against `mate`: the panel earlier in
    /// topology order carries the tabs.
    pub fn between(panel: PanelId, mate: PanelId) -> Self {
        if panel < mate {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// One side of a panel before joint planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelEdge {
    pub side: Side,
    pub length: f64,
    pub mate: PanelId,
    pub polarity: Polarity,
}

/// A rectangular face of the box with its mating topology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: PanelId,
    pub width: f64,
    pub height: f64,
    pub edges: [PanelEdge; 4],
}

impl Panel {
    pub fn edge(&self, side: Side) -> &PanelEdge {
        &self.edges[side.index()]
    }

    /// The side of this panel that mates with `mate`, if any.
    pub fn edge_to(&self, mate: PanelId) -> Option<&PanelEdge> {
        self.edges.iter().find(|e| e.mate == mate)
    }
}

/// Break a validated box into its six panels, in topology order.
///
/// `lid_open` only describes how the box is shown; the lid is cut flat
/// either way, so it never changes the panels.
pub fn decompose(spec: &ValidatedBox, lid_open: bool) -> Vec<Panel> {
    debug!(
        width = spec.width(),
        height = spec.height(),
        depth = spec.depth(),
        lid_open,
        "decomposing box into panels"
    );

    TOPOLOGY
        .iter()
        .map(|&(id, mates)| {
            let (width, height) = id.size(spec);
            let edges = Side::ALL.map(|side| {
                let mate = mates[side.index()];
                PanelEdge {
                    side,
                    length: side.length(width, height),
                    mate,
                    polarity: Polarity::between(id, mate),
                }
            });
            Panel {
                id,
                width,
                height,
                edges,
            }
        })
        .collect()
}
