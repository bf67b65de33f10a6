//! Generation pipeline
//!
//! Validator → Decomposer → Joint Planner → Outline → Layout. Serialization
//! happens on demand from the returned [`Generated`], so a sheet overflow is
//! reported before any document exists.

use crate::error::{GeneratorError, GeneratorResult};
use crate::gcode::{render_gcode, LaserSettings};
use crate::joints::{plan_joints, ButtJoint};
use crate::layout::{check_sheet, pack, Layout, LayoutSettings, PanelOutline};
use crate::outline::trace_outline;
use crate::panels::decompose;
use crate::svg::render_svg;
use crate::validator::{validate, BoxSpec, ValidatedBox};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

/// Namespace for content identifiers of generated boxes.
const ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b7e_4d3a_4e8b_9a51_0c7d_e2f4_a963);

/// Kerf must stay well below the thinnest supported gauge.
const MAX_KERF: f64 = 1.0;

/// Settings that change the generated geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Width of material removed by the cutter, in mm
    pub kerf: f64,
    pub layout: LayoutSettings,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            kerf: 0.0,
            layout: LayoutSettings::default(),
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> GeneratorResult<()> {
        if !self.kerf.is_finite() || self.kerf < 0.0 || self.kerf >= MAX_KERF {
            return Err(GeneratorError::InvalidSettings(format!(
                "kerf must be in 0..{MAX_KERF}mm, got {}",
                self.kerf
            )));
        }
        if !self.layout.spacing.is_finite() || self.layout.spacing < 0.0 {
            return Err(GeneratorError::InvalidSettings(format!(
                "panel spacing must not be negative, got {}",
                self.layout.spacing
            )));
        }
        let sheet_ok = |v: f64| v.is_finite() && v > 0.0;
        if !sheet_ok(self.layout.sheet_width) || !sheet_ok(self.layout.sheet_height) {
            return Err(GeneratorError::InvalidSettings(format!(
                "sheet must have a positive size, got {}x{}",
                self.layout.sheet_width, self.layout.sheet_height
            )));
        }
        Ok(())
    }
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Gcode,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Gcode => "gcode",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The result of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    id: Uuid,
    spec: ValidatedBox,
    kerf: f64,
    layout: Layout,
    butt_joints: Vec<ButtJoint>,
}

impl Generated {
    /// Content identifier: equal inputs always give equal ids.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn spec(&self) -> &ValidatedBox {
        &self.spec
    }

    pub fn kerf(&self) -> f64 {
        self.kerf
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Edges that degraded to butt joints.
    pub fn butt_joints(&self) -> &[ButtJoint] {
        &self.butt_joints
    }

    /// Artifact file name for `format`, e.g. `box_<id>.svg`.
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("box_{}.{}", self.id, format.extension())
    }

    pub fn title(&self) -> String {
        format!(
            "Fingerbox {}x{}x{} mm, {} material",
            self.spec.width(),
            self.spec.height(),
            self.spec.depth(),
            self.spec.gauge()
        )
    }

    pub fn to_svg(&self) -> String {
        render_svg(&self.layout, &self.title())
    }

    pub fn to_gcode(&self, laser: &LaserSettings) -> String {
        render_gcode(self, laser)
    }

    pub fn render(&self, format: OutputFormat, laser: &LaserSettings) -> String {
        match format {
            OutputFormat::Svg => self.to_svg(),
            OutputFormat::Gcode => self.to_gcode(laser),
        }
    }
}

/// Content id for a validated box under `settings`.
pub fn content_id(spec: &ValidatedBox, settings: &GeneratorSettings) -> GeneratorResult<Uuid> {
    let canonical = serde_json::to_vec(&(spec, settings))?;
    Ok(Uuid::new_v5(&ID_NAMESPACE, &canonical))
}

/// Generate the panels of a box and pack them onto a sheet.
///
/// `lid_open` is accepted for callers that track it; the lid is cut flat, so
/// it has no effect on the result.
pub fn generate(
    spec: &BoxSpec,
    lid_open: bool,
    settings: &GeneratorSettings,
) -> GeneratorResult<Generated> {
    settings.validate()?;
    let valid = validate(spec)?;

    let panels = decompose(&valid, lid_open);
    // Slots cut at most one thickness into each side.
    let inset = 2.0 * valid.thickness();
    let extents: Vec<_> = panels
        .iter()
        .map(|p| (p.id, p.width - inset, p.height - inset))
        .collect();
    check_sheet(&extents, &settings.layout)?;
    let planned = plan_joints(&panels, valid.gauge())?;

    let butt_joints: Vec<ButtJoint> = planned.iter().flat_map(|p| p.butt_joints()).collect();
    if !butt_joints.is_empty() {
        warn!(count = butt_joints.len(), "box has butt-jointed edges");
    }

    let outlines = planned
        .iter()
        .map(|panel| PanelOutline {
            id: panel.id,
            width: panel.width,
            height: panel.height,
            outline: trace_outline(panel, settings.kerf),
        })
        .collect();
    let layout = pack(outlines, &settings.layout)?;

    let id = content_id(&valid, settings)?;
    info!(
        %id,
        width = valid.width(),
        height = valid.height(),
        depth = valid.depth(),
        thickness = valid.thickness(),
        sheet_width = layout.used_width,
        sheet_height = layout.used_height,
        "generated box"
    );

    Ok(Generated {
        id,
        spec: valid,
        kerf: settings.kerf,
        layout,
        butt_joints,
    })
}
