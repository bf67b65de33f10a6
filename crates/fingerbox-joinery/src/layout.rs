//! Sheet layout
//!
//! Simple row packing by bounding box: panels are placed left to right with
//! a fixed gap and wrap to a new row when the next one would cross the sheet
//! width. No attempt is made at optimal nesting.

use crate::error::{GeneratorError, GeneratorResult};
use crate::panels::PanelId;
use fingerbox_core::{BoundingBox, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sheet and spacing parameters for packing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Gap between neighbouring panels
    pub spacing: f64,
    /// Usable sheet width
    pub sheet_width: f64,
    /// Usable sheet height
    pub sheet_height: f64,
    /// Place taller panels first
    pub sort_by_height: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spacing: 5.0,
            sheet_width: 1000.0,
            sheet_height: 600.0,
            sort_by_height: true,
        }
    }
}

/// A panel outline at its final position on the sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedPanel {
    pub id: PanelId,
    /// Nominal panel size before kerf compensation
    pub width: f64,
    pub height: f64,
    pub outline: Vec<Point>,
    pub bounds: BoundingBox,
}

/// Packed panels and the extent of sheet they use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub panels: Vec<PlacedPanel>,
    pub used_width: f64,
    pub used_height: f64,
}

impl Layout {
    pub fn panel(&self, id: PanelId) -> Option<&PlacedPanel> {
        self.panels.iter().find(|p| p.id == id)
    }
}

/// An outline waiting to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOutline {
    pub id: PanelId,
    pub width: f64,
    pub height: f64,
    pub outline: Vec<Point>,
}

/// Reject panels that cannot fit on the sheet however they are packed.
///
/// `extents` are lower bounds on each panel's cut size. Every packed panel
/// sits fully on the sheet, so one that is wider or taller than the sheet
/// always overflows it. Cheap enough to run before any outline exists.
pub fn check_sheet(
    extents: &[(PanelId, f64, f64)],
    settings: &LayoutSettings,
) -> GeneratorResult<()> {
    for &(id, width, height) in extents {
        if width > settings.sheet_width || height > settings.sheet_height {
            debug!(panel = %id, width, height, "panel larger than sheet");
            return Err(sheet_too_large(width, height, settings));
        }
    }
    Ok(())
}

fn sheet_too_large(width: f64, height: f64, settings: &LayoutSettings) -> GeneratorError {
    GeneratorError::SheetTooLarge {
        required_area: width * height,
        max_area: settings.sheet_width * settings.sheet_height,
        required_width: width,
        required_height: height,
        sheet_width: settings.sheet_width,
        sheet_height: settings.sheet_height,
    }
}

/// Pack `outlines` onto the sheet described by `settings`.
///
/// Output order is placement order. Fails with
/// [`GeneratorError::SheetTooLarge`] when the packed extent does not fit.
pub fn pack(outlines: Vec<PanelOutline>, settings: &LayoutSettings) -> GeneratorResult<Layout> {
    struct Item {
        outline: PanelOutline,
        bounds: BoundingBox,
    }

    let mut items: Vec<Item> = outlines
        .into_iter()
        .filter_map(|outline| {
            BoundingBox::from_points(&outline.outline).map(|bounds| Item { outline, bounds })
        })
        .collect();

    if settings.sort_by_height {
        // Stable, so equal heights keep topology order.
        items.sort_by(|a, b| {
            b.bounds
                .height()
                .partial_cmp(&a.bounds.height())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    let mut current_x = 0.0;
    let mut current_y = 0.0;
    let mut row_height: f64 = 0.0;
    let mut used_width: f64 = 0.0;
    let mut placed = Vec::with_capacity(items.len());

    for item in items {
        let width = item.bounds.width();
        let height = item.bounds.height();

        if current_x > 0.0 && current_x + width > settings.sheet_width {
            current_x = 0.0;
            current_y += row_height + settings.spacing;
            row_height = 0.0;
        }

        let dx = current_x - item.bounds.min_x;
        let dy = current_y - item.bounds.min_y;
        let outline: Vec<Point> = item
            .outline
            .outline
            .iter()
            .map(|p| p.translated(dx, dy))
            .collect();
        let bounds = BoundingBox {
            min_x: current_x,
            min_y: current_y,
            max_x: current_x + width,
            max_y: current_y + height,
        };

        debug!(
            panel = %item.outline.id,
            x = current_x,
            y = current_y,
            "placed panel"
        );

        used_width = used_width.max(current_x + width);
        row_height = row_height.max(height);
        current_x += width + settings.spacing;

        placed.push(PlacedPanel {
            id: item.outline.id,
            width: item.outline.width,
            height: item.outline.height,
            outline,
            bounds,
        });
    }

    let used_height = if placed.is_empty() {
        0.0
    } else {
        current_y + row_height
    };

    if used_width > settings.sheet_width || used_height > settings.sheet_height {
        return Err(sheet_too_large(used_width, used_height, settings));
    }

    Ok(Layout {
        panels: placed,
        used_width,
        used_height,
    })
}
