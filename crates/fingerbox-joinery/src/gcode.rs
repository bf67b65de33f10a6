//! Laser G-code export
//!
//! Emits every packed panel outline as a closed cut, repeated for the
//! configured number of passes. Sheet coordinates are y-down, so Y is
//! flipped to put the layout's bottom-left corner at the work origin.

use crate::generator::Generated;
use serde::{Deserialize, Serialize};

/// Laser cutting parameters for G-code export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserSettings {
    /// Number of passes over every outline
    pub passes: u32,
    /// Spindle/laser power (`S` word)
    pub power: u32,
    /// Cutting feed rate in mm/min
    pub feed_rate: f64,
    /// Work origin offset X in mm
    pub offset_x: f64,
    /// Work origin offset Y in mm
    pub offset_y: f64,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            passes: 1,
            power: 1000,
            feed_rate: 500.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Serialize a generated box as laser G-code.
pub fn render_gcode(generated: &Generated, laser: &LaserSettings) -> String {
    let spec = generated.spec();
    let layout = generated.layout();
    let mut gcode = String::new();

    gcode.push_str("; Fingerbox finger-jointed box\n");
    gcode.push_str(&format!("; Id: {}\n", generated.id()));
    gcode.push_str(";\n");
    gcode.push_str("; --- Box Dimensions ---\n");
    gcode.push_str(&format!(
        "; Dimensions: {}x{}x{} mm (W x H x D)\n",
        spec.width(),
        spec.height(),
        spec.depth()
    ));
    gcode.push_str(&format!("; Material thickness: {}\n", spec.gauge()));
    gcode.push_str(&format!("; Finger width: {} mm\n", spec.thickness()));
    gcode.push_str(&format!("; Kerf: {} mm\n", generated.kerf()));
    gcode.push_str(&format!(
        "; Sheet used: {:.3}x{:.3} mm\n",
        layout.used_width, layout.used_height
    ));
    gcode.push_str(";\n");
    gcode.push_str("; --- Laser Settings ---\n");
    gcode.push_str(&format!("; Laser passes: {}\n", laser.passes));
    gcode.push_str(&format!("; Laser power: S{}\n", laser.power));
    gcode.push_str(&format!("; Feed rate: {:.0} mm/min\n", laser.feed_rate));
    gcode.push_str(&format!("; Offset: X{} Y{}\n", laser.offset_x, laser.offset_y));
    gcode.push_str(";\n");

    gcode.push_str("G21 ; Set units to millimeters\n");
    gcode.push_str("G90 ; Absolute positioning\n");
    gcode.push_str("G17 ; XY plane selection\n");
    gcode.push_str("M5 ; Laser off\n\n");

    let to_machine = |x: f64, y: f64| {
        (
            x + laser.offset_x,
            layout.used_height - y + laser.offset_y,
        )
    };

    for (i, panel) in layout.panels.iter().enumerate() {
        gcode.push_str(&format!("; Panel {}: {}\n", i + 1, panel.id));

        let Some(first) = panel.outline.first() else {
            continue;
        };
        let (start_x, start_y) = to_machine(first.x, first.y);
        gcode.push_str(&format!("G0 X{:.3} Y{:.3} ; Rapid to start\n", start_x, start_y));

        for pass in 1..=laser.passes {
            gcode.push_str(&format!("; Pass {}/{}\n", pass, laser.passes));
            gcode.push_str(&format!("M3 S{} ; Laser on\n", laser.power));

            for (idx, point) in panel.outline.iter().skip(1).chain([first]).enumerate() {
                let (x, y) = to_machine(point.x, point.y);
                if idx == 0 {
                    gcode.push_str(&format!("G1 X{:.3} Y{:.3} F{:.0}\n", x, y, laser.feed_rate));
                } else {
                    gcode.push_str(&format!("G1 X{:.3} Y{:.3}\n", x, y));
                }
            }

            gcode.push_str("M5 ; Laser off\n");
        }

        gcode.push('\n');
    }

    gcode.push_str("M5 ; Ensure laser off\n");
    gcode.push_str("G0 X0 Y0 ; Return to origin\n");
    gcode.push_str("M2 ; Program end\n");

    gcode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, GeneratorSettings};
    use crate::validator::BoxSpec;

    fn sample() -> Generated {
        generate(
            &BoxSpec::new(100.0, 60.0, 50.0, 3.0),
            false,
            &GeneratorSettings::default(),
        )
        .unwrap()
    }

    fn coords(gcode: &str) -> Vec<(f64, f64)> {
        gcode
            .lines()
            .filter(|l| l.starts_with("G0") || l.starts_with("G1"))
            .filter_map(|line| {
                let word = |letter: char| -> Option<f64> {
                    let start = line.find(letter)? + 1;
                    let text: String = line[start..]
                        .chars()
                        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                        .collect();
                    text.parse().ok()
                };
                Some((word('X')?, word('Y')?))
            })
            .collect()
    }

    #[test]
    fn test_gcode_structure() {
        let laser = LaserSettings {
            passes: 2,
            ..LaserSettings::default()
        };
        let gcode = render_gcode(&sample(), &laser);

        assert!(gcode.contains("G21"));
        assert!(gcode.contains("G90"));
        assert!(gcode.trim_end().ends_with("M2 ; Program end"));
        assert_eq!(gcode.matches("; Panel ").count(), 6);
        assert_eq!(gcode.matches("M3 S1000").count(), 12);
        assert!(gcode.contains("; Material thickness: 3mm"));
    }

    #[test]
    fn test_gcode_coordinates_are_on_sheet() {
        let generated = sample();
        let gcode = render_gcode(&generated, &LaserSettings::default());
        let layout = generated.layout();
        for (x, y) in coords(&gcode) {
            assert!(x >= -0.001 && x <= layout.used_width + 0.001, "x={x}");
            assert!(y >= -0.001 && y <= layout.used_height + 0.001, "y={y}");
        }
    }

    #[test]
    fn test_gcode_offsets() {
        let laser = LaserSettings {
            offset_x: 10.0,
            offset_y: 20.0,
            ..LaserSettings::default()
        };
        let gcode = render_gcode(&sample(), &laser);
        let points = coords(&gcode);
        let min_x = points
            .iter()
            .filter(|(x, y)| !(*x == 0.0 && *y == 0.0))
            .map(|p| p.0)
            .fold(f64::INFINITY, f64::min);
        assert!((min_x - 10.0).abs() < 0.001, "min_x={min_x}");
    }
}
