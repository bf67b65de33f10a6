//! SVG cut-file emission
//!
//! One closed `<path>` per panel inside a single `panels` group. The document
//! is sized in millimetres to the packed extent, so 1 user unit = 1 mm.
//! Paths use only absolute `M`/`L`/`Z` commands with space-separated numbers,
//! which keeps [`read_outlines`] trivial.

use crate::error::{GeneratorError, GeneratorResult};
use crate::layout::Layout;
use fingerbox_core::{format_mm, Point};
use regex::Regex;

const PATH_PATTERN: &str = r#"<path id="panel-([a-z]+)"[^>]*\sd="([^"]*)""#;

/// Cut line colour; the usual "cut" convention for laser software.
const STROKE: &str = "#ff0000";
const STROKE_WIDTH: &str = "0.1";

/// Path data for a closed outline.
pub fn path_data(outline: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in outline.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { "L" };
        d.push_str(&format!("{} {} {} ", cmd, format_mm(p.x), format_mm(p.y)));
    }
    d.push('Z');
    d
}

/// Serialize a packed layout as an SVG document.
pub fn render_svg(layout: &Layout, title: &str) -> String {
    let width = format_mm(layout.used_width);
    let height = format_mm(layout.used_height);

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}mm\" height=\"{height}mm\" viewBox=\"0 0 {width} {height}\">\n"
    ));
    svg.push_str(&format!("  <title>{}</title>\n", escape_text(title)));
    svg.push_str(&format!(
        "  <g id=\"panels\" fill=\"none\" stroke=\"{STROKE}\" stroke-width=\"{STROKE_WIDTH}\">\n"
    ));

    for panel in &layout.panels {
        svg.push_str(&format!(
            "    <path id=\"panel-{}\" data-width=\"{}\" data-height=\"{}\" d=\"{}\"/>\n",
            panel.id,
            format_mm(panel.width),
            format_mm(panel.height),
            path_data(&panel.outline)
        ));
    }

    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");
    svg
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Parse the panel paths of a document produced by [`render_svg`].
///
/// Returns `(panel name, outline)` pairs in document order.
pub fn read_outlines(svg: &str) -> GeneratorResult<Vec<(String, Vec<Point>)>> {
    let re = Regex::new(PATH_PATTERN)
        .map_err(|e| GeneratorError::InvalidDocument(e.to_string()))?;

    re.captures_iter(svg)
        .map(|caps| {
            let name = caps[1].to_string();
            let outline = parse_path_data(&caps[2])?;
            Ok((name, outline))
        })
        .collect()
}

fn parse_path_data(d: &str) -> GeneratorResult<Vec<Point>> {
    let mut points = Vec::new();
    let mut tokens = d.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "M" | "L" => {
                let x = parse_number(tokens.next())?;
                let y = parse_number(tokens.next())?;
                points.push(Point::new(x, y));
            }
            "Z" => break,
            other => {
                return Err(GeneratorError::InvalidDocument(format!(
                    "unexpected path command '{other}'"
                )))
            }
        }
    }

    Ok(points)
}

fn parse_number(token: Option<&str>) -> GeneratorResult<f64> {
    let token =
        token.ok_or_else(|| GeneratorError::InvalidDocument("truncated path data".to_string()))?;
    token
        .parse::<f64>()
        .map_err(|_| GeneratorError::InvalidDocument(format!("invalid coordinate '{token}'")))
}
