//! SVG visualization of a cover layout.
//!
//! Two stacked panels: the source image with the point that lands under the
//! viewport centre, then the scaled image with the viewport window drawn on
//! top of it. Handy for checking offset direction and overflow by eye.
//!
//! # Example
//!
//! ```
//! use zencover::{CoverFit, Offset, Size, svg::render_cover_svg};
//!
//! let viewport = Size::new(1920.0, 1080.0);
//! let image = Size::new(1200.0, 800.0);
//! let offset = Offset::new(100.0, 0.0);
//! let layout = CoverFit::new(viewport, image).offset(offset).compute().unwrap();
//!
//! let svg = render_cover_svg(viewport, image, offset, &layout);
//! assert!(svg.starts_with("<svg"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::cover::{Offset, RenderLayout, Size};

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 50.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;
/// Radius of the focus marker.
const MARKER_R: f64 = 4.0;

/// Render a complete SVG document for one cover computation.
///
/// `layout` should be the result of computing `image` over `viewport` with
/// `offset`; the diagram only draws, it does not recompute.
pub fn render_cover_svg(
    viewport: Size,
    image: Size,
    offset: Offset,
    layout: &RenderLayout,
) -> String {
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP * 2.0 + (LABEL_H + MAX_PANEL_H) * 2.0 + PANEL_GAP;
    let center_x = total_w / 2.0;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');
    svg.push_str(STYLE);

    // Panel 1: source with focus marker.
    let mut y = MARGIN_TOP;
    push_label(
        &mut svg,
        center_x,
        y,
        &format!("Source  {}×{}", fmt_px(image.width), fmt_px(image.height)),
    );
    y += LABEL_H;
    let (sw, sh, scale) = scale_to_fit(image.width, image.height);
    let px = center_x - sw / 2.0;
    push_rect(&mut svg, px, y, sw, sh, "inner");
    let focus_x = image.width / 2.0 - offset.x;
    let focus_y = image.height / 2.0 + offset.y;
    svg.push_str(&format!(
        r#"<circle cx="{:.1}" cy="{:.1}" r="{}" class="focus"/>"#,
        px + focus_x * scale,
        y + focus_y * scale,
        MARKER_R
    ));
    svg.push('\n');
    if !offset.is_center() {
        push_annotation(
            &mut svg,
            center_x,
            y + sh + 14.0,
            &format!("offset ({}, {})", fmt_px(offset.x), fmt_px(offset.y)),
        );
    }
    y += MAX_PANEL_H + PANEL_GAP;

    // Panel 2: scaled image, viewport window overlaid.
    push_label(
        &mut svg,
        center_x,
        y,
        &format!("Cover  {}×{}", fmt_px(layout.width), fmt_px(layout.height)),
    );
    y += LABEL_H;
    let (cw, ch, scale) = scale_to_fit(layout.width, layout.height);
    let px = center_x - cw / 2.0;
    push_rect(&mut svg, px, y, cw, ch, "inner");
    push_rect(
        &mut svg,
        px - layout.offset_x * scale,
        y - layout.offset_y * scale,
        viewport.width * scale,
        viewport.height * scale,
        "viewport",
    );
    push_annotation(
        &mut svg,
        center_x,
        y + ch + 14.0,
        &format!(
            "viewport {}×{} at ({}, {})",
            fmt_px(viewport.width),
            fmt_px(viewport.height),
            fmt_px(layout.offset_x),
            fmt_px(layout.offset_y)
        ),
    );

    svg.push_str("</svg>\n");
    svg
}

const STYLE: &str = r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .inner { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .viewport { fill: none; stroke: #d9534f; stroke-width: 2; stroke-dasharray: 6,3; }
  .focus { fill: #d9534f; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .inner { fill: #3a72a4; stroke: #5a9fd4; }
    .viewport { stroke: #ff7b72; }
    .focus { fill: #ff7b72; }
  }
</style>
"##;

/// Scale to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(w: f64, h: f64) -> (f64, f64, f64) {
    if !(w > 0.0 && h > 0.0) {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn push_rect(svg: &mut String, x: f64, y: f64, w: f64, h: f64, class: &str) {
    svg.push_str(&format!(
        r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{class}" rx="1"/>"#
    ));
    svg.push('\n');
}

fn push_label(svg: &mut String, x: f64, y: f64, text: &str) {
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        x,
        y + 14.0,
        escape_xml(text)
    ));
    svg.push('\n');
}

fn push_annotation(svg: &mut String, x: f64, y: f64, text: &str) {
    svg.push_str(&format!(
        r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
        x,
        y,
        escape_xml(text)
    ));
    svg.push('\n');
}

/// Whole pixels print without a fraction; others round to one decimal.
fn fmt_px(v: f64) -> String {
    if v == v.trunc() {
        // `+ 0.0` folds -0 into 0.
        format!("{:.0}", v + 0.0)
    } else {
        format!("{v:.1}")
    }
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
