//! Turns a document tree into drawing operations on a surface.
//!
//! Rendering is a preorder walk of the tree.  Around every node the
//! renderer pushes the node's transform and resolves its style against the
//! parent's; the recursion itself is the transform and style stack.  All
//! state lives on the call stack, so a document can be rendered from several
//! threads at once as long as each call gets its own surface.

use rgb::RGB8;

use crate::document::Document;
use crate::enum_default;
use crate::node::{Node, NodeKind};
use crate::path_builder::Path;
use crate::properties::ComputedStyle;
use crate::rect::Rect;
use crate::shapes;
use crate::surface::{FillParams, StrokeParams, Surface};
use crate::transform::Transform;
use crate::unit_interval::UnitInterval;

/// How a document's view box is mapped onto the target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// Scale uniformly until one axis fits, and center along the other.
    Uniform,

    /// Scale each axis independently so the view box covers the target
    /// rectangle exactly, distorting the aspect ratio if needed.
    Stretch,
}

enum_default!(ScaleMode, ScaleMode::Uniform);

/// Renders a document into `viewport` on the given surface.
///
/// A degenerate viewport or view box renders nothing; there is no error in
/// asking to draw into zero area.  Errors only come from the surface itself
/// and abort the render.
pub fn render_document<S: Surface>(
    document: &Document,
    surface: &mut S,
    viewport: &Rect,
    theme_color: Option<RGB8>,
    scale_mode: ScaleMode,
) -> Result<(), S::Error> {
    let (width, height) = viewport.size();
    if width <= 0.0 || height <= 0.0 {
        return Ok(());
    }

    let view_box = document.view_box;
    if view_box.width() <= 0.0 || view_box.height() <= 0.0 {
        return Ok(());
    }

    surface.push_transform(&viewport_transform(viewport, &view_box, scale_mode))?;

    let result = render_nodes(
        &document.children,
        surface,
        &ComputedStyle::default(),
        theme_color,
    );

    // the pop must happen even if a node failed mid-walk
    result.and(surface.pop_transform())
}

/// Computes the matrix that maps the view box onto the target rectangle.
fn viewport_transform(viewport: &Rect, view_box: &Rect, scale_mode: ScaleMode) -> Transform {
    let (w, h) = viewport.size();
    let (x, y) = (viewport.x0, viewport.y0);

    let (vb_w, vb_h) = view_box.size();
    let (vb_x, vb_y) = (view_box.x0, view_box.y0);

    match scale_mode {
        ScaleMode::Stretch => {
            let sx = w / vb_w;
            let sy = h / vb_h;

            Transform::new(sx, 0.0, 0.0, sy, x - vb_x * sx, y - vb_y * sy)
        }

        ScaleMode::Uniform => {
            let scale = (w / vb_w).min(h / vb_h);

            let tx = x + (w - vb_w * scale) / 2.0;
            let ty = y + (h - vb_h * scale) / 2.0;

            Transform::new(scale, 0.0, 0.0, scale, tx - vb_x * scale, ty - vb_y * scale)
        }
    }
}

fn render_nodes<S: Surface>(
    nodes: &[Node],
    surface: &mut S,
    parent_style: &ComputedStyle,
    theme_color: Option<RGB8>,
) -> Result<(), S::Error> {
    for node in nodes {
        if !node.display {
            continue;
        }

        let style = node.style.resolve(parent_style);

        surface.push_transform(&node.transform)?;
        let result = render_node_kind(&node.kind, surface, &style, theme_color);
        result.and(surface.pop_transform())?;
    }

    Ok(())
}

fn render_node_kind<S: Surface>(
    kind: &NodeKind,
    surface: &mut S,
    style: &ComputedStyle,
    theme_color: Option<RGB8>,
) -> Result<(), S::Error> {
    match *kind {
        NodeKind::Group(ref children) => render_nodes(children, surface, style, theme_color),

        NodeKind::Path(ref path) => draw_shape(surface, path, style, theme_color),

        NodeKind::Rect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        } => draw_shape(
            surface,
            &shapes::make_rect(x, y, width, height, rx, ry),
            style,
            theme_color,
        ),

        NodeKind::Circle { cx, cy, r } => {
            draw_shape(surface, &shapes::make_circle(cx, cy, r), style, theme_color)
        }

        NodeKind::Ellipse { cx, cy, rx, ry } => draw_shape(
            surface,
            &shapes::make_ellipse(cx, cy, rx, ry),
            style,
            theme_color,
        ),

        // lines have no interior, they are only stroked
        NodeKind::Line { x1, y1, x2, y2 } => draw_stroke(
            surface,
            &shapes::make_line(x1, y1, x2, y2),
            style,
            theme_color,
        ),

        NodeKind::Polyline(ref points) => {
            draw_shape(surface, &shapes::make_poly(points, false), style, theme_color)
        }

        NodeKind::Polygon(ref points) => {
            draw_shape(surface, &shapes::make_poly(points, true), style, theme_color)
        }
    }
}

/// Fills and then strokes one shape outline.
fn draw_shape<S: Surface>(
    surface: &mut S,
    path: &Path,
    style: &ComputedStyle,
    theme_color: Option<RGB8>,
) -> Result<(), S::Error> {
    if path.is_empty() {
        return Ok(());
    }

    if let Some(color) = style.fill.resolve(theme_color) {
        let params = FillParams {
            color,
            alpha: scale_alpha(element_alpha(style), style.fill_opacity),
            rule: style.fill_rule,
        };

        surface.fill(path, &params)?;
    }

    draw_stroke(surface, path, style, theme_color)
}

fn draw_stroke<S: Surface>(
    surface: &mut S,
    path: &Path,
    style: &ComputedStyle,
    theme_color: Option<RGB8>,
) -> Result<(), S::Error> {
    if path.is_empty() {
        return Ok(());
    }

    if let Some(color) = style.stroke.resolve(theme_color) {
        let params = StrokeParams {
            color,
            alpha: scale_alpha(element_alpha(style), style.stroke_opacity),
            width: stroke_width(style.stroke_width),
            cap: style.stroke_line_cap,
            join: style.stroke_line_join,
        };

        surface.stroke(path, &params)?;
    }

    Ok(())
}

/// Alpha ceiling for the whole element, from its resolved `opacity`.
fn element_alpha(style: &ComputedStyle) -> u8 {
    u8::from(style.opacity)
}

/// Scales the element alpha by a fill or stroke opacity.
fn scale_alpha(element_alpha: u8, opacity: UnitInterval) -> u8 {
    (f64::from(element_alpha) * opacity.0).round() as u8
}

/// Stroke width for the surface; rounded, and floored at 1.
fn stroke_width(width: f64) -> u32 {
    (width.round() as i64).max(1) as u32
}
