//! Builds the scene tree out of a parsed XML tree.
//!
//! This is where the lenient half of loading lives.  The XML reader already
//! guaranteed well-formed markup; from here on nothing is fatal except a
//! root element that is not `svg`.  Unusable elements are dropped one by
//! one, and unusable attribute values fall back to their defaults.

use markup5ever::{expanded_name, local_name, namespace_url, ns, LocalName, QualName};

use crate::error::{LoadingError, ValueErrorKind};
use crate::node::{Node, NodeKind};
use crate::parsers::Parse;
use crate::path_builder::PathBuilder;
use crate::properties::{self, ParsedProperty, StyleProps};
use crate::rect::Rect;
use crate::session::Session;
use crate::shapes::Points;
use crate::svg_log;
use crate::transform::Transform;
use crate::viewbox::ViewBox;
use crate::xml::Element;

/// A loaded, immutable scene tree plus the sizing of its root viewport.
///
/// A `Document` has no lifecycle after construction; the caller keeps it
/// around and renders it as many times as it likes, from any thread.
#[derive(Debug)]
pub struct Document {
    /// Coordinate region that the tree's geometry is expressed in.
    pub view_box: Rect,

    /// Intrinsic width; equal to the view box width when the markup gave
    /// no usable `width` attribute.
    pub width: f64,

    /// Intrinsic height, with the same fallback as `width`.
    pub height: f64,

    pub children: Vec<Node>,
}

impl Document {
    /// Builds a document from the root of an XML tree.
    ///
    /// The only fatal condition here is a root element other than `svg`;
    /// everything else degrades to dropped elements or default values.
    pub fn build(session: &Session, root: &Element) -> Result<Document, LoadingError> {
        if element_name(root).expanded() != expanded_name!("", "svg") {
            return Err(LoadingError::NoSvgRoot);
        }

        let mut view_box = None;
        let mut width = None;
        let mut height = None;

        for (attr, value) in root.attributes.iter() {
            match attr.expanded() {
                expanded_name!("", "viewBox") => match ViewBox::parse_str(value) {
                    Ok(vb) => view_box = Some(vb),
                    Err(e) => svg_log!(
                        session,
                        "ignoring attribute with invalid value: {}",
                        ValueErrorKind::from(e)
                    ),
                },

                expanded_name!("", "width") => width = parse_dimension(value),
                expanded_name!("", "height") => height = parse_dimension(value),

                _ => (),
            }
        }

        let view_box = match view_box {
            Some(vb) => *vb,

            // The width/height attributes double as the view box when only
            // they are given.
            None => {
                let w = width.unwrap_or(-1.0);
                let h = height.unwrap_or(-1.0);

                if w > 0.0 {
                    Rect::from_size(w, h)
                } else {
                    svg_log!(
                        session,
                        "document has no viewBox or width/height, defaulting to 0 0 100 100"
                    );
                    Rect::from_size(100.0, 100.0)
                }
            }
        };

        let width = width.filter(|w| *w > 0.0).unwrap_or_else(|| view_box.width());
        let height = height
            .filter(|h| *h > 0.0)
            .unwrap_or_else(|| view_box.height());

        let children = parse_children(session, root);

        Ok(Document {
            view_box,
            width,
            height,
            children,
        })
    }
}

fn parse_children(session: &Session, parent: &Element) -> Vec<Node> {
    parent
        .children
        .iter()
        .filter_map(|child| parse_element(session, child))
        .collect()
}

fn parse_element(session: &Session, element: &Element) -> Option<Node> {
    let kind = parse_kind(session, element)?;
    let (style, transform, display) = parse_common_attributes(session, element);

    Some(Node {
        style,
        transform,
        display,
        kind,
    })
}

/// Element names are recognized without regard to ASCII case, so `<RECT>`
/// is a rect.  Attribute names are not given the same leniency.
fn element_name(element: &Element) -> QualName {
    let local = &element.name.local;

    if local.bytes().any(|b| b.is_ascii_uppercase()) {
        QualName::new(None, ns!(), LocalName::from(local.to_ascii_lowercase()))
    } else {
        element.name.clone()
    }
}

fn parse_kind(session: &Session, element: &Element) -> Option<NodeKind> {
    let name = element_name(element);

    match name.expanded() {
        // A nested `svg` gets no viewport of its own; it only groups its
        // children.
        expanded_name!("", "g") | expanded_name!("", "svg") => {
            Some(NodeKind::Group(parse_children(session, element)))
        }

        expanded_name!("", "path") => parse_path(session, element),
        expanded_name!("", "rect") => parse_rect(element),
        expanded_name!("", "circle") => parse_circle(element),
        expanded_name!("", "ellipse") => parse_ellipse(element),
        expanded_name!("", "line") => Some(parse_line(element)),
        expanded_name!("", "polyline") => parse_points(element).map(NodeKind::Polyline),
        expanded_name!("", "polygon") => parse_points(element).map(NodeKind::Polygon),

        _ => {
            svg_log!(session, "unsupported element <{}>", element.name.local);
            None
        }
    }
}

/// Parses the style, transform, and visibility attributes common to all
/// element kinds.
fn parse_common_attributes(session: &Session, element: &Element) -> (StyleProps, Transform, bool) {
    let mut style = StyleProps::default();
    let mut transform = Transform::identity();
    let mut display = true;
    let mut style_attr = None;

    for (attr, value) in element.attributes.iter() {
        match attr.expanded() {
            expanded_name!("", "transform") => match Transform::parse_str(value) {
                Ok(t) => transform = t,
                Err(e) => svg_log!(
                    session,
                    "ignoring attribute with invalid value: {}",
                    ValueErrorKind::from(e)
                ),
            },

            expanded_name!("", "display") => {
                if properties::display_attribute_hides(value) {
                    display = false;
                }
            }

            // applied after the loop so that inline declarations win over
            // presentation attributes regardless of attribute order
            expanded_name!("", "style") => style_attr = Some(value),

            _ => style.parse_presentation_attribute(session, &attr, value),
        }
    }

    if let Some(declarations) = style_attr {
        for decl in properties::parse_style_attribute(declarations) {
            // `display: none` hides the element; no later declaration can
            // bring it back.
            if let ParsedProperty::Display(false) = decl {
                display = false;
            }

            style.set_parsed_property(&decl);
        }
    }

    (style, transform, display)
}

fn parse_path(session: &Session, element: &Element) -> Option<NodeKind> {
    let mut d = None;

    for (attr, value) in element.attributes.iter() {
        match attr.expanded() {
            expanded_name!("", "d") => d = Some(value),
            _ => (),
        }
    }

    let d = match d {
        Some(d) if !d.is_empty() => d,
        _ => {
            svg_log!(session, "path element has no \"d\" attribute");
            return None;
        }
    };

    let mut builder = PathBuilder::default();
    if let Err(e) = builder.parse(d) {
        // keep whatever was built before the bad token
        svg_log!(session, "error parsing path data: {}", e);
    }

    let path = builder.into_path();
    if path.is_empty() {
        svg_log!(session, "path data yields no segments");
        return None;
    }

    Some(NodeKind::Path(path))
}

fn parse_rect(element: &Element) -> Option<NodeKind> {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut width = 0.0;
    let mut height = 0.0;
    let mut rx = 0.0;
    let mut ry = 0.0;

    for (attr, value) in element.attributes.iter() {
        match attr.expanded() {
            expanded_name!("", "x") => x = parse_number(value, 0.0),
            expanded_name!("", "y") => y = parse_number(value, 0.0),
            expanded_name!("", "width") => width = parse_number(value, 0.0),
            expanded_name!("", "height") => height = parse_number(value, 0.0),
            expanded_name!("", "rx") => rx = parse_number(value, 0.0),
            expanded_name!("", "ry") => ry = parse_number(value, 0.0),
            _ => (),
        }
    }

    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    // when only one radius is given the other mirrors it
    if rx > 0.0 && ry == 0.0 {
        ry = rx;
    } else if ry > 0.0 && rx == 0.0 {
        rx = ry;
    }

    Some(NodeKind::Rect {
        x,
        y,
        width,
        height,
        rx,
        ry,
    })
}

fn parse_circle(element: &Element) -> Option<NodeKind> {
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut r = 0.0;

    for (attr, value) in element.attributes.iter() {
        match attr.expanded() {
            expanded_name!("", "cx") => cx = parse_number(value, 0.0),
            expanded_name!("", "cy") => cy = parse_number(value, 0.0),
            expanded_name!("", "r") => r = parse_number(value, 0.0),
            _ => (),
        }
    }

    if r <= 0.0 {
        return None;
    }

    Some(NodeKind::Circle { cx, cy, r })
}

fn parse_ellipse(element: &Element) -> Option<NodeKind> {
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut rx = 0.0;
    let mut ry = 0.0;

    for (attr, value) in element.attributes.iter() {
        match attr.expanded() {
            expanded_name!("", "cx") => cx = parse_number(value, 0.0),
            expanded_name!("", "cy") => cy = parse_number(value, 0.0),
            expanded_name!("", "rx") => rx = parse_number(value, 0.0),
            expanded_name!("", "ry") => ry = parse_number(value, 0.0),
            _ => (),
        }
    }

    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }

    Some(NodeKind::Ellipse { cx, cy, rx, ry })
}

fn parse_line(element: &Element) -> NodeKind {
    let mut x1 = 0.0;
    let mut y1 = 0.0;
    let mut x2 = 0.0;
    let mut y2 = 0.0;

    for (attr, value) in element.attributes.iter() {
        match attr.expanded() {
            expanded_name!("", "x1") => x1 = parse_number(value, 0.0),
            expanded_name!("", "y1") => y1 = parse_number(value, 0.0),
            expanded_name!("", "x2") => x2 = parse_number(value, 0.0),
            expanded_name!("", "y2") => y2 = parse_number(value, 0.0),
            _ => (),
        }
    }

    NodeKind::Line { x1, y1, x2, y2 }
}

fn parse_points(element: &Element) -> Option<Points> {
    let mut points = Points::default();

    for (attr, value) in element.attributes.iter() {
        match attr.expanded() {
            expanded_name!("", "points") => {
                points = Points::parse_str(value).unwrap_or_default()
            }
            _ => (),
        }
    }

    // at least two coordinate pairs are needed to draw anything
    if points.len() < 2 {
        return None;
    }

    Some(points)
}

/// Parses a geometry attribute, with a `px` suffix tolerated.
///
/// Anything unparseable falls back to the given default instead of
/// invalidating the element.
fn parse_number(value: &str, default: f64) -> f64 {
    let value = value.trim();
    let value = value.strip_suffix("px").map(str::trim_end).unwrap_or(value);

    f64::parse_str(value).unwrap_or(default)
}

/// Parses the `width`/`height` attributes of the root element.
///
/// Absolute unit suffixes are stripped; percentages are relative to a layout
/// context this renderer does not have, so they count as unspecified.
fn parse_dimension(value: &str) -> Option<f64> {
    let mut value = value.trim();

    for suffix in &["px", "pt", "em", "ex"] {
        if let Some(stripped) = value.strip_suffix(suffix) {
            value = stripped.trim_end();
            break;
        }
    }

    if value.ends_with('%') {
        return None;
    }

    f64::parse_str(value).ok()
}
