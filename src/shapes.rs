//! Path outlines for the basic shapes: `rect`, `circle`, `ellipse`, `line`,
//! `polyline`, `polygon`.
//!
//! Each constructor turns the geometry attributes of one element kind into a
//! [`Path`], so that the rendering stage only ever deals in path outlines.
//! Geometry that spans no area (a rect with a nonpositive extent, an ellipse
//! with a nonpositive radius) yields an empty path.

use cssparser::Parser;
use std::ops::Deref;

use crate::error::*;
use crate::parsers::{optional_comma, Parse};
use crate::path_builder::{LargeArc, Path, PathBuilder, Sweep};

/// The parsed `points` attribute of a polyline or polygon.
///
/// Grammar: <https://www.w3.org/TR/SVG11/shapes.html#PointsBNF>
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Points(Vec<(f64, f64)>);

impl Deref for Points {
    type Target = [(f64, f64)];

    fn deref(&self) -> &[(f64, f64)] {
        self.0.as_slice()
    }
}

impl From<Vec<(f64, f64)>> for Points {
    fn from(v: Vec<(f64, f64)>) -> Points {
        Points(v)
    }
}

impl Parse for Points {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Points, ParseError<'i>> {
        let mut v = Vec::new();

        // The list is cut short at the first coordinate that fails to parse,
        // and an unpaired trailing coordinate is dropped; whatever complete
        // pairs came before are kept.
        while let Ok(x) = parser.try_parse(f64::parse) {
            optional_comma(parser);

            let y = match parser.try_parse(f64::parse) {
                Ok(y) => y,
                Err(_) => break,
            };

            v.push((x, y));
            optional_comma(parser);
        }

        // Eat whatever ended the list, so that callers which require the
        // input to be exhausted do not turn the truncation into an error.
        while parser.next().is_ok() {}

        Ok(Points(v))
    }
}

/// Builds the outline of a `rect` element.
///
/// `rx`/`ry` come in already defaulted to each other; a nonpositive radius on
/// either axis disables the rounded corners on both.
pub fn make_rect(x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64) -> Path {
    let mut builder = PathBuilder::default();

    if w <= 0.0 || h <= 0.0 {
        return builder.into_path();
    }

    let right = x + w;
    let bottom = y + h;

    let mut rx = rx.min(w / 2.0);
    let mut ry = ry.min(h / 2.0);

    if rx <= 0.0 || ry <= 0.0 {
        rx = 0.0;
        ry = 0.0;
    }

    if rx == 0.0 {
        // plain corners
        builder.move_to(x, y);
        builder.line_to(right, y);
        builder.line_to(right, bottom);
        builder.line_to(x, bottom);
        builder.line_to(x, y);
    } else {
        // Rounded corners.  The straight edges run between the corner arcs;
        // (x1, x2) are where the arcs meet the top and bottom edges, and
        // (y1, y2) where they meet the left and right edges.  Each corner is
        // a quarter-ellipse, drawn clockwise starting after the top-left one.
        let (x1, x2) = (x + rx, right - rx);
        let (y1, y2) = (y + ry, bottom - ry);

        builder.move_to(x1, y);
        builder.line_to(x2, y);
        builder.arc(x2, y, rx, ry, 0.0, LargeArc(false), Sweep::Positive, right, y1);
        builder.line_to(right, y2);
        builder.arc(right, y2, rx, ry, 0.0, LargeArc(false), Sweep::Positive, x2, bottom);
        builder.line_to(x1, bottom);
        builder.arc(x1, bottom, rx, ry, 0.0, LargeArc(false), Sweep::Positive, x, y2);
        builder.line_to(x, y1);
        builder.arc(x, y1, rx, ry, 0.0, LargeArc(false), Sweep::Positive, x1, y);
    }

    builder.close_path();

    builder.into_path()
}

/// Builds the outline of a `circle` element.
pub fn make_circle(cx: f64, cy: f64, r: f64) -> Path {
    make_ellipse(cx, cy, r, r)
}

/// Builds the outline of an `ellipse` element.
pub fn make_ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Path {
    // Control-point offset that makes a cubic segment match a quarter of an
    // ellipse at its midpoint: 4/3 * (sqrt(2) - 1).
    const KAPPA: f64 = 0.5522847498;

    let mut builder = PathBuilder::default();

    if rx <= 0.0 || ry <= 0.0 {
        return builder.into_path();
    }

    let dx = KAPPA * rx;
    let dy = KAPPA * ry;

    // One cubic per quadrant, clockwise from the rightmost point.
    builder.move_to(cx + rx, cy);
    builder.curve_to(cx + rx, cy + dy, cx + dx, cy + ry, cx, cy + ry);
    builder.curve_to(cx - dx, cy + ry, cx - rx, cy + dy, cx - rx, cy);
    builder.curve_to(cx - rx, cy - dy, cx - dx, cy - ry, cx, cy - ry);
    builder.curve_to(cx + dx, cy - ry, cx + rx, cy - dy, cx + rx, cy);
    builder.close_path();

    builder.into_path()
}

/// Builds the outline of a `line` element.
pub fn make_line(x1: f64, y1: f64, x2: f64, y2: f64) -> Path {
    let mut builder = PathBuilder::default();

    builder.move_to(x1, y1);
    builder.line_to(x2, y2);

    builder.into_path()
}

/// Builds the outline of a `polyline` (open) or `polygon` (closed) element.
pub fn make_poly(points: &Points, closed: bool) -> Path {
    let mut builder = PathBuilder::default();

    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            builder.move_to(x, y);
        } else {
            builder.line_to(x, y);
        }
    }

    if closed && !points.is_empty() {
        builder.close_path();
    }

    builder.into_path()
}
