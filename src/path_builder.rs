//! Path data storage.
//!
//! Path commands arrive one at a time, either from the path data parser or from the
//! basic-shape code.  They accumulate in a [`PathBuilder`], which is cheap to push to,
//! and then get frozen into a [`Path`], which is what the scene tree keeps around for
//! the lifetime of the document.
//!
//! The frozen form is compact on purpose.  Commands and coordinates live in two
//! separate boxed slices, so a `Path` costs two allocations no matter how long it is,
//! and no per-command padding.  The builder side uses a `TinyVec` with inline room for
//! 32 commands; paths short enough to fit never touch the heap until they are frozen.
//!
//! Elliptical arcs are converted to cubic Bézier segments as they are added, so a
//! `Path` only ever contains the move/line/curve/close command set.

use tinyvec::TinyVec;

use std::f64::consts::*;

use crate::enum_default;
use crate::path_parser::{ParseError, PathParser};
use crate::util::clamp;

/// Flag for arcs: pick the sweep of 180 degrees or more when set.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LargeArc(pub bool);

/// Flag for arcs: the direction in which the sweep is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Sweep {
    Negative,
    Positive,
}

/// A cubic Bézier segment: control points `pt1` and `pt2`, endpoint `to`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CubicBezierCurve {
    pub pt1: (f64, f64),
    pub pt2: (f64, f64),
    pub to: (f64, f64),
}

/// A quadratic Bézier segment: control point `pt1`, endpoint `to`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadraticBezierCurve {
    pub pt1: (f64, f64),
    pub to: (f64, f64),
}

/// An elliptical arc as it appears in path data, between two endpoints.
#[derive(Debug, Clone, PartialEq)]
struct EllipticalArc {
    r: (f64, f64),
    x_axis_rotation: f64,
    large_arc: LargeArc,
    sweep: Sweep,
    from: (f64, f64),
    to: (f64, f64),
}

/// What an endpoint-parameterized arc turns out to be once analyzed.
///
/// The degenerate cases come from the SVG implementation notes: an arc with
/// coincident endpoints draws nothing, and an arc with a zero radius collapses
/// to a straight line.
enum ArcParameterization {
    CenterParameters {
        center: (f64, f64),
        /// Radii, scaled up if the original pair reached neither endpoint.
        radii: (f64, f64),
        /// Angle of the start point on the ellipse.
        theta1: f64,
        /// Signed sweep from the start angle to the end angle.
        delta_theta: f64,
    },
    LineTo,
    Omit,
}

/// acos of a cosine already clamped to [-1, 1], negated when the sine is negative.
fn acos_with_sign(cos_val: f64, negative: bool) -> f64 {
    let angle = cos_val.acos();

    if negative {
        -angle
    } else {
        angle
    }
}

impl EllipticalArc {
    /// Rewrites the arc from endpoint form to center-and-angles form.
    ///
    /// This is the endpoint-to-center conversion from the [SVG implementation
    /// notes], section B.2.4, including its error handling for out-of-range
    /// radii.
    ///
    /// [SVG implementation notes]: https://www.w3.org/TR/SVG2/implnote.html#ArcConversionEndpointToCenter
    fn center_parameterization(&self) -> ArcParameterization {
        let Self {
            r: (mut rx, mut ry),
            x_axis_rotation,
            large_arc,
            sweep,
            from: (x1, y1),
            to: (x2, y2),
        } = *self;

        // Coincident endpoints draw nothing.
        if (x1, y1) == (x2, y2) {
            return ArcParameterization::Omit;
        }

        // A zero radius collapses the arc to a straight line.  The squared
        // radii also appear as divisors below, so this check keeps those
        // divisions safe.
        if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
            return ArcParameterization::LineTo;
        }

        let is_large_arc = large_arc.0;
        let is_positive_sweep = sweep == Sweep::Positive;

        let phi = x_axis_rotation * PI / 180.0;
        let (sin_phi, cos_phi) = phi.sin_cos();

        rx = rx.abs();
        ry = ry.abs();

        // Move the origin to the midpoint of the chord and rotate by -phi, so
        // that the ellipse axes line up with the coordinate axes.  Primed
        // variables are in this intermediate frame.
        let mid_x = (x1 - x2) / 2.0;
        let mid_y = (y1 - y2) / 2.0;
        let x1p = cos_phi * mid_x + sin_phi * mid_y;
        let y1p = -sin_phi * mid_x + cos_phi * mid_y;

        // If no ellipse with the given radii passes through both endpoints,
        // grow both radii uniformly until exactly one does.
        let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        // Center of the ellipse in the intermediate frame.
        let d = (rx * y1p).powi(2) + (ry * x1p).powi(2);
        if d == 0.0 {
            return ArcParameterization::Omit;
        }

        let mut k = ((rx * ry).powi(2) / d - 1.0).abs().sqrt();
        if is_positive_sweep == is_large_arc {
            k = -k;
        }

        let cxp = k * rx * y1p / ry;
        let cyp = -k * ry * x1p / rx;

        // And back in the original frame.
        let cx = cos_phi * cxp - sin_phi * cyp + (x1 + x2) / 2.0;
        let cy = sin_phi * cxp + cos_phi * cyp + (y1 + y2) / 2.0;

        // Angle of the start point, from the unit vector u pointing at it.
        let ux = (x1p - cxp) / rx;
        let uy = (y1p - cyp) / ry;
        let u_len = (ux * ux + uy * uy).abs().sqrt();
        if u_len == 0.0 {
            return ArcParameterization::Omit;
        }
        let theta1 = acos_with_sign(clamp(ux / u_len, -1.0, 1.0), uy < 0.0);

        // Sweep angle, from the angle between u and the vector v pointing at
        // the end point.
        let vx = (-x1p - cxp) / rx;
        let vy = (-y1p - cyp) / ry;
        let v_len = (vx * vx + vy * vy).abs().sqrt();
        if v_len == 0.0 {
            return ArcParameterization::Omit;
        }

        let dot = ux * vx + uy * vy;
        let mut delta_theta = acos_with_sign(
            clamp(dot / (u_len * v_len), -1.0, 1.0),
            ux * vy - uy * vx < 0.0,
        );

        // acos only covers half a turn; the sweep flag picks which way around.
        if is_positive_sweep && delta_theta < 0.0 {
            delta_theta += TAU;
        } else if !is_positive_sweep && delta_theta > 0.0 {
            delta_theta -= TAU;
        }

        ArcParameterization::CenterParameters {
            center: (cx, cy),
            radii: (rx, ry),
            theta1,
            delta_theta,
        }
    }
}

/// One cubic Bézier segment approximating the slice of an ellipse between the
/// angles `th0` and `th1`.
///
/// `c` and `r` are the center and radii from the center parameterization, and
/// `x_axis_rotation` is in degrees as it came from the path data.
fn arc_segment(
    c: (f64, f64),
    r: (f64, f64),
    x_axis_rotation: f64,
    th0: f64,
    th1: f64,
) -> CubicBezierCurve {
    let (cx, cy) = c;
    let (rx, ry) = r;
    let phi = x_axis_rotation * PI / 180.0;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_th0, cos_th0) = th0.sin_cos();
    let (sin_th1, cos_th1) = th1.sin_cos();

    // Control points go on the endpoint tangents, at the distance that makes
    // the cubic agree with the ellipse at the midpoint of the slice.
    let d_theta = th1 - th0;
    let half = d_theta / 2.0;
    let t = d_theta.sin() * ((4.0 + 3.0 * half.tan().powi(2)).sqrt() - 1.0) / 3.0;

    let x1 = rx * (cos_th0 - t * sin_th0);
    let y1 = ry * (sin_th0 + t * cos_th0);
    let x3 = rx * cos_th1;
    let y3 = ry * sin_th1;
    let x2 = x3 + rx * (t * sin_th1);
    let y2 = y3 + ry * (-t * cos_th1);

    // Rotate by phi and translate to the center to get back to user space.
    let place = |x: f64, y: f64| {
        (
            cx + cos_phi * x - sin_phi * y,
            cy + sin_phi * x + cos_phi * y,
        )
    };

    CubicBezierCurve {
        pt1: place(x1, y1),
        pt2: place(x2, y2),
        to: place(x3, y3),
    }
}

/// Long form of a single path command, as yielded by [`Path::iter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo(CubicBezierCurve),
    QuadCurveTo(QuadraticBezierCurve),
    ClosePath,
}

// TinyVec requires its element type to be Default.  The choice of variant is
// arbitrary; slack slots are never observed.
enum_default!(PathCommand, PathCommand::ClosePath);

impl PathCommand {
    /// How many coordinate values this command contributes to a `Path`.
    fn coord_count(&self) -> usize {
        match *self {
            PathCommand::MoveTo(..) | PathCommand::LineTo(..) => 2,
            PathCommand::CurveTo(_) => 6,
            PathCommand::QuadCurveTo(_) => 4,
            PathCommand::ClosePath => 0,
        }
    }

    /// Appends this command's coordinates to `coords` and returns its packed tag.
    fn pack(&self, coords: &mut Vec<f64>) -> PackedCommand {
        match *self {
            PathCommand::MoveTo(x, y) => {
                coords.extend_from_slice(&[x, y]);
                PackedCommand::MoveTo
            }

            PathCommand::LineTo(x, y) => {
                coords.extend_from_slice(&[x, y]);
                PackedCommand::LineTo
            }

            PathCommand::CurveTo(CubicBezierCurve { pt1, pt2, to }) => {
                coords.extend_from_slice(&[pt1.0, pt1.1, pt2.0, pt2.1, to.0, to.1]);
                PackedCommand::CurveTo
            }

            PathCommand::QuadCurveTo(QuadraticBezierCurve { pt1, to }) => {
                coords.extend_from_slice(&[pt1.0, pt1.1, to.0, to.1]);
                PackedCommand::QuadCurveTo
            }

            PathCommand::ClosePath => PackedCommand::ClosePath,
        }
    }
}

/// Mutable accumulator for path commands.
///
/// Create one with `PathBuilder::default`, feed it commands either directly or
/// through [`PathBuilder::parse`], and freeze it with [`PathBuilder::into_path`].
#[derive(Default)]
pub struct PathBuilder {
    commands: TinyVec<[PathCommand; 32]>,
}

/// An immutable path in compact form.
///
/// `PathCommand` variants have different sizes, so an array of them would waste
/// space on padding.  Instead a `Path` stores one-byte command tags and the
/// coordinate values in two separate dense slices; [`Path::iter`] zips them back
/// into `PathCommand`s.
///
/// The `Default` value is the empty path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Box<[PackedCommand]>,
    coords: Box<[f64]>,
}

/// Coordinate-less command tag stored in a `Path`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq)]
enum PackedCommand {
    MoveTo,
    LineTo,
    CurveTo,
    QuadCurveTo,
    ClosePath,
}

impl PackedCommand {
    /// How many coordinate values belong to this tag.
    fn coord_count(self) -> usize {
        match self {
            PackedCommand::MoveTo | PackedCommand::LineTo => 2,
            PackedCommand::CurveTo => 6,
            PackedCommand::QuadCurveTo => 4,
            PackedCommand::ClosePath => 0,
        }
    }

    /// Rebuilds the long-form command from this tag and its coordinate slice.
    fn unpack(self, coords: &[f64]) -> PathCommand {
        match (self, coords) {
            (PackedCommand::MoveTo, &[x, y]) => PathCommand::MoveTo(x, y),

            (PackedCommand::LineTo, &[x, y]) => PathCommand::LineTo(x, y),

            (PackedCommand::CurveTo, &[x2, y2, x3, y3, x4, y4]) => {
                PathCommand::CurveTo(CubicBezierCurve {
                    pt1: (x2, y2),
                    pt2: (x3, y3),
                    to: (x4, y4),
                })
            }

            (PackedCommand::QuadCurveTo, &[x2, y2, x3, y3]) => {
                PathCommand::QuadCurveTo(QuadraticBezierCurve {
                    pt1: (x2, y2),
                    to: (x3, y3),
                })
            }

            (PackedCommand::ClosePath, &[]) => PathCommand::ClosePath,

            _ => unreachable!("packed command with wrong number of coordinates"),
        }
    }
}

impl PathBuilder {
    /// Parses SVG path data and appends its commands to the builder.
    pub fn parse(&mut self, path_str: &str) -> Result<(), ParseError> {
        let mut parser = PathParser::new(self, path_str);
        parser.parse()
    }

    /// Freezes the accumulated commands into a compact, immutable `Path`.
    pub fn into_path(self) -> Path {
        let total: usize = self.commands.iter().map(PathCommand::coord_count).sum();

        let mut coords = Vec::with_capacity(total);
        let packed: Vec<_> = self
            .commands
            .iter()
            .map(|cmd| cmd.pack(&mut coords))
            .collect();

        Path {
            commands: packed.into_boxed_slice(),
            coords: coords.into_boxed_slice(),
        }
    }

    /// Starts a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo(x, y));
    }

    /// Draws a straight line to `(x, y)`.
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo(x, y));
    }

    /// Draws a cubic Bézier with control points `(x2, y2)`, `(x3, y3)` and
    /// endpoint `(x4, y4)`.
    pub fn curve_to(&mut self, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) {
        let curve = CubicBezierCurve {
            pt1: (x2, y2),
            pt2: (x3, y3),
            to: (x4, y4),
        };
        self.commands.push(PathCommand::CurveTo(curve));
    }

    /// Draws a quadratic Bézier with control point `(x2, y2)` and endpoint
    /// `(x3, y3)`.
    pub fn quadratic_curve_to(&mut self, x2: f64, y2: f64, x3: f64, y3: f64) {
        let curve = QuadraticBezierCurve {
            pt1: (x2, y2),
            to: (x3, y3),
        };
        self.commands.push(PathCommand::QuadCurveTo(curve));
    }

    /// Draws an elliptical arc from `(x1, y1)` to `(x2, y2)` as one or more
    /// cubic Bézier segments.
    ///
    /// Degenerate arcs follow the [conversion rules]: zero radii produce a
    /// straight line, and coincident endpoints produce nothing at all.  The
    /// sweep is split into slices of at most 90 degrees, each approximated by
    /// one cubic segment.
    ///
    /// [conversion rules]: https://www.w3.org/TR/SVG2/implnote.html#ArcImplementationNotes
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        x1: f64,
        y1: f64,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: LargeArc,
        sweep: Sweep,
        x2: f64,
        y2: f64,
    ) {
        let arc = EllipticalArc {
            r: (rx, ry),
            x_axis_rotation,
            large_arc,
            sweep,
            from: (x1, y1),
            to: (x2, y2),
        };

        match arc.center_parameterization() {
            ArcParameterization::CenterParameters {
                center,
                radii,
                theta1,
                delta_theta,
            } => {
                let n = ((delta_theta / FRAC_PI_2).abs().ceil() as u32).max(1);
                let step = delta_theta / f64::from(n);

                let mut theta = theta1;
                for i in 0..n {
                    let mut segment =
                        arc_segment(center, radii, x_axis_rotation, theta, theta + step);

                    // Snap the final segment to the requested endpoint, so that
                    // accumulated rounding cannot leave the path short of it.
                    if i + 1 == n {
                        segment.to = (x2, y2);
                    }

                    let CubicBezierCurve { pt1, pt2, to } = segment;
                    self.curve_to(pt1.0, pt1.1, pt2.0, pt2.1, to.0, to.1);

                    theta += step;
                }
            }

            ArcParameterization::LineTo => {
                self.line_to(x2, y2);
            }

            ArcParameterization::Omit => {}
        }
    }

    /// Closes the current subpath.
    pub fn close_path(&mut self) {
        self.commands.push(PathCommand::ClosePath);
    }
}

impl Path {
    /// Iterates over the path's commands in long form.
    pub fn iter(&self) -> impl Iterator<Item = PathCommand> + '_ {
        let mut coords = &self.coords[..];

        self.commands.iter().map(move |cmd| {
            let (taken, rest) = coords.split_at(cmd.coord_count());
            coords = rest;
            cmd.unpack(taken)
        })
    }

    /// Whether the path contains no commands at all.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
