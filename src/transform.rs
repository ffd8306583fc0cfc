//! Affine transforms and the `transform` attribute.
//!
//! Grammar: <https://www.w3.org/TR/SVG11/coords.html#TransformAttribute>


use cssparser::{Parser, Token};

use crate::error::*;
use crate::parsers::{optional_comma, Parse};

/// A 2D affine transform, in the form
///
/// ```text
/// | xx xy x0 |
/// | yx yy y0 |
/// ```
///
/// which maps a point `(x, y)` to `(xx * x + xy * y + x0, yx * x + yy * y + y0)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Transform {
    #[inline]
    pub fn new(xx: f64, yx: f64, xy: f64, yy: f64, x0: f64, y0: f64) -> Transform {
        Transform {
            xx,
            yx,
            xy,
            yy,
            x0,
            y0,
        }
    }

    #[inline]
    pub fn identity() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn new_translate(tx: f64, ty: f64) -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub fn new_scale(sx: f64, sy: f64) -> Transform {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin by an angle in degrees.
    #[inline]
    pub fn new_rotate(deg: f64) -> Transform {
        let (s, c) = deg.to_radians().sin_cos();
        Transform::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Rotation by an angle in degrees about the point `(cx, cy)`.
    pub fn new_rotate_about(deg: f64, cx: f64, cy: f64) -> Transform {
        let rotation = Transform::new_rotate(deg);

        Transform::new_translate(-cx, -cy)
            .post_transform(&rotation)
            .post_transform(&Transform::new_translate(cx, cy))
    }

    /// Skew along each axis by angles in degrees.
    #[inline]
    pub fn new_skew(ax: f64, ay: f64) -> Transform {
        Transform::new(1.0, ay.to_radians().tan(), ax.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    /// Matrix product; the result applies `t1` to points first, then `t2`.
    #[must_use]
    pub fn multiply(t1: &Transform, t2: &Transform) -> Transform {
        Transform::new(
            t1.xx * t2.xx + t1.yx * t2.xy,
            t1.xx * t2.yx + t1.yx * t2.yy,
            t1.xy * t2.xx + t1.yy * t2.xy,
            t1.xy * t2.yx + t1.yy * t2.yy,
            t1.x0 * t2.xx + t1.y0 * t2.xy + t2.x0,
            t1.x0 * t2.yx + t1.y0 * t2.yy + t2.y0,
        )
    }

    /// Composes `self` with `t` so that `t` applies after `self`.
    #[inline]
    pub fn post_transform(&self, t: &Transform) -> Transform {
        Transform::multiply(self, t)
    }

    #[inline]
    fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// Returns the inverse, or `None` for a transform that collapses space
    /// (zero or non-finite determinant) and cannot be undone.
    #[must_use]
    pub fn invert(&self) -> Option<Transform> {
        let det = self.determinant();

        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let n = 1.0 / det;

        Some(Transform::new(
            n * self.yy,
            -n * self.yx,
            -n * self.xy,
            n * self.xx,
            n * (self.xy * self.y0 - self.yy * self.x0),
            n * (self.yx * self.x0 - self.xx * self.y0),
        ))
    }

    /// Maps a distance vector, ignoring the translation components.
    #[inline]
    pub fn transform_distance(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx * self.xx + dy * self.xy, dx * self.yx + dy * self.yy)
    }

    #[inline]
    pub fn transform_point(&self, px: f64, py: f64) -> (f64, f64) {
        let (x, y) = self.transform_distance(px, py);
        (x + self.x0, y + self.y0)
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::identity()
    }
}

impl Parse for Transform {
    /// Parses a transform list.
    ///
    /// Unlike full SVG, degenerate (non-invertible) matrices are allowed here;
    /// `scale(0)` legitimately collapses a subtree to nothing when rendered.
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Transform, ParseError<'i>> {
        let mut t = Transform::identity();

        while !parser.is_exhausted() {
            t = parse_transform_function(parser)?.post_transform(&t);
            optional_comma(parser);
        }

        Ok(t)
    }
}

// One entry of a transform list, e.g. "scale(2)".  Whitespace is allowed
// before the parenthesis, in which case the name and the argument block
// tokenize separately.
fn parse_transform_function<'i>(parser: &mut Parser<'i, '_>) -> Result<Transform, ParseError<'i>> {
    let loc = parser.current_source_location();

    let name = match parser.next()?.clone() {
        Token::Function(name) => name,

        Token::Ident(name) => {
            parser.expect_parenthesis_block()?;
            name
        }

        tok => return Err(loc.new_unexpected_token_error(tok)),
    };

    match name.as_ref() {
        "matrix" => parser.parse_nested_block(matrix_args),

        "translate" => parser.parse_nested_block(|p| {
            let (tx, ty) = one_or_two_numbers(p)?;
            Ok(Transform::new_translate(tx, ty.unwrap_or(0.0)))
        }),

        "scale" => parser.parse_nested_block(|p| {
            let (sx, sy) = one_or_two_numbers(p)?;
            Ok(Transform::new_scale(sx, sy.unwrap_or(sx)))
        }),

        "rotate" => parser.parse_nested_block(|p| {
            let angle = f64::parse(p)?;

            let (cx, cy) = p
                .try_parse(|p| -> Result<_, ParseError<'_>> {
                    optional_comma(p);
                    let cx = f64::parse(p)?;

                    optional_comma(p);
                    let cy = f64::parse(p)?;

                    Ok((cx, cy))
                })
                .unwrap_or((0.0, 0.0));

            Ok(Transform::new_rotate_about(angle, cx, cy))
        }),

        "skewX" => parser.parse_nested_block(|p| Ok(Transform::new_skew(f64::parse(p)?, 0.0))),

        "skewY" => parser.parse_nested_block(|p| Ok(Transform::new_skew(0.0, f64::parse(p)?))),

        _ => Err(loc.new_custom_error(ValueErrorKind::parse_error(
            "expected matrix|translate|scale|rotate|skewX|skewY",
        ))),
    }
}

fn matrix_args<'i>(p: &mut Parser<'i, '_>) -> Result<Transform, ParseError<'i>> {
    let mut m = [0.0; 6];

    for (i, v) in m.iter_mut().enumerate() {
        if i > 0 {
            optional_comma(p);
        }

        *v = f64::parse(p)?;
    }

    let [xx, yx, xy, yy, x0, y0] = m;
    Ok(Transform::new(xx, yx, xy, yy, x0, y0))
}

// translate and scale take either one or two arguments
fn one_or_two_numbers<'i>(p: &mut Parser<'i, '_>) -> Result<(f64, Option<f64>), ParseError<'i>> {
    let first = f64::parse(p)?;

    let second = p
        .try_parse(|p| {
            optional_comma(p);
            f64::parse(p)
        })
        .ok();

    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn parsed(s: &str) -> Transform {
        Transform::parse_str(s).unwrap()
    }

    // Absolute tolerance; the matrix entries in these tests stay well under
    // 1e3, so this still catches any real mistake.
    fn assert_approx(t: &Transform, expected: &Transform) {
        for (a, b) in [
            (t.xx, expected.xx),
            (t.yx, expected.yx),
            (t.xy, expected.xy),
            (t.yy, expected.yy),
            (t.x0, expected.x0),
            (t.y0, expected.y0),
        ] {
            assert!(
                approx_eq!(f64, a, b, epsilon = 1e-9),
                "{:?} differs from {:?}",
                t,
                expected
            );
        }
    }

    #[test]
    fn identity_is_the_default() {
        assert_eq!(Transform::default(), Transform::identity());
        assert_eq!(Transform::identity().transform_point(3.0, -4.0), (3.0, -4.0));
    }

    #[test]
    fn multiplies_left_to_right() {
        let translate = Transform::new_translate(10.0, 0.0);
        let scale = Transform::new_scale(2.0, 2.0);

        // translate first, scale second
        let t = Transform::multiply(&translate, &scale);
        assert_eq!(t.transform_point(5.0, 3.0), (30.0, 6.0));

        // the other way around
        let t = Transform::multiply(&scale, &translate);
        assert_eq!(t.transform_point(5.0, 3.0), (20.0, 6.0));
    }

    #[test]
    fn multiplication_is_associative() {
        let a = Transform::new_translate(20.0, 30.0);
        let b = Transform::new_scale(10.0, 10.0);
        let c = Transform::new_rotate_about(30.0, 10.0, 10.0);

        assert_approx(
            &Transform::multiply(&Transform::multiply(&a, &b), &c),
            &Transform::multiply(&a, &Transform::multiply(&b, &c)),
        );
    }

    #[test]
    fn inverts_invertible_transforms() {
        let t = Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let inverse = t.invert().unwrap();

        assert_approx(&Transform::multiply(&t, &inverse), &Transform::identity());
        assert_approx(&Transform::multiply(&inverse, &t), &Transform::identity());
    }

    #[test]
    fn collapsing_transforms_have_no_inverse() {
        assert!(Transform::new(2.0, 0.0, 0.0, 0.0, 0.0, 0.0).invert().is_none());
        assert!(Transform::new_scale(0.0, 0.0).invert().is_none());
        assert!(Transform::new(f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0)
            .invert()
            .is_none());
    }

    #[test]
    fn maps_points_and_distances() {
        let t = Transform::new(2.0, 0.0, 0.0, 1.0, 10.0, 10.0);

        assert_eq!(t.transform_point(1.0, 1.0), (12.0, 11.0));
        // distances ignore the translation
        assert_eq!(t.transform_distance(1.0, 1.0), (2.0, 1.0));
    }

    #[test]
    fn parses_an_empty_list_as_identity() {
        assert_eq!(parsed(""), Transform::identity());
    }

    #[test]
    fn parses_matrix() {
        let m = Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);

        assert_eq!(parsed("matrix (1 2 3 4 5 6)"), m);
        assert_eq!(parsed("matrix(1,2,3,4 5 6)"), m);
        assert_eq!(
            parsed("matrix (1,2.25,-3.25e2,4 5 6)"),
            Transform::new(1.0, 2.25, -325.0, 4.0, 5.0, 6.0)
        );
    }

    #[test]
    fn parses_translate() {
        assert_eq!(parsed("translate(-1 -2)"), Transform::new_translate(-1.0, -2.0));
        assert_eq!(parsed("translate(-1, -2)"), Transform::new_translate(-1.0, -2.0));

        // a single argument translates along x only
        assert_eq!(parsed("translate(-1)"), Transform::new_translate(-1.0, 0.0));
    }

    #[test]
    fn parses_scale() {
        assert_eq!(parsed("scale(-1 -2)"), Transform::new_scale(-1.0, -2.0));
        assert_eq!(parsed("scale(-1, -2)"), Transform::new_scale(-1.0, -2.0));

        // a single argument scales both axes
        assert_eq!(parsed("scale (-1)"), Transform::new_scale(-1.0, -1.0));
    }

    #[test]
    fn parses_rotate() {
        assert_approx(&parsed("rotate (30)"), &Transform::new_rotate(30.0));
        assert_approx(
            &parsed("rotate (30,-1,-2)"),
            &Transform::new_rotate_about(30.0, -1.0, -2.0),
        );
        assert_approx(
            &parsed("rotate(30, -1, -2)"),
            &Transform::new_rotate_about(30.0, -1.0, -2.0),
        );
    }

    #[test]
    fn parses_skews() {
        assert_approx(&parsed("skewX (30)"), &Transform::new_skew(30.0, 0.0));
        assert_approx(&parsed("skewY (30)"), &Transform::new_skew(0.0, 30.0));
    }

    // Later entries in a list nest inside earlier ones, so they apply to
    // points first.
    #[test]
    fn parses_transform_lists() {
        let translate = Transform::new_translate(20.0, 30.0);
        let scale = Transform::new_scale(10.0, 10.0);
        let rotate = Transform::new_rotate_about(30.0, 10.0, 10.0);

        assert_approx(
            &parsed("scale(10)rotate(30, 10, 10)"),
            &Transform::multiply(&rotate, &scale),
        );

        assert_approx(
            &parsed("translate(20, 30), scale (10)"),
            &Transform::multiply(&scale, &translate),
        );

        assert_approx(
            &parsed("translate(20, 30), scale (10) rotate (30 10 10)"),
            &Transform::multiply(&rotate, &Transform::multiply(&scale, &translate)),
        );
    }

    #[test]
    fn transform_list_maps_points() {
        let t = parsed("translate(10, 0) scale(2)");
        let (x, y) = t.transform_point(5.0, 3.0);
        assert!(approx_eq!(f64, x, 20.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, y, 6.0, epsilon = 1e-9));

        let t = parsed("rotate(90, 50, 50)");
        let (x, y) = t.transform_point(50.0, 0.0);
        assert!(approx_eq!(f64, x, 100.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, y, 50.0, epsilon = 1e-9));
    }

    #[test]
    fn accepts_collapsing_transforms() {
        // scale(0) legitimately maps everything to one point
        let zero = Transform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

        assert_eq!(parsed("matrix (0 0 0 0 0 0)"), zero);
        assert_eq!(parsed("scale (0), translate (10, 10)"), zero);
    }

    #[test]
    fn rejects_broken_syntax() {
        for s in [
            "foo",
            "foo (1)",
            "matrix (1 2 3 4 5)",
            "translate(1 2 3 4 5)",
            "translate (1,)",
            "scale (1,)",
            "rotate (30, 1)",
            "skewX (1,2)",
            "skewY ()",
            "skewY",
        ] {
            assert!(Transform::parse_str(s).is_err(), "{:?} should not parse", s);
        }
    }
}
