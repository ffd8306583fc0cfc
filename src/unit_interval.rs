//! Opacity-style values, clamped to the [0.0, 1.0] range.

use cssparser::Parser;

use crate::error::*;
use crate::parsers::Parse;
use crate::util;

/// A number known to lie in [0.0, 1.0].
///
/// The opacity properties all parse into this; out-of-range input is legal
/// SVG and clamps instead of erroring.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct UnitInterval(pub f64);

impl UnitInterval {
    pub fn clamp(x: f64) -> UnitInterval {
        UnitInterval(util::clamp(x, 0.0, 1.0))
    }
}

impl Parse for UnitInterval {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<UnitInterval, ParseError<'i>> {
        Ok(UnitInterval::clamp(f64::parse(parser)?))
    }
}

/// Maps the interval onto a byte, so `1.0` is exactly `255`.
impl From<UnitInterval> for u8 {
    fn from(UnitInterval(x): UnitInterval) -> u8 {
        (x * 255.0 + 0.5).floor() as u8
    }
}
