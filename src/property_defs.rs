//! Value types for the supported presentation properties.

use cssparser::Parser;

use crate::error::*;
use crate::parsers::Parse;
use crate::{enum_default, parse_identifiers};

/// `fill-rule` property.
///
/// SVG1.1: <https://www.w3.org/TR/SVG11/painting.html#FillRuleProperty>
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

enum_default!(FillRule, FillRule::NonZero);

impl Parse for FillRule {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<FillRule, ParseError<'i>> {
        Ok(parse_identifiers!(
            parser,
            "nonzero" => FillRule::NonZero,
            "evenodd" => FillRule::EvenOdd,
        )?)
    }
}

/// `stroke-linecap` property.
///
/// SVG1.1: <https://www.w3.org/TR/SVG11/painting.html#StrokeLinecapProperty>
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StrokeLinecap {
    Butt,
    Round,
    Square,
}

enum_default!(StrokeLinecap, StrokeLinecap::Butt);

impl Parse for StrokeLinecap {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<StrokeLinecap, ParseError<'i>> {
        Ok(parse_identifiers!(
            parser,
            "butt" => StrokeLinecap::Butt,
            "round" => StrokeLinecap::Round,
            "square" => StrokeLinecap::Square,
        )?)
    }
}

/// `stroke-linejoin` property.
///
/// SVG1.1: <https://www.w3.org/TR/SVG11/painting.html#StrokeLinejoinProperty>
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StrokeLinejoin {
    Miter,
    Round,
    Bevel,
}

enum_default!(StrokeLinejoin, StrokeLinejoin::Miter);

impl Parse for StrokeLinejoin {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<StrokeLinejoin, ParseError<'i>> {
        Ok(parse_identifiers!(
            parser,
            "miter" => StrokeLinejoin::Miter,
            "round" => StrokeLinejoin::Round,
            "bevel" => StrokeLinejoin::Bevel,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fill_rule() {
        assert_eq!(FillRule::parse_str("nonzero").unwrap(), FillRule::NonZero);
        assert_eq!(FillRule::parse_str("evenodd").unwrap(), FillRule::EvenOdd);
        assert!(FillRule::parse_str("winding").is_err());
        assert!(FillRule::parse_str("").is_err());
    }

    #[test]
    fn parses_stroke_linecap() {
        assert_eq!(StrokeLinecap::parse_str("butt").unwrap(), StrokeLinecap::Butt);
        assert_eq!(StrokeLinecap::parse_str("round").unwrap(), StrokeLinecap::Round);
        assert_eq!(StrokeLinecap::parse_str("square").unwrap(), StrokeLinecap::Square);
        assert!(StrokeLinecap::parse_str("caps").is_err());
    }

    #[test]
    fn parses_stroke_linejoin() {
        assert_eq!(StrokeLinejoin::parse_str("miter").unwrap(), StrokeLinejoin::Miter);
        assert_eq!(StrokeLinejoin::parse_str("round").unwrap(), StrokeLinejoin::Round);
        assert_eq!(StrokeLinejoin::parse_str("bevel").unwrap(), StrokeLinejoin::Bevel);
        assert!(StrokeLinejoin::parse_str("joint").is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(FillRule::default(), FillRule::NonZero);
        assert_eq!(StrokeLinecap::default(), StrokeLinecap::Butt);
        assert_eq!(StrokeLinejoin::default(), StrokeLinejoin::Miter);
    }
}
