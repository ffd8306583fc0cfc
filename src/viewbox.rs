//! The `viewBox` attribute and its parser.

use cssparser::Parser;
use std::ops::Deref;

use crate::error::*;
use crate::parsers::{NumberList, Parse};
use crate::rect::Rect;

/// The `viewBox` rectangle: `x y width height`, with optional commas.
///
/// This is the coordinate region a document's geometry is expressed in; the
/// renderer maps it onto the caller's viewport.  Negative sizes are a parse
/// error, but zero sizes are valid and simply mean there is nothing to map.
///
/// Derefs to [`Rect`] for read access.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewBox(Rect);

impl Deref for ViewBox {
    type Target = Rect;

    fn deref(&self) -> &Rect {
        &self.0
    }
}

impl From<Rect> for ViewBox {
    fn from(r: Rect) -> ViewBox {
        ViewBox(r)
    }
}

impl Parse for ViewBox {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<ViewBox, ParseError<'i>> {
        let loc = parser.current_source_location();

        let NumberList(v) = NumberList::parse(parser, 4)?;

        if v[2] < 0.0 || v[3] < 0.0 {
            return Err(loc.new_custom_error(ValueErrorKind::value_error(
                "width and height must not be negative",
            )));
        }

        Ok(ViewBox(Rect::new(v[0], v[1], v[0] + v[2], v[1] + v[3])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_spaces_or_commas() {
        assert_eq!(
            ViewBox::parse_str("0 0 24 24"),
            Ok(ViewBox(Rect::from_size(24.0, 24.0)))
        );

        assert_eq!(
            ViewBox::parse_str(" -1.5,-25, 32.5 , 16 "),
            Ok(ViewBox(Rect::new(-1.5, -25.0, 31.0, -9.0)))
        );

        assert_eq!(
            ViewBox::parse_str("0 0 5e1 25e-2"),
            Ok(ViewBox(Rect::new(0.0, 0.0, 50.0, 0.25)))
        );
    }

    #[test]
    fn zero_size_is_allowed() {
        assert_eq!(
            ViewBox::parse_str("0 0 0 0"),
            Ok(ViewBox(Rect::from_size(0.0, 0.0)))
        );
    }

    #[test]
    fn rejects_bad_input() {
        // wrong arity
        assert!(ViewBox::parse_str("").is_err());
        assert!(ViewBox::parse_str("0 0 10").is_err());
        assert!(ViewBox::parse_str("0 0 10 10 10").is_err());

        // not numbers
        assert!(ViewBox::parse_str("a b c d").is_err());
        assert!(ViewBox::parse_str("0 0 wide tall").is_err());

        // negative sizes
        assert!(ViewBox::parse_str("0 0 -10 10").is_err());
        assert!(ViewBox::parse_str("0 0 10 -10").is_err());

        // overflows the number token
        assert!(ViewBox::parse_str("0 0 9E80.7").is_err());
    }
}
