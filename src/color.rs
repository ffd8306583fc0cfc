//! Paint values for filling and stroking.

use cssparser::Parser;
use rgb::RGB8;

use crate::error::*;
use crate::parsers::Parse;

/// A parsed `fill` or `stroke` value.
///
/// The color grammar proper (hex colors, `rgb()` with clamping, the named color
/// table, `currentColor`) comes from `cssparser::Color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// `none`; the corresponding fill or stroke is not drawn at all.
    None,

    /// `currentColor`; substituted at render time by the caller's theme color.
    CurrentColor,

    /// A fixed color.
    Color(RGB8),
}

impl Parse for Paint {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Paint, ParseError<'i>> {
        if parser
            .try_parse(|i| i.expect_ident_matching("none"))
            .is_ok()
        {
            Ok(Paint::None)
        } else {
            match cssparser::Color::parse(parser)? {
                cssparser::Color::CurrentColor => Ok(Paint::CurrentColor),

                cssparser::Color::RGBA(rgba) => {
                    Ok(Paint::Color(RGB8::new(rgba.red, rgba.green, rgba.blue)))
                }
            }
        }
    }
}

impl Paint {
    /// Resolves the paint to a concrete color, or `None` when nothing is drawn.
    ///
    /// `currentColor` takes the theme color, or black if the caller did not
    /// supply one.
    pub fn resolve(&self, theme_color: Option<RGB8>) -> Option<RGB8> {
        match *self {
            Paint::None => None,
            Paint::CurrentColor => Some(theme_color.unwrap_or(RGB8::new(0, 0, 0))),
            Paint::Color(c) => Some(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_none() {
        assert_eq!(Paint::parse_str("none").unwrap(), Paint::None);
        assert_eq!(Paint::parse_str("None").unwrap(), Paint::None);
    }

    #[test]
    fn parses_current_color() {
        assert_eq!(Paint::parse_str("currentColor").unwrap(), Paint::CurrentColor);
        assert_eq!(Paint::parse_str("currentcolor").unwrap(), Paint::CurrentColor);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            Paint::parse_str("#fF8800").unwrap(),
            Paint::Color(RGB8::new(255, 136, 0))
        );

        // each shorthand digit doubles up
        assert_eq!(
            Paint::parse_str("#F80").unwrap(),
            Paint::Color(RGB8::new(255, 136, 0))
        );
    }

    #[test]
    fn clamps_rgb_channels() {
        assert_eq!(
            Paint::parse_str("rgb(300, -10, 128)").unwrap(),
            Paint::Color(RGB8::new(255, 0, 128))
        );
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(
            Paint::parse_str("red").unwrap(),
            Paint::Color(RGB8::new(255, 0, 0))
        );
        assert_eq!(
            Paint::parse_str("cornflowerblue").unwrap(),
            Paint::Color(RGB8::new(100, 149, 237))
        );
    }

    #[test]
    fn errors_on_non_colors() {
        assert!(Paint::parse_str("").is_err());
        assert!(Paint::parse_str("inherit").is_err());
        assert!(Paint::parse_str("#xyz").is_err());
        assert!(Paint::parse_str("rgb(1, 2)").is_err());
    }

    #[test]
    fn resolves_to_concrete_colors() {
        assert_eq!(Paint::None.resolve(None), None);

        assert_eq!(Paint::CurrentColor.resolve(None), Some(RGB8::new(0, 0, 0)));
        assert_eq!(
            Paint::CurrentColor.resolve(Some(RGB8::new(10, 20, 30))),
            Some(RGB8::new(10, 20, 30))
        );

        assert_eq!(
            Paint::Color(RGB8::new(1, 2, 3)).resolve(Some(RGB8::new(9, 9, 9))),
            Some(RGB8::new(1, 2, 3))
        );
    }
}
