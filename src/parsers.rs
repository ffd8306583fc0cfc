//! The `Parse` trait for attribute values, plus small parsing utilities.

use cssparser::{Parser, ParserInput};
use markup5ever::QualName;

use crate::error::*;

/// Types that can be parsed out of a `cssparser::Parser`.
///
/// Attribute and property value types implement this so that they compose;
/// a parser for a compound value calls `parse` on the parsers for its parts.
pub trait Parse: Sized {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Self, ParseError<'i>>;

    /// Parses a complete string as a value.
    ///
    /// Anything left over after the value is an error; an attribute with
    /// trailing garbage is an invalid attribute.
    fn parse_str(s: &str) -> Result<Self, ParseError<'_>> {
        let mut input = ParserInput::new(s);
        let mut parser = Parser::new(&mut input);

        let res = Self::parse(&mut parser)?;
        parser.expect_exhausted()?;

        Ok(res)
    }
}

/// Consumes a comma if there is one, and does nothing otherwise.
pub fn optional_comma<'i, 't>(parser: &mut Parser<'i, 't>) {
    let _ = parser.try_parse(|p| p.expect_comma());
}

/// Parsing an attribute's value, named by the `QualName` receiver.
pub trait ParseValue<T: Parse> {
    /// Parses `value` completely, reporting errors under the attribute's name.
    fn parse(&self, value: &str) -> Result<T, ElementError>;
}

impl<T: Parse> ParseValue<T> for QualName {
    fn parse(&self, value: &str) -> Result<T, ElementError> {
        T::parse_str(value)
            .map_err(ValueErrorKind::from)
            .attribute(self.clone())
    }
}

impl Parse for f64 {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Self, ParseError<'i>> {
        let loc = parser.current_source_location();
        let n = parser.expect_number()?;

        if n.is_finite() {
            Ok(f64::from(n))
        } else {
            Err(loc.new_custom_error(ValueErrorKind::value_error("expected finite number")))
        }
    }
}

/// A fixed-length list of numbers, separated by commas or whitespace.
#[derive(Debug, PartialEq)]
pub struct NumberList(pub Vec<f64>);

impl NumberList {
    /// Parses exactly `length` numbers.  Too few is an error; anything after
    /// the last one is left in the parser.
    pub fn parse<'i>(parser: &mut Parser<'i, '_>, length: usize) -> Result<Self, ParseError<'i>> {
        let mut v = Vec::with_capacity(length);

        for i in 0..length {
            if i != 0 {
                optional_comma(parser);
            }

            v.push(f64::parse(parser)?);
        }

        Ok(NumberList(v))
    }
}

/// Matches a single identifier token against a fixed set of keywords,
/// ASCII-case-insensitively.
///
/// ```ignore
/// let value = parse_identifiers!(
///     parser,
///     "butt" => StrokeLinecap::Butt,
///     "round" => StrokeLinecap::Round,
/// )?;
/// ```
#[macro_export]
macro_rules! parse_identifiers {
    ($parser:expr, $($name:expr => $value:expr,)+) => {{
        let loc = $parser.current_source_location();
        let token = $parser.next()?;

        match token {
            $(cssparser::Token::Ident(ref cow) if cow.eq_ignore_ascii_case($name) => Ok($value),)+

            _ => Err(loc.new_basic_unexpected_token_error(token.clone())),
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers() {
        assert_eq!(f64::parse_str("0").unwrap(), 0.0);
        assert_eq!(f64::parse_str("-1.5").unwrap(), -1.5);
        assert_eq!(f64::parse_str("4e2").unwrap(), 400.0);
    }

    #[test]
    fn invalid_numbers_yield_errors() {
        assert!(f64::parse_str("").is_err());
        assert!(f64::parse_str("foo").is_err());
        assert!(f64::parse_str("1x").is_err());
        assert!(f64::parse_str("1 2").is_err());
    }

    // like the viewBox parser, require the list to consume the whole input
    fn number_list(s: &str, length: usize) -> Result<NumberList, ParseError<'_>> {
        let mut input = ParserInput::new(s);
        let mut parser = Parser::new(&mut input);

        let res = NumberList::parse(&mut parser, length)?;
        parser.expect_exhausted()?;
        Ok(res)
    }

    #[test]
    fn parses_number_list() {
        assert_eq!(number_list("5", 1).unwrap(), NumberList(vec![5.0]));

        assert_eq!(
            number_list("1 2 3 4", 4).unwrap(),
            NumberList(vec![1.0, 2.0, 3.0, 4.0])
        );

        assert_eq!(
            number_list("1, 2, 3.0, 4, 5", 5).unwrap(),
            NumberList(vec![1.0, 2.0, 3.0, 4.0, 5.0])
        );
    }

    #[test]
    fn errors_on_invalid_number_list() {
        // empty
        assert!(number_list("", 1).is_err());

        // garbage
        assert!(number_list("foo", 1).is_err());
        assert!(number_list("1foo", 2).is_err());
        assert!(number_list("1 foo", 2).is_err());
        assert!(number_list("1 foo 2", 2).is_err());
        assert!(number_list("1,foo", 2).is_err());

        // too many
        assert!(number_list("1 2", 1).is_err());

        // extra token
        assert!(number_list("1,", 1).is_err());

        // too few
        assert!(number_list("1", 2).is_err());
        assert!(number_list("1 2", 3).is_err());
    }

    #[test]
    fn attribute_parse_requires_exhausted_input() {
        use markup5ever::{local_name, namespace_url, ns, QualName};

        let attr = QualName::new(None, ns!(), local_name!("width"));
        let res: Result<f64, _> = attr.parse("5");
        assert_eq!(res.unwrap(), 5.0);

        let res: Result<f64, _> = attr.parse("5 6");
        assert!(res.is_err());
    }
}
