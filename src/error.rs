//! Error types for loading documents and parsing attribute values.

use std::error;
use std::fmt;
use std::io;

use cssparser::{BasicParseError, BasicParseErrorKind, ParseErrorKind, ToCss};
use markup5ever::QualName;

/// Error from parsing a value out of a `cssparser::Parser`.
///
/// This borrows from the string being parsed, so it cannot outlive the parse.
/// When an error has to be kept around, convert it to the owned
/// [`ElementError`] through [`AttributeResultExt`].
pub type ParseError<'i> = cssparser::ParseError<'i, ValueErrorKind>;

/// What was wrong with an attribute or property value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueErrorKind {
    /// The property name itself is not known.
    UnknownProperty,

    /// The value did not parse.
    Parse(String),

    /// The value parsed, but is not allowed here.
    Value(String),
}

impl ValueErrorKind {
    pub fn parse_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Parse(s.to_string())
    }

    pub fn value_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Value(s.to_string())
    }
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueErrorKind::UnknownProperty => write!(f, "unknown property name"),
            ValueErrorKind::Parse(s) => write!(f, "parse error: {}", s),
            ValueErrorKind::Value(s) => write!(f, "invalid value: {}", s),
        }
    }
}

impl<'a> From<BasicParseError<'a>> for ValueErrorKind {
    fn from(e: BasicParseError<'_>) -> ValueErrorKind {
        ValueErrorKind::parse_error(match e.kind {
            BasicParseErrorKind::UnexpectedToken(_) => "unexpected token",
            BasicParseErrorKind::EndOfInput => "unexpected end of input",
            BasicParseErrorKind::AtRuleInvalid(_) => "invalid @-rule",
            BasicParseErrorKind::AtRuleBodyInvalid => "invalid @-rule body",
            BasicParseErrorKind::QualifiedRuleInvalid => "invalid qualified rule",
        })
    }
}

/// Flattens a borrowing [`ParseError`] into an owned error kind.
///
/// A `ParseError` wraps either a token-level error from cssparser itself or a
/// `ValueErrorKind` raised by one of our value parsers; the latter passes
/// through unchanged.
impl<'i> From<ParseError<'i>> for ValueErrorKind {
    fn from(e: ParseError<'i>) -> ValueErrorKind {
        match e.kind {
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(tok)) => {
                let mut s = String::from("unexpected token '");
                let _ = tok.to_css(&mut s);
                s.push('\'');
                ValueErrorKind::Parse(s)
            }

            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
                ValueErrorKind::parse_error("unexpected end of input")
            }

            // Value parsers never parse CSS rules, so rule-level errors
            // cannot come out of them.
            ParseErrorKind::Basic(_) => {
                unreachable!("got a rule-level error from a value parser")
            }

            ParseErrorKind::Custom(err) => err,
        }
    }
}

/// An attribute name paired with what was wrong with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementError {
    pub attr: QualName,
    pub err: ValueErrorKind,
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.attr.expanded(), self.err)
    }
}

/// Attaches an attribute name to a value-parsing error.
///
/// Value parsers report errors without knowing which attribute they were
/// parsing.  Calling `.attribute(attr)` on their result converts any error
/// into a full [`ElementError`] carrying the attribute's name.
pub trait AttributeResultExt<O> {
    fn attribute(self, attr: QualName) -> Result<O, ElementError>;
}

impl<O, E: Into<ValueErrorKind>> AttributeResultExt<O> for Result<O, E> {
    fn attribute(self, attr: QualName) -> Result<O, ElementError> {
        self.map_err(|e| ElementError {
            attr,
            err: e.into(),
        })
    }
}

/// Errors that abort loading a document.
///
/// These are the unrecoverable cases: malformed XML, a missing `<svg>` root,
/// I/O failures, or an exceeded safety limit.  Merely broken attribute values
/// are not here; SVG wants those ignored, and the loader only logs them
/// (see the `MINISVG_LOG` environment variable).
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum LoadingError {
    /// XML syntax error.
    XmlParseError(String),

    /// The XML parsed, but there is no `<svg>` element at its root.
    NoSvgRoot,

    /// An I/O error happened while reading the document.
    Io(String),

    /// An implementation-defined safety limit was exceeded.
    LimitExceeded(String),

    /// Catch-all for loading errors.
    Other(String),
}

impl error::Error for LoadingError {}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadingError::XmlParseError(s) => write!(f, "XML parse error: {}", s),
            LoadingError::NoSvgRoot => write!(f, "XML does not have <svg> root"),
            LoadingError::Io(s) => write!(f, "I/O error: {}", s),
            LoadingError::LimitExceeded(s) => write!(f, "limit exceeded: {}", s),
            LoadingError::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<io::Error> for LoadingError {
    fn from(e: io::Error) -> LoadingError {
        LoadingError::Io(e.to_string())
    }
}
