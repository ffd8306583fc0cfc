//! Presentation properties and the style cascade.
//!
//! An element's style arrives in two forms: individual presentation
//! attributes (`fill="black"`) and declarations inside the inline `style`
//! attribute (`style="fill: black"`).  Both name the same property set, and a
//! `style` declaration wins over the attribute form.  [`StyleProps`] records
//! which properties an element actually set; resolving it against the
//! parent's [`ComputedStyle`] yields the effective style used for rendering.

use cssparser::{
    match_ignore_ascii_case, parse_important, AtRuleParser, CowRcStr, DeclarationListParser,
    DeclarationParser, Parser, ParserInput, _cssparser_internal_to_lowercase,
};
use markup5ever::{expanded_name, local_name, namespace_url, ns, QualName};

use crate::color::Paint;
use crate::error::*;
use crate::parsers::{Parse, ParseValue};
use crate::property_defs::{FillRule, StrokeLinecap, StrokeLinejoin};
use crate::session::Session;
use crate::svg_log;
use crate::unit_interval::UnitInterval;

/// The properties explicitly set on one element.
///
/// `None` fields are unset and fall back to the parent element's value when
/// the style is resolved.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StyleProps {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub fill_opacity: Option<UnitInterval>,
    pub stroke_opacity: Option<UnitInterval>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<UnitInterval>,
    pub fill_rule: Option<FillRule>,
    pub stroke_line_cap: Option<StrokeLinecap>,
    pub stroke_line_join: Option<StrokeLinejoin>,
}

/// The effective style for one element, with every property resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub fill: Paint,
    pub stroke: Paint,
    pub fill_opacity: UnitInterval,
    pub stroke_opacity: UnitInterval,
    pub stroke_width: f64,
    pub opacity: UnitInterval,
    pub fill_rule: FillRule,
    pub stroke_line_cap: StrokeLinecap,
    pub stroke_line_join: StrokeLinejoin,
}

impl Default for ComputedStyle {
    /// The style at the root of the cascade: filled with the theme color
    /// (black when the caller provides none), no stroke, everything opaque.
    fn default() -> ComputedStyle {
        ComputedStyle {
            fill: Paint::CurrentColor,
            stroke: Paint::None,
            fill_opacity: UnitInterval(1.0),
            stroke_opacity: UnitInterval(1.0),
            stroke_width: 1.0,
            opacity: UnitInterval(1.0),
            fill_rule: FillRule::NonZero,
            stroke_line_cap: StrokeLinecap::Butt,
            stroke_line_join: StrokeLinejoin::Miter,
        }
    }
}

impl StyleProps {
    /// Sets one property from a presentation attribute, if `attr` names one.
    ///
    /// Attributes this type does not know about are ignored, as are values
    /// that fail to parse; an element with `stroke-width="banana"` simply
    /// inherits its stroke width.
    pub fn parse_presentation_attribute(
        &mut self,
        session: &Session,
        attr: &QualName,
        value: &str,
    ) {
        // The CSS-wide `inherit` keyword means "take the parent's value",
        // which is exactly what an unset property does.
        if value.trim().eq_ignore_ascii_case("inherit") {
            return;
        }

        match attr.expanded() {
            expanded_name!("", "fill") => set_or_log(&mut self.fill, session, attr, value),
            expanded_name!("", "stroke") => set_or_log(&mut self.stroke, session, attr, value),

            expanded_name!("", "fill-opacity") => {
                set_or_log(&mut self.fill_opacity, session, attr, value)
            }

            expanded_name!("", "stroke-opacity") => {
                set_or_log(&mut self.stroke_opacity, session, attr, value)
            }

            expanded_name!("", "stroke-width") => {
                set_or_log(&mut self.stroke_width, session, attr, value)
            }

            expanded_name!("", "opacity") => set_or_log(&mut self.opacity, session, attr, value),

            expanded_name!("", "fill-rule") => {
                set_or_log(&mut self.fill_rule, session, attr, value)
            }

            expanded_name!("", "stroke-linecap") => {
                set_or_log(&mut self.stroke_line_cap, session, attr, value)
            }

            expanded_name!("", "stroke-linejoin") => {
                set_or_log(&mut self.stroke_line_join, session, attr, value)
            }

            _ => (),
        }
    }

    /// Applies one declaration parsed out of a `style` attribute.
    ///
    /// Visibility is tracked on the node itself, not in the style record, so
    /// [`ParsedProperty::Display`] is left for the scene builder to pick up.
    pub fn set_parsed_property(&mut self, prop: &ParsedProperty) {
        use ParsedProperty::*;

        match *prop {
            Fill(v) => self.fill = v,
            Stroke(v) => self.stroke = v,
            FillOpacity(v) => self.fill_opacity = v,
            StrokeOpacity(v) => self.stroke_opacity = v,
            StrokeWidth(v) => self.stroke_width = v,
            Opacity(v) => self.opacity = v,
            FillRule(v) => self.fill_rule = v,
            StrokeLinecap(v) => self.stroke_line_cap = v,
            StrokeLinejoin(v) => self.stroke_line_join = v,

            Display(_) => (),
        }
    }

    /// Resolves unset properties from the parent's computed style.
    ///
    /// Chaining this from [`ComputedStyle::default`] down the tree leaves no
    /// property unset at any node.
    pub fn resolve(&self, parent: &ComputedStyle) -> ComputedStyle {
        ComputedStyle {
            fill: self.fill.unwrap_or(parent.fill),
            stroke: self.stroke.unwrap_or(parent.stroke),
            fill_opacity: self.fill_opacity.unwrap_or(parent.fill_opacity),
            stroke_opacity: self.stroke_opacity.unwrap_or(parent.stroke_opacity),
            stroke_width: self.stroke_width.unwrap_or(parent.stroke_width),
            opacity: self.opacity.unwrap_or(parent.opacity),
            fill_rule: self.fill_rule.unwrap_or(parent.fill_rule),
            stroke_line_cap: self.stroke_line_cap.unwrap_or(parent.stroke_line_cap),
            stroke_line_join: self.stroke_line_join.unwrap_or(parent.stroke_line_join),
        }
    }
}

fn set_or_log<T: Parse>(field: &mut Option<T>, session: &Session, attr: &QualName, value: &str) {
    match attr.parse(value) {
        Ok(v) => *field = Some(v),
        Err(e) => svg_log!(session, "ignoring attribute with invalid value: {}", e),
    }
}

/// Tells whether a raw `display` attribute value hides the element.
///
/// Unlike the CSS-parsed properties this is a plain string comparison; any
/// value other than `none`, valid or not, leaves the element displayed.
pub fn display_attribute_hides(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("none")
}

/// One declaration parsed out of a `style` attribute.
///
/// A `None` payload comes from an explicit `inherit` value; assigning it
/// clears the property back to the unset state even if a presentation
/// attribute had set it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedProperty {
    Fill(Option<Paint>),
    Stroke(Option<Paint>),
    FillOpacity(Option<UnitInterval>),
    StrokeOpacity(Option<UnitInterval>),
    StrokeWidth(Option<f64>),
    Opacity(Option<UnitInterval>),
    FillRule(Option<FillRule>),
    StrokeLinecap(Option<StrokeLinecap>),
    StrokeLinejoin(Option<StrokeLinejoin>),

    /// Whether the element is displayed at all; `display: none` yields
    /// `Display(false)`.
    Display(bool),
}

/// Parses the declarations in a `style` attribute value.
///
/// Declarations with unknown property names or unparseable values are
/// skipped and do not invalidate the ones around them.
pub fn parse_style_attribute(value: &str) -> Vec<ParsedProperty> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);

    DeclarationListParser::new(&mut parser, DeclParser)
        .filter_map(Result::ok) // ignore invalid property names or values
        .collect()
}

/// Dummy struct required to use `cssparser::DeclarationListParser`
///
/// It implements `cssparser::DeclarationParser`, which knows how to parse
/// the property/value pairs from a CSS declaration.
struct DeclParser;

impl<'i> DeclarationParser<'i> for DeclParser {
    type Declaration = ParsedProperty;
    type Error = ValueErrorKind;

    /// Parses a CSS declaration like `name: value`
    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<ParsedProperty, ParseError<'i>> {
        let prop = parse_declaration_value(&name, input)?;

        // There is only a single level of style, so `!important` changes
        // nothing, but it should not make a declaration invalid either.
        let _ = input.try_parse(parse_important);

        input.expect_exhausted()?;

        Ok(prop)
    }
}

// cssparser's DeclarationListParser requires this; we just use the dummy
// implementations from cssparser itself.
impl<'i> AtRuleParser<'i> for DeclParser {
    type Prelude = ();
    type AtRule = ParsedProperty;
    type Error = ValueErrorKind;
}

fn parse_declaration_value<'i>(
    name: &str,
    input: &mut Parser<'i, '_>,
) -> Result<ParsedProperty, ParseError<'i>> {
    match_ignore_ascii_case! { name,
        "fill" => parse_inherit(input).map(ParsedProperty::Fill),
        "stroke" => parse_inherit(input).map(ParsedProperty::Stroke),
        "fill-opacity" => parse_inherit(input).map(ParsedProperty::FillOpacity),
        "stroke-opacity" => parse_inherit(input).map(ParsedProperty::StrokeOpacity),
        "stroke-width" => parse_inherit(input).map(ParsedProperty::StrokeWidth),
        "opacity" => parse_inherit(input).map(ParsedProperty::Opacity),
        "fill-rule" => parse_inherit(input).map(ParsedProperty::FillRule),
        "stroke-linecap" => parse_inherit(input).map(ParsedProperty::StrokeLinecap),
        "stroke-linejoin" => parse_inherit(input).map(ParsedProperty::StrokeLinejoin),

        "display" => {
            // Only `display: none` hides an element; every other value,
            // known or not, leaves it displayed.
            let ident = input.expect_ident_cloned()?;
            Ok(ParsedProperty::Display(!ident.eq_ignore_ascii_case("none")))
        },

        _ => Err(input.new_custom_error(ValueErrorKind::UnknownProperty)),
    }
}

// Parses the value for the type `T` of the property, with the CSS-wide
// `inherit` keyword mapping to the unset state so that the cascade takes
// over.
fn parse_inherit<'i, T: Parse>(input: &mut Parser<'i, '_>) -> Result<Option<T>, ParseError<'i>> {
    if input
        .try_parse(|p| p.expect_ident_matching("inherit"))
        .is_ok()
    {
        Ok(None)
    } else {
        Parse::parse(input).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn attr(name: &str) -> QualName {
        QualName::new(None, ns!(), markup5ever::LocalName::from(name))
    }

    fn props_from_attrs(pairs: &[(&str, &str)]) -> StyleProps {
        let session = Session::new();
        let mut props = StyleProps::default();

        for (name, value) in pairs {
            props.parse_presentation_attribute(&session, &attr(name), value);
        }

        props
    }

    #[test]
    fn parses_presentation_attributes() {
        let props = props_from_attrs(&[
            ("fill", "red"),
            ("stroke", "none"),
            ("fill-opacity", "0.5"),
            ("stroke-width", "4"),
            ("fill-rule", "evenodd"),
            ("stroke-linecap", "round"),
            ("stroke-linejoin", "bevel"),
        ]);

        assert_eq!(props.fill, Some(Paint::Color(RGB8::new(255, 0, 0))));
        assert_eq!(props.stroke, Some(Paint::None));
        assert_eq!(props.fill_opacity, Some(UnitInterval(0.5)));
        assert_eq!(props.stroke_width, Some(4.0));
        assert_eq!(props.fill_rule, Some(FillRule::EvenOdd));
        assert_eq!(props.stroke_line_cap, Some(StrokeLinecap::Round));
        assert_eq!(props.stroke_line_join, Some(StrokeLinejoin::Bevel));
        assert_eq!(props.opacity, None);
    }

    #[test]
    fn invalid_attribute_value_stays_unset() {
        let props = props_from_attrs(&[
            ("fill", "notacolor"),
            ("stroke-width", "banana"),
            ("fill-rule", "winding"),
        ]);

        assert_eq!(props, StyleProps::default());
    }

    #[test]
    fn inherit_attribute_value_stays_unset() {
        let props = props_from_attrs(&[("fill", "inherit"), ("opacity", " INHERIT ")]);

        assert_eq!(props, StyleProps::default());
    }

    #[test]
    fn unknown_attribute_is_ignored() {
        let props = props_from_attrs(&[("visibility", "hidden"), ("stroke", "blue")]);

        assert_eq!(props.stroke, Some(Paint::Color(RGB8::new(0, 0, 255))));
        assert_eq!(props.fill, None);
    }

    #[test]
    fn parses_style_declarations() {
        let decls = parse_style_attribute("fill: lime; stroke-width: 4");

        assert_eq!(
            decls,
            vec![
                ParsedProperty::Fill(Some(Paint::Color(RGB8::new(0, 255, 0)))),
                ParsedProperty::StrokeWidth(Some(4.0)),
            ]
        );
    }

    #[test]
    fn invalid_declarations_do_not_affect_others() {
        let decls = parse_style_attribute("fill: ; stroke: blue; stroke-width: 1 2; color: red");

        assert_eq!(
            decls,
            vec![ParsedProperty::Stroke(Some(Paint::Color(RGB8::new(
                0, 0, 255
            ))))]
        );
    }

    #[test]
    fn important_is_tolerated() {
        let decls = parse_style_attribute("fill: red !important");

        assert_eq!(
            decls,
            vec![ParsedProperty::Fill(Some(Paint::Color(RGB8::new(
                255, 0, 0
            ))))]
        );
    }

    #[test]
    fn style_declaration_overrides_attribute() {
        let session = Session::new();
        let mut props = StyleProps::default();

        props.parse_presentation_attribute(&session, &attr("fill"), "red");
        for decl in parse_style_attribute("fill: blue") {
            props.set_parsed_property(&decl);
        }

        assert_eq!(props.fill, Some(Paint::Color(RGB8::new(0, 0, 255))));
    }

    #[test]
    fn style_inherit_clears_attribute_value() {
        let session = Session::new();
        let mut props = StyleProps::default();

        props.parse_presentation_attribute(&session, &attr("fill"), "red");
        for decl in parse_style_attribute("fill: inherit") {
            props.set_parsed_property(&decl);
        }

        assert_eq!(props.fill, None);
    }

    #[test]
    fn display_none_detection() {
        assert_eq!(
            parse_style_attribute("display: none"),
            vec![ParsedProperty::Display(false)]
        );
        assert_eq!(
            parse_style_attribute("display : NONE ;"),
            vec![ParsedProperty::Display(false)]
        );
        assert_eq!(
            parse_style_attribute("display: inline"),
            vec![ParsedProperty::Display(true)]
        );

        // a display value that is not an identifier is just dropped
        assert_eq!(parse_style_attribute("display: 5px"), vec![]);

        assert!(display_attribute_hides("none"));
        assert!(display_attribute_hides(" None "));
        assert!(!display_attribute_hides("inline"));
        assert!(!display_attribute_hides(""));
    }

    #[test]
    fn resolves_against_parent() {
        let parent = StyleProps {
            fill: Some(Paint::Color(RGB8::new(1, 2, 3))),
            opacity: Some(UnitInterval(0.5)),
            ..Default::default()
        }
        .resolve(&ComputedStyle::default());

        let child = StyleProps {
            fill: Some(Paint::None),
            stroke_width: Some(2.0),
            ..Default::default()
        }
        .resolve(&parent);

        // own values win
        assert_eq!(child.fill, Paint::None);
        assert_eq!(child.stroke_width, 2.0);

        // unset values come from the parent chain
        assert_eq!(child.opacity, UnitInterval(0.5));
        assert_eq!(child.stroke, Paint::None);
        assert_eq!(child.fill_rule, FillRule::NonZero);
    }

    #[test]
    fn empty_style_resolves_to_parent() {
        let parent = StyleProps {
            stroke: Some(Paint::Color(RGB8::new(9, 9, 9))),
            stroke_line_join: Some(StrokeLinejoin::Round),
            ..Default::default()
        }
        .resolve(&ComputedStyle::default());

        assert_eq!(StyleProps::default().resolve(&parent), parent);
    }

    #[test]
    fn root_defaults() {
        let computed = StyleProps::default().resolve(&ComputedStyle::default());

        assert_eq!(computed.fill, Paint::CurrentColor);
        assert_eq!(computed.stroke, Paint::None);
        assert_eq!(computed.fill_opacity, UnitInterval(1.0));
        assert_eq!(computed.stroke_opacity, UnitInterval(1.0));
        assert_eq!(computed.stroke_width, 1.0);
        assert_eq!(computed.opacity, UnitInterval(1.0));
        assert_eq!(computed.fill_rule, FillRule::NonZero);
        assert_eq!(computed.stroke_line_cap, StrokeLinecap::Butt);
        assert_eq!(computed.stroke_line_join, StrokeLinejoin::Miter);
    }
}
