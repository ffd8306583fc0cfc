//! Storage for an element's attributes.

use std::slice;

use markup5ever::{Attribute, QualName};
use string_cache::DefaultAtom;

/// Interned attribute value.
///
/// The same value strings (`"none"`, `"0"`, and so on) repeat endlessly across
/// an SVG file, so values are interned in a `string_cache` atom table to keep
/// one copy of each.
pub type AttributeValue = DefaultAtom;

/// An element's attribute/value pairs, in document order.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    attrs: Box<[(QualName, AttributeValue)]>,
}

/// Iterator over `(QualName, &str)` pairs from [`Attributes::iter`].
pub struct AttributesIter<'a>(slice::Iter<'a, (QualName, AttributeValue)>);

impl Attributes {
    pub fn iter(&self) -> AttributesIter<'_> {
        AttributesIter(self.attrs.iter())
    }
}

impl From<Vec<Attribute>> for Attributes {
    /// Takes ownership of the attributes emitted by the XML tokenizer.
    fn from(attrs: Vec<Attribute>) -> Attributes {
        let attrs: Vec<_> = attrs
            .into_iter()
            .map(|a| (a.name, AttributeValue::from(&*a.value)))
            .collect();

        Attributes {
            attrs: attrs.into_boxed_slice(),
        }
    }
}

impl<'a> Iterator for AttributesIter<'a> {
    type Item = (QualName, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(a, v)| (a.clone(), v.as_ref()))
    }
}
