//! Reads XML into a tree of elements.
//!
//! This is the ingestion boundary: the only place where raw markup is
//! consumed.  The reader produces a plain [`Element`] tree with namespaces
//! left unresolved; turning that tree into a scene is the job of
//! [`Document::build`].
//!
//! [`Document::build`]: crate::document::Document::build

use std::cell::RefCell;
use std::rc::Rc;

use markup5ever::{buffer_queue::BufferQueue, QualName};
use xml5ever::tendril::StrTendril;
use xml5ever::tokenizer::{TagKind, Token, TokenSink, XmlTokenizer, XmlTokenizerOpts};

use crate::error::LoadingError;
use crate::limits;
use crate::session::Session;
use crate::svg_log;

mod attributes;

pub use attributes::Attributes;

/// One XML element with its attributes and child elements.
///
/// Character data, comments, and processing instructions are discarded at
/// read time; nothing in the rendering model uses them.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: QualName,
    pub attributes: Attributes,
    pub children: Vec<Element>,
}

/// Reads a whole XML document into its root element.
///
/// Any markup error is fatal here, matching the strictness of a conforming
/// XML processor; the lenient, drop-what-you-cannot-use behavior only starts
/// once the markup itself is well-formed.
pub fn read_element_tree(session: &Session, input: &str) -> Result<Element, LoadingError> {
    let data = Rc::new(RefCell::new(XmlTreeData::default()));

    let mut queue = BufferQueue::new();
    queue.push_back(StrTendril::from(input));

    let sink = ElementTreeSink(data.clone());

    let mut tokenizer = XmlTokenizer::new(sink, XmlTokenizerOpts::default());
    tokenizer.run(&mut queue);
    tokenizer.end();

    let mut data = data.borrow_mut();

    if let Some(e) = data.error.take() {
        svg_log!(session, "XML error: {}", e);
        return Err(e);
    }

    if !data.stack.is_empty() {
        return Err(LoadingError::XmlParseError(String::from(
            "unexpected end of document, elements are still open",
        )));
    }

    data.root
        .take()
        .ok_or_else(|| LoadingError::XmlParseError(String::from("document has no elements")))
}

/// Holding space for the tree while the tokenizer pushes tokens at us.
#[derive(Default)]
struct XmlTreeData {
    /// Elements whose closing tag has not been seen yet, outermost first.
    stack: Vec<Element>,
    root: Option<Element>,
    num_loaded_elements: usize,
    error: Option<LoadingError>,
}

impl XmlTreeData {
    // The first error wins; everything after it is ignored so that the
    // tokenizer can drain the rest of its input without side effects.
    fn fatal(&mut self, e: LoadingError) {
        if self.error.is_none() {
            self.error = Some(e);
        }
    }

    fn start_element(&mut self, name: QualName, attributes: Attributes) {
        if self.error.is_some() {
            return;
        }

        if self.root.is_some() && self.stack.is_empty() {
            return self.fatal(LoadingError::XmlParseError(String::from(
                "extra content at the end of the document",
            )));
        }

        self.num_loaded_elements += 1;
        if self.num_loaded_elements > limits::MAX_LOADED_ELEMENTS {
            return self.fatal(LoadingError::LimitExceeded(String::from(
                "too many loaded elements",
            )));
        }

        if self.stack.len() >= limits::MAX_XML_DEPTH {
            return self.fatal(LoadingError::LimitExceeded(String::from(
                "XML nesting is too deep",
            )));
        }

        self.stack.push(Element {
            name,
            attributes,
            children: Vec::new(),
        });
    }

    fn end_element(&mut self, name: &QualName) {
        if self.error.is_some() {
            return;
        }

        match self.stack.pop() {
            Some(element) if element.name == *name => self.finish_element(element),

            Some(element) => self.fatal(LoadingError::XmlParseError(format!(
                "closing tag mismatch, expected </{}>",
                element.name.local
            ))),

            None => self.fatal(LoadingError::XmlParseError(format!(
                "unexpected closing tag </{}>",
                name.local
            ))),
        }
    }

    /// Handles `</>`, which closes the innermost open element.
    fn close_innermost_element(&mut self) {
        if self.error.is_some() {
            return;
        }

        match self.stack.pop() {
            Some(element) => self.finish_element(element),
            None => self.fatal(LoadingError::XmlParseError(String::from(
                "unexpected closing tag",
            ))),
        }
    }

    fn finish_element(&mut self, element: Element) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.root = Some(element),
        }
    }
}

struct ElementTreeSink(Rc<RefCell<XmlTreeData>>);

impl TokenSink for ElementTreeSink {
    fn process_token(&mut self, token: Token) {
        let mut data = self.0.borrow_mut();

        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => data.start_element(tag.name, Attributes::from(tag.attrs)),

                TagKind::EndTag => data.end_element(&tag.name),

                TagKind::EmptyTag => {
                    let name = tag.name.clone();
                    data.start_element(tag.name, Attributes::from(tag.attrs));
                    data.end_element(&name);
                }

                TagKind::ShortTag => data.close_innermost_element(),
            },

            Token::ParseError(e) => data.fatal(LoadingError::XmlParseError(e.to_string())),

            Token::DoctypeToken(_) => data.fatal(LoadingError::XmlParseError(String::from(
                "DTDs are not supported",
            ))),

            _ => (),
        }
    }
}
