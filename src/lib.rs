//! Load small SVG images and render them through an abstract drawing surface.
//!
//! This crate reads a constrained subset of SVG, the kind used for icons and
//! other small artwork: the basic shapes (`path`, `rect`, `circle`, `ellipse`,
//! `line`, `polyline`, `polygon`), `g` groups, `transform` lists, and solid
//! fills and strokes with a handful of styling properties.  There is no
//! rasterizer in here; rendering emits fill and stroke operations onto a
//! caller-supplied [`Surface`] implementation, which backs them with whatever
//! drawing toolkit the application already uses.
//!
//! Documents are parsed once into an immutable [`SvgImage`], which can then be
//! rendered any number of times, at any size, from any thread.
//!
//! # Basic usage
//!
//! * Load an [`SvgImage`] from a string, a byte slice, or a file.
//! * Implement [`Surface`] for your drawing backend.
//! * Call [`SvgImage::render`] with the viewport to fit the image into.
//!
//! # Example
//!
//! ```
//! use minisvg::{FillParams, Path, StrokeParams, Surface, SvgImage, Transform};
//!
//! // A surface that just counts drawing operations.
//! #[derive(Default)]
//! struct Counter {
//!     fills: usize,
//!     strokes: usize,
//! }
//!
//! impl Surface for Counter {
//!     type Error = std::convert::Infallible;
//!
//!     fn push_transform(&mut self, _: &Transform) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     fn pop_transform(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     fn fill(&mut self, _: &Path, _: &FillParams) -> Result<(), Self::Error> {
//!         self.fills += 1;
//!         Ok(())
//!     }
//!
//!     fn stroke(&mut self, _: &Path, _: &StrokeParams) -> Result<(), Self::Error> {
//!         self.strokes += 1;
//!         Ok(())
//!     }
//! }
//!
//! let image = SvgImage::load_from_str(
//!     r#"<svg viewBox="0 0 24 24">
//!          <circle cx="12" cy="12" r="10" fill="yellow" stroke="black"/>
//!        </svg>"#,
//! )
//! .unwrap();
//!
//! let mut counter = Counter::default();
//! image
//!     .render(&mut counter, 0.0, 0.0, 24.0, 24.0)
//!     .unwrap();
//!
//! assert_eq!(counter.fills, 1);
//! assert_eq!(counter.strokes, 1);
//! ```
//!
//! # Leniency
//!
//! Loading fails only for malformed XML, a missing `<svg>` root, or documents
//! that blow past the implementation limits.  Everything below that is
//! lenient, the way SVG renderers are expected to be: elements this crate
//! does not support are skipped, unusable geometry is dropped, and invalid
//! attribute values fall back to their defaults.  Set the `MINISVG_LOG`
//! environment variable to see what a document loses on its way in.

#![allow(rustdoc::private_intra_doc_links)]
#![allow(clippy::clone_on_ref_ptr)]
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::too_many_arguments)]
#![warn(nonstandard_style, rust_2018_idioms, unused)]
#![warn(renamed_and_removed_lints)]
#![warn(trivial_casts, trivial_numeric_casts)]

pub use crate::api::*;

mod api;
mod color;
mod document;
mod error;
mod limits;
mod log;
mod node;
mod parsers;
mod path_builder;
mod path_parser;
mod properties;
mod property_defs;
mod rect;
mod render;
mod session;
mod shapes;
mod surface;
mod transform;
mod unit_interval;
mod util;
mod viewbox;
mod xml;
