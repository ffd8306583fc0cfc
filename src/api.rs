//! Public API for loading and rendering SVG images.
//!
//! This gets re-exported from the toplevel `lib.rs`.

#![warn(missing_docs)]

use std::fs;
use std::str;

// Here we only re-export stuff in the public API.
pub use crate::{
    error::LoadingError,
    path_builder::{CubicBezierCurve, Path, PathCommand, QuadraticBezierCurve},
    property_defs::{FillRule, StrokeLinecap, StrokeLinejoin},
    rect::Rect,
    render::ScaleMode,
    surface::{FillParams, StrokeParams, Surface},
    transform::Transform,
};

// The color type used in paint parameters, re-exported so that callers do not
// need their own dependency on the `rgb` crate.
pub use rgb::RGB8;

// Don't merge these in the "pub use" above!  They are not part of the public API!
use crate::{document::Document, render, session::Session, xml};

/// An SVG document, loaded and ready to be rendered.
///
/// Once created, an `SvgImage` is immutable; it holds the finished scene for the
/// document and does not keep any reference to the input markup.  The same image can
/// be rendered any number of times, onto any number of [`Surface`] implementations,
/// and shared freely between threads.
///
/// # Example
///
/// ```
/// use minisvg::SvgImage;
///
/// let image = SvgImage::load_from_str(
///     r##"<svg viewBox="0 0 100 100">
///          <rect x="10" y="10" width="80" height="80" fill="#F80"/>
///        </svg>"##,
/// ).unwrap();
///
/// assert_eq!(image.width(), Some(100.0));
/// assert_eq!(image.height(), Some(100.0));
/// ```
#[derive(Debug)]
pub struct SvgImage {
    document: Document,
}

impl SvgImage {
    /// Loads an SVG document from a string of XML markup.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadingError`] if the markup is not well-formed XML, if the
    /// root element is not `<svg>`, or if the document exceeds one of the
    /// implementation limits.  Invalid attribute values do not cause errors
    /// here; they fall back to defaults as described in the module
    /// documentation for each value type.
    pub fn load_from_str(input: &str) -> Result<SvgImage, LoadingError> {
        // A byte order mark is not part of the document proper.
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);

        let session = Session::new();

        let root = xml::read_element_tree(&session, input)?;
        let document = Document::build(&session, &root)?;

        Ok(SvgImage { document })
    }

    /// Loads an SVG document from UTF-8 encoded bytes.
    ///
    /// # Errors
    ///
    /// In addition to the errors from [`load_from_str`], returns a
    /// [`LoadingError::XmlParseError`] if the bytes are not valid UTF-8.
    ///
    /// [`load_from_str`]: SvgImage::load_from_str
    pub fn load_from_bytes(data: &[u8]) -> Result<SvgImage, LoadingError> {
        let input = str::from_utf8(data)
            .map_err(|e| LoadingError::XmlParseError(format!("invalid UTF-8: {}", e)))?;

        SvgImage::load_from_str(input)
    }

    /// Loads an SVG document from a file.
    ///
    /// # Errors
    ///
    /// In addition to the errors from [`load_from_bytes`], returns a
    /// [`LoadingError::Io`] if the file cannot be read.
    ///
    /// [`load_from_bytes`]: SvgImage::load_from_bytes
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<SvgImage, LoadingError> {
        let data = fs::read(path)?;
        SvgImage::load_from_bytes(&data)
    }

    /// Returns the document's intrinsic width, if it declares one.
    ///
    /// This is the `width` attribute of the toplevel `<svg>` element, or the
    /// width of its `viewBox` when the attribute is missing.  Returns `None`
    /// when neither yields a usable size, for example when the attribute is
    /// a percentage.
    pub fn width(&self) -> Option<f64> {
        positive(self.document.width)
    }

    /// Returns the document's intrinsic height, if it declares one.
    ///
    /// See [`width`](SvgImage::width) for how this is computed.
    pub fn height(&self) -> Option<f64> {
        positive(self.document.height)
    }

    /// Returns the width-to-height ratio of the document, if both are known.
    ///
    /// Useful for fitting the image into a layout while preserving its shape.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width(), self.height()) {
            (Some(width), Some(height)) => Some(width / height),
            _ => None,
        }
    }

    /// Renders the whole document fitted to a viewport.
    ///
    /// The viewport is the rectangle with corner `(x, y)` and the given
    /// `width` and `height`, in the surface's coordinate space.  The
    /// document's `viewBox` is scaled uniformly and centered in the
    /// viewport, and `currentColor` paints black; use
    /// [`render_with_options`] to change either.
    ///
    /// [`render_with_options`]: SvgImage::render_with_options
    ///
    /// # Errors
    ///
    /// Any error reported by the `surface` aborts the rendering and is
    /// returned as is.  Transform pushes and pops stay balanced even then.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), S::Error> {
        self.render_with_options(surface, x, y, width, height, None, ScaleMode::default())
    }

    /// Renders like [`render`](SvgImage::render), with explicit options.
    ///
    /// `theme_color` substitutes `currentColor` paints; pass `None` to
    /// have those paint black.  `scale_mode` selects how the document's
    /// `viewBox` is fitted to the viewport.
    ///
    /// Nothing is drawn at all if the viewport or the document's `viewBox`
    /// spans no area.
    ///
    /// # Errors
    ///
    /// Same as [`render`](SvgImage::render).
    pub fn render_with_options<S: Surface>(
        &self,
        surface: &mut S,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        theme_color: Option<RGB8>,
        scale_mode: ScaleMode,
    ) -> Result<(), S::Error> {
        let viewport = Rect::new(x, y, x + width, y + height);

        render::render_document(&self.document, surface, &viewport, theme_color, scale_mode)
    }
}

fn positive(v: f64) -> Option<f64> {
    if v > 0.0 {
        Some(v)
    } else {
        None
    }
}
