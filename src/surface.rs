//! Abstraction over the drawing backend.
//!
//! The renderer does not paint pixels itself; it emits transform, fill, and
//! stroke operations against whatever implements [`Surface`].  Backends map
//! those onto their own path and paint machinery.

use rgb::RGB8;

use crate::path_builder::Path;
use crate::property_defs::{FillRule, StrokeLinecap, StrokeLinejoin};
use crate::transform::Transform;

/// Parameters for one fill operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillParams {
    pub color: RGB8,

    /// Opacity of the fill, `0` transparent to `255` opaque.
    pub alpha: u8,

    pub rule: FillRule,
}

/// Parameters for one stroke operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeParams {
    pub color: RGB8,

    /// Opacity of the stroke, `0` transparent to `255` opaque.
    pub alpha: u8,

    /// Line width, rounded to whole units and never less than 1.
    pub width: u32,

    pub cap: StrokeLinecap,
    pub join: StrokeLinejoin,
}

/// A sink for drawing operations.
///
/// The renderer guarantees that every `push_transform` is paired with a
/// `pop_transform`, also when rendering stops early because of an error, so
/// implementations can maintain a plain transform stack.
///
/// A surface only needs to be usable from one render call at a time; the
/// renderer itself keeps no state between calls.
pub trait Surface {
    type Error;

    /// Composes `transform` onto the current transform and makes the result
    /// current.
    fn push_transform(&mut self, transform: &Transform) -> Result<(), Self::Error>;

    /// Restores the transform that was current before the matching
    /// `push_transform`.
    fn pop_transform(&mut self) -> Result<(), Self::Error>;

    /// Fills the interior of `path` under the current transform.
    fn fill(&mut self, path: &Path, params: &FillParams) -> Result<(), Self::Error>;

    /// Strokes the outline of `path` under the current transform.
    fn stroke(&mut self, path: &Path, params: &StrokeParams) -> Result<(), Self::Error>;
}
