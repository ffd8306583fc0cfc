//! Processing limits to mitigate malicious SVGs.

/// Maximum number of elements loadable per document.
///
/// This is a mitigation for SVG files which create millions of elements
/// in an attempt to exhaust memory.  We don't allow loading more than
/// this number of elements during the initial streaming load process.
pub const MAX_LOADED_ELEMENTS: usize = 1_000_000;

/// Maximum nesting depth of elements loadable per document.
///
/// Element nesting turns into recursion when the scene tree is built and
/// rendered, so the reader rejects documents deeper than this instead of
/// letting them exhaust the stack later.
pub const MAX_XML_DEPTH: usize = 1024;
