//! Nodes of the scene tree.
//!
//! A loaded document is a tree of [`Node`]s, one per recognized SVG element.
//! Nodes are plain data: geometry is kept in the units it was parsed in, and
//! styles are kept unresolved so that the cascade can run against whatever
//! theme the caller renders with.

use crate::path_builder::Path;
use crate::properties::StyleProps;
use crate::shapes::Points;
use crate::transform::Transform;

/// One element of the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Properties set directly on this element; resolved against the
    /// ancestors at rendering time.
    pub style: StyleProps,

    /// Transform relative to the parent's coordinate space.
    pub transform: Transform,

    /// Whether the node takes part in rendering.  A hidden node keeps its
    /// place in the tree, children included.
    pub display: bool,

    pub kind: NodeKind,
}

/// What a node draws, with the geometry attributes that survived parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group(Vec<Node>),

    Path(Path),

    /// When only one corner radius is given in the markup, the builder
    /// mirrors it into the other; clamping to the half extents happens when
    /// the outline is built.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },

    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },

    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },

    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },

    Polyline(Points),

    Polygon(Points),
}

impl Node {
    pub fn new(kind: NodeKind) -> Node {
        Node {
            style: StyleProps::default(),
            transform: Transform::identity(),
            display: true,
            kind,
        }
    }
}
