//! The core of a CSS2 visual formatting engine.
//!
//! Three passes take a styled render tree to resolved geometry: the
//! builder normalizes the render tree into a box tree with anonymous
//! boxes, the used-value resolver turns computed lengths into pixels
//! against a propagated containing block, and flow layout stacks block
//! boxes vertically while delegating inline content to an external
//! inline layouter.

pub mod error;
pub mod geometry;
pub mod layout_algorithms;
pub mod layout_tree;
mod misc;
pub mod render_tree;
pub mod style;
pub mod text;
pub mod used_values;

pub use crate::error::{CollaboratorError, Error};
pub use crate::layout_algorithms::{
    flow_layout, AtomicSizer, InlineLayouter, IntrinsicMeasurer, LayoutContext, LayoutGeometry,
    LayoutGeometryTable, LayoutOptions, LayoutPolicy, LayoutResult, LineBox, LinesByBlock,
};
pub use crate::layout_tree::builder::{build_layout_tree, BuildOptions};
pub use crate::layout_tree::{BoxId, BoxKind, FormattingContextKind, LayoutNode};
pub use crate::render_tree::{NodeId, RenderNode, RenderNodeData};
pub use crate::style::{ComputedStyle, Display, EdgeLengths, Length};
pub use crate::text::{TextRange, TextRef, TextSourceId};
pub use crate::used_values::{
    resolve_used_values, MarginAutoFlags, ResolveContext, UsedValues, UsedValuesTable,
};
