pub mod block;

pub use self::block::flow_layout;

use crate::error::{CollaboratorError, Error};
use crate::geometry::Rect;
use crate::layout_tree::{BoxId, LayoutNode};
use std::collections::HashMap;

/// Global information for one flow-layout pass.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    /// The rectangle of the initial containing block.
    pub containing_block: Rect,
    pub policy: LayoutPolicy,
}

/// Reserved layout policy knobs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutPolicy {}

/// Reserved configuration for `flow_layout`. No options are recognized
/// yet; the default value must be accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutOptions {}

/// A line produced by the external inline layouter. The frame is
/// relative to the owning block's content origin; the core only reads
/// the frame's bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBox {
    pub frame: Rect,
    pub baseline: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl Default for LineBox {
    fn default() -> Self {
        Self {
            frame: Rect::zero(),
            baseline: 0.,
            ascent: 0.,
            descent: 0.,
        }
    }
}

/// Border-box and content-box rectangles for one box, relative to its
/// parent's border-box origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub frame: Rect,
    pub content: Rect,
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self {
            frame: Rect::zero(),
            content: Rect::zero(),
        }
    }
}

pub type LayoutGeometryTable = HashMap<BoxId, LayoutGeometry>;
pub type LinesByBlock = HashMap<BoxId, Vec<LineBox>>;

/// The output of a flow-layout pass. The box tree itself stays with the
/// caller; node rectangles are mirrored from the geometry table.
#[derive(Debug, Default)]
pub struct LayoutResult {
    pub geometry: LayoutGeometryTable,
    pub lines: LinesByBlock,
}

/// The black-box inline layouter. Given the anonymous-inline subtree of
/// an inline-only block container and an available width, it returns the
/// line boxes of the inline formatting context. It must be deterministic,
/// must not mutate the subtree, and may call back through the atomic
/// sizer for any inline-block descendants.
pub trait InlineLayouter {
    fn layout_inline(
        &self,
        inline_root: &LayoutNode,
        max_width: f32,
        atomic: &dyn AtomicSizer,
    ) -> Result<Vec<LineBox>, CollaboratorError>;
}

/// Upper bound used when an atomic inline-block width is otherwise
/// unconstrained.
pub trait IntrinsicMeasurer {
    fn max_content_width(&self, node: &LayoutNode) -> Result<f32, CollaboratorError>;
}

/// Provided by the core, consumed by the inline layouter: sizes an
/// inline-block by re-entering block layout on its interior, returning
/// its used `(width, height)`.
pub trait AtomicSizer {
    fn size_inline_block(&self, node: &LayoutNode, max_width: f32) -> Result<(f32, f32), Error>;
}
