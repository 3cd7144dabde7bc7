//! Used-value resolution: computed lengths become pixel quantities
//! against a containing block propagated top-down through the box tree.

use crate::error::Error;
use crate::geometry::{Edges, Rect};
use crate::layout_tree::{BoxId, BoxKind, LayoutNode};
use crate::style::{ComputedStyle, EdgeLengths, Length};
use std::collections::HashMap;

pub type UsedValuesTable = HashMap<BoxId, UsedValues>;

/// Resolved edges and content width for one box. A missing table entry
/// reads as the zero value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsedValues {
    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
    pub content_width: f32,
}

impl Default for UsedValues {
    fn default() -> Self {
        Self {
            margin: Edges::zero(),
            padding: Edges::zero(),
            border: Edges::zero(),
            content_width: 0.,
        }
    }
}

/// The context a box resolves its lengths against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext {
    pub containing_block: Rect,
    pub font_size_px: f32,
}

/// Which of the left/right margins were `auto`. Kept separate from the
/// resolved pixel values for inline-block sizing and future centering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarginAutoFlags {
    pub left: bool,
    pub right: bool,
}

/// Resolves `margin`, `padding` and `border` for a style. Padding and
/// border treat `auto` as zero; margins report left/right auto-ness.
pub fn resolve_edges(
    style: &ComputedStyle,
    ctx: &ResolveContext,
) -> (Edges, Edges, Edges, MarginAutoFlags) {
    let margin_left = resolve_length(style.margin.left, ctx);
    let margin_right = resolve_length(style.margin.right, ctx);
    let margin = Edges::new(
        resolve_length(style.margin.top, ctx).unwrap_or(0.),
        margin_right.unwrap_or(0.),
        resolve_length(style.margin.bottom, ctx).unwrap_or(0.),
        margin_left.unwrap_or(0.),
    );
    let auto = MarginAutoFlags {
        left: margin_left.is_none(),
        right: margin_right.is_none(),
    };
    (
        margin,
        resolve_edges_auto_as_zero(&style.padding, ctx),
        resolve_edges_auto_as_zero(&style.border, ctx),
        auto,
    )
}

/// Resolves `root`'s subtree into a fresh table keyed by box id.
pub fn resolve_used_values(
    root: &LayoutNode,
    context: ResolveContext,
) -> Result<UsedValuesTable, Error> {
    let mut table = UsedValuesTable::new();
    resolve_node(root, context, &mut table);
    Ok(table)
}

/// `None` means `auto`.
fn resolve_length(length: Length, ctx: &ResolveContext) -> Option<f32> {
    match length {
        Length::Px(value) => Some(value),
        Length::Percent(value) => Some(ctx.containing_block.size.width * value),
        Length::Em(value) => Some(ctx.font_size_px * value),
        Length::Auto => None,
    }
}

fn resolve_edges_auto_as_zero(edges: &EdgeLengths, ctx: &ResolveContext) -> Edges {
    Edges::new(
        resolve_length(edges.top, ctx).unwrap_or(0.),
        resolve_length(edges.right, ctx).unwrap_or(0.),
        resolve_length(edges.bottom, ctx).unwrap_or(0.),
        resolve_length(edges.left, ctx).unwrap_or(0.),
    )
}

fn resolve_content_width(
    node: &LayoutNode,
    style: &ComputedStyle,
    ctx: &ResolveContext,
    margin: &Edges,
    padding: &Edges,
    border: &Edges,
) -> f32 {
    if !node.kind.is_block_level() {
        return 0.;
    }

    match resolve_length(style.width, ctx) {
        Some(width) => width.max(0.),
        None => {
            // Inline-block auto width is picked during flow by the atomic
            // sizer; blocks fill the containing block.
            if matches!(node.kind, BoxKind::InlineBlock) {
                return 0.;
            }
            let content = ctx.containing_block.size.width
                - (margin.horizontal() + padding.horizontal() + border.horizontal());
            content.max(0.)
        }
    }
}

/// The context the children of `node` resolve against. A block-level
/// non-inline-block box hands its resolved content width down as the new
/// containing block width; an inline-block passes its own containing
/// block through since its content width is not fixed in this pass.
fn child_resolve_context(
    node: &LayoutNode,
    parent: ResolveContext,
    used: &UsedValues,
) -> ResolveContext {
    let mut ctx = parent;
    if node.kind.is_block_level() && !matches!(node.kind, BoxKind::InlineBlock) {
        ctx.containing_block.size.width = used.content_width;
    }
    if let Some(style) = node.style {
        if style.font_size_px > 0. {
            ctx.font_size_px = style.font_size_px;
        }
    }
    ctx
}

fn resolve_node(node: &LayoutNode, ctx: ResolveContext, table: &mut UsedValuesTable) {
    let style = node.style.unwrap_or_default();
    let (margin, padding, border, _) = resolve_edges(&style, &ctx);
    let content_width = resolve_content_width(node, &style, &ctx, &margin, &padding, &border);

    let used = UsedValues {
        margin,
        padding,
        border,
        content_width,
    };
    table.insert(node.id, used);

    let child_ctx = child_resolve_context(node, ctx, &used);
    for child in &node.children {
        resolve_node(child, child_ctx, table);
    }
}
