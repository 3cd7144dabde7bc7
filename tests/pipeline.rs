//! End-to-end runs of the three passes: build a box tree from a render
//! tree, resolve used values, and flow it with fake inline collaborators.

use boxflow::geometry::rect;
use boxflow::{
    build_layout_tree, flow_layout, resolve_used_values, AtomicSizer, BoxKind, BuildOptions,
    CollaboratorError, ComputedStyle, EdgeLengths, InlineLayouter, IntrinsicMeasurer,
    LayoutContext, LayoutNode, LayoutOptions, LayoutPolicy, LayoutResult, Length, LineBox, NodeId,
    RenderNode, ResolveContext, UsedValuesTable,
};
use std::collections::HashMap;

fn element(id: u64, display: &str, children: Vec<RenderNode>) -> RenderNode {
    RenderNode::element(NodeId(id), "div")
        .with_style("display", display)
        .with_children(children)
}

fn text(id: u64, data: &str) -> RenderNode {
    RenderNode::text(NodeId(id), data)
}

fn apply_styles(node: &mut LayoutNode, styles: &HashMap<NodeId, ComputedStyle>) {
    if let Some(style) = styles.get(&node.node) {
        node.style = Some(*style);
    }
    for child in &mut node.children {
        apply_styles(child, styles);
    }
}

fn layout_context(width: f32) -> LayoutContext {
    LayoutContext {
        containing_block: rect(0., 0., width, 0.),
        policy: LayoutPolicy::default(),
    }
}

/// Reports one fixed-height line for any inline content.
struct FixedInlineLayouter {
    line_height: f32,
}

impl InlineLayouter for FixedInlineLayouter {
    fn layout_inline(
        &self,
        _inline_root: &LayoutNode,
        max_width: f32,
        _atomic: &dyn AtomicSizer,
    ) -> Result<Vec<LineBox>, CollaboratorError> {
        Ok(vec![LineBox {
            frame: rect(0., 0., max_width, self.line_height),
            baseline: self.line_height,
            ascent: self.line_height,
            descent: 0.,
        }])
    }
}

/// Emits one line per inline-block it finds, sized through the atomic
/// sizer; a single fixed line otherwise.
struct SizingInlineLayouter;

impl InlineLayouter for SizingInlineLayouter {
    fn layout_inline(
        &self,
        inline_root: &LayoutNode,
        max_width: f32,
        atomic: &dyn AtomicSizer,
    ) -> Result<Vec<LineBox>, CollaboratorError> {
        let mut lines = Vec::new();
        let mut y = 0.;
        for node in inline_root.descendants() {
            if matches!(node.kind, BoxKind::InlineBlock) {
                let (w, h) = atomic
                    .size_inline_block(node, max_width)
                    .map_err(|e| -> CollaboratorError { e.into() })?;
                lines.push(LineBox {
                    frame: rect(0., y, w, h),
                    baseline: h,
                    ascent: h,
                    descent: 0.,
                });
                y += h;
            }
        }
        if lines.is_empty() {
            lines.push(LineBox {
                frame: rect(0., 0., max_width, 10.),
                baseline: 8.,
                ascent: 8.,
                descent: 2.,
            });
        }
        Ok(lines)
    }
}

struct FixedIntrinsic {
    max_content: f32,
}

impl IntrinsicMeasurer for FixedIntrinsic {
    fn max_content_width(&self, _node: &LayoutNode) -> Result<f32, CollaboratorError> {
        Ok(self.max_content)
    }
}

fn run_flow(
    root: &mut LayoutNode,
    used: &UsedValuesTable,
    inline: &dyn InlineLayouter,
) -> LayoutResult {
    flow_layout(
        root,
        used,
        inline,
        &FixedIntrinsic { max_content: 40. },
        layout_context(200.),
        LayoutOptions::default(),
    )
    .unwrap()
}

#[test]
fn mixed_document_lays_out_and_percent_padding_resolves() {
    let render = element(
        1,
        "block",
        vec![text(2, "hello"), element(3, "block", vec![])],
    );

    let mut root = build_layout_tree(&render, BuildOptions::default()).unwrap();
    root.check_consistency().unwrap();

    let mut styles = HashMap::new();
    styles.insert(
        NodeId(1),
        ComputedStyle {
            width: Length::Px(200.),
            ..Default::default()
        },
    );
    styles.insert(
        NodeId(3),
        ComputedStyle {
            padding: EdgeLengths {
                left: Length::Percent(0.10),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    apply_styles(&mut root, &styles);

    let used = resolve_used_values(
        &root,
        ResolveContext {
            containing_block: rect(0., 0., 200., 0.),
            font_size_px: 16.,
        },
    )
    .unwrap();

    // The text run was wrapped in an anonymous block ahead of the block
    // child.
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].kind, BoxKind::AnonymousBlock);
    assert_eq!(root.children[1].node, NodeId(3));
    let anonymous_id = root.children[0].id;
    let block_child_id = root.children[1].id;

    // padding-left: 10% of the parent's 200px content width.
    assert_eq!(used[&block_child_id].padding.left, 20.);
    assert_eq!(used[&block_child_id].content_width, 180.);

    let result = run_flow(&mut root, &used, &FixedInlineLayouter { line_height: 10. });

    // Lines laid out inside the anonymous wrapper are not recorded.
    assert!(result.lines.is_empty());

    let anonymous_geometry = result.geometry[&anonymous_id];
    assert_eq!(anonymous_geometry.frame.size.height, 10.);
    assert_eq!(anonymous_geometry.frame.origin.y, 0.);

    let child_geometry = result.geometry[&block_child_id];
    assert_eq!(child_geometry.frame.origin.y, 10.);
    assert_eq!(child_geometry.frame.size.width, 200.);
    assert_eq!(child_geometry.content.origin.x, 20.);

    assert_eq!(result.geometry[&root.id].content.size.height, 10.);
    assert_eq!(root.content.size.height, 10.);
}

#[test]
fn inline_block_is_sized_through_the_atomic_sizer() {
    let render = element(
        1,
        "block",
        vec![element(
            2,
            "inline",
            vec![
                text(3, "ab"),
                element(4, "inline-block", vec![element(5, "block", vec![])]),
            ],
        )],
    );

    let mut root = build_layout_tree(&render, BuildOptions::default()).unwrap();

    let mut styles = HashMap::new();
    styles.insert(
        NodeId(4),
        ComputedStyle {
            width: Length::Px(30.),
            ..Default::default()
        },
    );
    styles.insert(
        NodeId(5),
        ComputedStyle {
            padding: EdgeLengths {
                top: Length::Px(5.),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    apply_styles(&mut root, &styles);

    let used = resolve_used_values(
        &root,
        ResolveContext {
            containing_block: rect(0., 0., 200., 0.),
            font_size_px: 16.,
        },
    )
    .unwrap();

    let result = run_flow(&mut root, &used, &SizingInlineLayouter);

    let inline_block = root
        .descendants()
        .find(|n| matches!(n.kind, BoxKind::InlineBlock))
        .expect("inline-block survives construction");
    assert_eq!(inline_block.node, NodeId(4));

    // Fixed 30px width; interior block picked up 5px of padding.
    let geometry = result.geometry[&inline_block.id];
    assert_eq!(geometry.frame.size.width, 30.);
    assert_eq!(geometry.frame.size.height, 5.);

    // The root is an inline-only block container, so the line list lands
    // under its id.
    let lines = &result.lines[&root.id];
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].frame.size.height, 5.);
    assert_eq!(result.geometry[&root.id].content.size.height, 5.);
}

#[test]
fn flow_layout_is_deterministic() {
    let render = element(
        1,
        "block",
        vec![
            text(2, "first"),
            element(3, "block", vec![text(4, "second")]),
            element(5, "inline", vec![text(6, "third")]),
        ],
    );

    let mut root = build_layout_tree(&render, BuildOptions::default()).unwrap();
    let used = resolve_used_values(
        &root,
        ResolveContext {
            containing_block: rect(0., 0., 200., 0.),
            font_size_px: 16.,
        },
    )
    .unwrap();

    let inline = FixedInlineLayouter { line_height: 12. };
    let first = run_flow(&mut root, &used, &inline);
    let second = run_flow(&mut root, &used, &inline);

    assert_eq!(first.geometry, second.geometry);
    assert_eq!(first.lines, second.lines);
}
