//! Box tree wrapper over the flex layout engine.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use taffy::{AvailableSpace, NodeId, Size, TaffyTree, TraversePartialTree};

use crate::error::FlowError;
use crate::layout::flex::BoxStyle;
use crate::layout::flow::FlowState;

/// Identifier of a box node, stable for the lifetime of the tree.
pub type BoxId = u64;

/// Measurement source attached to leaf nodes.
pub enum MeasureSource {
    /// Fixed-size content such as images.
    Fixed { width: f32, height: f32 },
    /// Inline text measured by a shared flow state.
    Text(Rc<RefCell<FlowState>>),
}

/// Per-side resolved thickness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Committed geometry of a node after [`BoxTree::compute`].
///
/// `left` and `top` are relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Committed {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub padding: Sides,
    pub border: Sides,
}

impl Committed {
    /// Width of the content box, with padding and border removed.
    #[inline]
    pub fn content_width(&self) -> f32 {
        self.width - self.padding.left - self.padding.right - self.border.left - self.border.right
    }

    /// Height of the content box, with padding and border removed.
    #[inline]
    pub fn content_height(&self) -> f32 {
        self.height - self.padding.top - self.padding.bottom - self.border.top - self.border.bottom
    }
}

/// Box layout tree with measured text leaves.
pub struct BoxTree {
    tree: TaffyTree<MeasureSource>,
    node_map: FxHashMap<BoxId, NodeId>,
    next_id: BoxId,
    root: Option<BoxId>,
}

impl Default for BoxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxTree {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: FxHashMap::default(),
            next_id: 0,
            root: None,
        }
    }

    fn register(&mut self, node: NodeId) -> BoxId {
        let id = self.next_id;
        self.next_id += 1;
        self.node_map.insert(id, node);
        id
    }

    fn node(&self, id: BoxId) -> Result<NodeId, FlowError> {
        self.node_map.get(&id).copied().ok_or(FlowError::UnknownNode(id))
    }

    /// Create a container node.
    pub fn new_box(&mut self, style: &BoxStyle) -> Result<BoxId, FlowError> {
        let node = self.tree.new_leaf(style.to_taffy())?;
        Ok(self.register(node))
    }

    /// Create a leaf whose size comes from a measurement source.
    pub fn new_leaf(&mut self, style: &BoxStyle, source: MeasureSource) -> Result<BoxId, FlowError> {
        let node = self.tree.new_leaf_with_context(style.to_taffy(), source)?;
        Ok(self.register(node))
    }

    /// Create a measured leaf with a raw engine style. Used by the text
    /// pipeline for its baseline-aligned container.
    pub(crate) fn new_leaf_raw(
        &mut self,
        style: taffy::Style,
        source: MeasureSource,
    ) -> Result<BoxId, FlowError> {
        let node = self.tree.new_leaf_with_context(style, source)?;
        Ok(self.register(node))
    }

    /// Append `child` to `parent`.
    pub fn add_child(&mut self, parent: BoxId, child: BoxId) -> Result<(), FlowError> {
        let count = self.child_count(parent)?;
        self.insert_child_at(parent, count, child)
    }

    /// Insert `child` under `parent` at `index`, clamped to the child count.
    pub fn insert_child_at(
        &mut self,
        parent: BoxId,
        index: usize,
        child: BoxId,
    ) -> Result<(), FlowError> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        let count = self.tree.child_count(parent_node);
        self.tree.insert_child_at_index(parent_node, index.min(count), child_node)?;
        Ok(())
    }

    pub fn child_count(&self, id: BoxId) -> Result<usize, FlowError> {
        Ok(self.tree.child_count(self.node(id)?))
    }

    pub fn set_root(&mut self, id: BoxId) {
        self.root = Some(id);
    }

    #[inline]
    pub fn root(&self) -> Option<BoxId> {
        self.root
    }

    /// Read the engine style of a node.
    pub(crate) fn taffy_style(&self, id: BoxId) -> Result<&taffy::Style, FlowError> {
        Ok(self.tree.style(self.node(id)?)?)
    }

    /// Mutate the engine style of a node in place.
    pub(crate) fn update_style(
        &mut self,
        id: BoxId,
        f: impl FnOnce(&mut taffy::Style),
    ) -> Result<(), FlowError> {
        let node = self.node(id)?;
        let mut style = self.tree.style(node)?.clone();
        f(&mut style);
        self.tree.set_style(node, style)?;
        Ok(())
    }

    /// Run the layout pass from the root within the available area.
    ///
    /// Text leaves are measured through their shared flow state; the flow
    /// retains the metrics of its last measurement, which is the one taken at
    /// the settled width.
    pub fn compute(&mut self, available_width: f32, available_height: f32) -> Result<(), FlowError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        let root_node = self.node(root)?;
        self.tree.compute_layout_with_measure(
            root_node,
            Size {
                width: AvailableSpace::Definite(available_width),
                height: AvailableSpace::Definite(available_height),
            },
            |known, available, _node, source, _style| measure_source(known, available, source),
        )?;
        Ok(())
    }

    /// Committed geometry of a node, relative to its parent.
    pub fn committed(&self, id: BoxId) -> Option<Committed> {
        let node = self.node_map.get(&id).copied()?;
        let layout = self.tree.layout(node).ok()?;
        Some(Committed {
            left: layout.location.x,
            top: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
            padding: Sides {
                top: layout.padding.top,
                right: layout.padding.right,
                bottom: layout.padding.bottom,
                left: layout.padding.left,
            },
            border: Sides {
                top: layout.border.top,
                right: layout.border.right,
                bottom: layout.border.bottom,
                left: layout.border.left,
            },
        })
    }
}

fn measure_source(
    known: Size<Option<f32>>,
    available: Size<AvailableSpace>,
    source: Option<&mut MeasureSource>,
) -> Size<f32> {
    match source {
        Some(MeasureSource::Fixed { width, height }) => Size {
            width: known.width.unwrap_or(*width),
            height: known.height.unwrap_or(*height),
        },
        Some(MeasureSource::Text(flow)) => {
            let width_hint = known.width.unwrap_or(match available.width {
                AvailableSpace::Definite(width) => width,
                AvailableSpace::MinContent => 0.0,
                AvailableSpace::MaxContent => f32::INFINITY,
            });
            let measured = flow.borrow_mut().measure(width_hint);
            Size {
                width: known.width.unwrap_or(measured.width),
                height: known.height.unwrap_or(measured.height),
            }
        }
        None => Size::ZERO,
    }
}
