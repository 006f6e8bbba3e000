//! Two-phase flow protocol: prepare, resume, attach, paint.
//!
//! Phase one segments the text and reports glyph coverage gaps so the caller
//! can load font assets. Phase two registers the measured node, lets the box
//! engine settle widths, then paints at the committed offset. The split is
//! explicit because asset loading happens outside this crate.

use std::cell::RefCell;
use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use gravure_plate::BackgroundClipPaths;

use crate::error::FlowError;
use crate::font::FontEngine;
use crate::layout::flow::FlowState;
use crate::layout::min_width::estimate_min_width;
use crate::layout::tree::{BoxId, BoxTree, MeasureSource};
use crate::paint;
use crate::style::{TextAlign, TextStyle};
use crate::text::{apply_transform, segment_runs, StyledRun};

/// Paint-phase switches.
#[derive(Debug, Clone)]
pub struct PaintOptions {
    /// Emit glyph outlines as paths; otherwise plain text elements.
    pub embed_font: bool,
    /// Draw token boxes and baselines for inspection.
    pub debug: bool,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self { embed_font: true, debug: false }
    }
}

/// First-phase result: the flow is segmented and its glyph coverage known.
pub struct FlowRequest {
    state: FlowState,
    missing: SmallVec<[CompactString; 4]>,
}

impl FlowRequest {
    /// Token contents not covered by current font assets, deduplicated in
    /// source order.
    pub fn missing_glyphs(&self) -> &[CompactString] {
        &self.missing
    }

    /// Enter phase two, optionally installing an engine handle refreshed for
    /// the missing glyphs. `None` keeps the original handle.
    pub fn resume(mut self, engine: Option<Box<dyn FontEngine>>) -> TextFlow {
        if let Some(engine) = engine {
            self.state.set_engine(engine);
        }
        TextFlow { state: Rc::new(RefCell::new(self.state)), node: None, container: None }
    }
}

/// A prepared text flow moving through measurement to paint.
pub struct TextFlow {
    state: Rc<RefCell<FlowState>>,
    node: Option<BoxId>,
    container: Option<BoxId>,
}

impl TextFlow {
    /// Transform and segment `runs`, then report glyph coverage.
    pub fn prepare(
        runs: &[StyledRun],
        style: TextStyle,
        engine: Box<dyn FontEngine>,
    ) -> FlowRequest {
        let transformed: Vec<StyledRun> = runs
            .iter()
            .map(|run| StyledRun {
                content: apply_transform(&run.content, style.text_transform, style.locale),
                color: run.color.clone(),
            })
            .collect();
        let words = segment_runs(&transformed, style.word_break);

        let mut missing: SmallVec<[CompactString; 4]> = SmallVec::new();
        let mut seen: FxHashSet<CompactString> = FxHashSet::default();
        for word in &words {
            if word.text.is_empty() || word.is_separator() {
                continue;
            }
            if style.grapheme_images.contains_key(word.text.as_str()) {
                continue;
            }
            if !engine.has_coverage(&word.text) && seen.insert(word.text.clone()) {
                missing.push(word.text.clone());
            }
        }

        FlowRequest { state: FlowState::new(style, engine, words), missing }
    }

    /// Register the measured text node under `parent` at `index`.
    ///
    /// When the parent has no explicit width, its min-width is raised to the
    /// flow's min-content estimate (clamped to an explicit max-width) unless
    /// a larger explicit minimum is already present.
    pub fn attach(
        &mut self,
        tree: &mut BoxTree,
        parent: BoxId,
        index: usize,
    ) -> Result<BoxId, FlowError> {
        let parent_style = tree.taffy_style(parent)?.clone();
        if !matches!(parent_style.size.width, taffy::Dimension::Length(_)) {
            let mut estimate = estimate_min_width(&mut self.state.borrow_mut());
            if let taffy::Dimension::Length(max_width) = parent_style.max_size.width {
                estimate = estimate.min(max_width);
            }
            let raise = match parent_style.min_size.width {
                taffy::Dimension::Auto => true,
                taffy::Dimension::Length(current) => current < estimate,
                taffy::Dimension::Percent(_) => false,
            };
            if raise {
                tree.update_style(parent, |style| {
                    style.min_size.width = taffy::Dimension::Length(estimate);
                })?;
            }
        }

        let text_align = self.state.borrow().style.text_align;
        let leaf_style = taffy::Style {
            align_items: Some(taffy::AlignItems::Baseline),
            justify_content: Some(match text_align {
                TextAlign::Start | TextAlign::Left => taffy::JustifyContent::FlexStart,
                TextAlign::End | TextAlign::Right => taffy::JustifyContent::FlexEnd,
                TextAlign::Center => taffy::JustifyContent::Center,
                TextAlign::Justify => taffy::JustifyContent::SpaceBetween,
            }),
            ..taffy::Style::default()
        };
        let node = tree.new_leaf_raw(leaf_style, MeasureSource::Text(self.state.clone()))?;
        tree.insert_child_at(parent, index, node)?;
        self.node = Some(node);
        self.container = Some(parent);
        Ok(node)
    }

    /// The measured node id, available after [`TextFlow::attach`].
    #[inline]
    pub fn node(&self) -> Option<BoxId> {
        self.node
    }

    /// Paint the flow at its committed absolute offset.
    ///
    /// `left` and `top` position the text container in final document
    /// coordinates; the caller resolves them while walking the computed
    /// tree. Consumes the flow: positions replayed here are the ones from
    /// the last measurement.
    pub fn paint(
        self,
        tree: &BoxTree,
        left: f32,
        top: f32,
        options: &PaintOptions,
        clips: &mut BackgroundClipPaths,
    ) -> String {
        let container_width = self
            .container
            .and_then(|id| tree.committed(id))
            .map(|committed| committed.content_width());
        let mut state = self.state.borrow_mut();
        // Unattached flows paint without alignment or truncation.
        let container_width = container_width
            .unwrap_or_else(|| state.line_widths.iter().copied().fold(0.0f32, f32::max));
        paint::paint(
            &mut state,
            &paint::PaintParams {
                left,
                top,
                container_width,
                node_id: self.node.unwrap_or(0),
                options,
            },
            clips,
        )
    }
}
