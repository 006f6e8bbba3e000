//! Box tree integration and measurement.

mod flex;
pub(crate) mod flow;
mod min_width;
mod pipeline;
mod tree;

pub use flex::{AlignItems, BoxStyle, Dimension, Edges, FlexDirection, JustifyContent};
pub use flow::{FlowState, MeasuredSize, WordPosition};
pub use pipeline::{FlowRequest, PaintOptions, TextFlow};
pub use tree::{BoxId, BoxTree, Committed, MeasureSource, Sides};
