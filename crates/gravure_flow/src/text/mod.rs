//! Text preprocessing: case transformation and segmentation.

mod segment;
mod transform;

pub use segment::{segment_runs, StyledRun, Word};
pub use transform::apply_transform;

pub(crate) use segment::{graphemes, is_line_feed, is_separator_str};
