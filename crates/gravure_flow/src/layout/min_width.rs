//! Min-content width estimation.
//!
//! Runs once before the box pass so a width-less container cannot collapse
//! below its longest unbreakable segment.

use crate::layout::flow::FlowState;
use crate::style::WhiteSpace;
use crate::text::{is_line_feed, is_separator_str};

/// Estimate the narrowest width this flow can wrap into.
///
/// Tokens between break points accumulate into one unbreakable segment. In
/// `nowrap` mode nothing breaks, so segment widths add up instead, with one
/// font-size unit of slack per suppressed break opportunity.
pub(crate) fn estimate_min_width(state: &mut FlowState) -> f32 {
    let mode = state.style.white_space;
    let font_size = state.style.font_size;
    let nowrap = mode == WhiteSpace::Nowrap;

    let mut min_width = 0.0f32;
    let mut total = 0.0f32;
    let mut segment = String::new();

    for i in 0..state.words.len() {
        let text = state.words[i].text.clone();
        let is_image = state.style.grapheme_images.contains_key(text.as_str());
        let breaks = match mode {
            WhiteSpace::Nowrap => false,
            WhiteSpace::Pre => is_line_feed(&text) || is_image,
            // Wrapping modes break at any separator token.
            _ => is_separator_str(&text) || is_image,
        };

        if breaks {
            if !segment.is_empty() {
                min_width = min_width.max(state.measure_width(&segment));
                segment.clear();
            }
            if is_image {
                min_width = min_width.max(font_size);
            }
        } else if nowrap && (is_separator_str(&text) || is_image) {
            if !segment.is_empty() {
                total += state.measure_width(&segment);
                segment.clear();
            }
            total += font_size;
        } else {
            segment.push_str(&text);
        }
    }

    if !segment.is_empty() {
        let width = state.measure_width(&segment);
        if nowrap {
            total += width;
        } else {
            min_width = min_width.max(width);
        }
    }

    if nowrap {
        total
    } else {
        min_width
    }
}
