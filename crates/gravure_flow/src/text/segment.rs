//! Word and grapheme segmentation of styled runs.
//!
//! The line breaker works on an ordered token list. Word-boundary
//! segmentation keeps separators as their own tokens, so the breaker can
//! classify each token independently without re-scanning the source text.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::style::WordBreak;

/// A styled source run prior to segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    pub content: CompactString,
    /// Per-run color override; falls back to the flow's text color.
    #[serde(default)]
    pub color: Option<CompactString>,
}

impl StyledRun {
    pub fn new(content: impl Into<CompactString>) -> Self {
        Self { content: content.into(), color: None }
    }

    pub fn with_color(content: impl Into<CompactString>, color: impl Into<CompactString>) -> Self {
        Self { content: content.into(), color: Some(color.into()) }
    }
}

/// Atomic unit for line-breaking decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: CompactString,
    pub color: Option<CompactString>,
}

impl Word {
    pub(crate) fn new(text: impl Into<CompactString>, color: Option<CompactString>) -> Self {
        Self { text: text.into(), color }
    }

    /// Token starts with a word separator, so it may collapse or break lines.
    #[inline]
    pub fn is_separator(&self) -> bool {
        is_separator_str(&self.text)
    }

    /// Token is entirely line-feed characters.
    #[inline]
    pub fn is_line_feed(&self) -> bool {
        is_line_feed(&self.text)
    }
}

/// Characters that separate words and may collapse into a pending space.
///
/// Unicode white space plus zero-width space and BOM.
pub(crate) fn is_word_separator(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000d}'
            | ' '
            | '\u{0085}'
            | '\u{00a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{200b}'
            | '\u{feff}'
    )
}

#[inline]
pub(crate) fn is_separator_str(text: &str) -> bool {
    text.chars().next().is_some_and(is_word_separator)
}

#[inline]
pub(crate) fn is_line_feed(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| matches!(c, '\n' | '\r'))
}

/// Grapheme clusters of `text` (extended, per UAX-29).
#[inline]
pub(crate) fn graphemes(text: &str) -> impl Iterator<Item = &str> {
    text.graphemes(true)
}

/// Split transformed runs into ordered tokens at the granularity the break
/// mode requires: graphemes for `break-all`, word boundaries otherwise.
pub fn segment_runs(runs: &[StyledRun], word_break: WordBreak) -> Vec<Word> {
    let mut words = Vec::new();
    for run in runs {
        match word_break {
            WordBreak::BreakAll => {
                words.extend(
                    graphemes(&run.content).map(|g| Word::new(g, run.color.clone())),
                );
            }
            _ => {
                words.extend(
                    run.content
                        .split_word_bounds()
                        .map(|w| Word::new(w, run.color.clone())),
                );
            }
        }
    }
    words
}
