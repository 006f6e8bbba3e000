//! Font engine capability.
//!
//! The flow never touches font files. Everything it needs from loaded font
//! assets goes through [`FontEngine`]: coverage checks, advance widths, line
//! metrics and outline paths. A handle is bound to one resolved style; the
//! asset-loading phase may install a refreshed handle between the coverage
//! report and measurement (see [`crate::layout::FlowRequest::resume`]).

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use unicode_segmentation::UnicodeSegmentation;

use crate::style::TextStyle;

/// Placement handed to [`FontEngine::outline`] for one shaped run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineRequest {
    pub left: f32,
    /// Top of the line box the run sits on.
    pub top: f32,
    pub font_size: f32,
    pub letter_spacing: f32,
}

/// Measurement and shaping capability over loaded font assets.
pub trait FontEngine {
    /// Whether every character of `text` is covered by loaded assets.
    fn has_coverage(&self, text: &str) -> bool;

    /// Advance width of `text`. `style` supplies spacing knobs; the handle
    /// itself is already bound to a font size.
    fn measure(&self, text: &str, style: &TextStyle) -> f32;

    /// Line-box height of `text`.
    fn line_height(&self, text: &str) -> f32;

    /// Baseline offset from the top of the line box.
    fn baseline(&self, text: &str) -> f32;

    /// Outline path data for `text` placed at `request`.
    fn outline(&self, text: &str, request: &OutlineRequest) -> String;
}

/// Deterministic metrics-table engine for tests and previews.
///
/// Every grapheme advances by a fixed em fraction unless overridden, and
/// outlines come out as one rule along the baseline, so generated fragments
/// are stable and easy to assert against.
#[derive(Debug, Clone)]
pub struct RuledFont {
    font_size: f32,
    advance_em: f32,
    line_height_em: f32,
    ascender_em: f32,
    widths: FxHashMap<char, f32>,
    uncovered: FxHashSet<char>,
}

impl RuledFont {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            advance_em: 0.6,
            line_height_em: 1.2,
            ascender_em: 0.9,
            widths: FxHashMap::default(),
            uncovered: FxHashSet::default(),
        }
    }

    /// Override the default per-grapheme advance.
    pub fn with_advance(mut self, em: f32) -> Self {
        self.advance_em = em;
        self
    }

    /// Override the advance of graphemes starting with `ch`.
    pub fn with_glyph_width(mut self, ch: char, em: f32) -> Self {
        self.widths.insert(ch, em);
        self
    }

    /// Mark `ch` as not covered by loaded assets.
    pub fn without_glyph(mut self, ch: char) -> Self {
        self.uncovered.insert(ch);
        self
    }

    fn grapheme_advance(&self, grapheme: &str) -> f32 {
        let em = grapheme
            .chars()
            .next()
            .map(|c| self.widths.get(&c).copied().unwrap_or(self.advance_em))
            .unwrap_or(0.0);
        em * self.font_size
    }

    fn advance(&self, text: &str, letter_spacing: f32) -> f32 {
        let mut width = 0.0;
        let mut count = 0usize;
        for grapheme in text.graphemes(true) {
            width += self.grapheme_advance(grapheme);
            count += 1;
        }
        width + letter_spacing * count as f32
    }
}

impl FontEngine for RuledFont {
    fn has_coverage(&self, text: &str) -> bool {
        !text.chars().any(|c| self.uncovered.contains(&c))
    }

    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        self.advance(text, style.letter_spacing)
    }

    fn line_height(&self, _text: &str) -> f32 {
        self.line_height_em * self.font_size
    }

    fn baseline(&self, _text: &str) -> f32 {
        self.ascender_em * self.font_size
    }

    fn outline(&self, text: &str, request: &OutlineRequest) -> String {
        let width = self.advance(text, request.letter_spacing);
        let y = request.top + self.ascender_em * self.font_size;
        let mut d = CompactString::const_new("M");
        d.push_str(&gravure_plate::num(request.left));
        d.push(' ');
        d.push_str(&gravure_plate::num(y));
        d.push('H');
        d.push_str(&gravure_plate::num(request.left + width));
        d.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_default_advance() {
        let font = RuledFont::new(10.0);
        let style = TextStyle { font_size: 10.0, ..TextStyle::default() };
        assert_eq!(font.measure("Hello", &style), 30.0);
        assert_eq!(font.measure("", &style), 0.0);
    }

    #[test]
    fn test_measure_letter_spacing() {
        let font = RuledFont::new(10.0);
        let style = TextStyle { font_size: 10.0, letter_spacing: 2.0, ..TextStyle::default() };
        assert_eq!(font.measure("ab", &style), 16.0);
    }

    #[test]
    fn test_glyph_width_override() {
        let font = RuledFont::new(10.0).with_glyph_width('i', 0.3);
        let style = TextStyle { font_size: 10.0, ..TextStyle::default() };
        assert_eq!(font.measure("in", &style), 9.0);
    }

    #[test]
    fn test_combined_grapheme_counts_once() {
        let font = RuledFont::new(10.0);
        let style = TextStyle { font_size: 10.0, ..TextStyle::default() };
        // e + combining acute is one grapheme
        assert_eq!(font.measure("e\u{301}", &style), 6.0);
    }

    #[test]
    fn test_coverage() {
        let font = RuledFont::new(10.0).without_glyph('☃');
        assert!(font.has_coverage("snow"));
        assert!(!font.has_coverage("snow☃"));
    }

    #[test]
    fn test_metrics() {
        let font = RuledFont::new(10.0);
        assert_eq!(font.line_height("x"), 12.0);
        assert_eq!(font.baseline("x"), 9.0);
    }

    #[test]
    fn test_outline_rule() {
        let font = RuledFont::new(10.0);
        let request =
            OutlineRequest { left: 6.0, top: 12.0, font_size: 10.0, letter_spacing: 0.0 };
        assert_eq!(font.outline("ab", &request), "M6 21H18");
    }
}
