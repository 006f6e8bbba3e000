//! Line breaking and measurement.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::font::FontEngine;
use crate::style::TextStyle;
use crate::style::WordBreak;
use crate::text::{graphemes, is_line_feed, is_separator_str, Word};

/// Characters that may not start a line.
const LINE_START_FORBIDDEN: &str = ",.!?:-@)>]}%#";

#[inline]
fn starts_forbidden(text: &str) -> bool {
    text.chars().next().is_some_and(|c| LINE_START_FORBIDDEN.contains(c))
}

/// Committed position of one token, relative to the text container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordPosition {
    pub x: f32,
    /// Top of the line box the token sits on.
    pub y: f32,
    pub width: f32,
    pub line: usize,
    /// Justify-gutter index of the segment this token belongs to.
    pub line_index: usize,
}

/// Size reported back to the box layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasuredSize {
    pub width: f32,
    pub height: f32,
}

/// Running accumulators of the line currently being filled.
#[derive(Debug, Default)]
struct LineTracker {
    line: usize,
    height: f32,
    max_width: f32,
    current_width: f32,
    current_height: f32,
    current_baseline: f32,
    tokens_on_line: usize,
    segments_on_line: usize,
}

impl LineTracker {
    fn flush_into(
        &mut self,
        widths: &mut Vec<f32>,
        baselines: &mut Vec<f32>,
        segments: &mut Vec<usize>,
    ) {
        widths.push(self.current_width);
        baselines.push(self.current_baseline);
        segments.push(self.segments_on_line);
        self.height += self.current_height;
        self.max_width = self.max_width.max(self.current_width);
        self.line += 1;
        self.current_width = 0.0;
        self.current_height = 0.0;
        self.current_baseline = 0.0;
        self.tokens_on_line = 0;
        self.segments_on_line = 0;
    }
}

/// Shared state of one text flow invocation.
///
/// The measure callback and the painter observe the same instance, so the
/// positions recorded by the last measurement are exactly the ones replayed
/// at paint time.
pub struct FlowState {
    pub(crate) style: TextStyle,
    pub(crate) engine: Box<dyn FontEngine>,
    pub(crate) words: Vec<Word>,
    /// One entry per word; `None` marks separators, forced breaks and tokens
    /// dropped by the line clamp.
    pub(crate) positions: Vec<Option<WordPosition>>,
    pub(crate) line_widths: Vec<f32>,
    pub(crate) line_baselines: Vec<f32>,
    /// Justify-eligible segment count per line.
    pub(crate) line_segments: Vec<usize>,
    /// Advance widths keyed by token content. The engine handle is bound to
    /// one resolved style, so content alone identifies a width.
    width_memo: FxHashMap<CompactString, f32>,
    /// Whether the last measurement dropped tokens past the line clamp.
    pub(crate) clamped: bool,
}

impl FlowState {
    pub(crate) fn new(style: TextStyle, engine: Box<dyn FontEngine>, words: Vec<Word>) -> Self {
        Self {
            style,
            engine,
            words,
            positions: Vec::new(),
            line_widths: Vec::new(),
            line_baselines: Vec::new(),
            line_segments: Vec::new(),
            width_memo: FxHashMap::default(),
            clamped: false,
        }
    }

    pub(crate) fn set_engine(&mut self, engine: Box<dyn FontEngine>) {
        self.engine = engine;
        self.width_memo.clear();
    }

    /// Memoized advance width of `text`.
    pub(crate) fn measure_width(&mut self, text: &str) -> f32 {
        if let Some(&width) = self.width_memo.get(text) {
            return width;
        }
        let width = self.engine.measure(text, &self.style);
        self.width_memo.insert(text.into(), width);
        width
    }

    /// Number of laid-out lines after the last measurement.
    #[inline]
    pub(crate) fn line_count(&self) -> usize {
        self.line_widths.len()
    }

    /// Lay the token list into lines within `available_width`.
    ///
    /// Deterministic for a fixed word sequence and width: re-running with the
    /// same input rebuilds identical positions. Word-splice fallbacks mutate
    /// the token list once and are stable afterwards.
    pub(crate) fn measure(&mut self, available_width: f32) -> MeasuredSize {
        self.positions.clear();
        self.line_widths.clear();
        self.line_baselines.clear();
        self.line_segments.clear();
        self.clamped = false;

        let ws = self.style.white_space;
        let wb = self.style.word_break;
        let font_size = self.style.font_size;
        let clamp = self.style.effective_line_clamp();

        let mut tracker = LineTracker::default();
        let mut pending_space = false;
        let mut pending_space_width = 0.0f32;

        let mut i = 0;
        while i < self.words.len() {
            if self.clamped {
                self.positions.push(None);
                i += 1;
                continue;
            }
            let text = self.words[i].text.clone();
            let is_image = self.style.grapheme_images.contains_key(text.as_str());

            // Forced break: line feed in a break-keeping mode.
            if ws.keeps_line_breaks() && is_line_feed(&text) {
                if clamp.is_some_and(|limit| tracker.line + 1 >= limit) {
                    self.clamped = true;
                } else {
                    tracker.flush_into(
                        &mut self.line_widths,
                        &mut self.line_baselines,
                        &mut self.line_segments,
                    );
                    pending_space = false;
                }
                self.positions.push(None);
                i += 1;
                continue;
            }

            // Collapsible separator: merge into a single pending space.
            if !is_image && ws.collapses_whitespace() && is_separator_str(&text) {
                pending_space = true;
                pending_space_width = self.measure_width(" ");
                self.positions.push(None);
                i += 1;
                continue;
            }

            let width = if is_image { font_size } else { self.measure_width(&text) };

            let can_start_line = pending_space || !starts_forbidden(&text);
            let join_width = if pending_space { pending_space_width } else { 0.0 };
            let will_wrap = tracker.tokens_on_line > 0
                && can_start_line
                && ws.allows_wrap()
                && tracker.current_width + join_width + width > available_width;

            // Break-word fallback: splice the token into graphemes behind a
            // zero-width placeholder and rescan from the same index.
            if wb == WordBreak::BreakWord
                && width > available_width
                && !is_image
                && graphemes(&text).nth(1).is_some()
                && (tracker.tokens_on_line == 0 || will_wrap)
            {
                let color = self.words[i].color.clone();
                let mut expanded: SmallVec<[Word; 8]> = SmallVec::new();
                expanded.push(Word::new("", color.clone()));
                for grapheme in graphemes(&text) {
                    expanded.push(Word::new(grapheme, color.clone()));
                }
                self.words.splice(i..=i, expanded);
                if tracker.tokens_on_line > 0 {
                    tracker.flush_into(
                        &mut self.line_widths,
                        &mut self.line_baselines,
                        &mut self.line_segments,
                    );
                    pending_space = false;
                }
                continue;
            }

            if will_wrap {
                if clamp.is_some_and(|limit| tracker.line + 1 >= limit) {
                    self.clamped = true;
                    self.positions.push(None);
                    i += 1;
                    continue;
                }
                tracker.flush_into(
                    &mut self.line_widths,
                    &mut self.line_baselines,
                    &mut self.line_segments,
                );
                pending_space = false;
            }

            let join = pending_space && tracker.tokens_on_line > 0;
            let x = tracker.current_width + if join { pending_space_width } else { 0.0 };
            if tracker.tokens_on_line == 0 || join {
                tracker.segments_on_line += 1;
            }
            self.positions.push(Some(WordPosition {
                x,
                y: tracker.height,
                width,
                line: tracker.line,
                line_index: tracker.segments_on_line.saturating_sub(1),
            }));
            tracker.current_width = x + width;

            let glyph_height = self.engine.line_height(&text);
            if glyph_height > tracker.current_height {
                tracker.current_height = glyph_height;
                tracker.current_baseline = self.engine.baseline(&text);
            }
            tracker.tokens_on_line += 1;
            pending_space = false;
            i += 1;
        }

        if tracker.tokens_on_line > 0 {
            tracker.flush_into(
                &mut self.line_widths,
                &mut self.line_baselines,
                &mut self.line_segments,
            );
        }

        MeasuredSize { width: tracker.max_width, height: tracker.height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{OutlineRequest, RuledFont};
    use crate::style::{TextStyle, WhiteSpace};
    use crate::text::{segment_runs, StyledRun};

    fn state(content: &str, style: TextStyle) -> FlowState {
        let words = segment_runs(&[StyledRun::new(content)], style.word_break);
        let engine = Box::new(RuledFont::new(style.font_size));
        FlowState::new(style, engine, words)
    }

    fn style_10() -> TextStyle {
        TextStyle { font_size: 10.0, ..TextStyle::default() }
    }

    #[test]
    fn test_single_line_positions() {
        let mut flow = state("Hello World", style_10());
        let size = flow.measure(400.0);
        assert_eq!(size.width, 66.0);
        assert_eq!(size.height, 12.0);
        assert_eq!(flow.positions.len(), flow.words.len());

        let hello = flow.positions[0].unwrap();
        let world = flow.positions[2].unwrap();
        assert_eq!(hello.x, 0.0);
        assert_eq!(world.x, 36.0);
        assert_eq!(world.line, 0);
        assert!(flow.positions[1].is_none());
        assert_eq!(flow.line_widths, vec![66.0]);
        assert_eq!(flow.line_segments, vec![2]);
    }

    #[test]
    fn test_wrap_drops_pending_space() {
        let mut flow = state("Hello World", style_10());
        let size = flow.measure(50.0);
        assert_eq!(flow.line_widths, vec![30.0, 30.0]);
        assert_eq!(size.width, 30.0);
        assert_eq!(size.height, 24.0);

        let world = flow.positions[2].unwrap();
        assert_eq!(world.x, 0.0);
        assert_eq!(world.y, 12.0);
        assert_eq!(world.line, 1);
    }

    #[test]
    fn test_separator_runs_collapse() {
        let mut flow = state("a  b\n c", style_10());
        let size = flow.measure(400.0);
        assert_eq!(flow.line_count(), 1);
        // a, space, b, space, c
        assert_eq!(size.width, 30.0);
    }

    #[test]
    fn test_trailing_separator_adds_no_width() {
        let mut flow = state("ab ", style_10());
        let size = flow.measure(400.0);
        assert_eq!(size.width, 12.0);
        assert_eq!(flow.line_widths, vec![12.0]);
    }

    #[test]
    fn test_leading_separator_collapses() {
        let mut flow = state("  ab", style_10());
        flow.measure(400.0);
        let ab = flow.positions[1].unwrap();
        assert_eq!(ab.x, 0.0);
        assert_eq!(flow.line_widths, vec![12.0]);
    }

    #[test]
    fn test_forced_break_pre() {
        let style = TextStyle { white_space: WhiteSpace::Pre, ..style_10() };
        let mut flow = state("a\nb", style);
        let size = flow.measure(400.0);
        assert_eq!(flow.line_count(), 2);
        assert_eq!(size.height, 24.0);
        assert_eq!(flow.positions[2].unwrap().line, 1);
    }

    #[test]
    fn test_pre_preserves_spaces() {
        let style = TextStyle { white_space: WhiteSpace::Pre, ..style_10() };
        let mut flow = state("a  b", style);
        let size = flow.measure(20.0);
        // no wrapping, no collapsing
        assert_eq!(flow.line_count(), 1);
        assert_eq!(size.width, 24.0);
    }

    #[test]
    fn test_pre_line_collapses_but_breaks() {
        let style = TextStyle { white_space: WhiteSpace::PreLine, ..style_10() };
        let mut flow = state("a  b\nc", style);
        flow.measure(400.0);
        assert_eq!(flow.line_widths, vec![18.0, 6.0]);
    }

    #[test]
    fn test_nowrap_never_wraps() {
        let style = TextStyle { white_space: WhiteSpace::Nowrap, ..style_10() };
        let mut flow = state("Hello World", style);
        let size = flow.measure(10.0);
        assert_eq!(flow.line_count(), 1);
        assert_eq!(size.width, 66.0);
    }

    #[test]
    fn test_closing_punctuation_stays_on_line() {
        let mut flow = state("ab!", style_10());
        // "ab" and "!" tokenize separately; "!" may not start a line
        flow.measure(13.0);
        assert_eq!(flow.line_count(), 1);
        assert_eq!(flow.line_widths, vec![18.0]);
    }

    #[test]
    fn test_punctuation_after_space_wraps() {
        let mut flow = state("ab !", style_10());
        flow.measure(13.0);
        assert_eq!(flow.line_count(), 2);
        assert_eq!(flow.positions[2].unwrap().line, 1);
    }

    #[test]
    fn test_break_word_splices_graphemes() {
        let style = TextStyle { word_break: WordBreak::BreakWord, ..style_10() };
        let mut flow = state("abcd", style);
        let size = flow.measure(13.0);
        // placeholder plus one grapheme per word
        assert_eq!(flow.words.len(), 5);
        assert_eq!(flow.words[0].text, "");
        assert_eq!(flow.positions.len(), flow.words.len());
        assert_eq!(flow.line_count(), 2);
        assert_eq!(size.width, 12.0);

        // repeated measurement is stable after the splice
        let again = flow.measure(13.0);
        assert_eq!(again, size);
        assert_eq!(flow.words.len(), 5);
    }

    #[test]
    fn test_break_word_single_grapheme_overflows() {
        let style = TextStyle { word_break: WordBreak::BreakWord, ..style_10() };
        let mut flow = state("é", style);
        let size = flow.measure(3.0);
        assert_eq!(flow.words.len(), 1);
        assert_eq!(size.width, 6.0);
    }

    #[test]
    fn test_break_word_mid_text_flushes_line() {
        let style = TextStyle { word_break: WordBreak::BreakWord, ..style_10() };
        let mut flow = state("ab cdef", style);
        flow.measure(20.0);
        // "ab" keeps its line, "cdef" splices onto fresh lines
        let ab = flow.positions[0].unwrap();
        assert_eq!(ab.line, 0);
        let first_grapheme = flow.positions.iter().flatten().find(|p| p.line == 1).unwrap();
        assert_eq!(first_grapheme.x, 0.0);
    }

    #[test]
    fn test_zero_available_width_places_one_token_per_line() {
        let mut flow = state("a b c", style_10());
        let size = flow.measure(0.0);
        assert_eq!(flow.line_count(), 3);
        assert_eq!(size.width, 6.0);
    }

    #[test]
    fn test_infinite_available_width_single_line() {
        let mut flow = state("Hello World", style_10());
        let size = flow.measure(f32::INFINITY);
        assert_eq!(flow.line_count(), 1);
        assert_eq!(size.width, 66.0);
    }

    #[test]
    fn test_line_clamp_drops_tokens() {
        let style = TextStyle { line_clamp: Some(2), ..style_10() };
        let mut flow = state("aa bb cc dd", style);
        let size = flow.measure(13.0);
        assert!(flow.clamped);
        assert_eq!(flow.line_count(), 2);
        assert_eq!(size.height, 24.0);
        // cc and dd dropped
        assert!(flow.positions[4].is_none());
        assert!(flow.positions[6].is_none());
    }

    #[test]
    fn test_justify_segment_counting() {
        let mut flow = state("aa bb cc", style_10());
        flow.measure(400.0);
        assert_eq!(flow.line_segments, vec![3]);
        assert_eq!(flow.positions[0].unwrap().line_index, 0);
        assert_eq!(flow.positions[2].unwrap().line_index, 1);
        assert_eq!(flow.positions[4].unwrap().line_index, 2);
    }

    #[test]
    fn test_adjacent_runs_share_segment() {
        let words = segment_runs(
            &[StyledRun::new("He"), StyledRun::with_color("llo", "red")],
            WordBreak::Normal,
        );
        let style = style_10();
        let engine = Box::new(RuledFont::new(10.0));
        let mut flow = FlowState::new(style, engine, words);
        flow.measure(400.0);
        assert_eq!(flow.line_segments, vec![1]);
        assert_eq!(flow.positions[1].unwrap().x, 12.0);
        assert_eq!(flow.positions[1].unwrap().line_index, 0);
    }

    #[test]
    fn test_image_token_width_is_font_size() {
        let mut style = style_10();
        style.grapheme_images.insert("⚡".into(), "data:image/svg+xml;a".into());
        let mut flow = state("a⚡b", style);
        let size = flow.measure(400.0);
        assert_eq!(size.width, 22.0);
        let image = flow.positions[1].unwrap();
        assert_eq!(image.x, 6.0);
        assert_eq!(image.width, 10.0);
    }

    #[test]
    fn test_width_memo_measures_content_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct CountingFont {
            inner: RuledFont,
            calls: Rc<Cell<usize>>,
        }
        impl FontEngine for CountingFont {
            fn has_coverage(&self, text: &str) -> bool {
                self.inner.has_coverage(text)
            }
            fn measure(&self, text: &str, style: &TextStyle) -> f32 {
                self.calls.set(self.calls.get() + 1);
                self.inner.measure(text, style)
            }
            fn line_height(&self, text: &str) -> f32 {
                self.inner.line_height(text)
            }
            fn baseline(&self, text: &str) -> f32 {
                self.inner.baseline(text)
            }
            fn outline(&self, text: &str, request: &OutlineRequest) -> String {
                self.inner.outline(text, request)
            }
        }

        let calls = Rc::new(Cell::new(0));
        let words = segment_runs(&[StyledRun::new("ab ab ab")], WordBreak::Normal);
        let engine =
            Box::new(CountingFont { inner: RuledFont::new(10.0), calls: calls.clone() });
        let mut flow = FlowState::new(style_10(), engine, words);
        flow.measure(400.0);
        // distinct contents only: "ab" and " "
        assert_eq!(calls.get(), 2);
        flow.measure(200.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_tallest_token_sets_line_baseline() {
        struct TallCaps {
            base: RuledFont,
        }
        impl FontEngine for TallCaps {
            fn has_coverage(&self, text: &str) -> bool {
                self.base.has_coverage(text)
            }
            fn measure(&self, text: &str, style: &TextStyle) -> f32 {
                self.base.measure(text, style)
            }
            fn line_height(&self, text: &str) -> f32 {
                if text.contains('X') { 20.0 } else { 12.0 }
            }
            fn baseline(&self, text: &str) -> f32 {
                if text.contains('X') { 16.0 } else { 9.0 }
            }
            fn outline(&self, text: &str, request: &OutlineRequest) -> String {
                self.base.outline(text, request)
            }
        }

        let words = segment_runs(&[StyledRun::new("ab X cd")], WordBreak::Normal);
        let mut flow =
            FlowState::new(style_10(), Box::new(TallCaps { base: RuledFont::new(10.0) }), words);
        let size = flow.measure(400.0);
        assert_eq!(size.height, 20.0);
        assert_eq!(flow.line_baselines, vec![16.0]);
    }
}
