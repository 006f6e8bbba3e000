//! Text style model: closed enumerations with CSS-string parsing.
//!
//! Invalid enumerated values never fail a flow; they fall back to the CSS
//! initial value and leave a debug trace.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

pub use gravure_plate::{DecorationKind, Shadow, StrokeStyle};

/// How white space inside the text is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    #[default]
    Normal,
    Pre,
    PreWrap,
    PreLine,
    Nowrap,
}

impl WhiteSpace {
    pub fn from_css(value: &str) -> Self {
        match value {
            "normal" => Self::Normal,
            "pre" => Self::Pre,
            "pre-wrap" => Self::PreWrap,
            "pre-line" => Self::PreLine,
            "nowrap" => Self::Nowrap,
            other => {
                tracing::debug!("unknown white-space value: {}", other);
                Self::default()
            }
        }
    }

    /// Runs of separators merge into a single pending space.
    #[inline]
    pub const fn collapses_whitespace(self) -> bool {
        matches!(self, Self::Normal | Self::Nowrap | Self::PreLine)
    }

    /// Line-feed tokens force a line break.
    #[inline]
    pub const fn keeps_line_breaks(self) -> bool {
        matches!(self, Self::Pre | Self::PreWrap | Self::PreLine)
    }

    /// Lines may wrap at break opportunities.
    #[inline]
    pub const fn allows_wrap(self) -> bool {
        !matches!(self, Self::Nowrap | Self::Pre)
    }
}

/// Where within a word the line breaker may split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordBreak {
    #[default]
    Normal,
    BreakAll,
    BreakWord,
    KeepAll,
}

impl WordBreak {
    pub fn from_css(value: &str) -> Self {
        match value {
            "normal" => Self::Normal,
            "break-all" => Self::BreakAll,
            "break-word" => Self::BreakWord,
            "keep-all" => Self::KeepAll,
            other => {
                tracing::debug!("unknown word-break value: {}", other);
                Self::default()
            }
        }
    }
}

/// Horizontal placement of lines inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn from_css(value: &str) -> Self {
        match value {
            "start" => Self::Start,
            "end" => Self::End,
            "left" => Self::Left,
            "right" => Self::Right,
            "center" => Self::Center,
            "justify" => Self::Justify,
            other => {
                tracing::debug!("unknown text-align value: {}", other);
                Self::default()
            }
        }
    }
}

/// What happens to content that overflows the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextOverflow {
    #[default]
    Clip,
    Ellipsis,
}

impl TextOverflow {
    pub fn from_css(value: &str) -> Self {
        match value {
            "clip" => Self::Clip,
            "ellipsis" => Self::Ellipsis,
            other => {
                tracing::debug!("unknown text-overflow value: {}", other);
                Self::default()
            }
        }
    }
}

/// Case conversion applied before segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    pub fn from_css(value: &str) -> Self {
        match value {
            "none" => Self::None,
            "uppercase" => Self::Uppercase,
            "lowercase" => Self::Lowercase,
            "capitalize" => Self::Capitalize,
            other => {
                tracing::debug!("unknown text-transform value: {}", other);
                Self::default()
            }
        }
    }
}

/// Decoration rule configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDecoration {
    pub kind: DecorationKind,
    /// Falls back to the text color when absent.
    #[serde(default)]
    pub color: Option<CompactString>,
    #[serde(default)]
    pub stroke: StrokeStyle,
}

impl TextDecoration {
    pub fn underline() -> Self {
        Self { kind: DecorationKind::Underline, color: None, stroke: StrokeStyle::Solid }
    }

    pub fn line_through() -> Self {
        Self { kind: DecorationKind::LineThrough, color: None, stroke: StrokeStyle::Solid }
    }
}

/// Resolved style of one text container.
///
/// Only the properties the flow engine consumes appear here; box-level
/// styling lives on the layout nodes. Defaults mirror CSS initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TextStyle {
    pub font_size: f32,
    pub color: CompactString,
    pub opacity: f32,
    pub letter_spacing: f32,
    pub white_space: WhiteSpace,
    pub word_break: WordBreak,
    pub text_align: TextAlign,
    pub text_overflow: TextOverflow,
    pub text_transform: TextTransform,
    pub text_decoration: Option<TextDecoration>,
    pub text_shadow: Vec<Shadow>,
    /// Maximum rendered line count; further lines are dropped.
    pub line_clamp: Option<usize>,
    pub locale: Locale,
    /// Raw transform value applied to the painted group.
    pub transform: Option<CompactString>,
    pub clip_path_id: Option<CompactString>,
    pub mask_id: Option<CompactString>,
    /// Accumulate glyph geometry for a background-clip:text ancestor.
    pub background_clip_text: bool,
    /// Image replacements keyed by grapheme.
    pub grapheme_images: FxHashMap<CompactString, CompactString>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            color: CompactString::const_new("black"),
            opacity: 1.0,
            letter_spacing: 0.0,
            white_space: WhiteSpace::default(),
            word_break: WordBreak::default(),
            text_align: TextAlign::default(),
            text_overflow: TextOverflow::default(),
            text_transform: TextTransform::default(),
            text_decoration: None,
            text_shadow: Vec::new(),
            line_clamp: None,
            locale: Locale::default(),
            transform: None,
            clip_path_id: None,
            mask_id: None,
            background_clip_text: false,
            grapheme_images: FxHashMap::default(),
        }
    }
}

impl TextStyle {
    /// Effective line clamp, ignoring a meaningless zero.
    #[inline]
    pub(crate) fn effective_line_clamp(&self) -> Option<usize> {
        self.line_clamp.filter(|&n| n > 0)
    }
}
