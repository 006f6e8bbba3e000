//! Locale-sensitive case transformation.

use compact_str::CompactString;
use unicode_segmentation::UnicodeSegmentation;

use crate::locale::Locale;
use crate::style::TextTransform;

/// Apply `transform` to a run before segmentation.
pub fn apply_transform(content: &str, transform: TextTransform, locale: Locale) -> CompactString {
    match transform {
        TextTransform::None => content.into(),
        TextTransform::Uppercase => locale.uppercase(content).into(),
        TextTransform::Lowercase => locale.lowercase(content).into(),
        TextTransform::Capitalize => capitalize(content, locale),
    }
}

/// Uppercase the first grapheme of every word unit, leaving the rest as-is.
fn capitalize(content: &str, locale: Locale) -> CompactString {
    let mut out = CompactString::with_capacity(content.len());
    for unit in content.split_word_bounds() {
        let mut unit_graphemes = unit.graphemes(true);
        match unit_graphemes.next() {
            Some(first) => {
                out.push_str(&locale.uppercase(first));
                out.push_str(unit_graphemes.as_str());
            }
            None => out.push_str(unit),
        }
    }
    out
}
