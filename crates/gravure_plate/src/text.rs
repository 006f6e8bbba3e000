//! Glyph-run fragments.

use compact_str::CompactString;

use crate::markup::{element, escape_text, num};

/// Geometry and paint of one glyph run emitted as a `<text>` element.
#[derive(Debug, Clone)]
pub struct GlyphRun<'a> {
    pub content: &'a str,
    pub left: f32,
    /// Baseline y of the run.
    pub baseline: f32,
    pub font_size: f32,
    pub letter_spacing: f32,
    pub fill: &'a str,
}

/// Build a `<text>` element for a run that is not outline-embedded.
///
/// When `clip_fragment` is set, also returns an unfilled copy of the run for
/// background-clip accumulation.
pub fn text_element(run: &GlyphRun<'_>, clip_fragment: bool) -> (String, Option<String>) {
    let content = escape_text(run.content);
    let mut attrs: Vec<(&str, CompactString)> = vec![
        ("x", num(run.left)),
        ("y", num(run.baseline)),
        ("font-size", num(run.font_size)),
    ];
    if run.letter_spacing != 0.0 {
        attrs.push(("letter-spacing", num(run.letter_spacing)));
    }
    let clip = clip_fragment.then(|| element("text", &attrs, Some(&content)));
    attrs.push(("fill", run.fill.into()));
    (element("text", &attrs, Some(&content)), clip)
}

/// Build a filled `<path>` for an outline-embedded run.
///
/// `fill` of `None` omits the attribute, for fragments used as clip geometry.
pub fn path_element(d: &str, fill: Option<&str>) -> String {
    let mut attrs: Vec<(&str, CompactString)> = Vec::with_capacity(2);
    if let Some(fill) = fill {
        attrs.push(("fill", fill.into()));
    }
    attrs.push(("d", d.into()));
    element("path", &attrs, None)
}

/// A glyph replaced by raster or vector image content.
#[derive(Debug, Clone)]
pub struct ImageGlyph<'a> {
    pub href: &'a str,
    pub left: f32,
    pub top: f32,
    /// Image glyphs are square, sized to the font size.
    pub size: f32,
}

/// Build an `<image>` element for a replaced glyph.
pub fn image_element(glyph: &ImageGlyph<'_>) -> String {
    element(
        "image",
        &[
            ("href", glyph.href.into()),
            ("x", num(glyph.left)),
            ("y", num(glyph.top)),
            ("width", num(glyph.size)),
            ("height", num(glyph.size)),
            ("preserveAspectRatio", "xMidYMid meet".into()),
        ],
        None,
    )
}
