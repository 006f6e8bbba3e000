//! Text decoration rules (underline and line-through).

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};

use crate::markup::{element, num};

/// Which decoration rule to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecorationKind {
    Underline,
    LineThrough,
}

/// Stroke pattern of a decoration rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Geometry of one decoration rule across a line box.
#[derive(Debug, Clone)]
pub struct DecorationSpec<'a> {
    pub left: f32,
    /// Top of the line box the rule belongs to.
    pub top: f32,
    pub width: f32,
    /// Ascender offset from the top of the line box.
    pub ascender: f32,
    pub font_size: f32,
    pub kind: DecorationKind,
    pub stroke: StrokeStyle,
    pub color: &'a str,
}

/// Build a decoration rule as a `<line>` fragment.
///
/// Rule thickness scales with the font size but never drops below one unit.
pub fn decoration_line(spec: &DecorationSpec<'_>) -> String {
    let thickness = (spec.font_size * 0.1).max(1.0);
    let y = match spec.kind {
        DecorationKind::Underline => spec.top + spec.ascender * 1.1,
        DecorationKind::LineThrough => spec.top + spec.ascender * 0.7,
    };
    let mut attrs: Vec<(&str, CompactString)> = vec![
        ("x1", num(spec.left)),
        ("y1", num(y)),
        ("x2", num(spec.left + spec.width)),
        ("y2", num(y)),
        ("stroke-width", num(thickness)),
        ("stroke", spec.color.into()),
    ];
    match spec.stroke {
        StrokeStyle::Solid => {}
        StrokeStyle::Dashed => {
            attrs.push((
                "stroke-dasharray",
                format_compact!("{} {}", num(thickness * 1.2), num(thickness * 2.0)),
            ));
        }
        StrokeStyle::Dotted => {
            attrs.push(("stroke-dasharray", format_compact!("0 {}", num(thickness * 2.0))));
            attrs.push(("stroke-linecap", "round".into()));
        }
    }
    element("line", &attrs, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: DecorationKind, stroke: StrokeStyle) -> DecorationSpec<'static> {
        DecorationSpec {
            left: 0.0,
            top: 0.0,
            width: 12.0,
            ascender: 9.0,
            font_size: 10.0,
            kind,
            stroke,
            color: "black",
        }
    }

    #[test]
    fn test_underline_solid() {
        let frag = decoration_line(&spec(DecorationKind::Underline, StrokeStyle::Solid));
        insta::assert_snapshot!(
            frag,
            @r###"<line x1="0" y1="9.9" x2="12" y2="9.9" stroke-width="1" stroke="black"/>"###
        );
    }

    #[test]
    fn test_line_through_sits_above_underline() {
        let under = decoration_line(&spec(DecorationKind::Underline, StrokeStyle::Solid));
        let through = decoration_line(&spec(DecorationKind::LineThrough, StrokeStyle::Solid));
        assert!(under.contains("y1=\"9.9\""));
        assert!(through.contains("y1=\"6.3\""));
    }

    #[test]
    fn test_dashed_pattern() {
        let frag = decoration_line(&spec(DecorationKind::Underline, StrokeStyle::Dashed));
        assert!(frag.contains("stroke-dasharray=\"1.2 2\""));
    }

    #[test]
    fn test_dotted_pattern() {
        let frag = decoration_line(&spec(DecorationKind::Underline, StrokeStyle::Dotted));
        assert!(frag.contains("stroke-dasharray=\"0 2\""));
        assert!(frag.contains("stroke-linecap=\"round\""));
    }

    #[test]
    fn test_thickness_floor() {
        let mut s = spec(DecorationKind::Underline, StrokeStyle::Solid);
        s.font_size = 4.0;
        assert!(decoration_line(&s).contains("stroke-width=\"1\""));
        s.font_size = 40.0;
        assert!(decoration_line(&s).contains("stroke-width=\"4\""));
    }
}
