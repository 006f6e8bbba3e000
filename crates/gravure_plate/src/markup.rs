//! Element serialization.

use compact_str::{format_compact, CompactString};

/// Serialize one element. `None` children yields a self-closing tag.
///
/// Attribute values are escaped; attribute names and the tag are emitted
/// verbatim and must come from trusted call sites.
pub fn element(tag: &str, attrs: &[(&str, CompactString)], children: Option<&str>) -> String {
    let mut out = String::with_capacity(tag.len() + attrs.len() * 16 + 4);
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&htmlize::escape_attribute(value.as_str()));
        out.push('"');
    }
    match children {
        Some(inner) => {
            out.push('>');
            out.push_str(inner);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        None => out.push_str("/>"),
    }
    out
}

/// Escape text content for element bodies.
pub fn escape_text(content: &str) -> String {
    htmlize::escape_text(content).into_owned()
}

/// Format a coordinate with at most two decimal places, trimming zeros.
pub fn num(value: f32) -> CompactString {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() && rounded.abs() < 1e15 {
        format_compact!("{}", rounded as i64)
    } else {
        format_compact!("{}", rounded)
    }
}
