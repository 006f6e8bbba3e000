//! Drop-shadow filter definitions.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::markup::{element, num};

/// One drop-shadow layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    #[serde(default)]
    pub blur: f32,
    pub color: CompactString,
}

/// Build a `<defs><filter>` definition stacking every shadow layer.
///
/// The filter region is widened so blurred shadows are not clipped at the
/// glyph bounding box.
pub fn shadow_filter(id: &str, shadows: &[Shadow]) -> String {
    let mut inner = String::new();
    for shadow in shadows {
        inner.push_str(&element(
            "feDropShadow",
            &[
                ("dx", num(shadow.dx)),
                ("dy", num(shadow.dy)),
                // CSS blur radius is twice the Gaussian deviation
                ("stdDeviation", num(shadow.blur / 2.0)),
                ("flood-color", shadow.color.clone()),
            ],
            None,
        ));
    }
    let filter = element(
        "filter",
        &[
            ("id", id.into()),
            ("x", "-50%".into()),
            ("y", "-50%".into()),
            ("width", "200%".into()),
            ("height", "200%".into()),
        ],
        Some(&inner),
    );
    element("defs", &[], Some(&filter))
}
