//! Plate - SVG fragment builders for the Gravure renderer.
//!
//! Every builder returns a plain `String` fragment; the caller stitches
//! fragments together into the final document:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ markup      element serialization + escaping   │
//! │ text        glyph runs, outlines, image glyphs │
//! │ decoration  underline / line-through rules     │
//! │ shadow      drop-shadow filter definitions     │
//! │ container   groups, clip paths, accumulators   │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Numeric attributes are rounded to two decimal places so fragments stay
//! stable across runs and platforms.

pub mod container;
pub mod decoration;
pub mod markup;
pub mod shadow;
pub mod text;

pub use container::{transform_group, BackgroundClipPaths, GroupSpec};
pub use decoration::{decoration_line, DecorationKind, DecorationSpec, StrokeStyle};
pub use markup::{element, num};
pub use shadow::{shadow_filter, Shadow};
pub use text::{image_element, path_element, text_element, GlyphRun, ImageGlyph};
