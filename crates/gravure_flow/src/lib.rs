//! Gravure Flow - Inline Text Layout Engine
//!
//! Flows styled text through a flexbox-managed container and paints the
//! result as SVG fragments, for renderers that turn markup trees into
//! vector documents.
//!
//! # Features
//!
//! - **Flexbox Integration**: Text nodes measured inside taffy layouts
//! - **CSS Line Breaking**: white-space, word-break, ellipsis, line-clamp
//! - **Unicode Segmentation**: UAX-29 word and grapheme boundaries
//! - **Pluggable Fonts**: shaping and metrics behind a font engine trait
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    Styled Runs                       │
//! │            (text fragments + overrides)              │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                 Text Preprocessing                   │
//! │          (transform, segment, coverage)              │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                   Flow State                         │
//! │     (line breaking, positions, width memo)  ◄──┐     │
//! └──────────────────────────────────────────────┼──────┘
//!                          │                     │
//!                          ▼                     │
//! ┌───────────────────────────────┐   ┌──────────┴──────┐
//! │          Box Tree             │   │  measure calls  │
//! │     (taffy, committed         │──►│  per available  │
//! │      geometry)                │   │  width          │
//! └───────────────────────────────┘   └─────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                     Painter                          │
//! │   (alignment, truncation, glyph runs, decoration)    │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//!                    SVG fragment
//! ```
//!
//! The flow runs in two phases. [`TextFlow::prepare`] segments the text and
//! reports tokens the current font assets cannot shape; the caller loads
//! whatever is missing and calls [`FlowRequest::resume`]. The resumed flow
//! attaches to a [`BoxTree`], is measured as many times as the box engine
//! needs, and finally paints at its committed position.

pub mod error;
pub mod font;
pub mod layout;
pub mod locale;
pub mod style;
pub mod text;

mod paint;

// Re-exports for convenience
pub use error::FlowError;
pub use font::{FontEngine, OutlineRequest, RuledFont};
pub use gravure_plate::BackgroundClipPaths;
pub use layout::{
    AlignItems, BoxId, BoxStyle, BoxTree, Committed, Dimension, Edges, FlexDirection,
    FlowRequest, JustifyContent, MeasureSource, PaintOptions, TextFlow,
};
pub use locale::Locale;
pub use style::{
    DecorationKind, Shadow, StrokeStyle, TextAlign, TextDecoration, TextOverflow, TextStyle,
    TextTransform, WhiteSpace, WordBreak,
};
pub use text::{segment_runs, StyledRun, Word};

/// Gravure version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
