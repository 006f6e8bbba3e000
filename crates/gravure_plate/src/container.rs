//! Grouping, clipping and background-clip accumulation.

use compact_str::{format_compact, CompactString};

use crate::markup::element;
use crate::markup::num;

/// Wrapper attributes applied around a painted fragment.
#[derive(Debug, Clone)]
pub struct GroupSpec<'a> {
    pub transform: Option<&'a str>,
    pub opacity: f32,
    pub clip_path_id: Option<&'a str>,
    pub mask_id: Option<&'a str>,
    pub filter_id: Option<&'a str>,
}

impl Default for GroupSpec<'_> {
    fn default() -> Self {
        Self {
            transform: None,
            opacity: 1.0,
            clip_path_id: None,
            mask_id: None,
            filter_id: None,
        }
    }
}

/// Wrap `inner` in a `<g>` carrying the spec's attributes.
///
/// Returns `inner` unchanged when no attribute applies.
pub fn transform_group(spec: &GroupSpec<'_>, inner: &str) -> String {
    let mut attrs: Vec<(&str, CompactString)> = Vec::new();
    if let Some(transform) = spec.transform {
        attrs.push(("transform", transform.into()));
    }
    if spec.opacity != 1.0 {
        attrs.push(("opacity", num(spec.opacity)));
    }
    if let Some(id) = spec.clip_path_id {
        attrs.push(("clip-path", format_compact!("url(#{id})")));
    }
    if let Some(id) = spec.mask_id {
        attrs.push(("mask", format_compact!("url(#{id})")));
    }
    if let Some(id) = spec.filter_id {
        attrs.push(("filter", format_compact!("url(#{id})")));
    }
    if attrs.is_empty() {
        return inner.to_owned();
    }
    element("g", &attrs, Some(inner))
}

/// Accumulator for background-clip:text fragments.
///
/// Text painted under a background-clip:text ancestor pushes unfilled copies
/// of its glyph geometry here; the renderer flushes the collected fragments
/// into one `<clipPath>` definition.
#[derive(Debug, Default)]
pub struct BackgroundClipPaths {
    fragments: Vec<String>,
}

impl BackgroundClipPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Flush the collected fragments into a `<clipPath>` definition.
    pub fn into_def(self, id: &str) -> String {
        let inner = element("clipPath", &[("id", id.into())], Some(&self.fragments.concat()));
        element("defs", &[], Some(&inner))
    }
}
