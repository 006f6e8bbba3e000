//! Box style subset applied to layout nodes.
//!
//! The renderer owns the full style system; the flow engine only needs the
//! handful of flex properties that influence text measurement, so the
//! wrapper stays deliberately small and converts to the engine's own style
//! type at node creation.

/// Length or automatic sizing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Points(f32),
    /// Fraction of the parent dimension (0.0 to 1.0).
    Percent(f32),
}

impl Dimension {
    pub(crate) fn to_taffy(self) -> taffy::Dimension {
        match self {
            Dimension::Auto => taffy::Dimension::Auto,
            Dimension::Points(v) => taffy::Dimension::Length(v),
            Dimension::Percent(v) => taffy::Dimension::Percent(v),
        }
    }
}

/// Per-side thickness in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    pub(crate) fn to_taffy(self) -> taffy::Rect<taffy::LengthPercentage> {
        taffy::Rect {
            top: taffy::LengthPercentage::Length(self.top),
            right: taffy::LengthPercentage::Length(self.right),
            bottom: taffy::LengthPercentage::Length(self.bottom),
            left: taffy::LengthPercentage::Length(self.left),
        }
    }
}

/// Main axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

impl FlexDirection {
    pub(crate) fn to_taffy(self) -> taffy::FlexDirection {
        match self {
            FlexDirection::Row => taffy::FlexDirection::Row,
            FlexDirection::Column => taffy::FlexDirection::Column,
        }
    }
}

/// Cross-axis alignment of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    Start,
    End,
    Center,
    Baseline,
    #[default]
    Stretch,
}

impl AlignItems {
    pub(crate) fn to_taffy(self) -> taffy::AlignItems {
        match self {
            AlignItems::Start => taffy::AlignItems::FlexStart,
            AlignItems::End => taffy::AlignItems::FlexEnd,
            AlignItems::Center => taffy::AlignItems::Center,
            AlignItems::Baseline => taffy::AlignItems::Baseline,
            AlignItems::Stretch => taffy::AlignItems::Stretch,
        }
    }
}

/// Main-axis distribution of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
}

impl JustifyContent {
    pub(crate) fn to_taffy(self) -> taffy::JustifyContent {
        match self {
            JustifyContent::Start => taffy::JustifyContent::FlexStart,
            JustifyContent::End => taffy::JustifyContent::FlexEnd,
            JustifyContent::Center => taffy::JustifyContent::Center,
            JustifyContent::SpaceBetween => taffy::JustifyContent::SpaceBetween,
            JustifyContent::SpaceAround => taffy::JustifyContent::SpaceAround,
        }
    }
}

/// Style subset the renderer applies to box nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxStyle {
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,
    pub flex_grow: f32,
    /// `None` resolves to the CSS initial value of 1.
    pub flex_shrink: Option<f32>,
    pub flex_direction: FlexDirection,
    pub align_items: AlignItems,
    pub justify_content: JustifyContent,
    pub padding: Edges,
    pub border: Edges,
}

impl BoxStyle {
    pub(crate) fn to_taffy(&self) -> taffy::Style {
        taffy::Style {
            size: taffy::Size {
                width: self.width.to_taffy(),
                height: self.height.to_taffy(),
            },
            min_size: taffy::Size {
                width: self.min_width.to_taffy(),
                height: self.min_height.to_taffy(),
            },
            max_size: taffy::Size {
                width: self.max_width.to_taffy(),
                height: self.max_height.to_taffy(),
            },
            flex_grow: self.flex_grow,
            flex_shrink: self.flex_shrink.unwrap_or(1.0),
            flex_direction: self.flex_direction.to_taffy(),
            align_items: Some(self.align_items.to_taffy()),
            justify_content: Some(self.justify_content.to_taffy()),
            padding: self.padding.to_taffy(),
            border: self.border.to_taffy(),
            ..taffy::Style::default()
        }
    }
}
