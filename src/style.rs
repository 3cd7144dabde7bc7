use crate::error::Error;

/// The display values the builder understands. An absent or empty
/// computed value means `inline`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Display {
    None,
    Inline,
    Block,
    InlineBlock,
}

impl Display {
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "" | "inline" => Ok(Display::Inline),
            "none" => Ok(Display::None),
            "block" => Ok(Display::Block),
            "inline-block" => Ok(Display::InlineBlock),
            other => Err(Error::not_implemented(format!("display value {:?}", other))),
        }
    }
}

/// A computed length. Percentages are stored in the unit interval
/// (`Percent(0.5)` is 50%).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
    Em(f32),
    Auto,
}

impl Length {
    pub fn zero() -> Self {
        Length::Px(0.)
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Length::Auto)
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::zero()
    }
}

/// Per-side computed lengths (top, right, bottom, left).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EdgeLengths {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl EdgeLengths {
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }
}

/// The computed style slice the core consumes. A `font_size_px` of zero
/// means "inherit from context".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComputedStyle {
    pub width: Length,
    pub margin: EdgeLengths,
    pub padding: EdgeLengths,
    pub border: EdgeLengths,
    pub font_size_px: f32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            width: Length::Auto,
            margin: EdgeLengths::default(),
            padding: EdgeLengths::default(),
            border: EdgeLengths::default(),
            font_size_px: 0.,
        }
    }
}
