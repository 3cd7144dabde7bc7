//! Physical geometry over f32 pixels. The engine only handles horizontal
//! LTR writing, so there is no logical/physical distinction.

pub type Point = euclid::default::Point2D<f32>;
pub type Size = euclid::default::Size2D<f32>;
pub type Vector = euclid::default::Vector2D<f32>;
pub type Rect = euclid::default::Rect<f32>;

/// Per-side pixel quantities (top, right, bottom, left).
pub type Edges = euclid::default::SideOffsets2D<f32>;

pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(Point::new(x, y), Size::new(w, h))
}
