// A canvas is a paintable area on the machine floor. Millimetres.

use crate::types::Vec2;

const DEFAULT_THICKNESS: f32 = 25.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasDimensions {
    pub width: f32,
    pub height: f32,
    /// Stretcher depth; defaults to 25mm.
    pub thickness: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: f32,
    height: f32,
    thickness: f32,
    x: f32,
    y: f32,
}

impl Canvas {
    pub fn new(dims: CanvasDimensions, x: f32, y: f32) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            thickness: dims.thickness.unwrap_or(DEFAULT_THICKNESS),
            x,
            y,
        }
    }

    pub fn width(&self) -> f32 { self.width }
    pub fn height(&self) -> f32 { self.height }
    pub fn thickness(&self) -> f32 { self.thickness }
    pub fn x(&self) -> f32 { self.x }
    pub fn y(&self) -> f32 { self.y }

    /// Top-left corner on the machine floor.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
