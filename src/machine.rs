// The paint robot's print area: one tool, a floor grid, and the canvases on it.

use std::time::Instant;

use crate::canvas::{Canvas, CanvasDimensions};
use crate::draw::{DrawCommand, Stroke};
use crate::tool::Tool;
use crate::types::{Rgba, Vec2};

const FLOOR_FILL: Rgba = Rgba::rgba(255, 255, 255, 20);
const FLOOR_EDGE: Rgba = Rgba::rgba(255, 255, 255, 50);
const GRID_LINE: Rgba = Rgba::rgba(255, 255, 255, 20);

pub struct Machine {
    width: f32,
    height: f32,
    grid_size: f32,
    tool: Tool,
    /// Insertion ordered; readable so scripts can aim the tool at a canvas directly.
    gallery: Vec<Canvas>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(500.0, 500.0, 50.0)
    }
}

impl Machine {
    /// All sizes in mm.
    pub fn new(width: f32, height: f32, grid_size: f32) -> Self {
        Self { width, height, grid_size, tool: Tool::default(), gallery: Vec::new() }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut Tool {
        &mut self.tool
    }

    pub fn gallery(&self) -> &[Canvas] {
        &self.gallery
    }

    /// Add a canvas at (x,y) and hand it back for scripting against.
    pub fn add_canvas(&mut self, dims: CanvasDimensions, x: f32, y: f32) -> &Canvas {
        self.gallery.push(Canvas::new(dims, x, y));
        &self.gallery[self.gallery.len() - 1]
    }

    /// Tick the tool once.
    pub fn run(&mut self, now: Instant) -> Vec<DrawCommand> {
        self.tool.run(now)
    }

    /// Background, grid, then every canvas (white, no outline).
    pub fn render(&self) -> Vec<DrawCommand> {
        let mut cmds = vec![
            DrawCommand::Clear(Rgba::BLACK),
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: self.width,
                h: self.height,
                fill: Some(FLOOR_FILL),
                stroke: Some(Stroke { color: FLOOR_EDGE, weight: 1.0 }),
            },
        ];
        cmds.extend(self.grid());
        cmds.extend(self.gallery.iter().map(|c| DrawCommand::Rect {
            x: c.x(),
            y: c.y(),
            w: c.width(),
            h: c.height(),
            fill: Some(Rgba::WHITE),
            stroke: None,
        }));
        cmds
    }

    /// Grid cells, clipped at the right/bottom edge so partial cells stay inside.
    fn grid(&self) -> Vec<DrawCommand> {
        let mut cells = Vec::new();
        if self.grid_size <= 0.0 {
            return cells;
        }
        let stroke = Some(Stroke { color: GRID_LINE, weight: 1.0 });

        let mut y = 0.0;
        while y < self.height {
            let h = if y + self.grid_size < self.height { self.grid_size } else { self.height - y };
            let mut x = 0.0;
            while x < self.width {
                let w = if x + self.grid_size < self.width { self.grid_size } else { self.width - x };
                cells.push(DrawCommand::Rect { x, y, w, h, fill: None, stroke });
                x += self.grid_size;
            }
            y += self.grid_size;
        }
        cells
    }
}
