// Window + software drawing utilities.
// 1) A window that shows the machine floor, canvases and paint.
// 2) `DrawCommand`s: what the tool and machine ask to be drawn, in millimetres.
// 3) A rasterizer that turns those commands into pixels (alpha blended).
// 4) A crosshair for the pen head and a tiny 5x7 bitmap font for the HUD.

use crate::brush::BrushShape;
use crate::error::Error;
use crate::types::{FrameBuffer, Rgba, Vec2};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

/// Outline style for a rect. Weight is in screen pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub weight: f32,
}

/// One drawing primitive. Coordinates are machine millimetres.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole frame.
    Clear(Rgba),
    Rect { x: f32, y: f32, w: f32, h: f32, fill: Option<Rgba>, stroke: Option<Stroke> },
    /// Thin guide line; `weight` in screen pixels.
    Line { from: Vec2, to: Vec2, weight: f32, color: Rgba },
    /// Paint laid down between two points; `thickness` in millimetres across the path.
    Ink { from: Vec2, to: Vec2, thickness: f32, color: Rgba, shape: BrushShape },
}

/// Maps machine millimetres to window pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, offset: Vec2::zero() }
    }
}

impl Viewport {
    /// Largest uniform scale that shows the whole machine inside the padded window.
    pub fn fit(machine: Vec2, window: (usize, usize), padding: f32) -> Self {
        let avail_w = (window.0 as f32 - 2.0 * padding).max(1.0);
        let avail_h = (window.1 as f32 - 2.0 * padding).max(1.0);
        let sx = if machine.x > 0.0 { avail_w / machine.x } else { 1.0 };
        let sy = if machine.y > 0.0 { avail_h / machine.y } else { 1.0 };
        Self { scale: sx.min(sy), offset: Vec2::new(padding, padding) }
    }

    #[inline]
    pub fn to_px(&self, mm: Vec2) -> Vec2 {
        self.offset + mm * self.scale
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window. Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size; differs from the framebuffer after a resize.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    // restart: machine rebuilt, script re-queued
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    // cycle PATH -> BRUSH -> BOTH
    pub fn m_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::M, KeyRepeat::No)
    }
}

/* ---------- Command rasterizer ---------- */

/// Draw one command onto the framebuffer.
pub fn apply(fb: &mut FrameBuffer, view: &Viewport, cmd: &DrawCommand) {
    match *cmd {
        DrawCommand::Clear(color) => fb.fill(color),
        DrawCommand::Rect { x, y, w, h, fill, stroke } => {
            let a = view.to_px(Vec2::new(x, y));
            let b = view.to_px(Vec2::new(x + w, y + h));
            if let Some(color) = fill {
                fill_rect(fb, a, b, color);
            }
            if let Some(s) = stroke {
                stroke_rect(fb, a, b, s.weight, s.color);
            }
        }
        DrawCommand::Line { from, to, weight, color } => {
            let (a, b) = (view.to_px(from), view.to_px(to));
            if let Some(quad) = segment_quad(a, b, weight.max(1.0)) {
                fill_quad(fb, &quad, color);
            }
        }
        DrawCommand::Ink { from, to, thickness, color, shape } => {
            let (a, b) = (view.to_px(from), view.to_px(to));
            let width = (thickness * view.scale).max(1.0);
            if let Some(quad) = segment_quad(a, b, width) {
                fill_quad(fb, &quad, color);
            }
            if shape == BrushShape::Round {
                // caps; the start cap overlaps the previous segment's end cap
                fill_disc(fb, b, width * 0.5, color);
                if a.distance(b) == 0.0 {
                    fill_disc(fb, a, width * 0.5, color);
                }
            }
        }
    }
}

/// Blend `color` over the pixel at (x,y) if inside bounds.
/// Visual: translucent colors let the grid and earlier paint show through.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    if color.a == 255 {
        fb.pixels[idx] = color.to_u32();
        return;
    }
    if color.a == 0 {
        return;
    }

    let old = fb.pixels[idx];
    let a = color.a as u32;
    let inv = 255 - a;
    let mix = |src: u8, shift: u32| ((src as u32 * a + ((old >> shift) & 0xFF) * inv + 127) / 255) << shift;
    fb.pixels[idx] = mix(color.r, 16) | mix(color.g, 8) | mix(color.b, 0);
}

/// Fill every pixel whose centre lies inside the axis-aligned box a..b.
fn fill_rect(fb: &mut FrameBuffer, a: Vec2, b: Vec2, color: Rgba) {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    let px0 = (x0 - 0.5).ceil().max(0.0) as i32;
    let py0 = (y0 - 0.5).ceil().max(0.0) as i32;
    let px1 = ((x1 - 0.5).ceil() as i32).min(fb.width as i32);
    let py1 = ((y1 - 0.5).ceil() as i32).min(fb.height as i32);
    for y in py0..py1 {
        for x in px0..px1 {
            blend_pixel(fb, x, y, color);
        }
    }
}

/// Outline drawn inside the box edges so cells never double up on shared borders.
fn stroke_rect(fb: &mut FrameBuffer, a: Vec2, b: Vec2, weight: f32, color: Rgba) {
    let w = weight.max(1.0);
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    fill_rect(fb, Vec2::new(x0, y0), Vec2::new(x1, (y0 + w).min(y1)), color); // top
    fill_rect(fb, Vec2::new(x0, (y1 - w).max(y0 + w)), Vec2::new(x1, y1), color); // bottom
    fill_rect(fb, Vec2::new(x0, y0 + w), Vec2::new((x0 + w).min(x1), y1 - w), color); // left
    fill_rect(fb, Vec2::new((x1 - w).max(x0 + w), y0 + w), Vec2::new(x1, y1 - w), color); // right
}

/// Corners of the rectangle swept by a segment of the given width.
/// `None` for a zero-length segment (no direction to sweep along).
fn segment_quad(a: Vec2, b: Vec2, width: f32) -> Option<[Vec2; 4]> {
    let dir = (b - a).normalized()?;
    let n = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    Some([a + n, b + n, b - n, a - n])
}

/// Fill a convex quad (either winding) by testing pixel centres against its edges.
fn fill_quad(fb: &mut FrameBuffer, quad: &[Vec2; 4], color: Rgba) {
    let min_x = quad.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let max_x = quad.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = quad.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = quad.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

    let px0 = min_x.floor().max(0.0) as i32;
    let py0 = min_y.floor().max(0.0) as i32;
    let px1 = (max_x.ceil() as i32).min(fb.width as i32 - 1);
    let py1 = (max_y.ceil() as i32).min(fb.height as i32 - 1);

    let cross = |o: Vec2, p: Vec2, q: Vec2| (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x);

    for y in py0..=py1 {
        for x in px0..=px1 {
            let c = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let mut pos = false;
            let mut neg = false;
            for i in 0..4 {
                let s = cross(quad[i], quad[(i + 1) % 4], c);
                pos |= s > 0.0;
                neg |= s < 0.0;
            }
            if !(pos && neg) {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

/// Solid disc; used for round brush caps.
fn fill_disc(fb: &mut FrameBuffer, c: Vec2, radius: f32, color: Rgba) {
    if radius <= 0.0 { return; }
    let r2 = radius * radius;
    let (x0, x1) = ((c.x - radius).floor() as i32, (c.x + radius).ceil() as i32);
    let (y0, y1) = ((c.y - radius).floor() as i32, (c.y + radius).ceil() as i32);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - c.x;
            let dy = y as f32 + 0.5 - c.y;
            if dx * dx + dy * dy <= r2 {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

/* ---------- Crosshair for the pen head ---------- */

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        blend_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) marks where the pen head is.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: Rgba) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    blend_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (ASCII subset for "QUEUE: 12 | BRUSH | FPS: 30.0") ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters for QUEUE / PATH / BRUSH / BOTH / FPS
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Rgba) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, Rgba::BLACK), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        blend_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs (5 pixels wide + 1 pixel spacing).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Rgba) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}
