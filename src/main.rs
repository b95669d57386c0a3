// What you SEE:
// • A dark machine floor with a grid and a white canvas on it.
// • The pen head (crosshair) works through its queue: a warm-up pass, then
//   the picture painted row by row, one color layer at a time.
// • Cyan guide = pen down, red guide = pen travelling up.
// • M cycles PATH / BRUSH / BOTH. R restarts the program. ESC quits.
// • Resizing the window rebuilds the machine and starts the program over.

use paint_robot::config::SketchConfig;
use paint_robot::draw::{self, Drawer, Viewport, draw_crosshair, draw_text_5x7};
use paint_robot::error::Error;
use paint_robot::logging::init_logging;
use paint_robot::session::Session;
use paint_robot::types::{FrameBuffer, Rgba};
use std::time::{Duration, Instant};

const HEAD_COLOR: Rgba = Rgba::rgb(0xFF, 0xCC, 0x33);

fn main() -> Result<(), Error> {
    init_logging();

    /* --- Session: config, picture, script, machine --- */
    let config = SketchConfig::from_env()?;
    let (win_w, win_h, fps, padding) = (config.window_width, config.window_height, config.fps, config.padding);
    let mut session = Session::new(config)?;
    log::info!("{} actions queued", session.machine().tool().pending());

    let mut drawer = Drawer::new("Paint Robot", win_w, win_h, fps)?;

    /* --- Buffers ---
       `paint` keeps every stroke laid down so far (never cleared between frames);
       `screen` is paint + head + HUD, rebuilt each frame. */
    let (w, h) = drawer.size();
    let mut paint = FrameBuffer::new(w, h);
    let mut screen = FrameBuffer::new(w, h);
    let mut view = Viewport::fit(session.machine().size(), (w, h), padding);
    render_floor(&mut paint, &view, &session);

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Resize: new buffers, new scale, program starts over. */
        let (sw, sh) = drawer.size();
        if (sw, sh) != (paint.width, paint.height) && sw > 0 && sh > 0 {
            log::info!("window resized to {}x{}", sw, sh);
            paint = FrameBuffer::new(sw, sh);
            screen = FrameBuffer::new(sw, sh);
            view = Viewport::fit(session.machine().size(), (sw, sh), padding);
            session.rebuild();
            render_floor(&mut paint, &view, &session);
        }

        /* 2) Inputs */
        if drawer.r_pressed_once() {
            session.rebuild();
            render_floor(&mut paint, &view, &session);
        }
        if drawer.m_pressed_once() {
            log::info!("draw mode: {}", session.cycle_mode());
        }

        /* 3) One machine tick; whatever it drew goes onto the paint layer. */
        for cmd in session.machine_mut().run(now) {
            draw::apply(&mut paint, &view, &cmd);
        }

        /* 4) Compose: paint, pen head, HUD */
        screen.pixels.copy_from_slice(&paint.pixels);

        let head = view.to_px(session.machine().tool().location());
        draw_crosshair(&mut screen, head.x.round() as i32, head.y.round() as i32, 8, HEAD_COLOR);

        let tool = session.machine().tool();
        let hud = format!("QUEUE: {} | {} | {}", tool.pending(), tool.mode(), hud_fps_text);
        draw_text_5x7(&mut screen, 8, 8, &hud, Rgba::WHITE);

        /* 5) Present */
        drawer.present(&screen)?;

        /* 6) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::info!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

/// Machine floor, grid and canvases; wipes any paint.
fn render_floor(fb: &mut FrameBuffer, view: &Viewport, session: &Session) {
    for cmd in session.machine().render() {
        draw::apply(fb, view, &cmd);
    }
}
