// The pen head: an instruction queue plus a stepper that animates moves.
//
// Most calls don't act immediately. They push an `Action`; `run()` later
// either advances the pen one step toward its target, or (once on target)
// pops and executes the next action. Long travel is sliced into steps of at
// most `max_step` mm (plus `ARRIVE_EPSILON` on the last one), one per tick,
// which is what makes the print animate.

use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::brush::{Brush, BrushPatch, BrushShape};
use crate::canvas::Canvas;
use crate::draw::DrawCommand;
use crate::graphic::BooleanLayer;
use crate::types::{Rgba, Vec2};

pub const DEFAULT_STEP: f32 = 20.0;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

// Remaining distances this close to a full step finish in that step, so the
// last step of a move may be up to this much longer than `max_step`.
const ARRIVE_EPSILON: f32 = 1e-4;

const PATH_DOWN: Rgba = Rgba::rgba(0, 255, 255, 100);
const PATH_UP: Rgba = Rgba::rgba(255, 0, 0, 100);

/// One queued instruction. Scripts on disk are JSON arrays of these:
/// `{"op": "move", "x": 10, "y": 0}`, `{"op": "pen_down", "pressure": 0.5}` ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    PenUp,
    PenDown {
        #[serde(default = "full_pressure")]
        pressure: f32,
    },
    ChangeBrush(BrushPatch),
    /// Absolute target.
    Move(Vec2),
    /// Offset from wherever the pen is when this action executes.
    MoveRelative(Vec2),
}

fn full_pressure() -> f32 {
    1.0
}

/// What a moving step draws: the paint, the travel path, or both (path on top).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DrawMode {
    Path,
    Brush,
    #[default]
    Both,
}

impl DrawMode {
    pub fn next(self) -> Self {
        match self {
            DrawMode::Path => DrawMode::Brush,
            DrawMode::Brush => DrawMode::Both,
            DrawMode::Both => DrawMode::Path,
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawMode::Path => "PATH",
            DrawMode::Brush => "BRUSH",
            DrawMode::Both => "BOTH",
        })
    }
}

impl FromStr for DrawMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PATH" => Ok(DrawMode::Path),
            "BRUSH" => Ok(DrawMode::Brush),
            "BOTH" => Ok(DrawMode::Both),
            other => Err(format!("expected PATH, BRUSH or BOTH, got {other:?}")),
        }
    }
}

/// A straight paint stroke covering one horizontal run of cells.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokePath {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Debug, Clone)]
pub struct Tool {
    // 0 = pen up, (0,1] = pressure on the canvas
    intensity: f32,
    brush: Brush,
    max_step: f32,
    location: Vec2,
    target: Vec2,
    draw_mode: DrawMode,
    actions: VecDeque<Action>,
    delay: Duration,
    // None until the first tick, so the first tick is never throttled
    last_tick: Option<Instant>,
}

impl Default for Tool {
    fn default() -> Self {
        Self::new(Vec2::zero())
    }
}

impl Tool {
    pub fn new(start: Vec2) -> Self {
        Self {
            intensity: 0.0,
            brush: Brush::default(),
            max_step: DEFAULT_STEP,
            location: start,
            target: start,
            draw_mode: DrawMode::default(),
            actions: VecDeque::new(),
            delay: DEFAULT_DELAY,
            last_tick: None,
        }
    }

    /* ---------- queued instructions ---------- */

    pub fn pen_up(&mut self) {
        self.push(Action::PenUp);
    }

    /// Pressure in [0,1]. Above 1 is clamped (with a warning), below 0 lifts the pen.
    pub fn pen_down(&mut self, pressure: f32) {
        self.push(Action::PenDown { pressure });
    }

    /// Merge `patch` into the current brush when the action executes.
    pub fn change_brush(&mut self, patch: BrushPatch) {
        self.push(Action::ChangeBrush(patch));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.push(Action::Move(Vec2::new(x, y)));
    }

    pub fn move_relative(&mut self, dx: f32, dy: f32) {
        self.push(Action::MoveRelative(Vec2::new(dx, dy)));
    }

    pub fn up(&mut self, mm: f32) { self.move_relative(0.0, -mm) }
    pub fn down(&mut self, mm: f32) { self.move_relative(0.0, mm) }
    pub fn left(&mut self, mm: f32) { self.move_relative(-mm, 0.0) }
    pub fn right(&mut self, mm: f32) { self.move_relative(mm, 0.0) }

    /// Lift the pen and travel to the canvas's top-left corner.
    pub fn to_canvas(&mut self, canvas: &Canvas) {
        self.pen_up();
        let o = canvas.origin();
        self.move_to(o.x, o.y);
    }

    /// Append scripted actions; each is checked the same way as its method.
    pub fn extend<I: IntoIterator<Item = Action>>(&mut self, actions: I) {
        for action in actions {
            self.push(action);
        }
    }

    /// Queue strokes for density-ordered layers, one stroke per horizontal run.
    /// Each cell is `cell` mm square; `origin` is the picture's top-left corner.
    pub fn paint_image(&mut self, layers: &[BooleanLayer], cell: f32, origin: Vec2) {
        for layer in layers {
            self.change_brush(
                BrushPatch::default()
                    .with_shape(BrushShape::Rect)
                    .with_width(cell)
                    .with_color(layer.color),
            );
            let strokes = layer_strokes(layer, cell, origin);
            log::debug!("layer {}: {} strokes", layer.color.to_hex(), strokes.len());
            for stroke in strokes {
                self.pen_up();
                self.move_to(stroke.start.x, stroke.start.y);
                self.pen_down(1.0);
                self.move_to(stroke.end.x, stroke.end.y);
            }
        }
    }

    /// Drop every queued action and park at the origin.
    pub fn reset(&mut self) {
        self.actions.clear();
        self.location = Vec2::zero();
        self.target = Vec2::zero();
    }

    fn push(&mut self, action: Action) {
        let action = match action {
            Action::PenDown { pressure } if pressure.is_nan() => {
                log::warn!("Invalid pressure NaN, lifting pen");
                Action::PenUp
            }
            Action::PenDown { pressure } if pressure < 0.0 => Action::PenUp,
            Action::PenDown { pressure } if pressure > 1.0 => {
                log::warn!("Invalid pressure {pressure}, setting to 1 (maximum)");
                Action::PenDown { pressure: 1.0 }
            }
            Action::Move(v) | Action::MoveRelative(v) if !v.is_finite() => {
                log::warn!("Dropping move to non-finite position {v:?}");
                return;
            }
            other => other,
        };
        self.actions.push_back(action);
    }

    /* ---------- settings (take effect on the next tick) ---------- */

    /// Max travel per tick in mm. Non-positive sizes are ignored.
    pub fn set_step_size(&mut self, mm: f32) {
        if mm > 0.0 && mm.is_finite() {
            self.max_step = mm;
        } else {
            log::warn!("Invalid step size {mm}, keeping {}", self.max_step);
        }
    }

    /// Minimum time between two ticks that do something.
    pub fn set_speed(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
    }

    /* ---------- state ---------- */

    pub fn mode(&self) -> DrawMode { self.draw_mode }
    pub fn location(&self) -> Vec2 { self.location }
    pub fn target(&self) -> Vec2 { self.target }
    pub fn brush(&self) -> &Brush { &self.brush }
    pub fn intensity(&self) -> f32 { self.intensity }
    pub fn pending(&self) -> usize { self.actions.len() }

    pub fn is_on_target(&self) -> bool {
        self.location == self.target
    }

    pub fn is_idle(&self) -> bool {
        self.is_on_target() && self.actions.is_empty()
    }

    /* ---------- ticking ---------- */

    /// Tick if at least `delay` has passed since the last tick that did something.
    pub fn run(&mut self, now: Instant) -> Vec<DrawCommand> {
        if self.is_idle() {
            return Vec::new();
        }
        if let Some(last) = self.last_tick {
            if now.duration_since(last) < self.delay {
                return Vec::new();
            }
        }
        self.last_tick = Some(now);
        self.step()
    }

    /// One unthrottled tick: move one step if off target, else execute one action.
    pub fn step(&mut self) -> Vec<DrawCommand> {
        if !self.is_on_target() {
            return self.draw_towards();
        }
        match self.actions.pop_front() {
            Some(action) => {
                log::debug!("next action: {:?}", action);
                self.execute(action);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::PenUp => self.intensity = 0.0,
            Action::PenDown { pressure } => self.intensity = pressure,
            Action::ChangeBrush(patch) => self.brush.apply(&patch),
            Action::Move(target) => self.target = target,
            Action::MoveRelative(offset) => {
                let target = self.location + offset;
                if target.is_finite() {
                    self.target = target;
                } else {
                    log::warn!("Relative move {offset:?} from {:?} leaves the float range, skipped", self.location);
                }
            }
        }
    }

    /// Advance at most `max_step` toward the target, returning what the step drew.
    fn draw_towards(&mut self) -> Vec<DrawCommand> {
        let untraveled = self.target - self.location;
        let Some(dir) = untraveled.normalized() else {
            // no usable direction: count as arrived
            self.location = self.target;
            return Vec::new();
        };

        // finish on the target itself rather than a float-drifted neighbour
        let mut next = if untraveled.length() <= self.max_step + ARRIVE_EPSILON {
            self.target
        } else {
            self.location + dir * self.max_step
        };
        // step too small to change a coordinate at this magnitude
        if next == self.location {
            log::debug!("step {} lost to rounding at {:?}, snapping to target", self.max_step, self.location);
            next = self.target;
        }

        let cmds = self.stroke(self.location, next);
        self.location = next;
        cmds
    }

    fn stroke(&self, from: Vec2, to: Vec2) -> Vec<DrawCommand> {
        let mut cmds = Vec::with_capacity(2);
        let pen_down = self.intensity > 0.0;

        if pen_down && matches!(self.draw_mode, DrawMode::Brush | DrawMode::Both) {
            cmds.push(DrawCommand::Ink {
                from,
                to,
                thickness: self.brush.thickness(self.intensity),
                color: self.brush.color,
                shape: self.brush.shape,
            });
        }
        if matches!(self.draw_mode, DrawMode::Path | DrawMode::Both) {
            let (weight, color) = if pen_down { (4.0, PATH_DOWN) } else { (2.0, PATH_UP) };
            cmds.push(DrawCommand::Line { from, to, weight, color });
        }
        cmds
    }
}

/// Maximal runs of `true` cells in one row, as column ranges.
pub fn row_runs(row: &[bool]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &cell) in row.iter().enumerate() {
        match (cell, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..row.len());
    }
    runs
}

/// Run-length encode a layer into strokes along each row's vertical centre.
pub fn layer_strokes(layer: &BooleanLayer, cell: f32, origin: Vec2) -> Vec<StrokePath> {
    layer
        .data
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            let cy = origin.y + y as f32 * cell + cell * 0.5;
            row_runs(row).into_iter().map(move |run| StrokePath {
                start: Vec2::new(origin.x + run.start as f32 * cell, cy),
                end: Vec2::new(origin.x + run.end as f32 * cell, cy),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasDimensions;

    /// Step until idle; returns how many ticks moved the pen.
    fn drain(tool: &mut Tool) -> usize {
        let mut moving = 0;
        for _ in 0..10_000 {
            if tool.is_idle() {
                return moving;
            }
            if !tool.is_on_target() {
                moving += 1;
            }
            tool.step();
        }
        panic!("tool never settled");
    }

    #[test]
    fn arrives_exactly_within_step_budget() {
        let mut tool = Tool::default();
        tool.move_to(100.0, 35.0);
        tool.step(); // executes the move
        let target = Vec2::new(100.0, 35.0);
        let budget = (Vec2::zero().distance(target) / DEFAULT_STEP).ceil() as usize;

        let mut last = Vec2::zero().distance(target);
        let mut ticks = 0;
        while !tool.is_on_target() {
            tool.step();
            let d = tool.location().distance(target);
            assert!(d < last, "no oscillation");
            last = d;
            ticks += 1;
        }
        assert_eq!(tool.location(), target);
        assert!(ticks <= budget, "{ticks} > {budget}");
    }

    #[test]
    fn exact_multiple_of_step_does_not_add_a_tick() {
        let mut tool = Tool::default();
        tool.move_to(0.0, 60.0);
        assert_eq!(drain(&mut tool), 3);
        assert_eq!(tool.location(), Vec2::new(0.0, 60.0));
    }

    #[test]
    fn relative_move_binds_at_execution() {
        let mut tool = Tool::default();
        tool.move_to(10.0, 0.0);
        tool.move_relative(5.0, 0.0);
        drain(&mut tool);
        assert_eq!(tool.location(), Vec2::new(15.0, 0.0));
    }

    #[test]
    fn directional_moves_compose() {
        let mut tool = Tool::default();
        tool.right(500.0);
        tool.down(100.0);
        tool.left(50.0);
        tool.up(25.0);
        drain(&mut tool);
        assert_eq!(tool.location(), Vec2::new(450.0, 75.0));
    }

    #[test]
    fn pressure_is_clamped() {
        let mut tool = Tool::default();
        tool.pen_down(1.5);
        tool.step();
        assert_eq!(tool.intensity(), 1.0);

        tool.pen_down(-1.0);
        tool.step();
        assert_eq!(tool.intensity(), 0.0);

        tool.pen_down(0.25);
        tool.pen_down(f32::NAN);
        tool.step();
        assert_eq!(tool.intensity(), 0.25);
        tool.step();
        assert_eq!(tool.intensity(), 0.0);
    }

    #[test]
    fn non_finite_moves_are_dropped() {
        let mut tool = Tool::default();
        tool.move_to(f32::NAN, 0.0);
        tool.move_relative(0.0, f32::INFINITY);
        assert_eq!(tool.pending(), 0);

        // finite offset, but the sum overflows when it executes
        let mut tool = Tool::new(Vec2::new(f32::MAX, 0.0));
        tool.move_relative(f32::MAX, 0.0);
        tool.pen_down(1.0);
        drain(&mut tool);
        assert_eq!(tool.location(), Vec2::new(f32::MAX, 0.0));
        assert_eq!(tool.intensity(), 1.0);
    }

    #[test]
    fn tiny_step_still_arrives() {
        let mut tool = Tool::new(Vec2::new(1900.0, 0.0));
        tool.set_step_size(0.00005);
        tool.move_to(1901.0, 0.0);
        tool.pen_up();
        drain(&mut tool);
        assert_eq!(tool.location(), Vec2::new(1901.0, 0.0));
    }

    #[test]
    fn steps_never_exceed_max_step_beyond_tolerance() {
        let mut tool = Tool::default();
        tool.set_step_size(7.0);
        tool.move_to(123.4, -56.7);
        tool.step();
        while !tool.is_on_target() {
            let before = tool.location();
            tool.step();
            assert!(before.distance(tool.location()) <= 7.0 + ARRIVE_EPSILON);
        }
        assert_eq!(tool.location(), Vec2::new(123.4, -56.7));
    }

    #[test]
    fn brush_changes_merge() {
        let mut tool = Tool::default();
        tool.change_brush(BrushPatch { min_width: Some(5.0), ..Default::default() });
        tool.change_brush(BrushPatch::default().with_color(Rgba::WHITE));
        drain(&mut tool);
        assert_eq!(tool.brush().min_width, 5.0);
        assert_eq!(tool.brush().color, Rgba::WHITE);
    }

    #[test]
    fn queue_waits_while_moving() {
        let mut tool = Tool::default();
        tool.move_to(100.0, 0.0);
        tool.pen_down(1.0);
        tool.step();
        assert_eq!(tool.pending(), 1);
        for _ in 0..4 {
            tool.step();
            assert_eq!(tool.pending(), 1);
            assert_eq!(tool.intensity(), 0.0);
        }
        tool.step(); // arrives
        assert!(tool.is_on_target());
        assert_eq!(tool.pending(), 1);
        tool.step();
        assert_eq!(tool.pending(), 0);
        assert_eq!(tool.intensity(), 1.0);
    }

    #[test]
    fn run_is_throttled_by_delay() {
        let mut tool = Tool::default();
        tool.set_speed(Duration::from_millis(50));
        tool.move_to(100.0, 0.0);
        let t0 = Instant::now();

        tool.run(t0); // executes the move
        assert_eq!(tool.pending(), 0);
        tool.run(t0 + Duration::from_millis(10));
        assert_eq!(tool.location(), Vec2::zero());
        tool.run(t0 + Duration::from_millis(50));
        assert_eq!(tool.location(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn idle_run_is_a_no_op() {
        let mut tool = Tool::default();
        assert!(tool.run(Instant::now()).is_empty());
        assert!(tool.step().is_empty());
        assert_eq!(tool.location(), Vec2::zero());
    }

    #[test]
    fn zero_length_move_counts_as_arrived() {
        let mut tool = Tool::new(Vec2::new(5.0, 5.0));
        tool.move_to(5.0, 5.0);
        tool.step();
        assert!(tool.is_idle());
        assert!(tool.step().is_empty());
    }

    #[test]
    fn pen_up_travel_draws_red_path_only() {
        let mut tool = Tool::default();
        tool.move_to(10.0, 0.0);
        tool.step();
        let cmds = tool.step();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], DrawCommand::Line { weight, color, .. } if weight == 2.0 && color == PATH_UP));
    }

    #[test]
    fn pen_down_draws_ink_under_path() {
        let mut tool = Tool::default();
        tool.pen_down(0.5);
        tool.move_to(10.0, 0.0);
        tool.step();
        tool.step();
        let cmds = tool.step();
        assert_eq!(cmds.len(), 2);
        match &cmds[0] {
            DrawCommand::Ink { from, to, thickness, .. } => {
                assert_eq!(*from, Vec2::zero());
                assert_eq!(*to, Vec2::new(10.0, 0.0));
                assert_eq!(*thickness, 5.0);
            }
            other => panic!("expected ink, got {other:?}"),
        }
        assert!(matches!(cmds[1], DrawCommand::Line { color, .. } if color == PATH_DOWN));
    }

    #[test]
    fn draw_mode_filters_output() {
        let mut tool = Tool::default();
        tool.set_mode(DrawMode::Brush);
        tool.move_to(10.0, 0.0);
        tool.step();
        assert!(tool.step().is_empty(), "pen up in brush mode leaves no trace");

        tool.set_mode(DrawMode::Path);
        tool.pen_down(1.0);
        tool.move_to(20.0, 0.0);
        tool.step();
        tool.step();
        let cmds = tool.step();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], DrawCommand::Line { .. }));
    }

    #[test]
    fn bad_step_size_is_ignored() {
        let mut tool = Tool::default();
        tool.set_step_size(0.0);
        tool.set_step_size(f32::INFINITY);
        tool.move_to(40.0, 0.0);
        tool.step();
        tool.step();
        assert_eq!(tool.location(), Vec2::new(20.0, 0.0));

        tool.set_step_size(5.0);
        tool.step();
        assert_eq!(tool.location(), Vec2::new(25.0, 0.0));
    }

    #[test]
    fn reset_clears_queue_and_position() {
        let mut tool = Tool::default();
        tool.move_to(100.0, 100.0);
        tool.step();
        tool.step();
        tool.pen_down(1.0);
        tool.reset();
        assert_eq!(tool.pending(), 0);
        assert_eq!(tool.location(), Vec2::zero());
        assert!(tool.is_idle());
    }

    #[test]
    fn to_canvas_lifts_then_moves() {
        let canvas = Canvas::new(CanvasDimensions { width: 10.0, height: 10.0, thickness: None }, 200.0, 150.0);
        let mut tool = Tool::default();
        tool.pen_down(1.0);
        tool.to_canvas(&canvas);
        drain(&mut tool);
        assert_eq!(tool.intensity(), 0.0);
        assert_eq!(tool.location(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn row_runs_are_maximal() {
        assert_eq!(row_runs(&[true, true, false, true]), vec![0..2, 3..4]);
        assert_eq!(row_runs(&[false, false]), Vec::<Range<usize>>::new());
        assert_eq!(row_runs(&[true, true, true]), vec![0..3]);
        assert_eq!(row_runs(&[]), Vec::<Range<usize>>::new());
    }

    #[test]
    fn layer_strokes_span_cells() {
        let layer = BooleanLayer {
            color: Rgba::BLACK,
            data: vec![vec![true, true, false, true], vec![false, true, false, false]],
            density: 2.0,
        };
        let strokes = layer_strokes(&layer, 10.0, Vec2::zero());
        assert_eq!(
            strokes,
            vec![
                StrokePath { start: Vec2::new(0.0, 5.0), end: Vec2::new(20.0, 5.0) },
                StrokePath { start: Vec2::new(30.0, 5.0), end: Vec2::new(40.0, 5.0) },
                StrokePath { start: Vec2::new(10.0, 15.0), end: Vec2::new(20.0, 15.0) },
            ]
        );
    }

    #[test]
    fn paint_image_queues_lift_move_press_move() {
        let layers = vec![
            BooleanLayer { color: Rgba::WHITE, data: vec![vec![false, false, true]], density: 1.0 },
            BooleanLayer { color: Rgba::BLACK, data: vec![vec![true, true, false]], density: 2.0 },
        ];
        let mut tool = Tool::default();
        tool.paint_image(&layers, 10.0, Vec2::new(100.0, 100.0));
        // per layer: brush + 4 per stroke
        assert_eq!(tool.pending(), 10);

        tool.step(); // brush
        tool.step(); // pen up
        tool.step(); // move to start
        assert_eq!(tool.target(), Vec2::new(120.0, 105.0));

        drain(&mut tool);
        assert_eq!(tool.location(), Vec2::new(120.0, 105.0));
        assert_eq!(tool.brush().color, Rgba::BLACK);
        assert_eq!(tool.brush().shape, BrushShape::Rect);
        assert_eq!(tool.brush().max_width, 10.0);
        assert_eq!(tool.intensity(), 1.0);
    }

    #[test]
    fn scripts_load_from_json() {
        let script = r##"[
            {"op": "change_brush", "color": "#ff0000", "max_width": 4},
            {"op": "pen_down", "pressure": 1.5},
            {"op": "move", "x": 3, "y": 4},
            {"op": "move_relative", "x": 1, "y": 0},
            {"op": "pen_up"},
            {"op": "pen_down"}
        ]"##;
        let actions: Vec<Action> = serde_json::from_str(script).unwrap();
        let mut tool = Tool::default();
        assert_eq!(actions[5], Action::PenDown { pressure: 1.0 });
        tool.extend(actions);
        assert_eq!(tool.pending(), 6);
        tool.step();
        tool.step();
        assert_eq!(tool.intensity(), 1.0);
        drain(&mut tool);
        assert_eq!(tool.location(), Vec2::new(4.0, 4.0));
        assert_eq!(tool.brush().color, Rgba::rgb(255, 0, 0));
        assert_eq!(tool.brush().max_width, 4.0);
        assert_eq!(tool.intensity(), 1.0);
    }

    #[test]
    fn draw_mode_parses_and_cycles() {
        assert_eq!("brush".parse::<DrawMode>().unwrap(), DrawMode::Brush);
        assert!("ink".parse::<DrawMode>().is_err());
        assert_eq!(DrawMode::Both.next(), DrawMode::Path);
        assert_eq!(DrawMode::Path.to_string(), "PATH");
    }
}
