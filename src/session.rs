// Application state owned by main: the machine plus everything needed to rebuild it.
// A resize (or R) throws the machine away and queues the whole script again.

use std::fs;
use std::path::Path;

use crate::canvas::Canvas;
use crate::config::SketchConfig;
use crate::error::Error;
use crate::graphic::{self, BooleanLayer};
use crate::machine::Machine;
use crate::tool::{Action, DrawMode, Tool};

pub struct Session {
    config: SketchConfig,
    layers: Vec<BooleanLayer>,
    script: Vec<Action>,
    machine: Machine,
}

impl Session {
    /// Load the picture and script named in `config`, then build the machine.
    pub fn new(config: SketchConfig) -> Result<Self, Error> {
        let layers = match &config.image {
            Some(path) => {
                let max_side = (config.max_image_side > 0).then_some(config.max_image_side);
                let img = graphic::load_image(path, max_side)?;
                let colors = graphic::image_to_color_arr(&img);
                log::info!("loaded {} ({}x{})", path.display(), img.width(), img.height());
                graphic::stratify(&colors, &config.palette)
            }
            None => Vec::new(),
        };
        let script = match &config.script {
            Some(path) => load_script(path)?,
            None => Vec::new(),
        };
        Ok(Self::from_parts(config, layers, script))
    }

    pub fn from_parts(config: SketchConfig, layers: Vec<BooleanLayer>, script: Vec<Action>) -> Self {
        let machine = build_machine(&config, &layers, &script);
        Self { config, layers, script, machine }
    }

    /// Fresh machine, fresh tool, script queued again.
    pub fn rebuild(&mut self) {
        self.machine = build_machine(&self.config, &self.layers, &self.script);
        log::info!("machine rebuilt, {} actions queued", self.machine.tool().pending());
    }

    /// PATH -> BRUSH -> BOTH, kept across rebuilds.
    pub fn cycle_mode(&mut self) -> DrawMode {
        self.config.mode = self.config.mode.next();
        self.machine.tool_mut().set_mode(self.config.mode);
        self.config.mode
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }
}

/// Read a JSON array of actions.
pub fn load_script(path: &Path) -> Result<Vec<Action>, Error> {
    let script_err = |reason: String| Error::Script { path: path.to_path_buf(), reason };
    let text = fs::read_to_string(path).map_err(|e| script_err(e.to_string()))?;
    let actions: Vec<Action> = serde_json::from_str(&text).map_err(|e| script_err(e.to_string()))?;
    log::info!("script {}: {} actions", path.display(), actions.len());
    Ok(actions)
}

fn build_machine(config: &SketchConfig, layers: &[BooleanLayer], script: &[Action]) -> Machine {
    let mut machine = Machine::new(config.machine_width, config.machine_height, config.grid_size);
    let canvas = machine.add_canvas(config.canvas, config.canvas_x, config.canvas_y).clone();

    let tool = machine.tool_mut();
    tool.set_step_size(config.step_size);
    tool.set_speed(config.delay);
    tool.set_mode(config.mode);
    instructions(tool, &canvas, script, layers, config.cell_size);
    machine
}

/// The robot's program: a warm-up pass across the floor, the user script,
/// then the picture painted from the canvas's corner.
fn instructions(tool: &mut Tool, canvas: &Canvas, script: &[Action], layers: &[BooleanLayer], cell: f32) {
    tool.pen_up();
    tool.pen_down(1.0);
    tool.right(500.0);
    tool.down(100.0);
    tool.to_canvas(canvas);

    tool.extend(script.iter().cloned());

    if !layers.is_empty() {
        tool.paint_image(layers, cell, canvas.origin());
    }
}
