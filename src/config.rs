// Sketch settings: defaults below, overridden by PAINTBOT_* environment variables.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::canvas::CanvasDimensions;
use crate::error::Error;
use crate::graphic::Palette;
use crate::tool::{DEFAULT_DELAY, DEFAULT_STEP, DrawMode};

pub const DEFAULT_PALETTE: [&str; 5] = ["#000000", "#ffffff", "#f7d51d", "#e23d28", "#8a5a2b"];

#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    // machine floor, mm (roughly 6.5ft square)
    pub machine_width: f32,
    pub machine_height: f32,
    pub grid_size: f32,

    // the one canvas the script paints on (4ft, inset 200mm)
    pub canvas: CanvasDimensions,
    pub canvas_x: f32,
    pub canvas_y: f32,

    pub step_size: f32,
    pub delay: Duration,
    pub mode: DrawMode,

    // window
    pub fps: usize,
    pub padding: f32,
    pub window_width: usize,
    pub window_height: usize,

    // picture to paint; without one the robot only runs the demo moves/script
    pub image: Option<PathBuf>,
    pub max_image_side: u32,
    /// mm per picture pixel
    pub cell_size: f32,
    pub palette: Palette,

    /// JSON array of actions queued after the demo moves
    pub script: Option<PathBuf>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            machine_width: 1980.0,
            machine_height: 1980.0,
            grid_size: 100.0,
            canvas: CanvasDimensions { width: 1220.0, height: 1220.0, thickness: None },
            canvas_x: 200.0,
            canvas_y: 200.0,
            step_size: DEFAULT_STEP,
            delay: DEFAULT_DELAY,
            mode: DrawMode::Both,
            fps: 30,
            padding: 50.0,
            window_width: 900,
            window_height: 900,
            image: None,
            max_image_side: 40,
            cell_size: 30.0,
            palette: default_palette(),
            script: None,
        }
    }
}

fn default_palette() -> Palette {
    Palette::new(
        DEFAULT_PALETTE
            .iter()
            .filter_map(|h| crate::types::Rgba::from_hex(h).ok())
            .collect(),
    )
}

impl SketchConfig {
    /// Build config from the process environment.
    ///
    /// Optional (defaults in `Default`):
    /// - `PAINTBOT_IMAGE`, `PAINTBOT_SCRIPT`: file paths
    /// - `PAINTBOT_MACHINE_WIDTH`, `PAINTBOT_MACHINE_HEIGHT`, `PAINTBOT_GRID_SIZE`
    /// - `PAINTBOT_CANVAS_WIDTH`, `PAINTBOT_CANVAS_HEIGHT`, `PAINTBOT_CANVAS_X`, `PAINTBOT_CANVAS_Y`
    /// - `PAINTBOT_STEP_SIZE` (mm), `PAINTBOT_DELAY_MS`, `PAINTBOT_MODE` (`PATH|BRUSH|BOTH`)
    /// - `PAINTBOT_FPS`, `PAINTBOT_WINDOW_WIDTH`, `PAINTBOT_WINDOW_HEIGHT`
    /// - `PAINTBOT_CELL_SIZE` (mm), `PAINTBOT_MAX_IMAGE_SIDE` (px, 0 = no limit)
    /// - `PAINTBOT_PALETTE`: comma separated hex colors
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();

        let palette = match lookup("PAINTBOT_PALETTE") {
            Some(raw) => {
                let hex: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
                if hex.is_empty() {
                    return Err(config_err("PAINTBOT_PALETTE", &raw, "palette is empty"));
                }
                Palette::from_hex(&hex).map_err(|e| config_err("PAINTBOT_PALETTE", &raw, e))?
            }
            None => d.palette,
        };

        let cfg = Self {
            machine_width: parse(&lookup, "PAINTBOT_MACHINE_WIDTH", d.machine_width)?,
            machine_height: parse(&lookup, "PAINTBOT_MACHINE_HEIGHT", d.machine_height)?,
            grid_size: parse(&lookup, "PAINTBOT_GRID_SIZE", d.grid_size)?,
            canvas: CanvasDimensions {
                width: parse(&lookup, "PAINTBOT_CANVAS_WIDTH", d.canvas.width)?,
                height: parse(&lookup, "PAINTBOT_CANVAS_HEIGHT", d.canvas.height)?,
                thickness: d.canvas.thickness,
            },
            canvas_x: parse(&lookup, "PAINTBOT_CANVAS_X", d.canvas_x)?,
            canvas_y: parse(&lookup, "PAINTBOT_CANVAS_Y", d.canvas_y)?,
            step_size: parse(&lookup, "PAINTBOT_STEP_SIZE", d.step_size)?,
            delay: Duration::from_millis(parse(&lookup, "PAINTBOT_DELAY_MS", d.delay.as_millis() as u64)?),
            mode: parse(&lookup, "PAINTBOT_MODE", d.mode)?,
            fps: parse(&lookup, "PAINTBOT_FPS", d.fps)?,
            padding: d.padding,
            window_width: parse(&lookup, "PAINTBOT_WINDOW_WIDTH", d.window_width)?,
            window_height: parse(&lookup, "PAINTBOT_WINDOW_HEIGHT", d.window_height)?,
            image: lookup("PAINTBOT_IMAGE").map(PathBuf::from),
            max_image_side: parse(&lookup, "PAINTBOT_MAX_IMAGE_SIDE", d.max_image_side)?,
            cell_size: parse(&lookup, "PAINTBOT_CELL_SIZE", d.cell_size)?,
            palette,
            script: lookup("PAINTBOT_SCRIPT").map(PathBuf::from),
        };

        if cfg.cell_size.is_nan() || cfg.cell_size <= 0.0 {
            return Err(config_err("PAINTBOT_CELL_SIZE", &cfg.cell_size.to_string(), "must be positive"));
        }
        Ok(cfg)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| config_err(key, &raw, e)),
        None => Ok(default),
    }
}

fn config_err(key: &'static str, value: &str, reason: impl Display) -> Error {
    Error::Config { key, value: value.to_string(), reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_env_gives_defaults() {
        let cfg = SketchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, SketchConfig::default());
        assert_eq!(cfg.palette.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn overrides_apply() {
        let cfg = SketchConfig::from_lookup(lookup(&[
            ("PAINTBOT_STEP_SIZE", "5"),
            ("PAINTBOT_DELAY_MS", "0"),
            ("PAINTBOT_MODE", "path"),
            ("PAINTBOT_IMAGE", "img/pika_40.png"),
            ("PAINTBOT_PALETTE", "#000, #fff"),
        ]))
        .unwrap();
        assert_eq!(cfg.step_size, 5.0);
        assert_eq!(cfg.delay, Duration::ZERO);
        assert_eq!(cfg.mode, DrawMode::Path);
        assert_eq!(cfg.image, Some(PathBuf::from("img/pika_40.png")));
        assert_eq!(cfg.palette.len(), 2);
    }

    #[test]
    fn bad_values_name_their_key() {
        let err = SketchConfig::from_lookup(lookup(&[("PAINTBOT_FPS", "fast")])).unwrap_err();
        assert!(matches!(err, Error::Config { key: "PAINTBOT_FPS", .. }));

        let err = SketchConfig::from_lookup(lookup(&[("PAINTBOT_PALETTE", "#000,#zzz")])).unwrap_err();
        assert!(matches!(err, Error::Config { key: "PAINTBOT_PALETTE", .. }));

        let err = SketchConfig::from_lookup(lookup(&[("PAINTBOT_CELL_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, Error::Config { key: "PAINTBOT_CELL_SIZE", .. }));
    }
}
