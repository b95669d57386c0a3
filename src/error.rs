// Every variant states *where* things went wrong.
// The stepper itself never fails; these come from the window, files and config.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Opening/decoding the source picture failed
    #[error("image load error ({path}): {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Raw RGBA buffer shorter than width * height * 4
    #[error("pixel buffer holds {got} bytes, {want} needed")]
    PixelBuffer { got: usize, want: usize },

    /// Hex color that could not be parsed
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    /// Bad PAINTBOT_* value
    #[error("config error: {key}={value:?}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Instruction script could not be read or parsed
    #[error("script error ({path}): {reason}")]
    Script { path: PathBuf, reason: String },
}
