//! Simulated paint robot: a pen head that works through a queue of
//! instructions, animating every move across a virtual machine floor.
//!
//! A picture is split into one boolean layer per palette color
//! ([`graphic::stratify`]); each layer becomes horizontal strokes
//! ([`tool::Tool::paint_image`]); the tool then plays them back one step per
//! tick, emitting [`draw::DrawCommand`]s for whatever renders them.

pub mod brush;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod graphic;
pub mod logging;
pub mod machine;
pub mod session;
pub mod tool;
pub mod types;
