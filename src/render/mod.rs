pub mod canvas;
pub mod log;
pub mod recording;

pub use canvas::{speed_label, Canvas};
pub use log::LogCanvas;
pub use recording::{DrawCommand, RecordingCanvas};
