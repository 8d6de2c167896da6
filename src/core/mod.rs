pub mod error;
pub mod geometry;
pub mod sample;
pub mod session;

pub use error::{ReplayError, ReplayResult};
pub use geometry::{Bounds, Point};
pub use sample::{SampleSeries, TelemetrySample};
pub use session::SessionInfo;
