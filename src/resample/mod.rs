pub mod channel;
pub mod pipeline;
pub mod schedule;
pub mod spline;

pub use channel::{index_parameters, interpolate_at, resample_channel};
pub use pipeline::{Frame, PreparedLap, ResampledSeries};
pub use schedule::{FrameSchedule, MILLIS_PER_SECOND};
pub use spline::{smooth_path, QuadraticSpline};
