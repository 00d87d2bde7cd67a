pub mod local_frame;

pub use local_frame::{Axis, FrameError, MIN_AXIS_LENGTH, local_frame, normalize3};
