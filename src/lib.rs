//! Rolling-window oscilloscope: a fixed-capacity sample ring fed once per frame
//! by a synthetic signal, drawn as a line strip with egui.

pub mod error;
pub mod frame_loop;
pub mod ring;
pub mod settings;
pub mod signal;
pub mod ui;

pub use error::{AppError, RingError};
pub use frame_loop::{Clock, FrameLoop, FramePacing, KeyState, MonotonicClock, ZoomScale};
pub use ring::SampleRing;
pub use signal::{SignalComponent, SignalMix, Waveform};
