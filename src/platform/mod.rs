//! Platform abstraction layer
//!
//! The host loop (window, event pump) is outside this crate. It hands us:
//! - Input: key/mouse callbacks recorded into [`InputState`], polled once per tick
//! - Time: a monotonic millisecond clock turned into frame deltas by [`FrameClock`]

pub mod input;
pub mod time;

pub use input::{InputSource, InputState, MouseButton, Viewport};
pub use time::{FrameClock, SystemClock, TimeSource};
