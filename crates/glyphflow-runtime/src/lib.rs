//! glyphflow Runtime - Frame loop infrastructure
//!
//! Provides the building blocks that decide *when* a physics tick runs:
//! - `FrameClock` - wall-clock throttle to a target tick rate
//! - `WallClock` - monotonic timestamps for driving a `FrameClock`
//! - `TickScheduler` - capability for requesting the next frame callback
//! - `ManualScheduler` - synchronous scheduler for headless runs and tests

mod clock;
mod scheduler;

pub use clock::{FrameClock, WallClock};
pub use scheduler::{FrameToken, ManualScheduler, TickScheduler};
