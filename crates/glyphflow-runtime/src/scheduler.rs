//! Tick scheduling capability

/// Identifies which engine generation a frame callback was requested for.
///
/// Every reset of the animation bumps the generation, so a callback that
/// was already in flight when the state was replaced can be recognised and
/// dropped instead of touching the new state.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct FrameToken {
    pub generation: u64,
}

impl FrameToken {
    pub const fn new(generation: u64) -> Self {
        Self { generation }
    }
}

/// A host timer that can be asked for one more frame callback
///
/// Implementations deliver the token back to the animation driver on the
/// next frame (animation-frame style). At most one request is outstanding
/// at a time; `cancel` drops it.
pub trait TickScheduler {
    /// Ask for a single callback carrying `token`
    fn request_tick(&mut self, token: FrameToken);

    /// Drop any outstanding request
    fn cancel(&mut self);
}

/// A scheduler that stores the pending request until someone takes it.
///
/// Used by headless runs and tests to step frames synchronously.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<FrameToken>,
    /// Total number of requests received
    pub requested: u64,
    /// Total number of cancellations received
    pub cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the outstanding request, if any
    pub fn take(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self, token: FrameToken) {
        self.requested += 1;
        self.pending = Some(token);
    }

    fn cancel(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("cancelled pending frame request");
        }
        self.cancelled += 1;
    }
}
