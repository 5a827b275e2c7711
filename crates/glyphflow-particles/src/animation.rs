//! Drives an engine from host frame callbacks and handles resets

use crate::config::SimulationConfig;
use crate::engine::{EngineStats, SimulationEngine};
use crate::render::{FrameView, RenderSink};
use crate::rng::ParticleRng;
use glyphflow_core::{Mode, Surface};
use glyphflow_runtime::{FrameClock, FrameToken, TickScheduler};
use serde::Serialize;
use std::time::Duration;

/// What a frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The token belonged to a torn-down run, or the animation is stopped.
    /// Nothing was touched and nothing was rescheduled.
    Stale,
    /// Rescheduled, but too early for a physics tick
    Skipped,
    /// Rescheduled, ticked and presented a frame
    Ticked,
}

/// Engine statistics plus frame pacing counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    #[serde(flatten)]
    pub engine: EngineStats,
    pub skipped_frames: u64,
    pub generation: u64,
}

/// Owns the current run and the scheduling capability.
///
/// Changing the text or the mode tears the run down synchronously (cancel
/// the pending callback, drop the engine) and builds a fresh one under a new
/// generation, so callbacks requested for the old run are rejected.
pub struct Animation<S: TickScheduler> {
    config: SimulationConfig,
    scheduler: S,
    clock: FrameClock,
    engine: Option<SimulationEngine>,
    text: String,
    mode: Mode,
    surface: Surface,
    generation: u64,
    running: bool,
    seeds: ParticleRng,
}

impl<S: TickScheduler> Animation<S> {
    pub fn new(config: SimulationConfig, scheduler: S, surface: Surface) -> Self {
        let seeds = match config.seed {
            Some(seed) => ParticleRng::new(seed),
            None => ParticleRng::from_entropy(),
        };
        Self {
            clock: FrameClock::with_target_fps(config.target_fps),
            mode: config.mode,
            config,
            scheduler,
            engine: None,
            text: String::new(),
            surface,
            generation: 0,
            running: false,
            seeds,
        }
    }

    /// Build the engine if needed and request the first frame
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        if self.engine.is_none() {
            self.engine = Some(self.build_engine());
        }
        self.running = true;
        self.scheduler.request_tick(self.token());
    }

    /// Stop scheduling. The current state is kept and `start` resumes it.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("stopping generation {}", self.generation);
        }
        self.running = false;
        self.scheduler.cancel();
        self.generation += 1;
    }

    /// Replace the text and restart the run
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.reset();
    }

    /// Switch the physics model and restart the run
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Inform the run of a new surface extent; positions are not reflowed
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(surface);
        }
    }

    /// Host frame callback. `now` is the host's monotonic timestamp.
    pub fn on_frame(
        &mut self,
        token: FrameToken,
        now: Duration,
        sink: &mut dyn RenderSink,
    ) -> FrameOutcome {
        if !self.running || token.generation != self.generation {
            log::trace!(
                "dropping frame for generation {} (current {})",
                token.generation,
                self.generation
            );
            return FrameOutcome::Stale;
        }
        let Some(engine) = self.engine.as_mut() else {
            return FrameOutcome::Stale;
        };

        self.scheduler.request_tick(FrameToken::new(self.generation));
        if !self.clock.poll(now) {
            return FrameOutcome::Skipped;
        }

        engine.tick(self.clock.elapsed(now));
        engine.pack_instances();
        let frame = FrameView {
            surface: engine.surface(),
            fade_alpha: self.config.fade_alpha,
            particles: engine.particles(),
            instances: engine.instance_data(),
            tick: engine.ticks(),
        };
        sink.present(&frame);
        FrameOutcome::Ticked
    }

    pub fn token(&self) -> FrameToken {
        FrameToken::new(self.generation)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn engine(&self) -> Option<&SimulationEngine> {
        self.engine.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn stats(&self) -> Option<RunStats> {
        self.engine.as_ref().map(|engine| RunStats {
            engine: engine.stats(),
            skipped_frames: self.clock.skipped,
            generation: self.generation,
        })
    }

    fn reset(&mut self) {
        let was_running = self.running;
        self.stop();
        self.engine = None;
        self.clock.reset();
        self.engine = Some(self.build_engine());
        log::debug!("reset to {} in generation {}", self.mode, self.generation);
        if was_running {
            self.running = true;
            self.scheduler.request_tick(self.token());
        }
    }

    fn build_engine(&mut self) -> SimulationEngine {
        let rng = ParticleRng::new(self.seeds.next_seed());
        SimulationEngine::new(&self.text, self.mode, &self.config, self.surface, rng)
    }
}

impl<S: TickScheduler> Drop for Animation<S> {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}
