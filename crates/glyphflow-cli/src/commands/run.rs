//! Headless run command

use anyhow::{Context, Result};
use glyphflow_core::{Mode, Surface};
use glyphflow_particles::{
    Animation, FrameOutcome, GridSink, NullSink, RenderSink, SimulationConfig,
};
use glyphflow_runtime::{FrameClock, ManualScheduler, WallClock};
use std::time::Duration;

const DEFAULT_TEXT: &str = "glyphflow";
const PREVIEW_COLUMNS: usize = 80;
const PREVIEW_ROWS: usize = 24;

pub struct RunArgs {
    pub text: Option<String>,
    pub file: Option<String>,
    pub mode: Option<String>,
    pub ticks: u64,
    pub seed: Option<u64>,
    pub width: f32,
    pub height: f32,
    pub config: Option<String>,
    pub ascii: bool,
    pub json: bool,
    pub realtime: bool,
}

/// Where frame timestamps come from
enum Timeline {
    /// Advances by exactly one frame per callback, so every callback ticks
    Stepped { now: Duration, frame: Duration },
    /// Host wall clock, sleeping one frame between callbacks
    Wall { clock: WallClock, frame: Duration },
}

impl Timeline {
    fn new(realtime: bool, frame: Duration) -> Self {
        if realtime {
            Timeline::Wall {
                clock: WallClock::new(),
                frame,
            }
        } else {
            Timeline::Stepped {
                now: Duration::ZERO,
                frame,
            }
        }
    }

    fn now(&self) -> Duration {
        match self {
            Timeline::Stepped { now, .. } => *now,
            Timeline::Wall { clock, .. } => clock.now(),
        }
    }

    fn advance(&mut self) {
        match self {
            Timeline::Stepped { now, frame } => *now += *frame,
            Timeline::Wall { frame, .. } => std::thread::sleep(*frame),
        }
    }
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            log::debug!("loading config from {}", path);
            SimulationConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path))?
        }
        None => SimulationConfig::default(),
    };
    if let Some(mode) = &args.mode {
        config.mode = mode.parse::<Mode>()?;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("Invalid configuration")?;

    let text = match (&args.text, &args.file) {
        (Some(_), Some(_)) => anyhow::bail!("--text and --file are mutually exclusive"),
        (Some(text), None) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path))?,
        (None, None) => DEFAULT_TEXT.to_string(),
    };
    let text = truncate_chars(&text, config.max_chars);

    let surface = Surface::new(args.width, args.height);
    let frame = FrameClock::with_target_fps(config.target_fps).frame_duration();
    let mut timeline = Timeline::new(args.realtime, frame);

    let mut animation = Animation::new(config, ManualScheduler::new(), surface);
    animation.set_text(text);
    animation.start();

    let mut preview = GridSink::new(PREVIEW_COLUMNS, PREVIEW_ROWS);
    let mut discard = NullSink;

    let mut executed = 0;
    while executed < args.ticks {
        let Some(token) = animation.scheduler_mut().take() else {
            break;
        };
        let sink: &mut dyn RenderSink = if args.ascii { &mut preview } else { &mut discard };
        if animation.on_frame(token, timeline.now(), sink) == FrameOutcome::Ticked {
            executed += 1;
            if args.ascii {
                print_preview(&preview, executed);
            }
        }
        timeline.advance();
    }
    animation.stop();
    log::info!("executed {} of {} requested ticks", executed, args.ticks);

    let stats = animation
        .stats()
        .context("Simulation produced no engine")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Mode:           {}", stats.engine.mode);
        println!("Particles:      {}", stats.engine.particles);
        println!("Ticks:          {}", stats.engine.ticks);
        println!("Skipped frames: {}", stats.skipped_frames);
        println!("Kinetic energy: {:.4}", stats.engine.kinetic_energy);
        println!("Max speed:      {:.4}", stats.engine.max_speed);
        if stats.engine.vortices > 0 {
            println!("Vortices:       {}", stats.engine.vortices);
        }
    }
    Ok(())
}

fn print_preview(sink: &GridSink, tick: u64) {
    println!("--- tick {} ---", tick);
    print!("{}", sink.to_text());
}

/// First `max_chars` characters of `text`, cut on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepped_timeline_advances_one_frame() {
        let frame = Duration::from_millis(20);
        let mut timeline = Timeline::new(false, frame);
        assert_eq!(timeline.now(), Duration::ZERO);
        timeline.advance();
        timeline.advance();
        assert_eq!(timeline.now(), frame * 2);
    }

    #[test]
    fn wall_timeline_follows_host_time() {
        let frame = Duration::from_millis(2);
        let mut timeline = Timeline::new(true, frame);
        let before = timeline.now();
        timeline.advance();
        assert!(timeline.now() >= before + frame);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncate_cuts_on_char_boundary() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo wörld", 2), "hé");
        assert_eq!(truncate_chars("日本語", 1), "日");
    }
}
