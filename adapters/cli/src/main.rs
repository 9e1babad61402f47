#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Might and Magic experience.

mod scene;

use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::PathBuf,
    time::Duration,
};

use anyhow::Result;
use clap::{ArgAction, Parser};
use might_and_magic_core::WINDOW_TITLE;
use might_and_magic_rendering::{
    Color, FrameOutcome, LogicalCanvas, Presentation, RenderingBackend, Scene,
};
use might_and_magic_rendering_macroquad::MacroquadBackend;
use might_and_magic_system_screens::{
    Clock, FrameStatus, MonotonicClock, ScreenConfig, Session, DEFAULT_MAX_EVENTS_PER_FRAME,
    SCREEN_HEIGHT, SCREEN_WIDTH,
};
use might_and_magic_world::{generate, query, render_layout, DEFAULT_DUNGEON_SIZE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use self::scene::build_scene;

/// Explore a procedurally generated dungeon.
#[derive(Debug, Parser)]
#[command(name = "might-and-magic", version, about, long_about = None)]
struct CliArgs {
    /// Seed for dungeon generation; a fresh one is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rooms along each edge of generated dungeons.
    #[arg(long, default_value_t = DEFAULT_DUNGEON_SIZE)]
    dungeon_size: NonZeroU32,

    /// Seconds the intro stays on screen without input.
    #[arg(long, default_value = "3", value_parser = parse_seconds)]
    intro_seconds: Duration,

    /// Upper bound on input events handled per frame; the rest wait.
    #[arg(long, default_value_t = DEFAULT_MAX_EVENTS_PER_FRAME)]
    max_events_per_frame: NonZeroUsize,

    /// Asset manifest describing background, room and UI images.
    #[arg(long, default_value = "assets/manifest.toml")]
    assets: PathBuf,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,

    /// Log frames-per-second once per second.
    #[arg(long)]
    show_fps: bool,

    /// Print the generated dungeon layout and exit without opening a window.
    #[arg(long)]
    print_dungeon: bool,
}

impl CliArgs {
    fn screen_config(&self) -> ScreenConfig {
        ScreenConfig {
            dungeon_size: self.dungeon_size,
            intro_duration: self.intro_seconds,
            max_events_per_frame: self.max_events_per_frame,
        }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => {
                tracing::info!(seed, "using fixed seed");
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|error| format!("`{value}` is not a number: {error}"))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("`{value}` must be a finite, non-negative number of seconds"))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the Might and Magic command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let config = args.screen_config();
    let mut rng = args.rng();

    if args.print_dungeon {
        let dungeon = generate(config.dungeon_size, &mut rng);
        let exit = query::exit_position(&dungeon);
        print!("{}", render_layout(&dungeon));
        println!("exit at row {}, column {}", exit.row(), exit.column());
        return Ok(());
    }

    let clock = MonotonicClock::start();
    let mut session = Session::new(rng, config, clock.now());
    let initial_scene = session
        .view()
        .map(|view| build_scene(&view))
        .unwrap_or_default();

    let canvas = LogicalCanvas::new(SCREEN_WIDTH, SCREEN_HEIGHT)?;
    let presentation = Presentation::new(
        WINDOW_TITLE,
        Color::from_rgb_u8(0, 0, 0),
        canvas,
        initial_scene,
    );
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_asset_manifest(Some(args.assets.clone()));

    tracing::info!(
        dungeon_size = config.dungeon_size.get(),
        intro_seconds = config.intro_duration.as_secs_f64(),
        "starting session"
    );

    backend.run(presentation, move |input, scene: &mut Scene| {
        match session.frame(input.events, clock.now()) {
            FrameStatus::Terminated => FrameOutcome::Exit,
            FrameStatus::Running => {
                if let Some(view) = session.view() {
                    *scene = build_scene(&view);
                }
                FrameOutcome::Continue
            }
        }
    })
}
