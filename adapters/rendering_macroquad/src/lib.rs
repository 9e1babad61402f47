#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Might and Magic.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, so the crate depends on macroquad without its default `audio`
//! feature.
//!
//! The backend owns the window and the frame loop. Each frame it samples
//! input, hands it to the caller's update closure together with the scene,
//! then draws whatever the closure left in the scene. Scenes are laid out on
//! a fixed logical canvas that is letterboxed into the window.

mod assets;
mod input;
mod ui;

pub use self::assets::{AssetAtlas, AssetError};
pub use self::input::InputCapture;

use self::ui::{draw_asset, draw_button, draw_heading, draw_panel};
use anyhow::Result;
use glam::Vec2;
use might_and_magic_rendering::{
    FrameInput, FrameOutcome, LogicalCanvas, Presentation, RenderingBackend, Scene, Viewport,
};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    asset_manifest: Option<PathBuf>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            asset_manifest: Some(PathBuf::from("assets/manifest.toml")),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Selects the asset manifest, or disables asset loading with `None` so
    /// every image draws as its placeholder.
    #[must_use]
    pub fn with_asset_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.asset_manifest = manifest;
        self
    }
}

/// Timing of a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns averages once one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames.max(1);
        let metrics = FpsMetrics {
            per_second: self.frames as f32 / seconds,
            avg_update: self.update_accum / frames,
            avg_render: self.render_accum / frames,
        };
        *self = Self::default();
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameOutcome + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            asset_manifest,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            canvas,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: canvas.width().round() as i32,
            window_height: canvas.height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            macroquad::input::prevent_quit();

            let atlas = match &asset_manifest {
                Some(path) => AssetAtlas::load_or_placeholders(path),
                None => AssetAtlas::default(),
            };
            let background = to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut capture = InputCapture::default();
            let mut fps_counter = FpsCounter::default();

            loop {
                macroquad::window::clear_background(background);
                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let viewport = Viewport::fit(canvas, screen);

                let update_start = Instant::now();
                input::poll(&mut capture, &viewport);
                if update_scene(capture.take_frame(), &mut scene) == FrameOutcome::Exit {
                    tracing::info!("frame loop finished");
                    break;
                }
                let update = update_start.elapsed();

                let render_start = Instant::now();
                draw_scene(&scene, canvas, &atlas, &viewport);
                let render = render_start.elapsed();

                let frame = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                let metrics = fps_counter.record_frame(FrameBreakdown {
                    frame,
                    update,
                    render,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        avg_update,
                        avg_render,
                    }) = metrics
                    {
                        tracing::info!(
                            fps = per_second,
                            update_ms = avg_update.as_secs_f64() * 1_000.0,
                            render_ms = avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene, canvas: LogicalCanvas, atlas: &AssetAtlas, viewport: &Viewport) {
    if let Some(background) = scene.background {
        draw_asset(atlas, background, Vec2::ZERO, canvas.size(), viewport);
    }
    if let Some(heading) = &scene.heading {
        draw_heading(heading, canvas.width(), viewport);
    }
    if let Some(panel) = &scene.panel {
        draw_panel(panel, atlas, viewport);
    }
    for button in &scene.buttons {
        draw_button(button, atlas, viewport);
    }
}

fn to_macroquad_color(color: might_and_magic_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
