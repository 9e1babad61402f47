#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Might and Magic adapters.
//!
//! Scenes are described in a fixed logical canvas. Backends scale the canvas
//! to the window, letterboxing when the aspect ratios differ, and translate
//! pointer positions back into logical coordinates before handing them to
//! the screen state machine.

use anyhow::Result as AnyResult;
use glam::Vec2;
use might_and_magic_core::{InputEvent, RoomKind};
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Identifies an image the backend may draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKey {
    /// Title art shown during the intro.
    Title,
    /// Main menu background.
    MainMenu,
    /// Character selection background.
    CharacterSelect,
    /// Options placeholder background.
    Options,
    /// Room illustration.
    Room {
        /// Encounter category of the room.
        kind: RoomKind,
        /// Image variant within the category.
        variant: u8,
    },
    /// Face drawn behind button labels.
    ButtonFace,
    /// Parchment drawn behind the description panel.
    Paper,
}

impl AssetKey {
    /// Solid fill drawn in place of the image when it is unavailable.
    #[must_use]
    pub const fn placeholder_color(self) -> Color {
        match self {
            Self::Title => Color::from_rgb_u8(24, 16, 48),
            Self::MainMenu => Color::from_rgb_u8(32, 24, 56),
            Self::CharacterSelect => Color::from_rgb_u8(40, 32, 24),
            Self::Options => Color::from_rgb_u8(48, 48, 48),
            Self::Room { kind, .. } => match kind {
                RoomKind::Trap => Color::from_rgb_u8(96, 24, 24),
                RoomKind::Encounter => Color::from_rgb_u8(88, 56, 16),
                RoomKind::Treasure => Color::from_rgb_u8(112, 96, 16),
                RoomKind::Empty => Color::from_rgb_u8(40, 40, 40),
                RoomKind::Npc => Color::from_rgb_u8(24, 64, 96),
                RoomKind::Exit => Color::from_rgb_u8(24, 96, 48),
            },
            Self::ButtonFace => Color::from_rgb_u8(70, 70, 70),
            Self::Paper => Color::from_rgb_u8(222, 205, 168),
        }
    }
}

/// Fixed coordinate space in which scenes and pointer input are expressed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogicalCanvas {
    width: f32,
    height: f32,
}

impl LogicalCanvas {
    /// Creates a canvas, rejecting non-finite or non-positive extents.
    pub fn new(width: f32, height: f32) -> Result<Self, RenderingError> {
        let valid = |extent: f32| extent.is_finite() && extent > 0.0;
        if !valid(width) || !valid(height) {
            return Err(RenderingError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    /// Horizontal extent in logical units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent in logical units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Extent as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Uniform scale and offset that fit a [`LogicalCanvas`] inside a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    canvas: LogicalCanvas,
    scale: f32,
    offset: Vec2,
}

impl Viewport {
    /// Fits `canvas` into a window of `screen` pixels, centring it and
    /// leaving bars on the axis with spare room.
    #[must_use]
    pub fn fit(canvas: LogicalCanvas, screen: Vec2) -> Self {
        let scale = (screen.x / canvas.width)
            .min(screen.y / canvas.height)
            .max(0.0);
        let offset = ((screen - canvas.size() * scale) * 0.5).max(Vec2::ZERO);
        Self {
            canvas,
            scale,
            offset,
        }
    }

    /// Pixels per logical unit.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Top-left corner of the canvas in window pixels.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Converts a logical point to window pixels.
    #[must_use]
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    /// Converts a window pixel to logical coordinates.
    ///
    /// Returns `None` when the pixel falls on a letterbox bar or the window
    /// has collapsed to zero size.
    #[must_use]
    pub fn to_logical(&self, pixel: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        let logical = (pixel - self.offset) / self.scale;
        let inside = logical.x >= 0.0
            && logical.y >= 0.0
            && logical.x < self.canvas.width
            && logical.y < self.canvas.height;
        inside.then_some(logical)
    }
}

/// Clickable button drawn on top of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneButton {
    /// Text centred on the button.
    pub label: String,
    /// Top-left corner in logical units.
    pub origin: Vec2,
    /// Extent in logical units.
    pub size: Vec2,
    /// Optional image drawn behind the label.
    pub face: Option<AssetKey>,
}

impl SceneButton {
    /// Creates a button without a face image.
    #[must_use]
    pub fn new(label: impl Into<String>, origin: Vec2, size: Vec2) -> Self {
        Self {
            label: label.into(),
            origin,
            size,
            face: None,
        }
    }

    /// Draws the provided image behind the label.
    #[must_use]
    pub fn with_face(mut self, face: AssetKey) -> Self {
        self.face = Some(face);
        self
    }
}

/// Text panel drawn over the backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePanel {
    /// Top-left corner in logical units.
    pub origin: Vec2,
    /// Extent in logical units.
    pub size: Vec2,
    /// Lines of text drawn top to bottom.
    pub lines: Vec<String>,
    /// Optional image drawn behind the text.
    pub paper: Option<AssetKey>,
}

/// Scene description for a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Image stretched across the whole canvas.
    pub background: Option<AssetKey>,
    /// Heading drawn near the top of the canvas.
    pub heading: Option<String>,
    /// Buttons in drawing order.
    pub buttons: Vec<SceneButton>,
    /// Optional text panel.
    pub panel: Option<ScenePanel>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Coordinate space of the scene.
    pub canvas: LogicalCanvas,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, canvas: LogicalCanvas, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            canvas,
            scene,
        }
    }
}

/// Input captured by the backend during one frame, in arrival order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Events with pointer positions already in logical coordinates.
    pub events: Vec<InputEvent>,
}

/// Decision returned by the frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Draw the scene and keep running.
    Continue,
    /// Close the window and return from [`RenderingBackend::run`].
    Exit,
}

/// Rendering backend capable of presenting Might and Magic scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the frame callback requests an exit.
    ///
    /// The `update_scene` closure receives the input gathered for the frame
    /// and rewrites the scene before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameOutcome + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// The logical canvas must have a positive, finite extent.
    #[error("logical canvas must be positive and finite (received {width}x{height})")]
    InvalidCanvas {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}
