//! Translation of raw window input into screen events.

use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, is_quit_requested, mouse_position,
    KeyCode as MacroquadKeyCode, MouseButton,
};
use might_and_magic_core::{InputEvent, KeyCode};
use might_and_magic_rendering::{FrameInput, Viewport};

/// Physical keys forwarded to the screen state machine.
const TRACKED_KEYS: [(MacroquadKeyCode, KeyCode); 10] = [
    (MacroquadKeyCode::Enter, KeyCode::Enter),
    (MacroquadKeyCode::Escape, KeyCode::Escape),
    (MacroquadKeyCode::W, KeyCode::W),
    (MacroquadKeyCode::A, KeyCode::A),
    (MacroquadKeyCode::S, KeyCode::S),
    (MacroquadKeyCode::D, KeyCode::D),
    (MacroquadKeyCode::Up, KeyCode::Up),
    (MacroquadKeyCode::Down, KeyCode::Down),
    (MacroquadKeyCode::Left, KeyCode::Left),
    (MacroquadKeyCode::Right, KeyCode::Right),
];

/// Accumulates the events observed during a frame.
///
/// A close request is reported once, after every other event of the frame.
#[derive(Clone, Debug, Default)]
pub struct InputCapture {
    events: Vec<InputEvent>,
    close_requested: bool,
}

impl InputCapture {
    /// Records that the window was asked to close.
    pub fn register_close(&mut self) {
        self.close_requested = true;
    }

    /// Records a key press.
    pub fn register_key(&mut self, key: KeyCode) {
        self.events.push(InputEvent::KeyPress(key));
    }

    /// Records a click at window pixel `pixel`, discarding clicks that land
    /// on a letterbox bar.
    pub fn register_click(&mut self, pixel: Vec2, viewport: &Viewport) {
        match viewport.to_logical(pixel) {
            Some(point) => self.events.push(InputEvent::PointerClick {
                x: point.x,
                y: point.y,
            }),
            None => tracing::trace!(x = pixel.x, y = pixel.y, "click outside the canvas"),
        }
    }

    /// Drains the events recorded since the previous call.
    pub fn take_frame(&mut self) -> FrameInput {
        let mut events = std::mem::take(&mut self.events);
        if std::mem::take(&mut self.close_requested) {
            events.push(InputEvent::Terminate);
        }
        FrameInput { events }
    }
}

/// Samples macroquad's input state for the current frame.
pub(crate) fn poll(capture: &mut InputCapture, viewport: &Viewport) {
    for (physical, key) in TRACKED_KEYS {
        if is_key_pressed(physical) {
            capture.register_key(key);
        }
    }

    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        capture.register_click(Vec2::new(x, y), viewport);
    }

    if is_quit_requested() {
        capture.register_close();
    }
}
