//! Immediate-mode drawing of scene elements.
//!
//! Every function here takes logical geometry and a [`Viewport`]; nothing
//! outside this module converts to window pixels.

use glam::Vec2;
use macroquad::{
    color::{Color as MacroquadColor, BLACK, WHITE},
    math::Vec2 as MacroquadVec2,
    shapes::{draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
    texture::{draw_texture_ex, DrawTextureParams},
};
use might_and_magic_rendering::{AssetKey, SceneButton, ScenePanel, Viewport};

use crate::{assets::AssetAtlas, to_macroquad_color};

const LABEL_FONT_SIZE: f32 = 28.0;
const HEADING_FONT_SIZE: f32 = 40.0;
const PANEL_FONT_SIZE: f32 = 20.0;
const PANEL_PADDING: f32 = 12.0;
const PANEL_LINE_GAP: f32 = 4.0;

/// Draws the texture for `key` stretched over the logical rectangle, or its
/// placeholder fill when the texture is missing.
pub(crate) fn draw_asset(
    atlas: &AssetAtlas,
    key: AssetKey,
    origin: Vec2,
    size: Vec2,
    viewport: &Viewport,
) {
    let top_left = viewport.to_screen(origin);
    let extent = size * viewport.scale();
    match atlas.texture(key) {
        Some(texture) => draw_texture_ex(
            texture,
            top_left.x,
            top_left.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(extent.x, extent.y)),
                ..DrawTextureParams::default()
            },
        ),
        None => draw_rectangle(
            top_left.x,
            top_left.y,
            extent.x,
            extent.y,
            to_macroquad_color(key.placeholder_color()),
        ),
    }
}

/// Draws a heading centred horizontally near the top of the canvas.
pub(crate) fn draw_heading(text: &str, canvas_width: f32, viewport: &Viewport) {
    let font_size = HEADING_FONT_SIZE * viewport.scale();
    let dimensions = measure_text(text, None, font_size.max(1.0) as u16, 1.0);
    let anchor = viewport.to_screen(Vec2::new(canvas_width * 0.5, 80.0));
    draw_text(
        text,
        anchor.x - dimensions.width * 0.5,
        anchor.y,
        font_size,
        WHITE,
    );
}

/// Draws a button face with its label centred inside.
pub(crate) fn draw_button(button: &SceneButton, atlas: &AssetAtlas, viewport: &Viewport) {
    let top_left = viewport.to_screen(button.origin);
    let extent = button.size * viewport.scale();
    match button.face {
        Some(face) => draw_asset(atlas, face, button.origin, button.size, viewport),
        None => draw_rectangle(
            top_left.x,
            top_left.y,
            extent.x,
            extent.y,
            MacroquadColor::from_rgba(70, 70, 70, 255),
        ),
    }
    draw_rectangle_lines(top_left.x, top_left.y, extent.x, extent.y, 2.0, WHITE);

    let font_size = LABEL_FONT_SIZE * viewport.scale();
    let dimensions = measure_text(&button.label, None, font_size.max(1.0) as u16, 1.0);
    let centre = top_left + extent * 0.5;
    draw_text(
        &button.label,
        centre.x - dimensions.width * 0.5,
        centre.y + dimensions.offset_y * 0.5,
        font_size,
        WHITE,
    );
}

/// Draws the text panel, wrapping lines to its width.
pub(crate) fn draw_panel(panel: &ScenePanel, atlas: &AssetAtlas, viewport: &Viewport) {
    let key = panel.paper.unwrap_or(AssetKey::Paper);
    draw_asset(atlas, key, panel.origin, panel.size, viewport);

    let max_chars = ((panel.size.x - PANEL_PADDING * 2.0) / (PANEL_FONT_SIZE * 0.5)).max(1.0);
    let font_size = PANEL_FONT_SIZE * viewport.scale();
    let mut baseline = panel.origin.y + PANEL_PADDING + PANEL_FONT_SIZE;
    let bottom = panel.origin.y + panel.size.y - PANEL_PADDING;
    for line in panel
        .lines
        .iter()
        .flat_map(|line| wrap_words(line, max_chars as usize))
    {
        if baseline > bottom {
            break;
        }
        let anchor = viewport.to_screen(Vec2::new(panel.origin.x + PANEL_PADDING, baseline));
        draw_text(&line, anchor.x, anchor.y, font_size, BLACK);
        baseline += PANEL_FONT_SIZE + PANEL_LINE_GAP;
    }
}

/// Splits `text` into lines of at most `max_chars` characters, breaking at
/// whitespace and hard-splitting words that are longer than a line.
pub(crate) fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
