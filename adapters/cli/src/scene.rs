//! Conversion of screen snapshots into renderable scenes.

use glam::Vec2;
use might_and_magic_rendering::{AssetKey, Scene, SceneButton, ScenePanel};
use might_and_magic_system_screens::{Backdrop, PanelView, Rect, ScreenView};

/// Builds the scene drawn for `view`.
pub(crate) fn build_scene(view: &ScreenView<'_>) -> Scene {
    Scene {
        background: backdrop_asset(view.backdrop),
        heading: view.heading.map(str::to_owned),
        buttons: view
            .buttons
            .iter()
            .map(|button| {
                let (origin, size) = rect_geometry(button.rect);
                SceneButton::new(button.label, origin, size).with_face(AssetKey::ButtonFace)
            })
            .collect(),
        panel: view.panel.as_ref().map(|panel| {
            let (origin, size) = rect_geometry(panel.rect);
            ScenePanel {
                origin,
                size,
                lines: panel_lines(panel),
                paper: Some(AssetKey::Paper),
            }
        }),
    }
}

fn backdrop_asset(backdrop: Backdrop) -> Option<AssetKey> {
    match backdrop {
        Backdrop::Title => Some(AssetKey::Title),
        Backdrop::MainMenu => Some(AssetKey::MainMenu),
        Backdrop::CharacterSelect => Some(AssetKey::CharacterSelect),
        Backdrop::Options => Some(AssetKey::Options),
        Backdrop::Room { kind, variant } => Some(AssetKey::Room { kind, variant }),
        Backdrop::Blank => None,
    }
}

fn rect_geometry(rect: Rect) -> (Vec2, Vec2) {
    (
        Vec2::new(rect.x, rect.y),
        Vec2::new(rect.width, rect.height),
    )
}

fn panel_lines(panel: &PanelView<'_>) -> Vec<String> {
    let character = panel.character;
    let mut lines = vec![panel.description.to_owned()];
    if let Some(notice) = &panel.notice {
        lines.push(notice.clone());
    }
    lines.push(String::new());
    lines.push(format!(
        "{} (level {})",
        character.name(),
        character.level()
    ));
    lines.push(format!(
        "Health {}  Defense {}  Dodge {}",
        character.health(),
        character.defense(),
        character.dodge()
    ));
    if let Some(weapon) = character.weapon() {
        lines.push(format!("Wielding {weapon}"));
    }
    lines.push(format!(
        "Room {}, {}",
        panel.position.row(),
        panel.position.column()
    ));
    lines
}
