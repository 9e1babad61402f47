//! Read-only snapshots handed to the presentation adapter.

use might_and_magic_core::{Character, Position, RoomKind};

use crate::layout::{Button, Rect, ScreenLayout};
use crate::Screen;

/// Background selector for a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backdrop {
    /// Title art shown during the intro.
    Title,
    /// Main menu art.
    MainMenu,
    /// Character selection art.
    CharacterSelect,
    /// Options placeholder art.
    Options,
    /// Image of the room the player stands in.
    Room {
        /// Encounter category of the room.
        kind: RoomKind,
        /// Image variant fixed when the dungeon was generated.
        variant: u8,
    },
    /// Nothing to draw.
    Blank,
}

/// Button as presented to the adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonView {
    /// Text drawn on the button.
    pub label: &'static str,
    /// Clickable region.
    pub rect: Rect,
}

/// Description panel shown while exploring.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelView<'a> {
    /// Region of the panel.
    pub rect: Rect,
    /// Description of the current room.
    pub description: &'static str,
    /// Diagnostic produced by the most recent step, if any.
    pub notice: Option<String>,
    /// Character exploring the dungeon.
    pub character: &'a Character,
    /// Current position of the character.
    pub position: Position,
}

/// Everything the adapter needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenView<'a> {
    /// Heading drawn at the top of the screen, if any.
    pub heading: Option<&'static str>,
    /// Background selector.
    pub backdrop: Backdrop,
    /// Interactive regions in hit-test order.
    pub buttons: Vec<ButtonView>,
    /// Description panel.
    pub panel: Option<PanelView<'a>>,
}

impl<'a> ScreenView<'a> {
    fn bare(heading: Option<&'static str>, backdrop: Backdrop) -> Self {
        Self {
            heading,
            backdrop,
            buttons: Vec::new(),
            panel: None,
        }
    }

    fn with_buttons<A: Copy>(mut self, buttons: &[Button<A>]) -> Self {
        self.buttons = buttons
            .iter()
            .map(|button| ButtonView {
                label: button.label(),
                rect: button.rect(),
            })
            .collect();
        self
    }
}

impl Screen {
    /// Captures the render snapshot of the screen.
    #[must_use]
    pub fn view<'a>(&'a self, layout: &'a ScreenLayout) -> ScreenView<'a> {
        match self {
            Self::Intro(_) => ScreenView::bare(None, Backdrop::Title),
            Self::MainMenu => {
                ScreenView::bare(None, Backdrop::MainMenu).with_buttons(layout.main_menu())
            }
            Self::CharacterSelect => {
                ScreenView::bare(Some("Choose your hero"), Backdrop::CharacterSelect)
                    .with_buttons(layout.character_select())
            }
            Self::Exploration(exploration) => {
                let backdrop = exploration
                    .current_room()
                    .map_or(Backdrop::Blank, |room| Backdrop::Room {
                        kind: room.kind(),
                        variant: room.image_variant(),
                    });
                let mut view = ScreenView::bare(None, backdrop).with_buttons(layout.exploration());
                view.panel = exploration.current_room().map(|room| PanelView {
                    rect: layout.description_panel(),
                    description: room.description(),
                    notice: exploration.notice().map(|notice| notice.to_string()),
                    character: exploration.character(),
                    position: exploration.position(),
                });
                view
            }
            Self::Options => {
                ScreenView::bare(Some("Options are not available yet"), Backdrop::Options)
            }
            Self::Quit => ScreenView::bare(None, Backdrop::Blank),
        }
    }
}
