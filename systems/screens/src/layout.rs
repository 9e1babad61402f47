//! Button geometry and the input tables that map keys and buttons to actions.
//!
//! All coordinates are expressed in the logical 800×800 screen space shared
//! with the input source.

use might_and_magic_core::{CharacterClass, Direction, KeyCode};

/// Logical width of the screen.
pub const SCREEN_WIDTH: f32 = 800.0;
/// Logical height of the screen.
pub const SCREEN_HEIGHT: f32 = 800.0;

const BUTTON_WIDTH: f32 = 180.0;
const BUTTON_HEIGHT: f32 = 70.0;

/// Keys that request a step through the dungeon.
pub const DIRECTION_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::W, Direction::North),
    (KeyCode::S, Direction::South),
    (KeyCode::A, Direction::West),
    (KeyCode::D, Direction::East),
    (KeyCode::Up, Direction::North),
    (KeyCode::Down, Direction::South),
    (KeyCode::Left, Direction::West),
    (KeyCode::Right, Direction::East),
];

/// Exploration buttons in drawing order, paired with the direction they request.
pub const DIRECTION_BUTTONS: [(&str, Direction); 4] = [
    ("North", Direction::North),
    ("South", Direction::South),
    ("West", Direction::West),
    ("East", Direction::East),
];

/// Direction bound to `key`, if any.
#[must_use]
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    DIRECTION_KEYS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, direction)| *direction)
}

/// Axis-aligned rectangle in logical screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Reports whether the point lies in `[x, x + width) × [y, y + height)`.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Clickable region that yields `action` when hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button<A> {
    label: &'static str,
    rect: Rect,
    action: A,
}

impl<A: Copy> Button<A> {
    /// Creates a new button.
    #[must_use]
    pub const fn new(label: &'static str, rect: Rect, action: A) -> Self {
        Self {
            label,
            rect,
            action,
        }
    }

    /// Text drawn on the button.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Clickable region.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Action triggered by a click.
    #[must_use]
    pub fn action(&self) -> A {
        self.action
    }
}

/// Returns the action of the first button containing the point.
#[must_use]
pub fn hit<A: Copy>(buttons: &[Button<A>], x: f32, y: f32) -> Option<A> {
    buttons
        .iter()
        .find(|button| button.rect.contains(x, y))
        .map(Button::action)
}

/// Entries offered by the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Start a new game.
    NewGame,
    /// Open the options screen.
    Options,
    /// Leave the game.
    Quit,
}

/// Button placement for every interactive screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenLayout {
    main_menu: Vec<Button<MenuAction>>,
    character_select: Vec<Button<CharacterClass>>,
    exploration: Vec<Button<Direction>>,
    description_panel: Rect,
}

impl ScreenLayout {
    /// Creates a layout from explicit button sets.
    #[must_use]
    pub fn new(
        main_menu: Vec<Button<MenuAction>>,
        character_select: Vec<Button<CharacterClass>>,
        exploration: Vec<Button<Direction>>,
        description_panel: Rect,
    ) -> Self {
        Self {
            main_menu,
            character_select,
            exploration,
            description_panel,
        }
    }

    /// Main menu buttons in hit-test order.
    #[must_use]
    pub fn main_menu(&self) -> &[Button<MenuAction>] {
        &self.main_menu
    }

    /// Character selection buttons in hit-test order.
    #[must_use]
    pub fn character_select(&self) -> &[Button<CharacterClass>] {
        &self.character_select
    }

    /// Direction buttons shown while exploring.
    #[must_use]
    pub fn exploration(&self) -> &[Button<Direction>] {
        &self.exploration
    }

    /// Region of the room description panel.
    #[must_use]
    pub const fn description_panel(&self) -> Rect {
        self.description_panel
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        let menu_x = (SCREEN_WIDTH - BUTTON_WIDTH) / 2.0;
        let menu_y = SCREEN_HEIGHT / 2.0;
        let main_menu = vec![
            Button::new(
                "New Game",
                Rect::new(menu_x, menu_y - 100.0, BUTTON_WIDTH, BUTTON_HEIGHT),
                MenuAction::NewGame,
            ),
            Button::new(
                "Options",
                Rect::new(menu_x, menu_y, BUTTON_WIDTH, BUTTON_HEIGHT),
                MenuAction::Options,
            ),
            Button::new(
                "Quit",
                Rect::new(menu_x, menu_y + 100.0, BUTTON_WIDTH, BUTTON_HEIGHT),
                MenuAction::Quit,
            ),
        ];

        let select_y = SCREEN_HEIGHT * 0.83;
        let character_select = [0.01, 0.395, 0.765]
            .into_iter()
            .zip(CharacterClass::ALL)
            .map(|(fraction, class)| {
                Button::new(
                    class.label(),
                    Rect::new(
                        SCREEN_WIDTH * fraction,
                        select_y,
                        BUTTON_WIDTH,
                        BUTTON_HEIGHT,
                    ),
                    class,
                )
            })
            .collect();

        let spacing = (SCREEN_WIDTH - BUTTON_WIDTH * 4.0) / 5.0;
        let exploration_y = SCREEN_HEIGHT - BUTTON_HEIGHT - 20.0;
        let exploration = DIRECTION_BUTTONS
            .into_iter()
            .enumerate()
            .map(|(slot, (label, direction))| {
                let x = spacing + slot as f32 * (BUTTON_WIDTH + spacing);
                Button::new(
                    label,
                    Rect::new(x, exploration_y, BUTTON_WIDTH, BUTTON_HEIGHT),
                    direction,
                )
            })
            .collect();

        Self::new(
            main_menu,
            character_select,
            exploration,
            Rect::new(250.0, 200.0, 300.0, 200.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_closed_left_and_open_right() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(40.0, 20.0));
        assert!(!rect.contains(10.0, 60.0));
        assert!(rect.contains(39.9, 59.9));
        assert!(!rect.contains(9.9, 30.0));
    }

    #[test]
    fn first_matching_button_wins() {
        let overlap = Rect::new(0.0, 0.0, 100.0, 100.0);
        let buttons = [
            Button::new("first", overlap, 1_u8),
            Button::new("second", overlap, 2_u8),
        ];
        assert_eq!(hit(&buttons, 50.0, 50.0), Some(1));
        assert_eq!(hit(&buttons, 150.0, 50.0), None);
    }

    #[test]
    fn key_table_binds_wasd_and_arrows() {
        assert_eq!(direction_for_key(KeyCode::W), Some(Direction::North));
        assert_eq!(direction_for_key(KeyCode::A), Some(Direction::West));
        assert_eq!(direction_for_key(KeyCode::Down), Some(Direction::South));
        assert_eq!(direction_for_key(KeyCode::Right), Some(Direction::East));
        assert_eq!(direction_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn default_layout_fits_on_screen_without_overlap() {
        let layout = ScreenLayout::default();
        let rects: Vec<Rect> = layout
            .main_menu()
            .iter()
            .map(Button::rect)
            .chain(layout.exploration().iter().map(Button::rect))
            .chain(layout.character_select().iter().map(Button::rect))
            .collect();
        for rect in &rects {
            assert!(rect.x >= 0.0 && rect.x + rect.width <= SCREEN_WIDTH);
            assert!(rect.y >= 0.0 && rect.y + rect.height <= SCREEN_HEIGHT);
        }

        let labels: Vec<_> = layout.exploration().iter().map(Button::label).collect();
        assert_eq!(labels, vec!["North", "South", "West", "East"]);
        for pair in layout.exploration().windows(2) {
            assert!(pair[0].rect().x + pair[0].rect().width <= pair[1].rect().x);
        }
    }
}
