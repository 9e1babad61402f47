use std::time::Duration;

use might_and_magic_core::{
    CharacterClass, ClassTrait, Direction, InputEvent, KeyCode, Position, RoomKind,
};
use might_and_magic_system_navigation::MoveRejection;
use might_and_magic_system_screens::{
    tick, transition, Backdrop, Exploration, Flow, Notice, Screen, ScreenConfig, ScreenContext,
    ScreenLayout,
};
use might_and_magic_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct Harness {
    rng: ChaCha8Rng,
    config: ScreenConfig,
    layout: ScreenLayout,
}

impl Harness {
    fn new() -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(0x5eed),
            config: ScreenConfig::default(),
            layout: ScreenLayout::default(),
        }
    }

    fn send(&mut self, screen: Screen, event: InputEvent) -> Flow {
        let mut ctx = ScreenContext {
            rng: &mut self.rng,
            config: &self.config,
            layout: &self.layout,
        };
        transition(screen, event, &mut ctx)
    }

    fn expect_screen(&mut self, screen: Screen, event: InputEvent) -> Screen {
        match self.send(screen, event) {
            Flow::Continue(next) => next,
            Flow::Terminate => panic!("unexpected termination for {event:?}"),
        }
    }

    fn click_label(&mut self, screen: Screen, label: &str) -> Screen {
        let event = {
            let view = screen.view(&self.layout);
            let button = view
                .buttons
                .iter()
                .find(|button| button.label == label)
                .unwrap_or_else(|| panic!("no button labelled {label}"));
            InputEvent::PointerClick {
                x: button.rect.x + 1.0,
                y: button.rect.y + 1.0,
            }
        };
        self.expect_screen(screen, event)
    }

    fn explore_as(&mut self, class: &str) -> Box<Exploration> {
        match self.click_label(Screen::CharacterSelect, class) {
            Screen::Exploration(exploration) => exploration,
            other => panic!("expected exploration, got {}", other.name()),
        }
    }
}

fn continued(flow: Flow) -> Screen {
    match flow {
        Flow::Continue(screen) => screen,
        Flow::Terminate => panic!("flow terminated unexpectedly"),
    }
}

#[test]
fn intro_advances_on_confirm_or_cancel() {
    let mut harness = Harness::new();
    for key in [KeyCode::Enter, KeyCode::Escape] {
        let next = harness.expect_screen(Screen::intro(Duration::ZERO), InputEvent::KeyPress(key));
        assert_eq!(next, Screen::MainMenu, "{key:?} should leave the intro");
    }
}

#[test]
fn intro_ignores_other_input() {
    let mut harness = Harness::new();
    let intro = Screen::intro(Duration::ZERO);
    let next = harness.expect_screen(intro.clone(), InputEvent::KeyPress(KeyCode::W));
    assert_eq!(next, intro);
    let click = InputEvent::PointerClick { x: 400.0, y: 400.0 };
    let next = harness.expect_screen(intro.clone(), click);
    assert_eq!(next, intro);
}

#[test]
fn intro_times_out_after_three_seconds() {
    let config = ScreenConfig::default();
    let entered = Duration::from_millis(500);

    let early = continued(tick(
        Screen::intro(entered),
        entered + Duration::from_millis(2_999),
        &config,
    ));
    assert!(matches!(early, Screen::Intro(_)));

    let due = continued(tick(
        Screen::intro(entered),
        entered + Duration::from_secs(3),
        &config,
    ));
    assert_eq!(due, Screen::MainMenu);
}

#[test]
fn intro_tolerates_clock_before_entry() {
    let config = ScreenConfig::default();
    let screen = continued(tick(
        Screen::intro(Duration::from_secs(10)),
        Duration::from_secs(1),
        &config,
    ));
    assert!(matches!(screen, Screen::Intro(_)));
}

#[test]
fn main_menu_buttons_route_to_their_screens() {
    let mut harness = Harness::new();
    assert_eq!(
        harness.click_label(Screen::MainMenu, "New Game"),
        Screen::CharacterSelect
    );
    assert_eq!(harness.click_label(Screen::MainMenu, "Options"), Screen::Options);
    assert_eq!(harness.click_label(Screen::MainMenu, "Quit"), Screen::Quit);
}

#[test]
fn main_menu_ignores_clicks_outside_buttons_and_keys() {
    let mut harness = Harness::new();
    let next = harness.expect_screen(Screen::MainMenu, InputEvent::PointerClick { x: 1.0, y: 1.0 });
    assert_eq!(next, Screen::MainMenu);
    let next = harness.expect_screen(Screen::MainMenu, InputEvent::KeyPress(KeyCode::Enter));
    assert_eq!(next, Screen::MainMenu);
}

#[test]
fn main_menu_button_edges_follow_half_open_rule() {
    let mut harness = Harness::new();
    let new_game = harness.layout.main_menu()[0].rect();

    let on_left_edge = InputEvent::PointerClick {
        x: new_game.x,
        y: new_game.y,
    };
    assert_eq!(
        harness.expect_screen(Screen::MainMenu, on_left_edge),
        Screen::CharacterSelect
    );

    let on_right_edge = InputEvent::PointerClick {
        x: new_game.x + new_game.width,
        y: new_game.y,
    };
    assert_eq!(
        harness.expect_screen(Screen::MainMenu, on_right_edge),
        Screen::MainMenu
    );
}

#[test]
fn selecting_warrior_starts_a_fresh_game() {
    let mut harness = Harness::new();
    let exploration = harness.explore_as("Warrior");

    let character = exploration.character();
    assert_eq!(character.class(), CharacterClass::Warrior);
    assert_eq!(character.health(), 120);
    assert_eq!(character.defense(), 20);
    assert_eq!(character.dodge(), 5);
    assert_eq!(character.class_trait(), ClassTrait::Strength(10));

    assert_eq!(query::size(exploration.dungeon()).get(), 6);
    assert_eq!(exploration.position(), Position::new(0, 0));
    assert!(exploration.notice().is_none());
}

#[test]
fn each_class_button_builds_its_character() {
    let mut harness = Harness::new();
    for class in CharacterClass::ALL {
        let exploration = harness.explore_as(class.label());
        assert_eq!(exploration.character().class(), class);
    }
}

#[test]
fn character_select_ignores_misses() {
    let mut harness = Harness::new();
    let next = harness.expect_screen(
        Screen::CharacterSelect,
        InputEvent::PointerClick { x: 400.0, y: 10.0 },
    );
    assert_eq!(next, Screen::CharacterSelect);
}

#[test]
fn movement_keys_update_the_position() {
    let mut harness = Harness::new();
    let exploration = harness.explore_as("Rogue");

    let screen = harness.expect_screen(
        Screen::Exploration(exploration),
        InputEvent::KeyPress(KeyCode::S),
    );
    let screen = harness.expect_screen(screen, InputEvent::KeyPress(KeyCode::Right));
    let Screen::Exploration(exploration) = screen else {
        panic!("movement must stay in exploration");
    };
    assert_eq!(exploration.position(), Position::new(1, 1));
    assert!(exploration.notice().is_none());
}

#[test]
fn direction_buttons_move_the_character() {
    let mut harness = Harness::new();
    let exploration = harness.explore_as("Wizard");

    let screen = harness.click_label(Screen::Exploration(exploration), "East");
    let Screen::Exploration(exploration) = screen else {
        panic!("movement must stay in exploration");
    };
    assert_eq!(exploration.position(), Position::new(0, 1));
}

#[test]
fn blocked_moves_keep_position_and_surface_a_notice() {
    let mut harness = Harness::new();
    let exploration = harness.explore_as("Rogue");

    let screen = harness.expect_screen(
        Screen::Exploration(exploration),
        InputEvent::KeyPress(KeyCode::W),
    );
    let Screen::Exploration(exploration) = screen else {
        panic!("a rejected move must stay in exploration");
    };
    assert_eq!(exploration.position(), Position::ORIGIN);
    assert_eq!(
        exploration.notice(),
        Some(&Notice::Blocked {
            direction: Direction::North,
            reason: MoveRejection::NoExit {
                direction: Direction::North
            },
        })
    );

    let screen = Screen::Exploration(exploration);
    {
        let view = screen.view(&harness.layout);
        let panel = view.panel.expect("exploration shows a panel");
        assert_eq!(
            panel.notice.as_deref(),
            Some("You cannot go north: no such exit from this room.")
        );
    }

    let screen = harness.expect_screen(screen, InputEvent::KeyPress(KeyCode::D));
    let Screen::Exploration(exploration) = screen else {
        panic!("movement must stay in exploration");
    };
    assert!(exploration.notice().is_none(), "a successful move clears the notice");
}

#[test]
fn reaching_the_exit_is_announced() {
    let mut harness = Harness::new();
    let mut screen = Screen::Exploration(harness.explore_as("Warrior"));
    for key in [KeyCode::S; 5].into_iter().chain([KeyCode::D; 5]) {
        screen = harness.expect_screen(screen, InputEvent::KeyPress(key));
    }

    let Screen::Exploration(exploration) = screen else {
        panic!("movement must stay in exploration");
    };
    assert_eq!(exploration.position(), Position::new(5, 5));
    assert_eq!(exploration.notice(), Some(&Notice::ExitFound));
    assert_eq!(
        exploration.current_room().map(|room| room.kind()),
        Some(RoomKind::Exit)
    );
}

#[test]
fn exploration_view_shows_the_current_room() {
    let mut harness = Harness::new();
    let exploration = harness.explore_as("Rogue");
    let room = exploration.current_room().expect("origin exists").clone();
    let screen = Screen::Exploration(exploration);
    let view = screen.view(&harness.layout);

    assert_eq!(
        view.backdrop,
        Backdrop::Room {
            kind: room.kind(),
            variant: room.image_variant(),
        }
    );
    let labels: Vec<_> = view.buttons.iter().map(|button| button.label).collect();
    assert_eq!(labels, vec!["North", "South", "West", "East"]);

    let panel = view.panel.expect("exploration shows a panel");
    assert_eq!(panel.description, room.description());
    assert_eq!(panel.position, Position::ORIGIN);
    assert_eq!(panel.character.name(), "Rogue");
}

#[test]
fn room_image_is_stable_across_visits() {
    let mut harness = Harness::new();
    let exploration = harness.explore_as("Rogue");
    let first = exploration.current_room().map(|room| room.image_variant());

    let mut screen = Screen::Exploration(exploration);
    for key in [KeyCode::D, KeyCode::A] {
        screen = harness.expect_screen(screen, InputEvent::KeyPress(key));
    }
    let Screen::Exploration(exploration) = screen else {
        panic!("movement must stay in exploration");
    };
    assert_eq!(exploration.position(), Position::ORIGIN);
    assert_eq!(
        exploration.current_room().map(|room| room.image_variant()),
        first
    );
}

#[test]
fn options_ignores_all_input() {
    let mut harness = Harness::new();
    for event in [
        InputEvent::KeyPress(KeyCode::Escape),
        InputEvent::KeyPress(KeyCode::Enter),
        InputEvent::PointerClick { x: 400.0, y: 300.0 },
    ] {
        assert_eq!(harness.expect_screen(Screen::Options, event), Screen::Options);
    }
    assert_eq!(
        continued(tick(Screen::Options, Duration::from_secs(60), &harness.config)),
        Screen::Options
    );
}

#[test]
fn quit_terminates_on_next_tick_and_ignores_input() {
    let mut harness = Harness::new();
    let screen = harness.expect_screen(Screen::Quit, InputEvent::KeyPress(KeyCode::Enter));
    assert_eq!(screen, Screen::Quit);

    assert_eq!(tick(screen, Duration::ZERO, &harness.config), Flow::Terminate);
}

#[test]
fn terminate_is_honoured_from_every_screen() {
    let mut harness = Harness::new();
    let exploration = Screen::Exploration(harness.explore_as("Wizard"));
    let screens = [
        Screen::intro(Duration::ZERO),
        Screen::MainMenu,
        Screen::CharacterSelect,
        exploration,
        Screen::Options,
        Screen::Quit,
    ];
    for screen in screens {
        let name = screen.name();
        assert_eq!(
            harness.send(screen, InputEvent::Terminate),
            Flow::Terminate,
            "{name} must honour terminate"
        );
    }
}
