#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Screen state machine that drives the Might and Magic presentation loop.
//!
//! Exactly one [`Screen`] is current at any time. [`transition`] consumes the
//! current screen together with one [`InputEvent`] and yields the screen that
//! replaces it, while [`tick`] applies time-based rules once per frame. Both
//! return [`Flow::Terminate`] when the process should end. The [`Session`]
//! owns the current screen and pumps a bounded batch of events followed by a
//! tick every frame.

mod clock;
mod layout;
mod session;
mod view;

pub use clock::{Clock, MonotonicClock};
pub use layout::{
    direction_for_key, hit, Button, MenuAction, Rect, ScreenLayout, DIRECTION_BUTTONS,
    DIRECTION_KEYS, SCREEN_HEIGHT, SCREEN_WIDTH,
};
pub use session::{FrameStatus, Session};
pub use view::{Backdrop, ButtonView, PanelView, ScreenView};

use std::{
    fmt,
    num::{NonZeroU32, NonZeroUsize},
    time::Duration,
};

use might_and_magic_core::{Character, CharacterClass, Direction, InputEvent, Position, RoomKind};
use might_and_magic_system_navigation::{step, MoveOutcome, MoveRejection};
use might_and_magic_world::{generate, query, Dungeon, Room, DEFAULT_DUNGEON_SIZE};
use rand::Rng;

/// Events handled per frame unless configured otherwise.
pub const DEFAULT_MAX_EVENTS_PER_FRAME: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Tunables shared by every screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Edge length of dungeons generated for new games.
    pub dungeon_size: NonZeroU32,
    /// Time after which the intro advances on its own.
    pub intro_duration: Duration,
    /// Upper bound on events processed in a single frame.
    pub max_events_per_frame: NonZeroUsize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            dungeon_size: DEFAULT_DUNGEON_SIZE,
            intro_duration: Duration::from_secs(3),
            max_events_per_frame: DEFAULT_MAX_EVENTS_PER_FRAME,
        }
    }
}

/// Explicit collaborators handed to [`transition`].
#[derive(Debug)]
pub struct ScreenContext<'a, R: ?Sized> {
    /// Randomness used when a new dungeon is generated.
    pub rng: &'a mut R,
    /// Active tunables.
    pub config: &'a ScreenConfig,
    /// Button placement used for hit-testing.
    pub layout: &'a ScreenLayout,
}

/// Whether the loop keeps running after a transition or tick.
#[derive(Debug, PartialEq)]
pub enum Flow {
    /// Keep running with the contained screen as the current one.
    Continue(Screen),
    /// End the process.
    Terminate,
}

/// Mutually exclusive modes of the presentation loop.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Title card shown on start-up.
    Intro(Intro),
    /// Main menu offering new game, options and quit.
    MainMenu,
    /// Character class selection.
    CharacterSelect,
    /// Dungeon exploration.
    Exploration(Box<Exploration>),
    /// Options placeholder; ignores input.
    Options,
    /// Terminal screen; the next tick ends the process.
    Quit,
}

impl Screen {
    /// Intro screen entered at `now`.
    #[must_use]
    pub const fn intro(now: Duration) -> Self {
        Self::Intro(Intro { entered_at: now })
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Intro(_) => "intro",
            Self::MainMenu => "main_menu",
            Self::CharacterSelect => "character_select",
            Self::Exploration(_) => "exploration",
            Self::Options => "options",
            Self::Quit => "quit",
        }
    }
}

/// State carried by the intro screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intro {
    entered_at: Duration,
}

impl Intro {
    fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.entered_at)
    }
}

/// Diagnostic surfaced after a step through the dungeon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The requested step was rejected.
    Blocked {
        /// Direction that was requested.
        direction: Direction,
        /// Why the step was rejected.
        reason: MoveRejection,
    },
    /// The character stepped into the exit room.
    ExitFound,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked { direction, reason } => {
                write!(f, "You cannot go {}: {reason}.", direction.name())
            }
            Self::ExitFound => write!(f, "You have found the way out!"),
        }
    }
}

/// State carried by the exploration screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Exploration {
    dungeon: Dungeon,
    position: Position,
    character: Character,
    notice: Option<Notice>,
}

impl Exploration {
    /// Starts exploring `dungeon` from the upper-left room.
    #[must_use]
    pub fn new(dungeon: Dungeon, character: Character) -> Self {
        Self {
            dungeon,
            position: Position::ORIGIN,
            character,
            notice: None,
        }
    }

    /// Dungeon being explored.
    #[must_use]
    pub const fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    /// Room the character stands in.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Character exploring the dungeon.
    #[must_use]
    pub const fn character(&self) -> &Character {
        &self.character
    }

    /// Diagnostic produced by the most recent step.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Room at the current position.
    #[must_use]
    pub fn current_room(&self) -> Option<&Room> {
        query::room(&self.dungeon, self.position)
    }

    fn advance(self, direction: Direction) -> Self {
        let Self {
            dungeon,
            position,
            character,
            ..
        } = self;

        match step(&dungeon, position, direction) {
            MoveOutcome::Moved(next) => {
                let reached_exit =
                    query::room(&dungeon, next).is_some_and(|room| room.kind() == RoomKind::Exit);
                tracing::debug!(
                    from = ?position,
                    to = ?next,
                    direction = direction.name(),
                    "character moved"
                );
                if reached_exit {
                    tracing::info!(position = ?next, "character reached the exit");
                }
                Self {
                    dungeon,
                    position: next,
                    character,
                    notice: reached_exit.then_some(Notice::ExitFound),
                }
            }
            MoveOutcome::Rejected(reason) => {
                tracing::info!(
                    position = ?position,
                    direction = direction.name(),
                    %reason,
                    "move rejected"
                );
                Self {
                    dungeon,
                    position,
                    character,
                    notice: Some(Notice::Blocked { direction, reason }),
                }
            }
        }
    }
}

/// Applies one input event to the current screen.
///
/// [`InputEvent::Terminate`] ends the process from every screen.
pub fn transition<R>(screen: Screen, event: InputEvent, ctx: &mut ScreenContext<'_, R>) -> Flow
where
    R: Rng + ?Sized,
{
    if matches!(event, InputEvent::Terminate) {
        tracing::info!(screen = screen.name(), "terminate requested");
        return Flow::Terminate;
    }

    let from = screen.name();
    let next = match screen {
        Screen::Intro(intro) => match event {
            InputEvent::KeyPress(key) if key.is_confirm_or_cancel() => Screen::MainMenu,
            _ => Screen::Intro(intro),
        },
        Screen::MainMenu => match clicked(&event, ctx.layout.main_menu()) {
            Some(MenuAction::NewGame) => Screen::CharacterSelect,
            Some(MenuAction::Options) => Screen::Options,
            Some(MenuAction::Quit) => Screen::Quit,
            None => Screen::MainMenu,
        },
        Screen::CharacterSelect => match clicked(&event, ctx.layout.character_select()) {
            Some(class) => begin_exploration(class, ctx),
            None => Screen::CharacterSelect,
        },
        Screen::Exploration(exploration) => {
            let direction = match event {
                InputEvent::KeyPress(key) => direction_for_key(key),
                _ => clicked(&event, ctx.layout.exploration()),
            };
            match direction {
                Some(direction) => Screen::Exploration(Box::new(exploration.advance(direction))),
                None => Screen::Exploration(exploration),
            }
        }
        Screen::Options => Screen::Options,
        Screen::Quit => Screen::Quit,
    };

    if next.name() != from {
        tracing::info!(from, to = next.name(), "screen transition");
    }
    Flow::Continue(next)
}

/// Applies time-based rules to the current screen.
pub fn tick(screen: Screen, now: Duration, config: &ScreenConfig) -> Flow {
    match screen {
        Screen::Intro(intro) if intro.elapsed(now) >= config.intro_duration => {
            tracing::info!(from = "intro", to = "main_menu", "intro timed out");
            Flow::Continue(Screen::MainMenu)
        }
        Screen::Quit => {
            tracing::info!("quit screen reached, terminating");
            Flow::Terminate
        }
        other => Flow::Continue(other),
    }
}

fn clicked<A: Copy>(event: &InputEvent, buttons: &[Button<A>]) -> Option<A> {
    match *event {
        InputEvent::PointerClick { x, y } => hit(buttons, x, y),
        _ => None,
    }
}

fn begin_exploration<R>(class: CharacterClass, ctx: &mut ScreenContext<'_, R>) -> Screen
where
    R: Rng + ?Sized,
{
    let character = Character::new(class);
    let dungeon = generate(ctx.config.dungeon_size, &mut *ctx.rng);
    tracing::info!(
        class = class.label(),
        size = ctx.config.dungeon_size.get(),
        "new game started"
    );
    Screen::Exploration(Box::new(Exploration::new(dungeon, character)))
}
