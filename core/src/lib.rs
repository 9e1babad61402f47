#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Might and Magic crates.
//!
//! This crate defines the vocabulary that connects the dungeon grid, the
//! navigation query, the screen state machine and the adapters. Adapters
//! translate platform input into [`InputEvent`] values, the screen state
//! machine consumes them, and the world is addressed exclusively through
//! [`Position`] and [`Direction`] values defined here.

mod character;

pub use character::{Character, CharacterClass, ClassTrait, Effect, Inventory, Item, ItemUse};

use serde::{Deserialize, Serialize};

/// Title shown in the window decoration when the experience boots.
pub const WINDOW_TITLE: &str = "Might and Magic v0.1";

/// Cardinal directions connecting a room to its neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
    /// Movement toward increasing column indices.
    East,
}

impl Direction {
    /// Every direction in the order rooms enumerate their exits.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }
}

/// Location of a room expressed as zero-based row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Upper-left room where every new session starts.
    pub const ORIGIN: Position = Position::new(0, 0);

    /// Creates a new position from row and column indices.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Reports whether the position addresses a room in a `size`×`size` grid.
    #[must_use]
    pub const fn is_within(&self, size: u32) -> bool {
        self.row < size && self.column < size
    }

    /// Neighbouring position one step in `direction`, if it stays inside a
    /// `size`×`size` grid.
    #[must_use]
    pub fn neighbor(self, direction: Direction, size: u32) -> Option<Self> {
        let (row, column) = match direction {
            Direction::North => (self.row.checked_sub(1)?, self.column),
            Direction::South => (self.row.checked_add(1)?, self.column),
            Direction::West => (self.row, self.column.checked_sub(1)?),
            Direction::East => (self.row, self.column.checked_add(1)?),
        };
        let candidate = Self::new(row, column);
        candidate.is_within(size).then_some(candidate)
    }
}

/// Category of encounter a room represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// A hidden hazard.
    Trap,
    /// A hostile creature.
    Encounter,
    /// Loot waiting to be collected.
    Treasure,
    /// Nothing of note.
    Empty,
    /// A non-player character.
    Npc,
    /// The way out of the dungeon.
    Exit,
}

impl RoomKind {
    /// Kinds eligible for the uniform random draw during generation.
    pub const RANDOM: [RoomKind; 5] = [
        RoomKind::Trap,
        RoomKind::Encounter,
        RoomKind::Treasure,
        RoomKind::Empty,
        RoomKind::Npc,
    ];

    /// Every room kind, including the exit.
    pub const ALL: [RoomKind; 6] = [
        RoomKind::Trap,
        RoomKind::Encounter,
        RoomKind::Treasure,
        RoomKind::Empty,
        RoomKind::Npc,
        RoomKind::Exit,
    ];

    /// Number of distinct images available for the kind.
    #[must_use]
    pub const fn image_variants(self) -> u8 {
        match self {
            Self::Trap | Self::Treasure => 5,
            Self::Encounter | Self::Empty | Self::Npc => 3,
            Self::Exit => 1,
        }
    }

    /// Single-character glyph used by textual layouts.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Trap => 'T',
            Self::Encounter => 'E',
            Self::Treasure => 'R',
            Self::Empty => '.',
            Self::Npc => 'N',
            Self::Exit => 'X',
        }
    }

    /// Manifest identifier of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trap => "trap",
            Self::Encounter => "encounter",
            Self::Treasure => "treasure",
            Self::Empty => "empty",
            Self::Npc => "npc",
            Self::Exit => "exit",
        }
    }
}

/// Keys the input source recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// `Enter`, the confirm key.
    Enter,
    /// `Escape`, the cancel key.
    Escape,
    /// Letter `W`.
    W,
    /// Letter `A`.
    A,
    /// Letter `S`.
    S,
    /// Letter `D`.
    D,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

impl KeyCode {
    /// Reports whether the key confirms or cancels the current screen.
    #[must_use]
    pub const fn is_confirm_or_cancel(self) -> bool {
        matches!(self, Self::Enter | Self::Escape)
    }
}

/// Discrete input supplied by the input source each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Process-level quit request, honoured from every screen.
    Terminate,
    /// A key went down this frame.
    KeyPress(KeyCode),
    /// The primary pointer button was pressed at the provided logical coordinates.
    PointerClick {
        /// Horizontal logical coordinate.
        x: f32,
        /// Vertical logical coordinate.
        y: f32,
    },
}
