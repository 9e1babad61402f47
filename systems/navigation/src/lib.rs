#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure navigation query that validates a requested step through the dungeon.
//!
//! The query never mutates the dungeon or the caller's position. Callers
//! inspect the returned [`MoveOutcome`] and commit the new position
//! themselves.

use std::fmt;

use might_and_magic_core::{Direction, Position};
use might_and_magic_world::{query, Dungeon};

/// Result of attempting to leave a room in a given direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The step is valid and lands on the contained position.
    Moved(Position),
    /// The step cannot be taken.
    Rejected(MoveRejection),
}

impl MoveOutcome {
    /// Position reached by an accepted step.
    #[must_use]
    pub const fn position(self) -> Option<Position> {
        match self {
            Self::Moved(position) => Some(position),
            Self::Rejected(_) => None,
        }
    }
}

/// Reasons a step is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    /// The current room has no exit in the requested direction.
    NoExit {
        /// Direction that was requested.
        direction: Direction,
    },
    /// The current or target position lies outside the dungeon.
    OutsideDungeon {
        /// Position that failed the bounds check.
        position: Position,
    },
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoExit { .. } => write!(f, "no such exit from this room"),
            Self::OutsideDungeon { position } => write!(
                f,
                "position ({}, {}) lies outside the dungeon",
                position.row(),
                position.column()
            ),
        }
    }
}

/// Computes where a step in `direction` from `current` leads.
#[must_use]
pub fn step(dungeon: &Dungeon, current: Position, direction: Direction) -> MoveOutcome {
    let Some(room) = query::room(dungeon, current) else {
        return MoveOutcome::Rejected(MoveRejection::OutsideDungeon { position: current });
    };

    let Some(target) = room.exit(direction) else {
        return MoveOutcome::Rejected(MoveRejection::NoExit { direction });
    };

    if !query::contains(dungeon, target) {
        return MoveOutcome::Rejected(MoveRejection::OutsideDungeon { position: target });
    }

    MoveOutcome::Moved(target)
}
