#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative dungeon grid for Might and Magic.
//!
//! A [`Dungeon`] is a square grid of [`Room`] values produced once per
//! session by [`generate`]. Rooms carry a randomly drawn [`RoomKind`], the
//! image variant chosen for display, and a map of exits that is a pure
//! function of the room's position within the grid bounds.

mod layout;

pub use layout::render_layout;

use std::{collections::BTreeMap, num::NonZeroU32};

use might_and_magic_core::{Direction, Position, RoomKind};
use rand::Rng;

/// Edge length of the dungeon generated for a new game.
pub const DEFAULT_DUNGEON_SIZE: NonZeroU32 = match NonZeroU32::new(6) {
    Some(size) => size,
    None => unreachable!(),
};

/// Single cell of the dungeon grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    description: &'static str,
    kind: RoomKind,
    image_variant: u8,
    directions: BTreeMap<Direction, Position>,
}

impl Room {
    fn new(kind: RoomKind, image_variant: u8, directions: BTreeMap<Direction, Position>) -> Self {
        Self {
            description: description_for(kind),
            kind,
            image_variant,
            directions,
        }
    }

    /// Text shown on the description panel while the player stands here.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Encounter category of the room.
    #[must_use]
    pub const fn kind(&self) -> RoomKind {
        self.kind
    }

    /// Index of the image displayed for the room, below `kind().image_variants()`.
    #[must_use]
    pub const fn image_variant(&self) -> u8 {
        self.image_variant
    }

    /// Exits leaving the room keyed by direction.
    #[must_use]
    pub const fn directions(&self) -> &BTreeMap<Direction, Position> {
        &self.directions
    }

    /// Position reached by leaving the room in `direction`, if such an exit exists.
    #[must_use]
    pub fn exit(&self, direction: Direction) -> Option<Position> {
        self.directions.get(&direction).copied()
    }
}

/// Square grid of rooms explored during a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dungeon {
    size: NonZeroU32,
    rooms: Vec<Room>,
}

impl Dungeon {
    fn index(&self, position: Position) -> Option<usize> {
        let size = self.size.get();
        if !position.is_within(size) {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(size).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Generates a fresh dungeon with `size` rooms along each edge.
///
/// Rooms are visited in row-major order. Every room except the bottom-right
/// corner draws its kind uniformly from [`RoomKind::RANDOM`]; the corner is
/// always the exit. Exits are derived from the grid bounds alone, so the
/// resulting grid is fully connected.
pub fn generate<R>(size: NonZeroU32, rng: &mut R) -> Dungeon
where
    R: Rng + ?Sized,
{
    let edge = size.get();
    let last = edge - 1;
    let capacity = usize::try_from(u64::from(edge) * u64::from(edge)).unwrap_or(0);
    let mut rooms = Vec::with_capacity(capacity);

    for row in 0..edge {
        for column in 0..edge {
            let position = Position::new(row, column);
            let kind = if row == last && column == last {
                RoomKind::Exit
            } else {
                RoomKind::RANDOM[rng.gen_range(0..RoomKind::RANDOM.len())]
            };
            let image_variant = rng.gen_range(0..kind.image_variants());
            rooms.push(Room::new(kind, image_variant, directions_for(position, edge)));
        }
    }

    let dungeon = Dungeon { size, rooms };

    tracing::debug!(
        size = edge,
        "generated dungeon\n{}",
        render_layout(&dungeon)
    );

    dungeon
}

fn directions_for(position: Position, size: u32) -> BTreeMap<Direction, Position> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            position
                .neighbor(direction, size)
                .map(|neighbor| (direction, neighbor))
        })
        .collect()
}

fn description_for(kind: RoomKind) -> &'static str {
    match kind {
        RoomKind::Trap => "The floor here is scored with suspicious grooves.",
        RoomKind::Encounter => "Something stirs in the shadows ahead.",
        RoomKind::Treasure => "A battered chest sits against the far wall.",
        RoomKind::Empty => "This is a room.",
        RoomKind::Npc => "A hooded stranger waits by a guttering torch.",
        RoomKind::Exit => "Daylight spills down a narrow stair. This is the way out.",
    }
}

/// Query functions that provide read-only access to a dungeon.
pub mod query {
    use std::num::NonZeroU32;

    use super::{Dungeon, Room};
    use might_and_magic_core::Position;

    /// Edge length of the dungeon.
    #[must_use]
    pub fn size(dungeon: &Dungeon) -> NonZeroU32 {
        dungeon.size
    }

    /// Reports whether `position` addresses a room of the dungeon.
    #[must_use]
    pub fn contains(dungeon: &Dungeon, position: Position) -> bool {
        position.is_within(dungeon.size.get())
    }

    /// Room at `position`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn room(dungeon: &Dungeon, position: Position) -> Option<&Room> {
        dungeon
            .index(position)
            .and_then(|index| dungeon.rooms.get(index))
    }

    /// Iterator over every room paired with its position in row-major order.
    pub fn rooms(dungeon: &Dungeon) -> impl Iterator<Item = (Position, &Room)> {
        let size = dungeon.size.get();
        dungeon.rooms.iter().enumerate().filter_map(move |(index, room)| {
            let index = u32::try_from(index).ok()?;
            Some((Position::new(index / size, index % size), room))
        })
    }

    /// Position of the dungeon exit.
    #[must_use]
    pub fn exit_position(dungeon: &Dungeon) -> Position {
        let last = dungeon.size.get() - 1;
        Position::new(last, last)
    }
}
