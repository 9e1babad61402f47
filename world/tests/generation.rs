use std::num::NonZeroU32;

use might_and_magic_core::{Direction, Position, RoomKind};
use might_and_magic_world::{generate, query, Dungeon, DEFAULT_DUNGEON_SIZE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn dungeon_with(size: u32, seed: u64) -> Dungeon {
    let size = NonZeroU32::new(size).expect("test sizes are positive");
    generate(size, &mut ChaCha8Rng::seed_from_u64(seed))
}

#[test]
fn exit_is_unique_and_in_bottom_right_corner() {
    for size in 1..=9 {
        for seed in 0..8 {
            let dungeon = dungeon_with(size, seed);
            let corner = Position::new(size - 1, size - 1);

            let room = query::room(&dungeon, corner).expect("corner room exists");
            assert_eq!(room.kind(), RoomKind::Exit, "size {size} seed {seed}");

            let exits: Vec<_> = query::rooms(&dungeon)
                .filter(|(_, room)| room.kind() == RoomKind::Exit)
                .map(|(position, _)| position)
                .collect();
            assert_eq!(exits, vec![corner], "size {size} seed {seed}");
            assert_eq!(query::exit_position(&dungeon), corner);
        }
    }
}

#[test]
fn directions_exist_exactly_for_in_bounds_neighbours() {
    for size in 1..=7 {
        let dungeon = dungeon_with(size, 11);
        let mut visited = 0;
        for (position, room) in query::rooms(&dungeon) {
            visited += 1;
            for direction in Direction::ALL {
                let expected = position.neighbor(direction, size);
                assert_eq!(
                    room.exit(direction),
                    expected,
                    "room {position:?} direction {direction:?} on size {size}"
                );
                if let Some(target) = expected {
                    assert!(query::contains(&dungeon, target));
                }
            }
        }
        assert_eq!(visited, size * size);
    }
}

#[test]
fn corner_rooms_of_default_dungeon_have_two_exits() {
    let dungeon = generate(DEFAULT_DUNGEON_SIZE, &mut ChaCha8Rng::seed_from_u64(3));

    let origin = query::room(&dungeon, Position::ORIGIN).expect("origin exists");
    let origin_exits: Vec<_> = origin.directions().keys().copied().collect();
    assert_eq!(origin_exits, vec![Direction::South, Direction::East]);

    let exit = query::room(&dungeon, Position::new(5, 5)).expect("exit exists");
    let exit_exits: Vec<_> = exit.directions().keys().copied().collect();
    assert_eq!(exit_exits, vec![Direction::North, Direction::West]);
}

#[test]
fn single_room_dungeon_is_an_isolated_exit() {
    let dungeon = dungeon_with(1, 99);
    let room = query::room(&dungeon, Position::ORIGIN).expect("only room exists");

    assert_eq!(room.kind(), RoomKind::Exit);
    assert!(room.directions().is_empty());
    assert!(query::room(&dungeon, Position::new(0, 1)).is_none());
}

#[test]
fn same_seed_reproduces_the_same_dungeon() {
    let first = dungeon_with(6, 0xdead_beef);
    let second = dungeon_with(6, 0xdead_beef);
    assert_eq!(first, second);
}

#[test]
fn image_variants_stay_within_kind_catalogue() {
    for seed in 0..16 {
        let dungeon = dungeon_with(6, seed);
        for (_, room) in query::rooms(&dungeon) {
            assert!(room.image_variant() < room.kind().image_variants());
        }
    }
}

#[test]
fn random_draw_covers_every_non_exit_kind() {
    let dungeon = dungeon_with(20, 5);
    for kind in RoomKind::RANDOM {
        assert!(
            query::rooms(&dungeon).any(|(_, room)| room.kind() == kind),
            "a 20x20 dungeon should contain at least one {kind:?} room"
        );
    }
}

#[test]
fn rooms_describe_themselves() {
    let dungeon = dungeon_with(6, 21);
    for (_, room) in query::rooms(&dungeon) {
        assert!(!room.description().is_empty());
    }
}
