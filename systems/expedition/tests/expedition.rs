use treasure_hunt_core::{
    AdventurerId, AdventurerSpec, BlockedReason, CellCoord, Event, GridSpec, Orientation,
    TreasureSpec,
};
use treasure_hunt_system_expedition::Expedition;
use treasure_hunt_world::query;

use treasure_hunt_core::Movement::{Forward as F, RotateLeft as L, RotateRight as R};

fn treasure(row: u32, column: u32, amount: u32) -> TreasureSpec {
    TreasureSpec {
        cell: CellCoord::new(row, column),
        amount,
    }
}

fn remaining(expedition: &Expedition, row: u32, column: u32) -> u32 {
    query::grid(expedition.world())
        .cell(CellCoord::new(row, column))
        .expect("cell in bounds")
        .treasures()
}

#[test]
fn blocked_moves_and_repeated_collection() {
    let grid = GridSpec {
        height: 4,
        width: 3,
        mountains: vec![CellCoord::new(0, 1), CellCoord::new(1, 2)],
        treasures: vec![treasure(3, 0, 2), treasure(3, 1, 3)],
    };
    let adventurers = [
        AdventurerSpec::new(
            "Lara",
            Orientation::North,
            CellCoord::new(1, 1),
            [F, L, F, L, F, F, R, F, F, R, F, L, L, F],
        )
        .then_idle(),
        AdventurerSpec::new("Blocker", Orientation::North, CellCoord::new(1, 0), []),
    ];

    let mut expedition = Expedition::new(&grid, &adventurers).expect("expedition");
    let rounds = expedition.run();

    let lara = AdventurerId::new(0);
    let world = expedition.world();
    assert_eq!(rounds, 15);
    assert_eq!(query::collected(world, lara), Some(3));
    assert_eq!(query::position(world, lara), Some(CellCoord::new(3, 0)));
    let occupant = query::occupant(world, CellCoord::new(3, 0)).expect("occupant");
    assert_eq!(occupant.name(), "Lara");
    assert_eq!(remaining(&expedition, 3, 0), 0);
    assert_eq!(remaining(&expedition, 3, 1), 2);
    assert_eq!(
        query::position(world, AdventurerId::new(1)),
        Some(CellCoord::new(1, 0))
    );
}

#[test]
fn straight_line_collection() {
    let grid = GridSpec {
        height: 4,
        width: 3,
        mountains: Vec::new(),
        treasures: vec![treasure(1, 0, 1), treasure(2, 0, 1)],
    };
    let adventurers = [AdventurerSpec::new(
        "Lara",
        Orientation::South,
        CellCoord::new(0, 0),
        [F, F],
    )];

    let mut expedition = Expedition::new(&grid, &adventurers).expect("expedition");
    let _ = expedition.run();

    assert_eq!(query::collected(expedition.world(), AdventurerId::new(0)), Some(2));
}

#[test]
fn later_adventurers_see_moves_made_earlier_in_the_round() {
    // Lara vacates (1, 0) before Indiana tries to enter it in the same round.
    let grid = GridSpec {
        height: 3,
        width: 1,
        ..GridSpec::default()
    };
    let adventurers = [
        AdventurerSpec::new("Lara", Orientation::South, CellCoord::new(1, 0), [F]),
        AdventurerSpec::new("Indiana", Orientation::South, CellCoord::new(0, 0), [F]),
    ];
    let mut expedition = Expedition::new(&grid, &adventurers).expect("expedition");
    let _ = expedition.run();

    let world = expedition.world();
    assert_eq!(query::position(world, AdventurerId::new(0)), Some(CellCoord::new(2, 0)));
    assert_eq!(query::position(world, AdventurerId::new(1)), Some(CellCoord::new(1, 0)));
}

#[test]
fn earlier_adventurers_are_blocked_by_later_ones_that_have_not_moved_yet() {
    let grid = GridSpec {
        height: 3,
        width: 1,
        ..GridSpec::default()
    };
    let adventurers = [
        AdventurerSpec::new("Indiana", Orientation::South, CellCoord::new(0, 0), [F]),
        AdventurerSpec::new("Lara", Orientation::South, CellCoord::new(1, 0), [F]),
    ];
    let mut expedition = Expedition::new(&grid, &adventurers).expect("expedition");
    let _ = expedition.run();

    let world = expedition.world();
    assert_eq!(query::position(world, AdventurerId::new(0)), Some(CellCoord::new(0, 0)));
    assert_eq!(query::position(world, AdventurerId::new(1)), Some(CellCoord::new(2, 0)));
    assert!(expedition.events().contains(&Event::MoveBlocked {
        adventurer: AdventurerId::new(0),
        at: CellCoord::new(0, 0),
        reason: BlockedReason::Occupied,
    }));
}

#[test]
fn exhausted_itineraries_do_not_stop_the_round_for_others() {
    let grid = GridSpec {
        height: 1,
        width: 4,
        ..GridSpec::default()
    };
    let adventurers = [
        AdventurerSpec::new("Idle", Orientation::North, CellCoord::new(0, 3), []),
        AdventurerSpec::new("Lara", Orientation::East, CellCoord::new(0, 0), [F, F]),
    ];
    let mut expedition = Expedition::new(&grid, &adventurers).expect("expedition");

    assert_eq!(expedition.run(), 2);
    assert_eq!(
        query::position(expedition.world(), AdventurerId::new(1)),
        Some(CellCoord::new(0, 2))
    );
}

#[test]
fn collection_continues_after_all_treasure_is_gone() {
    let grid = GridSpec {
        height: 1,
        width: 2,
        mountains: Vec::new(),
        treasures: vec![treasure(0, 1, 1)],
    };
    let adventurers = [AdventurerSpec::new(
        "Lara",
        Orientation::East,
        CellCoord::new(0, 0),
        [F, L, L, F, L, L, F],
    )];
    let mut expedition = Expedition::new(&grid, &adventurers).expect("expedition");

    assert_eq!(expedition.run(), 7);
    assert_eq!(query::collected(expedition.world(), AdventurerId::new(0)), Some(1));
    assert_eq!(remaining(&expedition, 0, 1), 0);
}

// Moves along the column axis are bounded by the width, not the height, on a
// grid that is taller than it is wide and on one that is wider than it is tall.
#[test]
fn non_square_grid_bounds_column_moves_by_width() {
    let tall = GridSpec {
        height: 4,
        width: 2,
        ..GridSpec::default()
    };
    let adventurers = [AdventurerSpec::new(
        "Lara",
        Orientation::East,
        CellCoord::new(3, 0),
        [F, F, F],
    )];
    let mut expedition = Expedition::new(&tall, &adventurers).expect("expedition");
    let _ = expedition.run();
    assert_eq!(
        query::position(expedition.world(), AdventurerId::new(0)),
        Some(CellCoord::new(3, 1))
    );

    let wide = GridSpec {
        height: 2,
        width: 5,
        ..GridSpec::default()
    };
    let adventurers = [AdventurerSpec::new(
        "Lara",
        Orientation::East,
        CellCoord::new(1, 0),
        [F, F, F, F, F, R, F, F],
    )];
    let mut expedition = Expedition::new(&wide, &adventurers).expect("expedition");
    let _ = expedition.run();
    assert_eq!(
        query::position(expedition.world(), AdventurerId::new(0)),
        Some(CellCoord::new(1, 4))
    );
}

#[test]
fn replay_is_deterministic() {
    let grid = GridSpec {
        height: 5,
        width: 5,
        mountains: vec![CellCoord::new(2, 2)],
        treasures: vec![treasure(0, 4, 2), treasure(4, 0, 1)],
    };
    let adventurers = [
        AdventurerSpec::new("Lara", Orientation::East, CellCoord::new(0, 0), [F, F, F, F, R, F]),
        AdventurerSpec::new("Indiana", Orientation::West, CellCoord::new(0, 3), [F, L, F, F]),
    ];

    let mut first = Expedition::new(&grid, &adventurers).expect("expedition");
    let mut second = Expedition::new(&grid, &adventurers).expect("expedition");
    let _ = first.run();
    let _ = second.run();

    assert_eq!(first.events(), second.events());
    assert_eq!(
        query::adventurers(first.world()),
        query::adventurers(second.world())
    );
}
