use hexmap::config::WorldConfig;
use hexmap::hex_grid::{points_approx_eq, Direction, HexLayout, NeighborRule};
use hexmap::navigator::{Command, Cursor, MoveOutcome, Navigator, PlaceOutcome};
use hexmap::render::{event_overlay, RenderFrame};
use hexmap::world_generator::{WorldGenerator, WorldGeneratorParameters};
use hexmap::world_state::WorldState;
use noise::Constant;

fn plains_world(rows: i64, cols: i64, seed: u64) -> WorldState {
    let config = WorldConfig {
        rows,
        cols,
        size: Some(3.0),
        environments: vec![("plains".to_owned(), "lightgreen".to_owned())],
        ..Default::default()
    };
    let params = WorldGeneratorParameters { seed, ..Default::default() };
    WorldGenerator::new(params)
        .gen_with_noise(&config, &Constant::new(0.0), &Constant::new(0.0))
        .unwrap()
}

fn moved_to(outcome: MoveOutcome) -> (usize, usize) {
    match outcome {
        MoveOutcome::Moved { coords, .. } => coords,
        other => panic!("expected a move, got {other:?}"),
    }
}

#[test]
fn north_east_from_the_origin_reaches_the_shifted_column() {
    let world = plains_world(3, 3, 1);
    for rule in [NeighborRule::Planar, NeighborRule::OffsetParity] {
        let mut navigator = Navigator::new(rule);
        navigator.place(&world, world.layout().center_of((0, 0)));

        let outcome = navigator.step(&world, Direction::NorthEast);
        let MoveOutcome::Moved { coords, center, .. } = outcome else {
            panic!("move was rejected");
        };
        // (0, 1) sits half a hex higher than (0, 0), which is exactly the north-east offset
        assert_eq!(coords, (0, 1));
        assert!(points_approx_eq(center, (4.5, 3.0 * 3f64.sqrt() / 2.0)));

        assert_eq!(moved_to(navigator.step(&world, Direction::North)), (1, 1));
        assert!(points_approx_eq(world.layout().center_of((1, 1)), (4.5, 4.5 * 3f64.sqrt())));
    }
}

#[test]
fn moves_off_the_grid_leave_the_cursor_in_place() {
    let world = plains_world(2, 2, 1);
    let mut navigator = Navigator::new(NeighborRule::Planar);
    let origin = world.layout().center_of((0, 0));
    navigator.place(&world, origin);

    for direction in [Direction::South, Direction::SouthWest, Direction::NorthWest, Direction::SouthEast] {
        assert_eq!(navigator.step(&world, direction), MoveOutcome::Blocked);
        assert_eq!(navigator.cursor(), Cursor::At(origin));
    }
}

#[test]
fn moving_without_a_cursor_does_nothing() {
    let world = plains_world(2, 2, 1);
    let mut navigator = Navigator::default();
    assert_eq!(navigator.step(&world, Direction::North), MoveOutcome::NoCursor);
    assert_eq!(navigator.cursor(), Cursor::Unset);
}

#[test]
fn only_the_first_placement_counts() {
    let world = plains_world(3, 3, 1);
    let mut navigator = Navigator::default();
    let first = world.layout().center_of((1, 1));

    assert!(matches!(navigator.place(&world, first), PlaceOutcome::Placed { coords: (1, 1), .. }));
    assert_eq!(navigator.place(&world, world.layout().center_of((2, 2))), PlaceOutcome::AlreadyPlaced);
    assert_eq!(navigator.place_at(&world, (0.0, 0.0)), PlaceOutcome::AlreadyPlaced);
    assert_eq!(navigator.cursor(), Cursor::At(first));
}

#[test]
fn placement_off_the_grid_is_refused() {
    let world = plains_world(3, 3, 1);
    let mut navigator = Navigator::default();
    assert_eq!(navigator.place(&world, (1.0, 1.0)), PlaceOutcome::NotOnGrid);
    assert_eq!(navigator.cursor(), Cursor::Unset);
}

#[test]
fn clicks_snap_to_the_nearest_hex() {
    let world = plains_world(3, 3, 1);
    let mut navigator = Navigator::default();
    let near_center = world.layout().center_of((2, 1));
    let click = (near_center.0 + 0.7, near_center.1 - 0.4);
    assert!(matches!(navigator.place_at(&world, click), PlaceOutcome::Placed { coords: (2, 1), .. }));
}

#[test]
fn exit_ends_the_session() {
    let world = plains_world(3, 3, 1);
    let mut navigator = Navigator::default();
    navigator.place(&world, world.layout().center_of((0, 0)));

    assert_eq!(navigator.apply(&world, "0".parse::<Command>().unwrap()), MoveOutcome::SessionEnded);
    assert!(navigator.is_finished());
    assert_eq!(navigator.apply(&world, Command::Move(Direction::North)), MoveOutcome::SessionEnded);
    assert_eq!(navigator.cursor(), Cursor::At(world.layout().center_of((0, 0))));
}

#[test]
fn entering_an_event_cell_reports_the_event_every_time() {
    let world = plains_world(4, 4, 21);
    let layout = world.layout();
    let (event_cell, event_text) = world.events().iter().next().expect("plains world has events");
    let event_center = layout.center_of(event_cell);

    let (direction, (start, _)) = Direction::ALL
        .iter()
        .find_map(|d| layout.neighbor(event_center, *d, NeighborRule::Planar).map(|n| (d.opposite(), n)))
        .expect("every cell of a 4x4 grid has a neighbor");

    let mut navigator = Navigator::default();
    navigator.place(&world, layout.center_of(start));

    for _ in 0..2 {
        match navigator.step(&world, direction) {
            MoveOutcome::Moved { coords, event, .. } => {
                assert_eq!(coords, event_cell);
                assert_eq!(event.as_deref(), Some(event_text));
            }
            other => panic!("expected a move, got {other:?}"),
        }
        assert_eq!(moved_to(navigator.step(&world, direction.opposite())), start);
    }
}

#[test]
fn adjacency_is_symmetric() {
    let layout = HexLayout::new(5, 6, 2.0);
    for rule in [NeighborRule::Planar, NeighborRule::OffsetParity] {
        for (coords, center) in layout.centers() {
            for direction in Direction::ALL {
                if let Some((neighbor, neighbor_center)) = layout.neighbor(center, direction, rule) {
                    let back = layout.neighbor(neighbor_center, direction.opposite(), rule);
                    assert_eq!(back.map(|(c, _)| c), Some(coords), "{coords:?} -> {direction:?} -> {neighbor:?}");
                }
            }
        }
    }
}

#[test]
fn planar_table_and_parity_arithmetic_agree_on_every_column() {
    let layout = HexLayout::new(5, 6, 3.0);
    for (coords, center) in layout.centers() {
        for direction in Direction::ALL {
            let planar = layout.neighbor(center, direction, NeighborRule::Planar).map(|(c, _)| c);
            let parity = layout.neighbor(center, direction, NeighborRule::OffsetParity).map(|(c, _)| c);
            assert_eq!(planar, parity, "{coords:?} {direction:?}");
        }
    }
}

#[test]
fn neighbors_of_lists_one_candidate_per_direction() {
    let layout = HexLayout::new(3, 3, 2.0);
    let candidates = layout.neighbors_of(layout.center_of((1, 1)));
    let on_grid = candidates.iter().filter(|(_, c)| layout.contains(*c)).count();
    assert_eq!(candidates.map(|(d, _)| d), Direction::ALL);
    // (1, 1) is an odd column: its north-east and north-west neighbors are in row 2
    assert_eq!(on_grid, 6);
}

#[test]
fn event_arrivals_fill_the_render_overlay() {
    let world = plains_world(4, 4, 21);
    let layout = world.layout();
    let (event_cell, event_text) = world.events().iter().next().expect("plains world has events");
    let (direction, (start, _)) = Direction::ALL
        .iter()
        .find_map(|d| layout.neighbor(layout.center_of(event_cell), *d, NeighborRule::Planar).map(|n| (d.opposite(), n)))
        .expect("every cell of a 4x4 grid has a neighbor");

    let mut navigator = Navigator::default();
    navigator.place(&world, layout.center_of(start));
    let outcome = navigator.step(&world, direction);
    let frame = RenderFrame::capture(&world, Some(&navigator), event_overlay(&outcome));

    assert_eq!(frame.cursor, Some(layout.center_of(event_cell)));
    assert_eq!(frame.overlay, Some((layout.center_of(event_cell), event_text.to_owned())));
}
