use super::*;

fn c(x: i32, y: i32) -> Coordinates {
    Coordinates::new(x, y)
}

/// 1x3 strip whose east and west edges are stitched together
fn ring() -> Board {
    let mut board = Board::new(3, 1);
    board.set_tile(c(0, 0), Tile::Player(PlayerId::new(1).unwrap()));
    board.set_tile(c(1, 0), Tile::Player(PlayerId::new(2).unwrap()));
    assert!(board
        .transitions_mut()
        .register((c(2, 0), Direction::East), (c(0, 0), Direction::West)));
    board
}

#[test]
fn test_direction_basics() {
    for direction in Direction::ALL {
        assert_eq!(direction.opposite().opposite(), direction);
        assert_ne!(direction.opposite(), direction);
        assert_eq!(Direction::from_index(direction.index()), Some(direction));
        let (dx, dy) = direction.offset();
        let (ox, oy) = direction.opposite().offset();
        assert_eq!((dx + ox, dy + oy), (0, 0));
    }
    assert_eq!(Direction::from_index(8), None);
    assert_eq!(c(2, 2).step(Direction::NorthWest), c(1, 1));
    assert_eq!(c(2, 2).step(Direction::South), c(2, 3));
}

#[test]
fn test_player_id_range() {
    assert!(PlayerId::new(0).is_none());
    assert!(PlayerId::new(9).is_none());
    let p8 = PlayerId::new(8).unwrap();
    assert_eq!(p8.index(), 7);
    assert_eq!(PlayerId::from_index(7), p8);
}

#[test]
fn test_tile_codes() {
    for code in ['0', '1', '5', '8', '-', 'c', 'i', 'b', 'x'] {
        let tile = Tile::from_char(code).unwrap();
        assert_eq!(tile.to_char(), code);
    }
    assert_eq!(Tile::from_char('9'), None);
    assert_eq!(Tile::from_char('?'), None);
}

#[test]
fn test_tile_classes() {
    let p1 = PlayerId::new(1).unwrap();
    let p2 = PlayerId::new(2).unwrap();
    assert!(Tile::Player(p2).is_capturable_by(p1));
    assert!(!Tile::Player(p1).is_capturable_by(p1));
    assert!(Tile::Expansion.is_capturable_by(p1));
    assert!(!Tile::Empty.is_capturable_by(p1));
    assert!(Tile::Bonus.is_unoccupied());
    assert!(!Tile::Expansion.is_unoccupied());
    assert!(!Tile::Wall.is_unoccupied());
}

#[test]
fn test_off_board_is_none() {
    let board = Board::new(2, 2);
    assert_eq!(board.tile(c(-1, 0)), None);
    assert_eq!(board.tile(c(2, 0)), None);
    assert_eq!(board.tile(c(1, 1)), Some(Tile::Empty));
}

#[test]
fn test_overflowing_area_gives_empty_board() {
    let board = Board::new(70_000, 70_000);
    assert_eq!((board.width(), board.height()), (0, 0));
    assert_eq!(board.coordinates().count(), 0);
    assert_eq!(board.tile(c(0, 0)), None);

    let negative = Board::new(-3, 4);
    assert_eq!((negative.width(), negative.height()), (0, 4));
}

#[test]
fn test_index_follows_set_tile() {
    let mut board = Board::new(3, 3);
    let p1 = PlayerId::new(1).unwrap();
    assert_eq!(board.positions(Tile::Empty).len(), 9);

    board.set_tile(c(1, 1), Tile::Player(p1));
    board.set_tile(c(2, 1), Tile::Player(p1));
    board.set_tile(c(2, 1), Tile::Wall);
    board.set_tile(c(5, 5), Tile::Wall);

    assert_eq!(board.stone_count(p1), 1);
    assert!(board.stones(p1).contains(&c(1, 1)));
    assert_eq!(board.positions(Tile::Wall).len(), 1);
    assert_eq!(board.positions(Tile::Empty).len(), 7);

    // Every coordinate is in exactly the set of its tile
    for pos in board.coordinates() {
        let tile = board.tile(pos).unwrap();
        assert!(board.positions(tile).contains(&pos));
    }
}

#[test]
fn test_transition_counterparts() {
    let board = ring();
    let transitions = board.transitions();
    assert_eq!(transitions.len(), 2);
    for (from, _) in transitions.iter() {
        let there = transitions.counterpart(from).unwrap();
        assert_eq!(transitions.counterpart(there), Some(from));
    }
    assert_eq!(
        transitions.get(c(2, 0), Direction::East),
        Some((c(0, 0), Direction::East))
    );
    assert_eq!(
        transitions.get(c(0, 0), Direction::West),
        Some((c(2, 0), Direction::West))
    );
}

#[test]
fn test_register_rejects_taken_half_edge() {
    let mut board = ring();
    assert!(!board
        .transitions_mut()
        .register((c(2, 0), Direction::East), (c(1, 0), Direction::North)));
    assert_eq!(board.transitions().len(), 2);
}

#[test]
fn test_reader_follows_transition() {
    let board = ring();
    let walked: Vec<Coordinates> = TileReader::new(&board, c(1, 0), Direction::East).take(4).collect();
    assert_eq!(walked, vec![c(2, 0), c(0, 0), c(1, 0), c(2, 0)]);

    let mut reader = TileReader::new(&board, c(2, 0), Direction::East);
    assert!(reader.has_next());
    assert_eq!(reader.next(), Some(c(0, 0)));
    assert_eq!(reader.direction(), Direction::East);
}

#[test]
fn test_reader_dead_ends() {
    let board = ring();
    let mut reader = TileReader::new(&board, c(1, 0), Direction::North);
    assert!(!reader.has_next());
    assert_eq!(reader.next(), None);
    assert_eq!(reader.position(), c(1, 0));
}

#[test]
fn test_bombed_endpoint_disables_transition() {
    let mut board = ring();
    board.set_tile(c(0, 0), Tile::Wall);
    let reader = TileReader::new(&board, c(2, 0), Direction::East);
    assert!(!reader.has_next());
    // The half-edge is still registered, only the wall makes it inert
    assert!(board.transitions().get(c(2, 0), Direction::East).is_some());
}

#[test]
fn test_transition_taken_past_wall() {
    let mut board = Board::new(3, 1);
    board.set_tile(c(1, 0), Tile::Wall);
    assert!(board
        .transitions_mut()
        .register((c(0, 0), Direction::East), (c(2, 0), Direction::West)));
    let mut reader = TileReader::new(&board, c(0, 0), Direction::East);
    assert_eq!(reader.next(), Some(c(2, 0)));
    assert_eq!(reader.direction(), Direction::East);
    assert_eq!(reader.next(), None);
}

#[test]
fn test_neighbours() {
    let board = ring();
    let mut around: Vec<Coordinates> = neighbours(&board, c(0, 0)).collect();
    around.sort();
    assert_eq!(around, vec![c(1, 0), c(2, 0)]);

    let open = Board::new(3, 3);
    assert_eq!(neighbours(&open, c(1, 1)).count(), 8);
    assert_eq!(neighbours(&open, c(0, 0)).count(), 3);
}

#[test]
fn test_display_rows() {
    let board = ring();
    assert_eq!(board.to_string(), "1 2 0\n");
}
