//! Move execution: captures, special tiles and bombs

use std::collections::BTreeSet;

use log::trace;

use crate::board::{neighbours, Board, Coordinates, Direction, PlayerId, Tile, TileReader};
use crate::error::Result;
use crate::game::{BonusChoice, GameState, Move, MoveKind};

/// Find every stone captured by `player` placing at `target`.
///
/// Each direction is walked like in move generation. The foreign stones
/// passed are kept only if the walk ends on one of `player`'s stones; a dead
/// end, an unoccupied tile or a loop back to `target` discards them.
pub fn capture_set(board: &Board, target: Coordinates, player: PlayerId) -> Vec<Coordinates> {
    let mut captured = Vec::new();
    let max_steps = (board.width() * board.height()) as usize * Direction::ALL.len();

    for direction in Direction::ALL {
        let mut reader = TileReader::new(board, target, direction);
        let mut run = Vec::new();

        for _ in 0..max_steps {
            let Some(pos) = reader.next() else {
                break;
            };
            if pos == target {
                break;
            }
            match board.tile(pos) {
                Some(Tile::Player(owner)) if owner == player => {
                    captured.append(&mut run);
                    break;
                }
                Some(tile) if tile.is_capturable_by(player) => run.push(pos),
                _ => break,
            }
        }
    }
    captured
}

/// Apply `mv` to `state`. The move is assumed to be legal.
///
/// Does not advance the turn; that is the job of [`GameState`].
pub fn execute(state: &mut GameState, mv: &Move) -> Result<()> {
    if mv.kind == MoveKind::Bomb {
        return explode(state, mv.player, mv.coordinates);
    }

    let player = mv.player;
    let target = mv.coordinates;
    let previous = state.board().tile(target);

    // Charged before any tile changes, so a failure leaves the state intact
    let mover = state.player_mut(player)?;
    if !previous.is_some_and(Tile::is_unoccupied) {
        mover.take_overwrite_stone()?;
    }

    let captured = capture_set(state.board(), target, player);
    trace!("{mv} captures {} stones", captured.len());

    let board = state.board_mut();
    board.set_tile(target, Tile::Player(player));
    for pos in captured {
        board.set_tile(pos, Tile::Player(player));
    }

    match mv.kind {
        MoveKind::Normal | MoveKind::Overwrite | MoveKind::Bomb => {}
        MoveKind::Bonus(BonusChoice::Bomb) => state.player_mut(player)?.add_bomb(),
        MoveKind::Bonus(BonusChoice::OverwriteStone) => {
            state.player_mut(player)?.add_overwrite_stone()
        }
        MoveKind::Choice(with) => swap_stones(state.board_mut(), player, with),
        MoveKind::Inversion => {
            let count = state.player_count();
            invert_stones(state.board_mut(), count);
        }
    }
    Ok(())
}

/// Exchange all stones of `a` and `b`
pub fn swap_stones(board: &mut Board, a: PlayerId, b: PlayerId) {
    if a == b {
        return;
    }
    let stones_a = board.stones(a).clone();
    let stones_b = board.stones(b).clone();
    for pos in stones_a {
        board.set_tile(pos, Tile::Player(b));
    }
    for pos in stones_b {
        board.set_tile(pos, Tile::Player(a));
    }
}

/// Hand every player's stones to the next player in turn order (the last
/// player's stones go to player 1).
pub fn invert_stones(board: &mut Board, player_count: usize) {
    let before: Vec<BTreeSet<Coordinates>> = (0..player_count)
        .map(|i| board.stones(PlayerId::from_index(i)).clone())
        .collect();
    for (i, stones) in before.into_iter().enumerate() {
        let receiver = PlayerId::from_index((i + 1) % player_count);
        for pos in stones {
            board.set_tile(pos, Tile::Player(receiver));
        }
    }
}

/// Tiles destroyed by a bomb at `center`: everything within `radius` steps,
/// following transitions.
pub fn blast_area(board: &Board, center: Coordinates, radius: u32) -> BTreeSet<Coordinates> {
    let mut area = BTreeSet::from([center]);
    let mut frontier = vec![center];
    for _ in 0..radius {
        let mut next = Vec::new();
        for pos in frontier {
            for neighbour in neighbours(board, pos) {
                if area.insert(neighbour) {
                    next.push(neighbour);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    area
}

fn explode(state: &mut GameState, player: PlayerId, center: Coordinates) -> Result<()> {
    state.player_mut(player)?.take_bomb()?;
    let area = blast_area(state.board(), center, state.bomb_radius());
    trace!("bomb at {center} destroys {} tiles", area.len());
    let board = state.board_mut();
    for pos in area {
        board.set_tile(pos, Tile::Wall);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GamePhase;
    use crate::map::parse_map;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n).unwrap()
    }

    fn c(x: i32, y: i32) -> Coordinates {
        Coordinates::new(x, y)
    }

    #[test]
    fn test_capture_horizontal_and_diagonal() {
        let state = parse_map("2\n0\n0 0\n3 4\n1 2 2 0\n0 0 2 0\n0 0 0 1\n").unwrap();
        let mut captured = capture_set(state.board(), c(3, 0), p(1));
        captured.sort();
        assert_eq!(captured, vec![c(1, 0), c(2, 0)]);

        let captured = capture_set(state.board(), c(1, 1), p(1));
        assert!(captured.is_empty());
    }

    #[test]
    fn test_capture_discarded_on_dead_end() {
        let state = parse_map("2\n0\n0 0\n1 4\n0 2 2 2\n").unwrap();
        assert!(capture_set(state.board(), c(0, 0), p(1)).is_empty());
    }

    #[test]
    fn test_execute_normal_move() {
        let mut state = parse_map("2\n0\n0 0\n1 4\n1 2 2 0\n").unwrap();
        let mv = Move::new(p(1), c(3, 0), MoveKind::Normal);
        state.apply_move(mv).unwrap();
        assert_eq!(state.tile_count(p(1)), 4);
        assert_eq!(state.tile_count(p(2)), 0);
    }

    #[test]
    fn test_overwrite_consumes_stone() {
        let mut state = parse_map("2\n1\n0 0\n1 5\n1 2 2 2 1\n").unwrap();
        let mv = Move::new(p(1), c(2, 0), MoveKind::Overwrite);
        state.apply_move(mv).unwrap();
        assert_eq!(state.player(p(1)).unwrap().overwrite_stones(), 0);
        assert_eq!(state.tile_count(p(1)), 5);
    }

    #[test]
    fn test_overwrite_without_stone_is_an_error() {
        let mut state = parse_map("2\n0\n0 0\n1 5\n1 2 2 2 1\n").unwrap();
        let before = state.clone();
        let mv = Move::new(p(1), c(2, 0), MoveKind::Overwrite);
        assert!(execute(&mut state, &mv).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_unknown_player_leaves_board_untouched() {
        let mut state = parse_map("2\n0\n0 0\n1 4\n1 2 b 0\n").unwrap();
        let before = state.clone();
        let mv = Move::new(p(5), c(2, 0), MoveKind::Bonus(BonusChoice::Bomb));
        assert!(execute(&mut state, &mv).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_bonus_rewards() {
        let map = "2\n0\n0 0\n1 4\n1 2 b 0\n";
        let mut state = parse_map(map).unwrap();
        state
            .apply_move(Move::new(p(1), c(2, 0), MoveKind::Bonus(BonusChoice::Bomb)))
            .unwrap();
        assert_eq!(state.player(p(1)).unwrap().bombs(), 1);

        let mut state = parse_map(map).unwrap();
        state
            .apply_move(Move::new(
                p(1),
                c(2, 0),
                MoveKind::Bonus(BonusChoice::OverwriteStone),
            ))
            .unwrap();
        assert_eq!(state.player(p(1)).unwrap().overwrite_stones(), 1);
        assert_eq!(state.player(p(1)).unwrap().bombs(), 0);
    }

    #[test]
    fn test_inversion_rotates_three_players() {
        let mut state = parse_map("3\n0\n0 0\n2 4\n1 2 i 0\n3 3 0 0\n").unwrap();
        state
            .apply_move(Move::new(p(1), c(2, 0), MoveKind::Inversion))
            .unwrap();
        // Player 1 owned (0,0),(1,0),(2,0) after placing; those go to player 2
        assert_eq!(state.board().stones(p(2)).len(), 3);
        // Player 3's stones go to player 1
        assert_eq!(state.board().stones(p(1)), &BTreeSet::from([c(0, 1), c(1, 1)]));
        assert!(state.board().stones(p(3)).is_empty());
    }

    #[test]
    fn test_blast_area_radius_one() {
        let state = parse_map("2\n0\n1 1\n3 3\n0 0 0\n0 1 0\n0 0 2\n").unwrap();
        assert_eq!(blast_area(state.board(), c(1, 1), 1).len(), 9);
        assert_eq!(blast_area(state.board(), c(0, 0), 1).len(), 4);
        assert_eq!(blast_area(state.board(), c(0, 0), 0).len(), 1);
    }

    #[test]
    fn test_bomb_turns_area_into_walls() {
        let mut state = parse_map("2\n0\n1 1\n1 4\n1 0 0 2\n").unwrap();
        assert_eq!(state.phase(), GamePhase::Bomb);
        let mv = Move::new(p(1), c(0, 0), MoveKind::Bomb);
        state.apply_move(mv).unwrap();
        assert_eq!(state.board().tile(c(0, 0)), Some(Tile::Wall));
        assert_eq!(state.board().tile(c(1, 0)), Some(Tile::Wall));
        assert_eq!(state.board().tile(c(2, 0)), Some(Tile::Empty));
        assert_eq!(state.player(p(1)).unwrap().bombs(), 0);
    }
}
