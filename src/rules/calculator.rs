//! Legal move generation
//!
//! Moves are found by casting rays from every stone of the mover. A ray that
//! starts on a foreign stone (another colour or an expansion stone) and runs
//! over foreign stones only is a capture run; where it ends decides the move:
//!
//! ```text
//!   own  foreign  foreign  [empty]      -> Normal move on the empty tile
//!   own  foreign  foreign  [c / i / b]  -> Choice / Inversion / Bonus move
//!   own  foreign [foreign] ...          -> Overwrite move (needs a stone)
//!   own  foreign  ... back to own       -> Overwrite move on the origin
//! ```
//!
//! With at least one overwrite stone every expansion tile is playable too.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use crate::board::{Board, Coordinates, Direction, PlayerId, Tile, TileReader};
use crate::game::{BonusChoice, GamePhase, GameState, Move, MoveKind};

/// All legal moves of `player` in the current phase.
///
/// Moves reached from several rays are reported once.
pub fn legal_moves(state: &GameState, player: PlayerId) -> BTreeSet<Move> {
    let mut moves = BTreeSet::new();
    let _ = for_each_move(state, player, &mut |mv| {
        moves.insert(mv);
        ControlFlow::Continue(())
    });
    moves
}

/// Whether `player` has at least one legal move. Stops at the first one found.
pub fn has_legal_move(state: &GameState, player: PlayerId) -> bool {
    for_each_move(state, player, &mut |_| ControlFlow::Break(())).is_break()
}

/// Feed every legal move (possibly repeated) to `sink` until it breaks.
fn for_each_move<F>(state: &GameState, player: PlayerId, sink: &mut F) -> ControlFlow<()>
where
    F: FnMut(Move) -> ControlFlow<()>,
{
    let Some(info) = state.player(player) else {
        return ControlFlow::Continue(());
    };
    if info.is_disqualified() {
        return ControlFlow::Continue(());
    }

    match state.phase() {
        GamePhase::End => ControlFlow::Continue(()),
        GamePhase::Bomb => {
            if info.bombs() == 0 {
                return ControlFlow::Continue(());
            }
            let board = state.board();
            for pos in board.coordinates() {
                if board.tile(pos) != Some(Tile::Wall) {
                    sink(Move::new(player, pos, MoveKind::Bomb))?;
                }
            }
            ControlFlow::Continue(())
        }
        GamePhase::Build => {
            let has_stones = info.overwrite_stones() > 0;
            let choices = choice_targets(state, player);
            let board = state.board();

            for &origin in board.stones(player) {
                for direction in Direction::ALL {
                    walk_ray(board, player, origin, direction, has_stones, &choices, sink)?;
                }
            }

            if has_stones {
                for &pos in board.positions(Tile::Expansion) {
                    sink(Move::new(player, pos, MoveKind::Overwrite))?;
                }
            }
            ControlFlow::Continue(())
        }
    }
}

/// Players a choice tile may swap with: every other active player, or the
/// mover itself when it is the last one left.
fn choice_targets(state: &GameState, player: PlayerId) -> Vec<PlayerId> {
    let others: Vec<PlayerId> = state
        .players()
        .iter()
        .filter(|p| p.id() != player && !p.is_disqualified())
        .map(|p| p.id())
        .collect();
    if others.is_empty() {
        vec![player]
    } else {
        others
    }
}

/// Follow one ray from `origin` and report the moves it produces.
fn walk_ray<F>(
    board: &Board,
    player: PlayerId,
    origin: Coordinates,
    direction: Direction,
    has_stones: bool,
    choices: &[PlayerId],
    sink: &mut F,
) -> ControlFlow<()>
where
    F: FnMut(Move) -> ControlFlow<()>,
{
    let mut reader = TileReader::new(board, origin, direction);

    // Nothing to enclose unless the first tile is foreign
    match reader.next().and_then(|pos| board.tile(pos)) {
        Some(tile) if tile.is_capturable_by(player) => {}
        _ => return ControlFlow::Continue(()),
    }

    // Every walk either dead-ends or cycles back to the origin; the bound is a guard
    let max_steps = (board.width() * board.height()) as usize * Direction::ALL.len();
    for _ in 0..max_steps {
        let Some(pos) = reader.next() else {
            break;
        };
        let Some(tile) = board.tile(pos) else {
            break;
        };

        if pos == origin {
            if has_stones {
                sink(Move::new(player, origin, MoveKind::Overwrite))?;
            }
            break;
        }

        match tile {
            Tile::Player(owner) if owner == player => break,
            Tile::Player(_) | Tile::Expansion => {
                if has_stones {
                    sink(Move::new(player, pos, MoveKind::Overwrite))?;
                }
            }
            Tile::Empty => {
                sink(Move::new(player, pos, MoveKind::Normal))?;
                break;
            }
            Tile::Choice => {
                for &with in choices {
                    sink(Move::new(player, pos, MoveKind::Choice(with)))?;
                }
                break;
            }
            Tile::Inversion => {
                sink(Move::new(player, pos, MoveKind::Inversion))?;
                break;
            }
            Tile::Bonus => {
                sink(Move::new(player, pos, MoveKind::Bonus(BonusChoice::Bomb)))?;
                sink(Move::new(player, pos, MoveKind::Bonus(BonusChoice::OverwriteStone)))?;
                break;
            }
            Tile::Wall => break,
        }
    }
    ControlFlow::Continue(())
}
