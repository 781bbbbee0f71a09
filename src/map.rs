//! Map description loader
//!
//! ```text
//! 2            players
//! 3            overwrite stones per player
//! 1 2          bombs per player, bomb radius
//! 3 4          height, width
//! 0 1 2 0      `height` rows of `width` tile codes
//! 0 2 1 0
//! - c i b
//! 0 0 6 <-> 3 2 2     transitions: x1 y1 dir1 <-> x2 y2 dir2
//! ```

use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::board::{Board, Coordinates, Direction, PlayerId, Tile, MAX_DIMENSION};
use crate::error::MapError;
use crate::game::{GameState, Player};

/// Read and parse a map file.
pub fn load_map(path: impl AsRef<Path>) -> Result<GameState, MapError> {
    let text = std::fs::read_to_string(path)?;
    parse_map(&text)
}

/// Parse a map description into the initial game state.
pub fn parse_map(text: &str) -> Result<GameState, MapError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, tokens)| !tokens.is_empty());

    let mut header = |what: &'static str| {
        lines
            .next()
            .map(|(_, tokens)| tokens)
            .ok_or(MapError::MissingField { what })
    };

    let player_count: u32 = number(first(&header("player count")?, "player count")?, "player count")?;
    if !(1..=8).contains(&player_count) {
        return Err(MapError::InvalidPlayerCount { count: player_count });
    }
    let overwrite_stones: u32 =
        number(first(&header("overwrite stones")?, "overwrite stones")?, "overwrite stones")?;

    let bomb_line = header("bomb settings")?;
    let bombs: u32 = number(first(&bomb_line, "bomb count")?, "bomb count")?;
    let radius: u32 = number(
        bomb_line.get(1).copied().ok_or(MapError::MissingField { what: "bomb radius" })?,
        "bomb radius",
    )?;

    let size_line = header("board size")?;
    let height: i32 = number(first(&size_line, "board height")?, "board height")?;
    let width: i32 = number(
        size_line.get(1).copied().ok_or(MapError::MissingField { what: "board width" })?,
        "board width",
    )?;
    if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
        return Err(MapError::InvalidDimensions { width, height });
    }

    // Rows are read before the board is allocated, so a size line that
    // promises more than the text holds fails without allocating
    let mut rows = Vec::new();
    for y in 0..height {
        let row = header("board row")?;
        if row.len() != width as usize {
            return Err(MapError::RowLength {
                row: y,
                got: row.len(),
                expected: width as usize,
            });
        }
        let tiles = row
            .iter()
            .enumerate()
            .map(|(x, code)| {
                parse_tile(code, player_count).ok_or_else(|| MapError::UnknownTile {
                    code: code.to_string(),
                    position: Coordinates::new(x as i32, y),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(tiles);
    }

    let mut board = Board::new(width, height);
    for (y, row) in rows.into_iter().enumerate() {
        for (x, tile) in row.into_iter().enumerate() {
            board.set_tile(Coordinates::new(x as i32, y as i32), tile);
        }
    }

    for (line, tokens) in lines {
        let malformed = |reason: &str| MapError::MalformedTransition {
            line,
            reason: reason.to_string(),
        };
        if tokens.len() != 7 {
            return Err(malformed("expected `x1 y1 dir1 <-> x2 y2 dir2`"));
        }
        let a = half_edge(&board, &tokens[0..3]).ok_or_else(|| malformed("bad first endpoint"))?;
        let b = half_edge(&board, &tokens[4..7]).ok_or_else(|| malformed("bad second endpoint"))?;
        if !board.transitions_mut().register(a, b) {
            return Err(malformed("endpoint already used by another transition"));
        }
    }

    debug!(
        "loaded {width}x{height} map for {player_count} players with {} transition halves",
        board.transitions().len()
    );

    let players = (1..=player_count as u8)
        .filter_map(PlayerId::new)
        .map(|id| Player::new(id, overwrite_stones, bombs))
        .collect();
    Ok(GameState::new(board, players, radius))
}

fn first<'a>(tokens: &[&'a str], what: &'static str) -> Result<&'a str, MapError> {
    tokens.first().copied().ok_or(MapError::MissingField { what })
}

fn number<T: FromStr>(token: &str, what: &'static str) -> Result<T, MapError> {
    token.parse().map_err(|_| MapError::InvalidNumber {
        what,
        value: token.to_string(),
    })
}

fn parse_tile(code: &str, player_count: u32) -> Option<Tile> {
    let mut chars = code.chars();
    let tile = Tile::from_char(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    match tile.owner() {
        Some(owner) if u32::from(owner.number()) > player_count => None,
        _ => Some(tile),
    }
}

fn half_edge(board: &Board, tokens: &[&str]) -> Option<(Coordinates, Direction)> {
    let x: i32 = tokens[0].parse().ok()?;
    let y: i32 = tokens[1].parse().ok()?;
    let direction = Direction::from_index(tokens[2].parse().ok()?)?;
    let pos = Coordinates::new(x, y);
    board.contains(pos).then_some((pos, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GamePhase;

    #[test]
    fn test_parse_header_and_board() {
        let state = parse_map("2\n3\n1 2\n2 3\n1 2 0\n- c x\n").unwrap();
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.bomb_radius(), 2);
        assert_eq!(state.players()[1].overwrite_stones(), 3);
        assert_eq!(state.players()[0].bombs(), 1);
        assert_eq!(state.board().width(), 3);
        assert_eq!(state.board().height(), 2);
        assert_eq!(state.board().tile(Coordinates::new(0, 1)), Some(Tile::Wall));
        assert_eq!(state.board().tile(Coordinates::new(2, 1)), Some(Tile::Expansion));
        assert_eq!(state.phase(), GamePhase::Build);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let state = parse_map("  2 \n\n0\n0   0\n1 3\n 1  2 0 \n\n").unwrap();
        assert_eq!(state.board().width(), 3);
    }

    #[test]
    fn test_transitions_registered_both_ways() {
        let state = parse_map("2\n0\n0 0\n2 2\n1 2\n0 0\n0 0 7 <-> 1 1 3\n").unwrap();
        let transitions = state.board().transitions();
        assert_eq!(transitions.len(), 2);
        let a = (Coordinates::new(0, 0), Direction::NorthWest);
        let b = (Coordinates::new(1, 1), Direction::SouthEast);
        assert_eq!(transitions.counterpart(a), Some(b));
        assert_eq!(transitions.counterpart(b), Some(a));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_map("9\n0\n0 0\n1 1\n0\n"), Err(MapError::InvalidPlayerCount { .. })));
        assert!(matches!(parse_map("2\n0\n0 0\n1 2\n1 q\n"), Err(MapError::UnknownTile { .. })));
        assert!(matches!(parse_map("2\n0\n0 0\n1 2\n1 3\n"), Err(MapError::UnknownTile { .. })));
        assert!(matches!(parse_map("2\n0\n0 0\n1 3\n1 2\n"), Err(MapError::RowLength { .. })));
        assert!(matches!(parse_map("2\n0\n0\n1 1\n1\n"), Err(MapError::MissingField { .. })));
        assert!(matches!(parse_map("2\nmany\n0 0\n1 1\n1\n"), Err(MapError::InvalidNumber { .. })));
        assert!(matches!(
            parse_map("2\n0\n0 0\n0 2\n"),
            Err(MapError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            parse_map("2\n0\n0 0\n1 2\n1 2\n0 0 8 <-> 1 0 2\n"),
            Err(MapError::MalformedTransition { .. })
        ));
        assert!(matches!(
            parse_map("2\n0\n0 0\n1 2\n1 2\n0 0 6 <-> 1 0 2\n0 0 6 <-> 1 0 0\n"),
            Err(MapError::MalformedTransition { .. })
        ));
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        for size in ["70000 70000", "1 40000", "32768 1", "2147483647 2"] {
            let map = format!("2\n0\n0 0\n{size}\n0\n");
            assert!(
                matches!(parse_map(&map), Err(MapError::InvalidDimensions { .. })),
                "size {size}"
            );
        }
    }

    #[test]
    fn test_missing_rows_fail_before_allocating() {
        let map = format!("2\n0\n0 0\n{MAX_DIMENSION} 1\n1\n2\n");
        assert!(matches!(
            parse_map(&map),
            Err(MapError::MissingField { what: "board row" })
        ));
    }
}
