//! ReversiXT command line tool
//!
//! ## Usage
//!
//! - `reversi show <map>` - Print the board and game settings
//! - `reversi moves <map>` - List the legal moves of the current player
//! - `reversi best <map>` - Search the best move of the current player
//! - `reversi selfplay <map>` - Let the engine play every seat until the end

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use reversi::rules::Communities;
use reversi::search::Deadline;
use reversi::{load_map, AIEngine, GameState, PlayerId, SearchConfig};

/// ReversiXT engine: inspect maps and search moves
#[derive(Parser)]
#[command(name = "reversi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board, players and transitions of a map
    Show {
        map: PathBuf,
    },
    /// List legal moves with their wire encoding
    Moves {
        map: PathBuf,
        /// Player number (defaults to the player to move)
        #[arg(short, long)]
        player: Option<u8>,
    },
    /// Search the best move for the player to move
    Best {
        map: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Play a whole game with the engine in every seat
    Selfplay {
        map: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
        /// Stop after this many moves
        #[arg(long, default_value_t = 1000)]
        max_moves: u32,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Time per move in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    time_ms: u64,
    /// Maximum search depth in plies
    #[arg(short, long, default_value_t = 64)]
    depth: u32,
    /// Search the whole board even when it is split into communities
    #[arg(long)]
    no_communities: bool,
    /// Disable killer move ordering
    #[arg(long)]
    no_killers: bool,
    /// Disable the phi move on minimizing nodes
    #[arg(long)]
    no_phi: bool,
    /// Keep deepening until the deadline instead of predicting round durations
    #[arg(long)]
    no_estimate: bool,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.depth.max(1),
            use_communities: !self.no_communities,
            use_killer_moves: !self.no_killers,
            use_phi: !self.no_phi,
            use_time_estimate: !self.no_estimate,
            ..SearchConfig::default()
        }
    }

    fn deadline(&self) -> Deadline {
        Deadline::after(Duration::from_millis(self.time_ms))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { map } => show(&load(&map)?),
        Commands::Moves { map, player } => list_moves(&load(&map)?, player),
        Commands::Best { map, search } => best(&load(&map)?, &search),
        Commands::Selfplay {
            map,
            search,
            max_moves,
        } => selfplay(load(&map)?, &search, max_moves),
    }
}

fn load(path: &Path) -> Result<GameState> {
    load_map(path).with_context(|| format!("failed to load map {}", path.display()))
}

fn show(state: &GameState) -> Result<()> {
    let board = state.board();
    println!("{}x{} board, phase {:?}", board.width(), board.height(), state.phase());
    println!("{board}");
    for player in state.players() {
        println!(
            "player {}: {} tiles, {} overwrite stones, {} bombs{}",
            player.id(),
            state.tile_count(player.id()),
            player.overwrite_stones(),
            player.bombs(),
            if player.is_disqualified() { " (disqualified)" } else { "" }
        );
    }
    println!("bomb radius {}", state.bomb_radius());
    let mut transitions: Vec<_> = board.transitions().iter().collect();
    transitions.sort();
    for ((from, direction), (to, incoming)) in transitions {
        println!("transition {from} {direction:?} -> {to} {incoming:?}");
    }
    println!("{} communities", Communities::build(board).len());
    Ok(())
}

fn list_moves(state: &GameState, player: Option<u8>) -> Result<()> {
    let player = match player {
        Some(number) => PlayerId::new(number).context("player numbers range from 1 to 8")?,
        None => state.current_player().context("the game is over")?,
    };
    let moves = state.legal_moves(player);
    println!("{} legal moves for player {player}", moves.len());
    for mv in moves {
        let wire = mv.to_wire();
        println!("{mv}  [{} {} {}]", wire.x, wire.y, wire.special);
    }
    Ok(())
}

fn best(state: &GameState, search: &SearchArgs) -> Result<()> {
    let Some(player) = state.current_player() else {
        bail!("the game is over");
    };
    let mut engine = AIEngine::with_config(state.board(), search.config());
    let result = engine.best_move(state, player, search.deadline())?;
    match result.best_move {
        Some(mv) => {
            let wire = mv.to_wire();
            println!(
                "{mv}  [{} {} {}] score {} depth {} nodes {} in {} ms",
                wire.x, wire.y, wire.special, result.score, result.depth, result.nodes, result.time_ms
            );
        }
        None => println!("player {player} has no move"),
    }
    Ok(())
}

fn selfplay(mut state: GameState, search: &SearchArgs, max_moves: u32) -> Result<()> {
    let mut engine = AIEngine::with_config(state.board(), search.config());
    while let Some(player) = state.current_player() {
        if state.move_count() >= max_moves {
            println!("stopped after {max_moves} moves");
            break;
        }
        let Some(mv) = engine.get_move(&state, player, search.deadline())? else {
            bail!("player {player} is to move but has no move");
        };
        state.apply_move(mv)?;
        println!("{:>4}: {mv}", state.move_count());
    }

    println!("{}", state.board());
    let mut ranking: Vec<(PlayerId, usize)> = state
        .player_ids()
        .map(|id| (id, state.tile_count(id)))
        .collect();
    ranking.sort_by_key(|&(_, tiles)| std::cmp::Reverse(tiles));
    for (place, (id, tiles)) in ranking.iter().enumerate() {
        println!("{}. player {id}: {tiles} tiles", place + 1);
    }
    Ok(())
}
