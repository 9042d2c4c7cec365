//! # rust-dominoes
//!
//! A domino rules engine for 2-4 participants, any mix of human and
//! automated players.
//!
//! ## Design Principles
//!
//! 1. **Rules only**: No rendering, input handling, or sound. The
//!    presentation layer consumes read-only snapshots and posts decisions
//!    through per-player mailboxes.
//!
//! 2. **Explicit suspension**: A turn waiting on human input is a state of
//!    the machine, not a blocking read, so the same core drives scripted,
//!    automated and interactive matches.
//!
//! 3. **Deterministic**: All randomness flows from one seeded RNG; a match
//!    replays from its seed, and forks let simulations run many independent
//!    matches in parallel.
//!
//! ## Modules
//!
//! - `core`: Tiles, players, RNG, configuration
//! - `board`: The tile chain and its open paths
//! - `decision`: Polymorphic move sources (automated levels, interactive)
//! - `sync`: Change signal and move mailboxes between engine and presentation
//! - `game`: Round/turn state machine, scoring, elimination, snapshots

pub mod board;
pub mod core;
pub mod decision;
pub mod game;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{full_set, GameConfig, GameRng, Player, PlayerId, Tile};

pub use crate::board::{Board, Path};

pub use crate::decision::{
    automated, Decision, GreedyMoves, InteractiveMoves, MoveSource, PlayerSetup, RandomMoves,
};

pub use crate::sync::{ChosenInput, MoveMailbox, StateSignal};

pub use crate::game::{
    AwaitingInput, BoardSnapshot, EngineStatus, Game, GameSnapshot, PlayerSnapshot, RoundOutcome,
};

/// Everything that can go wrong inside the engine.
///
/// Configuration variants are fatal at construction. The `Rogue*` variants
/// are fatal mid-match: an automated source broke its contract, which is a
/// programming error, not a recoverable game state. Everything else is
/// rejected locally and re-requested without mutating state.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("player count {0} is outside the supported 2-4 range")]
    PlayerCount(usize),

    #[error("highest face value {0} is outside the supported 1-6 range")]
    FaceValue(u8),

    #[error("cannot deal {draw_count} tiles to each of {player_count} players from a {stock_size}-tile stock")]
    DealTooLarge {
        draw_count: usize,
        player_count: usize,
        stock_size: usize,
    },

    #[error("the per-player deal size must be at least 1")]
    ZeroDeal,

    #[error("the elimination threshold must be positive")]
    ZeroThreshold,

    #[error("tile {tile} does not match any open path")]
    UnplayableTile { tile: Tile },

    #[error("connecting value {value} is not a face of tile {tile}")]
    InvalidConnection { tile: Tile, value: u8 },

    #[error("automated source for {player} chose tile {tile} outside the legal set")]
    RogueAutomatedTile { player: PlayerId, tile: Tile },

    #[error("automated source for {player} chose connecting value {value} for tile {tile}")]
    RogueAutomatedConnection {
        player: PlayerId,
        tile: Tile,
        value: u8,
    },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
