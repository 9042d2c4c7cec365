//! Core engine types: tiles, players, RNG, configuration.
//!
//! These are the leaf value types the board and game modules build on.

pub mod config;
pub mod player;
pub mod rng;
pub mod tile;

pub use config::GameConfig;
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use tile::{full_set, Tile};
