//! Match orchestration: the round and turn state machine.
//!
//! One `Game` is one match. It owns the players (in rotating turn order),
//! the stock, the current board and the RNG, and drives rounds until some
//! player's cumulative score crosses the elimination threshold.
//!
//! ## State machine
//!
//! `AwaitingStart -> RoundInProgress -> RoundScored -> (RoundInProgress |
//! MatchOver)`, advanced one step at a time by [`Game::step`]. Inside a
//! round, a turn that needs external input parks in an explicit suspension
//! state (`AwaitingMove` or `AwaitingConnectionChoice`) instead of blocking,
//! so the same core drives scripted, automated and interactive matches.
//! [`Game::run`] is the blocking driver built on top of `step`.
//!
//! ## Per-turn error policy
//!
//! Decisions that fail validation never escape into the round loop. An
//! interactive player's illegal choice is logged, dropped, and re-requested
//! with no state mutated; the same violation from an automated source is a
//! programming error and aborts the match.

pub mod snapshot;

pub use snapshot::{BoardSnapshot, GameSnapshot, PlayerSnapshot};

use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{full_set, GameConfig, GameRng, Player, PlayerId, Tile};
use crate::decision::{Decision, PlayerSetup};
use crate::sync::StateSignal;
use crate::{EngineError, Result};

/// What a single [`Game::step`] accomplished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    /// A new round was dealt and opened.
    RoundStarted,
    /// The current player placed a tile.
    TurnPlayed,
    /// The current player could not act (no legal tile, empty stock).
    TurnSkipped,
    /// Suspended: waiting for this player's tile choice.
    AwaitingMove(PlayerId),
    /// Suspended: waiting for this player's connecting-value choice.
    AwaitingConnectionChoice(PlayerId),
    /// The round ended and scores were written down.
    RoundOver(RoundOutcome),
    /// The match is over; these players reached the threshold.
    MatchOver(Vec<PlayerId>),
}

/// What the engine is suspended on, if anything.
///
/// Presentation layers read this to know whether to prompt for a tile or,
/// on an ambiguous placement, for a connecting face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AwaitingInput {
    /// This player owes a tile choice.
    Move(PlayerId),
    /// This player owes a connecting-value choice for `tile`.
    Connection {
        player: PlayerId,
        tile: Tile,
        choices: Vec<u8>,
    },
}

/// How a round terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Blocked game: nobody could move and the stock was exhausted.
    Blocked,
    /// This player emptied their hand.
    Finished(PlayerId),
}

#[derive(Debug)]
enum Phase {
    AwaitingStart,
    Turn,
    AwaitingMove {
        legal: Vec<Tile>,
    },
    AwaitingConnection {
        tile: Tile,
        choices: SmallVec<[u8; 2]>,
    },
    RoundScored,
    MatchOver {
        goats: Vec<PlayerId>,
    },
}

/// One match of dominoes.
pub struct Game {
    config: GameConfig,
    /// Current turn order; the round opener rotates to the back.
    players: Vec<Player>,
    stock: Vec<Tile>,
    board: Board,
    round_number: u32,
    current: usize,
    phase: Phase,
    rng: GameRng,
    signal: StateSignal,
}

impl Game {
    /// Create a match from participants and rules constants.
    ///
    /// Fails fast on an unplayable configuration (player count outside 2-4,
    /// face values above double-six, deals larger than the stock).
    pub fn new(setups: Vec<PlayerSetup>, config: GameConfig, seed: u64) -> Result<Self> {
        config.validate(setups.len())?;

        let players = setups
            .into_iter()
            .enumerate()
            .map(|(i, s)| Player::new(PlayerId::new(i as u8), s.name, s.source))
            .collect();

        Ok(Self {
            config,
            players,
            stock: Vec::new(),
            board: Board::new(),
            round_number: 0,
            current: 0,
            phase: Phase::AwaitingStart,
            rng: GameRng::new(seed),
            signal: StateSignal::new(),
        })
    }

    /// The change-notification signal for the presentation layer.
    ///
    /// Clones share the flag; hand one clone per consumer.
    #[must_use]
    pub fn signal(&self) -> StateSignal {
        self.signal.clone()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Players in current turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn stock_count(&self) -> usize {
        self.stock.len()
    }

    /// 1-based round counter; 0 before the first round.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn is_match_over(&self) -> bool {
        matches!(self.phase, Phase::MatchOver { .. })
    }

    /// The eliminated players, once the match is over.
    #[must_use]
    pub fn goats(&self) -> Option<&[PlayerId]> {
        match &self.phase {
            Phase::MatchOver { goats } => Some(goats),
            _ => None,
        }
    }

    /// What input, if any, the engine is currently suspended on.
    #[must_use]
    pub fn awaiting(&self) -> Option<AwaitingInput> {
        let player = self.players.get(self.current)?.id();
        match &self.phase {
            Phase::AwaitingMove { .. } => Some(AwaitingInput::Move(player)),
            Phase::AwaitingConnection { tile, choices } => Some(AwaitingInput::Connection {
                player,
                tile: *tile,
                choices: choices.to_vec(),
            }),
            _ => None,
        }
    }

    /// Tiles in `player`'s hand that match some open path right now.
    ///
    /// Hand order is preserved, which is what the deterministic automated
    /// tie-breaks key on.
    #[must_use]
    pub fn legal_tiles(&self, player: PlayerId) -> Vec<Tile> {
        self.players
            .iter()
            .position(|p| p.id() == player)
            .map(|idx| self.legal_tiles_at(idx))
            .unwrap_or_default()
    }

    /// A consistent read-only view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id(),
                    name: p.name().to_string(),
                    hand: p.hand().to_vec(),
                    score: p.score(),
                    is_bot: !p.is_interactive(),
                    is_move_available: p.is_move_available(),
                })
                .collect(),
            current_player: self.current,
            board: BoardSnapshot {
                opening_tile: self.board.opening_tile(),
                paths: self.board.paths().to_vec(),
                tiles: self.board.tiles().to_vec(),
            },
            stock_count: self.stock.len(),
            round_number: self.round_number,
        }
    }

    /// Advance the state machine by one step.
    ///
    /// Non-blocking: when an interactive player owes input this returns the
    /// corresponding `Awaiting` status without mutating anything, and the
    /// caller decides whether to poll, park, or do other work.
    pub fn step(&mut self) -> Result<EngineStatus> {
        match std::mem::replace(&mut self.phase, Phase::Turn) {
            Phase::AwaitingStart | Phase::RoundScored => {
                self.start_round();
                Ok(EngineStatus::RoundStarted)
            }
            Phase::Turn => self.process_turn(),
            Phase::AwaitingMove { legal } => self.ask_for_tile(legal),
            Phase::AwaitingConnection { tile, choices } => {
                self.ask_for_connection(tile, choices)
            }
            Phase::MatchOver { goats } => {
                let status = EngineStatus::MatchOver(goats.clone());
                self.phase = Phase::MatchOver { goats };
                Ok(status)
            }
        }
    }

    /// Drive the match to completion, returning the goats.
    ///
    /// Blocks (condition wait, no busy loop) whenever an interactive
    /// player's turn is suspended; performs no other mutation while parked.
    pub fn run(&mut self) -> Result<Vec<PlayerId>> {
        loop {
            match self.step()? {
                EngineStatus::MatchOver(goats) => return Ok(goats),
                EngineStatus::AwaitingMove(_) | EngineStatus::AwaitingConnectionChoice(_) => {
                    self.players[self.current].source_mut().park_until_input();
                }
                _ => {}
            }
        }
    }

    // === Round lifecycle ===

    fn start_round(&mut self) {
        self.round_number += 1;
        log::info!("=== round {} ===", self.round_number);

        self.stock = full_set(self.config.highest_face_value);
        self.board = Board::new();
        for player in &mut self.players {
            player.reset_for_round();
        }

        self.rng.shuffle(&mut self.stock);
        let draw_count = self.config.draw_count(self.players.len());
        for player in &mut self.players {
            for _ in 0..draw_count {
                if let Some(tile) = self.stock.pop() {
                    player.give_tile(tile);
                }
            }
        }

        self.make_opening_move();
        self.current = 0;
        self.phase = Phase::Turn;
        self.signal.raise();
    }

    /// Opening-move arbitration, deterministic priority order:
    /// lowest non-zero double, then 0-0, then the highest-ranked tile
    /// across all hands. First match wins, scanning players in current
    /// order; the opener rotates to the back.
    fn make_opening_move(&mut self) {
        for double in (1..=self.config.highest_face_value).map(|v| Tile::new(v, v)) {
            if let Some(idx) = self.players.iter().position(|p| p.has_tile(double)) {
                self.open_with(idx, double);
                return;
            }
        }

        let zero_double = Tile::new(0, 0);
        if let Some(idx) = self.players.iter().position(|p| p.has_tile(zero_double)) {
            self.open_with(idx, zero_double);
            return;
        }

        // No doubles anywhere: the single highest-ranked tile opens.
        // Strict comparison keeps the earliest holder on rank ties.
        let mut best_idx = 0;
        let mut best: Option<Tile> = None;
        for (idx, player) in self.players.iter().enumerate() {
            if let Some(tile) = player.highest_rank_tile() {
                if best.map_or(true, |b| tile.rank() > b.rank()) {
                    best = Some(tile);
                    best_idx = idx;
                }
            }
        }
        if let Some(tile) = best {
            self.open_with(best_idx, tile);
        }
    }

    fn open_with(&mut self, idx: usize, tile: Tile) {
        let opener = &mut self.players[idx];
        log::info!("{} opens with {}", opener.name(), tile);

        let tile = opener
            .take_tile(tile)
            .expect("arbitration selected a tile from this hand");
        self.board.add_starting_tile(tile);

        // The opener already moved this round.
        let opener = self.players.remove(idx);
        self.players.push(opener);
    }

    // === Turn processing ===

    fn legal_tiles_at(&self, idx: usize) -> Vec<Tile> {
        let open = self.board.open_values();
        self.players[idx]
            .hand()
            .iter()
            .copied()
            .filter(|t| open.contains(&t.x()) || open.contains(&t.y()))
            .collect()
    }

    fn process_turn(&mut self) -> Result<EngineStatus> {
        let idx = self.current;
        let mut legal = self.legal_tiles_at(idx);

        // Draw-on-stuck: pull from the stock until something is playable
        // or the stock runs dry.
        while legal.is_empty() {
            let Some(tile) = self.stock.pop() else { break };
            log::info!(
                "{} has no playable tile, draws {} from stock",
                self.players[idx].name(),
                tile
            );
            self.players[idx].give_tile(tile);
            self.signal.raise();
            legal = self.legal_tiles_at(idx);
        }

        if legal.is_empty() {
            let player = &mut self.players[idx];
            log::info!("{} cannot move and the stock is empty, skipping", player.name());
            player.set_move_available(false);
            self.signal.raise();

            if self.players.iter().all(|p| !p.is_move_available()) {
                return Ok(self.finish_round(RoundOutcome::Blocked));
            }
            self.advance();
            return Ok(EngineStatus::TurnSkipped);
        }

        self.players[idx].set_move_available(true);
        self.ask_for_tile(legal)
    }

    /// Ask the current player's source for a tile, validating the answer.
    fn ask_for_tile(&mut self, legal: Vec<Tile>) -> Result<EngineStatus> {
        let idx = self.current;
        let pid = self.players[idx].id();
        let hand: Vec<Tile> = self.players[idx].hand().to_vec();
        log::debug!("{}: hand {:?}, legal {:?}", self.players[idx].name(), hand, legal);

        let decision = self.players[idx]
            .source_mut()
            .choose_tile(&hand, &legal, &mut self.rng);

        match decision {
            Decision::Pending => {
                self.phase = Phase::AwaitingMove { legal };
                Ok(EngineStatus::AwaitingMove(pid))
            }
            Decision::Chosen(tile) => {
                if !self.players[idx].has_tile(tile) || !legal.contains(&tile) {
                    if self.players[idx].is_interactive() {
                        log::warn!("{} chose illegal tile {}, re-requesting", pid, tile);
                        self.phase = Phase::AwaitingMove { legal };
                        return Ok(EngineStatus::AwaitingMove(pid));
                    }
                    return Err(EngineError::RogueAutomatedTile { player: pid, tile });
                }
                self.stage_connection(tile)
            }
        }
    }

    /// Resolve which face connects, suspending when the choice is ambiguous
    /// and belongs to an interactive player.
    fn stage_connection(&mut self, tile: Tile) -> Result<EngineStatus> {
        let choices = self.board.connection_choices(tile);
        debug_assert!(!choices.is_empty(), "tile was validated as legal");

        if choices.len() < 2 {
            return self.apply_play(tile, choices[0]);
        }
        self.ask_for_connection(tile, choices)
    }

    fn ask_for_connection(
        &mut self,
        tile: Tile,
        choices: SmallVec<[u8; 2]>,
    ) -> Result<EngineStatus> {
        let idx = self.current;
        let pid = self.players[idx].id();

        let decision = self.players[idx]
            .source_mut()
            .choose_connection(tile, &choices, &mut self.rng);

        match decision {
            Decision::Pending => {
                self.phase = Phase::AwaitingConnection { tile, choices };
                Ok(EngineStatus::AwaitingConnectionChoice(pid))
            }
            Decision::Chosen(value) => {
                if !choices.contains(&value) {
                    if self.players[idx].is_interactive() {
                        log::warn!(
                            "{} named connecting value {} for {}, not an open face; re-requesting",
                            pid,
                            value,
                            tile
                        );
                        self.phase = Phase::AwaitingConnection { tile, choices };
                        return Ok(EngineStatus::AwaitingConnectionChoice(pid));
                    }
                    return Err(EngineError::RogueAutomatedConnection {
                        player: pid,
                        tile,
                        value,
                    });
                }
                self.apply_play(tile, value)
            }
        }
    }

    /// Move the tile from hand to board. The whole batch (hand removal,
    /// path update, turn advance) lands before the signal is raised.
    fn apply_play(&mut self, tile: Tile, connecting_value: u8) -> Result<EngineStatus> {
        let idx = self.current;
        let tile = self.players[idx]
            .take_tile(tile)
            .expect("chosen tile was validated against this hand");

        let path = match self.board.process_new_tile(tile, connecting_value) {
            Ok(path) => path,
            Err(e) => {
                // Put the tile back so no tile is ever lost.
                self.players[idx].give_tile(tile);
                return Err(e);
            }
        };
        log::info!(
            "{} plays {} onto path {} (connects via {})",
            self.players[idx].name(),
            tile,
            path,
            connecting_value
        );

        if self.players[idx].is_hand_empty() {
            let finisher = self.players[idx].id();
            log::info!("{} has no more tiles!", self.players[idx].name());
            return Ok(self.finish_round(RoundOutcome::Finished(finisher)));
        }

        self.advance();
        self.phase = Phase::Turn;
        self.signal.raise();
        Ok(EngineStatus::TurnPlayed)
    }

    fn advance(&mut self) {
        self.current = (self.current + 1) % self.players.len();
        self.phase = Phase::Turn;
    }

    // === Scoring and elimination ===

    fn finish_round(&mut self, outcome: RoundOutcome) -> EngineStatus {
        match outcome {
            RoundOutcome::Blocked => log::info!("round {} is a tie, blocked game", self.round_number),
            RoundOutcome::Finished(id) => {
                log::info!("round {} finished by {}", self.round_number, id)
            }
        }

        for player in &mut self.players {
            let mut delta = player.total_weight();
            // A hand holding only 0-0 weighs nothing but still costs.
            if delta == 0 && !player.is_hand_empty() {
                delta = self.config.zero_zero_penalty;
            }
            player.add_score(delta);
            log::info!("{}: {} points (+{})", player.name(), player.score(), delta);
        }

        let goats: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.is_goat(self.config.elimination_threshold))
            .map(|p| p.id())
            .collect();

        self.signal.raise();
        if goats.is_empty() {
            self.phase = Phase::RoundScored;
            EngineStatus::RoundOver(outcome)
        } else {
            for id in &goats {
                log::info!("{} reached the threshold and is the goat", id);
            }
            self.phase = Phase::MatchOver {
                goats: goats.clone(),
            };
            EngineStatus::MatchOver(goats)
        }
    }
}
