//! Move decision sources.
//!
//! The round loop never type-checks who is deciding: it asks the player's
//! [`MoveSource`] and acts on the [`Decision`]. Automated sources answer
//! immediately; interactive sources answer [`Decision::Pending`] until the
//! presentation layer posts through the player's [`MoveMailbox`], leaving
//! the turn suspended with no other state mutating.
//!
//! The automated variants here are an open set, not an enumeration: level 0
//! ([`RandomMoves`]) and level 1 ([`GreedyMoves`]) ship with the engine, and
//! harder opponents are additional `MoveSource` implementations.

use crate::core::{GameRng, Tile};
use crate::sync::{ChosenInput, MoveMailbox};

/// Outcome of asking a source for a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    /// The source decided.
    Chosen(T),
    /// Input has not arrived yet; the turn stays suspended.
    Pending,
}

/// A player's move-decision capability.
///
/// ## Contract
///
/// `choose_tile` must produce a tile from `legal` (which is never empty and
/// preserves hand order). `choose_connection` must produce one of `choices`.
/// An automated source violating either is a programming error and is fatal
/// to the match; interactive sources are re-asked, since their input comes
/// from outside the program.
pub trait MoveSource {
    /// Pick one tile from the legal set.
    fn choose_tile(&mut self, hand: &[Tile], legal: &[Tile], rng: &mut GameRng) -> Decision<Tile>;

    /// Name the connecting face for an ambiguous placement of `tile`.
    ///
    /// `choices` holds the distinct faces currently playable (always two
    /// when this is called).
    fn choose_connection(
        &mut self,
        tile: Tile,
        choices: &[u8],
        rng: &mut GameRng,
    ) -> Decision<u8>;

    /// Does this source suspend the turn waiting for external input?
    fn is_interactive(&self) -> bool {
        false
    }

    /// Block the calling thread until input may be available.
    ///
    /// No-op for automated sources. `Game::run` calls this instead of
    /// spinning while a turn is suspended.
    fn park_until_input(&self) {}
}

/// Level 0: picks uniformly at random among legal tiles.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMoves;

impl MoveSource for RandomMoves {
    fn choose_tile(&mut self, _hand: &[Tile], legal: &[Tile], rng: &mut GameRng) -> Decision<Tile> {
        let tile = rng.choose(legal).expect("legal set is never empty");
        Decision::Chosen(*tile)
    }

    fn choose_connection(&mut self, _tile: Tile, choices: &[u8], rng: &mut GameRng) -> Decision<u8> {
        let face = rng.choose(choices).expect("choices are never empty");
        Decision::Chosen(*face)
    }
}

/// Level 1: plays the heaviest legal tile, first in hand order on ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMoves;

impl MoveSource for GreedyMoves {
    fn choose_tile(&mut self, _hand: &[Tile], legal: &[Tile], _rng: &mut GameRng) -> Decision<Tile> {
        debug_assert!(!legal.is_empty());

        // Strict comparison keeps the first tile in hand order on ties.
        let mut best = legal[0];
        for &tile in &legal[1..] {
            if tile.weight() > best.weight() {
                best = tile;
            }
        }
        Decision::Chosen(best)
    }

    fn choose_connection(&mut self, _tile: Tile, choices: &[u8], rng: &mut GameRng) -> Decision<u8> {
        debug_assert!(!choices.is_empty());
        Decision::Chosen(choices[rng.gen_range_usize(0..choices.len())])
    }
}

/// Interactive source fed by a [`MoveMailbox`].
///
/// Polls the mailbox each time the engine asks; a posted value of the wrong
/// kind (a connection while a tile is expected, or vice versa) is dropped
/// with a warning and the turn stays suspended.
#[derive(Clone, Debug)]
pub struct InteractiveMoves {
    mailbox: MoveMailbox,
}

impl InteractiveMoves {
    #[must_use]
    pub fn new(mailbox: MoveMailbox) -> Self {
        Self { mailbox }
    }
}

impl MoveSource for InteractiveMoves {
    fn choose_tile(&mut self, _hand: &[Tile], _legal: &[Tile], _rng: &mut GameRng) -> Decision<Tile> {
        match self.mailbox.take() {
            Some(ChosenInput::Tile(tile)) => Decision::Chosen(tile),
            Some(ChosenInput::Connection(value)) => {
                log::warn!("expected a tile choice, got connection {value}; dropped");
                Decision::Pending
            }
            None => Decision::Pending,
        }
    }

    fn choose_connection(&mut self, tile: Tile, _choices: &[u8], _rng: &mut GameRng) -> Decision<u8> {
        match self.mailbox.take() {
            Some(ChosenInput::Connection(value)) => Decision::Chosen(value),
            Some(ChosenInput::Tile(posted)) => {
                log::warn!("expected a connecting face for {tile}, got tile {posted}; dropped");
                Decision::Pending
            }
            None => Decision::Pending,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn park_until_input(&self) {
        self.mailbox.wait();
    }
}

/// An automated source for the given difficulty level.
///
/// Levels beyond the shipped ones clamp to the strongest available policy;
/// new levels are added by implementing [`MoveSource`] directly.
#[must_use]
pub fn automated(level: u8) -> Box<dyn MoveSource + Send> {
    match level {
        0 => Box::new(RandomMoves),
        _ => Box::new(GreedyMoves),
    }
}

/// One participant to register with a `Game`: a name plus a move source.
pub struct PlayerSetup {
    pub name: String,
    pub source: Box<dyn MoveSource + Send>,
}

impl PlayerSetup {
    /// An automated participant at the given difficulty level.
    pub fn bot(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            source: automated(level),
        }
    }

    /// An interactive participant.
    ///
    /// Returns the setup plus the mailbox the presentation layer posts
    /// decisions through.
    pub fn interactive(name: impl Into<String>) -> (Self, MoveMailbox) {
        let mailbox = MoveMailbox::new();
        let setup = Self {
            name: name.into(),
            source: Box::new(InteractiveMoves::new(mailbox.clone())),
        };
        (setup, mailbox)
    }

    /// A participant with a custom source.
    pub fn with_source(name: impl Into<String>, source: Box<dyn MoveSource + Send>) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_moves_stay_legal() {
        let mut source = RandomMoves;
        let mut rng = GameRng::new(42);
        let legal = vec![Tile::new(1, 2), Tile::new(3, 4), Tile::new(5, 6)];

        for _ in 0..50 {
            match source.choose_tile(&legal, &legal, &mut rng) {
                Decision::Chosen(tile) => assert!(legal.contains(&tile)),
                Decision::Pending => panic!("automated source must not suspend"),
            }
        }
    }

    #[test]
    fn test_random_connection_stays_in_choices_and_replays() {
        let legal = vec![Tile::new(3, 5)];
        let picks = |seed| {
            let mut source = RandomMoves;
            let mut rng = GameRng::new(seed);
            (0..20)
                .map(|_| source.choose_connection(Tile::new(3, 5), &[3, 5], &mut rng))
                .collect::<Vec<_>>()
        };

        for pick in picks(9) {
            assert!(matches!(pick, Decision::Chosen(3) | Decision::Chosen(5)));
        }
        assert_eq!(picks(9), picks(9));

        let mut source = RandomMoves;
        let mut rng = GameRng::new(9);
        assert_eq!(
            source.choose_tile(&legal, &legal, &mut rng),
            Decision::Chosen(Tile::new(3, 5))
        );
    }

    #[test]
    fn test_greedy_picks_heaviest() {
        let mut source = GreedyMoves;
        let mut rng = GameRng::new(42);
        let legal = vec![Tile::new(1, 2), Tile::new(5, 6), Tile::new(3, 4)];

        assert_eq!(
            source.choose_tile(&legal, &legal, &mut rng),
            Decision::Chosen(Tile::new(5, 6))
        );
    }

    #[test]
    fn test_greedy_tie_break_first_in_hand_order() {
        let mut source = GreedyMoves;
        let mut rng = GameRng::new(42);
        // 2-5 and 3-4 both weigh 7; the earlier one wins.
        let legal = vec![Tile::new(2, 5), Tile::new(3, 4)];

        assert_eq!(
            source.choose_tile(&legal, &legal, &mut rng),
            Decision::Chosen(Tile::new(2, 5))
        );
    }

    #[test]
    fn test_interactive_pends_until_posted() {
        let mailbox = MoveMailbox::new();
        let mut source = InteractiveMoves::new(mailbox.clone());
        let mut rng = GameRng::new(42);
        let legal = vec![Tile::new(1, 2)];

        assert_eq!(
            source.choose_tile(&legal, &legal, &mut rng),
            Decision::Pending
        );

        mailbox.post_tile(Tile::new(1, 2));
        assert_eq!(
            source.choose_tile(&legal, &legal, &mut rng),
            Decision::Chosen(Tile::new(1, 2))
        );
    }

    #[test]
    fn test_interactive_drops_wrong_kind() {
        let mailbox = MoveMailbox::new();
        let mut source = InteractiveMoves::new(mailbox.clone());
        let mut rng = GameRng::new(42);

        mailbox.post_tile(Tile::new(1, 2));
        assert_eq!(
            source.choose_connection(Tile::new(1, 2), &[1, 2], &mut rng),
            Decision::Pending
        );
        // The wrong-kind post was consumed and dropped.
        assert_eq!(
            source.choose_connection(Tile::new(1, 2), &[1, 2], &mut rng),
            Decision::Pending
        );

        mailbox.post_connection(2);
        assert_eq!(
            source.choose_connection(Tile::new(1, 2), &[1, 2], &mut rng),
            Decision::Chosen(2)
        );
    }

    #[test]
    fn test_automated_levels() {
        let mut rng = GameRng::new(42);
        let legal = vec![Tile::new(0, 1), Tile::new(6, 6)];

        // Unknown levels clamp to the strongest shipped policy.
        let mut source = automated(7);
        assert_eq!(
            source.choose_tile(&legal, &legal, &mut rng),
            Decision::Chosen(Tile::new(6, 6))
        );
        assert!(!source.is_interactive());
    }
}
