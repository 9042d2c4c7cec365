//! Engine/presentation handshake tests.
//!
//! A real embedder runs the engine loop on its own thread and a frame loop
//! on another, sharing the game behind a lock, the change signal, and the
//! interactive players' mailboxes. These tests wire that arrangement up for
//! real and let a scripted "presentation layer" play a human seat to the
//! end of the match.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rust_dominoes::{
    AwaitingInput, EngineStatus, Game, GameConfig, PlayerSetup, StateSignal,
};

#[test]
fn test_threaded_match_with_scripted_human() {
    let (human, mailbox) = PlayerSetup::interactive("Human");
    let setups = vec![human, PlayerSetup::bot("Bot A", 1), PlayerSetup::bot("Bot B", 0)];
    let config = GameConfig::default().with_elimination_threshold(40);

    let game = Game::new(setups, config, 2024).unwrap();
    let signal: StateSignal = game.signal();
    let game = Arc::new(Mutex::new(game));
    let done = Arc::new(AtomicBool::new(false));

    // Engine thread: step until the match ends, yielding while suspended.
    let engine_game = Arc::clone(&game);
    let engine_done = Arc::clone(&done);
    let engine = thread::spawn(move || {
        let goats = loop {
            let status = engine_game.lock().unwrap().step().unwrap();
            match status {
                EngineStatus::MatchOver(goats) => break goats,
                EngineStatus::AwaitingMove(_) | EngineStatus::AwaitingConnectionChoice(_) => {
                    thread::yield_now();
                    thread::sleep(Duration::from_millis(1));
                }
                _ => {}
            }
        };
        engine_done.store(true, Ordering::Release);
        goats
    });

    // Presentation thread: poll the signal, re-read the snapshot, and
    // answer whatever the engine is waiting on for the human seat.
    let ui_game = Arc::clone(&game);
    let ui_done = Arc::clone(&done);
    let presenter = thread::spawn(move || {
        let mut frames = 0u32;
        while !ui_done.load(Ordering::Acquire) {
            frames += 1;
            let _ = signal.take();

            let game = ui_game.lock().unwrap();
            match game.awaiting() {
                Some(AwaitingInput::Move(player)) => {
                    // First legal tile, like a scripted click.
                    if let Some(&tile) = game.legal_tiles(player).first() {
                        mailbox.post_tile(tile);
                    }
                }
                Some(AwaitingInput::Connection { choices, .. }) => {
                    mailbox.post_connection(choices[0]);
                }
                None => {}
            }
            drop(game);
            thread::sleep(Duration::from_millis(1));
        }
        frames
    });

    let goats = engine.join().unwrap();
    let frames = presenter.join().unwrap();

    assert!(!goats.is_empty());
    assert!(frames > 0);

    let game = game.lock().unwrap();
    assert!(game.is_match_over());
    let threshold = game.config().elimination_threshold;
    for p in game.players() {
        assert_eq!(goats.contains(&p.id()), p.score() >= threshold);
    }
}

#[test]
fn test_signal_tracks_every_observable_change() {
    let mut game = Game::new(
        vec![PlayerSetup::bot("A", 1), PlayerSetup::bot("B", 1)],
        GameConfig::default(),
        7,
    )
    .unwrap();
    let signal = game.signal();

    let mut last = game.snapshot();
    loop {
        let status = game.step().unwrap();
        let now = game.snapshot();

        // Whenever the visible state changed, the signal must be up.
        if now != last {
            assert!(signal.take(), "state changed without the signal raised");
        }
        last = now;

        if matches!(status, EngineStatus::MatchOver(_)) {
            break;
        }
    }
}

#[test]
fn test_independent_matches_share_nothing() {
    // Two matches with the same seed run in parallel and agree exactly.
    let play = || {
        thread::spawn(|| {
            let mut game = Game::new(
                vec![PlayerSetup::bot("A", 0), PlayerSetup::bot("B", 1)],
                GameConfig::default(),
                314,
            )
            .unwrap();
            let goats = game.run().unwrap();
            (goats, game.snapshot())
        })
    };

    let first = play().join().unwrap();
    let second = play().join().unwrap();
    assert_eq!(first, second);
}
