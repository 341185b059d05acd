// Round-level scenarios for the catch-Cupid state machine.
// Native-only: these drive `Game` directly and never touch browser APIs.

use cupid_catch::{Game, GameConfig, Phase};

fn game() -> Game {
    Game::seeded(GameConfig::default(), 2024)
}

/// Play one round from the title screen: catch each of the first `catches`
/// Cupids as soon as it appears, then let everything escape.
fn play_round(g: &mut Game, catches: u32) {
    g.reset();
    g.start();
    let mut caught = 0;
    while g.phase() == Phase::Playing {
        g.advance_by(1_000);
        if caught < catches {
            if let Some(id) = g.cupids().iter().rev().find(|c| !c.caught).map(|c| c.id) {
                g.catch(id);
                caught += 1;
            }
        }
    }
}

// ── lives & game over ─────────────────────────────────────────────────────────

#[test]
fn three_escapes_end_the_round() {
    let mut g = game();
    g.start();
    g.advance_to(2_999);
    assert_eq!(g.lives(), 3);
    g.advance_to(3_000);
    assert_eq!(g.lives(), 2);
    g.advance_to(4_000);
    assert_eq!(g.lives(), 1);
    assert_eq!(g.phase(), Phase::Playing);
    g.advance_to(5_000);
    assert_eq!(g.lives(), 0);
    assert_eq!(g.phase(), Phase::Over);
    assert_eq!(g.score(), 0);
    assert_eq!(g.high_score(), 0);
    assert!(!g.is_new_record());
}

#[test]
fn no_spawns_after_game_over() {
    let mut g = game();
    g.start();
    g.advance_to(5_000);
    assert_eq!(g.phase(), Phase::Over);
    g.advance_to(60_000);
    assert!(g.cupids().is_empty());
    assert_eq!(g.lives(), 0);
    assert_eq!(g.pending_timers(), 0);
}

// ── catching ──────────────────────────────────────────────────────────────────

#[test]
fn catch_scores_and_clears_after_burst() {
    let mut g = game();
    g.start();
    g.advance_to(1_000);
    let id = g.cupids()[0].id;
    g.catch(id);
    assert_eq!(g.score(), 10);
    assert_eq!(g.lives(), 3);
    assert!(g.cupid(id).is_some_and(|c| c.caught));

    g.advance_to(1_299);
    assert!(g.cupid(id).is_some());
    g.advance_to(1_300);
    assert!(g.cupid(id).is_none());
    assert_eq!(g.score(), 10);
    assert_eq!(g.lives(), 3);
}

#[test]
fn double_click_scores_once() {
    let mut g = game();
    g.start();
    g.advance_to(1_000);
    let id = g.cupids()[0].id;
    g.catch(id);
    g.catch(id);
    assert_eq!(g.score(), 10);
    g.advance_to(1_300);
    g.catch(id);
    assert_eq!(g.score(), 10);
}

#[test]
fn unknown_id_is_ignored() {
    let mut g = game();
    g.start();
    g.advance_to(1_000);
    g.catch(9_999);
    assert_eq!(g.score(), 0);
    assert!(g.cupids().iter().all(|c| !c.caught));
}

#[test]
fn catch_outside_round_is_ignored() {
    let mut g = game();
    g.catch(1);
    assert_eq!(g.score(), 0);
    assert_eq!(g.phase(), Phase::NotStarted);
}

#[test]
fn catch_just_before_expiry_saves_the_life() {
    let mut g = game();
    g.start();
    g.advance_to(2_999);
    let id = g.cupids()[0].id;
    g.catch(id);
    g.advance_to(3_000);
    assert_eq!(g.lives(), 3);
    assert!(g.cupid(id).is_some_and(|c| c.caught));
    g.advance_to(3_299);
    assert!(g.cupid(id).is_none());
    assert_eq!(g.lives(), 3);
}

#[test]
fn catch_after_expiry_is_too_late() {
    let mut g = game();
    g.start();
    g.advance_to(1_000);
    let id = g.cupids()[0].id;
    g.advance_to(3_000);
    g.catch(id);
    assert_eq!(g.score(), 0);
    assert_eq!(g.lives(), 2);
}

// ── transitions ───────────────────────────────────────────────────────────────

#[test]
fn reset_mid_round_cancels_everything() {
    let mut g = game();
    g.start();
    g.advance_to(2_500);
    assert_eq!(g.cupids().len(), 2);
    let id = g.cupids()[1].id;
    g.catch(id);

    g.reset();
    assert!(g.cupids().is_empty());
    assert_eq!(g.phase(), Phase::NotStarted);
    assert_eq!(g.score(), 0);
    assert_eq!(g.lives(), 3);

    g.advance_to(20_000);
    assert!(g.cupids().is_empty());
    assert_eq!(g.phase(), Phase::NotStarted);
    assert_eq!(g.score(), 0);
    assert_eq!(g.lives(), 3);
}

#[test]
fn reset_is_idempotent() {
    let mut g = game();
    g.reset();
    g.reset();
    assert_eq!(g.phase(), Phase::NotStarted);
    assert_eq!(g.pending_timers(), 0);
}

#[test]
fn game_over_needs_reset_before_start() {
    let mut g = game();
    play_round(&mut g, 0);
    assert_eq!(g.phase(), Phase::Over);
    g.start();
    assert_eq!(g.phase(), Phase::Over);
    g.reset();
    g.start();
    assert_eq!(g.phase(), Phase::Playing);
    assert_eq!(g.lives(), 3);
}

#[test]
fn cupid_ids_are_not_reused_across_rounds() {
    let mut g = game();
    g.start();
    g.advance_by(1_000);
    let first = g.cupids()[0].id;
    g.reset();
    g.start();
    g.advance_by(1_000);
    assert!(g.cupids()[0].id > first);
}

// ── high score ────────────────────────────────────────────────────────────────

#[test]
fn high_score_keeps_the_best_round() {
    let mut g = game();
    play_round(&mut g, 3);
    assert_eq!(g.score(), 30);
    assert_eq!(g.high_score(), 30);

    play_round(&mut g, 5);
    assert_eq!(g.score(), 50);
    assert_eq!(g.high_score(), 50);
    assert!(g.is_new_record());

    play_round(&mut g, 2);
    assert_eq!(g.score(), 20);
    assert_eq!(g.high_score(), 50);
    assert!(!g.is_new_record());
}

#[test]
fn tie_is_not_a_new_record() {
    let mut g = game();
    play_round(&mut g, 3);
    play_round(&mut g, 3);
    assert_eq!(g.high_score(), 30);
    assert!(!g.is_new_record());
}

#[test]
fn high_score_survives_reset() {
    let mut g = game();
    play_round(&mut g, 4);
    g.reset();
    assert_eq!(g.high_score(), 40);
    assert_eq!(g.score(), 0);
    assert!(!g.is_new_record());
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn custom_lives_and_reward() {
    let cfg = GameConfig { initial_lives: 1, catch_reward: 25, ..GameConfig::default() };
    let mut g = Game::seeded(cfg, 1);
    g.start();
    g.advance_to(1_000);
    g.catch(g.cupids()[0].id);
    assert_eq!(g.score(), 25);
    g.advance_to(4_000); // second cupid (t=2000) escapes at t=4000
    assert_eq!(g.phase(), Phase::Over);
    assert_eq!(g.high_score(), 25);
}

// ── clock limits ──────────────────────────────────────────────────────────────

#[test]
fn huge_delays_never_fire() {
    let cfg = GameConfig {
        expiry_ms: u64::MAX,
        catch_display_ms: u64::MAX,
        ..GameConfig::default()
    };
    let mut g = Game::seeded(cfg, 5);
    g.start();
    g.advance_to(1_000);
    assert_eq!(g.cupids().len(), 1);
    g.catch(g.cupids()[0].id);
    g.advance_to(5_000);
    assert_eq!(g.cupids().len(), 5);
    assert_eq!(g.lives(), 3);
    assert_eq!(g.score(), 10);
}

#[test]
fn start_at_end_of_clock_does_not_spawn() {
    let mut g = game();
    g.advance_to(u64::MAX - 10);
    g.start();
    assert_eq!(g.phase(), Phase::Playing);
    assert_eq!(g.pending_timers(), 0);
    g.advance_to(u64::MAX);
    assert!(g.cupids().is_empty());
    assert_eq!(g.lives(), 3);
}

#[test]
fn spawning_stops_at_end_of_clock() {
    let mut g = game();
    g.advance_to(u64::MAX - 1_500);
    g.start();
    g.advance_to(u64::MAX);
    // one spawn at MAX - 500; the next would land past the clock
    assert_eq!(g.cupids().len(), 1);
    assert_eq!(g.pending_timers(), 0);
}
