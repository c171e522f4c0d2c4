//! Integration tests for headless match execution
//!
//! These tests verify that:
//! - Headless matches run to completion
//! - Match results are accessible programmatically
//! - Seeded RNG produces deterministic results

use stickrivals::combat::fighter::FighterStats;
use stickrivals::headless::{run_headless_match, run_simulation, HeadlessMatchConfig, MatchOutcome};

/// Helper to create a quick, decisive match config: a strong player against
/// a weak enemy, randomness off, so the outcome is structurally certain.
fn create_config(seed: Option<u64>) -> HeadlessMatchConfig {
    HeadlessMatchConfig {
        player: FighterStats {
            base_attack: 25,
            crit_chance: 0.0,
            ..FighterStats::default()
        },
        enemy: FighterStats {
            max_hp: 40,
            base_attack: 5,
            crit_chance: 0.0,
            ..FighterStats::default()
        },
        random_seed: seed,
        max_duration_secs: 60.0, // Short duration for tests
        ..HeadlessMatchConfig::default()
    }
}

#[test]
fn test_headless_match_runs_to_completion() {
    let result = run_headless_match(create_config(Some(12345))).expect("match runs");

    assert_eq!(result.outcome, MatchOutcome::PlayerWin);
    assert!(result.ticks > 0);
    assert!(result.match_time > 0.0);
    assert_eq!(result.random_seed, Some(12345));

    assert!(result.player.survived);
    assert!(!result.enemy.survived);
    assert_eq!(result.enemy.final_hp, 0);
    assert!(result.player.damage_dealt >= result.enemy.max_hp);
}

#[test]
fn test_seeded_headless_matches_are_deterministic() {
    let mut config = create_config(Some(42));
    config.player.crit_chance = 0.3;
    config.enemy.crit_chance = 0.3;

    let a = run_headless_match(config.clone()).expect("match runs");
    let b = run_headless_match(config).expect("match runs");

    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.ticks, b.ticks);
    assert_eq!(a.player.final_hp, b.player.final_hp);
    assert_eq!(a.enemy.final_hp, b.enemy.final_hp);
}

#[test]
fn test_stalemate_times_out_as_draw() {
    let turtle = FighterStats {
        armor: 9,
        regen: 3,
        crit_chance: 0.0,
        ..FighterStats::default()
    };
    let config = HeadlessMatchConfig {
        player: turtle,
        enemy: turtle,
        random_seed: Some(7),
        max_duration_secs: 5.0,
        ..HeadlessMatchConfig::default()
    };

    let result = run_headless_match(config).expect("match runs");
    assert_eq!(result.outcome, MatchOutcome::Draw);
    assert!(result.match_time >= 5.0);
    assert!(result.player.survived && result.enemy.survived);
}

#[test]
fn test_simulation_matches_itself_under_seed() {
    let config = HeadlessMatchConfig {
        random_upgrades: 2,
        ..create_config(Some(99))
    };

    let a = run_simulation(&config, 400).expect("simulation runs");
    let b = run_simulation(&config, 400).expect("simulation runs");

    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.ticks, b.ticks);
    assert_eq!(a.player.final_hp, b.player.final_hp);
    assert_eq!(a.enemy.final_hp, b.enemy.final_hp);
    assert_eq!(a.player.upgrades, b.player.upgrades);
    assert_eq!(a.enemy.upgrades, b.enemy.upgrades);
}

#[test]
fn test_random_upgrades_are_drafted_per_side() {
    let config = HeadlessMatchConfig {
        random_upgrades: 2,
        ..create_config(Some(5))
    };

    let result = run_simulation(&config, 400).expect("simulation runs");
    assert_eq!(result.player.upgrades.len(), 2);
    assert_eq!(result.enemy.upgrades.len(), 2);
}

#[test]
fn test_explicit_upgrades_are_applied() {
    let config = HeadlessMatchConfig {
        player_upgrades: vec!["bulk_up".to_string()],
        ..create_config(Some(5))
    };

    let result = run_simulation(&config, 400).expect("simulation runs");
    assert_eq!(result.player.upgrades, vec!["bulk_up".to_string()]);
    // bulk_up grants +20 max hp on top of the configured 100
    assert_eq!(result.player.max_hp, 120);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let mut config = create_config(None);
    config.player.max_hp = 0;
    assert!(run_simulation(&config, 10).is_err());

    let mut config = create_config(None);
    config.enemy.attack_speed = 0.0;
    assert!(run_headless_match(config).is_err());

    let mut config = create_config(None);
    config.player_upgrades = vec!["no_such_card".to_string()];
    assert!(run_simulation(&config, 10).is_err());

    let mut config = create_config(None);
    config.frame_dt = 0.0;
    assert!(run_headless_match(config).is_err());
}

#[test]
fn test_simulation_without_enough_ticks_is_a_draw() {
    let result = run_simulation(&create_config(Some(3)), 2).expect("simulation runs");
    assert_eq!(result.outcome, MatchOutcome::Draw);
    assert_eq!(result.ticks, 2);
}

#[test]
fn test_match_log_is_saved_when_requested() {
    let path = std::env::temp_dir().join("stickrivals_test_match_log.json");
    let config = HeadlessMatchConfig {
        output_path: Some(path.to_string_lossy().into_owned()),
        ..create_config(Some(8))
    };

    let _result = run_headless_match(config).expect("match runs");

    let contents = std::fs::read_to_string(&path).expect("log file written");
    let report: serde_json::Value = serde_json::from_str(&contents).expect("log is valid JSON");
    assert!(report.get("metadata").is_some());
    assert!(report
        .get("entries")
        .and_then(|entries| entries.as_array())
        .map(|entries| !entries.is_empty())
        .unwrap_or(false));

    let _ = std::fs::remove_file(&path);
}
