//! Determinism tests
//!
//! The tick clock must produce the same sequence no matter how real time is
//! chunked across `update` calls, and seeded batch simulation must be fully
//! reproducible. Outcome flags rolled at attack start must survive the
//! animation delay unchanged.

use stickrivals::combat::anim::{AnimationController, NullAnimation};
use stickrivals::combat::effects::HitEffectKind;
use stickrivals::rig::{load_animation_library, StickRig};
use stickrivals::{Combat, Fighter, FighterStats, GameRng, Side};

fn volatile_stats() -> FighterStats {
    // Plenty of RNG consumption per tick: crits and stun rolls
    FighterStats {
        max_hp: 400,
        crit_chance: 0.3,
        stun_chance: 0.2,
        bleed: 0.01,
        regen: 1,
        ..FighterStats::default()
    }
}

/// Run a duel by chunked real-time updates with no animation metadata.
fn run_chunked(seed: u64, chunk: f32, total_time: f32) -> (u64, i32, i32, usize) {
    let mut combat = Combat::new(GameRng::from_seed(seed));
    let mut player = Fighter::new(Side::Player, volatile_stats());
    let mut enemy = Fighter::new(Side::Enemy, volatile_stats());
    combat.start(&mut player, &mut enemy);

    let mut player_anim = NullAnimation;
    let mut enemy_anim = NullAnimation;
    let steps = (total_time / chunk).round() as usize;
    for _ in 0..steps {
        combat.update(chunk, &mut player, &mut enemy, &mut player_anim, &mut enemy_anim);
    }
    (combat.tick_count, player.hp, enemy.hp, combat.log.entries.len())
}

#[test]
fn test_tick_sequence_is_independent_of_dt_chunking() {
    let coarse = run_chunked(42, 0.5, 20.0);
    let fine = run_chunked(42, 0.1, 20.0);
    assert_eq!(coarse, fine);
}

#[test]
fn test_update_matches_batch_simulation() {
    let chunked = run_chunked(42, 0.5, 20.0);

    let mut combat = Combat::new(GameRng::from_seed(42));
    let mut player = Fighter::new(Side::Player, volatile_stats());
    let mut enemy = Fighter::new(Side::Enemy, volatile_stats());
    combat.start(&mut player, &mut enemy);
    combat.simulate_ticks(40, &mut player, &mut enemy);

    assert_eq!(combat.tick_count, chunked.0);
    assert_eq!(player.hp, chunked.1);
    assert_eq!(enemy.hp, chunked.2);
}

#[test]
fn test_seeded_simulation_is_reproducible() {
    let mut results = Vec::new();
    for _ in 0..2 {
        let mut combat = Combat::new(GameRng::from_seed(777));
        let mut player = Fighter::new(Side::Player, volatile_stats());
        let mut enemy = Fighter::new(Side::Enemy, volatile_stats());
        combat.start(&mut player, &mut enemy);
        let outcome = combat.simulate_ticks(200, &mut player, &mut enemy);
        results.push((outcome, combat.tick_count, player.hp, enemy.hp));
    }
    assert_eq!(results[0], results[1]);
}

#[test]
fn test_pause_freezes_the_clock_without_skew() {
    let mut combat = Combat::new(GameRng::from_seed(5));
    let mut player = Fighter::new(Side::Player, volatile_stats());
    let mut enemy = Fighter::new(Side::Enemy, volatile_stats());
    combat.start(&mut player, &mut enemy);

    let mut player_anim = NullAnimation;
    let mut enemy_anim = NullAnimation;

    // Accumulate 0.4s, pause, burn a lot of wall time, resume
    combat.update(0.4, &mut player, &mut enemy, &mut player_anim, &mut enemy_anim);
    assert_eq!(combat.tick_count, 0);
    combat.pause();
    for _ in 0..100 {
        combat.update(0.5, &mut player, &mut enemy, &mut player_anim, &mut enemy_anim);
    }
    assert_eq!(combat.tick_count, 0);
    combat.resume();

    // The remainder carried through the pause: 0.1s more completes a tick
    combat.update(0.1, &mut player, &mut enemy, &mut player_anim, &mut enemy_anim);
    assert_eq!(combat.tick_count, 1);
}

#[test]
fn test_preroll_survives_animation_delay() {
    let library = load_animation_library().expect("shipped animations.ron loads");
    let mut player_rig = StickRig::new(library.clone(), (-2.0, 0.0), 1.0);
    let mut enemy_rig = StickRig::new(library, (2.0, 0.0), -1.0);

    let mut combat = Combat::new(GameRng::from_seed(9));
    let mut player = Fighter::new(
        Side::Player,
        FighterStats {
            crit_chance: 1.0,
            ..FighterStats::default()
        },
    );
    let mut enemy = Fighter::new(
        Side::Enemy,
        FighterStats {
            attack_speed: 0.0,
            crit_chance: 0.0,
            ..FighterStats::default()
        },
    );
    combat.start(&mut player, &mut enemy);

    // Two ticks in: the swing starts and its damage is deferred to the
    // contact frame, (0.5 * 0.45) / 1.0 = 0.225s away
    combat.update(0.5, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);
    combat.update(0.5, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);
    assert_eq!(enemy.hp, 100);
    assert_eq!(combat.pending_damage.len(), 1);

    // The delay elapses across several small frames; the crit rolled at
    // attack start is the one applied at contact
    for _ in 0..2 {
        player_rig.update(0.1);
        enemy_rig.update(0.1);
        combat.update(0.1, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);
        assert_eq!(enemy.hp, 100, "damage landed before the contact frame");
    }
    player_rig.update(0.1);
    enemy_rig.update(0.1);
    combat.update(0.1, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);

    assert_eq!(enemy.hp, 80, "pre-rolled crit applied at contact");
    assert!(combat.pending_damage.is_empty());
    assert!(combat
        .hit_effects
        .iter()
        .any(|effect| effect.kind == HitEffectKind::CritStrike));
}

#[test]
fn test_busy_animation_falls_back_to_immediate_damage() {
    let library = load_animation_library().expect("shipped animations.ron loads");
    let mut player_rig = StickRig::new(library.clone(), (-2.0, 0.0), 1.0);
    let mut enemy_rig = StickRig::new(library, (2.0, 0.0), -1.0);

    let mut combat = Combat::new(GameRng::from_seed(9));
    let mut player = Fighter::new(
        Side::Player,
        FighterStats {
            attack_speed: 4.0,
            crit_chance: 0.0,
            ..FighterStats::default()
        },
    );
    let mut enemy = Fighter::new(
        Side::Enemy,
        FighterStats {
            attack_speed: 0.0,
            crit_chance: 0.0,
            ..FighterStats::default()
        },
    );
    combat.start(&mut player, &mut enemy);

    // attack_speed 4.0 fires two swings in the first tick. The first one
    // starts the attack animation and defers; the second finds the rig busy
    // and must land immediately so the extra swing is not swallowed.
    combat.update(0.5, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);
    assert_eq!(enemy.hp, 90);
    assert_eq!(combat.pending_damage.len(), 1);
}

#[test]
fn test_dead_defender_consumes_pending_damage_harmlessly() {
    let library = load_animation_library().expect("shipped animations.ron loads");
    let mut player_rig = StickRig::new(library.clone(), (-2.0, 0.0), 1.0);
    let mut enemy_rig = StickRig::new(library, (2.0, 0.0), -1.0);

    let mut combat = Combat::new(GameRng::from_seed(9));
    let mut player = Fighter::new(
        Side::Player,
        FighterStats {
            crit_chance: 0.0,
            ..FighterStats::default()
        },
    );
    let mut enemy = Fighter::new(
        Side::Enemy,
        FighterStats {
            attack_speed: 0.0,
            crit_chance: 0.0,
            ..FighterStats::default()
        },
    );
    combat.start(&mut player, &mut enemy);

    combat.update(0.5, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);
    combat.update(0.5, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);
    assert_eq!(combat.pending_damage.len(), 1);

    // The defender dies to something else before the contact frame
    enemy.take_damage(enemy.hp);
    let deaths_before = combat.killing_blow;
    assert!(deaths_before.is_none());

    player_rig.update(0.3);
    enemy_rig.update(0.3);
    combat.update(0.3, &mut player, &mut enemy, &mut player_rig, &mut enemy_rig);

    // Entry consumed, no damage applied, no phantom killing blow
    assert!(combat.pending_damage.is_empty());
    assert_eq!(enemy.hp, 0);
    assert!(combat.killing_blow.is_none());
}
