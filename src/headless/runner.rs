//! Headless match execution
//!
//! Runs duels without any graphical output, suitable for automated testing
//! and batch evaluation. Frames advance by a fixed configured delta, so a
//! seeded headless match is fully reproducible and runs as fast as the
//! scheduler allows.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::combat::anim::AnimationController;
use crate::combat::combat_core::{Combat, CombatResult};
use crate::combat::constants::TICK_INTERVAL;
use crate::combat::fighter::{Fighter, Side};
use crate::combat::log::{FighterMetadata, MatchMetadata};
use crate::combat::rng::GameRng;
use crate::combat::upgrades::{self, UpgradeDeck};
use crate::rig::{load_animation_library_or_empty, StickRig};

use super::config::HeadlessMatchConfig;

/// Final outcome of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    PlayerWin,
    EnemyWin,
    /// Neither fighter died within the time / tick budget
    Draw,
}

impl MatchOutcome {
    pub fn label(self) -> &'static str {
        match self {
            MatchOutcome::PlayerWin => "PlayerWin",
            MatchOutcome::EnemyWin => "EnemyWin",
            MatchOutcome::Draw => "Draw",
        }
    }
}

impl From<CombatResult> for MatchOutcome {
    fn from(result: CombatResult) -> Self {
        match result {
            CombatResult::Win => MatchOutcome::PlayerWin,
            CombatResult::Lose => MatchOutcome::EnemyWin,
        }
    }
}

/// Result of a completed headless match
///
/// This struct provides programmatic access to match results for testing
/// and analysis.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    /// Ticks the combat clock advanced
    pub ticks: u64,
    /// Match duration in simulated seconds
    pub match_time: f32,
    pub player: FighterResult,
    pub enemy: FighterResult,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

/// Statistics for a single fighter after the match
#[derive(Debug, Clone)]
pub struct FighterResult {
    pub max_hp: i32,
    /// Health remaining at match end (0 if dead)
    pub final_hp: i32,
    pub survived: bool,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    /// Ids of the upgrades applied before the fight
    pub upgrades: Vec<String>,
}

impl FighterResult {
    fn from_fighter(fighter: &Fighter, upgrades: &[String]) -> Self {
        Self {
            max_hp: fighter.max_hp,
            final_hp: fighter.hp,
            survived: fighter.alive,
            damage_dealt: fighter.damage_dealt,
            damage_taken: fighter.damage_taken,
            upgrades: upgrades.to_vec(),
        }
    }

    fn metadata(&self) -> FighterMetadata {
        FighterMetadata {
            max_hp: self.max_hp,
            final_hp: self.final_hp,
            survived: self.survived,
            damage_dealt: self.damage_dealt,
            damage_taken: self.damage_taken,
            upgrades: self.upgrades.clone(),
        }
    }
}

/// Resource to track headless match state
#[derive(Resource)]
struct HeadlessMatchState {
    /// Maximum match duration before declaring a draw
    max_duration: f32,
    /// Fixed per-frame delta
    frame_dt: f32,
    /// Elapsed simulated match time
    elapsed: f32,
    /// Combat result, once a fighter has died
    combat_result: Option<CombatResult>,
    /// Whether the match has completed
    complete: bool,
    /// Custom output path for match log
    output_path: Option<String>,
    /// Random seed for deterministic simulation (if provided)
    random_seed: Option<u64>,
}

/// Hands the finished [`MatchResult`] back out of the app, which consumes
/// itself when its runner finishes.
#[derive(Resource, Clone, Default)]
struct ResultSink(Arc<Mutex<Option<MatchResult>>>);

/// Resource holding the live combat session and both fighters' rigs.
#[derive(Resource)]
struct MatchSession {
    combat: Combat,
    player: Fighter,
    enemy: Fighter,
    player_rig: StickRig,
    enemy_rig: StickRig,
    player_upgrades: Vec<String>,
    enemy_upgrades: Vec<String>,
}

/// Build the combat session described by a (validated) config: seeded RNG,
/// run deck, both fighters with their upgrades applied.
pub(crate) fn build_session(
    config: &HeadlessMatchConfig,
) -> Result<(Combat, Fighter, Fighter, Vec<String>, Vec<String>), String> {
    let mut rng = GameRng::from_optional_seed(config.random_seed);
    let mut deck = UpgradeDeck::build(&mut rng);

    let mut player = Fighter::new(Side::Player, config.player);
    let mut enemy = Fighter::new(Side::Enemy, config.enemy);

    let player_upgrades = draft_upgrades(
        &mut deck,
        &mut rng,
        &mut player,
        &config.player_upgrades,
        config.random_upgrades,
    )?;
    let enemy_upgrades = draft_upgrades(
        &mut deck,
        &mut rng,
        &mut enemy,
        &config.enemy_upgrades,
        config.random_upgrades,
    )?;

    Ok((
        Combat::new(rng),
        player,
        enemy,
        player_upgrades,
        enemy_upgrades,
    ))
}

/// Apply explicit upgrade ids, then draft `random_n` more from the deck
/// (draw three, pick one, return the rest to the bottom).
fn draft_upgrades(
    deck: &mut UpgradeDeck,
    rng: &mut GameRng,
    fighter: &mut Fighter,
    explicit: &[String],
    random_n: u32,
) -> Result<Vec<String>, String> {
    let mut applied = Vec::new();

    for id in explicit {
        let card = upgrades::find_card(id).ok_or_else(|| format!("Unknown upgrade id: '{}'", id))?;
        deck.apply_upgrade(&card, fighter);
        applied.push(card.id.to_string());
    }

    for _ in 0..random_n {
        let hand = deck.draw_cards(3);
        if hand.is_empty() {
            break;
        }
        let index = rng.random_index(hand.len());
        if let Some(card) = deck.pick_card(hand, index) {
            deck.apply_upgrade(&card, fighter);
            applied.push(card.id.to_string());
        }
    }

    Ok(applied)
}

/// Plugin for headless match execution
struct HeadlessPlugin {
    config: HeadlessMatchConfig,
    sink: ResultSink,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(self.sink.clone())
            .insert_resource(HeadlessMatchState {
                max_duration: self.config.max_duration_secs,
                frame_dt: self.config.frame_dt,
                elapsed: 0.0,
                combat_result: None,
                complete: false,
                output_path: self.config.output_path.clone(),
                random_seed: self.config.random_seed,
            })
            .add_systems(Startup, headless_setup_match)
            .add_systems(Update, (drive_match, check_match_end).chain())
            .add_systems(PostUpdate, exit_on_complete);
    }
}

/// Setup system for the headless match: build fighters, apply upgrades,
/// stand up the rigs, and start the combat session.
fn headless_setup_match(mut commands: Commands, config: Res<HeadlessMatchConfig>) {
    // Config was validated before the app was built
    let (mut combat, mut player, mut enemy, player_upgrades, enemy_upgrades) =
        build_session(&config).expect("Invalid match configuration");

    let library = load_animation_library_or_empty();
    let player_rig = StickRig::new(library.clone(), (-2.0, 0.0), 1.0);
    let enemy_rig = StickRig::new(library, (2.0, 0.0), -1.0);

    combat.start(&mut player, &mut enemy);

    match combat.seed() {
        Some(seed) => info!("Using deterministic RNG with seed: {}", seed),
        None => info!("Using non-deterministic RNG (no seed provided)"),
    }
    info!(
        "Headless match setup complete: Player ({} hp, {} upgrades) vs Enemy ({} hp, {} upgrades)",
        player.max_hp,
        player_upgrades.len(),
        enemy.max_hp,
        enemy_upgrades.len()
    );

    commands.insert_resource(MatchSession {
        combat,
        player,
        enemy,
        player_rig,
        enemy_rig,
        player_upgrades,
        enemy_upgrades,
    });
}

/// Advance rigs and the combat session by one fixed-delta frame.
fn drive_match(mut session: ResMut<MatchSession>, mut state: ResMut<HeadlessMatchState>) {
    if state.complete || state.combat_result.is_some() {
        return;
    }

    let dt = state.frame_dt;
    state.elapsed += dt;

    let MatchSession {
        combat,
        player,
        enemy,
        player_rig,
        enemy_rig,
        ..
    } = &mut *session;

    player_rig.update(dt);
    enemy_rig.update(dt);

    if let Some(result) = combat.update(dt, player, enemy, player_rig, enemy_rig) {
        state.combat_result = Some(result);
    }
}

/// Check if the match has ended (a fighter died, or timeout) and build the
/// final result.
fn check_match_end(
    session: Res<MatchSession>,
    mut state: ResMut<HeadlessMatchState>,
    sink: Res<ResultSink>,
) {
    if state.complete {
        return;
    }

    let outcome = if let Some(result) = state.combat_result {
        Some(MatchOutcome::from(result))
    } else if state.elapsed >= state.max_duration {
        info!(
            "Match timed out after {:.1}s - declaring DRAW",
            state.elapsed
        );
        Some(MatchOutcome::Draw)
    } else {
        None
    };

    let Some(outcome) = outcome else {
        return;
    };

    let result = MatchResult {
        outcome,
        ticks: session.combat.tick_count,
        match_time: state.elapsed,
        player: FighterResult::from_fighter(&session.player, &session.player_upgrades),
        enemy: FighterResult::from_fighter(&session.enemy, &session.enemy_upgrades),
        random_seed: state.random_seed,
    };

    if let Some(path) = state.output_path.clone() {
        let metadata = MatchMetadata {
            outcome: outcome.label().to_string(),
            ticks: result.ticks,
            match_time: result.match_time,
            random_seed: result.random_seed,
            player: result.player.metadata(),
            enemy: result.enemy.metadata(),
        };
        match session.combat.log.save_to_file(&metadata, &path) {
            Ok(filename) => println!("Match complete. Log saved to: {}", filename),
            Err(e) => eprintln!("Failed to save combat log: {}", e),
        }
    }

    if let Ok(mut slot) = sink.0.lock() {
        *slot = Some(result);
    }
    state.complete = true;
}

/// Exit the app when the match is complete
fn exit_on_complete(state: Res<HeadlessMatchState>, mut exit: EventWriter<AppExit>) {
    if state.complete {
        exit.send(AppExit::Success);
    }
}

/// Run a headless match with the given configuration
pub fn run_headless_match(config: HeadlessMatchConfig) -> Result<MatchResult, String> {
    config.validate()?;

    let sink = ResultSink::default();

    App::new()
        // Minimal plugins - no window, no rendering. Zero wait between
        // frames: headless time is the configured fixed delta, not wall time
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)))
        .add_plugins(HeadlessPlugin {
            config,
            sink: sink.clone(),
        })
        .run();

    let result = sink
        .0
        .lock()
        .map_err(|_| "Match result lock poisoned".to_string())?
        .take();
    result.ok_or_else(|| "Match ended without producing a result".to_string())
}

/// Run a pure batch simulation without the app loop: advances the tick
/// clock directly via `simulate_ticks`, with no animation deferral. Used
/// for AI evaluation and quick outcome checks.
pub fn run_simulation(config: &HeadlessMatchConfig, ticks: u64) -> Result<MatchResult, String> {
    config.validate()?;

    let (mut combat, mut player, mut enemy, player_upgrades, enemy_upgrades) =
        build_session(config)?;

    combat.start(&mut player, &mut enemy);
    let outcome = match combat.simulate_ticks(ticks, &mut player, &mut enemy) {
        Some(result) => MatchOutcome::from(result),
        None => MatchOutcome::Draw,
    };

    Ok(MatchResult {
        outcome,
        ticks: combat.tick_count,
        match_time: combat.tick_count as f32 * TICK_INTERVAL,
        player: FighterResult::from_fighter(&player, &player_upgrades),
        enemy: FighterResult::from_fighter(&enemy, &enemy_upgrades),
        random_seed: config.random_seed,
    })
}
