//! StickRivals - Stick-Figure Duel Autobattler
//!
//! Deterministic tick-based combat core for a stick-figure auto-battler:
//! two stat-driven fighters exchange attacks on a fixed logical clock while
//! damage numbers and animation-deferred hits run on the real-time
//! presentation clock.
//!
//! This library exposes the combat core, the upgrade deck, the stick rig
//! timing model, and the headless match runner for testing and reuse.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod rig;

// Re-export commonly used types
pub use combat::combat_core::{Combat, CombatResult, DamageKind, KillingBlow};
pub use combat::fighter::{Fighter, FighterStats, Side};
pub use combat::log::{CombatLog, CombatLogEventType};
pub use combat::rng::GameRng;
pub use combat::upgrades::{Rarity, StatCategory, UpgradeCard, UpgradeDeck};
pub use headless::{HeadlessMatchConfig, MatchOutcome, MatchResult};
