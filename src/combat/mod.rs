//! Combat system
//!
//! Implements the core auto-battle mechanics:
//! - Fighter stats and derived attack
//! - Fixed-interval tick scheduling and per-tick resolution
//! - On-hit effects (crit, execute, lifesteal, thorns, bleed, stun)
//! - Damage deferred to animation contact frames
//! - Upgrade cards and deck handling
//! - Combat logging

pub mod anim;
pub mod combat_core;
pub mod constants;
pub mod effects;
pub mod fighter;
pub mod log;
pub mod rng;
pub mod upgrades;

pub use anim::{AnimState, AnimationController, ClipInfo, JointId, NullAnimation};
pub use combat_core::{Combat, CombatResult, DamageKind, KillingBlow};
pub use effects::{AttackOutcome, DamageNumber, HitEffect, HitEffectKind, NumberKind};
pub use fighter::{BleedEffect, Fighter, FighterStats, Side};
pub use log::{CombatLog, CombatLogEventType};
pub use rng::GameRng;
pub use upgrades::{Rarity, StatCategory, UpgradeCard, UpgradeDeck};
