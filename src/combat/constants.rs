//! Combat Constants
//!
//! Centralized location for magic numbers used throughout the combat system.
//! This makes it easier to tune balance and ensures consistency.

// ============================================================================
// Tick Clock
// ============================================================================

/// Duration of one combat-logic tick in real seconds (2 ticks per second).
/// All game-balance logic advances on this fixed interval, independent of
/// the presentation frame rate.
pub const TICK_INTERVAL: f32 = 0.5;

/// Attack-timer threshold in tick units. A fighter accumulates
/// `attack_speed` per tick and swings each time the timer crosses this,
/// so a fighter with `attack_speed` 1.0 attacks once every two ticks.
pub const TICKS_PER_ATTACK: f32 = 2.0;

// ============================================================================
// Damage
// ============================================================================

/// Critical strikes multiply base attack damage by this factor.
pub const CRIT_DAMAGE_MULTIPLIER: i32 = 2;

/// Execute bonus damage applies while the defender is at or below this
/// fraction of max HP.
pub const EXECUTE_HP_FRACTION: f32 = 0.5;

// ============================================================================
// Status Effects
// ============================================================================

/// Number of ticks a freshly applied bleed lasts. Reapplication refreshes
/// the countdown rather than stacking a second bleed.
pub const BLEED_DURATION_TICKS: u32 = 6;

/// Number of ticks a successful stun lasts.
pub const STUN_DURATION_TICKS: u32 = 2;

// ============================================================================
// Presentation
// ============================================================================

/// Lifetime of a floating damage/heal number before it fades out (seconds).
pub const DAMAGE_NUMBER_LIFETIME: f32 = 1.5;

/// Vertical drift speed of floating numbers in world units per second.
pub const DAMAGE_NUMBER_RISE_SPEED: f32 = 1.2;

/// Lifetime of a spawned hit effect (seconds).
pub const HIT_EFFECT_LIFETIME: f32 = 0.35;
