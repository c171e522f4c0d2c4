//! Fighter Stat Model
//!
//! Plain data model for a combatant: vital state, offensive and defensive
//! stats, special-effect stats, and the transient per-combat state (attack
//! timer, stun countdown, bleed slot). Effective attack is a derived value,
//! never stored.

use serde::{Deserialize, Serialize};

use super::constants::BLEED_DURATION_TICKS;

/// Which side of the duel a fighter is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The opposing side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Display name used in combat log messages.
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Enemy => "Enemy",
        }
    }
}

/// An active bleed on a fighter. A fighter holds at most one; reapplying
/// bleed overwrites this slot (refresh, not stack).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BleedEffect {
    /// Flat damage dealt at each tick, bypassing armor.
    pub damage: i32,
    /// Ticks left before the bleed expires.
    pub ticks_remaining: u32,
}

/// Base stat block for a fighter, as configured before a match.
///
/// This is the serializable surface used by match configs; upgrades mutate
/// the resulting [`Fighter`] directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterStats {
    /// Maximum health points
    pub max_hp: i32,
    /// Base attack damage before the bonus multiplier
    pub base_attack: i32,
    /// Fractional attack multiplier: effective attack = floor(base * (1 + bonus))
    pub attack_bonus: f32,
    /// Attack-timer gain per tick; 1.0 means one swing every two ticks
    pub attack_speed: f32,
    /// Probability that a swing is a critical strike
    pub crit_chance: f32,
    /// Flat damage reduction; can never reduce a hit below 1
    pub armor: i32,
    /// Fraction of damage dealt returned as healing
    pub lifesteal: f32,
    /// Flat damage reflected at anyone who lands a hit on this fighter
    pub thorns: i32,
    /// Flat healing applied at the start of every tick
    pub regen: i32,
    /// Bonus-damage multiplier against defenders at or below half HP
    pub execute: f32,
    /// Bleed strength as a fraction of the defender's max HP per bleed tick
    pub bleed: f32,
    /// Probability that a landed hit stuns the defender
    pub stun_chance: f32,
}

impl Default for FighterStats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            base_attack: 10,
            attack_bonus: 0.0,
            attack_speed: 1.0,
            crit_chance: 0.05,
            armor: 0,
            lifesteal: 0.0,
            thorns: 0,
            regen: 0,
            execute: 0.0,
            bleed: 0.0,
            stun_chance: 0.0,
        }
    }
}

/// A combatant in the duel.
///
/// Created once per run; [`Fighter::reset_for_combat`] restores vitals and
/// clears transient state between fights.
#[derive(Debug, Clone)]
pub struct Fighter {
    /// Which side this fighter is on
    pub side: Side,

    // === Vitals ===
    /// Maximum health points
    pub max_hp: i32,
    /// Current health points; always within `[0, max_hp]`
    pub hp: i32,
    /// False exactly from the moment hp reaches 0
    pub alive: bool,

    // === Offense ===
    pub base_attack: i32,
    pub attack_bonus: f32,
    pub attack_speed: f32,
    pub crit_chance: f32,

    // === Defense ===
    pub armor: i32,

    // === Specials ===
    pub lifesteal: f32,
    pub thorns: i32,
    pub regen: i32,
    pub execute: f32,
    pub bleed: f32,
    pub stun_chance: f32,

    // === Transient combat state ===
    /// Attack-timer accumulator in tick units
    pub attack_timer: f32,
    /// Remaining ticks of stun; a stunned fighter neither accumulates nor swings
    pub stun_ticks: u32,
    /// Single bleed slot; refreshed, never stacked
    pub bleed_effect: Option<BleedEffect>,

    // === Match statistics ===
    /// Total damage this fighter has dealt (including bleed and thorns)
    pub damage_dealt: i32,
    /// Total damage this fighter has taken
    pub damage_taken: i32,
}

impl Fighter {
    /// Create a fighter from a base stat block.
    pub fn new(side: Side, stats: FighterStats) -> Self {
        Self {
            side,
            max_hp: stats.max_hp,
            hp: stats.max_hp,
            alive: true,
            base_attack: stats.base_attack,
            attack_bonus: stats.attack_bonus,
            attack_speed: stats.attack_speed,
            crit_chance: stats.crit_chance,
            armor: stats.armor,
            lifesteal: stats.lifesteal,
            thorns: stats.thorns,
            regen: stats.regen,
            execute: stats.execute,
            bleed: stats.bleed,
            stun_chance: stats.stun_chance,
            attack_timer: 0.0,
            stun_ticks: 0,
            bleed_effect: None,
            damage_dealt: 0,
            damage_taken: 0,
        }
    }

    /// Effective attack damage: `floor(base_attack * (1 + attack_bonus))`.
    /// Derived on demand so upgrades only ever touch the base fields.
    pub fn attack(&self) -> i32 {
        (self.base_attack as f32 * (1.0 + self.attack_bonus)).floor() as i32
    }

    /// Check if this fighter is alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Apply raw damage to this fighter, clamping hp at 0 and flipping
    /// `alive` exactly when hp reaches 0. Returns the damage actually
    /// absorbed by health (overkill is discarded). Dead fighters take
    /// nothing; callers rely on this guard.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0, "take_damage: damage cannot be negative, got {}", amount);
        if !self.alive {
            return 0;
        }
        let actual = amount.min(self.hp);
        self.hp -= actual;
        self.damage_taken += actual;
        if self.hp == 0 {
            self.alive = false;
        }
        actual
    }

    /// Heal this fighter, clamped to max hp. Returns the hp actually gained.
    /// The dead stay dead: healing a corpse is a no-op.
    pub fn heal(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0, "heal: amount cannot be negative, got {}", amount);
        if !self.alive {
            return 0;
        }
        let actual = amount.min(self.max_hp - self.hp);
        self.hp += actual;
        actual
    }

    /// Arm (or refresh) the single bleed slot.
    pub fn apply_bleed(&mut self, damage: i32) {
        self.bleed_effect = Some(BleedEffect {
            damage,
            ticks_remaining: BLEED_DURATION_TICKS,
        });
    }

    /// Restore vitals and clear transient combat state between fights.
    /// Permanent stats (and upgrades applied to them) are untouched.
    pub fn reset_for_combat(&mut self) {
        self.hp = self.max_hp;
        self.alive = true;
        self.attack_timer = 0.0;
        self.stun_ticks = 0;
        self.bleed_effect = None;
        self.damage_dealt = 0;
        self.damage_taken = 0;
    }
}
