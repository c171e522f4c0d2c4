//! Deferred & Cosmetic Effects
//!
//! Data types for the deferred presentation layer: pending damage and
//! pending hit effects wait out a real-time countdown before firing, while
//! damage numbers and hit effects are purely cosmetic entries with
//! lifetimes. Everything here runs on the real-time clock, never the tick
//! clock — queue processing lives on [`Combat`](super::combat_core::Combat),
//! the lifetime bookkeeping lives here.

use crate::combat::anim::JointId;
use crate::combat::constants::{DAMAGE_NUMBER_RISE_SPEED, HIT_EFFECT_LIFETIME};
use crate::combat::fighter::Side;

/// Outcome flags rolled once at attack initiation and reused verbatim when
/// the damage lands at the contact frame. Never re-rolled at apply time, so
/// the number shown matches the number applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub is_crit: bool,
    pub is_execute: bool,
}

/// A damage application waiting for its animation contact frame.
#[derive(Debug, Clone, Copy)]
pub struct PendingDamage {
    pub attacker: Side,
    pub defender: Side,
    /// Pre-rolled outcome from attack initiation
    pub outcome: AttackOutcome,
    /// Real seconds left until the contact frame
    pub remaining: f32,
    /// Joint the hit lands from, when the rig knows one
    pub contact_joint: Option<JointId>,
}

/// A hit effect waiting for its animation contact frame.
#[derive(Debug, Clone, Copy)]
pub struct PendingHitEffect {
    pub attacker: Side,
    /// Real seconds left until the contact frame
    pub remaining: f32,
    /// Joint the effect spawns at, when the rig knows one
    pub joint: Option<JointId>,
    pub kind: HitEffectKind,
}

/// Visual flavor of a spawned hit effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitEffectKind {
    Strike,
    CritStrike,
}

/// Flavor of a floating number, used by render layers to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Damage,
    Crit,
    Bleed,
    Thorns,
    Heal,
}

/// Floating combat number. Appears at a world position and drifts upward
/// before fading out.
#[derive(Debug, Clone, Copy)]
pub struct DamageNumber {
    /// World position where the number is anchored
    pub position: (f32, f32),
    pub amount: i32,
    pub kind: NumberKind,
    /// Time remaining before the number disappears (in seconds)
    pub lifetime: f32,
}

/// A spawned hit effect at a contact-joint world position.
#[derive(Debug, Clone, Copy)]
pub struct HitEffect {
    pub position: (f32, f32),
    pub kind: HitEffectKind,
    /// Time remaining before the effect disappears (in seconds)
    pub lifetime: f32,
}

impl HitEffect {
    pub fn new(position: (f32, f32), kind: HitEffectKind) -> Self {
        Self {
            position,
            kind,
            lifetime: HIT_EFFECT_LIFETIME,
        }
    }
}

/// Drift damage numbers upward and drop the expired ones.
pub fn update_damage_numbers(numbers: &mut Vec<DamageNumber>, dt: f32) {
    for number in numbers.iter_mut() {
        number.lifetime -= dt;
        number.position.1 += DAMAGE_NUMBER_RISE_SPEED * dt;
    }
    numbers.retain(|number| number.lifetime > 0.0);
}

/// Age hit effects and drop the expired ones.
pub fn update_hit_effects(effects: &mut Vec<HitEffect>, dt: f32) {
    for effect in effects.iter_mut() {
        effect.lifetime -= dt;
    }
    effects.retain(|effect| effect.lifetime > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::constants::DAMAGE_NUMBER_LIFETIME;

    #[test]
    fn test_damage_numbers_expire_and_rise() {
        let mut numbers = vec![DamageNumber {
            position: (0.0, 1.0),
            amount: 12,
            kind: NumberKind::Damage,
            lifetime: DAMAGE_NUMBER_LIFETIME,
        }];

        update_damage_numbers(&mut numbers, 0.5);
        assert_eq!(numbers.len(), 1);
        assert!(numbers[0].position.1 > 1.0);

        update_damage_numbers(&mut numbers, DAMAGE_NUMBER_LIFETIME);
        assert!(numbers.is_empty());
    }

    #[test]
    fn test_hit_effects_expire() {
        let mut effects = vec![HitEffect::new((0.5, 1.0), HitEffectKind::Strike)];
        update_hit_effects(&mut effects, HIT_EFFECT_LIFETIME / 2.0);
        assert_eq!(effects.len(), 1);
        update_hit_effects(&mut effects, HIT_EFFECT_LIFETIME);
        assert!(effects.is_empty());
    }
}
