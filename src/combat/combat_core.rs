//! Combat Core
//!
//! The per-match combat session: a fixed-interval tick scheduler driving
//! the auto-battle resolver, plus the real-time pending queues that defer
//! damage application to animation contact frames.
//!
//! Per-tick order (encodes game-balance intent, do not reorder):
//! 1. Periodic effects (regen, then bleed) for each living fighter
//! 2. Stun countdown decrement
//! 3. Attack accumulation & execution, player before enemy
//!
//! On-hit side effects always resolve as damage -> lifesteal -> thorns ->
//! bleed -> stun. Crit and execute are rolled once when the attack starts
//! and reused when the damage lands, however late that is.

use smallvec::SmallVec;

use crate::combat::anim::{AnimState, AnimationController, JointId, NullAnimation};
use crate::combat::constants::{
    CRIT_DAMAGE_MULTIPLIER, DAMAGE_NUMBER_LIFETIME, STUN_DURATION_TICKS, TICKS_PER_ATTACK,
    TICK_INTERVAL,
};
use crate::combat::effects::{
    self, AttackOutcome, DamageNumber, HitEffect, HitEffectKind, NumberKind, PendingDamage,
    PendingHitEffect,
};
use crate::combat::fighter::{Fighter, Side};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::rng::GameRng;

/// Result of a finished combat, from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    Win,
    Lose,
}

/// How a killing blow was dealt. Consumed by result surfaces, never by
/// combat logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    Normal,
    Crit,
    Execute,
    Bleed,
    Thorns,
}

impl DamageKind {
    pub fn name(self) -> &'static str {
        match self {
            DamageKind::Normal => "Normal",
            DamageKind::Crit => "Crit",
            DamageKind::Execute => "Execute",
            DamageKind::Bleed => "Bleed",
            DamageKind::Thorns => "Thorns",
        }
    }
}

/// Descriptor of the hit that ended a fighter's match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillingBlow {
    pub kind: DamageKind,
    pub victim: Side,
    pub is_crit: bool,
}

/// Borrow the (attacker, defender) pair for a side from the two fighters.
fn split_sides<'a>(
    side: Side,
    player: &'a mut Fighter,
    enemy: &'a mut Fighter,
) -> (&'a mut Fighter, &'a mut Fighter) {
    match side {
        Side::Player => (player, enemy),
        Side::Enemy => (enemy, player),
    }
}

/// Pick the animation controller belonging to a side.
fn anim_of<'a>(
    side: Side,
    player_anim: &'a dyn AnimationController,
    enemy_anim: &'a dyn AnimationController,
) -> &'a dyn AnimationController {
    match side {
        Side::Player => player_anim,
        Side::Enemy => enemy_anim,
    }
}

/// One combat session between two fighters.
///
/// Constructed per match and passed wherever it is needed; holding the RNG
/// inside the session means several sessions can simulate concurrently
/// without cross-talk.
pub struct Combat {
    /// Monotonic logical clock, incremented once per tick
    pub tick_count: u64,
    /// Real-time remainder below one tick interval
    tick_accumulator: f32,
    /// False once a fighter has died; stops all further processing
    pub active: bool,
    /// Freezes tick accumulation (and the pending queues) without resetting it
    pub paused: bool,
    /// Damage applications waiting for their contact frame
    pub pending_damage: SmallVec<[PendingDamage; 4]>,
    /// Hit effects waiting for their contact frame
    pub pending_hit_effects: SmallVec<[PendingHitEffect; 4]>,
    /// Cosmetic floating numbers, real-time driven
    pub damage_numbers: Vec<DamageNumber>,
    /// Cosmetic hit effects, real-time driven
    pub hit_effects: Vec<HitEffect>,
    /// Set once, by the first death of the match
    pub killing_blow: Option<KillingBlow>,
    /// Structured event log for this match
    pub log: CombatLog,
    rng: GameRng,
}

impl Combat {
    pub fn new(rng: GameRng) -> Self {
        Self {
            tick_count: 0,
            tick_accumulator: 0.0,
            active: false,
            paused: false,
            pending_damage: SmallVec::new(),
            pending_hit_effects: SmallVec::new(),
            damage_numbers: Vec::new(),
            hit_effects: Vec::new(),
            killing_blow: None,
            log: CombatLog::default(),
            rng,
        }
    }

    /// The seed this session's RNG was created with (if deterministic).
    pub fn seed(&self) -> Option<u64> {
        self.rng.seed
    }

    /// Initialize session state for a new fight. Fighters arrive with their
    /// stats already set (upgrades applied); vitals and transient state are
    /// reset here.
    pub fn start(&mut self, player: &mut Fighter, enemy: &mut Fighter) {
        self.tick_count = 0;
        self.tick_accumulator = 0.0;
        self.active = true;
        self.paused = false;
        self.pending_damage.clear();
        self.pending_hit_effects.clear();
        self.damage_numbers.clear();
        self.hit_effects.clear();
        self.killing_blow = None;
        self.log.clear();
        player.reset_for_combat();
        enemy.reset_for_combat();
        self.log
            .log(CombatLogEventType::MatchEvent, "Fight started!".to_string());
    }

    /// Freeze tick accumulation without losing the remainder.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause; the accumulated remainder carries on unskewed.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance the session by one presentation frame of `dt` real seconds.
    /// Call once per frame; returns the result when the fight ends.
    ///
    /// Not reentrant: callers must not mutate the fighters or the queues
    /// while this runs.
    pub fn update(
        &mut self,
        dt: f32,
        player: &mut Fighter,
        enemy: &mut Fighter,
        player_anim: &mut dyn AnimationController,
        enemy_anim: &mut dyn AnimationController,
    ) -> Option<CombatResult> {
        if !self.active {
            return None;
        }

        // Cosmetic lists fade even while paused
        effects::update_damage_numbers(&mut self.damage_numbers, dt);
        effects::update_hit_effects(&mut self.hit_effects, dt);

        if self.paused {
            return None;
        }

        self.log.match_time += dt;

        // Deferred layer runs every frame, tick or not
        self.update_pending_damage(dt, player, enemy, player_anim, enemy_anim);
        self.update_pending_hit_effects(dt, player_anim, enemy_anim);

        // A fighter may already be dead from deferred damage
        if let Some(result) = self.check_outcome(player, enemy) {
            return Some(self.finish(result));
        }

        self.tick_accumulator += dt;
        while self.tick_accumulator >= TICK_INTERVAL {
            self.tick_accumulator -= TICK_INTERVAL;
            self.tick(player, enemy, player_anim, enemy_anim);
            if let Some(result) = self.check_outcome(player, enemy) {
                return Some(self.finish(result));
            }
        }

        None
    }

    /// Advance the logical clock by up to `count` ticks with no real-time
    /// coupling: no animation deferral, damage lands within its tick. Used
    /// for AI lookahead and deterministic testing.
    pub fn simulate_ticks(
        &mut self,
        count: u64,
        player: &mut Fighter,
        enemy: &mut Fighter,
    ) -> Option<CombatResult> {
        if !self.active || self.paused {
            return None;
        }

        if let Some(result) = self.check_outcome(player, enemy) {
            return Some(self.finish(result));
        }

        let mut player_anim = NullAnimation;
        let mut enemy_anim = NullAnimation;
        for _ in 0..count {
            self.log.match_time += TICK_INTERVAL;
            self.tick(player, enemy, &mut player_anim, &mut enemy_anim);
            if let Some(result) = self.check_outcome(player, enemy) {
                return Some(self.finish(result));
            }
        }

        None
    }

    /// Run one synchronous tick of combat logic.
    fn tick(
        &mut self,
        player: &mut Fighter,
        enemy: &mut Fighter,
        player_anim: &mut dyn AnimationController,
        enemy_anim: &mut dyn AnimationController,
    ) {
        self.tick_count += 1;

        // Phase 1: periodic effects
        self.tick_periodic_effects(Side::Player, player, enemy, player_anim, enemy_anim);
        self.tick_periodic_effects(Side::Enemy, player, enemy, player_anim, enemy_anim);

        // Phase 2: stun countdown
        self.tick_stun(player);
        self.tick_stun(enemy);

        // Phase 3: attacks, player first
        self.tick_attacks(Side::Player, player, enemy, player_anim, enemy_anim);
        self.tick_attacks(Side::Enemy, player, enemy, player_anim, enemy_anim);
    }

    /// Regen, then bleed, for one living fighter.
    fn tick_periodic_effects(
        &mut self,
        side: Side,
        player: &mut Fighter,
        enemy: &mut Fighter,
        player_anim: &dyn AnimationController,
        enemy_anim: &dyn AnimationController,
    ) {
        let position = anim_of(side, player_anim, enemy_anim).joint_position(JointId::Torso);
        let (fighter, opponent) = split_sides(side, player, enemy);
        if !fighter.alive {
            return;
        }

        if fighter.regen > 0 {
            let gained = fighter.heal(fighter.regen);
            if gained > 0 {
                self.spawn_number(position, gained, NumberKind::Heal);
                self.log.log_healing(
                    fighter.side.label().to_string(),
                    "Regen".to_string(),
                    gained,
                    format!("{} regenerates {} hp", fighter.side.label(), gained),
                );
            }
        }

        if let Some(mut bleed) = fighter.bleed_effect {
            // Bleed bypasses armor and can kill
            let actual = fighter.take_damage(bleed.damage);
            opponent.damage_dealt += actual;
            self.spawn_number(position, bleed.damage, NumberKind::Bleed);
            self.log.log_damage(
                opponent.side.label().to_string(),
                fighter.side.label().to_string(),
                DamageKind::Bleed.name().to_string(),
                bleed.damage,
                !fighter.alive,
                format!("{} bleeds for {} damage", fighter.side.label(), bleed.damage),
            );
            if !fighter.alive {
                self.record_death(fighter.side, Some(opponent.side), DamageKind::Bleed, false);
            }

            bleed.ticks_remaining -= 1;
            if bleed.ticks_remaining == 0 {
                fighter.bleed_effect = None;
                self.log.log(
                    CombatLogEventType::StatusExpired,
                    format!("{} stops bleeding", fighter.side.label()),
                );
            } else {
                fighter.bleed_effect = Some(bleed);
            }
        }
    }

    /// Count a stunned fighter one tick closer to acting again. Runs for
    /// every fighter, whether or not they could attack this tick.
    fn tick_stun(&mut self, fighter: &mut Fighter) {
        if fighter.stun_ticks > 0 {
            fighter.stun_ticks -= 1;
            if fighter.stun_ticks == 0 {
                self.log.log(
                    CombatLogEventType::StatusExpired,
                    format!("{} shakes off the stun", fighter.side.label()),
                );
            }
        }
    }

    /// Accumulate the attack timer and fire as many attacks as it covers.
    /// High attack speed can fire several attacks in one tick (burst
    /// catch-up).
    fn tick_attacks(
        &mut self,
        side: Side,
        player: &mut Fighter,
        enemy: &mut Fighter,
        player_anim: &mut dyn AnimationController,
        enemy_anim: &mut dyn AnimationController,
    ) {
        {
            let (attacker, _) = split_sides(side, player, enemy);
            if !attacker.alive || attacker.stun_ticks > 0 {
                return;
            }
            attacker.attack_timer += attacker.attack_speed;
        }

        loop {
            {
                let (attacker, defender) = split_sides(side, player, enemy);
                if attacker.attack_timer < TICKS_PER_ATTACK
                    || !attacker.alive
                    || !defender.alive
                    || attacker.stun_ticks > 0
                {
                    break;
                }
                attacker.attack_timer -= TICKS_PER_ATTACK;
            }
            self.execute_attack(side, player, enemy, player_anim, enemy_anim);
        }
    }

    /// Start one attack: roll the outcome, then either defer the damage to
    /// the animation contact frame or, when no new animation could start
    /// (or no timing metadata exists), apply it on the spot. The busy
    /// fallback keeps attack-speed upgrades from being swallowed by
    /// animation-busy states.
    fn execute_attack<'a>(
        &mut self,
        side: Side,
        player: &mut Fighter,
        enemy: &mut Fighter,
        player_anim: &'a mut dyn AnimationController,
        enemy_anim: &'a mut dyn AnimationController,
    ) {
        let (outcome, attack_speed) = {
            let (attacker, defender) = split_sides(side, player, enemy);
            let is_crit = self.rng.chance(attacker.crit_chance);
            let is_execute = attacker.execute > 0.0 && defender.hp * 2 <= defender.max_hp;
            (AttackOutcome { is_crit, is_execute }, attacker.attack_speed)
        };

        let (started, clip) = {
            let anim = match side {
                Side::Player => &mut *player_anim,
                Side::Enemy => &mut *enemy_anim,
            };
            let started = anim.set_state(AnimState::Attack);
            (started, if started { anim.current_clip() } else { None })
        };

        if started {
            if let Some(clip) = clip {
                let denom = clip.speed * attack_speed;
                if denom > 0.0 {
                    let delay = (clip.duration * clip.contact_fraction) / denom;
                    self.pending_damage.push(PendingDamage {
                        attacker: side,
                        defender: side.opponent(),
                        outcome,
                        remaining: delay,
                        contact_joint: Some(clip.contact_joint),
                    });
                    self.pending_hit_effects.push(PendingHitEffect {
                        attacker: side,
                        remaining: delay,
                        joint: Some(clip.contact_joint),
                        kind: if outcome.is_crit {
                            HitEffectKind::CritStrike
                        } else {
                            HitEffectKind::Strike
                        },
                    });
                    return;
                }
            }
        }

        // Immediate path: animation busy or no timing metadata
        let attacker_pos =
            anim_of(side, player_anim, enemy_anim).joint_position(JointId::Torso);
        let defender_pos =
            anim_of(side.opponent(), player_anim, enemy_anim).joint_position(JointId::Torso);
        self.apply_damage(side, outcome, player, enemy, attacker_pos, defender_pos);
    }

    /// Apply one attack's damage and resolve its on-hit effects in fixed
    /// order: damage -> lifesteal -> thorns -> bleed -> stun. No-op when the
    /// defender has already died (prevents double-kill attribution).
    fn apply_damage(
        &mut self,
        attacker_side: Side,
        outcome: AttackOutcome,
        player: &mut Fighter,
        enemy: &mut Fighter,
        attacker_pos: Option<(f32, f32)>,
        defender_pos: Option<(f32, f32)>,
    ) {
        let (attacker, defender) = split_sides(attacker_side, player, enemy);
        if !defender.alive {
            return;
        }

        let base = attacker.attack()
            * if outcome.is_crit {
                CRIT_DAMAGE_MULTIPLIER
            } else {
                1
            };
        let blocked = defender.armor.min(base - 1).max(0);
        let mut dealt = (base - defender.armor).max(1);
        if outcome.is_execute {
            dealt += (base as f32 * attacker.execute).floor() as i32;
        }

        let kind = if outcome.is_execute {
            DamageKind::Execute
        } else if outcome.is_crit {
            DamageKind::Crit
        } else {
            DamageKind::Normal
        };

        let actual = defender.take_damage(dealt);
        attacker.damage_dealt += actual;

        let mut message = format!(
            "{} hits {} for {} damage",
            attacker.side.label(),
            defender.side.label(),
            dealt
        );
        match (outcome.is_crit, outcome.is_execute) {
            (true, true) => message.push_str(" (crit, execute)"),
            (true, false) => message.push_str(" (crit)"),
            (false, true) => message.push_str(" (execute)"),
            (false, false) => {}
        }
        if blocked > 0 {
            message.push_str(&format!(" [{} blocked]", blocked));
        }
        self.log.log_damage(
            attacker.side.label().to_string(),
            defender.side.label().to_string(),
            kind.name().to_string(),
            dealt,
            !defender.alive,
            message,
        );
        self.spawn_number(
            defender_pos,
            dealt,
            if outcome.is_crit {
                NumberKind::Crit
            } else {
                NumberKind::Damage
            },
        );
        if !defender.alive {
            self.record_death(defender.side, Some(attacker.side), kind, outcome.is_crit);
        }

        // Lifesteal
        if attacker.lifesteal > 0.0 && dealt > 0 {
            let heal = ((dealt as f32 * attacker.lifesteal).round() as i32).max(1);
            let gained = attacker.heal(heal);
            if gained > 0 {
                self.spawn_number(attacker_pos, gained, NumberKind::Heal);
                self.log.log_healing(
                    attacker.side.label().to_string(),
                    "Lifesteal".to_string(),
                    gained,
                    format!("{} drains {} hp", attacker.side.label(), gained),
                );
            }
        }

        // Thorns: fires whenever the defender carries thorns and is still
        // standing, regardless of what the incoming hit amounted to
        if defender.thorns > 0 && defender.alive {
            let reflected = attacker.take_damage(defender.thorns);
            defender.damage_dealt += reflected;
            self.spawn_number(attacker_pos, defender.thorns, NumberKind::Thorns);
            self.log.log_damage(
                defender.side.label().to_string(),
                attacker.side.label().to_string(),
                DamageKind::Thorns.name().to_string(),
                defender.thorns,
                !attacker.alive,
                format!(
                    "{}'s thorns reflect {} damage to {}",
                    defender.side.label(),
                    defender.thorns,
                    attacker.side.label()
                ),
            );
            if !attacker.alive {
                self.record_death(attacker.side, Some(defender.side), DamageKind::Thorns, false);
            }
        }

        // Bleed application (refreshes the single slot)
        if attacker.bleed > 0.0 && defender.alive {
            let damage = ((attacker.bleed * defender.max_hp as f32).floor() as i32).max(1);
            defender.apply_bleed(damage);
            self.log.log(
                CombatLogEventType::StatusApplied,
                format!(
                    "{}'s strikes leave {} bleeding ({} per tick)",
                    attacker.side.label(),
                    defender.side.label(),
                    damage
                ),
            );
        }

        // Stun roll
        if attacker.stun_chance > 0.0 && defender.alive && self.rng.chance(attacker.stun_chance) {
            defender.stun_ticks = STUN_DURATION_TICKS;
            self.log.log(
                CombatLogEventType::StatusApplied,
                format!(
                    "{} stuns {} for {} ticks",
                    attacker.side.label(),
                    defender.side.label(),
                    STUN_DURATION_TICKS
                ),
            );
        }
    }

    /// Count down pending damage and apply entries whose contact frame has
    /// arrived. Iterates backward so removal never skips an entry.
    fn update_pending_damage(
        &mut self,
        dt: f32,
        player: &mut Fighter,
        enemy: &mut Fighter,
        player_anim: &mut dyn AnimationController,
        enemy_anim: &mut dyn AnimationController,
    ) {
        let mut i = self.pending_damage.len();
        while i > 0 {
            i -= 1;
            self.pending_damage[i].remaining -= dt;
            if self.pending_damage[i].remaining <= 0.0 {
                let entry = self.pending_damage.remove(i);
                let attacker_pos = anim_of(entry.attacker, player_anim, enemy_anim)
                    .joint_position(JointId::Torso);
                let defender_pos = anim_of(entry.defender, player_anim, enemy_anim)
                    .joint_position(JointId::Torso);
                self.apply_damage(
                    entry.attacker,
                    entry.outcome,
                    player,
                    enemy,
                    attacker_pos,
                    defender_pos,
                );
            }
        }
    }

    /// Count down pending hit effects and spawn the ones whose contact
    /// frame has arrived, at the attacker's current joint position.
    fn update_pending_hit_effects(
        &mut self,
        dt: f32,
        player_anim: &dyn AnimationController,
        enemy_anim: &dyn AnimationController,
    ) {
        let mut i = self.pending_hit_effects.len();
        while i > 0 {
            i -= 1;
            self.pending_hit_effects[i].remaining -= dt;
            if self.pending_hit_effects[i].remaining <= 0.0 {
                let entry = self.pending_hit_effects.remove(i);
                let anim = anim_of(entry.attacker, player_anim, enemy_anim);
                let position = entry.joint.and_then(|joint| anim.joint_position(joint));
                if let Some(position) = position {
                    self.hit_effects.push(HitEffect::new(position, entry.kind));
                }
            }
        }
    }

    fn spawn_number(&mut self, position: Option<(f32, f32)>, amount: i32, kind: NumberKind) {
        // Cosmetic only; batch simulation has no positions and spawns nothing
        if let Some(position) = position {
            self.damage_numbers.push(DamageNumber {
                position,
                amount,
                kind,
                lifetime: DAMAGE_NUMBER_LIFETIME,
            });
        }
    }

    fn record_death(
        &mut self,
        victim: Side,
        killer: Option<Side>,
        kind: DamageKind,
        is_crit: bool,
    ) {
        if self.killing_blow.is_none() {
            self.killing_blow = Some(KillingBlow {
                kind,
                victim,
                is_crit,
            });
        }
        self.log.log_death(
            victim.label().to_string(),
            killer.map(|side| side.label().to_string()),
            format!("{} has been defeated", victim.label()),
        );
    }

    /// Terminal check. Player death takes precedence when both fighters
    /// died in the same tick.
    fn check_outcome(&self, player: &Fighter, enemy: &Fighter) -> Option<CombatResult> {
        if !player.alive {
            Some(CombatResult::Lose)
        } else if !enemy.alive {
            Some(CombatResult::Win)
        } else {
            None
        }
    }

    fn finish(&mut self, result: CombatResult) -> CombatResult {
        self.active = false;
        let message = match result {
            CombatResult::Win => "Player wins the duel!",
            CombatResult::Lose => "Player has been defeated!",
        };
        self.log
            .log(CombatLogEventType::MatchEvent, message.to_string());
        result
    }
}
