//! JSON configuration parsing for headless mode
//!
//! Parses JSON match configurations: both fighters' stat blocks, upgrade
//! drafting, seeding, and run limits.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::fighter::FighterStats;
use crate::combat::upgrades;

fn default_max_duration() -> f32 {
    300.0
}

fn default_frame_dt() -> f32 {
    1.0 / 60.0
}

/// Headless match configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct HeadlessMatchConfig {
    /// Player fighter stat block
    #[serde(default)]
    pub player: FighterStats,
    /// Enemy fighter stat block
    #[serde(default)]
    pub enemy: FighterStats,
    /// Upgrade ids applied to the player before the fight
    #[serde(default)]
    pub player_upgrades: Vec<String>,
    /// Upgrade ids applied to the enemy before the fight
    #[serde(default)]
    pub enemy_upgrades: Vec<String>,
    /// Number of upgrades each side additionally drafts from the run deck
    /// (pick-one-of-three, chosen by the seeded RNG)
    #[serde(default)]
    pub random_upgrades: u32,
    /// Random seed for deterministic match reproduction.
    /// If provided, the match will use a seeded RNG for reproducible results
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Maximum match duration in seconds before declaring a draw (default: 300)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Fixed per-frame delta in seconds. Headless frames always advance by
    /// exactly this much, so runs are reproducible and faster than realtime
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f32,
    /// Custom output path for the saved match log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            player: FighterStats::default(),
            enemy: FighterStats::default(),
            player_upgrades: Vec::new(),
            enemy_upgrades: Vec::new(),
            random_upgrades: 0,
            random_seed: None,
            max_duration_secs: default_max_duration(),
            frame_dt: default_frame_dt(),
            output_path: None,
        }
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessMatchConfig =
            serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Default exhibition match used when no config file is given: evenly
    /// matched fighters, two drafted upgrades each.
    pub fn exhibition() -> Self {
        Self {
            enemy: FighterStats {
                armor: 1,
                crit_chance: 0.10,
                ..FighterStats::default()
            },
            random_upgrades: 2,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (label, stats) in [("player", &self.player), ("enemy", &self.enemy)] {
            if stats.max_hp <= 0 {
                return Err(format!("{} max_hp must be positive", label));
            }
            if stats.base_attack < 0 {
                return Err(format!("{} base_attack cannot be negative", label));
            }
            if stats.attack_speed <= 0.0 {
                return Err(format!("{} attack_speed must be positive", label));
            }
            if stats.armor < 0 {
                return Err(format!("{} armor cannot be negative", label));
            }
        }

        for id in self.player_upgrades.iter().chain(self.enemy_upgrades.iter()) {
            if upgrades::find_card(id).is_none() {
                return Err(format!("Unknown upgrade id: '{}'", id));
            }
        }

        if self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }

        if self.frame_dt <= 0.0 || self.frame_dt > 1.0 {
            return Err("frame_dt must be within (0, 1] seconds".to_string());
        }

        Ok(())
    }
}
