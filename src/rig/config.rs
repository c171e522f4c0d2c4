//! Data-Driven Animation Configuration
//!
//! Clip timing and joint placement are defined in
//! `assets/config/animations.ron` rather than hardcoded, so contact frames
//! and clip lengths can be tuned without recompilation. A missing or
//! invalid file is not fatal: the combat core falls back to immediate
//! damage application when no clip metadata exists.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::anim::{AnimState, ClipInfo, JointId};

fn default_speed() -> f32 {
    1.0
}

fn default_contact_fraction() -> f32 {
    0.5
}

fn default_contact_joint() -> JointId {
    JointId::Hand
}

/// One animation clip's configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Clip length in seconds at playback speed 1.0
    pub duration: f32,
    /// Playback speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Normalized point (0-1) where the hit visually lands
    #[serde(default = "default_contact_fraction")]
    pub contact_fraction: f32,
    /// Joint contact effects spawn from
    #[serde(default = "default_contact_joint")]
    pub contact_joint: JointId,
    /// Looping clips (Idle, Stunned) restart and never block new states
    #[serde(default)]
    pub looping: bool,
}

/// Root structure for the animations.ron file
#[derive(Debug, Serialize, Deserialize)]
pub struct RigConfig {
    pub clips: HashMap<AnimState, ClipConfig>,
    /// Joint offsets from the rig root, facing right
    pub joints: HashMap<JointId, (f32, f32)>,
}

/// Loaded clip and joint tables shared by every rig instance.
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    clips: HashMap<AnimState, ClipConfig>,
    joints: HashMap<JointId, (f32, f32)>,
}

impl AnimationLibrary {
    /// Create from a loaded config
    pub fn new(config: RigConfig) -> Self {
        Self {
            clips: config.clips,
            joints: config.joints,
        }
    }

    /// A library with no clips and no joints. Every state change succeeds
    /// instantly and no metadata exists, so all damage applies immediately.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Clip configuration for a state, when defined.
    pub fn clip(&self, state: AnimState) -> Option<&ClipConfig> {
        self.clips.get(&state)
    }

    /// Clip timing metadata for a state, when defined.
    pub fn clip_info(&self, state: AnimState) -> Option<ClipInfo> {
        self.clips.get(&state).map(|clip| ClipInfo {
            duration: clip.duration,
            speed: clip.speed,
            contact_fraction: clip.contact_fraction,
            contact_joint: clip.contact_joint,
        })
    }

    /// Joint offset from the rig root (facing right), when defined.
    pub fn joint_offset(&self, joint: JointId) -> Option<(f32, f32)> {
        self.joints.get(&joint).copied()
    }

    /// Check that all states the combat core drives are defined.
    pub fn validate(&self) -> Result<(), Vec<AnimState>> {
        let expected_states = [
            AnimState::Idle,
            AnimState::Attack,
            AnimState::Hit,
            AnimState::Stunned,
            AnimState::Death,
        ];

        let missing: Vec<AnimState> = expected_states
            .into_iter()
            .filter(|state| !self.clips.contains_key(state))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

/// Load the animation library from assets/config/animations.ron
pub fn load_animation_library() -> Result<AnimationLibrary, String> {
    let config_path = "assets/config/animations.ron";

    let contents = std::fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read {}: {}", config_path, e))?;

    let config: RigConfig =
        ron::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", config_path, e))?;

    let library = AnimationLibrary::new(config);

    library
        .validate()
        .map_err(|missing| format!("Missing animation clip definitions: {:?}", missing))?;

    info!("Loaded animation library from {}", config_path);

    Ok(library)
}

/// Load the animation library, falling back to an empty library (immediate
/// damage application) when the config is missing or invalid.
pub fn load_animation_library_or_empty() -> AnimationLibrary {
    match load_animation_library() {
        Ok(library) => library,
        Err(e) => {
            warn!("{}; animations disabled, damage applies immediately", e);
            AnimationLibrary::empty()
        }
    }
}
