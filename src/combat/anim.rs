//! Animation Capability Interface
//!
//! The combat core schedules damage against animation contact frames but
//! does not implement animation playback itself. This module defines the
//! capability seam: a controller reports whether a new animation started,
//! exposes clip timing metadata, and answers joint-position lookups for
//! hit-effect placement. The `rig` module provides the shipped
//! implementation; [`NullAnimation`] is the metadata-free stand-in used by
//! batch simulation.

use serde::{Deserialize, Serialize};

/// Animation states a fighter can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    Attack,
    Hit,
    Stunned,
    Death,
}

/// Named joints on a fighter's rig, used to place contact effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointId {
    Hand,
    Foot,
    Head,
    Torso,
}

/// Timing metadata for the clip currently playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipInfo {
    /// Clip length in seconds at playback speed 1.0
    pub duration: f32,
    /// Playback speed multiplier
    pub speed: f32,
    /// Normalized point (0-1) within the clip where the hit visually lands
    pub contact_fraction: f32,
    /// Joint at which contact effects spawn
    pub contact_joint: JointId,
}

/// External animation controller capability consumed by the combat core.
///
/// The core only ever *requests* state changes; the controller decides
/// whether a new animation actually begins (it refuses while a non-looping
/// clip is still playing). Callers advance playback with `update` once per
/// presentation frame, before combat is updated.
pub trait AnimationController {
    /// Request a state change. Returns true iff a new animation began.
    fn set_state(&mut self, state: AnimState) -> bool;

    /// The state currently playing.
    fn state(&self) -> AnimState;

    /// Timing metadata for the current clip, when available. `None` means
    /// the combat core falls back to immediate effect application.
    fn current_clip(&self) -> Option<ClipInfo>;

    /// World position of a joint, when the rig knows it.
    fn joint_position(&self, joint: JointId) -> Option<(f32, f32)>;

    /// Advance playback by `dt` real seconds.
    fn update(&mut self, dt: f32);
}

/// Controller that never animates: every state request is refused and no
/// clip metadata exists, which forces the combat core down the
/// immediate-application path. Used by `simulate_ticks` and logic tests.
pub struct NullAnimation;

impl AnimationController for NullAnimation {
    fn set_state(&mut self, _state: AnimState) -> bool {
        false
    }

    fn state(&self) -> AnimState {
        AnimState::Idle
    }

    fn current_clip(&self) -> Option<ClipInfo> {
        None
    }

    fn joint_position(&self, _joint: JointId) -> Option<(f32, f32)> {
        None
    }

    fn update(&mut self, _dt: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_animation_refuses_everything() {
        let mut anim = NullAnimation;
        assert!(!anim.set_state(AnimState::Attack));
        assert_eq!(anim.state(), AnimState::Idle);
        assert!(anim.current_clip().is_none());
        assert!(anim.joint_position(JointId::Hand).is_none());
    }
}
