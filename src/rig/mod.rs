//! Stick-Figure Rig
//!
//! The shipped [`AnimationController`] implementation: a timing and joint
//! placement model for a stick fighter, with no rendering. Clip metadata
//! comes from `assets/config/animations.ron`; render layers draw whatever
//! they like on top of the state and joint positions reported here.

pub mod config;

pub use config::{
    load_animation_library, load_animation_library_or_empty, AnimationLibrary, ClipConfig,
    RigConfig,
};

use crate::combat::anim::{AnimState, AnimationController, ClipInfo, JointId};

/// Animation state machine for one stick fighter.
///
/// A non-looping clip in progress refuses new states until it finishes
/// (the combat core then applies damage immediately instead of deferring
/// it). Finished non-looping clips drop back to Idle, except Death, which
/// is terminal.
pub struct StickRig {
    library: AnimationLibrary,
    state: AnimState,
    /// Playback position within the current clip, in clip-local seconds
    elapsed: f32,
    /// Rig root position in world space
    pub root: (f32, f32),
    /// 1.0 facing right, -1.0 facing left; mirrors joint x offsets
    pub facing: f32,
}

impl StickRig {
    pub fn new(library: AnimationLibrary, root: (f32, f32), facing: f32) -> Self {
        Self {
            library,
            state: AnimState::Idle,
            elapsed: 0.0,
            root,
            facing,
        }
    }

    /// Whether the current clip is still playing and blocks new states.
    fn busy(&self) -> bool {
        match self.library.clip(self.state) {
            Some(clip) => !clip.looping && self.elapsed < clip.duration,
            // No metadata for the current state: nothing to wait for
            None => false,
        }
    }
}

impl AnimationController for StickRig {
    fn set_state(&mut self, state: AnimState) -> bool {
        if self.state == AnimState::Death {
            return false;
        }
        if self.busy() {
            return false;
        }
        self.state = state;
        self.elapsed = 0.0;
        true
    }

    fn state(&self) -> AnimState {
        self.state
    }

    fn current_clip(&self) -> Option<ClipInfo> {
        self.library.clip_info(self.state)
    }

    fn joint_position(&self, joint: JointId) -> Option<(f32, f32)> {
        self.library
            .joint_offset(joint)
            .map(|(x, y)| (self.root.0 + x * self.facing, self.root.1 + y))
    }

    fn update(&mut self, dt: f32) {
        let Some(clip) = self.library.clip(self.state) else {
            return;
        };
        self.elapsed += dt * clip.speed;
        if clip.looping {
            if self.elapsed >= clip.duration {
                self.elapsed %= clip.duration.max(f32::EPSILON);
            }
        } else if self.elapsed >= clip.duration && self.state != AnimState::Death {
            self.state = AnimState::Idle;
            self.elapsed = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn library() -> AnimationLibrary {
        let mut clips = HashMap::new();
        clips.insert(
            AnimState::Idle,
            ClipConfig {
                duration: 0.8,
                speed: 1.0,
                contact_fraction: 0.5,
                contact_joint: JointId::Hand,
                looping: true,
            },
        );
        clips.insert(
            AnimState::Attack,
            ClipConfig {
                duration: 0.5,
                speed: 1.0,
                contact_fraction: 0.4,
                contact_joint: JointId::Hand,
                looping: false,
            },
        );
        clips.insert(
            AnimState::Death,
            ClipConfig {
                duration: 0.7,
                speed: 1.0,
                contact_fraction: 0.5,
                contact_joint: JointId::Torso,
                looping: false,
            },
        );
        let mut joints = HashMap::new();
        joints.insert(JointId::Hand, (0.5, 1.0));
        AnimationLibrary::new(RigConfig { clips, joints })
    }

    #[test]
    fn test_attack_blocks_until_finished() {
        let mut rig = StickRig::new(library(), (0.0, 0.0), 1.0);
        assert!(rig.set_state(AnimState::Attack));
        // Second request while the swing is still playing is refused
        assert!(!rig.set_state(AnimState::Attack));
        rig.update(0.6);
        // Clip finished, rig dropped back to idle and accepts a new swing
        assert_eq!(rig.state(), AnimState::Idle);
        assert!(rig.set_state(AnimState::Attack));
    }

    #[test]
    fn test_idle_is_interruptible() {
        let mut rig = StickRig::new(library(), (0.0, 0.0), 1.0);
        rig.update(0.3);
        assert!(rig.set_state(AnimState::Attack));
    }

    #[test]
    fn test_death_is_terminal() {
        let mut rig = StickRig::new(library(), (0.0, 0.0), 1.0);
        assert!(rig.set_state(AnimState::Death));
        rig.update(5.0);
        assert_eq!(rig.state(), AnimState::Death);
        assert!(!rig.set_state(AnimState::Attack));
    }

    #[test]
    fn test_joint_positions_mirror_with_facing() {
        let rig = StickRig::new(library(), (10.0, 2.0), 1.0);
        assert_eq!(rig.joint_position(JointId::Hand), Some((10.5, 3.0)));

        let rig = StickRig::new(library(), (10.0, 2.0), -1.0);
        assert_eq!(rig.joint_position(JointId::Hand), Some((9.5, 3.0)));
    }

    #[test]
    fn test_unknown_joint_is_none() {
        let rig = StickRig::new(library(), (0.0, 0.0), 1.0);
        assert!(rig.joint_position(JointId::Head).is_none());
    }
}
