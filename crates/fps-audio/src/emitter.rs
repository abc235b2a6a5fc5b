//! Transient one-shot sound effect emitters.

use std::time::Duration;

use glam::Vec3;

use crate::backend::{GroupId, VoiceId};
use crate::group::AudioGroup;

/// A loaded clip, as handed to [`AudioEngine::create_sfx`](crate::AudioEngine::create_sfx).
#[derive(Debug, Clone)]
pub struct AudioClip<C> {
    pub name: String,
    pub duration: Duration,
    pub data: C,
}

/// Where and how to play a one-shot sound effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SfxParams {
    pub position: Vec3,
    pub group: AudioGroup,
    /// 0.0 = flat 2D, 1.0 = fully positional.
    pub spatial_blend: f32,
    /// Distance within which the sound plays at full volume.
    pub rolloff_distance_min: f32,
}

impl SfxParams {
    pub fn new(position: Vec3, group: AudioGroup, spatial_blend: f32) -> Self {
        Self {
            position,
            group,
            spatial_blend,
            rolloff_distance_min: 1.0,
        }
    }

    pub fn rolloff_distance_min(mut self, distance: f32) -> Self {
        self.rolloff_distance_min = distance;
        self
    }
}

/// Identifier of a spawned emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmitterId(pub u64);

/// A playing one-shot sound that removes itself once its clip has finished.
#[derive(Debug, Clone)]
pub struct SfxEmitter {
    pub id: EmitterId,
    /// `"SFX: <clip name>"`
    pub name: String,
    pub params: SfxParams,
    /// Mixer group the voice is routed into, `None` for the default output.
    pub group: Option<GroupId>,
    pub(crate) voice: VoiceId,
    remaining: Duration,
}

impl SfxEmitter {
    pub(crate) fn new(
        id: EmitterId,
        clip_name: &str,
        params: SfxParams,
        group: Option<GroupId>,
        voice: VoiceId,
        lifetime: Duration,
    ) -> Self {
        Self {
            id,
            name: format!("SFX: {clip_name}"),
            params,
            group,
            voice,
            remaining: lifetime,
        }
    }

    /// Time left before self-destruct.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Count down the lifetime. Returns `true` once it has run out.
    pub(crate) fn tick(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }
}
