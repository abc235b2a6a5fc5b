//! The seam between the audio utilities and whatever actually makes sound.

use std::path::Path;
use std::time::Duration;

use crate::error::AudioError;

/// A routing group created on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

/// A playing sound on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// How a voice should be played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    /// Amplitude multiplier (0.0–1.0).
    pub volume: f64,
    /// -1.0 = full left, 0.0 = center, 1.0 = full right. Backends map this
    /// onto their own range.
    pub panning: f64,
    /// Group to route into, or `None` for the default output.
    pub group: Option<GroupId>,
}

/// Audio backend operations the engine relies on.
pub trait AudioBackend {
    /// Decoded clip data, cheap to clone.
    type Clip: Clone;

    fn load_clip(&mut self, path: &Path) -> Result<Self::Clip, AudioError>;

    /// Length of the clip at normal playback rate.
    fn clip_duration(&self, clip: &Self::Clip) -> Duration;

    /// Create a routing group feeding into `parent` (the master bus if `None`).
    fn create_group(&mut self, parent: Option<GroupId>, volume_db: f32)
        -> Result<GroupId, AudioError>;

    fn set_group_volume(&mut self, group: GroupId, volume_db: f32);

    /// Remove a group. Its id is never handed out again.
    fn release_group(&mut self, group: GroupId);

    /// Volume of the master bus, in dB.
    fn set_master_volume_db(&mut self, volume_db: f32);

    /// Global output volume as a plain amplitude, used when there is no mixer.
    fn set_output_volume(&mut self, volume: f32);

    fn play(&mut self, clip: &Self::Clip, settings: VoiceSettings) -> Result<VoiceId, AudioError>;

    /// Update the spatial volume/panning of a playing voice.
    fn update_voice(&mut self, voice: VoiceId, volume: f64, panning: f64);

    fn stop(&mut self, voice: VoiceId);
}
