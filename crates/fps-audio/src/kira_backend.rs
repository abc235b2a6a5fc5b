use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use kira::manager::backend::DefaultBackend;
use kira::manager::{AudioManager, AudioManagerSettings};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings};
use kira::track::{TrackBuilder, TrackHandle, TrackRoutes};
use kira::tween::Tween;
use kira::Volume;
use tracing::{debug, info};

use crate::backend::{AudioBackend, GroupId, VoiceId, VoiceSettings};
use crate::error::AudioError;

/// [`AudioBackend`] on top of kira. Mixer groups are sub-tracks and the
/// master bus is kira's main track.
pub struct KiraBackend {
    manager: AudioManager<DefaultBackend>,
    /// Indexed by `GroupId`; released groups leave a `None` so ids stay stable.
    tracks: Vec<Option<TrackHandle>>,
    voices: HashMap<VoiceId, StaticSoundHandle>,
    next_voice: u64,
}

impl KiraBackend {
    /// Open the default audio device.
    pub fn new() -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::InitFailed(e.to_string()))?;

        info!("kira audio backend initialized");

        Ok(Self {
            manager,
            tracks: Vec::new(),
            voices: HashMap::new(),
            next_voice: 0,
        })
    }

    fn track(&self, group: GroupId) -> Option<&TrackHandle> {
        self.tracks.get(group.0).and_then(Option::as_ref)
    }
}

/// Map `-1.0..=1.0` (left to right) onto kira's `0.0..=1.0`, centered at 0.5.
fn kira_panning(panning: f64) -> f64 {
    ((panning.clamp(-1.0, 1.0) + 1.0) / 2.0).clamp(0.0, 1.0)
}

impl AudioBackend for KiraBackend {
    type Clip = StaticSoundData;

    fn load_clip(&mut self, path: &Path) -> Result<StaticSoundData, AudioError> {
        StaticSoundData::from_file(path)
            .map_err(|e| AudioError::LoadFailed(path.to_path_buf(), e.to_string()))
    }

    fn clip_duration(&self, clip: &StaticSoundData) -> Duration {
        clip.duration()
    }

    fn create_group(
        &mut self,
        parent: Option<GroupId>,
        volume_db: f32,
    ) -> Result<GroupId, AudioError> {
        let mut builder = TrackBuilder::new().volume(Volume::Decibels(volume_db as f64));
        if let Some(parent) = parent {
            let parent = self
                .track(parent)
                .ok_or_else(|| AudioError::InvalidConfig(format!("no track for {parent:?}")))?;
            builder = builder.routes(TrackRoutes::parent(parent.id()));
        }

        let handle = self
            .manager
            .add_sub_track(builder)
            .map_err(|e| AudioError::ResourceLimit(e.to_string()))?;
        self.tracks.push(Some(handle));
        Ok(GroupId(self.tracks.len() - 1))
    }

    fn set_group_volume(&mut self, group: GroupId, volume_db: f32) {
        if let Some(track) = self.tracks.get_mut(group.0).and_then(Option::as_mut) {
            track.set_volume(Volume::Decibels(volume_db as f64), Tween::default());
        }
    }

    fn release_group(&mut self, group: GroupId) {
        // Dropping the handle removes the sub-track from the mixer
        if let Some(slot) = self.tracks.get_mut(group.0) {
            if slot.take().is_some() {
                debug!(?group, "track released");
            }
        }
    }

    fn set_master_volume_db(&mut self, volume_db: f32) {
        self.manager
            .main_track()
            .set_volume(Volume::Decibels(volume_db as f64), Tween::default());
    }

    fn set_output_volume(&mut self, volume: f32) {
        // Without a mixer the main track is the whole output
        self.manager
            .main_track()
            .set_volume(Volume::Amplitude(volume as f64), Tween::default());
    }

    fn play(
        &mut self,
        clip: &StaticSoundData,
        settings: VoiceSettings,
    ) -> Result<VoiceId, AudioError> {
        let mut sound_settings = StaticSoundSettings::new()
            .volume(Volume::Amplitude(settings.volume))
            .panning(kira_panning(settings.panning));
        if let Some(track) = settings.group.and_then(|group| self.track(group)) {
            sound_settings = sound_settings.output_destination(track);
        }

        let handle = self
            .manager
            .play(clip.clone().with_settings(sound_settings))
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;

        let id = VoiceId(self.next_voice);
        self.next_voice += 1;
        self.voices.insert(id, handle);
        Ok(id)
    }

    fn update_voice(&mut self, voice: VoiceId, volume: f64, panning: f64) {
        if let Some(handle) = self.voices.get_mut(&voice) {
            handle.set_volume(Volume::Amplitude(volume), Tween::default());
            handle.set_panning(kira_panning(panning), Tween::default());
        }
    }

    fn stop(&mut self, voice: VoiceId) {
        if let Some(mut handle) = self.voices.remove(&voice) {
            handle.stop(Tween::default());
            debug!(?voice, "voice stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panning_is_centered_at_half() {
        assert_eq!(kira_panning(0.0), 0.5);
        assert_eq!(kira_panning(-1.0), 0.0);
        assert_eq!(kira_panning(1.0), 1.0);
        assert_eq!(kira_panning(-0.5), 0.25);
    }

    #[test]
    fn panning_out_of_range_is_clamped() {
        assert_eq!(kira_panning(-3.0), 0.0);
        assert_eq!(kira_panning(2.5), 1.0);
    }
}
