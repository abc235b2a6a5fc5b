//! Recording backend for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::{AudioBackend, GroupId, VoiceId, VoiceSettings};
use crate::error::AudioError;

#[derive(Debug, Clone, PartialEq)]
pub struct MockClip {
    pub path: PathBuf,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockGroup {
    pub parent: Option<GroupId>,
    pub volume_db: f32,
    pub released: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockVoice {
    pub clip: MockClip,
    pub settings: VoiceSettings,
}

/// Records every call. Clip durations come from `durations` (default 1s).
#[derive(Debug, Default)]
pub struct MockBackend {
    pub durations: HashMap<PathBuf, Duration>,
    pub loads: usize,
    pub groups: Vec<MockGroup>,
    pub master_db: Option<f32>,
    pub output_volume: Option<f32>,
    pub voices: HashMap<VoiceId, MockVoice>,
    pub stopped: Vec<VoiceId>,
    pub max_groups: Option<usize>,
    next_voice: u64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip(mut self, path: &str, duration: Duration) -> Self {
        self.durations.insert(PathBuf::from(path), duration);
        self
    }

    pub fn clip(&self, path: &str, duration: Duration) -> MockClip {
        MockClip {
            path: PathBuf::from(path),
            duration,
        }
    }
}

impl AudioBackend for MockBackend {
    type Clip = MockClip;

    fn load_clip(&mut self, path: &Path) -> Result<MockClip, AudioError> {
        if path.as_os_str().is_empty() || path.to_string_lossy().contains("missing") {
            return Err(AudioError::LoadFailed(path.to_path_buf(), "not found".into()));
        }
        self.loads += 1;
        Ok(MockClip {
            path: path.to_path_buf(),
            duration: self
                .durations
                .get(path)
                .copied()
                .unwrap_or(Duration::from_secs(1)),
        })
    }

    fn clip_duration(&self, clip: &MockClip) -> Duration {
        clip.duration
    }

    fn create_group(
        &mut self,
        parent: Option<GroupId>,
        volume_db: f32,
    ) -> Result<GroupId, AudioError> {
        if self.max_groups.is_some_and(|max| self.groups.len() >= max) {
            return Err(AudioError::ResourceLimit("too many tracks".into()));
        }
        self.groups.push(MockGroup {
            parent,
            volume_db,
            released: false,
        });
        Ok(GroupId(self.groups.len() - 1))
    }

    fn set_group_volume(&mut self, group: GroupId, volume_db: f32) {
        self.groups[group.0].volume_db = volume_db;
    }

    fn release_group(&mut self, group: GroupId) {
        self.groups[group.0].released = true;
    }

    fn set_master_volume_db(&mut self, volume_db: f32) {
        self.master_db = Some(volume_db);
    }

    fn set_output_volume(&mut self, volume: f32) {
        self.output_volume = Some(volume);
    }

    fn play(&mut self, clip: &MockClip, settings: VoiceSettings) -> Result<VoiceId, AudioError> {
        let id = VoiceId(self.next_voice);
        self.next_voice += 1;
        self.voices.insert(
            id,
            MockVoice {
                clip: clip.clone(),
                settings,
            },
        );
        Ok(id)
    }

    fn update_voice(&mut self, voice: VoiceId, volume: f64, panning: f64) {
        if let Some(v) = self.voices.get_mut(&voice) {
            v.settings.volume = volume;
            v.settings.panning = panning;
        }
    }

    fn stop(&mut self, voice: VoiceId) {
        if self.voices.remove(&voice).is_some() {
            self.stopped.push(voice);
        }
    }
}
