use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::backend::{AudioBackend, GroupId, VoiceSettings};
use crate::config::{AudioConfig, MixerConfig, MASTER_VOLUME_PARAM};
use crate::emitter::{AudioClip, EmitterId, SfxEmitter, SfxParams};
use crate::error::AudioError;
use crate::group::AudioGroup;
use crate::kira_backend::KiraBackend;
use crate::mixer::Mixer;
use crate::spatial::{compute_spatial, Listener, SpatialParams};
use crate::volume::{from_decibels, to_decibels};

/// Degraded paths that have already been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Fallback {
    NoMixerForGroups,
    NoMixerForVolume,
    NoMasterParameter,
    GroupNotFound(AudioGroup),
    DefaultOutput(AudioGroup),
}

/// The audio context for the game. Owns the backend, the optional mixer and
/// every live sound effect emitter.
///
/// Without a mixer everything still plays: sounds go to the default output
/// and master volume is applied as a plain output volume.
pub struct AudioEngine<A: AudioBackend = KiraBackend> {
    backend: A,
    mixer: Option<Mixer>,
    listener: Listener,
    max_distance: f32,
    output_volume: f32,
    clips: HashMap<PathBuf, AudioClip<A::Clip>>,
    emitters: Vec<SfxEmitter>,
    next_emitter: u64,
    reported: HashSet<Fallback>,
}

impl AudioEngine<KiraBackend> {
    /// Open the default audio device and build the engine from `config`.
    pub fn new(config: &AudioConfig) -> Result<Self, AudioError> {
        Self::with_backend(KiraBackend::new()?, config)
    }
}

impl<A: AudioBackend> AudioEngine<A> {
    /// Build the engine on an existing backend.
    pub fn with_backend(backend: A, config: &AudioConfig) -> Result<Self, AudioError> {
        let mut engine = Self {
            backend,
            mixer: None,
            listener: Listener::default(),
            max_distance: config.max_distance,
            output_volume: 1.0,
            clips: HashMap::new(),
            emitters: Vec::new(),
            next_emitter: 0,
            reported: HashSet::new(),
        };

        if config.use_mixer {
            engine.attach_mixer(&config.mixer)?;
        }
        engine.set_master_volume(config.master_volume);

        info!(mixer = engine.has_mixer(), "Audio engine initialized");
        Ok(engine)
    }

    /// Build a mixer from `config` and route new sounds through it.
    ///
    /// Replaces any mixer already attached: its groups are released on the
    /// backend and emitters routed into them are stopped. If building fails
    /// the current mixer stays in place.
    pub fn attach_mixer(&mut self, config: &MixerConfig) -> Result<(), AudioError> {
        let mixer = Mixer::build(config, &mut self.backend)?;
        info!(groups = mixer.group_count(), "Mixer attached");
        if let Some(previous) = self.mixer.replace(mixer) {
            self.release_mixer(previous);
        }
        self.reported.clear();
        Ok(())
    }

    /// Drop the mixer and go back to the default output. Returns `false` if
    /// no mixer was attached.
    ///
    /// The current master volume carries over as the output volume. Emitters
    /// routed into the mixer's groups are stopped along with their groups.
    pub fn detach_mixer(&mut self) -> bool {
        let Some(mixer) = self.mixer.take() else {
            return false;
        };

        let volume = mixer
            .get_float(MASTER_VOLUME_PARAM)
            .map(from_decibels)
            .unwrap_or(self.output_volume);
        self.release_mixer(mixer);
        self.output_volume = volume.clamp(0.0, 1.0);
        self.backend.set_output_volume(self.output_volume);

        self.reported.clear();
        self.first_report(Fallback::NoMixerForVolume);
        warn!("mixer detached, falling back to output volume");
        true
    }

    pub fn has_mixer(&self) -> bool {
        self.mixer.is_some()
    }

    pub fn mixer(&self) -> Option<&Mixer> {
        self.mixer.as_ref()
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    // ---- Clips ----

    /// Load a clip, reusing the cached copy for paths seen before.
    pub fn load_clip(&mut self, path: &Path) -> Result<AudioClip<A::Clip>, AudioError> {
        if let Some(clip) = self.clips.get(path) {
            return Ok(clip.clone());
        }
        let data = self.backend.load_clip(path)?;
        let clip = AudioClip {
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            duration: self.backend.clip_duration(&data),
            data,
        };
        self.clips.insert(path.to_path_buf(), clip.clone());
        Ok(clip)
    }

    // ---- Sound effects ----

    /// Spawn an emitter playing `clip` once. It removes itself after the
    /// clip's length has elapsed in [`update`](Self::update).
    pub fn create_sfx(
        &mut self,
        clip: &AudioClip<A::Clip>,
        params: SfxParams,
    ) -> Result<EmitterId, AudioError> {
        let group = self.audio_group(params.group);
        if group.is_none() && self.first_report(Fallback::DefaultOutput(params.group)) {
            warn!("no mixer group for {}, using default output", params.group);
        }

        let spatial = emitter_spatial(&self.listener, &params, self.max_distance);
        let voice = self.backend.play(
            &clip.data,
            VoiceSettings {
                volume: spatial.volume,
                panning: spatial.panning,
                group,
            },
        )?;

        let id = EmitterId(self.next_emitter);
        self.next_emitter += 1;
        let emitter = SfxEmitter::new(id, &clip.name, params, group, voice, clip.duration);
        debug!(name = %emitter.name, lifetime = ?clip.duration, "SFX spawned");
        self.emitters.push(emitter);
        Ok(id)
    }

    /// Load (or reuse) the clip at `path` and play it as a one-shot.
    pub fn play_sfx_at(&mut self, path: &Path, params: SfxParams) -> Result<EmitterId, AudioError> {
        let clip = self.load_clip(path)?;
        self.create_sfx(&clip, params)
    }

    /// First mixer group matching the category's name.
    pub fn audio_group(&mut self, group: AudioGroup) -> Option<GroupId> {
        let Some(mixer) = self.mixer.as_ref() else {
            if self.first_report(Fallback::NoMixerForGroups) {
                warn!("no mixer attached, cannot find mixer groups");
            }
            return None;
        };

        let found = mixer.find_matching_groups(group.name()).first().copied();
        if found.is_none() && self.first_report(Fallback::GroupNotFound(group)) {
            warn!("audio group not found for {group}");
        }
        found
    }

    pub fn active_emitters(&self) -> &[SfxEmitter] {
        &self.emitters
    }

    /// Stop every live emitter now.
    pub fn stop_all(&mut self) {
        for emitter in self.emitters.drain(..) {
            self.backend.stop(emitter.voice);
        }
    }

    // ---- Master volume ----

    /// Set master volume from a linear value in `[0, 1]`.
    pub fn set_master_volume(&mut self, value: f32) {
        if let Some(mixer) = self.mixer.as_mut() {
            if mixer.set_float(&mut self.backend, MASTER_VOLUME_PARAM, to_decibels(value)) {
                return;
            }
            if self.first_report(Fallback::NoMasterParameter) {
                warn!("mixer does not expose {MASTER_VOLUME_PARAM}, falling back to output volume");
            }
        } else if self.first_report(Fallback::NoMixerForVolume) {
            warn!("no mixer attached, falling back to output volume");
        }

        self.output_volume = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.backend.set_output_volume(self.output_volume);
    }

    /// Master volume as a linear value.
    ///
    /// With a mixer this reads `MasterVolume`; a mixer that doesn't expose it
    /// reads as 0 dB (1.0), and anything set below the floor reads back as
    /// `0.001`. Without a mixer it is the output volume. Logs nothing: the
    /// fallback has already been reported by construction (which calls
    /// [`set_master_volume`](Self::set_master_volume)) or by
    /// [`detach_mixer`](Self::detach_mixer).
    pub fn master_volume(&self) -> f32 {
        match &self.mixer {
            Some(mixer) => from_decibels(mixer.get_float(MASTER_VOLUME_PARAM).unwrap_or(0.0)),
            None => self.output_volume,
        }
    }

    // ---- Spatial ----

    /// Update the listener position and orientation for spatial audio.
    pub fn set_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        self.listener.position = position;
        self.listener.forward = forward;
        self.listener.up = up;
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    // ---- Per-frame ----

    /// Call each frame: expires finished emitters and re-spatializes the rest.
    pub fn update(&mut self, dt: Duration) {
        let backend = &mut self.backend;
        let listener = &self.listener;
        let max_distance = self.max_distance;

        self.emitters.retain_mut(|emitter| {
            if emitter.tick(dt) {
                backend.stop(emitter.voice);
                debug!(name = %emitter.name, "SFX finished");
                return false;
            }
            let spatial = emitter_spatial(listener, &emitter.params, max_distance);
            backend.update_voice(emitter.voice, spatial.volume, spatial.panning);
            true
        });
    }

    fn release_mixer(&mut self, mixer: Mixer) {
        let backend = &mut self.backend;
        self.emitters.retain(|emitter| match emitter.group {
            Some(group) if mixer.group_path(group).is_some() => {
                backend.stop(emitter.voice);
                false
            }
            _ => true,
        });
        mixer.release(&mut self.backend);
    }

    fn first_report(&mut self, fallback: Fallback) -> bool {
        self.reported.insert(fallback)
    }
}

fn emitter_spatial(listener: &Listener, params: &SfxParams, max_distance: f32) -> SpatialParams {
    compute_spatial(
        listener,
        params.position,
        params.rolloff_distance_min,
        max_distance,
    )
    .blend(params.spatial_blend)
}
