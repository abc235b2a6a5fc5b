//! FPS Audio - Sound effects, mixer routing and master volume using kira
//!
//! Spawns one-shot sound effect emitters that clean themselves up, routes
//! them into mixer groups by [`AudioGroup`], and converts the linear master
//! volume to and from the mixer's decibel scale. Everything degrades to the
//! default output when no mixer is attached.

mod backend;
mod config;
mod emitter;
mod engine;
mod error;
mod group;
mod kira_backend;
mod mixer;
mod spatial;
pub mod volume;

#[cfg(test)]
mod mock;

pub use backend::{AudioBackend, GroupId, VoiceId, VoiceSettings};
pub use config::{
    AudioConfig, ExposedParameterConfig, MixerConfig, MixerGroupConfig, ParameterTarget,
    MASTER_VOLUME_PARAM,
};
pub use emitter::{AudioClip, EmitterId, SfxEmitter, SfxParams};
pub use engine::AudioEngine;
pub use error::AudioError;
pub use group::{AudioGroup, UnknownAudioGroup};
pub use kira_backend::KiraBackend;
pub use mixer::Mixer;
pub use spatial::{compute_spatial, Listener, SpatialParams};
pub use volume::{from_decibels, to_decibels, MIN_LINEAR_VOLUME};

pub use glam::Vec3;
