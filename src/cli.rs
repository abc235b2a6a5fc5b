//! CLI command definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fps_audio::AudioGroup;

#[derive(Parser)]
#[command(name = "fps")]
#[command(about = "Play sound effects and manage audio settings for the FPS template")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a one-shot sound effect and wait for it to finish
    Play {
        /// Path to the audio file
        file: PathBuf,

        /// Mixer group to route into (e.g. Impact, WeaponShoot)
        #[arg(long, short, default_value = "Impact")]
        group: AudioGroup,

        /// Emitter position relative to the listener
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        position: Option<Vec<f32>>,

        /// 0.0 = flat 2D, 1.0 = fully positional
        #[arg(long, default_value_t = 1.0)]
        spatial_blend: f32,

        /// Distance within which the sound plays at full volume
        #[arg(long, default_value_t = 1.0)]
        rolloff_min: f32,
    },

    /// Print the master volume, or set and save it
    Volume {
        /// New linear master volume (0.0 to 1.0)
        value: Option<f32>,
    },

    /// Show which mixer group each audio category resolves to
    Groups,
}
