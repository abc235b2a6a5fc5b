//! FPS - audio tooling for the first-person-shooter template
//!
//! Loads the game settings, brings up the audio engine and runs one command.

mod cli;
mod settings;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fps_audio::{AudioEngine, AudioGroup, SfxParams, Vec3};

use cli::{Cli, Commands};
use settings::GameSettings;

/// Per-frame update interval while waiting for sounds to finish.
const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let cli = Cli::parse();
    let mut settings = GameSettings::load();

    let mut audio =
        AudioEngine::new(&settings.audio).context("Failed to initialize audio engine")?;

    match cli.command {
        Commands::Play {
            file,
            group,
            position,
            spatial_blend,
            rolloff_min,
        } => {
            let position = position
                .map(|p| Vec3::new(p[0], p[1], p[2]))
                .unwrap_or(Vec3::ZERO);
            let params =
                SfxParams::new(position, group, spatial_blend).rolloff_distance_min(rolloff_min);
            audio
                .play_sfx_at(&file, params)
                .with_context(|| format!("Failed to play {}", file.display()))?;

            let mut last = Instant::now();
            while !audio.active_emitters().is_empty() {
                thread::sleep(FRAME_TIME);
                let now = Instant::now();
                audio.update(now - last);
                last = now;
            }
            info!("Playback finished");
        }
        Commands::Volume { value: None } => {
            println!("{:.3}", audio.master_volume());
        }
        Commands::Volume { value: Some(value) } => {
            audio.set_master_volume(value);
            settings.audio.master_volume = audio.master_volume();
            settings.save()?;
            println!("{:.3}", settings.audio.master_volume);
        }
        Commands::Groups => {
            for group in AudioGroup::ALL {
                let path = audio
                    .audio_group(group)
                    .and_then(|id| audio.mixer().and_then(|mixer| mixer.group_path(id)));
                println!("{:<20} {}", group.name(), path.unwrap_or("(default output)"));
            }
        }
    }

    Ok(())
}
