use serde::{Deserialize, Serialize};

use crate::group::AudioGroup;

/// Name of the exposed parameter that drives the master bus.
pub const MASTER_VOLUME_PARAM: &str = "MasterVolume";

/// Audio configuration. Maps to the `audio` table in the game's settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0–1.0), applied when the engine starts.
    pub master_volume: f32,
    /// Distance past which spatialized sounds stop getting quieter.
    pub max_distance: f32,
    /// Build the mixer from `mixer`. When off, every sound goes to the
    /// default output and master volume falls back to the output volume.
    pub use_mixer: bool,
    /// Mixer routing layout.
    pub mixer: MixerConfig,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            max_distance: 100.0,
            use_mixer: true,
            mixer: MixerConfig::default(),
        }
    }
}

/// Layout of the mixer: routing groups and the parameters exposed on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixerConfig {
    /// Groups in creation order. A group is routed into the group whose path
    /// is its longest listed prefix, or into the master bus if there is none.
    pub groups: Vec<MixerGroupConfig>,
    #[serde(default)]
    pub parameters: Vec<ExposedParameterConfig>,
}

/// One routing group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixerGroupConfig {
    /// `/`-separated path, e.g. `Master/Weapons/WeaponShoot`.
    pub path: String,
    #[serde(default)]
    pub volume_db: f32,
}

/// A named float parameter bound to a bus volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposedParameterConfig {
    pub name: String,
    pub target: ParameterTarget,
    /// Initial value in dB.
    #[serde(default)]
    pub value: f32,
}

/// What an exposed parameter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterTarget {
    /// The master bus every group ends up in.
    Master,
    /// The volume of the group with this exact path.
    Group(String),
}

impl MixerGroupConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            volume_db: 0.0,
        }
    }
}

impl Default for MixerConfig {
    /// `Master/<bus>/<category>` for every [`AudioGroup`], with
    /// `MasterVolume` exposed on the master bus.
    fn default() -> Self {
        let mut groups: Vec<MixerGroupConfig> = Vec::new();
        for group in AudioGroup::ALL {
            let bus = format!("Master/{}", group.default_bus());
            if !groups.iter().any(|g| g.path == bus) {
                groups.push(MixerGroupConfig::new(bus.clone()));
            }
            groups.push(MixerGroupConfig::new(format!("{bus}/{}", group.name())));
        }

        Self {
            groups,
            parameters: vec![ExposedParameterConfig {
                name: MASTER_VOLUME_PARAM.to_string(),
                target: ParameterTarget::Master,
                value: 0.0,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AudioConfig::default();
        assert_eq!(config.master_volume, 1.0);
        assert_eq!(config.max_distance, 100.0);
        assert!(config.use_mixer);
    }

    #[test]
    fn default_mixer_has_a_group_per_category() {
        let mixer = MixerConfig::default();
        for group in AudioGroup::ALL {
            let suffix = format!("/{}", group.name());
            assert_eq!(
                mixer.groups.iter().filter(|g| g.path.ends_with(&suffix)).count(),
                1,
                "{group}"
            );
        }
        // Buses come before the groups routed into them
        let bus = mixer.groups.iter().position(|g| g.path == "Master/Weapons").unwrap();
        let leaf = mixer
            .groups
            .iter()
            .position(|g| g.path == "Master/Weapons/WeaponShoot")
            .unwrap();
        assert!(bus < leaf);
        assert_eq!(mixer.parameters.len(), 1);
        assert_eq!(mixer.parameters[0].name, MASTER_VOLUME_PARAM);
        assert_eq!(mixer.parameters[0].target, ParameterTarget::Master);
    }

    #[test]
    fn parses_from_toml() {
        let text = r#"
            master_volume = 0.5
            use_mixer = true

            [[mixer.groups]]
            path = "Master/Weapons"
            volume_db = -6.0

            [[mixer.groups]]
            path = "Master/Weapons/WeaponShoot"

            [[mixer.parameters]]
            name = "MasterVolume"
            target = "master"

            [[mixer.parameters]]
            name = "WeaponsVolume"
            target = { group = "Master/Weapons" }
            value = -3.0
        "#;
        let config: AudioConfig = toml::from_str(text).unwrap();
        assert_eq!(config.master_volume, 0.5);
        assert_eq!(config.max_distance, 100.0);
        assert_eq!(config.mixer.groups.len(), 2);
        assert_eq!(config.mixer.groups[0].volume_db, -6.0);
        assert_eq!(config.mixer.groups[1].volume_db, 0.0);
        assert_eq!(
            config.mixer.parameters[1].target,
            ParameterTarget::Group("Master/Weapons".into())
        );
        assert_eq!(config.mixer.parameters[1].value, -3.0);
    }

    #[test]
    fn empty_table_is_default() {
        let config: AudioConfig = toml::from_str("").unwrap();
        assert_eq!(config, AudioConfig::default());
    }
}
