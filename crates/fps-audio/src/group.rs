//! Sound effect categories used to pick a mixer routing group.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a sound effect. The variant name is the key used to find the
/// matching group in the mixer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum AudioGroup {
    DamageTick,
    Impact,
    EnemyDetection,
    Pickup,
    WeaponShoot,
    WeaponOverheat,
    WeaponChargeBuildup,
    WeaponChargeLoop,
    HUDVictory,
    HUDObjective,
    EnemyAttack,
}

impl AudioGroup {
    /// Every category, in declaration order.
    pub const ALL: [AudioGroup; 11] = [
        AudioGroup::DamageTick,
        AudioGroup::Impact,
        AudioGroup::EnemyDetection,
        AudioGroup::Pickup,
        AudioGroup::WeaponShoot,
        AudioGroup::WeaponOverheat,
        AudioGroup::WeaponChargeBuildup,
        AudioGroup::WeaponChargeLoop,
        AudioGroup::HUDVictory,
        AudioGroup::HUDObjective,
        AudioGroup::EnemyAttack,
    ];

    /// Lookup key for the mixer (the variant name).
    pub fn name(self) -> &'static str {
        match self {
            AudioGroup::DamageTick => "DamageTick",
            AudioGroup::Impact => "Impact",
            AudioGroup::EnemyDetection => "EnemyDetection",
            AudioGroup::Pickup => "Pickup",
            AudioGroup::WeaponShoot => "WeaponShoot",
            AudioGroup::WeaponOverheat => "WeaponOverheat",
            AudioGroup::WeaponChargeBuildup => "WeaponChargeBuildup",
            AudioGroup::WeaponChargeLoop => "WeaponChargeLoop",
            AudioGroup::HUDVictory => "HUDVictory",
            AudioGroup::HUDObjective => "HUDObjective",
            AudioGroup::EnemyAttack => "EnemyAttack",
        }
    }

    /// Bus this category sits under in the default mixer layout.
    pub fn default_bus(self) -> &'static str {
        match self {
            AudioGroup::WeaponShoot
            | AudioGroup::WeaponOverheat
            | AudioGroup::WeaponChargeBuildup
            | AudioGroup::WeaponChargeLoop => "Weapons",
            AudioGroup::HUDVictory | AudioGroup::HUDObjective => "HUD",
            AudioGroup::EnemyDetection | AudioGroup::EnemyAttack => "Enemies",
            AudioGroup::DamageTick | AudioGroup::Impact | AudioGroup::Pickup => "SFX",
        }
    }
}

impl fmt::Display for AudioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string isn't the name of any [`AudioGroup`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown audio group '{0}'")]
pub struct UnknownAudioGroup(pub String);

impl FromStr for AudioGroup {
    type Err = UnknownAudioGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AudioGroup::ALL
            .into_iter()
            .find(|group| group.name() == s)
            .ok_or_else(|| UnknownAudioGroup(s.to_string()))
    }
}
