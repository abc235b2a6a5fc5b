//! Mixer routing groups and exposed volume parameters.

use std::collections::HashSet;

use tracing::debug;

use crate::backend::{AudioBackend, GroupId};
use crate::config::{MixerConfig, ParameterTarget};
use crate::error::AudioError;

#[derive(Debug, Clone)]
struct MixerGroup {
    path: String,
    id: GroupId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Master,
    Group(GroupId),
}

#[derive(Debug, Clone)]
struct ExposedParameter {
    name: String,
    binding: Binding,
    value: f32,
}

/// Routing groups created on a backend, plus named dB parameters bound to
/// bus volumes.
#[derive(Debug, Clone)]
pub struct Mixer {
    groups: Vec<MixerGroup>,
    parameters: Vec<ExposedParameter>,
}

impl Mixer {
    /// Create every group in `config` on the backend and apply the initial
    /// parameter values.
    pub fn build<A: AudioBackend>(config: &MixerConfig, backend: &mut A) -> Result<Self, AudioError> {
        let parents = resolve_parents(config)?;

        let mut groups: Vec<MixerGroup> = Vec::with_capacity(config.groups.len());
        for (group, parent) in config.groups.iter().zip(parents) {
            let parent = parent.map(|index| groups[index].id);
            let id = match backend.create_group(parent, group.volume_db) {
                Ok(id) => id,
                Err(e) => {
                    release_groups(backend, &groups);
                    return Err(e);
                }
            };
            groups.push(MixerGroup {
                path: group.path.clone(),
                id,
            });
        }

        let parameters = match bind_parameters(config, &groups) {
            Ok(parameters) => parameters,
            Err(e) => {
                release_groups(backend, &groups);
                return Err(e);
            }
        };

        let mixer = Self { groups, parameters };
        for param in &mixer.parameters {
            apply(backend, param.binding, param.value);
        }

        debug!(
            groups = mixer.groups.len(),
            parameters = mixer.parameters.len(),
            "mixer built"
        );
        Ok(mixer)
    }

    /// All groups whose path is `query` or ends in `/query`, in layout order.
    pub fn find_matching_groups(&self, query: &str) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|g| path_matches(&g.path, query))
            .map(|g| g.id)
            .collect()
    }

    /// Path of a group created by this mixer.
    pub fn group_path(&self, id: GroupId) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.path.as_str())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Remove every group from the backend, children before their parents.
    pub fn release<A: AudioBackend>(self, backend: &mut A) {
        release_groups(backend, &self.groups);
        debug!(groups = self.groups.len(), "mixer released");
    }

    /// Set an exposed parameter (dB) and push it to the backend.
    /// Returns `false` if no parameter has that name.
    pub fn set_float<A: AudioBackend>(&mut self, backend: &mut A, name: &str, value: f32) -> bool {
        let Some(param) = self.parameters.iter_mut().find(|p| p.name == name) else {
            return false;
        };
        param.value = value;
        apply(backend, param.binding, value);
        true
    }

    /// Current value of an exposed parameter, in dB.
    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }
}

fn release_groups<A: AudioBackend>(backend: &mut A, groups: &[MixerGroup]) {
    for group in groups.iter().rev() {
        backend.release_group(group.id);
    }
}

fn apply<A: AudioBackend>(backend: &mut A, binding: Binding, value: f32) {
    match binding {
        Binding::Master => backend.set_master_volume_db(value),
        Binding::Group(id) => backend.set_group_volume(id, value),
    }
}

/// Resolve every exposed parameter's target against the built groups.
fn bind_parameters(
    config: &MixerConfig,
    groups: &[MixerGroup],
) -> Result<Vec<ExposedParameter>, AudioError> {
    let mut names = HashSet::new();
    let mut parameters = Vec::with_capacity(config.parameters.len());
    for param in &config.parameters {
        if !names.insert(param.name.as_str()) {
            return Err(AudioError::InvalidConfig(format!(
                "parameter '{}' is exposed twice",
                param.name
            )));
        }
        let binding = match &param.target {
            ParameterTarget::Master => Binding::Master,
            ParameterTarget::Group(path) => groups
                .iter()
                .find(|g| &g.path == path)
                .map(|g| Binding::Group(g.id))
                .ok_or_else(|| {
                    AudioError::InvalidConfig(format!(
                        "parameter '{}' targets unknown group '{path}'",
                        param.name
                    ))
                })?,
        };
        parameters.push(ExposedParameter {
            name: param.name.clone(),
            binding,
            value: param.value,
        });
    }
    Ok(parameters)
}

fn path_matches(path: &str, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    match path.strip_suffix(query) {
        Some("") => true,
        Some(rest) => rest.ends_with('/'),
        None => false,
    }
}

/// For each group, the index of the group it routes into.
fn resolve_parents(config: &MixerConfig) -> Result<Vec<Option<usize>>, AudioError> {
    let mut seen = HashSet::new();
    for group in &config.groups {
        if group.path.is_empty() || group.path.split('/').any(str::is_empty) {
            return Err(AudioError::InvalidConfig(format!(
                "malformed group path '{}'",
                group.path
            )));
        }
        if !seen.insert(group.path.as_str()) {
            return Err(AudioError::InvalidConfig(format!(
                "group '{}' is listed twice",
                group.path
            )));
        }
    }

    config
        .groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let parent = config
                .groups
                .iter()
                .enumerate()
                .filter(|(_, candidate)| is_ancestor(&candidate.path, &group.path))
                .max_by_key(|(_, candidate)| candidate.path.len())
                .map(|(i, _)| i);

            match parent {
                Some(parent) if parent > index => Err(AudioError::InvalidConfig(format!(
                    "group '{}' is listed before its parent '{}'",
                    group.path, config.groups[parent].path
                ))),
                parent => Ok(parent),
            }
        })
        .collect()
}

fn is_ancestor(ancestor: &str, path: &str) -> bool {
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}
