#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Coordinate convention requested by the embedding page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpaceSetting {
    #[default]
    Pixels,
    Normalized,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeedSetting {
    #[default]
    Center,
    Uniform,
}

/// Optional overrides supplied by the host page when mounting the mesh.
///
/// Every field may be omitted; missing values fall back to the defaults of
/// the chosen coordinate space.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MeshSettings {
    pub space: SpaceSetting,
    pub seed: SeedSetting,
    pub node_count: Option<usize>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub mouse_radius: Option<f64>,
    pub damping: Option<f64>,
    pub node_radius: Option<f64>,
    pub background: Option<String>,
    pub stroke: Option<String>,
    pub line_width: Option<f64>,
    pub draw_nodes: Option<bool>,
    pub disc_radius: Option<f64>,
}

#[cfg(feature = "std")]
impl MeshSettings {
    /// Parse settings from JSON. An empty string means "all defaults".
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }
}

/// Snapshot of a running mesh reported back to the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineStatus {
    pub running: bool,
    pub node_count: usize,
    pub frames_rendered: u64,
    pub pointer_active: bool,
}

#[cfg(feature = "std")]
impl EngineStatus {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_are_default() {
        assert_eq!(MeshSettings::from_json("").unwrap(), MeshSettings::default());
        assert_eq!(MeshSettings::from_json("{}").unwrap(), MeshSettings::default());
    }

    #[test]
    fn test_partial_settings() {
        let settings =
            MeshSettings::from_json(r##"{"space":"normalized","nodeCount":40,"background":"#123"}"##)
                .unwrap();
        assert_eq!(settings.space, SpaceSetting::Normalized);
        assert_eq!(settings.node_count, Some(40));
        assert_eq!(settings.background.as_deref(), Some("#123"));
        assert_eq!(settings.max_speed, None);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(MeshSettings::from_json(r#"{"nodeCnt":40}"#).is_err());
    }

    #[test]
    fn test_status_json() {
        let status = EngineStatus {
            running: true,
            node_count: 100,
            frames_rendered: 12,
            pointer_active: false,
        };
        assert_eq!(
            status.to_json().unwrap(),
            r#"{"running":true,"nodeCount":100,"framesRendered":12,"pointerActive":false}"#
        );
    }
}
