//! Lifecycle configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Settings for a [`ConnectionLifecycle`](crate::ConnectionLifecycle).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Region codes in a fixed order. A [`SessionCode`](crate::SessionCode)
    /// stores an index into this list.
    pub available_regions: Vec<String>,
    /// Used when a request asks for zero players.
    pub default_max_players: usize,
    /// A scene whose name contains this marker always runs shared.
    pub shared_scene_marker: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            available_regions: ["asia", "eu", "jp", "kr", "sa", "us", "usw"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            default_max_players: 12,
            shared_scene_marker: "Shared".into(),
        }
    }
}

impl LifecycleConfig {
    /// Clamps values the lifecycle cannot work with.
    pub fn validated(mut self) -> Self {
        if self.default_max_players == 0 {
            warn!("default_max_players of 0 is invalid, using 1");
            self.default_max_players = 1;
        }
        let limit = crate::SessionCode::MAX_REGIONS;
        if self.available_regions.len() > limit {
            warn!(
                regions = self.available_regions.len(),
                limit, "too many regions for session codes, truncating"
            );
            self.available_regions.truncate(limit);
        }
        self
    }

    /// Index of `region` in [`available_regions`](Self::available_regions).
    pub fn region_index(&self, region: &str) -> Option<usize> {
        self.available_regions.iter().position(|r| r == region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_zero_players_clamped() {
        let config = LifecycleConfig {
            default_max_players: 0,
            ..Default::default()
        }
        .validated();
        assert_eq!(config.default_max_players, 1);
    }

    #[test]
    fn test_region_index_known_and_unknown() {
        let config = LifecycleConfig::default();
        assert_eq!(config.region_index("asia"), Some(0));
        assert_eq!(config.region_index("us"), Some(5));
        assert_eq!(config.region_index("mars"), None);
    }
}
