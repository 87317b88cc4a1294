//! Host configuration.

use climbnet_roster::RosterConfig;
use climbnet_session::LifecycleConfig;
use climbnet_sim::ControllerConfig;
use climbnet_tick::TickConfig;
use serde::{Deserialize, Serialize};

use crate::ClimbnetError;

/// Everything a [`Host`](crate::Host) and its lifecycle need.
///
/// Every section is optional in JSON; missing ones take their defaults.
///
/// ```rust
/// use climbnet::HostConfig;
///
/// let config = HostConfig::from_json(r#"{ "roster": { "capacity": 4 } }"#)?;
/// assert_eq!(config.roster.capacity, 4);
/// assert_eq!(config.tick.tick_rate_hz, 60);
/// # Ok::<(), climbnet::ClimbnetError>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub roster: RosterConfig,
    pub controller: ControllerConfig,
    pub tick: TickConfig,
    pub lifecycle: LifecycleConfig,
}

impl HostConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// [`ClimbnetError::Config`] on malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, ClimbnetError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Clamps every section.
    pub fn validated(self) -> Self {
        Self {
            roster: self.roster.validated(),
            controller: self.controller.validated(),
            tick: self.tick.validated(),
            lifecycle: self.lifecycle.validated(),
        }
    }
}
