//! Connect requests and game-mode selection.

use serde::{Deserialize, Serialize};

/// How the transport should run the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Every peer simulates its own entities; no single authority.
    Shared,
    /// This process creates the session and is its authority.
    Host,
    /// This process joins an existing session by name.
    Client,
    /// Let the transport's matchmaking pick host or client.
    AutoHostOrClient,
}

/// The scene a session runs in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneRef {
    pub name: String,
    pub path: String,
}

impl SceneRef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A connect request, as it comes from a menu or a command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectArgs {
    /// Create a new session rather than join one.
    pub creating: bool,
    /// Session to join. `None` (or empty) when creating or quick-joining.
    pub session: Option<String>,
    pub region: String,
    pub max_players: usize,
    pub app_version: String,
    pub scene: SceneRef,
}

impl ConnectArgs {
    /// The session name, treating an empty string as absent.
    pub fn session_name(&self) -> Option<&str> {
        self.session.as_deref().filter(|s| !s.is_empty())
    }

    /// Picks the game mode for this request.
    ///
    /// A scene whose name contains `shared_marker` always runs shared.
    /// Otherwise: creating → host, joining by name → client, joining
    /// without a name (quick-join) → auto host-or-client.
    pub fn game_mode(&self, shared_marker: &str) -> GameMode {
        if !shared_marker.is_empty() && self.scene.name.contains(shared_marker) {
            return GameMode::Shared;
        }
        if self.creating {
            GameMode::Host
        } else if self.session_name().is_none() {
            GameMode::AutoHostOrClient
        } else {
            GameMode::Client
        }
    }
}
