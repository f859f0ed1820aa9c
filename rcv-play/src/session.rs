//! Playback session manager
//!
//! Owns the track catalog configuration and the handle to the one external
//! player this receiver controls. States are `Idle` (no handle) and `Playing`
//! (one handle):
//!
//! - `play(n)` with a valid `n` stops any current player, then starts a new one
//! - `play(n)` with an unknown `n` changes nothing and reports `NotFound`
//! - `stop()` is a no-op when idle
//!
//! Every mutating operation holds the session lock for its full duration, so
//! overlapping requests from the HTTP layer are serialised and at most one
//! player is ever alive.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::{build_catalog, file_name_of, Catalog, CatalogConfig};
use crate::error::Result;
use crate::player::{ExternalPlayer, PlayerLauncher, PlayerProcess};

/// How to start and stop the external player
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Time allowed between the graceful stop request and a forced kill
    pub stop_grace: Duration,
}

/// Result of a play request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A player was started for this track
    Started { track_number: u32, file_name: String },
    /// No such track in the current catalog; nothing changed
    NotFound,
}

impl PlayOutcome {
    pub fn started(&self) -> bool {
        matches!(self, PlayOutcome::Started { .. })
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            PlayOutcome::Started { file_name, .. } => Some(file_name),
            PlayOutcome::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Playing,
}

/// Snapshot of the session for the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
}

impl SessionStatus {
    fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            track_number: None,
            file_name: None,
            pid: None,
        }
    }
}

struct ActiveSession {
    track_number: u32,
    file_path: PathBuf,
    process: Box<dyn PlayerProcess>,
}

/// Direction for next/previous
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Back,
}

pub struct SessionManager {
    catalog: CatalogConfig,
    launcher: Arc<dyn PlayerLauncher>,
    stop_grace: Duration,
    active: Mutex<Option<ActiveSession>>,
}

impl SessionManager {
    pub fn new(
        catalog: CatalogConfig,
        launcher: Arc<dyn PlayerLauncher>,
        stop_grace: Duration,
    ) -> Self {
        Self {
            catalog,
            launcher,
            stop_grace,
            active: Mutex::new(None),
        }
    }

    /// Session manager driving a real executable
    pub fn with_external_player(catalog: CatalogConfig, player: PlayerConfig) -> Self {
        let launcher = Arc::new(ExternalPlayer::new(player.command, player.args));
        Self::new(catalog, launcher, player.stop_grace)
    }

    /// Current catalog, rebuilt from the directory
    pub fn catalog(&self) -> Result<Catalog> {
        build_catalog(&self.catalog)
    }

    /// Play a track by number
    ///
    /// Directory and launch failures are returned as errors. A missing track is
    /// `Ok(PlayOutcome::NotFound)` and leaves the current session untouched.
    pub async fn play(&self, track_number: u32) -> Result<PlayOutcome> {
        let mut active = self.active.lock().await;
        self.play_locked(&mut active, track_number).await
    }

    /// Stop the current player, if any
    pub async fn stop(&self) {
        let mut active = self.active.lock().await;
        self.stop_locked(&mut active).await;
    }

    /// Play the track after the current one
    ///
    /// `Ok(None)` when idle; `NotFound` when the current track is the last.
    pub async fn next(&self) -> Result<Option<PlayOutcome>> {
        self.step(Step::Forward).await
    }

    /// Play the track before the current one
    pub async fn previous(&self) -> Result<Option<PlayOutcome>> {
        self.step(Step::Back).await
    }

    /// Snapshot of the session, dropping the handle of a player that exited on its own
    pub async fn status(&self) -> SessionStatus {
        let mut active = self.active.lock().await;

        if let Some(session) = active.as_mut() {
            match session.process.try_exited() {
                Ok(true) => {
                    info!(
                        "Player for track {} exited on its own",
                        session.track_number
                    );
                    *active = None;
                }
                Ok(false) => {}
                Err(e) => warn!("Failed to poll player process: {}", e),
            }
        }

        match active.as_ref() {
            Some(session) => SessionStatus {
                state: SessionState::Playing,
                track_number: Some(session.track_number),
                file_name: Some(file_name_of(&session.file_path)),
                pid: session.process.id(),
            },
            None => SessionStatus::idle(),
        }
    }

    /// Stop playback before the receiver exits
    pub async fn shutdown(&self) {
        info!("Stopping playback for shutdown");
        self.stop().await;
    }

    async fn step(&self, step: Step) -> Result<Option<PlayOutcome>> {
        let mut active = self.active.lock().await;

        let Some(current) = active.as_ref().map(|s| s.track_number) else {
            debug!("{:?} requested while idle", step);
            return Ok(None);
        };

        let target = match step {
            Step::Forward => current.checked_add(1),
            Step::Back => current.checked_sub(1).filter(|n| *n >= 1),
        };

        match target {
            Some(n) => self.play_locked(&mut active, n).await.map(Some),
            None => Ok(Some(PlayOutcome::NotFound)),
        }
    }

    async fn play_locked(
        &self,
        active: &mut Option<ActiveSession>,
        track_number: u32,
    ) -> Result<PlayOutcome> {
        let catalog = build_catalog(&self.catalog)?;

        let Some(path) = catalog.get(track_number) else {
            info!(
                "Track {} not found ({} tracks available)",
                track_number,
                catalog.len()
            );
            return Ok(PlayOutcome::NotFound);
        };
        let file_path = path.to_path_buf();

        self.stop_locked(active).await;

        let process = self.launcher.launch(&file_path)?;
        let file_name = file_name_of(&file_path);
        info!(
            track = track_number,
            pid = ?process.id(),
            "Started player for {}",
            file_name
        );

        *active = Some(ActiveSession {
            track_number,
            file_path,
            process,
        });

        Ok(PlayOutcome::Started {
            track_number,
            file_name,
        })
    }

    /// Take the handle out first so it is cleared on every path
    async fn stop_locked(&self, active: &mut Option<ActiveSession>) {
        let Some(mut session) = active.take() else {
            return;
        };

        info!("Stopping player for track {}", session.track_number);
        stop_process(session.process.as_mut(), self.stop_grace).await;
    }
}

/// Graceful stop, escalating to a kill after `grace`
///
/// Never fails: escalation and kill errors are logged.
async fn stop_process(process: &mut dyn PlayerProcess, grace: Duration) {
    let pid = process.id();

    if let Err(e) = process.terminate().await {
        warn!(?pid, "Graceful stop request failed ({}), killing player", e);
        force_kill(process).await;
        return;
    }

    let waited = tokio::time::timeout(grace, process.wait()).await;
    match waited {
        Ok(Ok(())) => debug!(?pid, "Player exited"),
        Ok(Err(e)) => {
            warn!(?pid, "Waiting for player failed ({}), killing player", e);
            force_kill(process).await;
        }
        Err(_) => {
            warn!(
                ?pid,
                "Player did not exit within {:?}, killing player", grace
            );
            force_kill(process).await;
        }
    }
}

async fn force_kill(process: &mut dyn PlayerProcess) {
    if let Err(e) = process.kill().await {
        warn!(pid = ?process.id(), "Failed to kill player: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use rcv_common::config::DEFAULT_EXTENSIONS;
    use std::path::Path;

    /// Launcher that must never be reached
    struct UnreachableLauncher;

    impl PlayerLauncher for UnreachableLauncher {
        fn launch(&self, file: &Path) -> Result<Box<dyn PlayerProcess>> {
            panic!("unexpected launch of {}", file.display());
        }
    }

    fn manager_for(dir: &Path) -> SessionManager {
        SessionManager::new(
            CatalogConfig::new(dir, &DEFAULT_EXTENSIONS),
            Arc::new(UnreachableLauncher),
            Duration::from_millis(50),
        )
    }

    #[test]
    fn test_outcome_accessors() {
        let started = PlayOutcome::Started {
            track_number: 2,
            file_name: "b.mp3".to_string(),
        };
        assert!(started.started());
        assert_eq!(started.file_name(), Some("b.mp3"));

        assert!(!PlayOutcome::NotFound.started());
        assert_eq!(PlayOutcome::NotFound.file_name(), None);
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_for(dir.path());

        manager.stop().await;
        manager.stop().await;

        assert_eq!(manager.status().await.state, SessionState::Idle);
    }

    #[tokio::test]
    async fn test_not_found_does_not_launch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let manager = manager_for(dir.path());

        assert_eq!(manager.play(0).await.unwrap(), PlayOutcome::NotFound);
        assert_eq!(manager.play(2).await.unwrap(), PlayOutcome::NotFound);
        assert_eq!(manager.status().await, SessionStatus::idle());
    }

    #[tokio::test]
    async fn test_transitions_when_idle_do_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let manager = manager_for(dir.path());

        assert_eq!(manager.next().await.unwrap(), None);
        assert_eq!(manager.previous().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_directory_is_error() {
        let manager = manager_for(Path::new("/nonexistent/rcv/media"));
        let result = manager.play(1).await;
        assert!(matches!(result, Err(PlaybackError::DirectoryAccess { .. })));
    }

    #[test]
    fn test_status_serialization() {
        let idle = serde_json::to_value(SessionStatus::idle()).unwrap();
        assert_eq!(idle, serde_json::json!({"state": "idle"}));

        let playing = SessionStatus {
            state: SessionState::Playing,
            track_number: Some(2),
            file_name: Some("b.mp3".to_string()),
            pid: None,
        };
        let value = serde_json::to_value(playing).unwrap();
        assert_eq!(value["state"], "playing");
        assert_eq!(value["track_number"], 2);
        assert_eq!(value["file_name"], "b.mp3");
        assert!(value.get("pid").is_none());
    }
}
