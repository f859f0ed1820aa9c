//! Shared test helpers: a scripted player and media directory fixtures

#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rcv_common::config::DEFAULT_EXTENSIONS;
use rcv_play::catalog::{file_name_of, CatalogConfig};
use rcv_play::player::{PlayerLauncher, PlayerProcess};
use rcv_play::{PlaybackError, SessionManager};
use tempfile::TempDir;
use tokio::sync::watch;

/// How scripted players react to a stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Exits on terminate
    Cooperative,
    /// Ignores terminate; only a kill stops it
    IgnoresTerminate,
    /// Terminate itself returns an error
    TerminateFails,
}

/// Shared log of lifecycle calls, e.g. "terminate:a.mp3"
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub struct FakeProcess {
    id: u32,
    name: String,
    behavior: Behavior,
    exited: Arc<watch::Sender<bool>>,
    events: EventLog,
}

impl FakeProcess {
    fn record(&self, what: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:{}", what, self.name));
    }
}

#[async_trait]
impl PlayerProcess for FakeProcess {
    fn id(&self) -> Option<u32> {
        if *self.exited.borrow() {
            None
        } else {
            Some(self.id)
        }
    }

    async fn terminate(&mut self) -> io::Result<()> {
        self.record("terminate");
        match self.behavior {
            Behavior::Cooperative => {
                self.exited.send_replace(true);
                Ok(())
            }
            Behavior::IgnoresTerminate => Ok(()),
            Behavior::TerminateFails => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "signal refused",
            )),
        }
    }

    async fn wait(&mut self) -> io::Result<()> {
        let mut rx = self.exited.subscribe();
        loop {
            if *rx.borrow_and_update() {
                return Ok(());
            }
            rx.changed()
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "player handle dropped"))?;
        }
    }

    async fn kill(&mut self) -> io::Result<()> {
        self.record("kill");
        self.exited.send_replace(true);
        Ok(())
    }

    fn try_exited(&mut self) -> io::Result<bool> {
        Ok(*self.exited.borrow())
    }
}

struct Launch {
    file: PathBuf,
    exited: Arc<watch::Sender<bool>>,
}

/// Launcher handing out scripted players and recording every launch
pub struct FakeLauncher {
    behavior: Behavior,
    /// Launch attempts from this index on fail
    fail_from: Option<usize>,
    launches: Mutex<Vec<Launch>>,
    events: EventLog,
}

impl FakeLauncher {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            fail_from: None,
            launches: Mutex::new(Vec::new()),
            events: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Every launch fails as if the executable were missing
    pub fn failing() -> Arc<Self> {
        Self::failing_from(0)
    }

    pub fn failing_from(index: usize) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Cooperative,
            fail_from: Some(index),
            launches: Mutex::new(Vec::new()),
            events: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Files launched, in order
    pub fn launched(&self) -> Vec<PathBuf> {
        self.launches
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.file.clone())
            .collect()
    }

    /// Base names launched, in order
    pub fn launched_names(&self) -> Vec<String> {
        self.launched().iter().map(|p| file_name_of(p)).collect()
    }

    pub fn has_exited(&self, index: usize) -> bool {
        *self.launches.lock().unwrap()[index].exited.borrow()
    }

    /// Players still running
    pub fn running(&self) -> usize {
        self.launches
            .lock()
            .unwrap()
            .iter()
            .filter(|l| !*l.exited.borrow())
            .count()
    }

    /// Simulate the player exiting on its own (end of file, window closed)
    pub fn finish(&self, index: usize) {
        self.launches.lock().unwrap()[index].exited.send_replace(true);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl PlayerLauncher for FakeLauncher {
    fn launch(&self, file: &Path) -> rcv_play::Result<Box<dyn PlayerProcess>> {
        let mut launches = self.launches.lock().unwrap();

        if let Some(from) = self.fail_from {
            if launches.len() >= from {
                return Err(PlaybackError::ProcessLaunch {
                    program: "fake-player".to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
                });
            }
        }

        let (tx, _rx) = watch::channel(false);
        let exited = Arc::new(tx);
        launches.push(Launch {
            file: file.to_path_buf(),
            exited: Arc::clone(&exited),
        });

        Ok(Box::new(FakeProcess {
            id: 1000 + launches.len() as u32,
            name: file_name_of(file),
            behavior: self.behavior,
            exited,
            events: Arc::clone(&self.events),
        }))
    }
}

/// Temporary media directory containing empty files with the given names
pub fn media_dir(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    for name in names {
        std::fs::write(dir.path().join(name), b"").expect("Should create media file");
    }
    dir
}

pub fn manager(dir: &Path, launcher: Arc<FakeLauncher>, grace: Duration) -> SessionManager {
    SessionManager::new(CatalogConfig::new(dir, &DEFAULT_EXTENSIONS), launcher, grace)
}
