//! External player processes
//!
//! The session manager talks to the player through two traits so that the
//! process lifecycle can be driven without a real media player:
//! - [`PlayerLauncher`] starts a player for one media file
//! - [`PlayerProcess`] is the handle to a running player

use std::io;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};

use crate::error::{PlaybackError, Result};

/// Handle to one running player
#[async_trait]
pub trait PlayerProcess: Send {
    /// OS process id, if the process has not been reaped
    fn id(&self) -> Option<u32>;

    /// Ask the player to exit (SIGTERM on Unix)
    async fn terminate(&mut self) -> io::Result<()>;

    /// Wait until the player has exited
    async fn wait(&mut self) -> io::Result<()>;

    /// Force the player to exit and reap it
    async fn kill(&mut self) -> io::Result<()>;

    /// Non-blocking check whether the player already exited
    fn try_exited(&mut self) -> io::Result<bool>;
}

/// Starts a player for a media file
pub trait PlayerLauncher: Send + Sync {
    fn launch(&self, file: &Path) -> Result<Box<dyn PlayerProcess>>;
}

/// Launches an executable with the media path as its last argument
///
/// `vlc /media/b.mp3` by default; `args` go between the program and the path.
#[derive(Debug, Clone)]
pub struct ExternalPlayer {
    program: String,
    args: Vec<String>,
}

impl ExternalPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl PlayerLauncher for ExternalPlayer {
    fn launch(&self, file: &Path) -> Result<Box<dyn PlayerProcess>> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PlaybackError::ProcessLaunch {
                program: self.program.clone(),
                source,
            })?;

        Ok(Box::new(ChildProcess { child }))
    }
}

/// A spawned player process
#[derive(Debug)]
pub struct ChildProcess {
    child: Child,
}

#[async_trait]
impl PlayerProcess for ChildProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    #[cfg(unix)]
    async fn terminate(&mut self) -> io::Result<()> {
        // Already reaped
        let Some(pid) = self.child.id() else {
            return Ok(());
        };

        let status = Command::new("kill")
            .arg("-TERM")
            .arg(pid.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("kill -TERM {} exited with {}", pid, status),
            ))
        }
    }

    /// No graceful signal outside Unix; terminate and kill coincide
    #[cfg(not(unix))]
    async fn terminate(&mut self) -> io::Result<()> {
        self.child.start_kill()
    }

    async fn wait(&mut self) -> io::Result<()> {
        self.child.wait().await.map(|_| ())
    }

    async fn kill(&mut self) -> io::Result<()> {
        self.child.kill().await
    }

    fn try_exited(&mut self) -> io::Result<bool> {
        Ok(self.child.try_wait()?.is_some())
    }
}
