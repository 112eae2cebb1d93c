use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use super::types::Daemon;
use crate::config::Settings;
use crate::{Error, Result};

/// [`Daemon`] backed by the `docker` command-line client.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.docker_binary)
    }

    /// Verify that the Docker daemon is reachable.
    pub fn ensure_available(&self) -> Result<()> {
        self.exec(&["version", "--format", "{{.Server.Version}}"])
            .map(|_| ())
    }

    fn exec(&self, args: &[&str]) -> Result<String> {
        debug!(binary = %self.binary.display(), ?args, "invoking docker");
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(Error::Daemon {
                command: args.first().copied().unwrap_or_default().to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Verify that the default `docker` binary can reach a daemon.
pub fn ensure_available() -> Result<()> {
    DockerCli::default().ensure_available()
}

fn is_not_found(stderr: &str) -> bool {
    stderr.contains("No such container") || stderr.contains("No such object")
}

impl Daemon for DockerCli {
    fn run(&self, args: &[String]) -> Result<String> {
        let mut argv = vec!["run"];
        argv.extend(args.iter().map(String::as_str));
        self.exec(&argv)
    }

    fn start(&self, reference: &str) -> Result<()> {
        self.exec(&["start", reference]).map(|_| ())
    }

    fn stop(&self, reference: &str) -> Result<()> {
        self.exec(&["stop", reference]).map(|_| ())
    }

    fn pause(&self, reference: &str) -> Result<()> {
        self.exec(&["pause", reference]).map(|_| ())
    }

    fn unpause(&self, reference: &str) -> Result<()> {
        self.exec(&["unpause", reference]).map(|_| ())
    }

    fn remove(&self, reference: &str) -> Result<()> {
        self.exec(&["rm", "-f", reference]).map(|_| ())
    }

    fn inspect(&self, reference: &str) -> Result<Option<serde_json::Value>> {
        match self.exec(&["inspect", "--type", "container", reference]) {
            Ok(stdout) => {
                let entries: Vec<serde_json::Value> = serde_json::from_str(&stdout)?;
                Ok(entries.into_iter().next())
            }
            Err(Error::Daemon { stderr, .. }) if is_not_found(&stderr) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
