use std::net::IpAddr;
use std::time::Duration;

use tracing::{info, warn};

use super::status::Status;
use super::types::Container;
use crate::docker::{Daemon, DockerCli, PortPoll, is_port_live, wait_for_port};
use crate::{Error, Result};

/// Lifecycle facade over one container.
///
/// Every method delegates straight to the daemon. Nothing is retried or
/// verified afterwards; read [`status`](Self::status) for that.
pub struct ContainerHandle<D: Daemon = DockerCli> {
    container: Container,
    daemon: D,
    id: Option<String>,
    status: Status,
}

impl<D: Daemon> ContainerHandle<D> {
    pub fn new(container: Container, daemon: D) -> Self {
        Self {
            container,
            daemon,
            id: None,
            status: Status::default(),
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn daemon(&self) -> &D {
        &self.daemon
    }

    /// Id printed by the daemon for a detached run.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The name, or failing that the id, used to address the container.
    pub fn reference(&self) -> Result<&str> {
        self.container
            .name
            .as_deref()
            .or(self.id.as_deref())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "container for image {} has neither a name nor an id",
                    self.container.image
                ))
            })
    }

    pub fn run(&mut self) -> Result<()> {
        let argv = self.container.run_argv();
        let stdout = self.daemon.run(&argv)?;
        if self.container.detach {
            let id = stdout.trim();
            if !id.is_empty() {
                self.id = Some(id.to_string());
            }
        }
        info!(image = %self.container.image, id = ?self.id, "container run");
        Ok(())
    }

    pub fn start(&self) -> Result<()> {
        let reference = self.reference()?;
        self.daemon.start(reference)?;
        info!(container = reference, "container started");
        Ok(())
    }

    pub fn stop(&self) -> Result<()> {
        let reference = self.reference()?;
        self.daemon.stop(reference)?;
        info!(container = reference, "container stopped");
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        let reference = self.reference()?;
        self.daemon.pause(reference)?;
        info!(container = reference, "container paused");
        Ok(())
    }

    pub fn unpause(&self) -> Result<()> {
        let reference = self.reference()?;
        self.daemon.unpause(reference)?;
        info!(container = reference, "container unpaused");
        Ok(())
    }

    pub fn remove(&self) -> Result<()> {
        let reference = self.reference()?;
        self.daemon.remove(reference)?;
        info!(container = reference, "container removed");
        Ok(())
    }

    /// Re-query the daemon and return the fresh status.
    ///
    /// A container the daemon does not know (or one with no reference yet)
    /// reads as absent.
    pub fn status(&mut self) -> Result<&Status> {
        let fresh = match self.reference() {
            Ok(reference) => Status::query(&self.daemon, reference)?,
            Err(_) => Status::default(),
        };
        self.status = fresh;
        Ok(&self.status)
    }

    /// Status as of the last [`status`](Self::status) call.
    pub fn last_status(&self) -> &Status {
        &self.status
    }

    fn ip(&mut self) -> Result<IpAddr> {
        let ip = self.status()?.ip;
        match ip {
            Some(ip) => Ok(ip),
            None => Err(Error::NoAddress(
                self.reference().unwrap_or(&self.container.image).to_string(),
            )),
        }
    }

    /// One bounded connect attempt against the container's IP.
    pub fn port_live(&mut self, port: u16, timeout: Duration) -> Result<bool> {
        let ip = self.ip()?;
        Ok(is_port_live(ip, port, timeout)?)
    }

    pub fn wait_for_port(&mut self, port: u16, timeout: Duration, poll: PortPoll) -> Result<()> {
        let ip = self.ip()?;
        wait_for_port(ip, port, timeout, poll)
    }

    /// Run `container`, hand it to `f`, and remove it on the way out.
    ///
    /// Removal happens whether `f` succeeds, fails or panics. If both `f` and
    /// removal fail, the error from `f` is returned. The container needs a
    /// name or `detach` so it can be addressed for removal.
    pub fn scoped<T, F>(container: Container, daemon: D, f: F) -> Result<T>
    where
        F: FnOnce(&mut ContainerHandle<D>) -> Result<T>,
    {
        // A foreground run prints no id, so without a name it cannot be removed.
        if container.name.is_none() && !container.detach {
            return Err(Error::InvalidArgument(format!(
                "scoped container for image {} needs a name or detach",
                container.image
            )));
        }
        let mut guard = RemoveOnDrop {
            handle: ContainerHandle::new(container, daemon),
            armed: false,
        };
        guard.handle.run()?;
        guard.armed = true;

        let result = f(&mut guard.handle);
        guard.armed = false;
        let removal = guard.handle.remove();

        match (result, removal) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup)) => {
                warn!(error = %cleanup, "failed to remove container after error");
                Err(e)
            }
        }
    }
}

struct RemoveOnDrop<D: Daemon> {
    handle: ContainerHandle<D>,
    armed: bool,
}

impl<D: Daemon> Drop for RemoveOnDrop<D> {
    fn drop(&mut self) {
        if self.armed
            && let Err(e) = self.handle.remove()
        {
            warn!(error = %e, "failed to remove container during unwind");
        }
    }
}
