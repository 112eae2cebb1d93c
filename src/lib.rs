//! Declarative rendering of `docker` command lines and a small, blocking
//! facade over the container lifecycle.
//!
//! [`cmdargs`] turns ordered argument descriptors plus a name-to-value map
//! into a command-line string. [`container`] builds on it: a typed
//! [`Container`] projects into `docker run` arguments or API-shaped
//! payloads, and [`ContainerHandle`] drives run/start/stop/pause/remove
//! through a [`Daemon`].

pub mod cmdargs;
pub mod config;
pub mod container;
pub mod docker;
mod error;

pub use container::{Container, ContainerHandle, Status};
pub use docker::{Daemon, DockerCli};
pub use error::{Error, Result};
