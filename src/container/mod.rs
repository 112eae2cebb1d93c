// Container configuration, marshal groups, status, and the lifecycle facade.

pub mod coerce;
mod handle;
mod marshal;
mod status;
mod types;

pub use handle::ContainerHandle;
pub use marshal::{CreateContainer, Group, HostConfig, Marshalled, RUN_ARGS};
pub use status::Status;
pub use types::{Container, ContainerBuilder};
