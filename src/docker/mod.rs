// Docker engine access: the daemon seam, the CLI-backed daemon, port probing.

pub mod engine;
pub mod port;
pub mod types;

pub use engine::{DockerCli, ensure_available};
pub use port::{PortPoll, is_port_live, wait_for_port};
pub use types::Daemon;
