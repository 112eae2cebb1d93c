//! Integration tests against a real Docker daemon.
//!
//! These require a running Docker daemon and are marked `#[ignore]`.
//! Run with: `cargo test -- --ignored`

use std::time::Duration;

use dockerman::docker::{PortPoll, ensure_available};
use dockerman::{Container, ContainerHandle, DockerCli, Status};

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("dockerman-{prefix}-{}-{nanos}", std::process::id())
}

fn sleeper(name: &str) -> Container {
    Container::builder("alpine:3")
        .name(name)
        .detach(true)
        .command("sleep 300")
        .build()
        .expect("valid container")
}

#[test]
#[ignore]
fn daemon_is_available() {
    ensure_available().expect("docker daemon should be reachable");
}

#[test]
#[ignore]
fn start_stop_pause_remove() {
    let name = unique_name("lifecycle");
    let mut c = ContainerHandle::new(sleeper(&name), DockerCli::default());
    assert!(!c.status().unwrap().exists);

    c.run().unwrap();
    let s = c.status().unwrap();
    assert!(s.exists && s.running && !s.paused);

    c.pause().unwrap();
    let s = c.status().unwrap();
    assert!(s.exists && s.running && s.paused);

    c.unpause().unwrap();
    let s = c.status().unwrap();
    assert!(s.exists && s.running && !s.paused);

    c.stop().unwrap();
    let s = c.status().unwrap();
    assert!(s.exists && !s.running && !s.paused);

    c.start().unwrap();
    let s = c.status().unwrap();
    assert!(s.exists && s.running && !s.paused);

    c.remove().unwrap();
    assert_eq!(c.status().unwrap(), &Status::default());
}

#[test]
#[ignore]
fn missing_container_is_absent() {
    let status = Status::query(&DockerCli::default(), &unique_name("ghost")).unwrap();
    assert_eq!(status, Status::default());
}

#[test]
#[ignore]
fn scoped_container_is_removed() {
    let name = unique_name("scoped");
    let daemon = DockerCli::default();
    let ip = ContainerHandle::scoped(sleeper(&name), &daemon, |c| {
        Ok(c.status()?.ip)
    })
    .unwrap();
    assert!(ip.is_some());
    assert!(!Status::query(&daemon, &name).unwrap().exists);
}

#[test]
#[ignore]
fn waits_for_listening_port() {
    let name = unique_name("nc");
    let container = Container::builder("alpine:3")
        .name(&name)
        .detach(true)
        .command(["nc", "-lk", "-p", "8000", "-e", "cat"])
        .build()
        .unwrap();
    let result = ContainerHandle::scoped(container, DockerCli::default(), |c| {
        c.wait_for_port(8000, Duration::from_secs(20), PortPoll::default())
    });
    result.unwrap();
}
