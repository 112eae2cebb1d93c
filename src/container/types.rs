use std::collections::BTreeMap;

use serde::Deserialize;

use super::coerce::{Pairs, Scalar, StrOrList};
use crate::{Error, Result};

/// Typed configuration for one container.
///
/// Built through [`ContainerBuilder`] (or deserialized from YAML, which goes
/// through the same builder), so list/string coercions and validation have
/// already happened by the time a `Container` exists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ContainerBuilder")]
pub struct Container {
    pub image: String,
    /// Command words passed after the image.
    pub command: Option<Vec<String>>,
    pub hostname: Option<String>,
    /// Username or UID.
    pub user: Option<String>,
    pub detach: bool,
    /// Keep STDIN open even if not attached.
    pub stdin_open: bool,
    pub tty: bool,
    pub mem_limit: Option<String>,
    pub ports: Option<Vec<u16>>,
    pub environment: Option<BTreeMap<String, String>>,
    pub dns: Option<Vec<String>>,
    pub volumes: Option<Vec<String>>,
    pub volumes_from: Option<Vec<String>>,
    pub network_disabled: bool,
    pub name: Option<String>,
    /// Entrypoint words. The first is the executable.
    pub entrypoint: Option<Vec<String>>,
    /// Relative CPU weight.
    pub cpu_shares: Option<i64>,
    pub working_dir: Option<String>,
    /// Custom DNS search domains.
    pub domainname: Option<Vec<String>>,
    pub memswap_limit: Option<i64>,
    pub mac_address: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
    pub volume_driver: Option<String>,
    pub stop_signal: Option<String>,
    pub privileged: bool,
    pub network_mode: Option<String>,
    /// `-p` style publish specs, e.g. `8080:80`.
    pub port_bindings: Option<Vec<String>>,
}

impl Container {
    /// A container with nothing but an image.
    pub fn new(image: impl Into<String>) -> Result<Self> {
        Self::builder(image).build()
    }

    pub fn builder(image: impl Into<String>) -> ContainerBuilder {
        ContainerBuilder {
            image: image.into(),
            ..ContainerBuilder::default()
        }
    }
}

/// Raw, uncoerced container attributes. Also the YAML shape of a container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerBuilder {
    image: String,
    command: Option<StrOrList>,
    hostname: Option<String>,
    user: Option<Scalar>,
    detach: bool,
    stdin_open: bool,
    tty: bool,
    mem_limit: Option<Scalar>,
    ports: Option<Vec<u16>>,
    environment: Option<Pairs>,
    dns: Option<StrOrList>,
    volumes: Option<StrOrList>,
    volumes_from: Option<StrOrList>,
    network_disabled: bool,
    name: Option<String>,
    entrypoint: Option<StrOrList>,
    cpu_shares: Option<i64>,
    working_dir: Option<String>,
    domainname: Option<StrOrList>,
    memswap_limit: Option<i64>,
    mac_address: Option<String>,
    labels: Option<Pairs>,
    volume_driver: Option<String>,
    stop_signal: Option<String>,
    privileged: bool,
    network_mode: Option<String>,
    port_bindings: Option<StrOrList>,
}

impl ContainerBuilder {
    /// Command words; a string is split the way a shell would.
    pub fn command(mut self, command: impl Into<StrOrList>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn user(mut self, user: impl Into<Scalar>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn detach(mut self, yes: bool) -> Self {
        self.detach = yes;
        self
    }

    pub fn stdin_open(mut self, yes: bool) -> Self {
        self.stdin_open = yes;
        self
    }

    pub fn tty(mut self, yes: bool) -> Self {
        self.tty = yes;
        self
    }

    pub fn mem_limit(mut self, limit: impl Into<Scalar>) -> Self {
        self.mem_limit = Some(limit.into());
        self
    }

    pub fn ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.ports = Some(ports.into_iter().collect());
        self
    }

    /// `K=V` strings or a map.
    pub fn environment(mut self, env: impl Into<Pairs>) -> Self {
        self.environment = Some(env.into());
        self
    }

    /// Comma-separated string or list.
    pub fn dns(mut self, servers: impl Into<StrOrList>) -> Self {
        self.dns = Some(servers.into());
        self
    }

    pub fn volumes(mut self, volumes: impl Into<StrOrList>) -> Self {
        self.volumes = Some(volumes.into());
        self
    }

    pub fn volumes_from(mut self, containers: impl Into<StrOrList>) -> Self {
        self.volumes_from = Some(containers.into());
        self
    }

    pub fn network_disabled(mut self, yes: bool) -> Self {
        self.network_disabled = yes;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn entrypoint(mut self, entrypoint: impl Into<StrOrList>) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    pub fn cpu_shares(mut self, shares: i64) -> Self {
        self.cpu_shares = Some(shares);
        self
    }

    pub fn working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Whitespace-separated string or list.
    pub fn domainname(mut self, domains: impl Into<StrOrList>) -> Self {
        self.domainname = Some(domains.into());
        self
    }

    pub fn memswap_limit(mut self, limit: i64) -> Self {
        self.memswap_limit = Some(limit);
        self
    }

    pub fn mac_address(mut self, mac: impl Into<String>) -> Self {
        self.mac_address = Some(mac.into());
        self
    }

    /// Label names (with empty values) or a map.
    pub fn labels(mut self, labels: impl Into<Pairs>) -> Self {
        self.labels = Some(labels.into());
        self
    }

    pub fn volume_driver(mut self, driver: impl Into<String>) -> Self {
        self.volume_driver = Some(driver.into());
        self
    }

    pub fn stop_signal(mut self, signal: impl Into<String>) -> Self {
        self.stop_signal = Some(signal.into());
        self
    }

    pub fn privileged(mut self, yes: bool) -> Self {
        self.privileged = yes;
        self
    }

    pub fn network_mode(mut self, mode: impl Into<String>) -> Self {
        self.network_mode = Some(mode.into());
        self
    }

    pub fn port_bindings(mut self, bindings: impl Into<StrOrList>) -> Self {
        self.port_bindings = Some(bindings.into());
        self
    }

    /// Apply coercions and validate.
    pub fn build(self) -> Result<Container> {
        if self.image.trim().is_empty() {
            return Err(Error::InvalidArgument("image must not be blank".into()));
        }

        Ok(Container {
            image: self.image,
            command: self.command.map(StrOrList::words).transpose()?,
            hostname: self.hostname,
            user: self.user.map(|u| u.to_string()),
            detach: self.detach,
            stdin_open: self.stdin_open,
            tty: self.tty,
            mem_limit: self.mem_limit.map(|m| m.to_string()),
            ports: self.ports,
            environment: self
                .environment
                .map(|env| env.into_map(Some('=')))
                .transpose()?,
            dns: self.dns.map(|v| v.split(Some(","))),
            volumes: self.volumes.map(|v| v.split(Some(","))),
            volumes_from: self.volumes_from.map(|v| v.split(Some(","))),
            network_disabled: self.network_disabled,
            name: self.name,
            entrypoint: self.entrypoint.map(StrOrList::words).transpose()?,
            cpu_shares: self.cpu_shares,
            working_dir: self.working_dir,
            domainname: self.domainname.map(|v| v.split(None)),
            memswap_limit: self.memswap_limit,
            mac_address: self.mac_address,
            labels: self.labels.map(|l| l.into_map(None)).transpose()?,
            volume_driver: self.volume_driver,
            stop_signal: self.stop_signal,
            privileged: self.privileged,
            network_mode: self.network_mode,
            port_bindings: self.port_bindings.map(|v| v.split(Some(","))),
        })
    }
}

impl TryFrom<ContainerBuilder> for Container {
    type Error = Error;

    fn try_from(builder: ContainerBuilder) -> Result<Self> {
        builder.build()
    }
}
