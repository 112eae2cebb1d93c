use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::Deserialize;

use crate::Result;
use crate::docker::Daemon;

/// Daemon-observed state of a container.
///
/// Never tracked between calls; [`Status::query`] rebuilds it from scratch.
/// The default value is the absent state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub exists: bool,
    pub running: bool,
    pub paused: bool,
    pub ip: Option<IpAddr>,
    /// Raw inspection payload as returned by the daemon.
    pub inspect: Option<serde_json::Value>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct Inspect {
    state: State,
    network_settings: NetworkSettings,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct State {
    running: bool,
    paused: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct NetworkSettings {
    #[serde(rename = "IPAddress")]
    ip_address: Option<String>,
    networks: Option<BTreeMap<String, Network>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Network {
    #[serde(rename = "IPAddress")]
    ip_address: Option<String>,
}

fn parse_ip(raw: Option<&str>) -> Option<IpAddr> {
    raw.filter(|s| !s.is_empty()).and_then(|s| s.parse().ok())
}

impl Status {
    /// Ask the daemon about `reference`. A missing container is not an error.
    pub fn query(daemon: &impl Daemon, reference: &str) -> Result<Self> {
        match daemon.inspect(reference)? {
            Some(payload) => Self::from_inspect(payload),
            None => Ok(Self::default()),
        }
    }

    pub fn from_inspect(payload: serde_json::Value) -> Result<Self> {
        let inspect: Inspect = serde_json::from_value(payload.clone())?;
        let ip = parse_ip(inspect.network_settings.ip_address.as_deref()).or_else(|| {
            inspect
                .network_settings
                .networks
                .iter()
                .flat_map(|networks| networks.values())
                .find_map(|network| parse_ip(network.ip_address.as_deref()))
        });

        Ok(Self {
            exists: true,
            running: inspect.state.running,
            paused: inspect.state.paused,
            ip,
            inspect: Some(payload),
        })
    }

    /// Forget everything and go back to the absent state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
