use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub docker_binary: String,
    pub connect_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub port_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            docker_binary: "docker".to_string(),
            connect_timeout_ms: 500,
            poll_interval_ms: 200,
            port_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn port_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.port_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let settings: Settings = serde_yaml::from_str("poll_interval_ms: 50").unwrap();
        assert_eq!(settings.poll_interval_ms, 50);
        assert_eq!(settings.docker_binary, "docker");
        assert_eq!(settings.port_timeout_secs, 30);
    }

    #[test]
    fn empty_yaml_is_default() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
