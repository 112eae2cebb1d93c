use std::path::Path;

use anyhow::{Context, Result};

use super::types::Settings;
use crate::container::Container;

pub const SETTINGS_FILE: &str = ".dockerman.yaml";

/// Load settings from `.dockerman.yaml` in the given directory, or defaults.
pub fn load(dir: &Path) -> Result<Settings> {
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    load_file(&path)
}

pub fn load_file(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&contents).with_context(|| format!("invalid settings in {}", path.display()))
}

/// Load and validate a container definition.
pub fn load_container(path: &Path) -> Result<Container> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid container definition in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn reads_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "docker_binary: /usr/local/bin/docker\nport_timeout_secs: 5\n",
        )
        .unwrap();
        let settings = load(dir.path()).unwrap();
        assert_eq!(settings.docker_binary, "/usr/local/bin/docker");
        assert_eq!(settings.port_timeout_secs, 5);
        assert_eq!(settings.poll_interval_ms, 200);
    }

    #[test]
    fn malformed_settings_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "poll_interval_ms: [").unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("invalid settings"));
    }

    #[test]
    fn loads_container_definition() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web.yaml");
        std::fs::write(&path, "image: nginx\nname: web\ndetach: true\n").unwrap();
        let container = load_container(&path).unwrap();
        assert_eq!(container.run_args(), " -d --name web nginx");
    }

    #[test]
    fn invalid_container_definition_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "image: ''\n").unwrap();
        assert!(load_container(&path).is_err());
    }
}
