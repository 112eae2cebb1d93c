use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Serialize;

use super::types::Container;
use crate::cmdargs::{ArgList, ArgValues, Argument, Quote, Value};
use crate::{Error, Result};

/// A named projection of a [`Container`] into an external representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    RunArgs,
    CreateContainer,
    HostConfig,
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::RunArgs => "run_args",
            Group::CreateContainer => "create_container",
            Group::HostConfig => "host_config",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "run_args" => Ok(Group::RunArgs),
            "create_container" => Ok(Group::CreateContainer),
            "host_config" => Ok(Group::HostConfig),
            other => Err(Error::InvalidGroup(other.to_string())),
        }
    }
}

/// Output of [`Container::marshal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Marshalled {
    Args(String),
    Payload(serde_json::Value),
}

/// Host configuration payload. Absent attributes are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostConfig {
    pub privileged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_bindings: Option<Vec<String>>,
}

/// Container creation payload with the host config embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateContainer {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub detach: bool,
    pub stdin_open: bool,
    pub tty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<u16>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes_from: Option<Vec<String>>,
    pub network_disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_shares: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domainname: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memswap_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_signal: Option<String>,
    pub host_config: HostConfig,
}

fn single(name: &str) -> Argument {
    Argument::option(name).interleave(false)
}

/// `docker run` arguments, in render order.
pub static RUN_ARGS: LazyLock<ArgList> = LazyLock::new(|| {
    ArgList::build(|args| {
        args.add(Argument::switch("-d"))
            .add(Argument::switch("-t"))
            .add(Argument::switch("-i"))
            .add(single("-h"))
            .add(single("-u"))
            .add(single("-m"))
            .add(Argument::option("-e"))
            .add(Argument::option("--dns"))
            .add(Argument::option("-v"))
            .add(Argument::option("--volumes-from"))
            .add(single("--name"))
            .add(single("--entrypoint"))
            .add(single("--cpu-shares"))
            .add(single("-w"))
            .add(single("--memory-swap"))
            .add(single("--mac-address"))
            .add(Argument::option("-l"))
            .add(single("--volume-driver"))
            .add(single("--stop-signal"))
            .add(Argument::switch("--privileged"))
            .add(single("--net"))
            .add(Argument::option("-p"))
            .add(Argument::positional("image"))
            .add(
                Argument::positional("command")
                    .repeatable(true)
                    .quote(Quote::Never),
            );
    })
});

impl Container {
    pub fn marshal(&self, group: &str) -> Result<Marshalled> {
        self.marshal_group(group.parse()?)
    }

    pub fn marshal_group(&self, group: Group) -> Result<Marshalled> {
        Ok(match group {
            Group::RunArgs => Marshalled::Args(self.run_args()),
            Group::HostConfig => Marshalled::Payload(serde_json::to_value(self.host_config())?),
            Group::CreateContainer => {
                Marshalled::Payload(serde_json::to_value(self.create_container())?)
            }
        })
    }

    /// Rendered `docker run` arguments, with a leading space.
    pub fn run_args(&self) -> String {
        RUN_ARGS.render(&self.run_values())
    }

    /// `docker run` arguments as an argv, one element per word.
    pub fn run_argv(&self) -> Vec<String> {
        RUN_ARGS.argv(&self.run_values())
    }

    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            privileged: self.privileged,
            network_mode: self.network_mode.clone(),
            port_bindings: self.port_bindings.clone(),
        }
    }

    pub fn create_container(&self) -> CreateContainer {
        CreateContainer {
            image: self.image.clone(),
            command: self.command.as_deref().map(shell_words::join),
            hostname: self.hostname.clone(),
            user: self.user.clone(),
            detach: self.detach,
            stdin_open: self.stdin_open,
            tty: self.tty,
            mem_limit: self.mem_limit.clone(),
            ports: self.ports.clone(),
            environment: self.environment.clone(),
            dns: self.dns.clone(),
            volumes: self.volumes.clone(),
            volumes_from: self.volumes_from.clone(),
            network_disabled: self.network_disabled,
            name: self.name.clone(),
            entrypoint: self.entrypoint.as_deref().map(shell_words::join),
            cpu_shares: self.cpu_shares,
            working_dir: self.working_dir.clone(),
            domainname: self.domainname.clone(),
            memswap_limit: self.memswap_limit,
            mac_address: self.mac_address.clone(),
            labels: self.labels.clone(),
            volume_driver: self.volume_driver.clone(),
            stop_signal: self.stop_signal.clone(),
            host_config: self.host_config(),
        }
    }

    fn run_values(&self) -> ArgValues {
        let mut values = ArgValues::new();
        let mut set = |name: &str, value: Option<Value>| {
            if let Some(value) = value {
                values.insert(name.to_string(), value);
            }
        };

        set("-d", Some(self.detach.into()));
        set("-t", Some(self.tty.into()));
        set("-i", Some(self.stdin_open.into()));
        set("-h", self.hostname.as_ref().map(Value::from));
        set("-u", self.user.as_ref().map(Value::from));
        set("-m", self.mem_limit.as_ref().map(Value::from));
        set("-e", self.environment.as_ref().map(Value::from));
        set("--dns", self.dns.as_deref().map(Value::from));
        set("-v", self.volumes.as_deref().map(Value::from));
        set("--volumes-from", self.volumes_from.as_deref().map(Value::from));
        set("--name", self.name.as_ref().map(Value::from));
        // `--entrypoint` takes only the executable; the rest leads the command.
        let (entrypoint, entry_args) = match self.entrypoint.as_deref() {
            Some([first, rest @ ..]) => (Some(first.clone()), rest),
            Some([]) => (Some(String::new()), &[][..]),
            None => (None, &[][..]),
        };
        set("--entrypoint", entrypoint.map(Value::from));
        set("--cpu-shares", self.cpu_shares.map(Value::from));
        set("-w", self.working_dir.as_ref().map(Value::from));
        set("--memory-swap", self.memswap_limit.map(Value::from));
        set("--mac-address", self.mac_address.as_ref().map(Value::from));
        set("-l", self.labels.as_ref().map(Value::from));
        set("--volume-driver", self.volume_driver.as_ref().map(Value::from));
        set("--stop-signal", self.stop_signal.as_ref().map(Value::from));
        set("--privileged", Some(self.privileged.into()));
        let network = if self.network_disabled {
            Some("none".to_string())
        } else {
            self.network_mode.clone()
        };
        set("--net", network.map(Value::from));
        set("-p", self.port_bindings.as_deref().map(Value::from));
        set("image", Some(self.image.as_str().into()));
        let command: Vec<String> = entry_args
            .iter()
            .chain(self.command.iter().flatten())
            .cloned()
            .collect();
        if !command.is_empty() {
            set("command", Some(Value::List(command)));
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_only() {
        let c = Container::new("ubuntu").unwrap();
        assert_eq!(c.marshal("run_args").unwrap(), Marshalled::Args(" ubuntu".into()));
    }

    #[test]
    fn full_run_args() {
        let c = Container::builder("debian:jessie")
            .command("python foo.py")
            .tty(true)
            .stdin_open(true)
            .name("test")
            .volumes_from(["foo", "bar"])
            .build()
            .unwrap();
        assert_eq!(
            c.run_args(),
            " -t -i --volumes-from foo --volumes-from bar --name test debian:jessie python foo.py"
        );
        assert_eq!(
            c.run_argv(),
            [
                "-t",
                "-i",
                "--volumes-from",
                "foo",
                "--volumes-from",
                "bar",
                "--name",
                "test",
                "debian:jessie",
                "python",
                "foo.py"
            ]
        );
    }

    #[test]
    fn environment_and_labels_interleave_in_key_order() {
        let c = Container::builder("alpine")
            .detach(true)
            .environment(["B=2", "A=1"])
            .labels([("tier", "web")])
            .cpu_shares(512)
            .build()
            .unwrap();
        assert_eq!(
            c.run_args(),
            " -d -e A=1 -e B=2 --cpu-shares 512 -l tier=web alpine"
        );
    }

    #[test]
    fn run_argv_keeps_values_with_spaces_and_quotes() {
        let c = Container::builder("alpine")
            .environment(["MSG=hello world"])
            .labels([("note", "it's")])
            .build()
            .unwrap();
        assert_eq!(
            c.run_argv(),
            ["-e", "MSG=hello world", "-l", "note=it's", "alpine"]
        );
    }

    #[test]
    fn entrypoint_words_lead_the_command() {
        let c = Container::builder("alpine")
            .entrypoint(["/bin/sh", "-c"])
            .command(["echo hi"])
            .build()
            .unwrap();
        assert_eq!(
            c.run_argv(),
            ["--entrypoint", "/bin/sh", "alpine", "-c", "echo hi"]
        );
        assert_eq!(c.run_args(), " --entrypoint /bin/sh alpine -c echo hi");
    }

    #[test]
    fn command_list_words_stay_whole() {
        let c = Container::builder("alpine")
            .command(["sh", "-c", "echo hi"])
            .build()
            .unwrap();
        assert_eq!(c.run_argv(), ["alpine", "sh", "-c", "echo hi"]);
        let payload = serde_json::to_value(c.create_container()).unwrap();
        assert_eq!(payload["command"], "sh -c 'echo hi'");
    }

    #[test]
    fn network_disabled_overrides_mode() {
        let c = Container::builder("alpine")
            .network_mode("host")
            .network_disabled(true)
            .build()
            .unwrap();
        assert_eq!(c.run_args(), " --net none alpine");
    }

    #[test]
    fn host_config_skips_absent_values() {
        let c = Container::builder("alpine")
            .port_bindings("8080:80,8443:443")
            .build()
            .unwrap();
        let Marshalled::Payload(payload) = c.marshal("host_config").unwrap() else {
            panic!("expected payload");
        };
        assert_eq!(
            payload,
            serde_json::json!({
                "privileged": false,
                "port_bindings": ["8080:80", "8443:443"],
            })
        );
    }

    #[test]
    fn create_container_embeds_host_config() {
        let c = Container::builder("alpine")
            .ports([80, 443])
            .domainname("example.com")
            .build()
            .unwrap();
        let Marshalled::Payload(payload) = c.marshal("create_container").unwrap() else {
            panic!("expected payload");
        };
        assert_eq!(payload["image"], "alpine");
        assert_eq!(payload["ports"], serde_json::json!([80, 443]));
        assert_eq!(payload["domainname"], serde_json::json!(["example.com"]));
        assert_eq!(payload["tty"], false);
        assert!(payload.get("command").is_none());
        assert!(payload.get("privileged").is_none());
        assert_eq!(payload["host_config"], serde_json::json!({"privileged": false}));
    }

    #[test]
    fn unknown_group_is_invalid() {
        let c = Container::new("alpine").unwrap();
        let err = c.marshal("bogus").unwrap_err();
        assert!(matches!(err, Error::InvalidGroup(g) if g == "bogus"));
    }

    #[test]
    fn group_names_round_trip() {
        for group in [Group::RunArgs, Group::CreateContainer, Group::HostConfig] {
            assert_eq!(group.as_str().parse::<Group>().unwrap(), group);
        }
    }
}
