use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use dockerman::config::{self, Settings};
use dockerman::container::{Group, Marshalled};
use dockerman::docker::{Daemon, DockerCli, PortPoll, wait_for_port};
use dockerman::{ContainerHandle, Status};

#[derive(FromArgs)]
/// render docker command lines and drive container lifecycles
struct Arguments {
    #[argh(option, short = 'c')]
    /// settings file (defaults to ./.dockerman.yaml when present)
    config: Option<PathBuf>,

    #[argh(subcommand)]
    command: Subcommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Render(RenderArgs),
    Run(RunArgs),
    Start(StartArgs),
    Stop(StopArgs),
    Pause(PauseArgs),
    Unpause(UnpauseArgs),
    Rm(RmArgs),
    Status(StatusArgs),
    WaitPort(WaitPortArgs),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "render")]
/// print a container definition in one marshal group
struct RenderArgs {
    #[argh(positional)]
    /// container definition (YAML)
    file: PathBuf,

    #[argh(option, short = 'g', default = r#"String::from("run_args")"#)]
    /// run_args, create_container or host_config
    group: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
/// run a container from a definition file
struct RunArgs {
    #[argh(positional)]
    /// container definition (YAML)
    file: PathBuf,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "start")]
/// start a stopped container
struct StartArgs {
    #[argh(positional)]
    /// container name or id
    reference: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "stop")]
/// stop a running container
struct StopArgs {
    #[argh(positional)]
    /// container name or id
    reference: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "pause")]
/// pause a running container
struct PauseArgs {
    #[argh(positional)]
    /// container name or id
    reference: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "unpause")]
/// unpause a paused container
struct UnpauseArgs {
    #[argh(positional)]
    /// container name or id
    reference: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "rm")]
/// forcibly remove a container
struct RmArgs {
    #[argh(positional)]
    /// container name or id
    reference: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "status")]
/// show the daemon-observed status of a container
struct StatusArgs {
    #[argh(positional)]
    /// container name or id
    reference: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "wait-port")]
/// wait until a container accepts TCP connections on a port
struct WaitPortArgs {
    #[argh(positional)]
    /// container name or id
    reference: String,

    #[argh(positional)]
    /// port to probe
    port: u16,

    #[argh(option, short = 't')]
    /// seconds to wait (defaults to the configured port timeout)
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Arguments = argh::from_env();
    let settings = match &args.config {
        Some(path) => config::load_file(path)?,
        None => config::load(&std::env::current_dir()?)?,
    };
    let daemon = DockerCli::from_settings(&settings);

    match args.command {
        Subcommand::Render(render) => {
            let container = config::load_container(&render.file)?;
            let group: Group = render.group.parse()?;
            match container.marshal_group(group)? {
                Marshalled::Args(line) => println!("{}", line.trim_start()),
                Marshalled::Payload(payload) => {
                    println!("{}", serde_json::to_string_pretty(&payload)?)
                }
            }
        }
        Subcommand::Run(run) => {
            let container = config::load_container(&run.file)?;
            let mut handle = ContainerHandle::new(container, daemon);
            handle.run()?;
            if let Some(id) = handle.id() {
                println!("{id}");
            }
        }
        Subcommand::Start(r) => daemon.start(&r.reference)?,
        Subcommand::Stop(r) => daemon.stop(&r.reference)?,
        Subcommand::Pause(r) => daemon.pause(&r.reference)?,
        Subcommand::Unpause(r) => daemon.unpause(&r.reference)?,
        Subcommand::Rm(r) => daemon.remove(&r.reference)?,
        Subcommand::Status(status) => print_status(&Status::query(&daemon, &status.reference)?),
        Subcommand::WaitPort(wait) => wait_port(&daemon, &settings, wait)?,
    }

    Ok(())
}

fn print_status(status: &Status) {
    let ip = status
        .ip
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "exists={} running={} paused={} ip={}",
        status.exists, status.running, status.paused, ip
    );
}

fn wait_port(daemon: &DockerCli, settings: &Settings, args: WaitPortArgs) -> Result<()> {
    let status = Status::query(daemon, &args.reference)?;
    if !status.exists {
        bail!("no such container: {}", args.reference);
    }
    let ip = status
        .ip
        .with_context(|| format!("container {} has no IP address", args.reference))?;
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.port_timeout());
    wait_for_port(ip, args.port, timeout, PortPoll::from(settings))?;
    println!("{ip}:{} is live", args.port);
    Ok(())
}
