//! ethnl-query: query a network device through the ethtool netlink family.
//!
//! Prints driver information by default, or sends a link settings request
//! with `--settings`.

use std::process::ExitCode;

use clap::Parser;
use ethnl::{Config, DriverInfo, EthtoolSession};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ethnl-query", version)]
#[command(about = "Query network device driver information over ethtool netlink")]
struct Cli {
    /// Device name
    device: Option<String>,

    /// Request link settings instead of driver information
    #[arg(short, long)]
    settings: bool,

    /// Output JSON
    #[arg(short, long)]
    json: bool,

    /// Generic netlink family to resolve
    #[arg(long, value_name = "NAME", default_value = "ethtool")]
    family: String,

    /// Receive buffer size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = ethnl::netlink::DEFAULT_RECV_BUFFER_SIZE)]
    recv_buffer: usize,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new()
            .family_name(&self.family)
            .recv_buffer_size(self.recv_buffer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Usage,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Usage => ExitCode::from(1),
            Status::Failure => ExitCode::from(2),
        }
    }
}

fn exit_status(result: &ethnl::Result<()>) -> Status {
    match result {
        Ok(()) => Status::Success,
        Err(_) => Status::Failure,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help / --version
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return Status::Usage.into();
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(device) = cli.device.as_deref() else {
        eprintln!("missing argument");
        return Status::Usage.into();
    };

    let result = run(&cli, device).await;
    if let Err(err) = &result {
        eprintln!("ethnl-query: {err}");
    }
    exit_status(&result).into()
}

async fn run(cli: &Cli, device: &str) -> ethnl::Result<()> {
    let mut session = EthtoolSession::open(&cli.config()).await?;
    tracing::debug!(family = session.family_id(), "session open");

    if cli.settings {
        let reply = session.get_settings(device).await?;
        if cli.json {
            print_json(&reply);
        } else {
            println!(
                "settings: {} attributes in {} frames",
                reply.attributes, reply.frames
            );
        }
        return Ok(());
    }

    let info = session.get_drvinfo(device).await?;
    if cli.json {
        print_json(&info);
    } else {
        print!("{}", format_drvinfo(&info));
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("ethnl-query: cannot encode JSON: {err}"),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn format_drvinfo(info: &DriverInfo) -> String {
    let mut out = String::new();
    for (label, value) in [
        ("driver", &info.driver),
        ("version", &info.version),
        ("firmware-version", &info.fw_version),
        ("expansion-rom-version", &info.erom_version),
        ("businfo", &info.bus_info),
    ] {
        out.push_str(&format!("{label}: {value}\n"));
    }
    for (label, value) in [
        ("supports-statistics", info.supports_stats),
        ("supports-test", info.supports_test),
        ("supports-eeprom-access", info.supports_eeprom_access),
        ("supports-register-dump", info.supports_register_dump),
        ("supports-priv-flags", info.supports_priv_flags),
    ] {
        out.push_str(&format!("{label}: {}\n", yes_no(value)));
    }
    out
}
