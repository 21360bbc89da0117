use std::process;

use clap::Parser as _;
use color_eyre::eyre::{self, eyre};
use ssh_srv_connect::{launch, log, resolve::SrvResolver};

/// Connect to an SSH host discovered via DNS SRV records
#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Enable verbose diagnostic logging
    #[clap(short = 'v', long = "verbose", env = "SSH_SRV_CONNECT_VERBOSE")]
    verbose: bool,
    /// Host name to resolve and connect to
    hostname: String,
    /// Arguments passed through to ssh
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    ssh_args: Vec<String>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let Args {
        verbose,
        hostname,
        ssh_args,
    } = parse_args();

    log::install(verbose)?;

    // Precondition, checked before any DNS traffic.
    let ssh_path =
        launch::find_ssh().ok_or_else(|| eyre!("could not find `ssh` on the search path"))?;

    let resolver = SrvResolver::from_system_conf()?;
    let endpoint = resolver.resolve(&hostname).await?;
    tracing::debug!("target for {hostname} is {endpoint}");

    let status = launch::run(&ssh_path, &endpoint, &ssh_args).await?;
    process::exit(launch::exit_code(status));
}

fn parse_args() -> Args {
    // Missing operands exit with 1; help and version keep clap's 0.
    Args::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        let code = match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
            _ => 1,
        };
        process::exit(code);
    })
}
