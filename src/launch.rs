use std::{
    env,
    os::unix::prelude::ExitStatusExt,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use color_eyre::eyre::{self, WrapErr as _};
use tokio::process::Command;

use crate::resolve::Endpoint;

const SSH_PROGRAM: &str = "ssh";

/// Resolves the `ssh` client on the system search path.
///
/// Meant to run once at startup, before any DNS query.
pub fn find_ssh() -> Option<PathBuf> {
    find_in_path(SSH_PROGRAM)
}

fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(binary);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Builds the ssh argument list: port flag, target host, then the caller's
/// arguments in their original order.
pub fn command_args(endpoint: &Endpoint, passthrough: &[String]) -> Vec<String> {
    let mut args = vec![
        "-p".to_owned(),
        endpoint.port.to_string(),
        endpoint.host.clone(),
    ];
    args.extend(passthrough.iter().cloned());
    args
}

/// Runs the SSH client against `endpoint` with the parent's standard streams
/// attached and waits for it to finish.
pub async fn run(
    ssh_path: &Path,
    endpoint: &Endpoint,
    passthrough: &[String],
) -> eyre::Result<ExitStatus> {
    tracing::debug!("connecting to {endpoint}");

    let status = Command::new(ssh_path)
        .args(command_args(endpoint, passthrough))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .wrap_err_with(|| format!("failed to start {}", ssh_path.display()))?;

    Ok(status)
}

/// Maps the child's exit status onto this process's exit code, keeping the
/// shell convention for signal deaths.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        code
    } else if let Some(signal) = status.signal() {
        128 + signal
    } else {
        255
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_args_orders_port_host_then_passthrough() {
        let endpoint = Endpoint {
            host: "h".to_owned(),
            port: 2222,
        };
        let args = command_args(&endpoint, &["-A".to_owned(), "-v".to_owned()]);
        assert_eq!(args, ["-p", "2222", "h", "-A", "-v"]);
    }

    #[test]
    fn command_args_without_passthrough() {
        let endpoint = Endpoint {
            host: "plainhost.test".to_owned(),
            port: 22,
        };
        assert_eq!(
            command_args(&endpoint, &[]),
            ["-p", "22", "plainhost.test"]
        );
    }

    #[test]
    fn find_in_path_finds_common_binary() {
        // "ls" should be available everywhere
        assert!(find_in_path("ls").is_some());
    }

    #[test]
    fn find_in_path_misses_unknown_binary() {
        assert!(find_in_path("nonexistent-binary-12345").is_none());
    }

    #[test]
    fn exit_code_prefers_child_code() {
        assert_eq!(exit_code(ExitStatus::from_raw(0)), 0);
        assert_eq!(exit_code(ExitStatus::from_raw(33 << 8)), 33);
    }

    #[test]
    fn exit_code_maps_signal_deaths() {
        // raw wait status 15 = killed by SIGTERM
        assert_eq!(exit_code(ExitStatus::from_raw(15)), 128 + 15);
    }
}
