//! Log acquisition: files, stdin, or the configured system command.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

use crate::Config;

/// Reads the raw power log.
///
/// `input` of `-` reads stdin, any other path reads that file, and `None`
/// runs [`Config::log_command`].
pub fn read_log(input: Option<&Path>, config: &Config) -> Result<String> {
    match input {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read log from stdin")?;
            Ok(text)
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => run_command(&config.log_command),
    }
}

/// Runs a program and returns its stdout.
///
/// Output that is not valid UTF-8 is decoded lossily; power logs are ASCII
/// apart from the occasional process name.
pub fn run_command(argv: &[String]) -> Result<String> {
    let Some((program, args)) = argv.split_first() else {
        bail!("command is empty; check the configuration");
    };

    tracing::debug!(%program, ?args, "running command");
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("failed to run {program}"))?;

    if !output.status.success() {
        bail!("{program} exited with status {}", output.status);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
