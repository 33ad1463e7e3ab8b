use anyhow::{Context, Result, bail};
use pillarfinder::find_repo_root;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

pub fn repo_root() -> PathBuf {
    find_repo_root().expect("tests require repository root")
}

/// Path to the `browse` binary Cargo built for this test run.
pub fn browse_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_browse"))
}

/// Path to the `console` binary Cargo built for this test run.
pub fn console_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_console"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run a command feeding `input` to its stdin; used to script the console.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn command: {:?}", cmd))?;
    child
        .stdin
        .as_mut()
        .context("child stdin unavailable")?
        .write_all(input.as_bytes())
        .context("writing script to child stdin")?;
    let output = child
        .wait_with_output()
        .with_context(|| format!("failed to wait for command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
