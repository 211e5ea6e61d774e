//! Shell command helpers shared by modules

use barfeed_core::ModuleError;
use std::process::{Command, Stdio};

/// Run `cmd` through `sh -c` and return its stdout without trailing newlines
pub(crate) fn shell_output(cmd: &str) -> Result<String, ModuleError> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(ModuleError::Unavailable(format!(
            "`{}` failed: {}",
            cmd, output.status
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    Ok(text.trim_end_matches(&['\n', '\r'][..]).to_string())
}

/// Whether `cmd` exits successfully
pub(crate) fn shell_succeeds(cmd: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Start `cmd` without waiting for it; a helper thread reaps the child
pub(crate) fn spawn_detached(cmd: &str) -> Result<(), ModuleError> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let cmd = cmd.to_string();
    std::thread::spawn(move || {
        if let Err(e) = child.wait() {
            log::warn!("Failed to reap `{}`: {}", cmd, e);
        }
    });
    Ok(())
}
