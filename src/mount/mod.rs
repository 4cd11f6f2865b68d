// src/mount/mod.rs
//! Locating the share on disk and asking the desktop to mount it.

pub mod gvfs;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;

use crate::error::MountError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLocator {
    pub server: String,
    pub share: String,
}

impl ShareLocator {
    pub fn new(server: impl Into<String>, share: impl Into<String>) -> Self {
        ShareLocator { server: server.into(), share: share.into() }
    }

    pub fn uri(&self) -> String {
        format!("smb://{}/{}", self.server, self.share)
    }
}

/// Runs `<tool> mount smb://server/share`, giving up after `timeout`.
pub async fn mount_share(tool: &str, locator: &ShareLocator, timeout: Duration) -> Result<(), MountError> {
    let uri = locator.uri();
    tracing::info!(tool, uri = %uri, "requesting mount");

    let mut command = Command::new(tool);
    command.args(["mount", uri.as_str()]).kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Err(_) => return Err(MountError::TimedOut(timeout.as_secs())),
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MountError::ToolMissing(tool.to_string()))
        }
        Ok(result) => result?,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(MountError::Failed { status: output.status.to_string(), stderr });
    }
    Ok(())
}

/// Mounts the share if needed and returns the mount point once it shows up.
///
/// The tool's own failure is only logged: `gio` also fails for shares that are
/// already mounted, so the mount point on disk is what decides.
pub fn connect(tool: &str, locator: &ShareLocator, timeout: Duration) -> Result<PathBuf, MountError> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    runtime.block_on(async {
        match mount_share(tool, locator, timeout).await {
            Ok(()) => {}
            Err(e @ (MountError::ToolMissing(_) | MountError::TimedOut(_) | MountError::Io(_))) => return Err(e),
            Err(e) => tracing::warn!(error = %e, "mount request failed"),
        }
        // give GVFS a moment to publish the mount
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok(())
    })?;

    let root = gvfs::resolve_root(&gvfs::gvfs_base(), locator);
    if root.is_dir() {
        tracing::info!(root = %root.display(), "share mounted");
        Ok(root)
    } else {
        Err(MountError::NotMounted(root))
    }
}
