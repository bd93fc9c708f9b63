// core-services: CORE service descriptors for emulated 5G/4G networks
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module for managing shell sessions inside a node directory.

use std::{
    path::{Path, PathBuf},
    process::{ExitStatus, Output, Stdio},
    string::FromUtf8Error,
    time::Duration,
};

use thiserror::Error;
use tokio::{
    process::{Child, Command},
    time::timeout,
};

/// Shell used to interpret the command lines.
const SHELL: &str = "sh";

/// This is the session with a single node directory on the local host.
///
/// Every command is executed as `sh -c <command>` with the node directory as working directory.
/// The child process is killed once the future running it is dropped, except for commands started
/// in the background with [`ShellSession::spawn_cmd`].
///
/// Paths passed to [`ShellSession::create_dir`] and [`ShellSession::write_file`] are node paths.
/// They are mapped into the node directory the way CORE stores private directories: slashes in
/// the directory part are replaced by dots (see [`ShellSession::host_dir`]).
#[derive(Debug, Clone)]
pub struct ShellSession {
    /// Name of the node, used for logging
    name: String,
    /// The node directory on the host
    root: PathBuf,
}

impl ShellSession {
    /// Create a new session for the node `name` with its node directory at `root`. The directory
    /// is created if it does not exist yet. Then, the session checks that the shell is working by
    /// executing `echo test`.
    pub async fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Result<Self, ShellError> {
        let this = Self {
            name: name.into(),
            root: root.into(),
        };

        log::trace!("[{}] preparing {}", this.name(), this.root.display());
        tokio::fs::create_dir_all(&this.root)
            .await
            .map_err(ShellError::Setup)?;

        // wait for 10 seconds until the shell has answered
        match timeout(Duration::from_secs(10), this.execute_cmd("echo test")).await {
            Ok(Ok((stdout, _))) => {
                let stdout = String::from_utf8_lossy(&stdout);
                if stdout.trim() == "test" {
                    log::trace!("[{}] session established!", this.name());
                    Ok(this)
                } else {
                    log::error!(
                        "[{}] Unexpected stdout! expected `test`, but got:\n{stdout}",
                        this.name()
                    );
                    Err(ShellError::Setup(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Expected `test`, but got {stdout}"),
                    )))
                }
            }
            Ok(Err(e)) => {
                log::error!("[{}] Error while starting the shell: {e}", this.name());
                Err(e)
            }
            Err(_) => {
                log::error!("[{}] shell timeout!", this.name());
                Err(ShellError::Timeout)
            }
        }
    }

    /// Get the name of the node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the node directory on the host.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the host path of a directory of the node. Returns an error if `dir` contains a `.` or
    /// `..` component.
    ///
    /// ```
    /// # use node_lab::ShellSession;
    /// # use std::path::Path;
    /// # let root = Path::new("/tmp/n1.conf");
    /// assert_eq!(ShellSession::map_dir(root, "/etc/open5gs").unwrap(), root.join("etc.open5gs"));
    /// assert_eq!(
    ///     ShellSession::map_dir(root, "/var/log/open5gs/").unwrap(),
    ///     root.join("var.log.open5gs")
    /// );
    /// assert!(ShellSession::map_dir(root, "/etc/../root").is_err());
    /// ```
    pub fn host_dir(&self, dir: impl AsRef<str>) -> Result<PathBuf, ShellError> {
        Self::map_dir(&self.root, dir.as_ref())
    }

    /// Get the host path of a file of the node. Returns an error if `file` has no file name, or if
    /// its path contains a `.` or `..` component.
    ///
    /// ```
    /// # use node_lab::ShellSession;
    /// # use std::path::Path;
    /// # let root = Path::new("/tmp/n1.conf");
    /// assert_eq!(
    ///     ShellSession::map_file(root, "/etc/open5gs/amf.yaml").unwrap(),
    ///     root.join("etc.open5gs").join("amf.yaml")
    /// );
    /// assert_eq!(ShellSession::map_file(root, "start_amf.sh").unwrap(), root.join("start_amf.sh"));
    /// assert!(ShellSession::map_file(root, "/etc/open5gs/").is_err());
    /// assert!(ShellSession::map_file(root, "../passwd").is_err());
    /// ```
    pub fn host_file(&self, file: impl AsRef<str>) -> Result<PathBuf, ShellError> {
        Self::map_file(&self.root, file.as_ref())
    }

    /// Map a node directory into the node directory `root` on the host.
    pub fn map_dir(root: &Path, dir: &str) -> Result<PathBuf, ShellError> {
        Ok(root.join(flatten(dir)?))
    }

    /// Map a node file into the node directory `root` on the host.
    pub fn map_file(root: &Path, file: &str) -> Result<PathBuf, ShellError> {
        let (dir, name) = match file.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => ("", file),
        };
        if name.is_empty() || name == "." || name == ".." {
            return Err(ShellError::InvalidPath(file.to_string()));
        }
        let flat = flatten(dir).map_err(|_| ShellError::InvalidPath(file.to_string()))?;
        Ok(if flat.is_empty() {
            root.join(name)
        } else {
            root.join(flat).join(name)
        })
    }

    /// Get a new command that executes the given command line inside the node directory. The
    /// command is killed once it is dropped.
    pub fn command(&self, cmd: impl AsRef<str>) -> Command {
        let mut command = Command::new(SHELL);
        command
            .arg("-c")
            .arg(cmd.as_ref())
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }

    /// Execute a command and return the bytes of both `STDOUT` and `STDERR`. This funciton call
    /// will check that the returned exit code is 0.
    pub async fn execute_cmd(&self, cmd: impl AsRef<str>) -> Result<(Vec<u8>, Vec<u8>), ShellError> {
        let cmd = cmd.as_ref();
        log::trace!("[{}] `{}`", self.name(), cmd);
        let output = match self.command(cmd).output().await {
            Ok(out) => out,
            Err(e) => {
                log::error!("[{}] {} failed: {}", self.name(), cmd, e);
                Err(e)?
            }
        };
        check_output(self.name(), output, || cmd)
    }

    /// Execute a command. Then, check that the status is successful, and return the parsed
    /// STDOUT.
    pub async fn execute_cmd_stdout(&self, cmd: impl AsRef<str>) -> Result<String, ShellError> {
        let (stdout, _) = self.execute_cmd(cmd).await?;
        Ok(String::from_utf8(stdout)?)
    }

    /// Execute a command and return the status. This function will **not** check for the exit
    /// code, but simply return it.
    pub async fn execute_cmd_status(&self, cmd: impl AsRef<str>) -> Result<ExitStatus, ShellError> {
        let cmd = cmd.as_ref();
        log::trace!("[{}] `{}`", self.name(), cmd);
        match self
            .command(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) => Ok(status),
            Err(e) => {
                log::error!("[{}] {} failed: {}", self.name(), cmd, e);
                Err(e)?
            }
        }
    }

    /// Start a command in the background and return without waiting for it. Its output is
    /// discarded, and the process keeps running when the returned child is dropped.
    pub fn spawn_cmd(&self, cmd: impl AsRef<str>) -> Result<Child, ShellError> {
        let cmd = cmd.as_ref();
        log::trace!("[{}] `{}` &", self.name(), cmd);
        let child = self
            .command(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false)
            .spawn()
            .map_err(|e| {
                log::error!("[{}] {} failed: {}", self.name(), cmd, e);
                e
            })?;
        log::debug!(
            "[{}] started `{}` with pid {}",
            self.name(),
            cmd,
            child.id().unwrap_or_default()
        );
        Ok(child)
    }

    /// Create a directory of the node (and all its parents) inside the node directory. Returns
    /// the path on the host.
    pub async fn create_dir(&self, dir: impl AsRef<str>) -> Result<PathBuf, ShellError> {
        let path = self.host_dir(dir.as_ref())?;
        log::trace!(
            "[{}] Create directory {} at {}",
            self.name(),
            dir.as_ref(),
            path.display()
        );
        tokio::fs::create_dir_all(&path).await?;
        Ok(path)
    }

    /// Write a file of the node into the node directory, replacing its previous content. Returns
    /// the path on the host.
    pub async fn write_file(
        &self,
        file: impl AsRef<str>,
        content: impl AsRef<[u8]>,
    ) -> Result<PathBuf, ShellError> {
        let path = self.host_file(file.as_ref())?;
        log::trace!(
            "[{}] Write file {} to {}",
            self.name(),
            file.as_ref(),
            path.display()
        );
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content.as_ref()).await?;
        Ok(path)
    }
}

/// Replace all slashes of a directory with dots, ignoring leading and trailing slashes. A `.` or
/// `..` component would leave the node directory, and is rejected.
fn flatten(dir: &str) -> Result<String, ShellError> {
    let dir = dir.trim_matches('/');
    if dir.split('/').any(|c| c == "." || c == "..") {
        return Err(ShellError::InvalidPath(dir.to_string()));
    }
    Ok(dir.replace('/', "."))
}

/// Check the output for successful exit code
pub fn check_output<F, S>(
    host: &str,
    output: Output,
    cmd: F,
) -> Result<(Vec<u8>, Vec<u8>), ShellError>
where
    F: FnOnce() -> S,
    S: std::fmt::Display,
{
    if output.status.success() {
        Ok((output.stdout, output.stderr))
    } else {
        let cmd = cmd().to_string();
        log::error!(
            "[{}] {} exited with exit code {}{}{}",
            host,
            cmd,
            output.status.code().unwrap_or(-1),
            if !output.stdout.is_empty() {
                format!("\nSTDOUT:\n{}", String::from_utf8_lossy(&output.stdout))
            } else {
                String::new()
            },
            if !output.stderr.is_empty() {
                format!("\nSTDERR:\n{}", String::from_utf8_lossy(&output.stderr))
            } else {
                String::new()
            }
        );
        Err(ShellError::CommandError(
            host.to_string(),
            cmd,
            output.status.code().unwrap_or(-1),
        ))
    }
}

/// Error kind returned by [`ShellSession`].
#[derive(Debug, Error)]
pub enum ShellError {
    /// Error while preparing the node directory or the shell
    #[error("Error while preparing the session: {0}")]
    Setup(std::io::Error),
    /// Timeout while establishing the session
    #[error("Timeout while establishing the session.")]
    Timeout,
    /// Error while interacting with the shell or the file system
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Error while executing a command.
    #[error("Non-zero exit code of command {1} on {0}: {2}")]
    CommandError(String, String, i32),
    /// The given node path does not name a file.
    #[error("Invalid file path: {0:?}")]
    InvalidPath(String),
    /// Cannot parse output as utf8
    #[error("Cannot parse output as UTF-8: {0}")]
    FromUtf8(#[from] FromUtf8Error),
}

impl ShellError {
    /// Return the status code if the error was a [`ShellError::CommandError`]. Otherwise, return
    /// `None`.
    pub fn status(&self) -> Option<i32> {
        if let ShellError::CommandError(_, _, status) = self {
            Some(*status)
        } else {
            None
        }
    }
}
