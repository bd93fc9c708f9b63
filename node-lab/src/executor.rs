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

//! Abstraction over the process executor of a node.

use async_trait::async_trait;

use crate::shell::{ShellError, ShellSession};

/// Exit code reported for processes that were terminated by a signal.
pub const SIGNALED: i32 = -1;

/// A trait for running service commands inside a node. The executor only reports the exit code;
/// interpreting it is up to the caller.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Name of the node on which the commands are executed, used for logging.
    fn name(&self) -> &str;

    /// Execute the command line and wait for it to terminate. Returns the exit code, or
    /// [`SIGNALED`] if the process was killed by a signal. An error is returned only if the
    /// command could not be executed at all.
    async fn execute(&self, cmd: &str) -> Result<i32, ShellError>;

    /// Start the command line in the background without waiting for it to terminate. Its exit
    /// code is never observed. An error is returned only if the command could not be started.
    async fn spawn(&self, cmd: &str) -> Result<(), ShellError>;
}

#[async_trait]
impl CommandExecutor for ShellSession {
    fn name(&self) -> &str {
        ShellSession::name(self)
    }

    async fn execute(&self, cmd: &str) -> Result<i32, ShellError> {
        let status = self.execute_cmd_status(cmd).await?;
        Ok(status.code().unwrap_or(SIGNALED))
    }

    async fn spawn(&self, cmd: &str) -> Result<(), ShellError> {
        self.spawn_cmd(cmd)?;
        Ok(())
    }
}
