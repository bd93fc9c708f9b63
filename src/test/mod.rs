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

mod validation;

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use node_lab::{CommandExecutor, Interface, Node, ShellError};
use tokio::time::Instant;

/// A node with a control interface and two data interfaces.
pub(crate) fn test_node() -> Node {
    Node::new("n1")
        .with_interface(Interface::control("eth0"))
        .with_interface(Interface::new("eth1"))
        .with_interface(Interface::new("eth2"))
}

/// Executor that does not run anything, but records every command with the (tokio) time at which
/// it was executed. Exit codes are taken from a queue per command; the last exit code of a queue
/// is repeated forever. Commands without a queue exit with 0. Commands marked as running never
/// exit when executed; they can only be spawned.
#[derive(Debug)]
pub(crate) struct MockExecutor {
    /// Time at which the executor was created
    start: Instant,
    /// Exit codes of each command
    codes: Mutex<HashMap<String, VecDeque<i32>>>,
    /// Commands that never terminate
    running: HashSet<String>,
    /// All executed commands
    calls: Mutex<Vec<(String, Duration)>>,
    /// All commands started in the background
    spawned: Mutex<Vec<(String, Duration)>>,
}

impl MockExecutor {
    pub(crate) fn new() -> Self {
        Self {
            start: Instant::now(),
            codes: Mutex::new(HashMap::new()),
            running: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            spawned: Mutex::new(Vec::new()),
        }
    }

    /// Set the sequence of exit codes of a command.
    pub(crate) fn with_codes(self, cmd: &str, codes: impl IntoIterator<Item = i32>) -> Self {
        self.codes
            .lock()
            .unwrap()
            .insert(cmd.to_string(), codes.into_iter().collect());
        self
    }

    /// Mark a command as a process that never terminates.
    pub(crate) fn with_running(mut self, cmd: &str) -> Self {
        self.running.insert(cmd.to_string());
        self
    }

    /// All commands started in the background, with the time at which they were started.
    pub(crate) fn spawned(&self) -> Vec<(String, Duration)> {
        self.spawned.lock().unwrap().clone()
    }

    /// All executed commands, in order.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Times at which `cmd` was executed.
    pub(crate) fn times_of(&self, cmd: &str) -> Vec<Duration> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == cmd)
            .map(|(_, t)| *t)
            .collect()
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, cmd: &str) -> Result<i32, ShellError> {
        self.calls
            .lock()
            .unwrap()
            .push((cmd.to_string(), self.start.elapsed()));
        if self.running.contains(cmd) {
            std::future::pending::<()>().await;
        }
        let mut codes = self.codes.lock().unwrap();
        Ok(match codes.get_mut(cmd) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().copied().unwrap_or(0),
            None => 0,
        })
    }

    async fn spawn(&self, cmd: &str) -> Result<(), ShellError> {
        self.spawned
            .lock()
            .unwrap()
            .push((cmd.to_string(), self.start.elapsed()));
        Ok(())
    }
}
