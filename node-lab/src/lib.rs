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

//! This library contains the node side of the CORE services: a description of emulated nodes and
//! a local session that can materialize and run services inside a node directory.
//!
//! # Node descriptions
//!
//! A node is described by its name and the ordered list of its network interfaces. Interfaces can
//! be flagged as control interfaces (the management network CORE attaches to every node). Node
//! descriptions are read from TOML files:
//!
//! ```toml
//! name = "n1"
//!
//! [[interfaces]]
//! name = "ctrl0"
//! control = true
//!
//! [[interfaces]]
//! name = "eth0"
//! ```
//!
//! See [`Node::from_file`].
//!
//! # Node directory
//!
//! CORE keeps the files of each node in a node directory on the host. Private directories of the
//! node (like `/etc/open5gs`) are stored in that node directory with all slashes replaced by dots
//! (`etc.open5gs`), and files are written into the flattened directory of their parent. The
//! [`ShellSession`] uses the same scheme, such that generated start scripts can refer to
//! `etc.mongo/mongodb.conf`:
//!
//! ```text
//!   node path                        host path
//!   /etc/open5gs              ->     <root>/etc.open5gs
//!   /etc/open5gs/amf.yaml     ->     <root>/etc.open5gs/amf.yaml
//!   start_amf.sh              ->     <root>/start_amf.sh
//! ```
//!
//! # Command Execution
//!
//! All commands of a service are shell command lines. They are executed using the trait
//! [`CommandExecutor`], which either waits for a command and reports its exit code, or starts it
//! in the background (for daemons that never exit). The [`ShellSession`] implements this trait by
//! running `sh -c <command>` inside the node directory.

pub mod executables;
pub mod executor;
pub mod node;
pub mod shell;

#[cfg(test)]
mod test;

pub use executables::{find_executable, find_executable_in};
pub use executor::CommandExecutor;
pub use node::{ConfigError, Interface, Node};
pub use shell::{ShellError, ShellSession};
