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

//! # core-services: CORE service descriptors for emulated 5G/4G networks
//!
//! This library describes how to bootstrap the network functions of a 5G core (Open5GS), a 4G
//! EPC, a simulated 5G RAN (UERANSIM) and some security tooling inside the nodes of the CORE
//! network emulator.
//!
//! Every service is a [`ServiceDescriptor`]: a static record naming the executables it needs,
//! the directories and config files it creates inside the node, and the shell commands that
//! start, validate and stop it. Most config files are fixed templates. Templates may contain
//! tokens like `<IP OF AMF HERE>` that the operator replaces by hand; they are never
//! substituted. Only the NAT service derives its script from the node
//! ([`nat::generate_nat_script`]).
//!
//! ## Structure
//! The source code of this library is structured as follows:
//! - The module [`descriptor`] defines the [`ServiceDescriptor`], its config files and their
//!   [`Generator`], and the [`ValidationMode`].
//! - The module [`services`] contains all service definitions, grouped into the 5G core, the
//!   4G EPC, the 5G RAN and security services.
//! - The module [`catalog`] registers all services by name ([`struct@CATALOG`]), checks which of
//!   them can run on the host, and computes the order in which to start them.
//! - The module [`generator`] produces the content of a config file
//!   ([`generate_config`]).
//! - The module [`runtime`] writes the services into a node directory and runs them on the
//!   local host, using the session of the crate [`node_lab`].
//!
//! ```
//! use core_services::{generate_config, CATALOG};
//! use node_lab::{Interface, Node};
//!
//! let node = Node::new("n1")
//!     .with_interface(Interface::control("ctrl0"))
//!     .with_interface(Interface::new("eth0"));
//! let nat = CATALOG.get("NAT").unwrap();
//! let script = generate_config(nat, &node, "nat.sh");
//! assert!(script.contains("-o eth0 -j MASQUERADE"));
//! assert!(!script.contains("ctrl0"));
//! ```

#![deny(
    missing_docs,
    clippy::missing_docs_in_private_items,
    missing_debug_implementations,
    rust_2018_idioms
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod descriptor;
pub mod generator;
pub mod nat;
pub mod runtime;
pub mod services;
#[cfg(test)]
mod test;

pub use catalog::{Catalog, CatalogError, CATALOG};
pub use descriptor::{ConfigFile, Generator, ServiceDescriptor, ValidationMode};
pub use generator::{generate_config, generate_config_in, CORE_DATA_DIR};
pub use nat::generate_nat_script;
