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

//! This module contains the description of emulated nodes, and the code for reading it.

use std::path::Path;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de::Error as _, Deserialize, Deserializer};
use thiserror::Error;

/// An emulated node, as seen by the services running on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// Name of the node
    pub name: String,
    /// All network interfaces of the node, in the order in which CORE presents them.
    #[serde(default, deserialize_with = "deserialize_interfaces")]
    pub interfaces: Vec<Interface>,
}

/// A network interface of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Interface {
    /// The name of the interface
    pub name: String,
    /// Whether the interface is connected to the control network.
    #[serde(default)]
    pub control: bool,
}

impl Node {
    /// Create a new node without any interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
        }
    }

    /// Append an interface to the node.
    ///
    /// ```
    /// use node_lab::{Interface, Node};
    ///
    /// let node = Node::new("n1")
    ///     .with_interface(Interface::control("ctrl0"))
    ///     .with_interface(Interface::new("eth0"));
    /// assert_eq!(node.data_interfaces().map(|i| i.name.as_str()).collect::<Vec<_>>(), ["eth0"]);
    /// ```
    pub fn with_interface(mut self, iface: Interface) -> Self {
        self.interfaces.push(iface);
        self
    }

    /// Iterate over all interfaces that are not connected to the control network, keeping their
    /// order.
    pub fn data_interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.iter().filter(|i| !i.control)
    }

    /// Parse a node description from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a node description from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Reading node description from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            log::error!("Cannot read '{}': {e}", path.display());
            e
        })?;
        Self::from_toml_str(&content)
    }
}

impl Interface {
    /// Create a new data interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            control: false,
        }
    }

    /// Create a new interface connected to the control network.
    pub fn control(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            control: true,
        }
    }
}

fn deserialize_interfaces<'de, D>(de: D) -> Result<Vec<Interface>, D::Error>
where
    D: Deserializer<'de>,
{
    lazy_static! {
        static ref IFACE_RE: Regex = Regex::new(r"^[A-Za-z0-9_.:-]{1,15}$").unwrap();
    }
    let ifaces: Vec<Interface> = Vec::deserialize(de)?;
    if let Some(iface) = ifaces.iter().find(|i| !IFACE_RE.is_match(&i.name)) {
        return Err(D::Error::custom(format!(
            "Invalid interface name: {:?} (at most 15 characters, no spaces or slashes)",
            iface.name
        )));
    }
    if let Some(name) = ifaces.iter().map(|i| &i.name).duplicates().next() {
        return Err(D::Error::custom(format!(
            "Interface {name:?} is defined twice"
        )));
    }
    Ok(ifaces)
}

/// Errors while reading a node description.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O Error
    #[error("Cannot read the node description: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML file is malformed.
    #[error("Cannot parse the node description: {0}")]
    Toml(#[from] toml::de::Error),
}
