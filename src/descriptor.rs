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

//! Service descriptors: the static metadata of a service, and the generators of its files.

use std::{fmt, path::Path, time::Duration};

use node_lab::{find_executable, Node};
#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Time to wait for the validation of a service before declaring it as failed.
pub const DEFAULT_VALIDATION_TIMER: Duration = Duration::from_secs(5);
/// Time between two validation rounds.
pub const DEFAULT_VALIDATION_PERIOD: Duration = Duration::from_millis(500);

/// How the runtime decides whether a service has started successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ValidationMode {
    /// The startup commands are the validation signal. Any non-zero exit code fails the service,
    /// and no validation command is executed.
    Blocking,
    /// After startup, the validation commands are polled every
    /// [`ServiceDescriptor::validation_period`] until they succeed, or until
    /// [`ServiceDescriptor::validation_timer`] has passed.
    #[default]
    NonBlocking,
    /// After startup, wait for [`ServiceDescriptor::validation_timer`] and declare the service as
    /// healthy.
    Timer,
}

/// How the content of a configuration file is produced.
#[derive(Clone, Copy)]
pub enum Generator {
    /// A fixed template, returned unchanged. Tokens like `<IP OF AMF HERE>` are left for the
    /// operator to replace.
    Static(&'static str),
    /// Content derived from the node.
    Node(fn(&Node) -> String),
    /// A shell script built from a sample file in the data directory, prefixed with
    /// `#!/bin/sh` and the `header` comment. The sample is read from
    /// `<data_dir>/examples/services/<sample>`.
    DataTemplate {
        /// Comment line placed below the shebang
        header: &'static str,
        /// File name of the sample
        sample: &'static str,
    },
}

impl Generator {
    /// Produce the content for the given node. `data_dir` is only used by
    /// [`Generator::DataTemplate`].
    pub fn render(&self, node: &Node, data_dir: &Path) -> String {
        match self {
            Generator::Static(text) => text.to_string(),
            Generator::Node(f) => f(node),
            Generator::DataTemplate { header, sample } => {
                crate::generator::render_data_template(header, sample, data_dir)
            }
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => write!(f, "Static({} bytes)", text.len()),
            Self::Node(_) => f.write_str("Node(..)"),
            Self::DataTemplate { header, sample } => f
                .debug_struct("DataTemplate")
                .field("header", header)
                .field("sample", sample)
                .finish(),
        }
    }
}

/// A file written into the node before startup.
#[derive(Debug, Clone, Copy)]
pub struct ConfigFile {
    /// Path of the file inside the node. Relative paths are placed in the node directory.
    pub name: &'static str,
    /// Generator of the content
    pub generator: Generator,
}

impl ConfigFile {
    /// Create a new config file entry.
    pub const fn new(name: &'static str, generator: Generator) -> Self {
        Self { name, generator }
    }
}

/// Static description of a service. All services are defined in [`crate::services`] and
/// registered in the [`crate::catalog::Catalog`].
///
/// Descriptors are written as `static` items, with the defaults taken from
/// [`ServiceDescriptor::new`]:
///
/// ```
/// use core_services::descriptor::{ConfigFile, Generator, ServiceDescriptor};
///
/// static HELLO: ServiceDescriptor = ServiceDescriptor {
///     configs: &[ConfigFile::new("hello.sh", Generator::Static("echo hello\n"))],
///     startup: &["sh hello.sh"],
///     ..ServiceDescriptor::new("Hello", "Utility")
/// };
///
/// assert_eq!(HELLO.config_files().collect::<Vec<_>>(), ["hello.sh"]);
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ServiceDescriptor {
    /// Unique name of the service, without spaces.
    pub name: &'static str,
    /// Group used for displaying the service.
    pub group: &'static str,
    /// Executables that must exist on the host.
    pub executables: &'static [&'static str],
    /// Services that must be started before this one.
    pub dependencies: &'static [&'static str],
    /// Directories created inside the node before startup, in order.
    pub directories: &'static [&'static str],
    /// Files written into the node before startup, in order.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_config_names"))]
    pub configs: &'static [ConfigFile],
    /// Commands starting the service.
    pub startup: &'static [&'static str],
    /// Commands checking that the service is running.
    pub validate: &'static [&'static str],
    /// Commands stopping the service.
    pub shutdown: &'static [&'static str],
    /// How startup success is determined.
    pub validation_mode: ValidationMode,
    /// Time to wait for validation before failing (or before succeeding in
    /// [`ValidationMode::Timer`]).
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_secs"))]
    pub validation_timer: Duration,
    /// Time between validation rounds in [`ValidationMode::NonBlocking`].
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_secs"))]
    pub validation_period: Duration,
    /// The generated files are samples that the operator is expected to customize.
    pub custom_needed: bool,
}

impl ServiceDescriptor {
    /// Create an empty descriptor with the default validation policy.
    pub const fn new(name: &'static str, group: &'static str) -> Self {
        Self {
            name,
            group,
            executables: &[],
            dependencies: &[],
            directories: &[],
            configs: &[],
            startup: &[],
            validate: &[],
            shutdown: &[],
            validation_mode: ValidationMode::NonBlocking,
            validation_timer: DEFAULT_VALIDATION_TIMER,
            validation_period: DEFAULT_VALIDATION_PERIOD,
            custom_needed: false,
        }
    }

    /// Iterate over the names of all config files, in order.
    pub fn config_files(&self) -> impl Iterator<Item = &'static str> {
        self.configs.iter().map(|c| c.name)
    }

    /// Get the config file entry with the given name.
    pub fn config(&self, name: &str) -> Option<&'static ConfigFile> {
        self.configs.iter().find(|c| c.name == name)
    }

    /// Generate the content of `filename` for the node. See [`crate::generator::generate_config`].
    pub fn generate_config(&self, node: &Node, filename: &str) -> String {
        crate::generator::generate_config(self, node, filename)
    }

    /// Get all executables of the service that cannot be found in `PATH`.
    pub fn missing_executables(&self) -> Vec<&'static str> {
        self.executables
            .iter()
            .copied()
            .filter(|e| find_executable(e).is_none())
            .collect()
    }
}

/// Serialize config files by their name only.
#[cfg(feature = "serde")]
fn serialize_config_names<S: Serializer>(
    configs: &&'static [ConfigFile],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(configs.iter().map(|c| c.name))
}

/// Serialize a duration as fractional seconds.
#[cfg(feature = "serde")]
fn serialize_secs<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.as_secs_f64())
}
