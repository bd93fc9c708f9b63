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

//! Generation of the configuration files of a service.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use node_lab::Node;

use crate::descriptor::ServiceDescriptor;

/// Environment variable overriding the CORE data directory.
pub const DATA_DIR_ENV: &str = "CORE_DATA_DIR";
/// Data directory of a CORE installation.
pub const DEFAULT_DATA_DIR: &str = "/usr/share/core";

lazy_static! {
    /// The CORE data directory, containing `examples/services/` with the samples of the security
    /// services. Read from the environment variable `CORE_DATA_DIR`, defaulting to
    /// `/usr/share/core`.
    pub static ref CORE_DATA_DIR: PathBuf = if cfg!(test) {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    } else {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    };
}

/// Generate the content of `filename` of `service` for `node`, using the samples in
/// [`struct@CORE_DATA_DIR`].
///
/// If `filename` is not one of the config files of the service, an empty string is returned.
pub fn generate_config(service: &ServiceDescriptor, node: &Node, filename: &str) -> String {
    generate_config_in(service, node, filename, &CORE_DATA_DIR)
}

/// Generate the content of `filename` of `service` for `node`, reading samples from
/// `data_dir`. If `filename` is not one of the config files of the service, an empty string is
/// returned.
pub fn generate_config_in(
    service: &ServiceDescriptor,
    node: &Node,
    filename: &str,
    data_dir: &Path,
) -> String {
    match service.config(filename) {
        Some(config) => {
            log::trace!("[{}] generate {} of {}", node.name, filename, service.name);
            config.generator.render(node, data_dir)
        }
        None => {
            log::warn!(
                "[{}] Service {} has no config file named {:?}",
                node.name,
                service.name,
                filename
            );
            String::new()
        }
    }
}

/// Build a shell script from a sample in `<data_dir>/examples/services/`. If the sample cannot be
/// read, the error is logged and only the shebang and the header are returned.
pub fn render_data_template(header: &str, sample: &str, data_dir: &Path) -> String {
    let mut cfg = format!("#!/bin/sh\n{header}\n");
    let path = data_dir.join("examples").join("services").join(sample);
    match std::fs::read_to_string(&path) {
        Ok(content) => cfg.push_str(&content),
        Err(e) => log::error!("Error opening config file {}: {e}", path.display()),
    }
    cfg
}
