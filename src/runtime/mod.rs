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

//! Runtime materializing and running services inside a node directory on the local host.
//!
//! The runtime follows the control flow of CORE: create all directories of the service, write
//! the generated config files, run the startup commands and apply the validation policy
//! ([`boot_service`]). On teardown, the shutdown commands are executed ([`shutdown_service`]),
//! either for the services given to [`stop_services`], or for all started services once
//! [`start_services`] hits a failing service.

use std::path::{Path, PathBuf};

use node_lab::{Node, ShellError, ShellSession};
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    descriptor::ServiceDescriptor,
    generator::generate_config_in,
};

mod boot;
pub use boot::{boot_service, shutdown_service, BootReport, ServiceState};

/// Create all directories of the service, and write all its config files into the node
/// directory of the session. Samples of data templates are read from `data_dir`. Returns the
/// host paths of all written files.
pub async fn install_service(
    service: &ServiceDescriptor,
    node: &Node,
    session: &ShellSession,
    data_dir: &Path,
) -> Result<Vec<PathBuf>, RuntimeError> {
    log::debug!("[{}] installing {}", session.name(), service.name);
    for dir in service.directories {
        session.create_dir(dir).await?;
    }
    let mut files = Vec::with_capacity(service.configs.len());
    for config in service.configs {
        let content = generate_config_in(service, node, config.name, data_dir);
        files.push(session.write_file(config.name, content).await?);
    }
    Ok(files)
}

/// Install and boot the given services (and their dependencies) in dependency order. Booting
/// stops after the first service that fails; the returned reports end with that service. In that
/// case, all services that were started, including the failing one, are shut down again in
/// reverse order.
pub async fn start_services<'a>(
    catalog: &Catalog,
    names: impl IntoIterator<Item = &'a str>,
    node: &Node,
    session: &ShellSession,
    data_dir: &Path,
) -> Result<Vec<BootReport>, RuntimeError> {
    let order = catalog.boot_order(names)?;
    let mut reports: Vec<BootReport> = Vec::with_capacity(order.len());
    for service in order.iter().copied() {
        install_service(service, node, session, data_dir).await?;
        let report = boot_service(service, session).await?;
        let healthy = report.is_healthy();
        reports.push(report);
        if !healthy {
            log::error!(
                "[{}] {} failed, stopping all started services",
                session.name(),
                service.name
            );
            for started in order[..reports.len()].iter().copied().rev() {
                shutdown_service(started, session).await?;
            }
            break;
        }
    }
    Ok(reports)
}

/// Shut down the given services (and their dependencies) in reverse dependency order. Returns
/// the number of shutdown commands that failed.
pub async fn stop_services<'a>(
    catalog: &Catalog,
    names: impl IntoIterator<Item = &'a str>,
    session: &ShellSession,
) -> Result<usize, RuntimeError> {
    let order = catalog.boot_order(names)?;
    let mut failed = 0;
    for service in order.into_iter().rev() {
        failed += shutdown_service(service, session).await?;
    }
    Ok(failed)
}

/// Errors of the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Error from the node session
    #[error("{0}")]
    Shell(#[from] ShellError),
    /// Error from the catalog
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}
