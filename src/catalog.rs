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

//! The catalog of services, keyed by their name.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use lazy_static::lazy_static;
use thiserror::Error;

use crate::{descriptor::ServiceDescriptor, services};

lazy_static! {
    /// Catalog of all services of this crate.
    pub static ref CATALOG: Catalog = Catalog::builtin();
}

/// Read-only registry of service descriptors. Services keep the order in which they were
/// registered.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All services in order
    services: Vec<&'static ServiceDescriptor>,
    /// Index of each service in `services`
    index: HashMap<&'static str, usize>,
}

/// Result of checking which services can run on this host.
#[derive(Debug, Clone)]
pub struct Availability {
    /// Catalog of all services whose executables were found.
    pub available: Catalog,
    /// Services that miss at least one executable.
    pub unavailable: Vec<Unavailable>,
}

/// A service that cannot be loaded on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    /// The service
    pub service: &'static str,
    /// Executables that were not found
    pub missing: Vec<&'static str>,
}

impl Catalog {
    /// Create a catalog from a list of services. Returns an error if two services have the same
    /// name.
    pub fn from_services(
        services: impl IntoIterator<Item = &'static ServiceDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for service in services {
            if catalog.index.contains_key(service.name) {
                return Err(CatalogError::DuplicateService(service.name.to_string()));
            }
            catalog.index.insert(service.name, catalog.services.len());
            catalog.services.push(service);
        }
        Ok(catalog)
    }

    /// Catalog of all services in [`services::ALL`].
    fn builtin() -> Self {
        Self::from_services(services::ALL.iter().copied()).unwrap()
    }

    /// Get the service with the given name.
    pub fn get(&self, name: &str) -> Option<&'static ServiceDescriptor> {
        self.index.get(name).map(|i| self.services[*i])
    }

    /// Get the service with the given name, or return [`CatalogError::UnknownService`].
    pub fn lookup(&self, name: &str) -> Result<&'static ServiceDescriptor, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownService(name.to_string()))
    }

    /// Iterate over all services in order.
    pub fn iter(&self) -> impl Iterator<Item = &'static ServiceDescriptor> + '_ {
        self.services.iter().copied()
    }

    /// Iterate over all services of a group, in order.
    pub fn group<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = &'static ServiceDescriptor> + 'a {
        self.iter().filter(move |s| s.group == group)
    }

    /// Get all groups, in the order of their first service.
    pub fn groups(&self) -> Vec<&'static str> {
        self.iter().map(|s| s.group).unique().collect()
    }

    /// Number of services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if the catalog contains no service.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Split the catalog into the services whose executables exist on this host, and those that
    /// miss some of them. Unavailable services are logged, but are not an error.
    pub fn check_availability(&self) -> Availability {
        self.check_availability_with(|s| s.missing_executables())
    }

    /// Same as [`Catalog::check_availability`], but with a custom function that returns the
    /// missing executables of a service.
    pub fn check_availability_with<F>(&self, mut missing: F) -> Availability
    where
        F: FnMut(&ServiceDescriptor) -> Vec<&'static str>,
    {
        let mut available = Catalog::default();
        let mut unavailable = Vec::new();
        for service in self.iter() {
            let missing = missing(service);
            if missing.is_empty() {
                available.index.insert(service.name, available.services.len());
                available.services.push(service);
            } else {
                log::warn!(
                    "Service {} is not available: missing executables {}",
                    service.name,
                    missing.iter().join(", ")
                );
                unavailable.push(Unavailable {
                    service: service.name,
                    missing,
                });
            }
        }
        Availability {
            available,
            unavailable,
        }
    }

    /// Order the requested services such that every service comes after all its dependencies.
    /// Dependencies that were not requested are added. Apart from that, services keep the order
    /// in which they are requested, and each service appears only once.
    pub fn boot_order<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<&'static ServiceDescriptor>, CatalogError> {
        let mut order = Vec::new();
        let mut done = HashSet::new();
        let mut path = Vec::new();
        for name in names {
            self.visit(name, &mut path, &mut done, &mut order)?;
        }
        Ok(order)
    }

    /// Depth-first visit of `name` and its dependencies. `path` contains the services currently
    /// being visited.
    fn visit(
        &self,
        name: &str,
        path: &mut Vec<&'static str>,
        done: &mut HashSet<&'static str>,
        order: &mut Vec<&'static ServiceDescriptor>,
    ) -> Result<(), CatalogError> {
        let service = self.lookup(name)?;
        if done.contains(service.name) {
            return Ok(());
        }
        if let Some(pos) = path.iter().position(|s| *s == service.name) {
            let mut cycle = path[pos..].iter().map(|s| s.to_string()).collect_vec();
            cycle.push(service.name.to_string());
            return Err(CatalogError::DependencyCycle(cycle));
        }
        path.push(service.name);
        for dep in service.dependencies {
            self.visit(dep, path, done, order)?;
        }
        path.pop();
        done.insert(service.name);
        order.push(service);
        Ok(())
    }
}

/// Errors of the catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No service with this name is registered.
    #[error("Unknown service: {0}")]
    UnknownService(String),
    /// Two services have the same name.
    #[error("Service {0} is defined twice")]
    DuplicateService(String),
    /// The dependencies of the services form a cycle.
    #[error("Cyclic dependency: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),
}
