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

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use node_lab::{Node, ShellSession};

use core_services::{
    catalog::CATALOG,
    generator::{generate_config_in, CORE_DATA_DIR},
    nat::generate_nat_script,
    runtime::{self, RuntimeError},
    ServiceDescriptor,
};

/// Inspect, render and run the CORE services of emulated 5G/4G networks.
#[derive(Debug, Parser)]
struct Cli {
    /// What to do
    #[clap(subcommand)]
    cmd: Cmd,
}

/// Subcommands of the CLI
#[derive(Debug, Subcommand)]
enum Cmd {
    /// List all services.
    List {
        /// Only list services of this group (e.g., "5G", "4G", "5G-RAN" or "Security").
        #[clap(long, short)]
        group: Option<String>,
        /// Check whether the executables of each service exist on this host.
        #[clap(long, short)]
        check: bool,
    },
    /// Show the metadata of a service.
    Show {
        /// Name of the service
        service: String,
        /// Print the descriptor as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Print the generated config files of a service.
    Render {
        /// Name of the service
        service: String,
        /// TOML file describing the node
        #[clap(long, short)]
        node: PathBuf,
        /// Only print this config file.
        #[clap(long, short)]
        file: Option<String>,
        /// CORE data directory containing the samples of the security services.
        #[clap(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print the NAT script of a node.
    Nat {
        /// TOML file describing the node
        #[clap(long, short)]
        node: PathBuf,
    },
    /// Write the directories and config files of services into a node directory.
    Install {
        /// Names of the services
        #[clap(required = true)]
        services: Vec<String>,
        /// TOML file describing the node
        #[clap(long, short)]
        node: PathBuf,
        /// The node directory
        #[clap(long, short)]
        dir: PathBuf,
        /// CORE data directory containing the samples of the security services.
        #[clap(long)]
        data_dir: Option<PathBuf>,
    },
    /// Run the shutdown commands of services in reverse dependency order.
    Stop {
        /// Names of the services
        #[clap(required = true)]
        services: Vec<String>,
        /// TOML file describing the node
        #[clap(long, short)]
        node: PathBuf,
        /// The node directory
        #[clap(long, short)]
        dir: PathBuf,
    },
    /// Install the services in a node directory, and start them in dependency order.
    Boot {
        /// Names of the services
        #[clap(required = true)]
        services: Vec<String>,
        /// TOML file describing the node
        #[clap(long, short)]
        node: PathBuf,
        /// The node directory
        #[clap(long, short)]
        dir: PathBuf,
        /// CORE data directory containing the samples of the security services.
        #[clap(long)]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_timed();

    let args = Cli::parse();

    match args.cmd {
        Cmd::List { group, check } => {
            let availability = check.then(|| CATALOG.check_availability());
            for service in CATALOG.iter() {
                if group.as_ref().map(|g| g.as_str() != service.group).unwrap_or(false) {
                    continue;
                }
                let status = match &availability {
                    None => String::new(),
                    Some(a) => match a.unavailable.iter().find(|u| u.service == service.name) {
                        None => "  available".to_string(),
                        Some(u) => format!("  missing {}", u.missing.iter().join(", ")),
                    },
                };
                println!("{:<8} {:<10}{status}", service.group, service.name);
            }
        }
        Cmd::Show { service, json } => {
            let service = CATALOG.lookup(&service)?;
            if json {
                println!("{}", serde_json::to_string_pretty(service)?);
            } else {
                print_descriptor(service);
            }
        }
        Cmd::Render {
            service,
            node,
            file,
            data_dir,
        } => {
            let service = CATALOG.lookup(&service)?;
            let node = Node::from_file(node)?;
            let data_dir = data_dir.unwrap_or_else(|| CORE_DATA_DIR.clone());
            let files = match file {
                Some(f) => vec![f],
                None => service.config_files().map(String::from).collect(),
            };
            for file in files {
                println!("==> {file} <==");
                print!("{}", generate_config_in(service, &node, &file, &data_dir));
            }
        }
        Cmd::Nat { node } => {
            let node = Node::from_file(node)?;
            print!("{}", generate_nat_script(&node));
        }
        Cmd::Install {
            services,
            node,
            dir,
            data_dir,
        } => {
            let node = Node::from_file(node)?;
            let data_dir = data_dir.unwrap_or_else(|| CORE_DATA_DIR.clone());
            let order = CATALOG.boot_order(services.iter().map(String::as_str))?;
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(async move {
                    let session = ShellSession::new(node.name.clone(), dir).await?;
                    for service in order {
                        let files =
                            runtime::install_service(service, &node, &session, &data_dir).await?;
                        for file in files {
                            println!("{:<10} {}", service.name, file.display());
                        }
                    }
                    Ok::<(), RuntimeError>(())
                })?;
        }
        Cmd::Boot {
            services,
            node,
            dir,
            data_dir,
        } => {
            let node = Node::from_file(node)?;
            let data_dir = data_dir.unwrap_or_else(|| CORE_DATA_DIR.clone());
            let reports = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(async move {
                    let session = ShellSession::new(node.name.clone(), dir).await?;
                    let reports = runtime::start_services(
                        &CATALOG,
                        services.iter().map(String::as_str),
                        &node,
                        &session,
                        &data_dir,
                    )
                    .await?;
                    Ok::<_, RuntimeError>(reports)
                })?;
            for report in &reports {
                println!("{:<10} {}", report.service, report.state);
            }
            if reports.iter().any(|r| !r.is_healthy()) {
                std::process::exit(1);
            }
        }
        Cmd::Stop {
            services,
            node,
            dir,
        } => {
            let node = Node::from_file(node)?;
            let failed = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(async move {
                    let session = ShellSession::new(node.name.clone(), dir).await?;
                    let failed = runtime::stop_services(
                        &CATALOG,
                        services.iter().map(String::as_str),
                        &session,
                    )
                    .await?;
                    Ok::<_, RuntimeError>(failed)
                })?;
            if failed > 0 {
                log::warn!("{failed} shutdown commands failed");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Print the metadata of a service in a human-readable form.
fn print_descriptor(service: &ServiceDescriptor) {
    println!("name:              {}", service.name);
    println!("group:             {}", service.group);
    println!("executables:       {}", service.executables.iter().join(", "));
    println!("dependencies:      {}", service.dependencies.iter().join(", "));
    println!("directories:       {}", service.directories.iter().join(", "));
    println!("config files:      {}", service.config_files().join(", "));
    println!("startup:           {}", service.startup.iter().join("; "));
    println!("validate:          {}", service.validate.iter().join("; "));
    println!("shutdown:          {}", service.shutdown.iter().join("; "));
    println!("validation mode:   {:?}", service.validation_mode);
    println!("validation timer:  {:?}", service.validation_timer);
    println!("validation period: {:?}", service.validation_period);
    println!("custom needed:     {}", service.custom_needed);
}
