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

//! Starting and stopping services on a node, following their validation policy.

use std::fmt;

use node_lab::{CommandExecutor, ShellError};
use tokio::time::{sleep, Instant};

use crate::descriptor::{ServiceDescriptor, ValidationMode};

/// The state of a service on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ServiceState {
    /// No command was executed yet.
    NotStarted,
    /// The startup commands are running.
    Starting,
    /// Waiting for the validation policy to decide.
    Validating,
    /// The service has started successfully.
    Healthy,
    /// The service did not start.
    Failed,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServiceState::NotStarted => "not started",
            ServiceState::Starting => "starting",
            ServiceState::Validating => "validating",
            ServiceState::Healthy => "healthy",
            ServiceState::Failed => "failed",
        })
    }
}

/// Outcome of [`boot_service`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BootReport {
    /// Name of the service
    pub service: &'static str,
    /// Final state, either [`ServiceState::Healthy`] or [`ServiceState::Failed`].
    pub state: ServiceState,
    /// All states the service went through, including the final one.
    pub trace: Vec<ServiceState>,
    /// Number of rounds of validation commands that were executed.
    pub validation_rounds: usize,
    /// The last command that exited with a non-zero exit code, if the service failed.
    pub failed_command: Option<String>,
}

impl BootReport {
    /// Create a report for a service that was not started yet.
    fn new(service: &'static str) -> Self {
        Self {
            service,
            state: ServiceState::NotStarted,
            trace: vec![ServiceState::NotStarted],
            validation_rounds: 0,
            failed_command: None,
        }
    }

    /// Move to the next state.
    fn enter(&mut self, state: ServiceState) {
        self.state = state;
        self.trace.push(state);
    }

    /// Returns `true` if the service is healthy.
    pub fn is_healthy(&self) -> bool {
        self.state == ServiceState::Healthy
    }
}

/// Start the service using the executor, and wait until its validation policy decides whether
/// the startup was successful:
///
/// - [`ValidationMode::Blocking`]: The startup commands are executed one after the other, and
///   each of them must exit with 0. The service is healthy once all of them succeeded.
/// - [`ValidationMode::NonBlocking`]: The startup commands are started in the background without
///   waiting for them to exit. Then, all validation commands are run every
///   `validation_period`, until one round succeeds. If `validation_timer` has elapsed after a
///   failed round, the service has failed. Without any validation command, the service is
///   healthy right away.
/// - [`ValidationMode::Timer`]: The startup commands are started in the background. After
///   `validation_timer`, the service is healthy.
///
/// Only errors of the executor itself (a command that could not be spawned) are returned as
/// `Err`.
pub async fn boot_service<E>(
    service: &'static ServiceDescriptor,
    executor: &E,
) -> Result<BootReport, ShellError>
where
    E: CommandExecutor + ?Sized,
{
    let mut report = BootReport::new(service.name);
    let node = executor.name();

    report.enter(ServiceState::Starting);
    log::debug!("[{node}] starting {}", service.name);
    if service.validation_mode == ValidationMode::Blocking {
        for cmd in service.startup {
            let code = executor.execute(cmd).await?;
            if code != 0 {
                log::error!(
                    "[{node}] {}: startup command `{cmd}` exited with {code}",
                    service.name
                );
                report.failed_command = Some(cmd.to_string());
                report.enter(ServiceState::Failed);
                return Ok(report);
            }
        }
    } else {
        for cmd in service.startup {
            executor.spawn(cmd).await?;
        }
    }

    match service.validation_mode {
        ValidationMode::Blocking => {}
        ValidationMode::Timer => {
            report.enter(ServiceState::Validating);
            log::debug!(
                "[{node}] waiting {:?} for {}",
                service.validation_timer,
                service.name
            );
            sleep(service.validation_timer).await;
        }
        ValidationMode::NonBlocking if service.validate.is_empty() => {}
        ValidationMode::NonBlocking => {
            report.enter(ServiceState::Validating);
            let start = Instant::now();
            loop {
                report.validation_rounds += 1;
                match validation_round(service, executor).await? {
                    None => break,
                    Some(cmd) => {
                        log::trace!(
                            "[{node}] {}: validation round {} failed at `{cmd}`",
                            service.name,
                            report.validation_rounds
                        );
                        report.failed_command = Some(cmd.to_string());
                    }
                }
                sleep(service.validation_period).await;
                if start.elapsed() >= service.validation_timer {
                    log::error!(
                        "[{node}] {} did not validate within {:?} ({} rounds)",
                        service.name,
                        service.validation_timer,
                        report.validation_rounds
                    );
                    report.enter(ServiceState::Failed);
                    return Ok(report);
                }
            }
            report.failed_command = None;
        }
    }

    log::info!("[{node}] {} is healthy", service.name);
    report.enter(ServiceState::Healthy);
    Ok(report)
}

/// Run all validation commands once. Returns the first command that failed, or `None` if all
/// of them succeeded.
async fn validation_round<E>(
    service: &'static ServiceDescriptor,
    executor: &E,
) -> Result<Option<&'static str>, ShellError>
where
    E: CommandExecutor + ?Sized,
{
    for cmd in service.validate {
        if executor.execute(cmd).await? != 0 {
            return Ok(Some(*cmd));
        }
    }
    Ok(None)
}

/// Stop the service by running all its shutdown commands. Commands with a non-zero exit code are
/// logged, and the remaining commands are still executed. Returns the number of commands that
/// failed.
pub async fn shutdown_service<E>(
    service: &'static ServiceDescriptor,
    executor: &E,
) -> Result<usize, ShellError>
where
    E: CommandExecutor + ?Sized,
{
    let node = executor.name();
    let mut failed = 0;
    for cmd in service.shutdown {
        let code = executor.execute(cmd).await?;
        if code != 0 {
            log::warn!("[{node}] {}: shutdown command `{cmd}` exited with {code}", service.name);
            failed += 1;
        }
    }
    log::debug!("[{node}] stopped {}", service.name);
    Ok(failed)
}
