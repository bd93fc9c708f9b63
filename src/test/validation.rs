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

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time::{timeout, Instant};

use super::MockExecutor;
use crate::{
    descriptor::{ServiceDescriptor, ValidationMode},
    runtime::{boot_service, shutdown_service, ServiceState::*},
};

static POLLED: ServiceDescriptor = ServiceDescriptor {
    startup: &["start"],
    validate: &["check"],
    shutdown: &["stop", "cleanup"],
    ..ServiceDescriptor::new("Polled", "Test")
};

static POLLED_TWO: ServiceDescriptor = ServiceDescriptor {
    startup: &["start"],
    validate: &["check-a", "check-b"],
    ..ServiceDescriptor::new("PolledTwo", "Test")
};

static UNCHECKED: ServiceDescriptor = ServiceDescriptor {
    startup: &["start"],
    ..ServiceDescriptor::new("Unchecked", "Test")
};

static BLOCKING: ServiceDescriptor = ServiceDescriptor {
    startup: &["start-1", "start-2"],
    validate: &["check"],
    validation_mode: ValidationMode::Blocking,
    ..ServiceDescriptor::new("Blocking", "Test")
};

static DAEMON: ServiceDescriptor = ServiceDescriptor {
    startup: &["daemon --foreground"],
    validate: &["check"],
    ..ServiceDescriptor::new("Daemon", "Test")
};

static TIMER_DAEMON: ServiceDescriptor = ServiceDescriptor {
    startup: &["daemon --foreground"],
    validation_mode: ValidationMode::Timer,
    ..ServiceDescriptor::new("TimerDaemon", "Test")
};

static BLOCKING_DAEMON: ServiceDescriptor = ServiceDescriptor {
    startup: &["daemon --foreground"],
    validation_mode: ValidationMode::Blocking,
    ..ServiceDescriptor::new("BlockingDaemon", "Test")
};

static TIMER: ServiceDescriptor = ServiceDescriptor {
    startup: &["start"],
    validate: &["check"],
    validation_mode: ValidationMode::Timer,
    validation_timer: Duration::from_secs(3),
    ..ServiceDescriptor::new("Timer", "Test")
};

#[test_log::test(tokio::test(start_paused = true))]
async fn non_blocking_fails_after_timer() {
    let exec = MockExecutor::new().with_codes("check", [1]);
    let start = Instant::now();
    let report = boot_service(&POLLED, &exec).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.state, Failed);
    assert_eq!(report.trace, vec![NotStarted, Starting, Validating, Failed]);
    assert_eq!(report.validation_rounds, 10);
    assert_eq!(report.failed_command.as_deref(), Some("check"));

    let times = exec.times_of("check");
    assert_eq!(times.len(), 10);
    for (i, t) in times.iter().enumerate() {
        assert_eq!(*t, Duration::from_millis(500 * i as u64));
    }
    assert!(elapsed >= Duration::from_secs(5), "failed too early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(5500), "failed too late: {elapsed:?}");
}

#[test_log::test(tokio::test(start_paused = true))]
async fn non_blocking_succeeds_eventually() {
    let exec = MockExecutor::new().with_codes("check", [1, 1, 1, 0]);
    let start = Instant::now();
    let report = boot_service(&POLLED, &exec).await.unwrap();

    assert_eq!(report.state, Healthy);
    assert_eq!(report.trace, vec![NotStarted, Starting, Validating, Healthy]);
    assert_eq!(report.validation_rounds, 4);
    assert_eq!(report.failed_command, None);
    assert_eq!(start.elapsed(), Duration::from_millis(1500));
    assert_eq!(exec.spawned(), vec![("start".to_string(), Duration::ZERO)]);
    assert_eq!(exec.commands(), vec!["check", "check", "check", "check"]);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn non_blocking_round_needs_all_commands() {
    let exec = MockExecutor::new()
        .with_codes("check-a", [0])
        .with_codes("check-b", [1, 0]);
    let report = boot_service(&POLLED_TWO, &exec).await.unwrap();
    assert_eq!(report.state, Healthy);
    assert_eq!(report.validation_rounds, 2);
    assert_eq!(
        exec.commands(),
        vec!["check-a", "check-b", "check-a", "check-b"]
    );

    // a failing command stops the round
    let exec = MockExecutor::new().with_codes("check-a", [1, 0]);
    let report = boot_service(&POLLED_TWO, &exec).await.unwrap();
    assert_eq!(report.state, Healthy);
    assert_eq!(
        exec.commands(),
        vec!["check-a", "check-a", "check-b"]
    );
}

#[test_log::test(tokio::test(start_paused = true))]
async fn non_blocking_without_validation_commands() {
    let exec = MockExecutor::new();
    let start = Instant::now();
    let report = boot_service(&UNCHECKED, &exec).await.unwrap();
    assert_eq!(report.trace, vec![NotStarted, Starting, Healthy]);
    assert_eq!(report.validation_rounds, 0);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn background_startup_is_not_checked() {
    let exec = MockExecutor::new().with_codes("start", [2]);
    let report = boot_service(&POLLED, &exec).await.unwrap();
    assert_eq!(report.trace, vec![NotStarted, Starting, Validating, Healthy]);
    assert_eq!(exec.spawned(), vec![("start".to_string(), Duration::ZERO)]);
    assert_eq!(exec.commands(), vec!["check"]);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn non_blocking_with_running_startup() {
    // fails when the daemon never comes up
    let exec = MockExecutor::new()
        .with_running("daemon --foreground")
        .with_codes("check", [1]);
    let start = Instant::now();
    let report = timeout(Duration::from_secs(6), boot_service(&DAEMON, &exec))
        .await
        .expect("validation must start while the startup command is running")
        .unwrap();
    assert_eq!(report.trace, vec![NotStarted, Starting, Validating, Failed]);
    assert_eq!(report.validation_rounds, 10);
    assert_eq!(start.elapsed(), Duration::from_secs(5));
    assert_eq!(exec.commands().len(), 10);

    // healthy once the daemon answers
    let exec = MockExecutor::new()
        .with_running("daemon --foreground")
        .with_codes("check", [1, 0]);
    let report = timeout(Duration::from_secs(6), boot_service(&DAEMON, &exec))
        .await
        .expect("validation must start while the startup command is running")
        .unwrap();
    assert_eq!(report.state, Healthy);
    assert_eq!(report.validation_rounds, 2);
    assert_eq!(
        exec.spawned(),
        vec![("daemon --foreground".to_string(), Duration::ZERO)]
    );
}

#[test_log::test(tokio::test(start_paused = true))]
async fn timer_with_running_startup() {
    let exec = MockExecutor::new().with_running("daemon --foreground");
    let start = Instant::now();
    let report = timeout(Duration::from_secs(6), boot_service(&TIMER_DAEMON, &exec))
        .await
        .expect("the timer must run while the startup command is running")
        .unwrap();
    assert_eq!(report.trace, vec![NotStarted, Starting, Validating, Healthy]);
    assert_eq!(start.elapsed(), Duration::from_secs(5));
    assert!(exec.commands().is_empty());
}

#[test_log::test(tokio::test(start_paused = true))]
async fn blocking_waits_for_startup() {
    let exec = MockExecutor::new().with_running("daemon --foreground");
    let result = timeout(Duration::from_secs(60), boot_service(&BLOCKING_DAEMON, &exec)).await;
    assert!(result.is_err());
    assert!(exec.spawned().is_empty());
    assert_eq!(exec.commands(), vec!["daemon --foreground"]);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn blocking_never_validates() {
    let exec = MockExecutor::new().with_codes("check", [1]);
    let report = boot_service(&BLOCKING, &exec).await.unwrap();
    assert_eq!(report.trace, vec![NotStarted, Starting, Healthy]);
    assert_eq!(exec.commands(), vec!["start-1", "start-2"]);

    let exec = MockExecutor::new().with_codes("start-1", [1]);
    let report = boot_service(&BLOCKING, &exec).await.unwrap();
    assert_eq!(report.state, Failed);
    assert_eq!(report.failed_command.as_deref(), Some("start-1"));
    assert_eq!(exec.commands(), vec!["start-1"]);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn timer_waits_without_validation() {
    let exec = MockExecutor::new().with_codes("check", [1]);
    let start = Instant::now();
    let report = boot_service(&TIMER, &exec).await.unwrap();
    assert_eq!(report.trace, vec![NotStarted, Starting, Validating, Healthy]);
    assert_eq!(report.validation_rounds, 0);
    assert_eq!(start.elapsed(), Duration::from_secs(3));
    assert_eq!(exec.spawned(), vec![("start".to_string(), Duration::ZERO)]);
    assert!(exec.commands().is_empty());
}

#[test_log::test(tokio::test)]
async fn shutdown_runs_all_commands() {
    let exec = MockExecutor::new().with_codes("stop", [1]);
    assert_eq!(shutdown_service(&POLLED, &exec).await.unwrap(), 1);
    assert_eq!(exec.commands(), vec!["stop", "cleanup"]);

    let exec = MockExecutor::new();
    assert_eq!(shutdown_service(&UNCHECKED, &exec).await.unwrap(), 0);
    assert!(exec.commands().is_empty());
}

#[test]
fn state_display() {
    assert_eq!(Healthy.to_string(), "healthy");
    assert_eq!(NotStarted.to_string(), "not started");
}
