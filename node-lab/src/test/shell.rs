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

use std::path::Path;

use pretty_assertions::assert_eq;

use crate::{find_executable_in, CommandExecutor, ShellError, ShellSession};

#[test]
fn map_node_paths() {
    let root = Path::new("/tmp/pycore.1/n1.conf");
    assert_eq!(
        ShellSession::map_dir(root, "/etc/open5gs").unwrap(),
        root.join("etc.open5gs")
    );
    assert_eq!(
        ShellSession::map_dir(root, "/var/log/open5gs/").unwrap(),
        root.join("var.log.open5gs")
    );
    assert_eq!(
        ShellSession::map_file(root, "/etc/mongo/mongodb.conf").unwrap(),
        root.join("etc.mongo").join("mongodb.conf")
    );
    assert_eq!(
        ShellSession::map_file(root, "start_mongo.sh").unwrap(),
        root.join("start_mongo.sh")
    );
    assert_eq!(
        ShellSession::map_file(root, "/nat.sh").unwrap(),
        root.join("nat.sh")
    );
    assert!(matches!(
        ShellSession::map_file(root, "/etc/open5gs/"),
        Err(ShellError::InvalidPath(_))
    ));
    assert!(ShellSession::map_file(root, "").is_err());
}

#[test]
fn reject_paths_leaving_the_node() {
    let root = Path::new("/tmp/pycore.1/n1.conf");
    for file in ["../x", "/../x", "/etc/../../x", "./x", "/etc/./open5gs/amf.yaml"] {
        assert!(
            matches!(
                ShellSession::map_file(root, file),
                Err(ShellError::InvalidPath(p)) if p == file
            ),
            "{file}"
        );
    }
    for dir in ["..", "/..", "/etc/..", "../etc", "/var/./log"] {
        assert!(
            matches!(ShellSession::map_dir(root, dir), Err(ShellError::InvalidPath(_))),
            "{dir}"
        );
    }
    // dots inside a name are fine
    assert_eq!(
        ShellSession::map_file(root, "/etc/..hidden/x.conf").unwrap(),
        root.join("etc...hidden").join("x.conf")
    );
}

#[tokio::test]
async fn create_dir_outside_node_fails() {
    let dir = tempfile::tempdir().unwrap();
    let session = ShellSession::new("n1", dir.path().join("n1.conf"))
        .await
        .unwrap();
    assert!(session.create_dir("/../escaped").await.is_err());
    assert!(session.write_file("../escaped.sh", "true\n").await.is_err());
    assert!(!dir.path().join("escaped").exists());
    assert!(!dir.path().join("escaped.sh").exists());
}

#[tokio::test]
async fn write_and_read_files() {
    let dir = tempfile::tempdir().unwrap();
    let session = ShellSession::new("n1", dir.path().join("n1.conf"))
        .await
        .unwrap();

    let path = session.create_dir("/etc/open5gs").await.unwrap();
    assert!(path.is_dir());
    assert_eq!(path, dir.path().join("n1.conf").join("etc.open5gs"));

    let path = session
        .write_file("/etc/open5gs/amf.yaml", "amf:\n")
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "amf:\n");

    // commands run inside the node directory
    assert_eq!(
        session
            .execute_cmd_stdout("cat etc.open5gs/amf.yaml")
            .await
            .unwrap(),
        "amf:\n"
    );
}

#[tokio::test]
async fn exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let session = ShellSession::new("n1", dir.path()).await.unwrap();

    assert_eq!(session.execute("true").await.unwrap(), 0);
    assert_eq!(session.execute("exit 3").await.unwrap(), 3);
    assert_eq!(CommandExecutor::name(&session), "n1");

    let err = session.execute_cmd("exit 7").await.unwrap_err();
    assert_eq!(err.status(), Some(7));
}

#[tokio::test]
async fn spawn_does_not_wait() {
    let dir = tempfile::tempdir().unwrap();
    let session = ShellSession::new("n1", dir.path()).await.unwrap();

    let start = std::time::Instant::now();
    session
        .spawn("sleep 0.5 && echo done > spawned.txt")
        .await
        .unwrap();
    assert!(start.elapsed() < std::time::Duration::from_secs(5));

    // the background process keeps running after the child handle was dropped
    let marker = dir.path().join("spawned.txt");
    for _ in 0..100 {
        if marker.exists() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    assert_eq!(std::fs::read_to_string(marker).unwrap(), "done\n");
}

#[test]
fn lookup_executables() {
    let dir = tempfile::tempdir().unwrap();
    let search_path = dir.path().as_os_str().to_owned();

    // not executable
    let file = dir.path().join("open5gs-amfd");
    std::fs::write(&file, "#!/bin/sh\n").unwrap();
    assert_eq!(find_executable_in("open5gs-amfd", &search_path), None);

    // executable
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(
        find_executable_in("open5gs-amfd", &search_path),
        Some(file.clone())
    );
    assert_eq!(
        find_executable_in(file.to_string_lossy(), ""),
        Some(file)
    );
    assert_eq!(find_executable_in("nr-gnb", &search_path), None);
}
