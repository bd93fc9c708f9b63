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

//! Lookup of executables on the host.

use std::{
    ffi::OsStr,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

/// Search the executable `name` in all directories of the `PATH` environment variable. If `name`
/// contains a slash, it is checked directly.
pub fn find_executable(name: impl AsRef<str>) -> Option<PathBuf> {
    let path = std::env::var_os("PATH").unwrap_or_default();
    find_executable_in(name, &path)
}

/// Search the executable `name` in all directories of `search_path`, which has the same format as
/// the `PATH` environment variable.
///
/// ```
/// # use node_lab::find_executable_in;
/// assert!(find_executable_in("sh", "/usr/bin:/bin").is_some());
/// assert!(find_executable_in("sh", "").is_none());
/// ```
pub fn find_executable_in(name: impl AsRef<str>, search_path: impl AsRef<OsStr>) -> Option<PathBuf> {
    let name = name.as_ref();
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        let path = PathBuf::from(name);
        return is_executable(&path).then_some(path);
    }
    std::env::split_paths(search_path.as_ref())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// Check that the path is a regular file with any execute bit set.
fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
