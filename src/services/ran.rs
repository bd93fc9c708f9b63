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

//! 5G radio access network, simulated with UERANSIM.

use crate::descriptor::{ConfigFile, Generator, ServiceDescriptor};

/// Group of all services in this module.
pub const GROUP: &str = "5G-RAN";

/// UERANSIM gNodeB (`nr-gnb`).
pub static GNB: ServiceDescriptor = ServiceDescriptor {
    executables: &["nr-gnb"],
    configs: &[
        ConfigFile::new(
            "gnb.conf",
            Generator::Static(include_str!("../../templates/5g-ran/gnb/gnb.conf")),
        ),
        ConfigFile::new(
            "start_gnb.sh",
            Generator::Static(include_str!("../../templates/5g-ran/gnb/start_gnb.sh")),
        ),
    ],
    startup: &["sh start_gnb.sh"],
    ..ServiceDescriptor::new("GNB", GROUP)
};

/// UERANSIM user equipment (`nr-ue`). The start script routes all traffic through the
/// `uesimtun0` tunnel once it is up.
pub static UE: ServiceDescriptor = ServiceDescriptor {
    executables: &["nr-ue"],
    configs: &[
        ConfigFile::new(
            "ue.conf",
            Generator::Static(include_str!("../../templates/5g-ran/ue/ue.conf")),
        ),
        ConfigFile::new(
            "start_ue.sh",
            Generator::Static(include_str!("../../templates/5g-ran/ue/start_ue.sh")),
        ),
    ],
    startup: &["sh start_ue.sh"],
    ..ServiceDescriptor::new("UE", GROUP)
};
