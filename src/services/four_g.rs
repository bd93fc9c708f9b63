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

//! 4G EPC network functions (Open5GS).

use crate::descriptor::{ConfigFile, Generator, ServiceDescriptor};

/// Group of all services in this module.
pub const GROUP: &str = "4G";

/// Home Subscriber Server.
pub static HSS: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-hssd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/hss.yaml",
            Generator::Static(include_str!("../../templates/4g/hss/hss.yaml")),
        ),
    ],
    startup: &["open5gs-hssd"],
    ..ServiceDescriptor::new("HSS", GROUP)
};

/// Mobility Management Entity.
pub static MME: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-mmed"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/mme.yaml",
            Generator::Static(include_str!("../../templates/4g/mme/mme.yaml")),
        ),
    ],
    startup: &["open5gs-mmed"],
    ..ServiceDescriptor::new("MME", GROUP)
};

/// Policy and Charging Rules Function.
pub static PCRF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-pcrfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/pcrf.yaml",
            Generator::Static(include_str!("../../templates/4g/pcrf/pcrf.yaml")),
        ),
    ],
    startup: &["open5gs-pcrfd"],
    ..ServiceDescriptor::new("PCRF", GROUP)
};

/// Serving Gateway, control plane.
pub static SGWC: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-sgwcd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/sgwc.yaml",
            Generator::Static(include_str!("../../templates/4g/sgwc/sgwc.yaml")),
        ),
    ],
    startup: &["open5gs-sgwcd"],
    ..ServiceDescriptor::new("SGWC", GROUP)
};

/// Serving Gateway, user plane.
pub static SGWU: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-sgwud"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/sgwu.yaml",
            Generator::Static(include_str!("../../templates/4g/sgwu/sgwu.yaml")),
        ),
    ],
    startup: &["open5gs-sgwud"],
    ..ServiceDescriptor::new("SGWU", GROUP)
};

/// PDN Gateway, control plane. Open5GS implements it in the SMF daemon.
pub static PGWC: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-smfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/smf.yaml",
            Generator::Static(include_str!("../../templates/4g/pgwc/smf.yaml")),
        ),
    ],
    startup: &["open5gs-smfd"],
    ..ServiceDescriptor::new("PGWC", GROUP)
};

/// PDN Gateway, user plane. Open5GS implements it in the UPF daemon.
pub static PGWU: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-upfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/upf.yaml",
            Generator::Static(include_str!("../../templates/4g/pgwu/upf.yaml")),
        ),
    ],
    startup: &["open5gs-upfd"],
    ..ServiceDescriptor::new("PGWU", GROUP)
};
