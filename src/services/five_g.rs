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

//! 5G core network functions (Open5GS), the subscriber database and the web UI.

use crate::descriptor::{ConfigFile, Generator, ServiceDescriptor};

/// Group of all services in this module.
pub const GROUP: &str = "5G";

/// Access and Mobility Management Function. Terminates NGAP from the gNBs.
pub static AMF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-amfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/amf.yaml",
            Generator::Static(include_str!("../../templates/5g/amf/amf.yaml")),
        ),
        ConfigFile::new(
            "start_amf.sh",
            Generator::Static(include_str!("../../templates/5g/amf/start_amf.sh")),
        ),
    ],
    startup: &["sh start_amf.sh"],
    ..ServiceDescriptor::new("AMF", GROUP)
};

/// Authentication Server Function.
pub static AUSF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-ausfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/ausf.yaml",
            Generator::Static(include_str!("../../templates/5g/ausf/ausf.yaml")),
        ),
        ConfigFile::new(
            "start_ausf.sh",
            Generator::Static(include_str!("../../templates/5g/ausf/start_ausf.sh")),
        ),
    ],
    startup: &["sh start_ausf.sh"],
    ..ServiceDescriptor::new("AUSF", GROUP)
};

/// Binding Support Function. Waits for MongoDB before starting.
pub static BSF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-bsfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/bsf.yaml",
            Generator::Static(include_str!("../../templates/5g/bsf/bsf.yaml")),
        ),
        ConfigFile::new(
            "start_bsf.sh",
            Generator::Static(include_str!("../../templates/5g/bsf/start_bsf.sh")),
        ),
    ],
    startup: &["sh start_bsf.sh"],
    ..ServiceDescriptor::new("BSF", GROUP)
};

/// Network Repository Function, the SBI registry all other network functions talk to.
pub static NRF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-nrfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs/"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/nrf.yaml",
            Generator::Static(include_str!("../../templates/5g/nrf/nrf.yaml")),
        ),
        ConfigFile::new(
            "start_nrf.sh",
            Generator::Static(include_str!("../../templates/5g/nrf/start_nrf.sh")),
        ),
    ],
    startup: &["sh start_nrf.sh"],
    ..ServiceDescriptor::new("NRF", GROUP)
};

/// Network Slice Selection Function.
pub static NSSF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-nssfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs/"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/nssf.yaml",
            Generator::Static(include_str!("../../templates/5g/nssf/nssf.yaml")),
        ),
        ConfigFile::new(
            "start_nssf.sh",
            Generator::Static(include_str!("../../templates/5g/nssf/start_nssf.sh")),
        ),
    ],
    startup: &["sh start_nssf.sh"],
    ..ServiceDescriptor::new("NSSF", GROUP)
};

/// Policy Control Function.
pub static PCF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-pcfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/pcf.yaml",
            Generator::Static(include_str!("../../templates/5g/pcf/pcf.yaml")),
        ),
        ConfigFile::new(
            "start_pcf.sh",
            Generator::Static(include_str!("../../templates/5g/pcf/start_pcf.sh")),
        ),
    ],
    startup: &["sh start_pcf.sh"],
    ..ServiceDescriptor::new("PCF", GROUP)
};

/// Session Management Function. Controls the UPF over PFCP.
pub static SMF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-smfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/smf.yaml",
            Generator::Static(include_str!("../../templates/5g/smf/smf.yaml")),
        ),
        ConfigFile::new(
            "start_smf.sh",
            Generator::Static(include_str!("../../templates/5g/smf/start_smf.sh")),
        ),
    ],
    startup: &["sh start_smf.sh"],
    ..ServiceDescriptor::new("SMF", GROUP)
};

/// Unified Data Management.
pub static UDM: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-udmd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/udm.yaml",
            Generator::Static(include_str!("../../templates/5g/udm/udm.yaml")),
        ),
        ConfigFile::new(
            "start_udmd.sh",
            Generator::Static(include_str!("../../templates/5g/udm/start_udmd.sh")),
        ),
    ],
    startup: &["sh start_udmd.sh"],
    ..ServiceDescriptor::new("UDM", GROUP)
};

/// Unified Data Repository, backed by MongoDB.
pub static UDR: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-udrd"],
    directories: &["/etc/open5gs", "/var/log/open5gs/"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/udr.yaml",
            Generator::Static(include_str!("../../templates/5g/udr/udr.yaml")),
        ),
        ConfigFile::new(
            "start_udr.sh",
            Generator::Static(include_str!("../../templates/5g/udr/start_udr.sh")),
        ),
    ],
    startup: &["sh start_udr.sh"],
    ..ServiceDescriptor::new("UDR", GROUP)
};

/// User Plane Function. The start script also brings up `ogstun` and masquerades the UE
/// subnet.
pub static UPF: ServiceDescriptor = ServiceDescriptor {
    executables: &["open5gs-upfd"],
    directories: &["/etc/open5gs", "/var/log/open5gs"],
    configs: &[
        ConfigFile::new(
            "/etc/open5gs/upf.yaml",
            Generator::Static(include_str!("../../templates/5g/upf/upf.yaml")),
        ),
        ConfigFile::new(
            "start_upf.sh",
            Generator::Static(include_str!("../../templates/5g/upf/start_upf.sh")),
        ),
    ],
    startup: &["sh start_upf.sh"],
    ..ServiceDescriptor::new("UPF", GROUP)
};

/// MongoDB instance holding the subscriber database. The start script registers a
/// single test subscriber (the one configured in the `UE` service).
pub static MONGODB: ServiceDescriptor = ServiceDescriptor {
    directories: &["/data/db", "/etc/mongo", "/var/log/mongodb"],
    configs: &[
        ConfigFile::new(
            "/etc/mongo/mongodb.conf",
            Generator::Static(include_str!("../../templates/5g/mongodb/mongodb.conf")),
        ),
        ConfigFile::new(
            "start_mongo.sh",
            Generator::Static(include_str!("../../templates/5g/mongodb/start_mongo.sh")),
        ),
    ],
    ..ServiceDescriptor::new("MongoDB", GROUP)
};

/// Open5GS web interface, started with `npm` from a local checkout.
pub static WEBUI: ServiceDescriptor = ServiceDescriptor {
    configs: &[
        ConfigFile::new(
            "start_webui.sh",
            Generator::Static(include_str!("../../templates/5g/webui/start_webui.sh")),
        ),
    ],
    startup: &["sh start_webui.sh"],
    ..ServiceDescriptor::new("WebUI", GROUP)
};
