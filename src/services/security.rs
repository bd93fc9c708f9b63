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

//! Security services: VPN client and server, IPsec tunnels, a firewall and source NAT.
//!
//! Except for [`NAT`], these services generate a start script from a sample file in the CORE data
//! directory ([`crate::generator::CORE_DATA_DIR`]). The samples are meant to be customized by the
//! operator before the node is started.

use crate::{
    descriptor::{ConfigFile, Generator, ServiceDescriptor},
    nat::generate_nat_script,
};

/// Group of all services in this module.
pub const GROUP: &str = "Security";

/// OpenVPN client.
pub static VPN_CLIENT: ServiceDescriptor = ServiceDescriptor {
    configs: &[ConfigFile::new(
        "vpnclient.sh",
        Generator::DataTemplate {
            header: "# custom VPN Client configuration for service VPNClient",
            sample: "sampleVPNClient",
        },
    )],
    startup: &["sh vpnclient.sh"],
    validate: &["pidof openvpn"],
    shutdown: &["killall openvpn"],
    custom_needed: true,
    ..ServiceDescriptor::new("VPNClient", GROUP)
};

/// OpenVPN server.
pub static VPN_SERVER: ServiceDescriptor = ServiceDescriptor {
    configs: &[ConfigFile::new(
        "vpnserver.sh",
        Generator::DataTemplate {
            header: "# custom VPN Server Configuration for service VPNServer",
            sample: "sampleVPNServer",
        },
    )],
    startup: &["sh vpnserver.sh"],
    validate: &["pidof openvpn"],
    shutdown: &["killall openvpn"],
    custom_needed: true,
    ..ServiceDescriptor::new("VPNServer", GROUP)
};

/// Static IPsec tunnels, keyed by racoon.
pub static IPSEC: ServiceDescriptor = ServiceDescriptor {
    configs: &[ConfigFile::new(
        "ipsec.sh",
        Generator::DataTemplate {
            header: "# set up static tunnel mode security assocation for service IPsec",
            sample: "sampleIPsec",
        },
    )],
    startup: &["sh ipsec.sh"],
    shutdown: &["killall racoon"],
    custom_needed: true,
    ..ServiceDescriptor::new("IPsec", GROUP)
};

/// iptables firewall rules.
pub static FIREWALL: ServiceDescriptor = ServiceDescriptor {
    configs: &[ConfigFile::new(
        "firewall.sh",
        Generator::DataTemplate {
            header: "# custom node firewall rules for service Firewall",
            sample: "sampleFirewall",
        },
    )],
    startup: &["sh firewall.sh"],
    custom_needed: true,
    ..ServiceDescriptor::new("Firewall", GROUP)
};

/// IPv4 source NAT on the first data interface of the node. See [`generate_nat_script`].
pub static NAT: ServiceDescriptor = ServiceDescriptor {
    executables: &["iptables"],
    configs: &[ConfigFile::new("nat.sh", Generator::Node(generate_nat_script))],
    startup: &["sh nat.sh"],
    ..ServiceDescriptor::new("NAT", GROUP)
};
