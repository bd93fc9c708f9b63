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

//! Composition of the source NAT rules of a node.

use node_lab::{Interface, Node};

/// Generate the start script of the NAT service.
///
/// Traffic is masqueraded out of the first interface of the node that is not connected to the
/// control network, and all traffic entering through that interface is dropped unless it belongs
/// to an established connection. The same rules for all other data interfaces are added as
/// comments, such that the operator can enable them by hand. Interfaces are visited in the order
/// of the node.
///
/// ```
/// use core_services::nat::generate_nat_script;
/// use node_lab::{Interface, Node};
///
/// let node = Node::new("n1").with_interface(Interface::new("eth0"));
/// let script = generate_nat_script(&node);
/// assert!(script.contains("iptables -t nat -A POSTROUTING -o eth0 -j MASQUERADE\n"));
/// ```
pub fn generate_nat_script(node: &Node) -> String {
    let mut cfg = String::from("#!/bin/sh\n");
    cfg.push_str("# generated by the NAT service\n");
    cfg.push_str("# NAT out the first interface by default\n");

    let mut ifaces = node.data_interfaces();
    if let Some(first) = ifaces.next() {
        cfg.push_str(&format!("# NAT out the {} interface\n", first.name));
        cfg.push_str(&interface_rules(first, ""));
        cfg.push('\n');
    }
    for iface in ifaces {
        cfg.push_str(&interface_rules(iface, "#"));
    }

    cfg
}

/// The three iptables rules of a single interface, each line starting with `prefix`.
fn interface_rules(iface: &Interface, prefix: &str) -> String {
    let name = &iface.name;
    format!(
        "{prefix}iptables -t nat -A POSTROUTING -o {name} -j MASQUERADE\n\
         {prefix}iptables -A FORWARD -i {name} -m state --state RELATED,ESTABLISHED -j ACCEPT\n\
         {prefix}iptables -A FORWARD -i {name} -j DROP\n"
    )
}
