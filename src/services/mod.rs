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

//! All services known to this crate, grouped like CORE presents them.

pub mod five_g;
pub mod four_g;
pub mod ran;
pub mod security;

use crate::descriptor::ServiceDescriptor;

/// All services, in catalog order.
pub static ALL: &[&ServiceDescriptor] = &[
    &five_g::AMF,
    &five_g::AUSF,
    &five_g::BSF,
    &five_g::NRF,
    &five_g::NSSF,
    &five_g::PCF,
    &five_g::SMF,
    &five_g::UDM,
    &five_g::UDR,
    &five_g::UPF,
    &five_g::MONGODB,
    &five_g::WEBUI,
    &four_g::HSS,
    &four_g::MME,
    &four_g::PCRF,
    &four_g::SGWC,
    &four_g::SGWU,
    &four_g::PGWC,
    &four_g::PGWU,
    &ran::GNB,
    &ran::UE,
    &security::VPN_CLIENT,
    &security::VPN_SERVER,
    &security::IPSEC,
    &security::FIREWALL,
    &security::NAT,
];
