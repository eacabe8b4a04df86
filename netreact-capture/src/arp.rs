//! ARP frame parsing
//!
//! Only what the sensor needs: pull the sender hardware and protocol
//! address out of an Ethernet-framed ARP request or reply. Handles a
//! single 802.1Q tag. Everything else about the protocol is ignored
//! on purpose.

use std::net::Ipv4Addr;

use netreact_core::{Error, MacAddr, Result};

const ETHERTYPE_ARP: u16 = 0x0806;
const ETHERTYPE_DOT1Q: u16 = 0x8100;

const HTYPE_ETHERNET: u16 = 1;
const PTYPE_IPV4: u16 = 0x0800;

const ETHERNET_HEADER_LEN: usize = 14;
const DOT1Q_TAG_LEN: usize = 4;
const ARP_LEN: usize = 28;

/// ARP operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOpcode {
    Request,
    Reply,
}

impl ArpOpcode {
    fn from_u16(val: u16) -> Option<Self> {
        match val {
            1 => Some(Self::Request),
            2 => Some(Self::Reply),
            _ => None,
        }
    }
}

/// The sender fields of a parsed ARP request or reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpFrame {
    pub opcode: ArpOpcode,
    pub sender_mac: MacAddr,
    pub sender_ip: Ipv4Addr,
}

impl ArpFrame {
    /// Parse an Ethernet frame. Returns `Ok(None)` for frames that
    /// are simply not ARP (a custom BPF filter may let those
    /// through) and an error for frames that claim to be ARP but are
    /// malformed.
    pub fn from_ethernet(frame: &[u8]) -> Result<Option<Self>> {
        if frame.len() < ETHERNET_HEADER_LEN {
            return Err(Error::PacketParsing("Ethernet frame too short".to_string()));
        }

        let mut offset = ETHERNET_HEADER_LEN;
        let mut ethertype = u16::from_be_bytes([frame[12], frame[13]]);

        if ethertype == ETHERTYPE_DOT1Q {
            if frame.len() < ETHERNET_HEADER_LEN + DOT1Q_TAG_LEN {
                return Err(Error::PacketParsing("truncated 802.1Q tag".to_string()));
            }
            ethertype = u16::from_be_bytes([frame[16], frame[17]]);
            offset += DOT1Q_TAG_LEN;
        }

        if ethertype != ETHERTYPE_ARP {
            return Ok(None);
        }

        Self::parse_arp(&frame[offset..]).map(Some)
    }

    fn parse_arp(data: &[u8]) -> Result<Self> {
        if data.len() < ARP_LEN {
            return Err(Error::PacketParsing("ARP packet too short".to_string()));
        }

        let htype = u16::from_be_bytes([data[0], data[1]]);
        let ptype = u16::from_be_bytes([data[2], data[3]]);
        let hlen = data[4];
        let plen = data[5];
        if htype != HTYPE_ETHERNET || ptype != PTYPE_IPV4 || hlen != 6 || plen != 4 {
            return Err(Error::PacketParsing(format!(
                "unsupported ARP encoding: htype {htype}, ptype {ptype:#06x}, hlen {hlen}, plen {plen}"
            )));
        }

        let op_val = u16::from_be_bytes([data[6], data[7]]);
        let opcode = ArpOpcode::from_u16(op_val)
            .ok_or_else(|| Error::PacketParsing(format!("invalid ARP opcode: {op_val}")))?;

        let mut sender_mac = [0u8; 6];
        sender_mac.copy_from_slice(&data[8..14]);
        let sender_ip = Ipv4Addr::new(data[14], data[15], data[16], data[17]);

        Ok(ArpFrame {
            opcode,
            sender_mac: MacAddr::new(sender_mac),
            sender_ip,
        })
    }
}
