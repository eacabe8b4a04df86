//! Alert category catalog
//!
//! Seven predicate categories, each with a packet-level and a
//! host-level variant. Packet codes are 100-106, host codes 200-206;
//! the code ends up in the notification filename, the label in the
//! JSON body.

/// One of the 14 alert categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    NewPacket,
    NewLinkLocalUnicastPacket,
    NewUnspecifiedPacket,
    NewBroadcastPacket,
    NewUnexpectedIpPacket,
    NewIpForMacPacket,
    NewMacForIpPacket,
    NewHost,
    NewLinkLocalUnicastHost,
    NewUnspecifiedHost,
    NewBroadcastHost,
    NewUnexpectedIpHost,
    NewIpForMacHost,
    NewMacForIpHost,
}

impl EventType {
    /// Numeric code used in notification filenames
    pub fn code(&self) -> u16 {
        match self {
            EventType::NewPacket => 100,
            EventType::NewLinkLocalUnicastPacket => 101,
            EventType::NewUnspecifiedPacket => 102,
            EventType::NewBroadcastPacket => 103,
            EventType::NewUnexpectedIpPacket => 104,
            EventType::NewIpForMacPacket => 105,
            EventType::NewMacForIpPacket => 106,
            EventType::NewHost => 200,
            EventType::NewLinkLocalUnicastHost => 201,
            EventType::NewUnspecifiedHost => 202,
            EventType::NewBroadcastHost => 203,
            EventType::NewUnexpectedIpHost => 204,
            EventType::NewIpForMacHost => 205,
            EventType::NewMacForIpHost => 206,
        }
    }

    /// String label used in the notification body
    pub fn label(&self) -> &'static str {
        match self {
            EventType::NewPacket => "NEW_PACKET",
            EventType::NewLinkLocalUnicastPacket => "NEW_LINK_LOCAL_UNICAST_PACKET",
            EventType::NewUnspecifiedPacket => "NEW_UNSPECIFIED_PACKET",
            EventType::NewBroadcastPacket => "NEW_BROADCAST_PACKET",
            EventType::NewUnexpectedIpPacket => "NEW_UNEXPECTED_IP_PACKET",
            EventType::NewIpForMacPacket => "NEW_IP_FOR_MAC_PACKET",
            EventType::NewMacForIpPacket => "NEW_MAC_FOR_IP_PACKET",
            EventType::NewHost => "NEW_HOST",
            EventType::NewLinkLocalUnicastHost => "NEW_LINK_LOCAL_UNICAST_HOST",
            EventType::NewUnspecifiedHost => "NEW_UNSPECIFIED_HOST",
            EventType::NewBroadcastHost => "NEW_BROADCAST_HOST",
            EventType::NewUnexpectedIpHost => "NEW_UNEXPECTED_IP_HOST",
            EventType::NewIpForMacHost => "NEW_IP_FOR_MAC_HOST",
            EventType::NewMacForIpHost => "NEW_MAC_FOR_IP_HOST",
        }
    }

    /// Whether this is a packet-level (per observation) category
    pub fn is_packet(&self) -> bool {
        self.code() < 200
    }
}
