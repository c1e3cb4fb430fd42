//! build - PFCP response messages as sent by this endpoint

use super::{
    Cause, FSeid, Ie, MessageType, NodeId, PfcpMessage, SourceInterface,
    UserPlaneIpResourceInformation,
};
use std::net::IpAddr;

// TEID range offered to peers at association setup: the top
// OFFERED_TEID_RANGE_BITS bits of every TEID the peer allocates for us must
// equal OFFERED_TEID_RANGE.
const OFFERED_TEID_RANGE_BITS: u8 = 4;
const OFFERED_TEID_RANGE: u8 = 15;

pub fn association_setup_response(sequence_number: u32, node_addr: IpAddr) -> PfcpMessage {
    let ipv4 = match node_addr {
        IpAddr::V4(a) => Some(a),
        IpAddr::V6(_) => None,
    };
    let ipv6 = match node_addr {
        IpAddr::V4(_) => None,
        IpAddr::V6(a) => Some(a),
    };
    PfcpMessage {
        message_type: MessageType::AssociationSetupResponse,
        seid: None,
        sequence_number,
        ies: vec![
            Ie::NodeId(NodeId::from(node_addr)),
            Ie::Cause(Cause::RequestAccepted),
            Ie::UserPlaneIpResourceInformation(UserPlaneIpResourceInformation {
                teid_range_bits: OFFERED_TEID_RANGE_BITS,
                teid_range: OFFERED_TEID_RANGE,
                ipv4,
                ipv6,
                network_instance: None,
                source_interface: Some(SourceInterface::Access),
            }),
        ],
    }
}

pub fn association_release_response(sequence_number: u32, node_addr: IpAddr) -> PfcpMessage {
    PfcpMessage {
        message_type: MessageType::AssociationReleaseResponse,
        seid: None,
        sequence_number,
        ies: vec![
            Ie::NodeId(NodeId::from(node_addr)),
            Ie::Cause(Cause::RequestAccepted),
        ],
    }
}

pub fn session_establishment_accept(
    sequence_number: u32,
    remote_seid: u64,
    node_addr: IpAddr,
    local_seid: u64,
) -> PfcpMessage {
    let (ipv4, ipv6) = match node_addr {
        IpAddr::V4(a) => (Some(a), None),
        IpAddr::V6(a) => (None, Some(a)),
    };
    PfcpMessage {
        message_type: MessageType::SessionEstablishmentResponse,
        seid: Some(remote_seid),
        sequence_number,
        ies: vec![
            Ie::NodeId(NodeId::from(node_addr)),
            Ie::Cause(Cause::RequestAccepted),
            Ie::FSeid(FSeid {
                seid: local_seid,
                ipv4,
                ipv6,
            }),
        ],
    }
}

pub fn session_establishment_reject(
    sequence_number: u32,
    node_addr: IpAddr,
    cause: Cause,
) -> PfcpMessage {
    PfcpMessage {
        message_type: MessageType::SessionEstablishmentResponse,
        // The peer's SEID is not known, so the header carries 0.
        seid: Some(0),
        sequence_number,
        ies: vec![Ie::NodeId(NodeId::from(node_addr)), Ie::Cause(cause)],
    }
}

pub fn session_modification_response(
    sequence_number: u32,
    remote_seid: u64,
    cause: Cause,
) -> PfcpMessage {
    PfcpMessage {
        message_type: MessageType::SessionModificationResponse,
        seid: Some(remote_seid),
        sequence_number,
        ies: vec![Ie::Cause(cause)],
    }
}
