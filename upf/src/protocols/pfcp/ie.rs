//! ie - wire codec for the information elements this endpoint uses

use super::DecodeError;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

// IE type codes.  TS29.244, table 8.1.2-1.
const IE_TYPE_CAUSE: u16 = 19;
const IE_TYPE_FSEID: u16 = 57;
const IE_TYPE_NODE_ID: u16 = 60;
const IE_TYPE_UP_IP_RESOURCE_INFORMATION: u16 = 116;

/// Accept/reject outcome carried in responses.  TS29.244, table 8.2.1-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum Cause {
    RequestAccepted = 1,
    RequestRejected = 64,
    SessionContextNotFound = 65,
    MandatoryIeMissing = 66,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Cause {
    pub fn is_accepted(self) -> bool {
        self == Cause::RequestAccepted
    }
}

/// Identity of a control-plane or user-plane node.  TS29.244, 8.2.38.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeId {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Fqdn(String),
}

impl From<IpAddr> for NodeId {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(a) => NodeId::Ipv4(a),
            IpAddr::V6(a) => NodeId::Ipv6(a),
        }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeId::Ipv4(a) => a.fmt(f),
            NodeId::Ipv6(a) => a.fmt(f),
            NodeId::Fqdn(name) => name.fmt(f),
        }
    }
}

/// A SEID paired with the address at which it should be addressed.
/// TS29.244, 8.2.37.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FSeid {
    pub seid: u64,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

/// Role of the interface on which matching traffic arrives.  TS29.244, 8.2.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum SourceInterface {
    Access = 0,
    Core = 1,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// TEID-range descriptor offered to the peer in an association setup
/// response.  TS29.244, 8.2.68.  `teid_range` is carried on the wire only
/// when `teid_range_bits` is nonzero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPlaneIpResourceInformation {
    pub teid_range_bits: u8,
    pub teid_range: u8,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
    pub network_instance: Option<String>,
    pub source_interface: Option<SourceInterface>,
}

/// Tagged union over the IE subset this endpoint reads and writes.  IEs of
/// any other type are carried opaquely so that decode is total over
/// well-formed buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ie {
    NodeId(NodeId),
    Cause(Cause),
    FSeid(FSeid),
    UserPlaneIpResourceInformation(UserPlaneIpResourceInformation),
    Unknown { ie_type: u16, payload: Vec<u8> },
}

impl Ie {
    pub(super) fn decode(ie_type: u16, payload: &[u8]) -> Result<Ie, DecodeError> {
        let malformed = || DecodeError::MalformedIe { ie_type };
        Ok(match ie_type {
            IE_TYPE_NODE_ID => Ie::NodeId(decode_node_id(payload, malformed)?),
            IE_TYPE_CAUSE => {
                let &[value] = payload else {
                    return Err(malformed());
                };
                Ie::Cause(Cause::from(value))
            }
            IE_TYPE_FSEID => Ie::FSeid(decode_fseid(payload, malformed)?),
            IE_TYPE_UP_IP_RESOURCE_INFORMATION => Ie::UserPlaneIpResourceInformation(
                decode_up_ip_resource_information(payload, malformed)?,
            ),
            _ => Ie::Unknown {
                ie_type,
                payload: payload.to_vec(),
            },
        })
    }

    pub(super) fn encode_into(&self, out: &mut Vec<u8>) {
        let (ie_type, payload) = match self {
            Ie::NodeId(node_id) => (IE_TYPE_NODE_ID, encode_node_id(node_id)),
            Ie::Cause(cause) => (IE_TYPE_CAUSE, vec![u8::from(*cause)]),
            Ie::FSeid(fseid) => (IE_TYPE_FSEID, encode_fseid(fseid)),
            Ie::UserPlaneIpResourceInformation(info) => (
                IE_TYPE_UP_IP_RESOURCE_INFORMATION,
                encode_up_ip_resource_information(info),
            ),
            Ie::Unknown { ie_type, payload } => (*ie_type, payload.clone()),
        };
        out.extend(ie_type.to_be_bytes());
        out.extend((payload.len() as u16).to_be_bytes());
        out.extend(payload);
    }
}

fn take<const N: usize>(
    rest: &mut &[u8],
    err: impl Fn() -> DecodeError,
) -> Result<[u8; N], DecodeError> {
    if rest.len() < N {
        return Err(err());
    }
    let (head, tail) = rest.split_at(N);
    *rest = tail;
    Ok(head.try_into().unwrap())
}

fn decode_node_id(
    payload: &[u8],
    malformed: impl Fn() -> DecodeError,
) -> Result<NodeId, DecodeError> {
    let (&id_type, value) = payload.split_first().ok_or_else(&malformed)?;
    Ok(match id_type & 0x0f {
        0 => NodeId::Ipv4(Ipv4Addr::from(<[u8; 4]>::try_from(value).map_err(
            |_| malformed(),
        )?)),
        1 => NodeId::Ipv6(Ipv6Addr::from(<[u8; 16]>::try_from(value).map_err(
            |_| malformed(),
        )?)),
        2 => NodeId::Fqdn(String::from_utf8(value.to_vec()).map_err(|_| malformed())?),
        _ => return Err(malformed()),
    })
}

fn encode_node_id(node_id: &NodeId) -> Vec<u8> {
    match node_id {
        NodeId::Ipv4(a) => {
            let mut v = vec![0];
            v.extend(a.octets());
            v
        }
        NodeId::Ipv6(a) => {
            let mut v = vec![1];
            v.extend(a.octets());
            v
        }
        NodeId::Fqdn(name) => {
            let mut v = vec![2];
            v.extend(name.as_bytes());
            v
        }
    }
}

fn decode_fseid(
    payload: &[u8],
    malformed: impl Fn() -> DecodeError,
) -> Result<FSeid, DecodeError> {
    let (&flags, mut rest) = payload.split_first().ok_or_else(&malformed)?;
    let seid = u64::from_be_bytes(take(&mut rest, &malformed)?);
    let ipv4 = if flags & 0x02 != 0 {
        Some(Ipv4Addr::from(take::<4>(&mut rest, &malformed)?))
    } else {
        None
    };
    let ipv6 = if flags & 0x01 != 0 {
        Some(Ipv6Addr::from(take::<16>(&mut rest, &malformed)?))
    } else {
        None
    };
    if !rest.is_empty() {
        return Err(malformed());
    }
    Ok(FSeid { seid, ipv4, ipv6 })
}

fn encode_fseid(fseid: &FSeid) -> Vec<u8> {
    let mut flags = 0;
    if fseid.ipv4.is_some() {
        flags |= 0x02;
    }
    if fseid.ipv6.is_some() {
        flags |= 0x01;
    }
    let mut v = vec![flags];
    v.extend(fseid.seid.to_be_bytes());
    if let Some(a) = fseid.ipv4 {
        v.extend(a.octets());
    }
    if let Some(a) = fseid.ipv6 {
        v.extend(a.octets());
    }
    v
}

fn decode_up_ip_resource_information(
    payload: &[u8],
    malformed: impl Fn() -> DecodeError,
) -> Result<UserPlaneIpResourceInformation, DecodeError> {
    let (&flags, mut rest) = payload.split_first().ok_or_else(&malformed)?;
    let teid_range_bits = (flags >> 2) & 0x07;
    let teid_range = if teid_range_bits != 0 {
        take::<1>(&mut rest, &malformed)?[0]
    } else {
        0
    };
    let ipv4 = if flags & 0x01 != 0 {
        Some(Ipv4Addr::from(take::<4>(&mut rest, &malformed)?))
    } else {
        None
    };
    let ipv6 = if flags & 0x02 != 0 {
        Some(Ipv6Addr::from(take::<16>(&mut rest, &malformed)?))
    } else {
        None
    };

    // The network instance fills whatever precedes the source interface
    // octet.
    let source_interface_present = flags & 0x40 != 0;
    let instance_len = rest
        .len()
        .checked_sub(source_interface_present as usize)
        .ok_or_else(&malformed)?;
    let network_instance = if flags & 0x20 != 0 {
        Some(String::from_utf8(rest[..instance_len].to_vec()).map_err(|_| malformed())?)
    } else if instance_len != 0 {
        return Err(malformed());
    } else {
        None
    };
    let source_interface = if source_interface_present {
        Some(SourceInterface::from(rest[rest.len() - 1] & 0x0f))
    } else {
        None
    };

    Ok(UserPlaneIpResourceInformation {
        teid_range_bits,
        teid_range,
        ipv4,
        ipv6,
        network_instance,
        source_interface,
    })
}

fn encode_up_ip_resource_information(info: &UserPlaneIpResourceInformation) -> Vec<u8> {
    let mut flags = (info.teid_range_bits & 0x07) << 2;
    if info.ipv4.is_some() {
        flags |= 0x01;
    }
    if info.ipv6.is_some() {
        flags |= 0x02;
    }
    if info.network_instance.is_some() {
        flags |= 0x20;
    }
    if info.source_interface.is_some() {
        flags |= 0x40;
    }
    let mut v = vec![flags];
    if info.teid_range_bits != 0 {
        v.push(info.teid_range);
    }
    if let Some(a) = info.ipv4 {
        v.extend(a.octets());
    }
    if let Some(a) = info.ipv6 {
        v.extend(a.octets());
    }
    if let Some(ref instance) = info.network_instance {
        v.extend(instance.as_bytes());
    }
    if let Some(source_interface) = info.source_interface {
        v.push(u8::from(source_interface) & 0x0f);
    }
    v
}
