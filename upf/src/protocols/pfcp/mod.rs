//! pfcp - codec for the subset of the PFCP protocol spoken on N4

pub mod build;
mod ie;
pub mod parse;

pub use ie::{Cause, FSeid, Ie, NodeId, SourceInterface, UserPlaneIpResourceInformation};

use num_enum::{FromPrimitive, IntoPrimitive};
use thiserror::Error;

const PFCP_VERSION: u8 = 1;

// Fixed part of the header: flags, message type, length, sequence number
// and spare octet.  TS29.244, 7.2.2.
const MIN_HEADER_LEN: usize = 8;
const SEID_LEN: usize = 8;
const IE_HEADER_LEN: usize = 4;

/// PFCP message type codes.  TS29.244, table 7.3-1.  Codes this endpoint
/// does not implement decode to `Unsupported` and are dropped at dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum MessageType {
    AssociationSetupRequest = 5,
    AssociationSetupResponse = 6,
    AssociationReleaseRequest = 9,
    AssociationReleaseResponse = 10,
    SessionEstablishmentRequest = 50,
    SessionEstablishmentResponse = 51,
    SessionModificationRequest = 52,
    SessionModificationResponse = 53,
    #[num_enum(catch_all)]
    Unsupported(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("datagram too short for PFCP header ({0} bytes)")]
    TooShort(usize),
    #[error("unsupported PFCP version {0}")]
    BadVersion(u8),
    #[error("declared length {declared} exceeds the {available} bytes available")]
    LengthMismatch { declared: usize, available: usize },
    #[error("truncated information element")]
    TruncatedIe,
    #[error("malformed information element of type {ie_type}")]
    MalformedIe { ie_type: u16 },
}

/// One PFCP message: header fields plus information elements in wire order.
///
/// The sequence number has 24 significant bits on the wire.  The SEID is
/// carried iff the header S flag is set; session-scoped messages always set
/// it, with value 0 on the initial establishment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfcpMessage {
    pub message_type: MessageType,
    pub seid: Option<u64>,
    pub sequence_number: u32,
    pub ies: Vec<Ie>,
}

impl PfcpMessage {
    pub fn decode(bytes: &[u8]) -> Result<PfcpMessage, DecodeError> {
        if bytes.len() < MIN_HEADER_LEN {
            return Err(DecodeError::TooShort(bytes.len()));
        }
        let version = bytes[0] >> 5;
        if version != PFCP_VERSION {
            return Err(DecodeError::BadVersion(version));
        }
        let seid_present = bytes[0] & 0x01 != 0;
        let message_type = MessageType::from(bytes[1]);
        let declared = u16::from_be_bytes([bytes[2], bytes[3]]) as usize;
        let available = bytes.len() - 4;
        if declared > available {
            return Err(DecodeError::LengthMismatch {
                declared,
                available,
            });
        }
        let mut body = &bytes[4..4 + declared];

        let seid = if seid_present {
            if body.len() < SEID_LEN {
                return Err(DecodeError::TooShort(bytes.len()));
            }
            let seid = u64::from_be_bytes(body[..SEID_LEN].try_into().unwrap());
            body = &body[SEID_LEN..];
            Some(seid)
        } else {
            None
        };

        // 24-bit sequence number followed by a spare octet.
        if body.len() < 4 {
            return Err(DecodeError::TooShort(bytes.len()));
        }
        let sequence_number = u32::from_be_bytes([0, body[0], body[1], body[2]]);
        body = &body[4..];

        let mut ies = vec![];
        while !body.is_empty() {
            if body.len() < IE_HEADER_LEN {
                return Err(DecodeError::TruncatedIe);
            }
            let ie_type = u16::from_be_bytes([body[0], body[1]]);
            let ie_len = u16::from_be_bytes([body[2], body[3]]) as usize;
            body = &body[IE_HEADER_LEN..];
            if body.len() < ie_len {
                return Err(DecodeError::TruncatedIe);
            }
            ies.push(Ie::decode(ie_type, &body[..ie_len])?);
            body = &body[ie_len..];
        }

        Ok(PfcpMessage {
            message_type,
            seid,
            sequence_number,
            ies,
        })
    }

    /// Canonical byte layout - the same logical message always encodes to
    /// the same bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut body = vec![];
        if let Some(seid) = self.seid {
            body.extend(seid.to_be_bytes());
        }
        body.extend(((self.sequence_number & 0x00ff_ffff) << 8).to_be_bytes());
        for ie in &self.ies {
            ie.encode_into(&mut body);
        }

        let flags = (PFCP_VERSION << 5) | (self.seid.is_some() as u8);
        let mut datagram = vec![flags, self.message_type.into()];
        datagram.extend((body.len() as u16).to_be_bytes());
        datagram.extend(body);
        datagram
    }
}
