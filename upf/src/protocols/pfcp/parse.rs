//! parse - extract individual information elements from a decoded message

use super::{Cause, FSeid, Ie, NodeId, PfcpMessage};

pub fn node_id(message: &PfcpMessage) -> Option<&NodeId> {
    message.ies.iter().find_map(|ie| match ie {
        Ie::NodeId(node_id) => Some(node_id),
        _ => None,
    })
}

pub fn fseid(message: &PfcpMessage) -> Option<&FSeid> {
    message.ies.iter().find_map(|ie| match ie {
        Ie::FSeid(fseid) => Some(fseid),
        _ => None,
    })
}

pub fn cause(message: &PfcpMessage) -> Option<Cause> {
    message.ies.iter().find_map(|ie| match ie {
        Ie::Cause(cause) => Some(*cause),
        _ => None,
    })
}

pub fn up_ip_resource_information(message: &PfcpMessage) -> Option<&super::UserPlaneIpResourceInformation> {
    message.ies.iter().find_map(|ie| match ie {
        Ie::UserPlaneIpResourceInformation(info) => Some(info),
        _ => None,
    })
}
