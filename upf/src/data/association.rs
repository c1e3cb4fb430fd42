use crate::pfcp::NodeId;
use std::net::SocketAddr;

/// A recognized signalling relationship with a peer SMF.  One per peer
/// address; refreshed by each association setup from the same peer.
#[derive(Debug, Clone)]
pub struct Association {
    pub peer_node_id: NodeId,
    pub peer_addr: SocketAddr,
}

impl std::fmt::Display for Association {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.peer_node_id, self.peer_addr)
    }
}
