use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone)]
pub struct Config {
    // UDP address on which N4 signalling is served.
    pub n4_addr: SocketAddr,

    // Own node address, embedded in every outgoing NodeID and F-SEID IE and
    // offered to peers as the data-plane address.  Fixed for the process
    // lifetime.
    pub node_addr: IpAddr,
}
