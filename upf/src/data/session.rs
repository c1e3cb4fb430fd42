use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Establishing,
    Active,
    Modifying,
}

/// One active PFCP session.  `local_seid` is assigned exactly once, at
/// creation, and identifies the session for its whole lifetime.  Owned
/// exclusively by the `SessionStore`; procedure handlers operate on it only
/// through store operations.
#[derive(Debug, Clone)]
pub struct Session {
    pub local_seid: u64,
    pub remote_seid: u64,
    pub peer_addr: SocketAddr,
    pub state: SessionState,
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(local {:#018x}, remote {:#018x}, {})",
            self.local_seid, self.remote_seid, self.peer_addr
        )
    }
}
