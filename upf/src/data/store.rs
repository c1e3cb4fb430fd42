//! store - in-memory state of known peer nodes and active sessions

use super::{Association, Session, SessionState};
use crate::pfcp::NodeId;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::net::SocketAddr;
use std::sync::Arc;

/// Associations keyed by peer address and sessions keyed by local SEID.
/// Every operation is atomic per key, so independent sessions can be
/// processed concurrently without further locking.
#[derive(Clone, Default)]
pub struct SessionStore {
    associations: Arc<DashMap<SocketAddr, Association>>,
    sessions: Arc<DashMap<u64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_association(&self, peer_addr: SocketAddr, peer_node_id: NodeId) {
        self.associations.insert(
            peer_addr,
            Association {
                peer_node_id,
                peer_addr,
            },
        );
    }

    pub fn remove_association(&self, peer_addr: &SocketAddr) -> bool {
        self.associations.remove(peer_addr).is_some()
    }

    pub fn association(&self, peer_addr: &SocketAddr) -> Option<Association> {
        self.associations.get(peer_addr).map(|a| a.clone())
    }

    /// Create a session in Establishing state, allocating a fresh nonzero
    /// local SEID that no live session holds.
    pub fn create_session(&self, remote_seid: u64, peer_addr: SocketAddr) -> u64 {
        loop {
            let local_seid = rand::random::<u64>();
            if local_seid == 0 {
                continue;
            }
            match self.sessions.entry(local_seid) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(entry) => {
                    entry.insert(Session {
                        local_seid,
                        remote_seid,
                        peer_addr,
                        state: SessionState::Establishing,
                    });
                    return local_seid;
                }
            }
        }
    }

    pub fn lookup_session(&self, local_seid: u64) -> Option<Session> {
        self.sessions.get(&local_seid).map(|s| s.clone())
    }

    /// Apply a mutation under the session's key lock.  Returns false when
    /// the SEID is unknown.
    pub fn update_session(&self, local_seid: u64, mutator: impl FnOnce(&mut Session)) -> bool {
        match self.sessions.get_mut(&local_seid) {
            Some(mut session) => {
                mutator(&mut session);
                true
            }
            None => false,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn association_count(&self) -> usize {
        self.associations.len()
    }
}
