use crate::pfcp::NodeId;
use crate::userplane::ForwardingError;
use crate::{Config, Session};
use async_trait::async_trait;
use std::net::SocketAddr;

/// Trait representing the collection of services needed by N4 procedure
/// handlers.
#[async_trait]
pub trait HandlerApi: Send + Sync + Clone + 'static {
    fn config(&self) -> &Config;

    fn upsert_association(&self, peer_addr: SocketAddr, peer_node_id: NodeId);
    fn remove_association(&self, peer_addr: &SocketAddr) -> bool;

    fn create_session(&self, remote_seid: u64, peer_addr: SocketAddr) -> u64;
    fn lookup_session(&self, local_seid: u64) -> Option<Session>;
    fn update_session(
        &self,
        local_seid: u64,
        mutator: impl FnOnce(&mut Session) + Send,
    ) -> bool;

    async fn upsert_forwarding_rule(&self, teid: u32, action: u32)
        -> Result<(), ForwardingError>;
}
