//! upf - starts and owns the N4 control endpoint

use crate::data::SessionStore;
use crate::n4::{N4Server, bind_n4_socket};
use crate::pfcp::NodeId;
use crate::userplane::{ForwardingError, ForwardingTable};
use crate::{Config, HandlerApi, Session, ShutdownHandle};
use anyhow::Result;
use async_std::sync::Mutex;
use async_trait::async_trait;
use slog::{Logger, info};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub struct Upf {
    config: Config,
    n4_addr: SocketAddr,
    store: SessionStore,
    forwarding_table: Arc<dyn ForwardingTable>,
    logger: Logger,
    server_handle: Arc<Mutex<Option<ShutdownHandle>>>,
}

impl Upf {
    pub async fn start(
        config: Config,
        logger: Logger,
        forwarding_table: Arc<dyn ForwardingTable>,
    ) -> Result<Self> {
        let socket = bind_n4_socket(config.n4_addr, &logger)?;
        let n4_addr = socket.local_addr()?;
        let upf = Upf {
            config,
            n4_addr,
            store: SessionStore::new(),
            forwarding_table,
            logger,
            server_handle: Arc::new(Mutex::new(None)),
        };
        let handle = N4Server::new(socket, upf.clone()).run(upf.logger.clone());
        *upf.server_handle.lock().await = Some(handle);
        Ok(upf)
    }

    pub async fn graceful_shutdown(self) {
        info!(&self.logger, "Shutting down");
        if let Some(handle) = self.server_handle.lock().await.take() {
            handle.graceful_shutdown().await;
        }
    }

    /// The bound N4 address - differs from the configured one when the
    /// configuration asked for an ephemeral port.
    pub fn n4_addr(&self) -> SocketAddr {
        self.n4_addr
    }

    pub fn session_count(&self) -> usize {
        self.store.session_count()
    }

    pub fn association_count(&self) -> usize {
        self.store.association_count()
    }
}

#[async_trait]
impl HandlerApi for Upf {
    fn config(&self) -> &Config {
        &self.config
    }

    fn upsert_association(&self, peer_addr: SocketAddr, peer_node_id: NodeId) {
        self.store.upsert_association(peer_addr, peer_node_id)
    }

    fn remove_association(&self, peer_addr: &SocketAddr) -> bool {
        self.store.remove_association(peer_addr)
    }

    fn create_session(&self, remote_seid: u64, peer_addr: SocketAddr) -> u64 {
        self.store.create_session(remote_seid, peer_addr)
    }

    fn lookup_session(&self, local_seid: u64) -> Option<Session> {
        self.store.lookup_session(local_seid)
    }

    fn update_session(
        &self,
        local_seid: u64,
        mutator: impl FnOnce(&mut Session) + Send,
    ) -> bool {
        self.store.update_session(local_seid, mutator)
    }

    async fn upsert_forwarding_rule(
        &self,
        teid: u32,
        action: u32,
    ) -> Result<(), ForwardingError> {
        self.forwarding_table.upsert(teid, action).await
    }
}
