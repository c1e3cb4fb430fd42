//! association_setup - records the peer SMF and offers it this endpoint's userplane resources

use super::{HandlerApi, Procedure};
use crate::pfcp::{self, NodeId, PfcpMessage, build};
use anyhow::Result;
use derive_deref::{Deref, DerefMut};
use slog::{Logger, info};
use std::net::SocketAddr;

#[derive(Deref, DerefMut)]
pub struct AssociationSetupProcedure<'a, A: HandlerApi>(Procedure<'a, A>);

impl<'a, A: HandlerApi> AssociationSetupProcedure<'a, A> {
    pub fn new(api: &'a A, peer: SocketAddr, logger: &'a Logger) -> Self {
        AssociationSetupProcedure(Procedure::new(api, peer, logger))
    }

    // Association Setup Procedure
    // 1.    Pfcp AssociationSetupRequest >>
    // 2.    Pfcp AssociationSetupResponse <<
    pub async fn run(&self, r: PfcpMessage) -> Result<PfcpMessage> {
        self.log_message(">> AssociationSetupRequest");
        let peer_node_id = pfcp::parse::node_id(&r)
            .cloned()
            .unwrap_or(NodeId::from(self.peer.ip()));
        info!(
            self.logger,
            "Association setup with node {peer_node_id} at {}", self.peer
        );

        // Current policy: no competing-node arbitration, every setup is
        // accepted and refreshes the association.
        self.api.upsert_association(self.peer, peer_node_id);

        let response =
            build::association_setup_response(r.sequence_number, self.config().node_addr);
        self.log_message("<< AssociationSetupResponse");
        Ok(response)
    }
}
