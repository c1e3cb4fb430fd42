//! association_release - forgets a peer SMF

use super::{HandlerApi, Procedure};
use crate::pfcp::{PfcpMessage, build};
use anyhow::Result;
use derive_deref::{Deref, DerefMut};
use slog::{Logger, info, warn};
use std::net::SocketAddr;

#[derive(Deref, DerefMut)]
pub struct AssociationReleaseProcedure<'a, A: HandlerApi>(Procedure<'a, A>);

impl<'a, A: HandlerApi> AssociationReleaseProcedure<'a, A> {
    pub fn new(api: &'a A, peer: SocketAddr, logger: &'a Logger) -> Self {
        AssociationReleaseProcedure(Procedure::new(api, peer, logger))
    }

    pub async fn run(&self, r: PfcpMessage) -> Result<PfcpMessage> {
        self.log_message(">> AssociationReleaseRequest");
        if self.api.remove_association(&self.peer) {
            info!(self.logger, "Released association with {}", self.peer);
        } else {
            warn!(
                self.logger,
                "Release from {} which has no association", self.peer
            );
        }
        let response =
            build::association_release_response(r.sequence_number, self.config().node_addr);
        self.log_message("<< AssociationReleaseResponse");
        Ok(response)
    }
}
