//! n4_handler - N4 entry point that routes decoded PFCP messages to procedures

use super::association_release::AssociationReleaseProcedure;
use super::association_setup::AssociationSetupProcedure;
use super::session_establishment::SessionEstablishmentProcedure;
use super::session_modification::SessionModificationProcedure;
use super::HandlerApi;
use crate::pfcp::{MessageType, PfcpMessage};
use derive_deref::Deref;
use slog::{Logger, info, warn};
use std::net::SocketAddr;

#[derive(Clone, Deref)]
pub struct N4Handler<A: HandlerApi>(A);

impl<A: HandlerApi> N4Handler<A> {
    pub fn new(api: A) -> Self {
        N4Handler(api)
    }

    /// Handle one datagram from the socket.  Returns the encoded response,
    /// or None when the datagram is dropped - undecodable, unsupported, or
    /// response traffic, none of which get a reply of their own.
    pub async fn handle_datagram(
        &self,
        datagram: &[u8],
        peer: SocketAddr,
        logger: &Logger,
    ) -> Option<Vec<u8>> {
        let message = match PfcpMessage::decode(datagram) {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    logger,
                    "Ignored undecodable datagram from {peer}: {e} ({})",
                    hex::encode(datagram)
                );
                return None;
            }
        };

        let message_type = message.message_type;
        let result = match message_type {
            MessageType::AssociationSetupRequest => {
                AssociationSetupProcedure::new(&self.0, peer, logger)
                    .run(message)
                    .await
            }
            MessageType::AssociationReleaseRequest => {
                AssociationReleaseProcedure::new(&self.0, peer, logger)
                    .run(message)
                    .await
            }
            MessageType::SessionEstablishmentRequest => {
                SessionEstablishmentProcedure::new(&self.0, peer, logger)
                    .run(message)
                    .await
            }
            MessageType::SessionModificationRequest => {
                SessionModificationProcedure::new(&self.0, peer, logger)
                    .run(message)
                    .await
            }
            other => {
                info!(logger, "Dropped PFCP message {other:?} from {peer}");
                return None;
            }
        };

        match result {
            Ok(response) => Some(response.encode()),
            Err(e) => {
                warn!(logger, "{message_type:?} from {peer} failed: {e}");
                None
            }
        }
    }
}
