//! session_establishment - creates a session and installs its uplink fast-path rule

use super::{HandlerApi, Procedure};
use crate::SessionState;
use crate::pfcp::{self, Cause, PfcpMessage, build};
use anyhow::Result;
use derive_deref::{Deref, DerefMut};
use slog::{Logger, info, warn};
use std::net::SocketAddr;

#[derive(Deref, DerefMut)]
pub struct SessionEstablishmentProcedure<'a, A: HandlerApi>(Procedure<'a, A>);

impl<'a, A: HandlerApi> SessionEstablishmentProcedure<'a, A> {
    pub fn new(api: &'a A, peer: SocketAddr, logger: &'a Logger) -> Self {
        SessionEstablishmentProcedure(Procedure::new(api, peer, logger))
    }

    // Session Establishment Procedure
    // 1.    Pfcp SessionEstablishmentRequest >>
    // 2.    Pfcp SessionEstablishmentResponse <<
    pub async fn run(&self, r: PfcpMessage) -> Result<PfcpMessage> {
        self.log_message(">> SessionEstablishmentRequest");

        // The request must say where the peer wants session traffic
        // addressed.
        let Some(fseid) = pfcp::parse::fseid(&r) else {
            warn!(
                self.logger,
                "Session establishment from {} without F-SEID", self.peer
            );
            self.log_message("<< SessionEstablishmentResponse (rejected)");
            return Ok(build::session_establishment_reject(
                r.sequence_number,
                self.config().node_addr,
                Cause::MandatoryIeMissing,
            ));
        };

        let remote_seid = fseid.seid;
        let local_seid = self.api.create_session(remote_seid, self.peer);
        let action = self.forwarding_action(fseid);

        // The uplink TEID is the low 32 bits of the local SEID.
        let teid = local_seid as u32;
        if let Err(e) = self.api.upsert_forwarding_rule(teid, action).await {
            warn!(
                self.logger,
                "Fast-path rule for TEID {teid:#010x} not installed: {e}"
            );
        }

        self.api
            .update_session(local_seid, |s| s.state = SessionState::Active);
        info!(
            self.logger,
            "Established session {local_seid:#018x} for peer SEID {remote_seid:#018x} at {}",
            self.peer
        );

        let response = build::session_establishment_accept(
            r.sequence_number,
            remote_seid,
            self.config().node_addr,
            local_seid,
        );
        self.log_message("<< SessionEstablishmentResponse");
        Ok(response)
    }
}
