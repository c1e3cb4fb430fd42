//! session_modification - rebinds an active session and refreshes its fast-path rule

use super::{HandlerApi, Procedure};
use crate::SessionState;
use crate::pfcp::{self, Cause, PfcpMessage, build};
use anyhow::Result;
use derive_deref::{Deref, DerefMut};
use slog::{Logger, info, warn};
use std::net::SocketAddr;

#[derive(Deref, DerefMut)]
pub struct SessionModificationProcedure<'a, A: HandlerApi>(Procedure<'a, A>);

impl<'a, A: HandlerApi> SessionModificationProcedure<'a, A> {
    pub fn new(api: &'a A, peer: SocketAddr, logger: &'a Logger) -> Self {
        SessionModificationProcedure(Procedure::new(api, peer, logger))
    }

    // Session Modification Procedure
    // 1.    Pfcp SessionModificationRequest >>
    // 2.    Pfcp SessionModificationResponse <<
    pub async fn run(&self, r: PfcpMessage) -> Result<PfcpMessage> {
        self.log_message(">> SessionModificationRequest");

        // The header SEID names the session being modified.
        let local_seid = r.seid.unwrap_or(0);
        let Some(session) = self.api.lookup_session(local_seid) else {
            warn!(
                self.logger,
                "Modification of unknown session {local_seid:#018x} from {}", self.peer
            );
            self.log_message("<< SessionModificationResponse (rejected)");
            return Ok(build::session_modification_response(
                r.sequence_number,
                0,
                Cause::RequestRejected,
            ));
        };

        self.api
            .update_session(local_seid, |s| s.state = SessionState::Modifying);

        // A modification may rebind the peer's session endpoint, in which
        // case the fast-path rule is refreshed.  A failed upsert is
        // best-effort: the session keeps its new binding and the peer still
        // sees acceptance.
        let mut remote_seid = session.remote_seid;
        if let Some(fseid) = pfcp::parse::fseid(&r) {
            remote_seid = fseid.seid;
            self.api
                .update_session(local_seid, |s| s.remote_seid = remote_seid);
            let teid = local_seid as u32;
            let action = self.forwarding_action(fseid);
            if let Err(e) = self.api.upsert_forwarding_rule(teid, action).await {
                warn!(
                    self.logger,
                    "Fast-path rule for TEID {teid:#010x} not refreshed: {e}"
                );
            }
        }

        self.api
            .update_session(local_seid, |s| s.state = SessionState::Active);
        info!(self.logger, "Modified session {local_seid:#018x}");

        let response = build::session_modification_response(
            r.sequence_number,
            remote_seid,
            Cause::RequestAccepted,
        );
        self.log_message("<< SessionModificationResponse");
        Ok(response)
    }
}
