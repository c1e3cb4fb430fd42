use super::HandlerApi;
use crate::pfcp::FSeid;
use slog::{Logger, debug};
use std::net::{IpAddr, SocketAddr};

pub struct Procedure<'a, A: HandlerApi> {
    pub api: &'a A,
    pub peer: SocketAddr,
    pub logger: &'a Logger,
}

impl<'a, A: HandlerApi> Procedure<'a, A> {
    pub fn new(api: &'a A, peer: SocketAddr, logger: &'a Logger) -> Self {
        Procedure { api, peer, logger }
    }

    pub fn log_message(&self, s: &str) {
        debug!(self.logger, "{}", s)
    }

    /// Opaque fast-path action for a session: the peer's data-plane IPv4
    /// address, falling back to the signalling source address.
    pub fn forwarding_action(&self, fseid: &FSeid) -> u32 {
        match (fseid.ipv4, self.peer.ip()) {
            (Some(a), _) => a.into(),
            (None, IpAddr::V4(a)) => a.into(),
            (None, IpAddr::V6(_)) => 0,
        }
    }
}

impl<A: HandlerApi> std::ops::Deref for Procedure<'_, A> {
    type Target = A;

    fn deref(&self) -> &Self::Target {
        self.api
    }
}
