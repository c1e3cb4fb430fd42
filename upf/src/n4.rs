//! n4 - serves the N4 reference point: one UDP socket, one receive loop

use crate::procedures::N4Handler;
use crate::{HandlerApi, ShutdownHandle};
use anyhow::{Context, Result};
use async_std::net::UdpSocket;
use slog::{Logger, info, warn};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use stop_token::StopSource;
use stop_token::prelude::*;

const MAX_DATAGRAM: usize = 1500;

/// Bind the N4 signalling socket.  Failure here is fatal at startup - there
/// is no recovery path for "cannot listen".
pub fn bind_n4_socket(addr: SocketAddr, logger: &Logger) -> Result<UdpSocket> {
    let domain = match addr {
        SocketAddr::V4(_) => Domain::IPV4,
        SocketAddr::V6(_) => Domain::IPV6,
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket
        .bind(&addr.into())
        .context(format!("Failed to bind {addr}"))?;
    let socket = UdpSocket::from(std::net::UdpSocket::from(socket));
    info!(logger, "Serving N4 on {}", socket.local_addr()?);
    Ok(socket)
}

pub struct N4Server<A: HandlerApi> {
    socket: UdpSocket,
    handler: N4Handler<A>,
}

impl<A: HandlerApi> N4Server<A> {
    pub fn new(socket: UdpSocket, api: A) -> Self {
        N4Server {
            socket,
            handler: N4Handler::new(api),
        }
    }

    /// Run the receive loop until shutdown.  A decode failure or handler
    /// error never terminates the loop; only the stop signal does.
    pub fn run(self, logger: Logger) -> ShutdownHandle {
        let stop_source = StopSource::new();
        let stop_token = stop_source.token();
        let handle = async_std::task::spawn(async move {
            let mut buf = [0u8; MAX_DATAGRAM];
            loop {
                let (bytes_read, peer) = match self
                    .socket
                    .recv_from(&mut buf)
                    .timeout_at(stop_token.clone())
                    .await
                {
                    Err(_) => break, // shutdown requested
                    Ok(Err(e)) => {
                        warn!(logger, "N4 socket receive error: {e}");
                        continue;
                    }
                    Ok(Ok(received)) => received,
                };

                if let Some(reply) = self
                    .handler
                    .handle_datagram(&buf[..bytes_read], peer, &logger)
                    .await
                {
                    if let Err(e) = self.socket.send_to(&reply, peer).await {
                        warn!(logger, "Failed to send N4 response to {peer}: {e}");
                    }
                }
            }
            info!(logger, "N4 server stopped");
        });
        ShutdownHandle::new(handle, stop_source)
    }
}
