//! mock_smf - enables a test script to assume the role of the SMF on the N4 reference point


use anyhow::{Result, anyhow, bail, ensure};
use async_std::future::timeout;
use async_std::net::UdpSocket;
use slog::{Logger, info, o};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use upf::pfcp::{self, Cause, FSeid, MessageType, PfcpMessage};

pub use build_pfcp::fseid;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

pub struct MockSmf {
    socket: UdpSocket,
    upf_addr: SocketAddr,
    logger: Logger,
}

impl MockSmf {
    pub async fn new(upf_addr: SocketAddr, logger: &Logger) -> Result<MockSmf> {
        let logger = logger.new(o!("smf" => 1));
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        Ok(MockSmf {
            socket,
            upf_addr,
            logger,
        })
    }

    /// The IPv4 address this SMF signals from, used as its data-plane
    /// address in F-SEIDs.
    pub fn local_ipv4(&self) -> Result<Ipv4Addr> {
        match self.socket.local_addr()?.ip() {
            IpAddr::V4(a) => Ok(a),
            IpAddr::V6(a) => bail!("Expected IPv4 socket, got {a}"),
        }
    }

    pub async fn send_message(&self, message: PfcpMessage) -> Result<()> {
        self.send_raw(&message.encode()).await
    }

    pub async fn send_raw(&self, datagram: &[u8]) -> Result<()> {
        self.socket.send_to(datagram, self.upf_addr).await?;
        Ok(())
    }

    pub async fn receive_message(&self) -> Result<PfcpMessage> {
        let mut buf = [0u8; 1500];
        let (bytes_read, _from) = timeout(RECV_TIMEOUT, self.socket.recv_from(&mut buf))
            .await
            .map_err(|_| anyhow!("No response from UPF within {RECV_TIMEOUT:?}"))??;
        Ok(PfcpMessage::decode(&buf[..bytes_read])?)
    }

    /// Fails if any datagram arrives within the silence window.
    pub async fn expect_no_message(&self) -> Result<()> {
        let mut buf = [0u8; 1500];
        match timeout(SILENCE_WINDOW, self.socket.recv_from(&mut buf)).await {
            Err(_) => Ok(()),
            Ok(received) => {
                let (bytes_read, _from) = received?;
                bail!("Expected silence, got a {bytes_read} byte datagram")
            }
        }
    }

    pub async fn perform_association_setup(&self, seq: u32) -> Result<PfcpMessage> {
        info!(self.logger, "AssociationSetupRequest >>");
        self.send_message(build_pfcp::association_setup_request(
            seq,
            self.local_ipv4()?,
        ))
        .await?;
        let response = self
            .expect_response(MessageType::AssociationSetupResponse, seq)
            .await?;
        info!(self.logger, "AssociationSetupResponse <<");
        Ok(response)
    }

    pub async fn perform_association_release(&self, seq: u32) -> Result<PfcpMessage> {
        info!(self.logger, "AssociationReleaseRequest >>");
        self.send_message(build_pfcp::association_release_request(
            seq,
            self.local_ipv4()?,
        ))
        .await?;
        let response = self
            .expect_response(MessageType::AssociationReleaseResponse, seq)
            .await?;
        info!(self.logger, "AssociationReleaseResponse <<");
        Ok(response)
    }

    /// Establish a session and return the SEID the UPF assigned to it.
    pub async fn establish_session(&self, seq: u32, remote_seid: u64) -> Result<u64> {
        let fseid = fseid(remote_seid, self.local_ipv4()?);
        let response = self.request_session_establishment(seq, Some(fseid)).await?;
        ensure!(
            pfcp::parse::cause(&response) == Some(Cause::RequestAccepted),
            "Session establishment rejected: {:?}",
            pfcp::parse::cause(&response)
        );
        let fseid = pfcp::parse::fseid(&response)
            .ok_or(anyhow!("SessionEstablishmentResponse without F-SEID"))?;
        Ok(fseid.seid)
    }

    pub async fn request_session_establishment(
        &self,
        seq: u32,
        fseid: Option<FSeid>,
    ) -> Result<PfcpMessage> {
        info!(self.logger, "SessionEstablishmentRequest >>");
        self.send_message(build_pfcp::session_establishment_request(
            seq,
            fseid,
            self.local_ipv4()?,
        ))
        .await?;
        let response = self
            .expect_response(MessageType::SessionEstablishmentResponse, seq)
            .await?;
        info!(self.logger, "SessionEstablishmentResponse <<");
        Ok(response)
    }

    pub async fn modify_session(
        &self,
        seq: u32,
        upf_seid: u64,
        fseid: Option<FSeid>,
    ) -> Result<PfcpMessage> {
        info!(self.logger, "SessionModificationRequest >>");
        self.send_message(build_pfcp::session_modification_request(
            seq, upf_seid, fseid,
        ))
        .await?;
        let response = self
            .expect_response(MessageType::SessionModificationResponse, seq)
            .await?;
        info!(self.logger, "SessionModificationResponse <<");
        Ok(response)
    }

    async fn expect_response(
        &self,
        message_type: MessageType,
        seq: u32,
    ) -> Result<PfcpMessage> {
        let response = self.receive_message().await?;
        ensure!(
            response.message_type == message_type,
            "Expected {message_type:?}, got {:?}",
            response.message_type
        );
        ensure!(
            response.sequence_number == seq,
            "Expected sequence number {seq}, got {}",
            response.sequence_number
        );
        Ok(response)
    }
}
