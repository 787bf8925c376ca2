//! Per-connection protocol state machine.
//!
//! [`Session`] does no I/O. The caller feeds it whatever bytes arrived from
//! the socket and acts on the returned [`Progress`]: read more, send the
//! response, or drop the connection.

use std::sync::Arc;

use bytes::{Buf, Bytes, BytesMut};
use statusboard_protocol::{
    ClientBoundResponse, NextState, PacketError, ServerBoundHandshake, ServerBoundRequest,
    minecraft::java::status::serverbound_request::STATUS_REQUEST_BYTES, packet::try_read_frame,
};
use tracing::{debug, trace};

use crate::core::status::ServerStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingHandshake,
    AwaitingStatusRequest,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The buffered bytes do not hold a complete packet yet.
    NeedMoreData,
    /// A framed status response to write before closing the connection.
    Respond(Bytes),
    /// Nothing more will be accepted on this connection.
    Closed,
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    status: Arc<ServerStatus>,
    buffer: BytesMut,
    handshake: Option<ServerBoundHandshake>,
}

impl Session {
    pub fn new(status: Arc<ServerStatus>) -> Self {
        Self {
            state: SessionState::AwaitingHandshake,
            status,
            buffer: BytesMut::new(),
            handshake: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// The handshake accepted on this connection, once there is one.
    pub fn handshake(&self) -> Option<&ServerBoundHandshake> {
        self.handshake.as_ref()
    }

    /// Bytes received but not consumed by a packet yet.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Appends `bytes` to the receive buffer and advances as far as it allows.
    ///
    /// Any error closes the session. A closed session ignores further input
    /// and keeps answering [`Progress::Closed`].
    pub fn receive(&mut self, bytes: &[u8]) -> Result<Progress, PacketError> {
        if self.is_closed() {
            return Ok(Progress::Closed);
        }

        self.buffer.extend_from_slice(bytes);
        self.advance().inspect_err(|_| self.close())
    }

    fn close(&mut self) {
        self.state = SessionState::Closed;
        self.buffer.clear();
    }

    fn advance(&mut self) -> Result<Progress, PacketError> {
        loop {
            match self.state {
                SessionState::AwaitingHandshake => {
                    let Some(frame) = try_read_frame(&self.buffer, self.status.max_frame_length)?
                    else {
                        return Ok(Progress::NeedMoreData);
                    };

                    let consumed = frame.total_len();
                    let handshake =
                        ServerBoundHandshake::from_frame(&frame, self.status.max_string_length)?;

                    if handshake.next_state()? != NextState::Status {
                        return Err(PacketError::UnsupportedNextState(handshake.next_state.0));
                    }

                    debug!(
                        "Status handshake for {}:{} (protocol {})",
                        handshake.parse_server_address(),
                        handshake.server_port,
                        handshake.protocol_version.0
                    );

                    self.buffer.advance(consumed);
                    self.handshake = Some(handshake);
                    self.state = SessionState::AwaitingStatusRequest;
                }
                SessionState::AwaitingStatusRequest => {
                    // bytes are matched as they arrive, a wrong one fails at once
                    if ServerBoundRequest::try_read(&self.buffer)?.is_none() {
                        return Ok(Progress::NeedMoreData);
                    }

                    let ignored = self.buffer.len() - STATUS_REQUEST_BYTES.len();
                    if ignored > 0 {
                        trace!("Ignoring {} bytes after the status request", ignored);
                    }

                    let response = ClientBoundResponse::new(self.status.json.clone()).to_frame()?;
                    self.close();
                    return Ok(Progress::Respond(response.freeze()));
                }
                SessionState::Closed => return Ok(Progress::Closed),
            }
        }
    }
}
