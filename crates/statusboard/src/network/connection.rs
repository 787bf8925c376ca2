use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::trace;
use uuid::Uuid;

use crate::core::error::{Result, SessionError};

const READ_CHUNK_SIZE: usize = 1024;

/// A client stream with per-operation timeouts.
///
/// Generic over the transport so tests can drive it with an in-memory duplex.
#[derive(Debug)]
pub struct Connection<S> {
    stream: S,
    pub session_id: Uuid,
    buffer: BytesMut,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, session_id: Uuid) -> Self {
        Self {
            stream,
            session_id,
            buffer: BytesMut::with_capacity(READ_CHUNK_SIZE),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeouts(mut self, read_timeout: Duration, write_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self.write_timeout = write_timeout;
        self
    }

    /// Waits for the next chunk of bytes from the peer.
    ///
    /// The returned slice is only valid until the next call. A clean EOF is
    /// reported as [`SessionError::ConnectionClosed`].
    pub async fn read_chunk(&mut self) -> Result<&[u8]> {
        self.buffer.clear();
        self.buffer.reserve(READ_CHUNK_SIZE);

        let read_timeout = self.read_timeout;
        let read = timeout(read_timeout, self.stream.read_buf(&mut self.buffer))
            .await
            .map_err(|_| SessionError::Timeout(read_timeout))??;

        if read == 0 {
            return Err(SessionError::ConnectionClosed);
        }

        trace!("Read {} bytes: {}", read, hex::encode(&self.buffer[..read]));
        Ok(&self.buffer[..read])
    }

    /// Writes all of `data` and flushes it.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        trace!("Writing {} bytes: {}", data.len(), hex::encode(data));

        let write_timeout = self.write_timeout;
        let stream = &mut self.stream;
        timeout(write_timeout, async {
            stream.write_all(data).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| SessionError::Timeout(write_timeout))??;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        let write_timeout = self.write_timeout;
        timeout(write_timeout, self.stream.shutdown())
            .await
            .map_err(|_| SessionError::Timeout(write_timeout))??;
        Ok(())
    }
}
