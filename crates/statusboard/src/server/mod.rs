//! TCP listener and per-connection driver.

pub mod motd;

use std::{future::Future, io, net::SocketAddr, sync::Arc};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{TcpListener, TcpStream},
};
use tracing::{Instrument, debug, debug_span, error, info, trace, warn};
use uuid::Uuid;

use crate::{
    core::{error::SessionError, status::ServerStatus},
    network::Connection,
    session::{Progress, Session},
};

pub struct StatusServer {
    listener: TcpListener,
    status: Arc<ServerStatus>,
}

impl StatusServer {
    pub async fn bind(addr: SocketAddr, status: ServerStatus) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::from_listener(listener, status))
    }

    pub fn from_listener(listener: TcpListener, status: ServerStatus) -> Self {
        Self {
            listener,
            status: Arc::new(status),
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the process exits.
    pub async fn run(self) -> io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accepts connections until `shutdown` completes. Connections already
    /// being served keep running on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("Listening on {}", self.local_addr()?);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down listener");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => self.spawn_connection(stream, addr),
                    Err(e) => error!("Accept error: {}", e),
                }
            }
        }
    }

    fn spawn_connection(&self, stream: TcpStream, addr: SocketAddr) {
        let session_id = Uuid::new_v4();
        let span = debug_span!("TCP Connection", peer_addr = %addr, %session_id);
        let status = Arc::clone(&self.status);

        tokio::spawn(
            async move {
                debug!("New TCP connection accepted");
                let conn = Connection::new(stream, session_id)
                    .with_timeouts(status.read_timeout, status.write_timeout);

                match handle_connection(conn, status).await {
                    Ok(()) => debug!("Status response sent"),
                    Err(e) if e.is_client_fault() => debug!("Connection dropped: {}", e),
                    Err(e) => warn!("Connection error: {}", e),
                }
            }
            .instrument(span),
        );
    }
}

/// Drives one connection through a fresh [`Session`] until it responds or fails.
pub async fn handle_connection<S>(
    mut conn: Connection<S>,
    status: Arc<ServerStatus>,
) -> Result<(), SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = Session::new(status);
    drive_session(&mut conn, &mut session).await
}

/// Feeds `session` from `conn` and writes its response.
///
/// The session is closed on every return path. A failed response write is
/// reported as [`SessionError::Io`].
pub async fn drive_session<S>(
    conn: &mut Connection<S>,
    session: &mut Session,
) -> Result<(), SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let chunk = conn.read_chunk().await?;
        match session.receive(chunk)? {
            Progress::NeedMoreData => {}
            Progress::Respond(response) => {
                conn.write_all(&response).await?;
                // the client may already have hung up after reading
                if let Err(e) = conn.shutdown().await {
                    trace!("Shutdown after response failed: {}", e);
                }
                return Ok(());
            }
            Progress::Closed => return Ok(()),
        }
    }
}
