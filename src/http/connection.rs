use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, info, warn};

use crate::http::compress::GzipCompressor;
use crate::http::parser::{has_complete_head, parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// One client connection.
///
/// Owns its transport and receive buffer exclusively; the router and
/// compressor are shared read-only with every other connection.
pub struct Connection<T> {
    stream: T,
    buffer: BytesMut,
    max_request_bytes: usize,
    router: Arc<Router>,
    compressor: GzipCompressor,
    state: ConnectionState,
    /// Body bytes of a rejected request still to be drained from the stream.
    unread_body: u64,
    /// Set when a rejected request cannot be framed; close after the reply.
    close_after_reply: bool,
}

pub enum ConnectionState {
    Reading,
    Processing(Result<Request, ParseError>),
    Writing(ResponseWriter),
    Closed,
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        stream: T,
        router: Arc<Router>,
        compressor: GzipCompressor,
        max_request_bytes: usize,
    ) -> Self {
        let max_request_bytes = max_request_bytes.max(1);
        Self {
            stream,
            buffer: BytesMut::with_capacity(max_request_bytes),
            max_request_bytes,
            router,
            compressor,
            state: ConnectionState::Reading,
            unread_body: 0,
            close_after_reply: false,
        }
    }

    /// Serves requests until the peer closes the connection.
    ///
    /// Parse and routing failures are answered with 404 and the loop goes on.
    /// Transport errors end it early, as does a request head too large to
    /// find the end of.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(parsed) => ConnectionState::Processing(parsed),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Processing(parsed) => {
                    let response = self.respond(parsed);
                    ConnectionState::Writing(ResponseWriter::new(&response))
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    debug!(bytes = writer.written(), "Response sent");
                    self.buffer.clear();

                    if self.close_after_reply {
                        debug!("Closing after unframeable request");
                        ConnectionState::Closed
                    } else {
                        ConnectionState::Reading
                    }
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Receives one request.
    ///
    /// Returns `None` when the peer closes. A request whose head or body has
    /// not fully arrived is read further, up to `max_request_bytes`. When the
    /// body of an over-sized request is rejected, its unread remainder is
    /// drained before the next request is read.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        if !self.drain_unread_body().await? {
            return Ok(None);
        }

        loop {
            let remaining = self.max_request_bytes.saturating_sub(self.buffer.len());
            let n = (&mut self.stream)
                .take(remaining as u64)
                .read_buf(&mut self.buffer)
                .await?;

            if n == 0 {
                if !self.buffer.is_empty() {
                    debug!(buffered = self.buffer.len(), "Peer closed mid-request");
                }
                return Ok(None);
            }

            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    if consumed < self.buffer.len() {
                        debug!(
                            discarded = self.buffer.len() - consumed,
                            "Ignoring bytes after request body"
                        );
                    }
                    return Ok(Some(Ok(request)));
                }

                Err(ParseError::Incomplete { .. })
                    if self.buffer.len() < self.max_request_bytes =>
                {
                    // Need more data → read again
                }

                Err(ParseError::MalformedHeaders) if !has_complete_head(&self.buffer) => {
                    if self.buffer.len() < self.max_request_bytes {
                        continue;
                    }
                    self.close_after_reply = true;
                    return Ok(Some(Err(ParseError::MalformedHeaders)));
                }

                Err(e @ ParseError::Incomplete { expected, available }) => {
                    self.unread_body = expected.saturating_sub(available) as u64;
                    return Ok(Some(Err(e)));
                }

                Err(e) => return Ok(Some(Err(e))),
            }
        }
    }

    /// Skips the rest of a rejected body. Returns `false` if the peer closed
    /// before all of it arrived.
    async fn drain_unread_body(&mut self) -> anyhow::Result<bool> {
        if self.unread_body == 0 {
            return Ok(true);
        }

        let owed = self.unread_body;
        let skipped = tokio::io::copy(
            &mut (&mut self.stream).take(owed),
            &mut tokio::io::sink(),
        )
        .await?;
        self.unread_body = 0;

        debug!(skipped, "Drained rejected request body");
        Ok(skipped == owed)
    }

    fn respond(&self, parsed: Result<Request, ParseError>) -> Response {
        let request = match parsed {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Rejecting unparsable request");
                return Response::not_found();
            }
        };

        let response = self.router.handle(&request);
        let response = self
            .compressor
            .apply(response, request.accepted_encodings());

        info!(
            method = ?request.method,
            target = %request.target,
            status = response.status.as_u16(),
            "Handled request"
        );

        response
    }
}
