//! WebSocket transport and event loop.
//!
//! This module implements the one concrete [`Transport`]: a client-side
//! WebSocket carrier for JSON envelopes.
//!
//! # Event Loop
//!
//! Each successful `open` spawns a tokio task that owns the socket and
//! handles:
//!
//! - Incoming text frames (decoded and delivered to the listener)
//! - Outgoing envelopes queued by [`WebSocketTransport::send`]
//! - The close handshake and its deferred outcome
//! - Lifecycle state transitions and listener notifications
//!
//! All socket events for one handle pass through this single task, so
//! listener hooks are serialized and inbound order is preserved. A fresh
//! `open` after the connection ends spawns a new task bound to a new socket;
//! the old one is never reused.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::{Envelope, SessionCompression, SessionEncryption};

use super::listener::{NoopListener, TransportListener};
use super::state::TransportState;
use super::trace::{Direction, NoopTrace, WireTrace};
use super::transport_trait::Transport;

// ============================================================================
// Constants
// ============================================================================

/// Subprotocol requested on the client handshake.
const LIME_SUBPROTOCOL: &str = "lime";

// ============================================================================
// Types
// ============================================================================

/// Client-side WebSocket stream, plaintext or TLS.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// TransportCommand
// ============================================================================

/// Internal commands for the event loop.
enum TransportCommand {
    /// Write one serialized envelope to the wire.
    Send { text: String },
    /// Run the close handshake and settle the deferred outcome.
    Close { done: oneshot::Sender<Result<()>> },
}

// ============================================================================
// Shared
// ============================================================================

/// State shared between the transport handle and its event loop.
struct Shared {
    /// Current lifecycle state.
    state: Mutex<TransportState>,
    /// Installed listener (swappable at runtime).
    listener: Mutex<Arc<dyn TransportListener>>,
    /// Wire-frame diagnostic sink.
    trace: Arc<dyn WireTrace>,
}

impl Shared {
    fn state(&self) -> TransportState {
        *self.state.lock()
    }

    fn set_state(&self, next: TransportState) {
        let mut state = self.state.lock();
        if *state != next {
            debug!(from = %*state, to = %next, "Transport state change");
            *state = next;
        }
    }

    fn listener(&self) -> Arc<dyn TransportListener> {
        self.listener.lock().clone()
    }
}

// ============================================================================
// WebSocketTransport
// ============================================================================

/// WebSocket carrier for JSON envelopes.
///
/// Owns at most one underlying connection at a time. Lifecycle transitions
/// and inbound envelopes are reported through the installed
/// [`TransportListener`]; `open` and `close` additionally settle their own
/// asynchronous outcomes.
///
/// # Thread Safety
///
/// `WebSocketTransport` is `Send + Sync`; all operations take `&self`.
///
/// # Example
///
/// ```no_run
/// use lime_ws::{Envelope, WebSocketTransport};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> lime_ws::Result<()> {
///     let transport = WebSocketTransport::new();
///     transport.open("wss://host.example/messaging").await?;
///     transport.send(&Envelope::new(json!({"id": "1"})))?;
///     transport.close().await?;
///     Ok(())
/// }
/// ```
pub struct WebSocketTransport {
    /// State shared with the event loop.
    shared: Arc<Shared>,
    /// Encryption selected for the current connection.
    encryption: Mutex<SessionEncryption>,
    /// Compression selected for the current connection.
    compression: Mutex<SessionCompression>,
    /// Command channel into the current event loop, if any.
    command_tx: Mutex<Option<mpsc::UnboundedSender<TransportCommand>>>,
}

impl WebSocketTransport {
    /// Creates a transport with a no-op listener and no frame tracing.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for configuring a transport.
    #[inline]
    #[must_use]
    pub fn builder() -> WebSocketTransportBuilder {
        WebSocketTransportBuilder::new()
    }

    /// Installs a listener, replacing the current one.
    ///
    /// The new listener observes all subsequent notifications; already
    /// dispatched ones are not replayed.
    pub fn set_listener(&self, listener: impl TransportListener + 'static) {
        *self.shared.listener.lock() = Arc::new(listener);
    }

    /// Replaces the current listener with the no-op listener.
    pub fn clear_listener(&self) {
        *self.shared.listener.lock() = Arc::new(NoopListener);
    }

    /// Opens a connection to the given target URI, requesting the `lime`
    /// subprotocol.
    ///
    /// Selects the encryption capability from the target text and resets
    /// compression, then performs the handshake. On success the transport
    /// is open and `on_open` has fired; on handshake failure the transport
    /// is failed and `on_error` has fired with the returned error.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyOpen`] if a connection is live (no state change)
    /// - [`Error::InvalidTarget`] if the target does not parse (no state
    ///   change)
    /// - [`Error::Connection`] if the handshake fails
    pub async fn open(&self, target: &str) -> Result<()> {
        Url::parse(target).map_err(|e| Error::invalid_target(target, e.to_string()))?;

        let mut request = target
            .into_client_request()
            .map_err(|e| Error::invalid_target(target, e.to_string()))?;
        request.headers_mut().insert(
            SEC_WEBSOCKET_PROTOCOL,
            HeaderValue::from_static(LIME_SUBPROTOCOL),
        );

        {
            let mut state = self.shared.state.lock();
            if !state.can_open() {
                return Err(Error::already_open(*state));
            }
            *state = TransportState::Opening;
        }
        debug!(uri = %target, "Opening WebSocket connection");

        *self.encryption.lock() = SessionEncryption::from_target(target);
        *self.compression.lock() = SessionCompression::None;

        match connect_async(request).await {
            Ok((ws_stream, response)) => {
                debug!(status = %response.status(), "WebSocket handshake completed");

                let (command_tx, command_rx) = mpsc::unbounded_channel();
                *self.command_tx.lock() = Some(command_tx);
                tokio::spawn(run_event_loop(
                    ws_stream,
                    command_rx,
                    Arc::clone(&self.shared),
                ));

                self.shared.set_state(TransportState::Open);
                self.shared.listener().on_open();
                Ok(())
            }
            Err(e) => {
                let err = Error::connection(format!("WebSocket connect failed: {e}"));
                self.shared.set_state(TransportState::Failed);
                self.shared.listener().on_error(&err);
                Err(err)
            }
        }
    }

    /// Closes the current connection.
    ///
    /// Suspends until the close handshake completes. On success the
    /// transport is closed and `on_close` has fired; if the handle errors
    /// while closing, the transport is failed and `on_error` has fired.
    ///
    /// # Errors
    ///
    /// - [`Error::NotOpen`] if the connection is not open (no action)
    /// - [`Error::Connection`] if the shutdown fails
    pub async fn close(&self) -> Result<()> {
        self.ensure_open()?;

        let (done_tx, done_rx) = oneshot::channel();
        self.shared.set_state(TransportState::Closing);

        let delivered = {
            let command_tx = self.command_tx.lock();
            command_tx
                .as_ref()
                .is_some_and(|tx| tx.send(TransportCommand::Close { done: done_tx }).is_ok())
        };
        if !delivered {
            let err = Error::ConnectionClosed;
            self.shared.set_state(TransportState::Failed);
            self.shared.listener().on_error(&err);
            return Err(err);
        }

        done_rx.await?
    }

    /// Sends one envelope as a text frame.
    ///
    /// Fire-and-forget: the frame is handed to the event loop for writing
    /// and the call returns without suspending. Delivery confirmation is
    /// not part of the contract; a failed write surfaces through
    /// `on_error` and the failed state.
    ///
    /// # Errors
    ///
    /// - [`Error::NotOpen`] if the connection is not open (no wire traffic)
    /// - [`Error::Json`] if the envelope cannot be serialized
    pub fn send(&self, envelope: &Envelope) -> Result<()> {
        self.ensure_open()?;

        let text = envelope.to_wire()?;
        self.shared.trace.frame(Direction::Send, &text);

        let command_tx = self.command_tx.lock();
        let tx = command_tx.as_ref().ok_or(Error::NotOpen)?;
        tx.send(TransportCommand::Send { text })
            .map_err(|_| Error::ConnectionClosed)
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> TransportState {
        self.shared.state()
    }

    /// Returns the encryption mode selected for the current connection.
    #[inline]
    #[must_use]
    pub fn encryption(&self) -> SessionEncryption {
        *self.encryption.lock()
    }

    /// Returns the compression mode selected for the current connection.
    #[inline]
    #[must_use]
    pub fn compression(&self) -> SessionCompression {
        *self.compression.lock()
    }

    /// Returns the fixed set of supported encryption modes.
    #[inline]
    #[must_use]
    pub fn supported_encryption(&self) -> &'static [SessionEncryption] {
        SessionEncryption::SUPPORTED
    }

    /// Returns the fixed set of supported compression modes.
    #[inline]
    #[must_use]
    pub fn supported_compression(&self) -> &'static [SessionCompression] {
        SessionCompression::SUPPORTED
    }

    /// Requests an encryption change.
    ///
    /// # Errors
    ///
    /// Always fails with [`Error::UnsupportedOperation`]; this transport
    /// reports capabilities but does not negotiate them.
    pub fn set_encryption(&self, _encryption: SessionEncryption) -> Result<()> {
        Err(Error::unsupported_operation("Encryption"))
    }

    /// Requests a compression change.
    ///
    /// # Errors
    ///
    /// Always fails with [`Error::UnsupportedOperation`]; this transport
    /// reports capabilities but does not negotiate them.
    pub fn set_compression(&self, _compression: SessionCompression) -> Result<()> {
        Err(Error::unsupported_operation("Compression"))
    }

    /// Returns an error unless the connection is open.
    fn ensure_open(&self) -> Result<()> {
        if self.shared.state().is_open() {
            Ok(())
        } else {
            Err(Error::NotOpen)
        }
    }
}

impl Default for WebSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WebSocketTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSocketTransport")
            .field("state", &self.state())
            .field("encryption", &self.encryption())
            .field("compression", &self.compression())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Transport Implementation
// ============================================================================

#[async_trait::async_trait]
impl Transport for WebSocketTransport {
    async fn open(&self, target: &str) -> Result<()> {
        WebSocketTransport::open(self, target).await
    }

    async fn close(&self) -> Result<()> {
        WebSocketTransport::close(self).await
    }

    fn send(&self, envelope: &Envelope) -> Result<()> {
        WebSocketTransport::send(self, envelope)
    }

    fn state(&self) -> TransportState {
        WebSocketTransport::state(self)
    }

    fn encryption(&self) -> SessionEncryption {
        WebSocketTransport::encryption(self)
    }

    fn compression(&self) -> SessionCompression {
        WebSocketTransport::compression(self)
    }

    fn supported_encryption(&self) -> &'static [SessionEncryption] {
        WebSocketTransport::supported_encryption(self)
    }

    fn supported_compression(&self) -> &'static [SessionCompression] {
        WebSocketTransport::supported_compression(self)
    }

    fn set_encryption(&self, encryption: SessionEncryption) -> Result<()> {
        WebSocketTransport::set_encryption(self, encryption)
    }

    fn set_compression(&self, compression: SessionCompression) -> Result<()> {
        WebSocketTransport::set_compression(self, compression)
    }
}

// ============================================================================
// WebSocketTransportBuilder
// ============================================================================

/// Builder for configuring a [`WebSocketTransport`].
///
/// Use [`WebSocketTransport::builder()`] to create a new builder.
#[derive(Default)]
pub struct WebSocketTransportBuilder {
    /// Listener to install, if any.
    listener: Option<Arc<dyn TransportListener>>,
    /// Frame trace sink to install, if any.
    trace: Option<Arc<dyn WireTrace>>,
}

impl WebSocketTransportBuilder {
    /// Creates a new transport builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lifecycle listener.
    #[inline]
    #[must_use]
    pub fn listener(mut self, listener: impl TransportListener + 'static) -> Self {
        self.listener = Some(Arc::new(listener));
        self
    }

    /// Sets the wire-frame diagnostic sink.
    #[inline]
    #[must_use]
    pub fn trace(mut self, trace: impl WireTrace + 'static) -> Self {
        self.trace = Some(Arc::new(trace));
        self
    }

    /// Builds the transport.
    ///
    /// Missing configuration falls back to the no-op listener and the
    /// no-op trace sink.
    #[must_use]
    pub fn build(self) -> WebSocketTransport {
        let listener: Arc<dyn TransportListener> =
            self.listener.unwrap_or_else(|| Arc::new(NoopListener));
        let trace: Arc<dyn WireTrace> = self.trace.unwrap_or_else(|| Arc::new(NoopTrace));

        WebSocketTransport {
            shared: Arc::new(Shared {
                state: Mutex::new(TransportState::Idle),
                listener: Mutex::new(listener),
                trace,
            }),
            encryption: Mutex::new(SessionEncryption::default()),
            compression: Mutex::new(SessionCompression::default()),
            command_tx: Mutex::new(None),
        }
    }
}

impl fmt::Debug for WebSocketTransportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSocketTransportBuilder")
            .field("listener", &self.listener.is_some())
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

// ============================================================================
// Event Loop
// ============================================================================

/// Event loop that owns the socket for one connection.
async fn run_event_loop(
    ws_stream: WsStream,
    mut command_rx: mpsc::UnboundedReceiver<TransportCommand>,
    shared: Arc<Shared>,
) {
    let (mut ws_write, mut ws_read) = ws_stream.split();
    let mut pending_close: Option<oneshot::Sender<Result<()>>> = None;

    loop {
        tokio::select! {
            // Inbound frames and stream termination
            message = ws_read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        shared.trace.frame(Direction::Receive, &text);
                        match Envelope::from_wire(&text) {
                            Ok(envelope) => shared.listener().on_envelope(envelope),
                            Err(err) => {
                                // Undecodable frames are reported and dropped;
                                // the connection stays up.
                                warn!(error = %err, "Failed to decode inbound frame");
                                shared.listener().on_error(&err);
                            }
                        }
                    }

                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket stream ended");
                        shared.set_state(TransportState::Closed);
                        if let Some(done) = pending_close.take() {
                            let _ = done.send(Ok(()));
                        }
                        shared.listener().on_close();
                        break;
                    }

                    Some(Err(e)) => {
                        error!(error = %e, "WebSocket error");
                        report_failure(&shared, &mut pending_close, e.to_string());
                        break;
                    }

                    // Ignore Binary, Ping, Pong
                    _ => {}
                }
            }

            // Commands from the transport handle
            command = command_rx.recv() => {
                match command {
                    Some(TransportCommand::Send { text }) => {
                        if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                            error!(error = %e, "WebSocket send failed");
                            report_failure(&shared, &mut pending_close, e.to_string());
                            break;
                        }
                    }

                    Some(TransportCommand::Close { done }) => {
                        pending_close = Some(done);
                        if let Err(e) = ws_write.close().await {
                            error!(error = %e, "WebSocket close failed");
                            report_failure(&shared, &mut pending_close, e.to_string());
                            break;
                        }
                        // Completion is observed on the read side when the
                        // stream ends.
                    }

                    None => {
                        // Transport handle dropped; shut the sink and stop.
                        debug!("Command channel closed");
                        let _ = ws_write.close().await;
                        break;
                    }
                }
            }
        }
    }

    debug!("Transport event loop terminated");
}

/// Marks the connection failed, rejects any pending close outcome, and
/// notifies the listener.
fn report_failure(
    shared: &Shared,
    pending_close: &mut Option<oneshot::Sender<Result<()>>>,
    message: String,
) {
    shared.set_state(TransportState::Failed);
    if let Some(done) = pending_close.take() {
        let _ = done.send(Err(Error::connection(message.clone())));
    }
    let err = Error::connection(message);
    shared.listener().on_error(&err);
}

// ============================================================================
// Tests
// ============================================================================
