//! Delivery channels: how a job's outcome reaches its original caller.
//!
//! Exactly one channel exists per job, fixed at job construction: either a
//! live connection owned by the transport layer or a deferred handle awaited
//! by an internal caller. Modeling the pair as a sum type makes "exactly one
//! present" a type-level guarantee instead of a runtime check.

use tokio::sync::oneshot;

use crate::response::FormattedResponse;

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// The failure outcome a deferred caller observes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("{message}")]
    Upstream { status: u16, message: String },
}

impl DispatchError {
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::Upstream { status, .. } => *status,
        }
    }
}

// ---------------------------------------------------------------------------
// LiveSender
// ---------------------------------------------------------------------------

/// Transport-layer seam for jobs driven by an external connection.
///
/// Both methods consume the sender: a connection is answered at most once,
/// and the type system enforces it. Implementations are fire-and-forget
/// handoffs — neither method blocks.
pub trait LiveSender: Send {
    /// Hand the formatted response to the transport; it owns the bytes
    /// afterwards.
    fn send_success(self: Box<Self>, response: FormattedResponse);

    /// Report a failure with an HTTP-style status code and message.
    fn send_error(self: Box<Self>, status: u16, message: &str);
}

// ---------------------------------------------------------------------------
// DeferredHandle
// ---------------------------------------------------------------------------

/// Single-assignment completion cell for jobs without a live connection.
///
/// Terminal states are `resolve` (raw body bytes) and `reject` (an error).
/// The cell is backed by a oneshot channel, so assigning twice is impossible
/// by construction and exactly one awaiter observes the outcome.
pub struct DeferredHandle {
    tx: oneshot::Sender<Result<Vec<u8>, DispatchError>>,
}

/// The awaiter side of a [`DeferredHandle`].
pub struct DeferredResult {
    rx: oneshot::Receiver<Result<Vec<u8>, DispatchError>>,
}

impl DeferredHandle {
    /// Create a handle together with its awaiter.
    pub fn new() -> (Self, DeferredResult) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, DeferredResult { rx })
    }

    /// Resolve with the raw result payload.
    ///
    /// Deferred callers receive only the body bytes, never the formatted
    /// wrapper. A dropped awaiter is tolerated — the outcome has nowhere to
    /// go, which is the awaiter's choice.
    pub fn resolve(self, body: Vec<u8>) {
        let _ = self.tx.send(Ok(body));
    }

    /// Reject with a terminal error.
    pub fn reject(self, error: DispatchError) {
        let _ = self.tx.send(Err(error));
    }
}

impl DeferredResult {
    /// Await the job's outcome.
    ///
    /// # Panics
    ///
    /// Panics if the job was dropped without ever resolving or rejecting —
    /// a job always has a way to report its outcome, so a vanished sender is
    /// a broken invariant in the scheduler.
    pub async fn recv(self) -> Result<Vec<u8>, DispatchError> {
        self.rx
            .await
            .expect("job dropped without delivering an outcome")
    }
}

// ---------------------------------------------------------------------------
// DeliveryChannel
// ---------------------------------------------------------------------------

/// The one way a job reports its outcome.
pub enum DeliveryChannel {
    /// An external request/response exchange held by the transport layer.
    Live(Box<dyn LiveSender>),
    /// A deferred handle awaited by an internal caller.
    Deferred(DeferredHandle),
}

impl DeliveryChannel {
    /// Convenience constructor for the deferred variant.
    pub fn deferred() -> (Self, DeferredResult) {
        let (handle, result) = DeferredHandle::new();
        (DeliveryChannel::Deferred(handle), result)
    }

    /// Convenience constructor for the live variant.
    pub fn live(sender: impl LiveSender + 'static) -> Self {
        DeliveryChannel::Live(Box::new(sender))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
