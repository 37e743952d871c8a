//! Publish/subscribe abstraction (mechanics only).
//!
//! This replaces a reactive "mutate and every subscriber re-renders" container with an
//! explicit contract: the dispatcher publishes once a mutation has fully completed, and
//! each subscriber (typically a redraw loop) drains its own [`Subscription`].
//!
//! - **Broadcast**: every subscription receives a copy of every published message.
//! - **Ordered per publisher**: messages arrive in the order they were published.
//! - **No persistence**: the bus distributes; saving state is a separate, explicit step.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to a message stream.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = bus.subscribe();
///
/// // after each dispatched command:
/// while let Ok(message) = subscription.try_recv() {
///     if message.wants_redraw() {
///         render(&planner);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Message bus (pub/sub abstraction).
///
/// `publish()` can fail; failures are surfaced to the caller (the dispatcher), which has
/// already committed the in-memory mutation and only lost the notification.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
