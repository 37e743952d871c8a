//! Scheduling events and the notification channel that carries them.
//!
//! The engine never redraws anything itself: it reports what happened as events, and
//! a caller-owned loop subscribed to an [`EventBus`] decides when to repaint.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
