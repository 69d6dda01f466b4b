//! Event dispatch for no-std embedded targets.
//!
//! # Highlights
//! - Two fixed-capacity event queues (high and low priority), safe to push from
//!   interrupt handlers.
//! - Fixed-capacity dispatch table of `(event code, listener)` bindings with a
//!   fallback default listener.
//! - No allocation, no dynamic dispatch; every operation is bounded.
//!
//! # Quick start
//! ```
//! use ph_event_manager::{EventManager, GenericEvent, Priority};
//!
//! static EVENTS: EventManager = EventManager::new();
//!
//! fn on_timer(code: i32, param: i32) {
//!     assert_eq!(code, GenericEvent::Timer0.code());
//!     assert_eq!(param, 7);
//! }
//!
//! // Main loop setup.
//! let mut consumer = EVENTS.consumer().unwrap();
//! consumer.add_listener(GenericEvent::Timer0, on_timer).unwrap();
//!
//! // From an interrupt handler.
//! EVENTS
//!     .queue_event_with_priority(GenericEvent::Timer0, 7, Priority::High)
//!     .unwrap();
//!
//! // Main loop.
//! assert_eq!(consumer.process_event(), 1);
//! ```
//!
//! # No-std
//! The crate is `#![no_std]`. Tests require `std`.
//!
//! Queue access goes through the [`critical-section`](critical_section) crate; the
//! platform layer must provide an implementation that saves the interrupt state,
//! masks interrupts and restores the saved state on release. Targets without
//! native compare-and-swap enable one of the `portable-atomic*` features.
//!
//! # Concurrency
//! `EventManager::queue_event*` and the queue observers are the only operations
//! meant for interrupt context. Listener registration and event processing go
//! through the single [`Consumer`] handle and belong to the main loop.
//! Listeners run synchronously on the consumer's stack; they may queue events but
//! cannot modify the dispatch table.
//!
//! # Semantics
//! - High priority events are all dispatched before any low priority event.
//!   Sustained high priority traffic starves the low queue.
//! - Events in one queue are dispatched in FIFO order.
//! - All enabled listeners bound to an event's code run, in registration order.
//!   If none ran, the default listener (when installed and enabled) runs once.
//! - Duplicate `(code, listener)` bindings are allowed and each copy runs.
//! - Full queues and a full table reject new data and report it through the
//!   return value; nothing panics.
//!
//! # Configuration
//! Capacities are const generics defaulting to 8 and limited to
//! [`MAX_CAPACITY`]; out-of-range capacities fail to compile. The `log` feature
//! routes diagnostics from the consumer side to the `log` facade.
#![no_std]

#[macro_use]
mod macros;

mod atomic;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod manager;

pub use dispatch::{DefaultListener, DispatchTable, Listener, ListenerBinding};
pub use error::Error;
pub use event::{Event, GenericEvent, Priority};
pub use event_queue::EventQueue;
pub use manager::{Consumer, EventManager, ProcessStats};

/// Capacity of each event queue unless specified otherwise.
pub const DEFAULT_QUEUE_CAPACITY: usize = 8;

/// Capacity of the dispatch table unless specified otherwise.
pub const DEFAULT_DISPATCH_TABLE_CAPACITY: usize = 8;

/// Upper bound for any capacity; counters are stored as `u8`.
pub const MAX_CAPACITY: usize = u8::MAX as usize;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod testing;
