//! Errors reported when a fixed capacity is exhausted.
//!
//! Neither error is fatal: the rejected event or binding is dropped and the
//! manager keeps running. Lookups that find nothing return `false` or `0`
//! instead of an error.

use crate::event::Priority;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The selected event queue was full; the event was dropped.
    #[error("{0:?} priority event queue is full")]
    QueueFull(Priority),
    /// The dispatch table was full; the listener was not registered.
    #[error("dispatch table is full")]
    TableFull,
}
