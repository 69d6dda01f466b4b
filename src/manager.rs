//! Two priority queues plus a dispatch table, drained by a single consumer.
//!
//! # Overview
//! - [`EventManager`] owns a high and a low priority [`EventQueue`] and a
//!   [`DispatchTable`]. All constructors are `const`, so it can live in a `static`.
//! - Producers (including interrupt handlers) call `queue_event` on a shared
//!   reference. Queue access is guarded by a critical section.
//! - Exactly one [`Consumer`] may exist at a time. It derefs to the dispatch
//!   table for listener registration and drains the queues.
//!
//! # Processing
//! - Each step pops from the high priority queue if it has anything, otherwise
//!   from the low priority queue. Sustained high priority traffic starves the
//!   low priority queue.
//! - Listeners run synchronously on the consumer's stack, outside any critical
//!   section. They may queue further events; they cannot reach the table,
//!   since `consumer()` returns `None` while the consumer is active.
//! - `process_all_events` does not return while producers keep up with it.
//!   `process_up_to` bounds the work done per call.

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};

use crate::atomic::{AtomicBool, Ordering};
use crate::dispatch::DispatchTable;
use crate::error::Error;
use crate::event::{Event, Priority};
use crate::event_queue::EventQueue;
use crate::{DEFAULT_DISPATCH_TABLE_CAPACITY, DEFAULT_QUEUE_CAPACITY};

/// Work done by one call to [`Consumer::process_up_to`].
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Events taken off the queues.
    pub events: usize,
    /// Listener invocations, default listener included.
    pub invoked: usize,
}

pub struct EventManager<
    const Q: usize = DEFAULT_QUEUE_CAPACITY,
    const L: usize = DEFAULT_DISPATCH_TABLE_CAPACITY,
> {
    high: EventQueue<Q>,
    low: EventQueue<Q>,
    table: UnsafeCell<DispatchTable<L>>,
    consumer_active: AtomicBool,
}

// The table is only reachable through the single live `Consumer`; the queues
// synchronize through critical sections.
unsafe impl<const Q: usize, const L: usize> Sync for EventManager<Q, L> {}

impl<const Q: usize, const L: usize> EventManager<Q, L> {
    /// Queue and table capacities outside `1..=255` are rejected at compile time:
    ///
    /// ```compile_fail
    /// use ph_event_manager::EventManager;
    /// static EVENTS: EventManager<0, 8> = EventManager::new();
    /// ```
    ///
    /// ```compile_fail
    /// use ph_event_manager::EventManager;
    /// static EVENTS: EventManager<256, 8> = EventManager::new();
    /// ```
    ///
    /// ```compile_fail
    /// use ph_event_manager::EventManager;
    /// static EVENTS: EventManager<8, 0> = EventManager::new();
    /// ```
    ///
    /// ```compile_fail
    /// use ph_event_manager::EventManager;
    /// static EVENTS: EventManager<8, 256> = EventManager::new();
    /// ```
    pub const fn new() -> Self {
        Self {
            high: EventQueue::new(),
            low: EventQueue::new(),
            table: UnsafeCell::new(DispatchTable::new()),
            consumer_active: AtomicBool::new(false),
        }
    }

    // Not public: popping is reserved to the consumer.
    #[inline]
    fn queue(&self, priority: Priority) -> &EventQueue<Q> {
        match priority {
            Priority::High => &self.high,
            Priority::Low => &self.low,
        }
    }

    /// Queue a low priority event. Safe to call from interrupt context.
    ///
    /// Only the [`Consumer`] takes events off the queues:
    ///
    /// ```compile_fail
    /// use ph_event_manager::{EventManager, Priority};
    ///
    /// static EVENTS: EventManager = EventManager::new();
    ///
    /// EVENTS.queue_event(1, 0).unwrap();
    /// let _ = EVENTS.queue(Priority::Low).pop();
    /// ```
    #[inline]
    pub fn queue_event(&self, code: impl Into<i32>, param: i32) -> Result<(), Error> {
        self.queue_event_with_priority(code, param, Priority::Low)
    }

    /// Queue an event on the selected queue. Safe to call from interrupt context.
    ///
    /// Fails with [`Error::QueueFull`] if that queue is full; the event is dropped
    /// and counted in [`dropped_events`](Self::dropped_events).
    pub fn queue_event_with_priority(
        &self,
        code: impl Into<i32>,
        param: i32,
        priority: Priority,
    ) -> Result<(), Error> {
        self.queue(priority)
            .push(Event::new(code.into(), param))
            .map_err(|_| Error::QueueFull(priority))
    }

    #[inline]
    pub fn is_event_queue_empty(&self, priority: Priority) -> bool {
        self.queue(priority).is_empty()
    }

    #[inline]
    pub fn is_event_queue_full(&self, priority: Priority) -> bool {
        self.queue(priority).is_full()
    }

    #[inline]
    pub fn num_events_in_queue(&self, priority: Priority) -> usize {
        self.queue(priority).len()
    }

    /// Events rejected by a full queue since creation (or since reset).
    #[inline]
    pub fn dropped_events(&self, priority: Priority) -> u32 {
        self.queue(priority).dropped()
    }

    #[inline]
    pub fn reset_dropped_events(&self, priority: Priority) {
        self.queue(priority).reset_dropped();
    }

    /// Claim the consumer handle. Returns `None` while another consumer is alive.
    pub fn consumer(&self) -> Option<Consumer<'_, Q, L>> {
        if self.consumer_active.swap(true, Ordering::Acquire) {
            return None;
        }
        Some(Consumer { manager: self })
    }
}

impl<const Q: usize, const L: usize> Default for EventManager<Q, L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive consumer side of an [`EventManager`].
///
/// Derefs to the [`DispatchTable`]; the claim is released on drop.
pub struct Consumer<'a, const Q: usize, const L: usize> {
    manager: &'a EventManager<Q, L>,
}

impl<'a, const Q: usize, const L: usize> Consumer<'a, Q, L> {
    #[inline]
    fn next_event(&self) -> Option<Event> {
        self.manager.high.pop().or_else(|| self.manager.low.pop())
    }

    #[inline]
    fn dispatch_event(&self, event: Event) -> usize {
        let invoked = self.dispatch(event);
        trace!(
            "event {} ({}) dispatched to {} listener(s)",
            event.code, event.param, invoked
        );
        invoked
    }

    /// Take one event, high priority first, and dispatch it.
    /// Returns the number of listeners invoked; 0 if both queues were empty.
    pub fn process_event(&mut self) -> usize {
        match self.next_event() {
            Some(event) => self.dispatch_event(event),
            None => 0,
        }
    }

    /// Dispatch events until both queues are empty.
    /// Returns the total number of listeners invoked.
    pub fn process_all_events(&mut self) -> usize {
        let mut invoked = 0;
        while let Some(event) = self.next_event() {
            invoked += self.dispatch_event(event);
        }
        invoked
    }

    /// Dispatch at most `max` events.
    pub fn process_up_to(&mut self, max: usize) -> ProcessStats {
        let mut stats = ProcessStats::default();
        while stats.events < max {
            let Some(event) = self.next_event() else {
                break;
            };
            stats.events += 1;
            stats.invoked += self.dispatch_event(event);
        }
        stats
    }

    #[inline]
    pub fn manager(&self) -> &'a EventManager<Q, L> {
        self.manager
    }
}

impl<const Q: usize, const L: usize> Deref for Consumer<'_, Q, L> {
    type Target = DispatchTable<L>;

    #[inline]
    fn deref(&self) -> &DispatchTable<L> {
        // SAFETY: this is the only live consumer, and the table is reachable only through it.
        unsafe { &*self.manager.table.get() }
    }
}

impl<const Q: usize, const L: usize> DerefMut for Consumer<'_, Q, L> {
    #[inline]
    fn deref_mut(&mut self) -> &mut DispatchTable<L> {
        // SAFETY: as above; `&mut self` excludes any outstanding shared borrow.
        unsafe { &mut *self.manager.table.get() }
    }
}

impl<const Q: usize, const L: usize> Drop for Consumer<'_, Q, L> {
    fn drop(&mut self) {
        self.manager.consumer_active.store(false, Ordering::Release);
    }
}
