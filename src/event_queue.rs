//! Fixed-capacity FIFO ring of [`Event`]s, safe to push from interrupt context.
//!
//! # Overview
//! - Any number of producers, including interrupt handlers, may `push`.
//! - A single consumer context `pop`s.
//! - A push into a full queue is rejected; the event is handed back and the
//!   queue's drop counter is incremented. Nothing is ever overwritten.
//! - `head`, `tail` and `count` are `u8`, so the capacity is at most
//!   [`MAX_CAPACITY`](crate::MAX_CAPACITY).
//!
//! # Critical region
//! Every access to the ring runs inside `critical_section::with`. The platform's
//! critical-section implementation must save the current interrupt state, mask
//! interrupts, and restore the saved state on release, so regions nest.
//! Regions are O(1) and never run user code.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::event::Event;
use crate::{DEFAULT_QUEUE_CAPACITY, MAX_CAPACITY};

struct Ring<const N: usize> {
    slots: [Event; N],
    head: u8,
    tail: u8,
    count: u8,
    dropped: u32,
}

impl<const N: usize> Ring<N> {
    const fn new() -> Self {
        Self {
            slots: [Event::NONE; N],
            head: 0,
            tail: 0,
            count: 0,
            dropped: 0,
        }
    }

    #[inline(always)]
    const fn advance(idx: u8) -> u8 {
        if idx as usize + 1 == N { 0 } else { idx + 1 }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.count as usize == N
    }

    fn push(&mut self, event: Event) -> Result<(), Event> {
        if self.is_full() {
            self.dropped = self.dropped.saturating_add(1);
            return Err(event);
        }
        self.slots[self.tail as usize] = event;
        self.tail = Self::advance(self.tail);
        self.count += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<Event> {
        if self.count == 0 {
            return None;
        }
        let event = self.slots[self.head as usize];
        self.head = Self::advance(self.head);
        self.count -= 1;
        Some(event)
    }
}

/// Bounded event queue shared between interrupt producers and one consumer.
pub struct EventQueue<const N: usize = DEFAULT_QUEUE_CAPACITY> {
    ring: Mutex<RefCell<Ring<N>>>,
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue. Usable in `static` initializers.
    ///
    /// A capacity of zero or above [`MAX_CAPACITY`] is rejected at compile time:
    ///
    /// ```compile_fail
    /// use ph_event_manager::EventQueue;
    /// static QUEUE: EventQueue<0> = EventQueue::new();
    /// ```
    ///
    /// ```compile_fail
    /// use ph_event_manager::EventQueue;
    /// static QUEUE: EventQueue<256> = EventQueue::new();
    /// ```
    pub const fn new() -> Self {
        const {
            assert!(
                N > 0 && N <= MAX_CAPACITY,
                "event queue capacity must be in 1..=255"
            )
        };
        Self {
            ring: Mutex::new(RefCell::new(Ring::new())),
        }
    }

    #[inline]
    fn with_ring<R>(&self, f: impl FnOnce(&mut Ring<N>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.ring.borrow_ref_mut(cs)))
    }

    /// Append an event. Safe to call from interrupt context.
    ///
    /// Returns the event back if the queue is full.
    #[inline]
    pub fn push(&self, event: Event) -> Result<(), Event> {
        self.with_ring(|ring| ring.push(event))
    }

    /// Remove the oldest event. Consumer context only.
    #[inline]
    pub fn pop(&self) -> Option<Event> {
        self.with_ring(Ring::pop)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.with_ring(|ring| ring.count as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.with_ring(|ring| ring.is_full())
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// How many pushes have been rejected since creation (or since reset).
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.with_ring(|ring| ring.dropped)
    }

    /// Reset the drop counter.
    #[inline]
    pub fn reset_dropped(&self) {
        self.with_ring(|ring| ring.dropped = 0);
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
