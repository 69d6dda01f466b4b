//! Fixed-capacity listener dispatch table.
//!
//! # Overview
//! - Bindings pair an event code with a [`Listener`] and an enabled flag.
//! - Bindings are kept dense, in insertion order. Dispatch and lookup scan
//!   linearly in that order, so listeners registered earlier run earlier.
//! - The same `(code, listener)` pair may be registered more than once; each
//!   copy is invoked on every matching event and removal takes out one copy.
//! - One optional default listener runs when no enabled binding matches.
//!
//! Listener identity is the function address (`core::ptr::fn_addr_eq`).

use heapless::Vec;

use crate::error::Error;
use crate::event::Event;
use crate::{DEFAULT_DISPATCH_TABLE_CAPACITY, MAX_CAPACITY};

/// Callback invoked with `(event_code, event_param)`.
pub type Listener = fn(i32, i32);

#[inline]
fn same_listener(a: Listener, b: Listener) -> bool {
    core::ptr::fn_addr_eq(a, b)
}

#[derive(Copy, Clone, Debug)]
pub struct ListenerBinding {
    code: i32,
    listener: Listener,
    enabled: bool,
}

impl ListenerBinding {
    #[inline]
    pub fn code(&self) -> i32 {
        self.code
    }

    #[inline]
    pub fn listener(&self) -> Listener {
        self.listener
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    fn matches(&self, code: i32, listener: Listener) -> bool {
        self.code == code && same_listener(self.listener, listener)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct DefaultListener {
    listener: Listener,
    enabled: bool,
}

impl DefaultListener {
    #[inline]
    pub fn listener(&self) -> Listener {
        self.listener
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

pub struct DispatchTable<const N: usize = DEFAULT_DISPATCH_TABLE_CAPACITY> {
    bindings: Vec<ListenerBinding, N>,
    default: Option<DefaultListener>,
}

impl<const N: usize> DispatchTable<N> {
    /// Create an empty table with no default listener.
    ///
    /// A capacity of zero or above [`MAX_CAPACITY`] is rejected at compile time:
    ///
    /// ```compile_fail
    /// use ph_event_manager::DispatchTable;
    /// static TABLE: DispatchTable<0> = DispatchTable::new();
    /// ```
    ///
    /// ```compile_fail
    /// use ph_event_manager::DispatchTable;
    /// static TABLE: DispatchTable<256> = DispatchTable::new();
    /// ```
    pub const fn new() -> Self {
        const {
            assert!(
                N > 0 && N <= MAX_CAPACITY,
                "dispatch table capacity must be in 1..=255"
            )
        };
        Self {
            bindings: Vec::new(),
            default: None,
        }
    }

    /// Register `listener` for `code`, enabled.
    pub fn add_listener(&mut self, code: impl Into<i32>, listener: Listener) -> Result<(), Error> {
        let code = code.into();
        self.bindings
            .push(ListenerBinding {
                code,
                listener,
                enabled: true,
            })
            .map_err(|_| {
                warn!(
                    "dispatch table full ({} bindings), listener for event {} dropped",
                    N, code
                );
                Error::TableFull
            })
    }

    /// Remove the first binding of `listener` for `code`.
    /// Returns true if one was found.
    #[must_use]
    pub fn remove_listener(&mut self, code: impl Into<i32>, listener: Listener) -> bool {
        match self.position(code.into(), listener) {
            Some(idx) => {
                self.bindings.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every binding of `listener`, whatever its code.
    /// Returns the number of bindings removed.
    ///
    /// ```compile_fail
    /// #![deny(unused_must_use)]
    /// use ph_event_manager::DispatchTable;
    ///
    /// fn on_event(_code: i32, _param: i32) {}
    ///
    /// let mut table = DispatchTable::<4>::new();
    /// table.remove_listener_everywhere(on_event);
    /// ```
    #[must_use]
    pub fn remove_listener_everywhere(&mut self, listener: Listener) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|b| !same_listener(b.listener, listener));
        before - self.bindings.len()
    }

    /// Enable or disable the first binding of `listener` for `code`.
    /// Returns false if there is no such binding.
    #[must_use]
    pub fn enable_listener(
        &mut self,
        code: impl Into<i32>,
        listener: Listener,
        enable: bool,
    ) -> bool {
        match self.position(code.into(), listener) {
            Some(idx) => {
                self.bindings[idx].enabled = enable;
                true
            }
            None => false,
        }
    }

    /// Enabled state of the first binding of `listener` for `code`;
    /// false if there is no such binding.
    pub fn is_listener_enabled(&self, code: impl Into<i32>, listener: Listener) -> bool {
        self.position(code.into(), listener)
            .is_some_and(|idx| self.bindings[idx].enabled)
    }

    /// Install `listener` as the default listener, enabled. Replaces any
    /// previous default.
    pub fn set_default_listener(&mut self, listener: Listener) {
        self.default = Some(DefaultListener {
            listener,
            enabled: true,
        });
    }

    pub fn remove_default_listener(&mut self) {
        self.default = None;
    }

    /// Has no effect while no default listener is installed.
    pub fn enable_default_listener(&mut self, enable: bool) {
        if let Some(default) = self.default.as_mut() {
            default.enabled = enable;
        }
    }

    #[inline]
    pub fn default_listener(&self) -> Option<DefaultListener> {
        self.default
    }

    #[inline]
    pub fn is_default_listener_enabled(&self) -> bool {
        self.default.is_some_and(|d| d.enabled)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.bindings.is_full()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ListenerBinding> {
        self.bindings.iter()
    }

    /// Invoke every enabled binding for `event.code`, in insertion order.
    /// Falls back to the default listener, if installed and enabled, when none
    /// matched. Returns the number of listeners invoked.
    pub fn dispatch(&self, event: Event) -> usize {
        let mut invoked = 0;
        for binding in self
            .bindings
            .iter()
            .filter(|b| b.enabled && b.code == event.code)
        {
            (binding.listener)(event.code, event.param);
            invoked += 1;
        }

        if invoked == 0 {
            match self.default {
                Some(DefaultListener { listener, enabled: true }) => {
                    listener(event.code, event.param);
                    invoked = 1;
                }
                _ => debug!("event {} ({}) had no listener", event.code, event.param),
            }
        }
        invoked
    }

    #[inline]
    fn position(&self, code: i32, listener: Listener) -> Option<usize> {
        self.bindings.iter().position(|b| b.matches(code, listener))
    }
}

impl<const N: usize> Default for DispatchTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::DispatchTable;
    use crate::error::Error;
    use crate::event::{Event, GenericEvent};
    use crate::testing::{listener_a, listener_b, listener_c, on_default, take_calls};

    #[test]
    fn add_beyond_capacity_fails() {
        let mut table = DispatchTable::<2>::new();
        assert!(table.is_empty());
        table.add_listener(1, listener_a).unwrap();
        table.add_listener(2, listener_b).unwrap();
        assert!(table.is_full());

        assert_eq!(table.add_listener(3, listener_c), Err(Error::TableFull));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn dispatches_in_insertion_order() {
        let mut table = DispatchTable::<8>::new();
        table.add_listener(7, listener_a).unwrap();
        table.add_listener(8, listener_c).unwrap();
        table.add_listener(7, listener_b).unwrap();

        assert_eq!(table.dispatch(Event::new(7, 1)), 2);
        assert_eq!(take_calls(), [('a', 7, 1), ('b', 7, 1)]);
    }

    #[test]
    fn duplicate_survives_one_removal() {
        let mut table = DispatchTable::<8>::new();
        table.add_listener(7, listener_a).unwrap();
        table.add_listener(7, listener_a).unwrap();

        assert_eq!(table.dispatch(Event::new(7, 0)), 2);
        assert_eq!(take_calls().len(), 2);

        assert!(table.remove_listener(7, listener_a));
        assert_eq!(table.len(), 1);
        assert_eq!(table.dispatch(Event::new(7, 0)), 1);
        assert_eq!(take_calls(), [('a', 7, 0)]);
    }

    #[test]
    fn remove_leaves_other_pairs_alone() {
        let mut table = DispatchTable::<8>::new();
        table.add_listener(1, listener_a).unwrap();
        table.add_listener(2, listener_a).unwrap();
        table.add_listener(1, listener_b).unwrap();

        assert!(table.remove_listener(1, listener_a));
        assert!(!table.remove_listener(1, listener_a));
        assert!(!table.remove_listener(3, listener_b));

        let left: std::vec::Vec<_> = table.iter().map(|b| b.code()).collect();
        assert_eq!(left, [2, 1]);
        assert!(table.is_listener_enabled(2, listener_a));
        assert!(table.is_listener_enabled(1, listener_b));
    }

    #[test]
    fn remove_everywhere_counts_removed() {
        let mut table = DispatchTable::<8>::new();
        table.add_listener(GenericEvent::Timer0, listener_a).unwrap();
        table.add_listener(GenericEvent::Timer1, listener_b).unwrap();
        table.add_listener(GenericEvent::Timer1, listener_a).unwrap();
        table.add_listener(GenericEvent::Serial, listener_a).unwrap();

        assert_eq!(table.remove_listener_everywhere(listener_a), 3);
        assert_eq!(table.len(), 1);
        assert_eq!(table.remove_listener_everywhere(listener_a), 0);
        assert!(table.is_listener_enabled(GenericEvent::Timer1, listener_b));
    }

    #[test]
    fn disabled_binding_stays_registered() {
        let mut table = DispatchTable::<8>::new();
        table.add_listener(5, listener_a).unwrap();

        assert!(table.enable_listener(5, listener_a, false));
        assert!(!table.is_listener_enabled(5, listener_a));
        assert_eq!(table.len(), 1);
        assert_eq!(table.dispatch(Event::new(5, 0)), 0);
        assert!(take_calls().is_empty());

        assert!(table.enable_listener(5, listener_a, true));
        assert_eq!(table.dispatch(Event::new(5, 3)), 1);
        assert_eq!(take_calls(), [('a', 5, 3)]);
    }

    #[test]
    fn unknown_pair_is_not_found() {
        let mut table = DispatchTable::<8>::new();
        table.add_listener(5, listener_a).unwrap();
        assert!(!table.enable_listener(6, listener_a, false));
        assert!(!table.enable_listener(5, listener_b, false));
        assert!(!table.is_listener_enabled(5, listener_b));
    }

    #[test]
    fn default_listener_only_when_nothing_matched() {
        let mut table = DispatchTable::<8>::new();
        table.add_listener(1, listener_a).unwrap();
        table.set_default_listener(on_default);
        assert!(table.is_default_listener_enabled());

        assert_eq!(table.dispatch(Event::new(9, 0)), 1);
        assert_eq!(table.dispatch(Event::new(1, 2)), 1);
        assert_eq!(take_calls(), [('d', 9, 0), ('a', 1, 2)]);

        // A disabled binding does not count as a match.
        assert!(table.enable_listener(1, listener_a, false));
        assert_eq!(table.dispatch(Event::new(1, 3)), 1);
        assert_eq!(take_calls(), [('d', 1, 3)]);
    }

    #[test]
    fn default_listener_toggle_and_remove() {
        let mut table = DispatchTable::<8>::new();
        table.enable_default_listener(true);
        assert!(table.default_listener().is_none());
        assert_eq!(table.dispatch(Event::new(4, 0)), 0);

        table.set_default_listener(on_default);
        table.enable_default_listener(false);
        assert_eq!(table.dispatch(Event::new(4, 0)), 0);

        table.enable_default_listener(true);
        assert_eq!(table.dispatch(Event::new(4, 1)), 1);

        table.remove_default_listener();
        assert!(!table.is_default_listener_enabled());
        assert_eq!(table.dispatch(Event::new(4, 2)), 0);
        assert_eq!(take_calls(), [('d', 4, 1)]);
    }
}
