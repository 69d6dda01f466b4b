//! Recording listeners for unit tests.
//!
//! Calls are recorded per thread, so tests running in parallel don't see
//! each other's invocations. Each listener has a distinct body so the
//! functions keep distinct addresses.

use std::cell::RefCell;
use std::vec::Vec;

std::thread_local! {
    static CALLS: RefCell<Vec<(char, i32, i32)>> = const { RefCell::new(Vec::new()) };
}

fn record(tag: char, code: i32, param: i32) {
    CALLS.with(|calls| calls.borrow_mut().push((tag, code, param)));
}

/// Drain the calls recorded on this thread.
pub(crate) fn take_calls() -> Vec<(char, i32, i32)> {
    CALLS.with(|calls| calls.take())
}

pub(crate) fn listener_a(code: i32, param: i32) {
    record('a', code, param);
}

pub(crate) fn listener_b(code: i32, param: i32) {
    record('b', code, param);
}

pub(crate) fn listener_c(code: i32, param: i32) {
    record('c', code, param);
}

pub(crate) fn on_default(code: i32, param: i32) {
    record('d', code, param);
}
