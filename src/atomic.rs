//! Atomic types used by the crate.
//!
//! Targets without native compare-and-swap (AVR, thumbv6m) enable one of the
//! `portable-atomic*` features to get the same API from `portable-atomic`.

#[cfg(not(feature = "portable-atomic"))]
pub(crate) use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "portable-atomic")]
pub(crate) use portable_atomic::{AtomicBool, Ordering};
