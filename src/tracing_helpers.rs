//! Zero-cost tracing helpers.
//!
//! With the `tracing` feature enabled these macros forward to the `tracing` crate. Without
//! it (the default) they expand to nothing, so the tree's hot paths carry no logging cost.
//!
//! The integration tests install a `RUST_LOG`-filtered subscriber, so engine events show up
//! there:
//!
//! ```bash
//! # Watch rotations while running the tree tests
//! RUST_LOG=avl_ost::raw=trace cargo test --features tracing --test avl_tree -- --nocapture
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level event. Compiles to nothing without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level event. Compiles to nothing without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
