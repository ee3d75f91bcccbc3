//! Session state cells and change subscription.
//!
//! `SessionState` is an explicit state holder: the queue plus the
//! current/next/prev cells, and a plain observer list notified after every
//! mutation. No framework reactivity, no globals.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
