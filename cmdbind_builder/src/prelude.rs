//! Traits which, typically, may be imported without concern: `use cmdbind::prelude::*`.

// Needs to be imported in order to call `Handler::invoke`/`Handler::signature`, or implement a handler by hand.
pub use crate::api::Handler;

// Needs to be imported in order to read custom argument types.
pub use crate::api::Argument;
