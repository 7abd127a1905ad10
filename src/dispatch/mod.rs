//! Callback execution
//!
//! Builds the callback's argument vector and runs it synchronously for each
//! batch delivered by the listener.

mod argv;
mod dispatcher;

pub use argv::ArgumentVector;
pub use dispatcher::{CallbackDispatcher, DispatchOutcome, WAIT_TICK};
