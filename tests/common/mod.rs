//! Common test utilities for fslistener CLI tests.

pub mod env;

pub use env::*;
