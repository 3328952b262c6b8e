//! Lumo Runtime
//!
//! The suspend/resume bridge between sandboxed student programs and
//! asynchronous host operations.
//!
//! A program runs on a single logical thread under a cooperative runner.
//! Library calls that are inherently asynchronous (timers, prompts,
//! network loads) suspend that thread, hand a single-use [`Resumer`] to the
//! external operation, and block until the operation delivers an
//! [`Outcome`] — so the hosted program sees an ordinary call that returns
//! a value or raises an error.

mod bridge;
mod handle;
mod outcome;

pub use bridge::{suspend, BridgeError};
pub use handle::{Resumer, RunnerHandle};
pub use outcome::Outcome;
