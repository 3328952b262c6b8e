//! Bridge
//!
//! Coordinates one synchronous-looking call with one in-flight external
//! operation.

use crate::{Outcome, Resumer, RunnerHandle};

/// Per-suspension lifecycle. `Resumed` and `Abandoned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeState {
    NotStarted,
    AwaitingExternal,
    Resumed,
    Abandoned,
}

/// How a suspension can fail short of a normal return.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError<E> {
    /// A suspending call was made while no program was executing.
    #[error("Program is not running")]
    NoActiveProgram,

    /// The program was stopped while the operation was in flight; the
    /// result was discarded.
    #[error("Program stopped before the operation completed")]
    Stopped,

    /// The external operation delivered an exception outcome.
    #[error("{0}")]
    Raised(E),
}

/// Suspend the calling program thread, drive the external operation via
/// `start`, and return the delivered outcome.
///
/// `start` receives the single-use [`Resumer`] and must hand it to exactly
/// one completion path. Resume happens at most once per suspension; a
/// program stopped before completion is never resumed — its stop-cleanup
/// callback runs instead and this call reports [`BridgeError::Stopped`].
pub fn suspend<T, E>(
    handle: &RunnerHandle,
    start: impl FnOnce(Resumer<T, E>),
) -> Result<T, BridgeError<E>>
where
    E: std::fmt::Display,
{
    let mut state = BridgeState::NotStarted;
    if !handle.is_running() {
        tracing::debug!(?state, "suspend refused: no active program");
        return Err(BridgeError::NoActiveProgram);
    }

    state = BridgeState::AwaitingExternal;
    tracing::debug!(?state, "program suspended");

    match handle.pause(start) {
        Some(Outcome::Normal(value)) => {
            state = BridgeState::Resumed;
            tracing::debug!(?state, "resumed with normal outcome");
            Ok(value)
        }
        Some(Outcome::Exception { value, .. }) => {
            state = BridgeState::Resumed;
            tracing::debug!(?state, error = %value, "resumed with exception outcome");
            Err(BridgeError::Raised(value))
        }
        None => {
            state = BridgeState::Abandoned;
            tracing::debug!(?state, "suspension abandoned");
            Err(BridgeError::Stopped)
        }
    }
}
