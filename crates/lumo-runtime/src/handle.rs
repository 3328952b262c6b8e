//! RunnerHandle
//!
//! A reference to the single executing program instance. Suspending
//! operations take a handle explicitly; there is no ambient "current
//! program" state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

use crate::Outcome;

struct RunnerShared {
    running: AtomicBool,
    /// Invoked when an async completion arrives after the program was
    /// stopped. The stranded outcome is dropped.
    on_stopped: Box<dyn Fn() + Send + Sync>,
}

/// Cloneable reference to the executing program: a liveness query, the
/// pause capability, and the stop-cleanup hook.
#[derive(Clone)]
pub struct RunnerHandle {
    shared: Arc<RunnerShared>,
}

impl std::fmt::Debug for RunnerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerHandle")
            .field("running", &self.is_running())
            .finish()
    }
}

impl RunnerHandle {
    /// A handle for a freshly started program. `on_stopped` runs once per
    /// completion stranded by a stop.
    pub fn new(on_stopped: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            shared: Arc::new(RunnerShared {
                running: AtomicBool::new(true),
                on_stopped: Box::new(on_stopped),
            }),
        }
    }

    /// Whether the program is still running.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Mark the program stopped. Sticky: a stopped program never runs
    /// again.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
    }

    pub(crate) fn run_stop_cleanup(&self) {
        (self.shared.on_stopped)();
    }

    /// Pause the calling program thread. `drive` receives the single-use
    /// resumer and launches the external operation; the call blocks until
    /// an outcome is delivered. `None` means the resumer was dropped or
    /// the outcome was discarded because the program stopped.
    pub fn pause<T, E>(&self, drive: impl FnOnce(Resumer<T, E>)) -> Option<Outcome<T, E>> {
        let (tx, rx) = mpsc::sync_channel(1);
        drive(Resumer {
            tx,
            handle: self.clone(),
        });
        rx.recv().ok()
    }
}

impl Default for RunnerHandle {
    fn default() -> Self {
        Self::new(|| {})
    }
}

/// Single-use resume capability for one suspension. Consuming `resume`
/// makes a second resumption unrepresentable.
pub struct Resumer<T, E> {
    tx: mpsc::SyncSender<Outcome<T, E>>,
    handle: RunnerHandle,
}

impl<T, E> Resumer<T, E> {
    /// Deliver the outcome. The liveness check is sequenced immediately
    /// before the send: a program stopped in the meantime gets its
    /// stop-cleanup callback instead, and the outcome is dropped.
    pub fn resume(self, outcome: Outcome<T, E>) {
        if !self.handle.is_running() {
            tracing::warn!("completion arrived after stop; dropping outcome");
            self.handle.run_stop_cleanup();
            return;
        }
        // Receiver gone means the runner tore the suspension down.
        let _ = self.tx.send(outcome);
    }

    /// Liveness of the program this resumer belongs to.
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    #[test]
    fn test_pause_returns_delivered_outcome() {
        let handle = RunnerHandle::default();
        let got = handle.pause(|resumer: Resumer<i32, String>| {
            thread::spawn(move || resumer.resume(Outcome::Normal(7)));
        });
        assert_eq!(got, Some(Outcome::Normal(7)));
    }

    #[test]
    fn test_stopped_program_never_resumes() {
        let cleanups = Arc::new(AtomicUsize::new(0));
        let counter = cleanups.clone();
        let handle = RunnerHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let got = handle.pause(|resumer: Resumer<i32, String>| {
            let stopper = resumer.handle.clone();
            thread::spawn(move || {
                stopper.stop();
                resumer.resume(Outcome::Normal(7));
            });
        });

        assert_eq!(got, None);
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_resumer_unblocks_pause() {
        let handle = RunnerHandle::default();
        let got = handle.pause(|resumer: Resumer<i32, String>| {
            drop(resumer);
        });
        assert_eq!(got, None);
    }

    #[test]
    fn test_stop_is_sticky() {
        let handle = RunnerHandle::default();
        assert!(handle.is_running());
        handle.stop();
        assert!(!handle.is_running());
        let clone = handle.clone();
        assert!(!clone.is_running());
    }
}
