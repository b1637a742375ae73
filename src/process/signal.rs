use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGTSTP;
use signal_hook::SigId;

use super::ProcessError;

const ENTER_NOTICE: &str = "\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_NOTICE: &str = "\nExiting foreground-only mode\n";
const PROMPT_MARKER: &str = ": ";

/// State shared between the read-eval loop and the SIGTSTP handler.
/// Everything here must stay async-signal-safe: plain atomics, no locks,
/// no allocation.
///
/// The handler never waits on a child. While a foreground wait is
/// outstanding it only toggles the mode and sets `pending_notice`; the main
/// flow prints the notice right after its own wait returns, so the message
/// lands behind the child's output instead of interleaved with it.
#[derive(Default)]
pub struct SignalState {
    foreground_only: AtomicBool,
    foreground_pid: AtomicI32,
    pending_notice: AtomicBool,
}

impl SignalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the SIGTSTP handler for the life of the process.
    pub fn install(state: Arc<SignalState>) -> Result<SigId, ProcessError> {
        // Safety: the handler body touches nothing but atomics and write(2).
        unsafe {
            signal_hook::low_level::register(SIGTSTP, move || state.on_sigtstp())
                .map_err(|e| ProcessError::Signal(e.to_string()))
        }
    }

    pub fn foreground_only(&self) -> bool {
        self.foreground_only.load(Ordering::SeqCst)
    }

    /// Publishes the pid the main flow is about to block on.
    pub fn set_foreground(&self, pid: u32) {
        self.foreground_pid.store(pid as i32, Ordering::SeqCst);
    }

    /// Clears the published pid once the blocking wait has returned.
    pub fn clear_foreground(&self) {
        self.foreground_pid.store(0, Ordering::SeqCst);
    }

    /// Called by the main flow after a foreground wait returns; prints the
    /// mode-change notice the handler deferred, if any. Under a burst of
    /// toggles during one wait only the final mode is announced.
    pub fn take_pending_notice(&self) {
        if self.pending_notice.swap(false, Ordering::SeqCst) {
            let notice = if self.foreground_only() {
                ENTER_NOTICE
            } else {
                EXIT_NOTICE
            };
            raw_write(notice);
        }
    }

    fn on_sigtstp(&self) {
        let entering = !self.foreground_only.fetch_xor(true, Ordering::SeqCst);

        if self.foreground_pid.load(Ordering::SeqCst) != 0 {
            self.pending_notice.store(true, Ordering::SeqCst);
            return;
        }

        // No child in flight: announce immediately and re-issue the prompt
        // marker the interrupted read was sitting on.
        let notice = if entering { ENTER_NOTICE } else { EXIT_NOTICE };
        raw_write(notice);
        raw_write(PROMPT_MARKER);
    }
}

/// write(2) straight to stdout, the only printing primitive that is legal
/// inside a signal handler.
fn raw_write(text: &str) {
    let _ = unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            text.as_ptr() as *const libc::c_void,
            text.len(),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_without_foreground_child() {
        let state = SignalState::new();
        assert!(!state.foreground_only());

        state.on_sigtstp();
        assert!(state.foreground_only());
        assert!(!state.pending_notice.load(Ordering::SeqCst));

        state.on_sigtstp();
        assert!(!state.foreground_only());
    }

    #[test]
    fn test_toggle_defers_notice_while_waiting() {
        let state = SignalState::new();
        state.set_foreground(4242);

        state.on_sigtstp();
        assert!(state.foreground_only());
        assert!(state.pending_notice.load(Ordering::SeqCst));

        state.clear_foreground();
        state.take_pending_notice();
        assert!(!state.pending_notice.load(Ordering::SeqCst));
        // Mode sticks after the notice is flushed.
        assert!(state.foreground_only());
    }

    #[test]
    fn test_toggle_burst_announces_final_mode_once() {
        let state = SignalState::new();
        state.set_foreground(4242);

        state.on_sigtstp();
        state.on_sigtstp();
        assert!(!state.foreground_only());
        assert!(state.pending_notice.load(Ordering::SeqCst));

        state.clear_foreground();
        state.take_pending_notice();
        assert!(!state.pending_notice.load(Ordering::SeqCst));
    }

    #[test]
    fn test_installed_handler_toggles_on_raise() {
        let state = Arc::new(SignalState::new());
        let _id = SignalState::install(Arc::clone(&state)).unwrap();

        unsafe {
            libc::raise(libc::SIGTSTP);
        }
        assert!(state.foreground_only());

        unsafe {
            libc::raise(libc::SIGTSTP);
        }
        assert!(!state.foreground_only());
    }
}
