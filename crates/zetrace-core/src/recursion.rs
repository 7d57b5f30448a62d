//! Per-thread recursion guard.
//!
//! While a thread is inside a traced call (running a prolog, the real
//! implementation, or an epilog), any further traced call on that thread is
//! nested and must go straight to the real implementation. Other threads are
//! unaffected.
//!
//! A thread becomes "attached" on its first traced call. Attachment is
//! released by [`detach_current_thread`] or when the thread exits.

use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

static ATTACHED_THREADS: AtomicUsize = AtomicUsize::new(0);

struct ThreadTraceState {
    attached: Cell<bool>,
    depth: Cell<u32>,
    calls: Cell<u64>,
}

impl ThreadTraceState {
    fn attach(&self) {
        if !self.attached.replace(true) {
            ATTACHED_THREADS.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn detach(&self) -> bool {
        if self.attached.replace(false) {
            ATTACHED_THREADS.fetch_sub(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}

impl Drop for ThreadTraceState {
    fn drop(&mut self) {
        self.detach();
    }
}

thread_local! {
    static THREAD_STATE: ThreadTraceState = const {
        ThreadTraceState {
            attached: Cell::new(false),
            depth: Cell::new(0),
            calls: Cell::new(0),
        }
    };
}

/// Marks the current thread as dispatching a traced call until dropped.
#[derive(Debug)]
pub struct RecursionGuard {
    // Tied to the thread whose depth it incremented.
    _not_send: PhantomData<*const ()>,
}

impl RecursionGuard {
    /// Enter a top-level traced call.
    ///
    /// Returns `None` when the thread is already inside one, or when its
    /// thread-local state has been torn down during thread exit. In both
    /// cases the caller must pass the call through untraced.
    #[inline]
    #[must_use]
    pub fn enter() -> Option<Self> {
        THREAD_STATE
            .try_with(|state| {
                if state.depth.get() > 0 {
                    return None;
                }
                state.depth.set(1);
                state.attach();
                state.calls.set(state.calls.get().wrapping_add(1));
                Some(Self {
                    _not_send: PhantomData,
                })
            })
            .ok()
            .flatten()
    }
}

impl Drop for RecursionGuard {
    fn drop(&mut self) {
        let _ = THREAD_STATE.try_with(|state| {
            state.depth.set(state.depth.get().saturating_sub(1));
        });
    }
}

/// Whether the current thread is inside a traced call.
#[must_use]
pub fn is_dispatching() -> bool {
    THREAD_STATE
        .try_with(|state| state.depth.get() > 0)
        .unwrap_or(false)
}

/// Release the current thread's tracing state.
///
/// Returns `false` if the thread was not attached, or if it is inside a
/// traced call (detaching mid-call is refused).
pub fn detach_current_thread() -> bool {
    THREAD_STATE
        .try_with(|state| state.depth.get() == 0 && state.detach())
        .unwrap_or(false)
}

/// Whether the current thread holds tracing state.
#[must_use]
pub fn is_attached() -> bool {
    THREAD_STATE
        .try_with(|state| state.attached.get())
        .unwrap_or(false)
}

/// Number of threads currently attached, process-wide.
#[must_use]
pub fn attached_thread_count() -> usize {
    ATTACHED_THREADS.load(Ordering::Relaxed)
}

/// Top-level traced calls made by the current thread.
#[must_use]
pub fn current_thread_calls() -> u64 {
    THREAD_STATE.try_with(|state| state.calls.get()).unwrap_or(0)
}
