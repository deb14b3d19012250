/*!
    The shared cancellation guard.
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/**
    A monotonic abort flag shared between the facade, the reader loop and the
    output queue.

    The flag only ever transitions false → true. It is stored with `Release`
    and read with `Acquire` so that everything written before the abort is
    visible to the reader thread when it observes the flag and exits — the
    join in the facade's drop relies on this.
*/
#[derive(Clone, Debug, Default)]
pub struct AbortGuard {
    flag: Arc<AtomicBool>,
}

impl AbortGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Request abort. Idempotent; there is no way to clear the flag.
    */
    pub fn set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /**
        A cheap poll handle for registration with the native I/O layer, so
        in-flight blocking reads fail fast instead of hanging.
    */
    pub fn poll(&self) -> InterruptPoll {
        InterruptPoll {
            flag: Arc::clone(&self.flag),
        }
    }
}

/**
    Poll handle handed to a demuxer's interrupt callback.
*/
#[derive(Clone, Debug)]
pub struct InterruptPoll {
    flag: Arc<AtomicBool>,
}

impl InterruptPoll {
    /**
        Returns true once abort has been requested.
    */
    pub fn aborted(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
