use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver};

/// Checked once per contraction; when it fires the assembler returns the
/// partially assembled read set.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Cancellation for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<C: Cancellation + ?Sized> Cancellation for Arc<C> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<C: Cancellation + ?Sized> Cancellation for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Caller-supplied deadline backed by a crossbeam timer channel
#[derive(Debug, Clone)]
pub struct Deadline {
    timer: Receiver<Instant>,
}

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        Deadline {
            timer: channel::after(duration),
        }
    }
}

impl Cancellation for Deadline {
    fn is_cancelled(&self) -> bool {
        // the timer delivers exactly once and is never drained
        !self.timer.is_empty()
    }
}
