use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Blocking counting semaphore bounding how many sources are read at once.
pub(crate) struct Semaphore {
    permits: Mutex<usize>,
    cv: Condvar,
}

/// Returns its permit when dropped, so an early return or panic in the holder cannot leak it.
pub(crate) struct Permit<'a> {
    sem: &'a Semaphore,
    /// Time spent blocked before the permit was granted.
    pub waited: Duration,
}

impl Semaphore {
    pub(crate) fn new(permits: usize) -> Self {
        assert!(permits > 0, "permits must be > 0");
        Self {
            permits: Mutex::new(permits),
            cv: Condvar::new(),
        }
    }

    pub(crate) fn acquire(&self) -> Permit<'_> {
        let start = Instant::now();
        let mut blocked = false;
        let mut available = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        while *available == 0 {
            blocked = true;
            available = self.cv.wait(available).unwrap_or_else(PoisonError::into_inner);
        }
        *available -= 1;
        Permit {
            sem: self,
            waited: if blocked { start.elapsed() } else { Duration::ZERO },
        }
    }

    fn release(&self) {
        let mut available = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        *available += 1;
        self.cv.notify_one();
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.sem.release();
    }
}
