/// Invokes a callback at most once per interval; calls inside the interval are dropped.
///
/// Dropped calls are not queued: windowing only needs the latest scroll offset, and the next
/// call after the interval carries it. Time is supplied by the adapter (`now_ms`), so the
/// helper works with any clock and in tests.
pub struct Throttle<F> {
    interval_ms: u64,
    last_ms: Option<u64>,
    f: F,
}

impl<F> Throttle<F> {
    pub fn new(interval_ms: u64, f: F) -> Self {
        Self {
            interval_ms,
            last_ms: None,
            f,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// The time of the last invocation, if any.
    pub fn last_invoked_ms(&self) -> Option<u64> {
        self.last_ms
    }

    /// Forgets the last invocation so the next call fires immediately.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Invokes the callback when the interval has elapsed. Returns whether it fired.
    pub fn call<A>(&mut self, arg: A, now_ms: u64) -> bool
    where
        F: FnMut(A),
    {
        if let Some(last) = self.last_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                vtrace!(now_ms, last, "Throttle: dropped call");
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        (self.f)(arg);
        true
    }

    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F> core::fmt::Debug for Throttle<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval_ms", &self.interval_ms)
            .field("last_ms", &self.last_ms)
            .finish_non_exhaustive()
    }
}
