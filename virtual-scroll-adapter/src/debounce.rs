/// Invokes a callback once calls have stopped for `wait_ms`.
///
/// Each `call` replaces the pending argument and restarts the wait. The adapter advances time
/// by calling `poll(now_ms)` from its frame/timer tick.
pub struct Debounce<A, F> {
    wait_ms: u64,
    pending: Option<(A, u64)>,
    f: F,
}

impl<A, F: FnMut(A)> Debounce<A, F> {
    pub fn new(wait_ms: u64, f: F) -> Self {
        Self {
            wait_ms,
            pending: None,
            f,
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending call fires if no further calls arrive.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, at)| at.saturating_add(self.wait_ms))
    }

    /// Schedules `arg`, cancelling any pending call.
    pub fn call(&mut self, arg: A, now_ms: u64) {
        if self.pending.is_some() {
            vtrace!(now_ms, "Debounce: replaced pending call");
        }
        self.pending = Some((arg, now_ms));
    }

    /// Fires the pending call if the wait has elapsed. Returns whether it fired.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms() {
            Some(deadline) if now_ms >= deadline => self.flush(),
            _ => false,
        }
    }

    /// Fires the pending call immediately, if any.
    pub fn flush(&mut self) -> bool {
        let Some((arg, _)) = self.pending.take() else {
            return false;
        };
        (self.f)(arg);
        true
    }

    /// Drops the pending call and returns its argument.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|(arg, _)| arg)
    }

    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<A, F> core::fmt::Debug for Debounce<A, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Debounce")
            .field("wait_ms", &self.wait_ms)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
