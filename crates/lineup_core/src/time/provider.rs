use std::sync::atomic::{AtomicU64, Ordering};

/// Source of "now" for every time-dependent operation in this crate.
///
/// Always injected, never read ambiently, so that replay and tests stay
/// deterministic.
pub trait TimeProvider: Send + Sync {
    /// Current wall-clock time in epoch milliseconds.
    fn now_ms(&self) -> u64;
}

/// Production clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Deterministic clock that only moves when told to.
///
/// Shared via `Arc` between the test (or replay caller) and the structures
/// under it, hence the interior mutability.
#[derive(Debug, Default)]
pub struct FakeTimeProvider {
    now_ms: AtomicU64,
}

impl FakeTimeProvider {
    pub fn new(start_ms: u64) -> Self {
        Self { now_ms: AtomicU64::new(start_ms) }
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, millis: u64) {
        self.now_ms.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, seconds: u64) {
        self.advance_ms(seconds * 1000);
    }
}

impl TimeProvider for FakeTimeProvider {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
