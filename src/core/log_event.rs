//! Log event structure and the environment it is captured from

use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);
static CLOCK_START: OnceLock<Instant> = OnceLock::new();

// Thread-local caches so capturing an event does not allocate or lock
thread_local! {
    static THREAD_ID_CACHE: Cell<u64> = const { Cell::new(0) };
    static FIBER_ID: Cell<u64> = const { Cell::new(0) };
}

/// Small process-unique id of the calling thread, assigned on first use.
pub fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| {
        if cache.get() == 0 {
            cache.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        cache.get()
    })
}

/// Fiber/coroutine id of the calling thread; 0 unless a runtime set one.
pub fn current_fiber_id() -> u64 {
    FIBER_ID.with(Cell::get)
}

/// Record the fiber currently running on this thread.
///
/// Coroutine schedulers call this on every switch so events captured with
/// [`LogEvent::new`] carry the right fiber id.
pub fn set_current_fiber_id(id: u64) {
    FIBER_ID.with(|fiber| fiber.set(id));
}

/// Milliseconds since the logging clock was first read.
pub fn elapsed_ms() -> u64 {
    let start = CLOCK_START.get_or_init(Instant::now);
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Immutable snapshot of one log occurrence.
///
/// The source file name is borrowed (usually `file!()`), the message is owned.
/// Events are built per call, rendered synchronously and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent<'a> {
    file: &'a str,
    line: u32,
    thread_id: u64,
    fiber_id: u64,
    time: DateTime<Utc>,
    elapsed_ms: u64,
    message: String,
}

impl<'a> LogEvent<'a> {
    /// Capture an event at `file:line`, stamping it with the current thread,
    /// fiber, wall clock and elapsed time.
    pub fn new(file: &'a str, line: u32, message: impl Into<String>) -> Self {
        Self {
            file,
            line,
            thread_id: current_thread_id(),
            fiber_id: current_fiber_id(),
            time: Utc::now(),
            elapsed_ms: elapsed_ms(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_elapsed(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    #[must_use]
    pub fn with_thread_id(mut self, thread_id: u64) -> Self {
        self.thread_id = thread_id;
        self
    }

    #[must_use]
    pub fn with_fiber_id(mut self, fiber_id: u64) -> Self {
        self.fiber_id = fiber_id;
        self
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn fiber_id(&self) -> u64 {
        self.fiber_id
    }

    pub fn time(&self) -> &DateTime<Utc> {
        &self.time
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
