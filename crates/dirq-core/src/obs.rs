//! Observation sink boundary.
//!
//! Evaluation logic MUST NOT touch counter state directly. All
//! instrumentation flows through `ObsEvent` and `ObsSink`; this module
//! is the only bridge between the evaluators and counter state.
use std::{cell::RefCell, fmt};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn ObsSink>> = const { RefCell::new(None) };
    static COUNTERS: RefCell<ObsReport> = RefCell::new(ObsReport::default());
}

///
/// LeafKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LeafKind {
    Presence,
    Equality,
    Approximate,
    GreaterOrEqual,
    LessOrEqual,
    Substring,
    Extensible,
    Scope,
}

impl LeafKind {
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Presence => "presence",
            Self::Equality => "equality",
            Self::Approximate => "approximate",
            Self::GreaterOrEqual => "greater_or_equal",
            Self::LessOrEqual => "less_or_equal",
            Self::Substring => "substring",
            Self::Extensible => "extensible",
            Self::Scope => "scope",
        };
        write!(f, "{label}")
    }
}

///
/// EqualityPath
///
/// Which of the equality algorithm's stages settled the answer.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EqualityPath {
    /// Fast path A: raw stored value equalled the raw assertion.
    RawHit,
    /// Fast path B: raw stored value equalled the normalized assertion.
    NormalizedHit,
    /// Slow path: comparator over normalized forms.
    ComparatorHit,
    Miss,
}

///
/// ObsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum ObsEvent {
    LeafEvaluated { kind: LeafKind },
    EqualityPath { path: EqualityPath },
}

///
/// ObsSink
///

pub trait ObsSink {
    fn record(&self, event: ObsEvent);
}

///
/// ObsReport
///
/// Snapshot of the default counting sink.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObsReport {
    leaves: [u64; 8],
    pub equality_raw_hits: u64,
    pub equality_normalized_hits: u64,
    pub equality_comparator_hits: u64,
    pub equality_misses: u64,
}

impl ObsReport {
    #[must_use]
    pub const fn leaves(&self, kind: LeafKind) -> u64 {
        self.leaves[kind.index()]
    }

    #[must_use]
    pub fn leaves_total(&self) -> u64 {
        self.leaves.iter().sum()
    }
}

/// CountingSink
/// Default sink accumulating into thread-local counter state.
/// Acts as the concrete sink when no scoped override is installed.

struct CountingSink;

impl ObsSink for CountingSink {
    fn record(&self, event: ObsEvent) {
        COUNTERS.with_borrow_mut(|report| match event {
            ObsEvent::LeafEvaluated { kind } => {
                report.leaves[kind.index()] = report.leaves[kind.index()].saturating_add(1);
            }
            ObsEvent::EqualityPath { path } => {
                let slot = match path {
                    EqualityPath::RawHit => &mut report.equality_raw_hits,
                    EqualityPath::NormalizedHit => &mut report.equality_normalized_hits,
                    EqualityPath::ComparatorHit => &mut report.equality_comparator_hits,
                    EqualityPath::Miss => &mut report.equality_misses,
                };
                *slot = slot.saturating_add(1);
            }
        });
    }
}

pub(crate) fn record(event: ObsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn ObsSink` in
        //   `with_obs_sink`, which always restores the previous pointer
        //   before returning, including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this
        //   call, and only a shared reference is materialized.
        unsafe { (*ptr).record(event) };
    } else {
        CountingSink.record(event);
    }
}

/// Snapshot the current thread's counter state.
#[must_use]
pub fn report() -> ObsReport {
    COUNTERS.with_borrow(Clone::clone)
}

/// Reset the current thread's counter state.
pub fn reset() {
    COUNTERS.with_borrow_mut(|report| *report = ObsReport::default());
}

/// Run a closure with a temporary sink override on this thread.
pub fn with_obs_sink<T>(sink: &dyn ObsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn ObsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - The lifetime-erased pointer is installed only for this dynamic
    //   scope; the guard restores the previous slot on all exits,
    //   including panic, so it never outlives the borrowed sink.
    // - `record` only dereferences synchronously and never persists it.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn ObsSink, *const dyn ObsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink_ptr));
    let _guard = Guard(prev);

    f()
}
