//! Rate computation from pairs of timestamped raw counters.
//!
//! Every tab that shows a per-second or percentage figure derives it here.
//! Counters are sampled once per tick; the previous and current samples form
//! a [`SamplePair`]. Elapsed time of zero always yields a rate of zero.
//!
//! Counter regression (pid reuse, counter reset) is not corrected: the delta
//! goes negative and so does the rate.

// ---------------------------------------------------------------------------
// Time bases
// ---------------------------------------------------------------------------

/// Clock ticks per second (USER_HZ). Standard value for Linux.
pub const DEFAULT_CLK_TCK: u64 = 100;

/// Unit a raw counter or timestamp is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBase {
    Nanos,
    Millis,
    Secs,
    /// Scheduler clock ticks at the given rate per second.
    Ticks(u64),
}

impl TimeBase {
    /// Units per second.
    pub fn per_sec(self) -> f64 {
        match self {
            TimeBase::Nanos => 1_000_000_000.0,
            TimeBase::Millis => 1_000.0,
            TimeBase::Secs => 1.0,
            TimeBase::Ticks(hz) => hz.max(1) as f64,
        }
    }

    /// Converts a signed amount of this unit into seconds.
    pub fn to_secs(self, amount: f64) -> f64 {
        amount / self.per_sec()
    }
}

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// A raw counter value observed at a timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    pub value: u64,
    pub timestamp: u64,
}

impl Sample {
    pub fn new(value: u64, timestamp: u64) -> Self {
        Self { value, timestamp }
    }
}

/// Previous and current observation of one counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplePair {
    pub previous_raw: u64,
    pub current_raw: u64,
    pub previous_timestamp: u64,
    pub current_timestamp: u64,
}

/// Signed difference of two u64 values. Widened so that no pair overflows.
pub fn signed_delta(current: u64, previous: u64) -> i128 {
    i128::from(current) - i128::from(previous)
}

/// `(current - previous) / elapsed`, or 0 when no time has elapsed.
pub fn rate(previous_raw: u64, current_raw: u64, elapsed: f64) -> f64 {
    if elapsed == 0.0 || !elapsed.is_finite() {
        return 0.0;
    }
    let r = signed_delta(current_raw, previous_raw) as f64 / elapsed;
    if r.is_finite() { r } else { 0.0 }
}

impl SamplePair {
    pub fn new(previous: Sample, current: Sample) -> Self {
        Self {
            previous_raw: previous.value,
            current_raw: current.value,
            previous_timestamp: previous.timestamp,
            current_timestamp: current.timestamp,
        }
    }

    /// Signed counter delta.
    pub fn delta(&self) -> i128 {
        signed_delta(self.current_raw, self.previous_raw)
    }

    /// Signed elapsed time in timestamp units.
    pub fn elapsed(&self) -> i128 {
        signed_delta(self.current_timestamp, self.previous_timestamp)
    }

    /// Counter units per timestamp unit.
    pub fn rate(&self) -> f64 {
        rate(self.previous_raw, self.current_raw, self.elapsed() as f64)
    }

    /// Counter units per second, given the unit of the timestamps.
    pub fn rate_per_sec(&self, clock: TimeBase) -> f64 {
        rate(
            self.previous_raw,
            self.current_raw,
            clock.to_secs(self.elapsed() as f64),
        )
    }

    /// Share of wall time spent busy, in percent.
    ///
    /// `busy` is the unit of the counter, `clock` the unit of the timestamps.
    pub fn busy_percent(&self, busy: TimeBase, clock: TimeBase) -> f64 {
        let wall_secs = clock.to_secs(self.elapsed() as f64);
        if wall_secs == 0.0 {
            return 0.0;
        }
        let busy_secs = busy.to_secs(self.delta() as f64);
        let pct = busy_secs / wall_secs * 100.0;
        if pct.is_finite() { pct } else { 0.0 }
    }
}

// ---------------------------------------------------------------------------
// Counter tracking
// ---------------------------------------------------------------------------

/// Keeps the last two samples of one counter.
///
/// The first sample is paired with itself, so rates start at zero instead of
/// dividing a lifetime total by an arbitrary interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    previous: Option<Sample>,
    current: Option<Sample>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new sample, shifting the current one into `previous`.
    pub fn push(&mut self, sample: Sample) {
        self.previous = Some(self.current.unwrap_or(sample));
        self.current = Some(sample);
    }

    /// Latest raw value, or 0 if nothing was sampled yet.
    pub fn value(&self) -> u64 {
        self.current.map(|s| s.value).unwrap_or(0)
    }

    pub fn pair(&self) -> SamplePair {
        match (self.previous, self.current) {
            (Some(p), Some(c)) => SamplePair::new(p, c),
            _ => SamplePair::default(),
        }
    }
}
