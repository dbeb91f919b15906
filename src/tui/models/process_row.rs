//! Process rows for the CPU, GPU, MEM and DISK tabs.

use std::cmp::Ordering;

use super::MetricRow;
use crate::collector::procfs::{
    CpuCounters, DiskCounters, GpuClient, GpuCounters, MemCounters, ProcessIdentity,
};
use crate::fmt::{format_bytes, format_bytes_rate, format_percent, format_uptime};
use crate::rates::{Counter, Sample, TimeBase};
use crate::tui::table::TableRow;

/// Descending order on an f64 metric, NaN-safe.
fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CpuRow {
    pub pid: u32,
    pub identity: ProcessIdentity,
    busy: Counter,
    clk_tck: u64,
}

impl CpuRow {
    /// Share of one CPU used since the previous sample.
    pub fn cpu_percent(&self) -> f64 {
        self.busy
            .pair()
            .busy_percent(TimeBase::Ticks(self.clk_tck), TimeBase::Millis)
    }
}

impl TableRow for CpuRow {
    fn headers() -> &'static [&'static str] {
        &["PID", "NAME", "CPU%", "UPTIME", "CMD"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.pid.to_string(),
            self.identity.name.clone(),
            format_percent(self.cpu_percent()),
            format_uptime(self.identity.uptime_secs),
            self.identity.cmdline.clone(),
        ]
    }
}

impl MetricRow for CpuRow {
    type Raw = ProcessIdentity;
    type Counters = CpuCounters;

    fn create(pid: u32, identity: ProcessIdentity) -> Self {
        Self {
            pid,
            identity,
            ..Self::default()
        }
    }

    fn refresh_identity(&mut self, identity: ProcessIdentity) {
        self.identity = identity;
    }

    fn record(&mut self, counters: CpuCounters, timestamp: u64) {
        self.clk_tck = counters.clk_tck;
        self.busy.push(Sample::new(counters.busy_ticks, timestamp));
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        desc(a.cpu_percent(), b.cpu_percent())
    }
}

// ---------------------------------------------------------------------------
// GPU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct GpuRow {
    pub pid: u32,
    pub client: GpuClient,
    engine: Counter,
    pub vram_bytes: u64,
}

impl GpuRow {
    /// Share of wall time the process kept the render/gfx engine busy.
    pub fn gpu_percent(&self) -> f64 {
        self.engine
            .pair()
            .busy_percent(TimeBase::Nanos, TimeBase::Millis)
    }
}

impl TableRow for GpuRow {
    fn headers() -> &'static [&'static str] {
        &["PID", "NAME", "GPU%", "VRAM", "CARD", "UPTIME", "CMD"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.pid.to_string(),
            self.client.identity.name.clone(),
            format_percent(self.gpu_percent()),
            format_bytes(self.vram_bytes),
            self.client.card.clone(),
            format_uptime(self.client.identity.uptime_secs),
            self.client.identity.cmdline.clone(),
        ]
    }
}

impl MetricRow for GpuRow {
    type Raw = GpuClient;
    type Counters = GpuCounters;

    fn create(pid: u32, client: GpuClient) -> Self {
        Self {
            pid,
            client,
            ..Self::default()
        }
    }

    fn refresh_identity(&mut self, client: GpuClient) {
        self.client = client;
    }

    fn record(&mut self, counters: GpuCounters, timestamp: u64) {
        self.engine.push(Sample::new(counters.engine_ns, timestamp));
        self.vram_bytes = counters.vram_bytes;
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        desc(a.gpu_percent(), b.gpu_percent())
    }
}

// ---------------------------------------------------------------------------
// MEM
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemRow {
    pub pid: u32,
    pub identity: ProcessIdentity,
    pub mem: MemCounters,
}

impl TableRow for MemRow {
    fn headers() -> &'static [&'static str] {
        &["PID", "NAME", "RES", "VIRT", "SWAP", "UPTIME", "CMD"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.pid.to_string(),
            self.identity.name.clone(),
            format_bytes(self.mem.resident),
            format_bytes(self.mem.virtual_size),
            format_bytes(self.mem.swap),
            format_uptime(self.identity.uptime_secs),
            self.identity.cmdline.clone(),
        ]
    }
}

impl MetricRow for MemRow {
    type Raw = ProcessIdentity;
    type Counters = MemCounters;

    fn create(pid: u32, identity: ProcessIdentity) -> Self {
        Self {
            pid,
            identity,
            mem: MemCounters::default(),
        }
    }

    fn refresh_identity(&mut self, identity: ProcessIdentity) {
        self.identity = identity;
    }

    fn record(&mut self, counters: MemCounters, _timestamp: u64) {
        self.mem = counters;
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        b.mem.resident.cmp(&a.mem.resident)
    }
}

// ---------------------------------------------------------------------------
// DISK
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DiskRow {
    pub pid: u32,
    pub identity: ProcessIdentity,
    read: Counter,
    write: Counter,
}

impl DiskRow {
    pub fn read_rate(&self) -> f64 {
        self.read.pair().rate_per_sec(TimeBase::Millis)
    }

    pub fn write_rate(&self) -> f64 {
        self.write.pair().rate_per_sec(TimeBase::Millis)
    }

    pub fn total_rate(&self) -> f64 {
        self.read_rate() + self.write_rate()
    }
}

impl TableRow for DiskRow {
    fn headers() -> &'static [&'static str] {
        &[
            "PID", "NAME", "READ", "WRITE", "READ/s", "WRITE/s", "UPTIME", "CMD",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.pid.to_string(),
            self.identity.name.clone(),
            format_bytes(self.read.value()),
            format_bytes(self.write.value()),
            format_bytes_rate(self.read_rate()),
            format_bytes_rate(self.write_rate()),
            format_uptime(self.identity.uptime_secs),
            self.identity.cmdline.clone(),
        ]
    }
}

impl MetricRow for DiskRow {
    type Raw = ProcessIdentity;
    type Counters = DiskCounters;

    fn create(pid: u32, identity: ProcessIdentity) -> Self {
        Self {
            pid,
            identity,
            ..Self::default()
        }
    }

    fn refresh_identity(&mut self, identity: ProcessIdentity) {
        self.identity = identity;
    }

    fn record(&mut self, counters: DiskCounters, timestamp: u64) {
        self.read.push(Sample::new(counters.read_bytes, timestamp));
        self.write.push(Sample::new(counters.write_bytes, timestamp));
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        desc(a.total_rate(), b.total_rate())
    }
}
