//! Info panels shown above each tab's table.
//!
//! A panel refreshes together with its tab and renders as `label: value`
//! lines. Values that fail to read keep their last good reading; a panel
//! that never managed to read a value shows `-`.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::collector::procfs::parser::{CpuInfo, LoadAvg, MemInfo};
use crate::collector::procfs::{BlockDevice, DrmCard, InterfaceSample, SystemCollector};
use crate::collector::traits::FileSystem;
use crate::fmt::{format_bytes, format_bytes_rate, format_clock, format_mhz, format_uptime};
use crate::provider::{EntityProvider, ProviderError};
use crate::rates::{Counter, Sample, TimeBase};
use crate::reconcile::{TrackedEntity, reconcile};

/// One `label: value` line.
pub type InfoLine = (String, String);

/// Summary lines for a tab.
pub trait InfoPanel {
    fn refresh(&mut self);
    fn lines(&self) -> Vec<InfoLine>;
}

fn line(label: &str, value: impl Into<String>) -> InfoLine {
    (label.to_string(), value.into())
}

fn or_dash<T>(value: &Option<T>, f: impl FnOnce(&T) -> String) -> String {
    value.as_ref().map(f).unwrap_or_else(|| "-".to_string())
}

/// Keeps `slot` on failure.
fn keep<T>(slot: &mut Option<T>, result: Result<T, ProviderError>, what: &str) {
    match result {
        Ok(value) => *slot = Some(value),
        Err(e) => debug!(error = %e, "{} unavailable, keeping last value", what),
    }
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub struct OverviewPanel<F: FileSystem> {
    system: SystemCollector<F>,
    product: Option<String>,
    kernel: Option<String>,
    os: Option<String>,
    uptime: Option<u64>,
    clock: Option<DateTime<Local>>,
}

impl<F: FileSystem> OverviewPanel<F> {
    pub fn new(system: SystemCollector<F>) -> Self {
        Self {
            system,
            product: None,
            kernel: None,
            os: None,
            uptime: None,
            clock: None,
        }
    }
}

impl<F: FileSystem> InfoPanel for OverviewPanel<F> {
    fn refresh(&mut self) {
        keep(&mut self.product, self.system.product_name(), "product name");
        keep(&mut self.kernel, self.system.kernel_release(), "kernel release");
        keep(&mut self.os, self.system.os_release(), "os release");
        keep(&mut self.uptime, self.system.uptime_secs(), "uptime");
        self.clock = Some(Local::now());
    }

    fn lines(&self) -> Vec<InfoLine> {
        vec![
            line("Product", or_dash(&self.product, Clone::clone)),
            line("Kernel", or_dash(&self.kernel, Clone::clone)),
            line("OS", or_dash(&self.os, Clone::clone)),
            line("Time", or_dash(&self.clock, |c| format_clock(*c))),
            line("Uptime", or_dash(&self.uptime, |s| format_uptime(*s))),
        ]
    }
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

pub struct CpuPanel<F: FileSystem> {
    system: SystemCollector<F>,
    cpu: Option<CpuInfo>,
    load: Option<LoadAvg>,
    uptime: Option<u64>,
}

impl<F: FileSystem> CpuPanel<F> {
    pub fn new(system: SystemCollector<F>) -> Self {
        Self {
            system,
            cpu: None,
            load: None,
            uptime: None,
        }
    }
}

impl<F: FileSystem> InfoPanel for CpuPanel<F> {
    fn refresh(&mut self) {
        keep(&mut self.cpu, self.system.cpuinfo(), "cpuinfo");
        keep(&mut self.load, self.system.loadavg(), "loadavg");
        keep(&mut self.uptime, self.system.uptime_secs(), "uptime");
    }

    fn lines(&self) -> Vec<InfoLine> {
        vec![
            line("Model", or_dash(&self.cpu, |c| c.model_name.clone())),
            line(
                "Cores",
                or_dash(&self.cpu, |c| format!("{} cores, {} threads", c.cores, c.threads)),
            ),
            line("Clock", or_dash(&self.cpu, |c| format_mhz(c.avg_mhz))),
            line(
                "Load",
                or_dash(&self.load, |l| {
                    format!("{:.2} {:.2} {:.2}", l.load1, l.load5, l.load15)
                }),
            ),
            line("Uptime", or_dash(&self.uptime, |s| format_uptime(*s))),
        ]
    }
}

// ---------------------------------------------------------------------------
// MEM
// ---------------------------------------------------------------------------

pub struct MemPanel<F: FileSystem> {
    system: SystemCollector<F>,
    mem: Option<MemInfo>,
}

impl<F: FileSystem> MemPanel<F> {
    pub fn new(system: SystemCollector<F>) -> Self {
        Self { system, mem: None }
    }
}

impl<F: FileSystem> InfoPanel for MemPanel<F> {
    fn refresh(&mut self) {
        keep(&mut self.mem, self.system.meminfo(), "meminfo");
    }

    fn lines(&self) -> Vec<InfoLine> {
        // meminfo is in kB
        let used_of = |used: u64, total: u64| {
            format!(
                "{} / {}",
                format_bytes(used.saturating_mul(1024)),
                format_bytes(total.saturating_mul(1024))
            )
        };
        vec![
            line("Memory", or_dash(&self.mem, |m| used_of(m.mem_used(), m.mem_total))),
            line("Swap", or_dash(&self.mem, |m| used_of(m.swap_used(), m.swap_total))),
        ]
    }
}

// ---------------------------------------------------------------------------
// Device panels (reconciled by name)
// ---------------------------------------------------------------------------

/// Keeps a string-keyed device inventory in sync with its provider.
struct Inventory<R, T> {
    provider: Box<dyn EntityProvider<String, R>>,
    devices: Vec<TrackedEntity<String, T>>,
}

impl<R, T> Inventory<R, T> {
    fn new(provider: Box<dyn EntityProvider<String, R>>) -> Self {
        Self {
            provider,
            devices: Vec::new(),
        }
    }

    fn refresh(
        &mut self,
        create: impl FnMut(&String, R) -> T,
        update: impl FnMut(&mut T, R),
        what: &str,
    ) {
        match self.provider.list() {
            Ok(current) => {
                reconcile(&mut self.devices, current, create, update);
            }
            Err(e) => debug!(error = %e, "{} listing failed, keeping previous set", what),
        }
    }
}

pub struct GpuPanel {
    cards: Inventory<DrmCard, DrmCard>,
}

impl GpuPanel {
    pub fn new(provider: Box<dyn EntityProvider<String, DrmCard>>) -> Self {
        Self {
            cards: Inventory::new(provider),
        }
    }
}

impl InfoPanel for GpuPanel {
    fn refresh(&mut self) {
        self.cards
            .refresh(|_, card| card, |old, card| *old = card, "drm card");
    }

    fn lines(&self) -> Vec<InfoLine> {
        if self.cards.devices.is_empty() {
            return vec![line("Cards", "none")];
        }
        self.cards
            .devices
            .iter()
            .map(|e| {
                let card = &e.payload;
                let mut value = format!("{} @ {}", card.driver, card.pci_slot);
                if let Some(mhz) = card.clock_mhz {
                    value.push_str(&format!(", {}", format_mhz(f64::from(mhz))));
                }
                line(&e.id, value)
            })
            .collect()
    }
}

/// `[subsystem] vendor model (size) serial`, leaving out what is unknown.
fn describe_disk(disk: &BlockDevice) -> String {
    let mut parts = Vec::new();
    if !disk.subsystem.is_empty() {
        parts.push(format!("[{}]", disk.subsystem));
    }
    let name: Vec<&str> = [disk.vendor.as_str(), disk.model.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if name.is_empty() {
        parts.push("unknown model".to_string());
    } else {
        parts.push(name.join(" "));
    }
    parts.push(format!("({})", format_bytes(disk.size_bytes)));
    if !disk.serial.is_empty() {
        parts.push(disk.serial.clone());
    }
    parts.join(" ")
}

pub struct DiskPanel {
    disks: Inventory<BlockDevice, BlockDevice>,
}

impl DiskPanel {
    pub fn new(provider: Box<dyn EntityProvider<String, BlockDevice>>) -> Self {
        Self {
            disks: Inventory::new(provider),
        }
    }
}

impl InfoPanel for DiskPanel {
    fn refresh(&mut self) {
        self.disks
            .refresh(|_, disk| disk, |old, disk| *old = disk, "block device");
    }

    fn lines(&self) -> Vec<InfoLine> {
        if self.disks.devices.is_empty() {
            return vec![line("Disks", "none")];
        }
        self.disks
            .devices
            .iter()
            .map(|e| line(&e.id, describe_disk(&e.payload)))
            .collect()
    }
}

/// Byte counters of one interface.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRates {
    pub mac: String,
    rx: Counter,
    tx: Counter,
}

impl InterfaceRates {
    fn record(&mut self, sample: InterfaceSample) {
        self.mac = sample.mac;
        self.rx.push(Sample::new(sample.rx_bytes, sample.timestamp));
        self.tx.push(Sample::new(sample.tx_bytes, sample.timestamp));
    }

    pub fn rx_rate(&self) -> f64 {
        self.rx.pair().rate_per_sec(TimeBase::Millis)
    }

    pub fn tx_rate(&self) -> f64 {
        self.tx.pair().rate_per_sec(TimeBase::Millis)
    }
}

pub struct NetPanel {
    interfaces: Inventory<InterfaceSample, InterfaceRates>,
}

impl NetPanel {
    pub fn new(provider: Box<dyn EntityProvider<String, InterfaceSample>>) -> Self {
        Self {
            interfaces: Inventory::new(provider),
        }
    }
}

impl InfoPanel for NetPanel {
    fn refresh(&mut self) {
        self.interfaces.refresh(
            |_, sample| {
                let mut rates = InterfaceRates::default();
                rates.record(sample);
                rates
            },
            |rates, sample| rates.record(sample),
            "interface",
        );
    }

    fn lines(&self) -> Vec<InfoLine> {
        if self.interfaces.devices.is_empty() {
            return vec![line("Interfaces", "none")];
        }
        self.interfaces
            .devices
            .iter()
            .map(|e| {
                let rates = format!(
                    "rx {}  tx {}",
                    format_bytes_rate(e.payload.rx_rate()),
                    format_bytes_rate(e.payload.tx_rate())
                );
                let value = if e.payload.mac.is_empty() {
                    rates
                } else {
                    format!("{}  {}", e.payload.mac, rates)
                };
                line(&e.id, value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::procfs::{
        BlockDeviceCollector, DrmCardCollector, InterfaceCollector, SourcePaths,
    };

    fn system(fs: MockFs) -> SystemCollector<MockFs> {
        SystemCollector::new(fs, SourcePaths::default())
    }

    fn value<'a>(lines: &'a [InfoLine], label: &str) -> &'a str {
        lines
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_overview_panel() {
        let mut panel = OverviewPanel::new(system(MockFs::typical_system()));
        assert_eq!(value(&panel.lines(), "Kernel"), "-");

        panel.refresh();
        let lines = panel.lines();
        assert_eq!(value(&lines, "Product"), "Standard PC (Q35 + ICH9, 2009)");
        assert_eq!(value(&lines, "Kernel"), "6.8.0-45-generic");
        assert_eq!(value(&lines, "OS"), "Ubuntu 24.04.1 LTS");
        assert_eq!(value(&lines, "Uptime"), "03:25:45");
        assert_eq!(value(&lines, "Time").len(), 19);
    }

    #[test]
    fn test_cpu_panel() {
        let mut panel = CpuPanel::new(system(MockFs::typical_system()));
        panel.refresh();
        let lines = panel.lines();
        assert!(value(&lines, "Model").contains("i5-8250U"));
        assert_eq!(value(&lines, "Cores"), "4 cores, 4 threads");
        assert_eq!(value(&lines, "Clock"), "1.80 GHz");
        assert_eq!(value(&lines, "Load"), "0.15 0.10 0.05");
    }

    #[test]
    fn test_mem_panel_keeps_last_reading() {
        let mut fs = MockFs::typical_system();
        let mut panel = MemPanel::new(system(fs.clone()));
        panel.refresh();
        assert_eq!(value(&panel.lines(), "Memory"), "4.49G / 16.78G");
        assert_eq!(value(&panel.lines(), "Swap"), "0B / 4.19G");

        fs.remove("/proc/meminfo");
        let mut broken = MemPanel::new(system(fs));
        broken.mem = panel.mem.clone();
        broken.refresh();
        assert_eq!(value(&broken.lines(), "Memory"), "4.49G / 16.78G");
    }

    #[test]
    fn test_disk_panel_skips_loop_devices() {
        let mut panel = DiskPanel::new(Box::new(BlockDeviceCollector::new(
            MockFs::typical_system(),
            "/sys",
        )));
        panel.refresh();
        let lines = panel.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, "sda");
        assert_eq!(lines[0].1, "[scsi] ATA Samsung SSD 870 (1.00T) S6PNNX0R123456");
    }

    #[test]
    fn test_describe_disk_skips_unknown_fields() {
        let bare = BlockDevice {
            size_bytes: 512_000_000_000,
            ..BlockDevice::default()
        };
        assert_eq!(describe_disk(&bare), "unknown model (512.00G)");

        let nvme = BlockDevice {
            model: "WD Blue SN570".to_string(),
            serial: "22123S801234".to_string(),
            subsystem: "nvme".to_string(),
            size_bytes: 512_000_000_000,
            ..BlockDevice::default()
        };
        assert_eq!(describe_disk(&nvme), "[nvme] WD Blue SN570 (512.00G) 22123S801234");
    }

    #[test]
    fn test_gpu_panel_lists_cards() {
        let mut panel = GpuPanel::new(Box::new(DrmCardCollector::new(
            MockFs::typical_system(),
            "/sys",
        )));
        assert_eq!(panel.lines(), vec![line("Cards", "none")]);
        panel.refresh();
        assert_eq!(
            panel.lines(),
            vec![line("card0", "amdgpu @ 0000:03:00.0, 1.80 GHz")]
        );
    }

    #[test]
    fn test_gpu_panel_clock_follows_each_refresh() {
        let mut fs = MockFs::typical_system();
        let mut panel = GpuPanel::new(Box::new(DrmCardCollector::new(fs.clone(), "/sys")));
        panel.refresh();

        fs.add_file(
            "/sys/class/drm/card0/device/pp_dpm_sclk",
            "0: 500Mhz *\n1: 1800Mhz \n2: 2100Mhz \n",
        );
        panel.cards.provider = Box::new(DrmCardCollector::new(fs.clone(), "/sys"));
        panel.refresh();
        assert_eq!(value(&panel.lines(), "card0"), "amdgpu @ 0000:03:00.0, 500 MHz");

        fs.remove("/sys/class/drm/card0/device/pp_dpm_sclk");
        panel.cards.provider = Box::new(DrmCardCollector::new(fs, "/sys"));
        panel.refresh();
        assert_eq!(value(&panel.lines(), "card0"), "amdgpu @ 0000:03:00.0");
    }

    #[test]
    fn test_net_panel_rates() {
        let mut fs = MockFs::typical_system();
        let mut panel = NetPanel::new(Box::new(InterfaceCollector::new(
            fs.clone(),
            "/proc",
            "/sys",
        )));
        panel.refresh();
        assert_eq!(
            value(&panel.lines(), "eth0"),
            "52:54:00:12:34:56  rx 0B/s  tx 0B/s"
        );

        // two seconds later, 4000 bytes more received
        fs.add_file("/proc/uptime", "12347.67 98765.43\n");
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
  eth0: 98769432    54330    0    0    0     0          0         0 12345678    23456    0    0    0     0       0          0
",
        );
        fs.remove("/sys/class/net/eth0/address");
        panel.interfaces.provider = Box::new(InterfaceCollector::new(fs, "/proc", "/sys"));
        panel.refresh();
        assert_eq!(value(&panel.lines(), "eth0"), "rx 2.00K/s  tx 0B/s");
    }

    struct Failing;

    impl EntityProvider<String, BlockDevice> for Failing {
        fn list(&mut self) -> Result<Vec<(String, BlockDevice)>, ProviderError> {
            Err(ProviderError::Unavailable("sysfs not mounted".into()))
        }
    }

    #[test]
    fn test_device_panel_keeps_set_on_failure() {
        let mut panel = DiskPanel::new(Box::new(BlockDeviceCollector::new(
            MockFs::typical_system(),
            "/sys",
        )));
        panel.refresh();
        panel.disks.provider = Box::new(Failing);
        panel.refresh();
        assert_eq!(panel.lines()[0].0, "sda");
    }
}
