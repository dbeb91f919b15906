//! Process collector for per-process metrics from `/proc/[pid]/`.
//!
//! One `ProcessCollector` serves a single tab: `list()` enumerates the live
//! pids with their identity and refreshes the tick clock, then `sample()` is
//! called per tracked pid for the counter family the tab shows.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::collector::procfs::parser::{
    parse_cmdline, parse_proc_io, parse_proc_stat, parse_proc_statm, parse_proc_status,
    parse_uptime,
};
use crate::collector::traits::FileSystem;
use crate::provider::{CounterProvider, EntityProvider, ProviderError};
use crate::rates::DEFAULT_CLK_TCK;

/// Default page size when `sysconf` is unavailable.
pub const DEFAULT_PAGE_SIZE: u64 = 4096;

/// What a process tab shows about a process besides its metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessIdentity {
    pub name: String,
    pub cmdline: String,
    /// Seconds since the process started.
    pub uptime_secs: u64,
}

/// CPU time of a process and its reaped children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounters {
    pub busy_ticks: u64,
    /// Clock ticks per second the counter was read with.
    pub clk_tck: u64,
}

/// Memory gauges of a process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemCounters {
    pub resident: u64,
    pub virtual_size: u64,
    pub swap: u64,
}

/// Storage I/O counters of a process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Returns the pids found under a proc directory, in ascending order.
pub(crate) fn list_pids<F: FileSystem>(fs: &F, proc_path: &Path) -> Result<Vec<u32>, ProviderError> {
    let mut pids: Vec<u32> = fs
        .read_dir(proc_path)?
        .iter()
        .filter_map(|p| p.file_name()?.to_str()?.parse().ok())
        .collect();
    pids.sort_unstable();
    Ok(pids)
}

/// Reads `/proc/uptime` as milliseconds since boot.
pub(crate) fn read_uptime_ms<F: FileSystem>(fs: &F, proc_path: &Path) -> Result<u64, ProviderError> {
    let content = fs.read_to_string(&proc_path.join("uptime"))?;
    let secs = parse_uptime(&content)?;
    Ok((secs * 1000.0).round() as u64)
}

/// Reads name, command line and age of one process.
pub(crate) fn read_identity<F: FileSystem>(
    fs: &F,
    proc_path: &Path,
    pid: u32,
    uptime_ms: u64,
    clk_tck: u64,
) -> Result<ProcessIdentity, ProviderError> {
    let dir = proc_path.join(pid.to_string());
    let stat = parse_proc_stat(&fs.read_to_string(&dir.join("stat"))?)?;

    let name = fs
        .read_to_string(&dir.join("comm"))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| stat.comm.clone());
    let cmdline = fs
        .read_to_string(&dir.join("cmdline"))
        .map(|s| parse_cmdline(&s))
        .unwrap_or_default();

    let started_secs = stat.starttime / clk_tck.max(1);
    Ok(ProcessIdentity {
        name,
        cmdline,
        uptime_secs: (uptime_ms / 1000).saturating_sub(started_secs),
    })
}

/// Collects process information from `/proc/[pid]/` files.
pub struct ProcessCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    page_size: u64,
    clk_tck: u64,
    /// Milliseconds since boot at the last `list()`.
    now_ms: Option<u64>,
}

impl<F: FileSystem> ProcessCollector<F> {
    /// Creates a new process collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            page_size: DEFAULT_PAGE_SIZE,
            clk_tck: DEFAULT_CLK_TCK,
            now_ms: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_clk_tck(mut self, clk_tck: u64) -> Self {
        self.clk_tck = clk_tck;
        self
    }

    fn pid_dir(&self, pid: u32) -> PathBuf {
        self.proc_path.join(pid.to_string())
    }

    /// Timestamp for a sample: the clock read by the last `list()`, or a fresh read.
    fn clock(&mut self) -> Result<u64, ProviderError> {
        match self.now_ms {
            Some(ms) => Ok(ms),
            None => {
                let ms = read_uptime_ms(&self.fs, &self.proc_path)?;
                self.now_ms = Some(ms);
                Ok(ms)
            }
        }
    }

    fn read(&self, pid: u32, file: &str) -> Result<String, ProviderError> {
        self.fs
            .read_to_string(&self.pid_dir(pid).join(file))
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ProviderError::Unavailable(format!("process {} disappeared", pid))
                }
                _ => e.into(),
            })
    }
}

impl<F: FileSystem> EntityProvider<u32, ProcessIdentity> for ProcessCollector<F> {
    fn list(&mut self) -> Result<Vec<(u32, ProcessIdentity)>, ProviderError> {
        let uptime_ms = read_uptime_ms(&self.fs, &self.proc_path)?;
        self.now_ms = Some(uptime_ms);

        let pids = list_pids(&self.fs, &self.proc_path)?;
        let mut processes = Vec::with_capacity(pids.len());
        for pid in pids {
            // A process may exit between read_dir and reading its files.
            match read_identity(&self.fs, &self.proc_path, pid, uptime_ms, self.clk_tck) {
                Ok(identity) => processes.push((pid, identity)),
                Err(e) => trace!(pid, error = %e, "skipping process"),
            }
        }
        Ok(processes)
    }
}

impl<F: FileSystem> CounterProvider<u32, CpuCounters> for ProcessCollector<F> {
    fn sample(&mut self, pid: &u32) -> Result<(CpuCounters, u64), ProviderError> {
        let stat = parse_proc_stat(&self.read(*pid, "stat")?)?;
        let now = self.clock()?;
        Ok((
            CpuCounters {
                busy_ticks: stat.busy_ticks(),
                clk_tck: self.clk_tck,
            },
            now,
        ))
    }
}

impl<F: FileSystem> CounterProvider<u32, MemCounters> for ProcessCollector<F> {
    fn sample(&mut self, pid: &u32) -> Result<(MemCounters, u64), ProviderError> {
        let statm = parse_proc_statm(&self.read(*pid, "statm")?)?;
        let status = parse_proc_status(&self.read(*pid, "status")?)?;
        let now = self.clock()?;
        Ok((
            MemCounters {
                resident: statm.resident.saturating_mul(self.page_size),
                virtual_size: statm.size.saturating_mul(self.page_size),
                swap: status.vm_swap.saturating_mul(1024),
            },
            now,
        ))
    }
}

impl<F: FileSystem> CounterProvider<u32, DiskCounters> for ProcessCollector<F> {
    fn sample(&mut self, pid: &u32) -> Result<(DiskCounters, u64), ProviderError> {
        let io = parse_proc_io(&self.read(*pid, "io")?)?;
        let now = self.clock()?;
        Ok((
            DiskCounters {
                read_bytes: io.read_bytes,
                write_bytes: io.write_bytes,
            },
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    fn fixture() -> MockFs {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "1000.50 3000.00\n");
        fs.add_process(
            1,
            "1 (systemd) S 0 1 1 0 -1 4194560 50000 1000000 100 500 1000 500 20000 5000 20 0 1 0 1 170000000 3000 18446744073709551615 1 1 0 0 0 0 671173123 4096 1260 0 0 0 17 0 0 0 100 0 0 0 0 0 0 0 0 0 0",
            "42000 3000 2000 300 0 5000 0\n",
            "Name:\tsystemd\nUid:\t0\t0\t0\t0\nVmSwap:\t      16 kB\n",
            "rchar: 1\nwchar: 2\nread_bytes: 4096\nwrite_bytes: 8192\n",
            "/sbin/init\0splash\0",
            "systemd\n",
        );
        fs.add_process(
            77,
            "77 (sleep) S 1 77 77 0 -1 0 0 0 0 0 3 1 0 0 20 0 1 0 90000 5000000 100 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "1220 100 80 10 0 90 0\n",
            "Name:\tsleep\nUid:\t1000\t1000\t1000\t1000\n",
            "",
            "sleep\0600\0",
            "sleep\n",
        );
        fs.add_dir("/proc/self");
        fs.add_dir("/proc/net");
        fs
    }

    #[test]
    fn test_list_reads_identities() {
        let mut collector = ProcessCollector::new(fixture(), "/proc");
        let listed = collector.list().unwrap();

        let pids: Vec<u32> = listed.iter().map(|(pid, _)| *pid).collect();
        assert_eq!(pids, vec![1, 77]);

        let (_, init) = &listed[0];
        assert_eq!(init.name, "systemd");
        assert_eq!(init.cmdline, "/sbin/init splash");
        assert_eq!(init.uptime_secs, 1000);

        // started 900 s after boot
        let (_, sleep) = &listed[1];
        assert_eq!(sleep.uptime_secs, 100);
    }

    #[test]
    fn test_list_skips_vanished_process() {
        let mut fs = fixture();
        fs.add_dir("/proc/555"); // directory without files
        let mut collector = ProcessCollector::new(fs, "/proc");

        let listed = collector.list().unwrap();
        assert!(listed.iter().all(|(pid, _)| *pid != 555));
    }

    #[test]
    fn test_list_fails_without_uptime() {
        let mut fs = fixture();
        fs.remove("/proc/uptime");
        let mut collector = ProcessCollector::new(fs, "/proc");

        let result: Result<Vec<(u32, ProcessIdentity)>, _> = collector.list();
        assert!(matches!(result, Err(ProviderError::Io(_))));
    }

    #[test]
    fn test_sample_cpu() {
        let mut collector = ProcessCollector::new(fixture(), "/proc");
        EntityProvider::<u32, ProcessIdentity>::list(&mut collector).unwrap();

        let (cpu, ts): (CpuCounters, u64) = collector.sample(&1).unwrap();
        assert_eq!(cpu.busy_ticks, 1000 + 500 + 20000 + 5000);
        assert_eq!(cpu.clk_tck, 100);
        assert_eq!(ts, 1_000_500);
    }

    #[test]
    fn test_sample_mem_uses_page_size() {
        let mut collector = ProcessCollector::new(fixture(), "/proc").with_page_size(4096);

        let (mem, _): (MemCounters, u64) = collector.sample(&1).unwrap();
        assert_eq!(mem.resident, 3000 * 4096);
        assert_eq!(mem.virtual_size, 42000 * 4096);
        assert_eq!(mem.swap, 16 * 1024);

        let (sleep, _): (MemCounters, u64) = collector.sample(&77).unwrap();
        assert_eq!(sleep.swap, 0);
    }

    #[test]
    fn test_sample_disk() {
        let mut collector = ProcessCollector::new(fixture(), "/proc");

        let (disk, _): (DiskCounters, u64) = collector.sample(&1).unwrap();
        assert_eq!(disk.read_bytes, 4096);
        assert_eq!(disk.write_bytes, 8192);

        // io not readable for pid 77
        let missing: Result<(DiskCounters, u64), _> = collector.sample(&77);
        assert!(matches!(missing, Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn test_sample_gone_process() {
        let mut collector = ProcessCollector::new(fixture(), "/proc");
        let gone: Result<(CpuCounters, u64), _> = collector.sample(&4242);
        assert!(matches!(gone, Err(ProviderError::Unavailable(_))));
    }
}
