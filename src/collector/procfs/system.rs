//! System collector for the host-wide facts shown in the info panels.

use std::path::{Path, PathBuf};

use crate::collector::procfs::parser::{
    CpuInfo, LoadAvg, MemInfo, parse_cpuinfo, parse_loadavg, parse_meminfo, parse_os_release,
    parse_uptime,
};
use crate::collector::traits::FileSystem;
use crate::provider::ProviderError;

/// Roots of the pseudo-filesystems the collectors read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub proc_path: PathBuf,
    pub sys_path: PathBuf,
    pub etc_path: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            proc_path: PathBuf::from("/proc"),
            sys_path: PathBuf::from("/sys"),
            etc_path: PathBuf::from("/etc"),
        }
    }
}

/// Collects system-wide facts from `/proc`, `/sys` and `/etc`.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    paths: SourcePaths,
}

impl<F: FileSystem> SystemCollector<F> {
    pub fn new(fs: F, paths: SourcePaths) -> Self {
        Self { fs, paths }
    }

    fn read(&self, path: &Path) -> Result<String, ProviderError> {
        Ok(self.fs.read_to_string(path)?)
    }

    /// Seconds since boot.
    pub fn uptime_secs(&self) -> Result<u64, ProviderError> {
        let content = self.read(&self.paths.proc_path.join("uptime"))?;
        Ok(parse_uptime(&content)? as u64)
    }

    pub fn meminfo(&self) -> Result<MemInfo, ProviderError> {
        let content = self.read(&self.paths.proc_path.join("meminfo"))?;
        Ok(parse_meminfo(&content)?)
    }

    pub fn loadavg(&self) -> Result<LoadAvg, ProviderError> {
        let content = self.read(&self.paths.proc_path.join("loadavg"))?;
        Ok(parse_loadavg(&content)?)
    }

    pub fn cpuinfo(&self) -> Result<CpuInfo, ProviderError> {
        let content = self.read(&self.paths.proc_path.join("cpuinfo"))?;
        Ok(parse_cpuinfo(&content)?)
    }

    /// Machine model from DMI, e.g. `ThinkPad X1 Carbon Gen 9`.
    pub fn product_name(&self) -> Result<String, ProviderError> {
        let path = self
            .paths
            .sys_path
            .join("devices/virtual/dmi/id/product_name");
        Ok(self.read(&path)?.trim().to_string())
    }

    /// Running kernel release, e.g. `6.8.0-45-generic`.
    pub fn kernel_release(&self) -> Result<String, ProviderError> {
        let path = self.paths.proc_path.join("sys/kernel/osrelease");
        Ok(self.read(&path)?.trim().to_string())
    }

    /// Distribution name from `os-release`.
    pub fn os_release(&self) -> Result<String, ProviderError> {
        let content = self.read(&self.paths.etc_path.join("os-release"))?;
        Ok(parse_os_release(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_system_collector_typical() {
        let collector = SystemCollector::new(MockFs::typical_system(), SourcePaths::default());

        assert_eq!(collector.uptime_secs().unwrap(), 12345);
        assert_eq!(collector.meminfo().unwrap().mem_total, 16384000);
        assert_eq!(collector.loadavg().unwrap().load1, 0.15);
        assert_eq!(collector.cpuinfo().unwrap().threads, 4);
        assert_eq!(collector.product_name().unwrap(), "Standard PC (Q35 + ICH9, 2009)");
        assert_eq!(collector.kernel_release().unwrap(), "6.8.0-45-generic");
        assert_eq!(collector.os_release().unwrap(), "Ubuntu 24.04.1 LTS");
    }

    #[test]
    fn test_system_collector_missing_files() {
        let collector = SystemCollector::new(MockFs::new(), SourcePaths::default());

        assert!(matches!(collector.uptime_secs(), Err(ProviderError::Io(_))));
        assert!(matches!(collector.product_name(), Err(ProviderError::Io(_))));
    }

    #[test]
    fn test_system_collector_custom_roots() {
        let mut fs = MockFs::new();
        fs.add_file("/host/proc/uptime", "60.9 1.0\n");
        let paths = SourcePaths {
            proc_path: PathBuf::from("/host/proc"),
            ..SourcePaths::default()
        };

        let collector = SystemCollector::new(fs, paths);
        assert_eq!(collector.uptime_secs().unwrap(), 60);
    }
}
