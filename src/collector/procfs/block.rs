//! Block device inventory from `/sys/block`.

use std::path::{Path, PathBuf};

use crate::collector::traits::FileSystem;
use crate::provider::{EntityProvider, ProviderError};

/// Sector unit used by `/sys/block/*/size`, independent of the device.
const SECTOR_SIZE: u64 = 512;

/// A whole block device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDevice {
    pub vendor: String,
    pub model: String,
    pub serial: String,
    /// Bus the device hangs off, e.g. `scsi` or `nvme`.
    pub subsystem: String,
    pub size_bytes: u64,
}

fn is_virtual(name: &str) -> bool {
    name.starts_with("loop") || name.starts_with("ram")
}

/// Lists block devices, skipping loop and ram devices.
pub struct BlockDeviceCollector<F: FileSystem> {
    fs: F,
    sys_path: PathBuf,
}

impl<F: FileSystem> BlockDeviceCollector<F> {
    pub fn new(fs: F, sys_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            sys_path: sys_path.into(),
        }
    }
}

impl<F: FileSystem> BlockDeviceCollector<F> {
    /// Reads a trimmed attribute, empty when absent.
    fn attr(&self, path: &Path) -> String {
        self.fs
            .read_to_string(path)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn subsystem(&self, device_dir: &Path) -> String {
        self.fs
            .read_link(&device_dir.join("subsystem"))
            .ok()
            .and_then(|target| Some(target.file_name()?.to_str()?.to_string()))
            .unwrap_or_default()
    }
}

impl<F: FileSystem> EntityProvider<String, BlockDevice> for BlockDeviceCollector<F> {
    fn list(&mut self) -> Result<Vec<(String, BlockDevice)>, ProviderError> {
        let block = self.sys_path.join("block");
        let mut names: Vec<String> = self
            .fs
            .read_dir(&block)?
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .filter(|name| !is_virtual(name))
            .collect();
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| {
                let dir = block.join(&name);
                let device_dir = dir.join("device");
                let sectors: u64 = self.attr(&dir.join("size")).parse().unwrap_or(0);
                // nvme and virtio expose no vendor, some no model either
                let device = BlockDevice {
                    vendor: self.attr(&device_dir.join("vendor")),
                    model: self.attr(&device_dir.join("model")),
                    serial: self.attr(&device_dir.join("serial")),
                    subsystem: self.subsystem(&device_dir),
                    size_bytes: sectors.saturating_mul(SECTOR_SIZE),
                };
                (name, device)
            })
            .collect())
    }
}
