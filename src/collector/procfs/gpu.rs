//! GPU usage from DRM client fdinfo and the card inventory from sysfs.
//!
//! A process is a GPU client when one of its fds links to a
//! `/dev/dri/renderD*` node. Its busy time and VRAM come from the matching
//! `/proc/[pid]/fdinfo/[fd]` entries, deduplicated by `drm-client-id` since
//! dup'ed fds report the same client.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::collector::procfs::parser::{
    parse_dpm_sclk, parse_drm_fdinfo, parse_render_node_link, parse_uevent,
};
use crate::collector::procfs::process::{
    ProcessIdentity, list_pids, read_identity, read_uptime_ms,
};
use crate::collector::traits::FileSystem;
use crate::provider::{CounterProvider, EntityProvider, ProviderError};
use crate::rates::DEFAULT_CLK_TCK;

/// A process holding a DRM render node open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuClient {
    pub identity: ProcessIdentity,
    /// Render node of the first DRM fd, e.g. `renderD128`.
    pub card: String,
}

/// Accumulated DRM counters of one process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpuCounters {
    /// Render/gfx engine busy time, in nanoseconds.
    pub engine_ns: u64,
    pub vram_bytes: u64,
}

/// Fd numbers of a process that point at render nodes, with the node name.
fn render_fds<F: FileSystem>(fs: &F, pid_dir: &Path) -> Vec<(String, String)> {
    let Ok(entries) = fs.read_dir(&pid_dir.join("fd")) else {
        return Vec::new();
    };
    let mut fds: Vec<(String, String)> = entries
        .iter()
        .filter_map(|path| {
            let target = fs.read_link(path).ok()?;
            let node = parse_render_node_link(target.to_str()?)?.to_string();
            let fd = path.file_name()?.to_str()?.to_string();
            Some((fd, node))
        })
        .collect();
    fds.sort_by_key(|(fd, _)| fd.parse::<u64>().unwrap_or(u64::MAX));
    fds
}

/// Collects per-process GPU usage.
pub struct GpuCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    clk_tck: u64,
    now_ms: Option<u64>,
}

impl<F: FileSystem> GpuCollector<F> {
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            clk_tck: DEFAULT_CLK_TCK,
            now_ms: None,
        }
    }

    pub fn with_clk_tck(mut self, clk_tck: u64) -> Self {
        self.clk_tck = clk_tck;
        self
    }
}

impl<F: FileSystem> EntityProvider<u32, GpuClient> for GpuCollector<F> {
    fn list(&mut self) -> Result<Vec<(u32, GpuClient)>, ProviderError> {
        let uptime_ms = read_uptime_ms(&self.fs, &self.proc_path)?;
        self.now_ms = Some(uptime_ms);

        let mut clients = Vec::new();
        for pid in list_pids(&self.fs, &self.proc_path)? {
            let dir = self.proc_path.join(pid.to_string());
            let Some((_, card)) = render_fds(&self.fs, &dir).into_iter().next() else {
                continue;
            };
            match read_identity(&self.fs, &self.proc_path, pid, uptime_ms, self.clk_tck) {
                Ok(identity) => clients.push((pid, GpuClient { identity, card })),
                Err(e) => trace!(pid, error = %e, "skipping gpu client"),
            }
        }
        Ok(clients)
    }
}

impl<F: FileSystem> CounterProvider<u32, GpuCounters> for GpuCollector<F> {
    fn sample(&mut self, pid: &u32) -> Result<(GpuCounters, u64), ProviderError> {
        let dir = self.proc_path.join(pid.to_string());
        let fds = render_fds(&self.fs, &dir);
        if fds.is_empty() {
            return Err(ProviderError::Unavailable(format!(
                "process {} has no render node open",
                pid
            )));
        }

        let mut counters = GpuCounters::default();
        let mut seen_clients = HashSet::new();
        for (fd, _) in fds {
            let content = self.fs.read_to_string(&dir.join("fdinfo").join(&fd))?;
            let info = parse_drm_fdinfo(&content)?;
            if let Some(id) = info.client_id {
                if !seen_clients.insert(id) {
                    continue;
                }
            }
            counters.engine_ns = counters.engine_ns.saturating_add(info.engine_ns);
            counters.vram_bytes = counters.vram_bytes.saturating_add(info.vram_bytes);
        }

        let now = match self.now_ms {
            Some(ms) => ms,
            None => read_uptime_ms(&self.fs, &self.proc_path)?,
        };
        Ok((counters, now))
    }
}

/// A DRM card from `/sys/class/drm`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrmCard {
    pub driver: String,
    pub pci_slot: String,
    /// Current shader clock. Only amdgpu exposes `pp_dpm_sclk`.
    pub clock_mhz: Option<u32>,
}

/// Lists DRM cards, skipping connector entries such as `card0-DP-1`.
pub struct DrmCardCollector<F: FileSystem> {
    fs: F,
    sys_path: PathBuf,
}

impl<F: FileSystem> DrmCardCollector<F> {
    pub fn new(fs: F, sys_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            sys_path: sys_path.into(),
        }
    }
}

fn is_card_name(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

impl<F: FileSystem> EntityProvider<String, DrmCard> for DrmCardCollector<F> {
    fn list(&mut self) -> Result<Vec<(String, DrmCard)>, ProviderError> {
        let drm = self.sys_path.join("class/drm");
        let mut cards: Vec<(String, DrmCard)> = self
            .fs
            .read_dir(&drm)?
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .filter(|name| is_card_name(name))
            .map(|name| {
                let uevent = self
                    .fs
                    .read_to_string(&drm.join(&name).join("device/uevent"))
                    .map(|c| parse_uevent(&c))
                    .unwrap_or_default();
                let clock_mhz = self
                    .fs
                    .read_to_string(&drm.join(&name).join("device/pp_dpm_sclk"))
                    .ok()
                    .and_then(|c| parse_dpm_sclk(&c).ok());
                let card = DrmCard {
                    driver: uevent.get("DRIVER").cloned().unwrap_or_default(),
                    pci_slot: uevent.get("PCI_SLOT_NAME").cloned().unwrap_or_default(),
                    clock_mhz,
                };
                (name, card)
            })
            .collect();
        cards.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(cards)
    }
}
