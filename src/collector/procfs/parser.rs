//! Parsers for `/proc` and `/sys` files.
//!
//! These are pure functions that parse the content of pseudo-files into
//! structured data. They are easily testable with string inputs.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

// ============ Process files ============

/// Parsed data from `/proc/[pid]/stat`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcStat {
    pub pid: u32,
    pub comm: String,
    pub state: char,
    pub ppid: u32,
    pub utime: u64,
    pub stime: u64,
    pub cutime: i64,
    pub cstime: i64,
    pub num_threads: i32,
    /// Start time after boot, in clock ticks.
    pub starttime: u64,
    pub vsize: u64,
    pub rss: i64,
}

impl ProcStat {
    /// Total CPU time of the process and its waited-for children, in clock ticks.
    ///
    /// Children times are signed in the kernel ABI; negative values count as 0.
    pub fn busy_ticks(&self) -> u64 {
        self.utime
            .saturating_add(self.stime)
            .saturating_add(self.cutime.max(0) as u64)
            .saturating_add(self.cstime.max(0) as u64)
    }
}

/// Parses `/proc/[pid]/stat` content.
///
/// The comm field can contain spaces and parentheses, so it is located by the
/// first `(` and the last `)`.
/// Format: pid (comm) state ppid pgrp session tty_nr ...
pub fn parse_proc_stat(content: &str) -> Result<ProcStat, ParseError> {
    let content = content.trim();

    let open_paren = content
        .find('(')
        .ok_or_else(|| ParseError::new("missing '(' in stat"))?;
    let close_paren = content
        .rfind(')')
        .ok_or_else(|| ParseError::new("missing ')' in stat"))?;

    if close_paren <= open_paren {
        return Err(ParseError::new("invalid parentheses in stat"));
    }

    let pid: u32 = content[..open_paren]
        .trim()
        .parse()
        .map_err(|_| ParseError::new("invalid pid"))?;

    let comm = content[open_paren + 1..close_paren].to_string();

    // Fields after ')' start at "state" (field 3 in proc(5)).
    let fields: Vec<&str> = content[close_paren + 1..].split_whitespace().collect();
    if fields.len() < 22 {
        return Err(ParseError::new(format!(
            "not enough fields in stat: expected 22+, got {}",
            fields.len()
        )));
    }

    let field = |idx: usize, name: &str| -> Result<i64, ParseError> {
        fields[idx]
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {}", name)))
    };
    let field_u64 = |idx: usize, name: &str| -> Result<u64, ParseError> {
        fields[idx]
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {}", name)))
    };

    Ok(ProcStat {
        pid,
        comm,
        state: fields[0].chars().next().unwrap_or('?'),
        ppid: field(1, "ppid")? as u32,
        utime: field_u64(11, "utime")?,
        stime: field_u64(12, "stime")?,
        cutime: field(13, "cutime")?,
        cstime: field(14, "cstime")?,
        num_threads: field(17, "num_threads")? as i32,
        starttime: field_u64(19, "starttime")?,
        vsize: field_u64(20, "vsize")?,
        rss: field(21, "rss")?,
    })
}

/// Parsed data from `/proc/[pid]/statm`, in pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcStatm {
    pub size: u64,
    pub resident: u64,
    pub shared: u64,
}

/// Parses `/proc/[pid]/statm` content.
///
/// Format: size resident shared text lib data dt
pub fn parse_proc_statm(content: &str) -> Result<ProcStatm, ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::new("invalid statm format"));
    }
    let page = |idx: usize, name: &str| -> Result<u64, ParseError> {
        parts[idx]
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {}", name)))
    };
    Ok(ProcStatm {
        size: page(0, "size")?,
        resident: page(1, "resident")?,
        shared: page(2, "shared")?,
    })
}

/// Parsed data from `/proc/[pid]/status`. Sizes are in kB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcStatus {
    pub name: String,
    pub uid: u32,
    pub vm_rss: u64,
    pub vm_swap: u64,
}

/// Parses `/proc/[pid]/status` content.
///
/// Format is key:\tvalue pairs, one per line. Kernel threads have no Vm*
/// lines; their sizes stay 0.
pub fn parse_proc_status(content: &str) -> Result<ProcStatus, ParseError> {
    let fields: HashMap<&str, &str> = content
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect();

    if !fields.contains_key("Name") {
        return Err(ParseError::new("missing Name in status"));
    }

    let kb = |key: &str| -> u64 {
        fields
            .get(key)
            .and_then(|v| v.split_whitespace().next())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    Ok(ProcStatus {
        name: fields.get("Name").unwrap_or(&"").to_string(),
        uid: fields
            .get("Uid")
            .and_then(|v| v.split_whitespace().next())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0),
        vm_rss: kb("VmRSS"),
        vm_swap: kb("VmSwap"),
    })
}

/// Parsed data from `/proc/[pid]/io`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcIo {
    pub rchar: u64,
    pub wchar: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Parses `/proc/[pid]/io` content.
pub fn parse_proc_io(content: &str) -> Result<ProcIo, ParseError> {
    let mut io = ProcIo::default();
    let mut seen = false;

    for line in content.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let value: u64 = value.trim().parse().unwrap_or(0);
            seen = true;
            match key.trim() {
                "rchar" => io.rchar = value,
                "wchar" => io.wchar = value,
                "read_bytes" => io.read_bytes = value,
                "write_bytes" => io.write_bytes = value,
                _ => {}
            }
        }
    }

    if !seen {
        return Err(ParseError::new("empty io file"));
    }
    Ok(io)
}

/// Converts `/proc/[pid]/cmdline` content to a printable command line.
pub fn parse_cmdline(content: &str) -> String {
    content
        .split('\0')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============ System files ============

/// Parses `/proc/uptime` content into seconds since boot.
pub fn parse_uptime(content: &str) -> Result<f64, ParseError> {
    content
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::new("empty uptime"))?
        .parse()
        .map_err(|_| ParseError::new("invalid uptime"))
}

/// Parsed data from `/proc/meminfo`. Values are in kB.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

impl MemInfo {
    pub fn mem_used(&self) -> u64 {
        self.mem_total.saturating_sub(self.mem_available)
    }

    pub fn swap_used(&self) -> u64 {
        self.swap_total.saturating_sub(self.swap_free)
    }
}

/// Parses `/proc/meminfo` content.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let value: u64 = rest
            .split_whitespace()
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        match key.trim() {
            "MemTotal" => info.mem_total = value,
            "MemFree" => info.mem_free = value,
            "MemAvailable" => info.mem_available = value,
            "Buffers" => info.buffers = value,
            "Cached" => info.cached = value,
            "SwapTotal" => info.swap_total = value,
            "SwapFree" => info.swap_free = value,
            _ => {}
        }
    }

    if info.mem_total == 0 {
        return Err(ParseError::new("missing MemTotal in meminfo"));
    }
    Ok(info)
}

/// Parsed data from `/proc/loadavg`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadAvg {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
    pub running: u32,
    pub total: u32,
}

/// Parses `/proc/loadavg` content.
pub fn parse_loadavg(content: &str) -> Result<LoadAvg, ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(ParseError::new("invalid loadavg format"));
    }

    let load = |idx: usize, name: &str| -> Result<f64, ParseError> {
        parts[idx]
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {}", name)))
    };

    // Format: running/total
    let (running, total) = match parts[3].split_once('/') {
        Some((r, t)) => (r.parse().unwrap_or(0), t.parse().unwrap_or(0)),
        None => (0, 0),
    };

    Ok(LoadAvg {
        load1: load(0, "load1")?,
        load5: load(1, "load5")?,
        load15: load(2, "load15")?,
        running,
        total,
    })
}

/// Summary of `/proc/cpuinfo`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuInfo {
    pub model_name: String,
    /// Physical cores per package (`cpu cores`), or the thread count if absent.
    pub cores: u32,
    /// Number of logical processors.
    pub threads: u32,
    /// Mean of the per-processor `cpu MHz` values.
    pub avg_mhz: f64,
}

/// Parses `/proc/cpuinfo` content.
pub fn parse_cpuinfo(content: &str) -> Result<CpuInfo, ParseError> {
    let mut info = CpuInfo::default();
    let mut mhz_sum = 0.0;
    let mut mhz_count = 0u32;

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "processor" => info.threads += 1,
            "model name" if info.model_name.is_empty() => info.model_name = value.to_string(),
            "cpu cores" if info.cores == 0 => info.cores = value.parse().unwrap_or(0),
            "cpu MHz" => {
                if let Ok(mhz) = value.parse::<f64>() {
                    mhz_sum += mhz;
                    mhz_count += 1;
                }
            }
            _ => {}
        }
    }

    if info.threads == 0 {
        return Err(ParseError::new("no processor entries in cpuinfo"));
    }
    if info.cores == 0 {
        info.cores = info.threads;
    }
    if mhz_count > 0 {
        info.avg_mhz = mhz_sum / f64::from(mhz_count);
    }
    Ok(info)
}

/// Parses `/etc/os-release` content into a display name.
///
/// Prefers `PRETTY_NAME`, then `NAME VERSION`, then `NAME`.
pub fn parse_os_release(content: &str) -> Result<String, ParseError> {
    let fields: HashMap<&str, &str> = content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim().trim_matches('"')))
        .collect();

    if let Some(pretty) = fields.get("PRETTY_NAME").filter(|s| !s.is_empty()) {
        return Ok(pretty.to_string());
    }
    match (fields.get("NAME"), fields.get("VERSION")) {
        (Some(name), Some(version)) => Ok(format!("{} {}", name, version)),
        (Some(name), None) => Ok(name.to_string()),
        _ => Err(ParseError::new("missing NAME in os-release")),
    }
}

// ============ Network ============

/// Parsed data from `/proc/net/dev`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetDevStats {
    pub interface: String,
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
}

/// Parses `/proc/net/dev` content.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
pub fn parse_net_dev(content: &str) -> Result<Vec<NetDevStats>, ParseError> {
    let mut devices = Vec::new();

    for line in content.lines() {
        if line.contains('|') || line.trim().is_empty() {
            continue;
        }

        let Some((interface, rest)) = line.split_once(':') else {
            continue;
        };
        let values: Vec<&str> = rest.split_whitespace().collect();
        if values.len() < 16 {
            return Err(ParseError::new(format!(
                "not enough fields for {} in net/dev",
                interface.trim()
            )));
        }

        let get_val =
            |idx: usize| -> u64 { values.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

        devices.push(NetDevStats {
            interface: interface.trim().to_string(),
            rx_bytes: get_val(0),
            rx_packets: get_val(1),
            tx_bytes: get_val(8),
            tx_packets: get_val(9),
        });
    }

    Ok(devices)
}

/// Transport protocol of a socket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketProto {
    Tcp,
    Tcp6,
    Udp,
    Udp6,
}

impl SocketProto {
    pub fn all() -> &'static [SocketProto] {
        &[
            SocketProto::Tcp,
            SocketProto::Tcp6,
            SocketProto::Udp,
            SocketProto::Udp6,
        ]
    }

    /// File name under `/proc/net`.
    pub fn file_name(&self) -> &'static str {
        match self {
            SocketProto::Tcp => "tcp",
            SocketProto::Tcp6 => "tcp6",
            SocketProto::Udp => "udp",
            SocketProto::Udp6 => "udp6",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SocketProto::Tcp => "TCP",
            SocketProto::Tcp6 => "TCP6",
            SocketProto::Udp => "UDP",
            SocketProto::Udp6 => "UDP6",
        }
    }

    fn is_udp(&self) -> bool {
        matches!(self, SocketProto::Udp | SocketProto::Udp6)
    }
}

/// Socket state as reported in the `st` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketState {
    Established,
    SynSent,
    SynRecv,
    FinWait1,
    FinWait2,
    TimeWait,
    Close,
    CloseWait,
    LastAck,
    Listen,
    Closing,
    /// Unconnected datagram socket.
    Unconn,
    Unknown(u8),
}

impl SocketState {
    fn from_code(code: u8, proto: SocketProto) -> Self {
        match code {
            0x01 => SocketState::Established,
            0x02 => SocketState::SynSent,
            0x03 => SocketState::SynRecv,
            0x04 => SocketState::FinWait1,
            0x05 => SocketState::FinWait2,
            0x06 => SocketState::TimeWait,
            0x07 if proto.is_udp() => SocketState::Unconn,
            0x07 => SocketState::Close,
            0x08 => SocketState::CloseWait,
            0x09 => SocketState::LastAck,
            0x0A => SocketState::Listen,
            0x0B => SocketState::Closing,
            other => SocketState::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SocketState::Established => "ESTABLISHED",
            SocketState::SynSent => "SYN_SENT",
            SocketState::SynRecv => "SYN_RECV",
            SocketState::FinWait1 => "FIN_WAIT1",
            SocketState::FinWait2 => "FIN_WAIT2",
            SocketState::TimeWait => "TIME_WAIT",
            SocketState::Close => "CLOSE",
            SocketState::CloseWait => "CLOSE_WAIT",
            SocketState::LastAck => "LAST_ACK",
            SocketState::Listen => "LISTEN",
            SocketState::Closing => "CLOSING",
            SocketState::Unconn => "UNCONN",
            SocketState::Unknown(_) => "UNKNOWN",
        }
    }
}

/// One row of `/proc/net/{tcp,tcp6,udp,udp6}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketEntry {
    pub proto: SocketProto,
    pub local: SocketAddr,
    pub remote: SocketAddr,
    pub state: SocketState,
    pub uid: u32,
    pub inode: u64,
}

/// Decodes a `/proc/net` hex address such as `0100007F:0035`.
///
/// The address words are printed in host byte order; this decodes them for a
/// little-endian host.
pub fn parse_hex_socket_addr(s: &str) -> Result<SocketAddr, ParseError> {
    let (addr, port) = s
        .split_once(':')
        .ok_or_else(|| ParseError::new(format!("invalid socket address {}", s)))?;
    let port =
        u16::from_str_radix(port, 16).map_err(|_| ParseError::new(format!("invalid port {}", port)))?;

    let word = |chunk: &str| -> Result<[u8; 4], ParseError> {
        u32::from_str_radix(chunk, 16)
            .map(u32::to_le_bytes)
            .map_err(|_| ParseError::new(format!("invalid address {}", addr)))
    };

    match addr.len() {
        8 => Ok(SocketAddr::new(Ipv4Addr::from(word(addr)?).into(), port)),
        32 => {
            let mut octets = [0u8; 16];
            for i in 0..4 {
                octets[i * 4..i * 4 + 4].copy_from_slice(&word(&addr[i * 8..i * 8 + 8])?);
            }
            Ok(SocketAddr::new(Ipv6Addr::from(octets).into(), port))
        }
        _ => Err(ParseError::new(format!("invalid address length {}", addr))),
    }
}

/// Parses a `/proc/net/{tcp,tcp6,udp,udp6}` table.
///
/// Format (after the header line):
///   sl  local_address rem_address   st tx_queue:rx_queue tr:tm->when retrnsmt   uid  timeout inode
///    0: 0100007F:0035 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 12345 ...
pub fn parse_net_sockets(content: &str, proto: SocketProto) -> Result<Vec<SocketEntry>, ParseError> {
    let mut entries = Vec::new();

    for line in content.lines().skip(1) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        if parts.len() < 10 {
            return Err(ParseError::new(format!(
                "not enough fields in net/{}",
                proto.file_name()
            )));
        }

        let state = u8::from_str_radix(parts[3], 16)
            .map_err(|_| ParseError::new(format!("invalid socket state {}", parts[3])))?;

        entries.push(SocketEntry {
            proto,
            local: parse_hex_socket_addr(parts[1])?,
            remote: parse_hex_socket_addr(parts[2])?,
            state: SocketState::from_code(state, proto),
            uid: parts[7].parse().unwrap_or(0),
            inode: parts[9]
                .parse()
                .map_err(|_| ParseError::new(format!("invalid inode {}", parts[9])))?,
        });
    }

    Ok(entries)
}

/// Extracts the inode from a `/proc/[pid]/fd` link target like `socket:[12345]`.
pub fn parse_socket_link(target: &str) -> Option<u64> {
    target
        .strip_prefix("socket:[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

// ============ DRM ============

/// Parsed data from a DRM client's `/proc/[pid]/fdinfo/[fd]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrmFdInfo {
    pub driver: String,
    pub client_id: Option<u64>,
    /// Sum of `drm-engine-render` and `drm-engine-gfx`, in nanoseconds.
    pub engine_ns: u64,
    /// `drm-memory-vram`, in bytes.
    pub vram_bytes: u64,
}

fn parse_drm_memory(value: &str) -> u64 {
    let mut parts = value.split_whitespace();
    let amount: u64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let scale = match parts.next() {
        Some("KiB") => 1024,
        Some("MiB") => 1024 * 1024,
        Some("GiB") => 1024 * 1024 * 1024,
        _ => 1,
    };
    amount.saturating_mul(scale)
}

/// Parses a DRM fdinfo file. Returns an error when the fd is not a DRM client.
pub fn parse_drm_fdinfo(content: &str) -> Result<DrmFdInfo, ParseError> {
    let mut info = DrmFdInfo::default();
    let mut is_drm = false;

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "drm-driver" => {
                is_drm = true;
                info.driver = value.to_string();
            }
            "drm-client-id" => info.client_id = value.parse().ok(),
            "drm-engine-render" | "drm-engine-gfx" => {
                let ns: u64 = value
                    .split_whitespace()
                    .next()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0);
                info.engine_ns = info.engine_ns.saturating_add(ns);
            }
            "drm-memory-vram" => info.vram_bytes = parse_drm_memory(value),
            _ => {}
        }
    }

    if !is_drm {
        return Err(ParseError::new("not a DRM fdinfo"));
    }
    Ok(info)
}

/// Extracts the render node name from a link target like `/dev/dri/renderD128`.
pub fn parse_render_node_link(target: &str) -> Option<&str> {
    let node = target.strip_prefix("/dev/dri/")?;
    node.starts_with("renderD").then_some(node)
}

/// Parses a sysfs `uevent` file into key/value pairs.
pub fn parse_uevent(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Parses amdgpu `pp_dpm_sclk`, returning the MHz of the level marked `*`.
///
/// ```text
/// 0: 500Mhz
/// 1: 1800Mhz *
/// ```
pub fn parse_dpm_sclk(content: &str) -> Result<u32, ParseError> {
    let active = content
        .lines()
        .find(|line| line.trim_end().ends_with('*'))
        .ok_or_else(|| ParseError::new("no active clock level"))?;
    let (_, level) = active
        .split_once(':')
        .ok_or_else(|| ParseError::new(format!("bad clock level: {}", active)))?;
    let digits: String = level
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits
        .parse()
        .map_err(|_| ParseError::new(format!("bad clock level: {}", active)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT_BASH: &str = "1234 (bash) S 1233 1234 1234 34816 1235 4194304 5000 50000 10 20 100 50 200 100 20 0 1 0 100000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0 0 0 0 0 0 0 0 0";

    #[test]
    fn test_parse_proc_stat_basic() {
        let stat = parse_proc_stat(STAT_BASH).unwrap();

        assert_eq!(stat.pid, 1234);
        assert_eq!(stat.comm, "bash");
        assert_eq!(stat.state, 'S');
        assert_eq!(stat.ppid, 1233);
        assert_eq!(stat.utime, 100);
        assert_eq!(stat.stime, 50);
        assert_eq!(stat.cutime, 200);
        assert_eq!(stat.cstime, 100);
        assert_eq!(stat.num_threads, 1);
        assert_eq!(stat.starttime, 100000);
        assert_eq!(stat.vsize, 25000000);
        assert_eq!(stat.rss, 2000);
        assert_eq!(stat.busy_ticks(), 450);
    }

    #[test]
    fn test_parse_proc_stat_with_spaces_in_comm() {
        let content = "5000 (Web Content) S 4999 5000 4999 0 -1 4194304 100000 0 500 0 5000 1000 0 0 20 0 20 0 500000 2000000000 50000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0";
        let stat = parse_proc_stat(content).unwrap();

        assert_eq!(stat.pid, 5000);
        assert_eq!(stat.comm, "Web Content");
        assert_eq!(stat.num_threads, 20);
    }

    #[test]
    fn test_parse_proc_stat_with_parentheses_in_comm() {
        let content = "5001 (test(1)) S 1 5001 5001 0 -1 4194304 1000 0 0 0 10 5 0 0 20 0 1 0 500100 10000000 1000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0";
        let stat = parse_proc_stat(content).unwrap();

        assert_eq!(stat.pid, 5001);
        assert_eq!(stat.comm, "test(1)");
    }

    #[test]
    fn test_parse_proc_stat_negative_children_times() {
        let content = "7 (x) S 1 7 7 0 -1 0 0 0 0 0 10 5 -3 -4 20 0 1 0 100 0 0";
        let stat = parse_proc_stat(content).unwrap();
        assert_eq!(stat.busy_ticks(), 15);
    }

    #[test]
    fn test_parse_proc_stat_invalid() {
        assert!(parse_proc_stat("").is_err());
        assert!(parse_proc_stat("1234 bash S").is_err());
        assert!(parse_proc_stat("1234 (bash) S 1 2 3").is_err());
        assert!(parse_proc_stat("abc (bash) S 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21").is_err());
    }

    #[test]
    fn test_parse_proc_statm() {
        let statm = parse_proc_statm("6103 1460 1097 244 0 598 0\n").unwrap();
        assert_eq!(statm.size, 6103);
        assert_eq!(statm.resident, 1460);
        assert_eq!(statm.shared, 1097);

        assert!(parse_proc_statm("12").is_err());
        assert!(parse_proc_statm("a b c").is_err());
    }

    #[test]
    fn test_parse_proc_status() {
        let content = "\
Name:\tbash
Umask:\t0022
State:\tS (sleeping)
Pid:\t1234
Uid:\t1000\t1000\t1000\t1000
VmRSS:\t    5840 kB
VmSwap:\t     128 kB
Threads:\t1
";
        let status = parse_proc_status(content).unwrap();
        assert_eq!(status.name, "bash");
        assert_eq!(status.uid, 1000);
        assert_eq!(status.vm_rss, 5840);
        assert_eq!(status.vm_swap, 128);
    }

    #[test]
    fn test_parse_proc_status_kernel_thread() {
        let status = parse_proc_status("Name:\tkworker/0:1\nUid:\t0\t0\t0\t0\n").unwrap();
        assert_eq!(status.vm_swap, 0);
        assert!(parse_proc_status("").is_err());
    }

    #[test]
    fn test_parse_proc_io() {
        let content = "\
rchar: 12345678
wchar: 87654321
syscr: 1000
syscw: 2000
read_bytes: 4096000
write_bytes: 8192000
cancelled_write_bytes: 0
";
        let io = parse_proc_io(content).unwrap();
        assert_eq!(io.rchar, 12345678);
        assert_eq!(io.wchar, 87654321);
        assert_eq!(io.read_bytes, 4096000);
        assert_eq!(io.write_bytes, 8192000);

        assert!(parse_proc_io("").is_err());
    }

    #[test]
    fn test_parse_cmdline() {
        assert_eq!(
            parse_cmdline("/usr/bin/python3\0-m\0http.server\0"),
            "/usr/bin/python3 -m http.server"
        );
        assert_eq!(parse_cmdline(""), "");
    }

    #[test]
    fn test_parse_uptime() {
        assert_eq!(parse_uptime("350735.47 234388.90\n").unwrap(), 350735.47);
        assert!(parse_uptime("").is_err());
        assert!(parse_uptime("abc 1").is_err());
    }

    #[test]
    fn test_parse_meminfo() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            7 kB
SwapTotal:       4096000 kB
SwapFree:        3096000 kB
";
        let info = parse_meminfo(content).unwrap();
        assert_eq!(info.mem_total, 16384000);
        assert_eq!(info.mem_available, 12000000);
        assert_eq!(info.cached, 2048000);
        assert_eq!(info.mem_used(), 4384000);
        assert_eq!(info.swap_used(), 1000000);

        assert!(parse_meminfo("Foo: 1 kB\n").is_err());
    }

    #[test]
    fn test_parse_loadavg() {
        let load = parse_loadavg("0.15 0.10 0.05 2/150 1234\n").unwrap();
        assert_eq!(load.load1, 0.15);
        assert_eq!(load.load5, 0.10);
        assert_eq!(load.load15, 0.05);
        assert_eq!(load.running, 2);
        assert_eq!(load.total, 150);

        assert!(parse_loadavg("0.15 0.10").is_err());
        assert!(parse_loadavg("x 0.10 0.05 1/2 3").is_err());
    }

    #[test]
    fn test_parse_cpuinfo() {
        let content = "\
processor\t: 0
model name\t: AMD Ryzen 7 5800X 8-Core Processor
cpu MHz\t\t: 3000.000
cpu cores\t: 8

processor\t: 1
model name\t: AMD Ryzen 7 5800X 8-Core Processor
cpu MHz\t\t: 4000.000
cpu cores\t: 8
";
        let info = parse_cpuinfo(content).unwrap();
        assert_eq!(info.model_name, "AMD Ryzen 7 5800X 8-Core Processor");
        assert_eq!(info.threads, 2);
        assert_eq!(info.cores, 8);
        assert_eq!(info.avg_mhz, 3500.0);
    }

    #[test]
    fn test_parse_cpuinfo_without_cores() {
        // ARM boards often omit model name and cpu cores
        let info = parse_cpuinfo("processor\t: 0\nBogoMIPS\t: 48.00\nprocessor\t: 1\n").unwrap();
        assert_eq!(info.threads, 2);
        assert_eq!(info.cores, 2);
        assert_eq!(info.avg_mhz, 0.0);

        assert!(parse_cpuinfo("").is_err());
    }

    #[test]
    fn test_parse_os_release() {
        let pretty = "NAME=\"Ubuntu\"\nVERSION=\"24.04 LTS\"\nPRETTY_NAME=\"Ubuntu 24.04 LTS\"\n";
        assert_eq!(parse_os_release(pretty).unwrap(), "Ubuntu 24.04 LTS");

        let plain = "NAME=Alpine\nVERSION=3.19\n";
        assert_eq!(parse_os_release(plain).unwrap(), "Alpine 3.19");

        assert!(parse_os_release("ID=foo\n").is_err());
    }

    #[test]
    fn test_parse_net_dev() {
        let content = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
  eth0: 98765432    54321    1    2    0     0          0         0 12345678    23456    0    0    0     0       0          0
";
        let devices = parse_net_dev(content).unwrap();
        assert_eq!(devices.len(), 2);

        let eth0 = &devices[1];
        assert_eq!(eth0.interface, "eth0");
        assert_eq!(eth0.rx_bytes, 98765432);
        assert_eq!(eth0.rx_packets, 54321);
        assert_eq!(eth0.tx_bytes, 12345678);
        assert_eq!(eth0.tx_packets, 23456);
    }

    #[test]
    fn test_parse_net_dev_truncated_line() {
        assert!(parse_net_dev("  eth0: 1 2 3\n").is_err());
    }

    #[test]
    fn test_parse_hex_socket_addr_v4() {
        let addr = parse_hex_socket_addr("0100007F:0035").unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:53");

        let any = parse_hex_socket_addr("00000000:0000").unwrap();
        assert_eq!(any.to_string(), "0.0.0.0:0");
    }

    #[test]
    fn test_parse_hex_socket_addr_v6() {
        let loopback = parse_hex_socket_addr("00000000000000000000000001000000:1F90").unwrap();
        assert_eq!(loopback.to_string(), "[::1]:8080");

        assert!(parse_hex_socket_addr("0100007F").is_err());
        assert!(parse_hex_socket_addr("01007F:0035").is_err());
        assert!(parse_hex_socket_addr("ZZZZZZZZ:0035").is_err());
    }

    #[test]
    fn test_parse_net_sockets_tcp() {
        let content = "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 0100007F:0277 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 22150 1 0000000000000000 100 0 0 10 0
   1: 0F02000A:A3C2 2E1E5B8E:01BB 01 00000000:00000000 02:0000041D 00000000  1000        0 98765 2 0000000000000000 20 4 30 10 -1
";
        let sockets = parse_net_sockets(content, SocketProto::Tcp).unwrap();
        assert_eq!(sockets.len(), 2);

        assert_eq!(sockets[0].local.to_string(), "127.0.0.1:631");
        assert_eq!(sockets[0].state, SocketState::Listen);
        assert_eq!(sockets[0].inode, 22150);

        assert_eq!(sockets[1].local.to_string(), "10.0.2.15:41922");
        assert_eq!(sockets[1].remote.to_string(), "142.91.30.46:443");
        assert_eq!(sockets[1].state, SocketState::Established);
        assert_eq!(sockets[1].uid, 1000);
    }

    #[test]
    fn test_parse_net_sockets_udp_unconn() {
        let content = "\
   sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode ref pointer drops
  345: 00000000:14E9 00000000:0000 07 00000000:00000000 00:00000000 00000000   104        0 19424 2 0000000000000000 0
";
        let sockets = parse_net_sockets(content, SocketProto::Udp).unwrap();
        assert_eq!(sockets[0].state, SocketState::Unconn);
        assert_eq!(sockets[0].state.name(), "UNCONN");
        assert_eq!(sockets[0].local.port(), 5353);
    }

    #[test]
    fn test_parse_net_sockets_header_only() {
        let content = "  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode\n";
        assert!(parse_net_sockets(content, SocketProto::Tcp6).unwrap().is_empty());
    }

    #[test]
    fn test_parse_socket_link() {
        assert_eq!(parse_socket_link("socket:[12345]"), Some(12345));
        assert_eq!(parse_socket_link("pipe:[12345]"), None);
        assert_eq!(parse_socket_link("/dev/null"), None);
        assert_eq!(parse_socket_link("socket:[abc]"), None);
    }

    #[test]
    fn test_parse_drm_fdinfo() {
        let content = "\
pos:\t0
flags:\t02100002
drm-driver:\tamdgpu
drm-client-id:\t42
drm-pdev:\t0000:03:00.0
drm-memory-vram:\t20480 KiB
drm-engine-gfx:\t1500000 ns
drm-engine-compute:\t999 ns
";
        let info = parse_drm_fdinfo(content).unwrap();
        assert_eq!(info.driver, "amdgpu");
        assert_eq!(info.client_id, Some(42));
        assert_eq!(info.engine_ns, 1500000);
        assert_eq!(info.vram_bytes, 20480 * 1024);
    }

    #[test]
    fn test_parse_drm_fdinfo_render_and_gfx_summed() {
        let content = "drm-driver:\ti915\ndrm-engine-render:\t100 ns\ndrm-engine-gfx:\t50 ns\n";
        assert_eq!(parse_drm_fdinfo(content).unwrap().engine_ns, 150);
    }

    #[test]
    fn test_parse_drm_fdinfo_not_drm() {
        assert!(parse_drm_fdinfo("pos:\t0\nflags:\t02\n").is_err());
    }

    #[test]
    fn test_parse_render_node_link() {
        assert_eq!(parse_render_node_link("/dev/dri/renderD128"), Some("renderD128"));
        assert_eq!(parse_render_node_link("/dev/dri/card0"), None);
        assert_eq!(parse_render_node_link("/dev/null"), None);
    }

    #[test]
    fn test_parse_dpm_sclk() {
        let content = "0: 500Mhz \n1: 1800Mhz *\n2: 2100Mhz \n";
        assert_eq!(parse_dpm_sclk(content).unwrap(), 1800);
        assert!(parse_dpm_sclk("0: 500Mhz \n1: 1800Mhz \n").is_err());
        assert!(parse_dpm_sclk("1800Mhz *\n").is_err());
        assert!(parse_dpm_sclk("").is_err());
    }

    #[test]
    fn test_parse_uevent() {
        let map = parse_uevent("DRIVER=amdgpu\nPCI_SLOT_NAME=0000:03:00.0\n");
        assert_eq!(map.get("DRIVER").map(String::as_str), Some("amdgpu"));
        assert_eq!(
            map.get("PCI_SLOT_NAME").map(String::as_str),
            Some("0000:03:00.0")
        );
    }
}
