//! Network connections and interface counters.
//!
//! Connections come from the `/proc/net/{tcp,tcp6,udp,udp6}` socket tables
//! and are keyed by socket inode. The owning process is found by scanning
//! `/proc/[pid]/fd` for `socket:[inode]` links; sockets no process holds
//! (e.g. TIME_WAIT) are not listed.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::debug;

use crate::collector::procfs::parser::{
    SocketProto, SocketState, parse_net_dev, parse_net_sockets, parse_socket_link,
};
use crate::collector::procfs::process::{list_pids, read_uptime_ms};
use crate::collector::traits::FileSystem;
use crate::provider::{EntityProvider, ProviderError};

/// One socket with its owning process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub pid: u32,
    pub name: String,
    pub proto: SocketProto,
    pub local: SocketAddr,
    pub remote: SocketAddr,
    pub state: SocketState,
}

/// Lists connections owned by processes.
pub struct ConnectionCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
}

impl<F: FileSystem> ConnectionCollector<F> {
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Maps socket inodes to the first (lowest) pid holding them.
    fn socket_owners(&self) -> Result<HashMap<u64, u32>, ProviderError> {
        let mut owners = HashMap::new();
        for pid in list_pids(&self.fs, &self.proc_path)? {
            let fd_dir = self.proc_path.join(pid.to_string()).join("fd");
            // Permission denied or process gone.
            let Ok(fds) = self.fs.read_dir(&fd_dir) else {
                continue;
            };
            for fd in fds {
                let inode = self
                    .fs
                    .read_link(&fd)
                    .ok()
                    .and_then(|t| t.to_str().and_then(parse_socket_link));
                if let Some(inode) = inode {
                    owners.entry(inode).or_insert(pid);
                }
            }
        }
        Ok(owners)
    }

    fn process_name(&self, pid: u32) -> String {
        self.fs
            .read_to_string(&self.proc_path.join(pid.to_string()).join("comm"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

impl<F: FileSystem> EntityProvider<u64, Connection> for ConnectionCollector<F> {
    fn list(&mut self) -> Result<Vec<(u64, Connection)>, ProviderError> {
        let owners = self.socket_owners()?;
        let mut names: HashMap<u32, String> = HashMap::new();
        let mut connections = Vec::new();
        let mut tables_read = 0;

        for proto in SocketProto::all() {
            let path = self.proc_path.join("net").join(proto.file_name());
            let content = match self.fs.read_to_string(&path) {
                Ok(c) => c,
                // IPv6 may be disabled.
                Err(e) => {
                    debug!(table = proto.file_name(), error = %e, "socket table unavailable");
                    continue;
                }
            };
            tables_read += 1;

            for socket in parse_net_sockets(&content, *proto)? {
                let Some(&pid) = owners.get(&socket.inode) else {
                    continue;
                };
                let name = names
                    .entry(pid)
                    .or_insert_with(|| self.process_name(pid))
                    .clone();
                connections.push((
                    socket.inode,
                    Connection {
                        pid,
                        name,
                        proto: socket.proto,
                        local: socket.local,
                        remote: socket.remote,
                        state: socket.state,
                    },
                ));
            }
        }

        if tables_read == 0 {
            return Err(ProviderError::Unavailable("no socket tables".to_string()));
        }
        Ok(connections)
    }
}

/// Interface counters with the time they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSample {
    /// From `/sys/class/net/<if>/address`, empty when unreadable.
    pub mac: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    /// Milliseconds since boot.
    pub timestamp: u64,
}

/// Lists network interfaces from `/proc/net/dev`, skipping loopback.
pub struct InterfaceCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    sys_path: PathBuf,
}

impl<F: FileSystem> InterfaceCollector<F> {
    pub fn new(fs: F, proc_path: impl Into<PathBuf>, sys_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            sys_path: sys_path.into(),
        }
    }

    fn mac_address(&self, interface: &str) -> String {
        let path = self.sys_path.join("class/net").join(interface).join("address");
        self.fs
            .read_to_string(&path)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

impl<F: FileSystem> EntityProvider<String, InterfaceSample> for InterfaceCollector<F> {
    fn list(&mut self) -> Result<Vec<(String, InterfaceSample)>, ProviderError> {
        let timestamp = read_uptime_ms(&self.fs, &self.proc_path)?;
        let content = self.fs.read_to_string(&self.proc_path.join("net/dev"))?;
        Ok(parse_net_dev(&content)?
            .into_iter()
            .filter(|dev| dev.interface != "lo")
            .map(|dev| {
                let mac = self.mac_address(&dev.interface);
                (
                    dev.interface,
                    InterfaceSample {
                        mac,
                        rx_bytes: dev.rx_bytes,
                        tx_bytes: dev.tx_bytes,
                        timestamp,
                    },
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    const TCP: &str = "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000:0016 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 1001 1 0000000000000000 100 0 0 10 0
   1: 0F02000A:A3C2 2E1E5B8E:01BB 01 00000000:00000000 02:0000041D 00000000  1000        0 2002 2 0000000000000000 20 4 30 10 -1
   2: 0F02000A:A3C4 2E1E5B8E:01BB 06 00000000:00000000 03:00000000 00000000     0        0 0 3 0000000000000000
";

    fn fixture() -> MockFs {
        let mut fs = MockFs::new();
        fs.add_file("/proc/net/tcp", TCP);
        fs.add_file("/proc/22/comm", "sshd\n");
        fs.add_link("/proc/22/fd/3", "socket:[1001]");
        fs.add_file("/proc/900/comm", "curl\n");
        fs.add_link("/proc/900/fd/0", "/dev/pts/1");
        fs.add_link("/proc/900/fd/5", "socket:[2002]");
        // shared with a child after fork
        fs.add_file("/proc/901/comm", "curl-child\n");
        fs.add_link("/proc/901/fd/5", "socket:[2002]");
        fs
    }

    #[test]
    fn test_connections_joined_to_owners() {
        let mut collector = ConnectionCollector::new(fixture(), "/proc");
        let conns = collector.list().unwrap();

        assert_eq!(conns.len(), 2);
        let (inode, listen) = &conns[0];
        assert_eq!(*inode, 1001);
        assert_eq!(listen.pid, 22);
        assert_eq!(listen.name, "sshd");
        assert_eq!(listen.state, SocketState::Listen);
        assert_eq!(listen.local.port(), 22);

        let (_, established) = &conns[1];
        assert_eq!(established.pid, 900);
        assert_eq!(established.name, "curl");
        assert_eq!(established.remote.to_string(), "142.91.30.46:443");
    }

    #[test]
    fn test_connections_without_tables() {
        let mut fs = MockFs::new();
        fs.add_dir("/proc/1");
        let mut collector = ConnectionCollector::new(fs, "/proc");
        assert!(matches!(
            collector.list(),
            Err(ProviderError::Unavailable(_))
        ));
    }

    #[test]
    fn test_interfaces_skip_loopback() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "10.25 1.00\n");
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  500 5 0 0 0 0 0 0  500 5 0 0 0 0 0 0
  eth0: 1000 10 0 0 0 0 0 0 2000 20 0 0 0 0 0 0
",
        );
        fs.add_file("/sys/class/net/eth0/address", "52:54:00:12:34:56\n");
        let mut collector = InterfaceCollector::new(fs, "/proc", "/sys");
        let ifaces = collector.list().unwrap();

        assert_eq!(ifaces.len(), 1);
        assert_eq!(ifaces[0].0, "eth0");
        assert_eq!(
            ifaces[0].1,
            InterfaceSample {
                mac: "52:54:00:12:34:56".to_string(),
                rx_bytes: 1000,
                tx_bytes: 2000,
                timestamp: 10_250,
            }
        );
    }
}
