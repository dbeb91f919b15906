use std::cmp::Ordering;

use crate::collector::procfs::Connection;
use crate::collector::procfs::parser::SocketState;
use crate::tui::table::TableRow;

/// One socket in the NET tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetRow {
    pub conn: Connection,
}

impl NetRow {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// ESTABLISHED above LISTEN above everything else.
    pub fn priority(&self) -> u8 {
        match self.conn.state {
            SocketState::Established => 2,
            SocketState::Listen => 1,
            _ => 0,
        }
    }

    pub fn compare(a: &Self, b: &Self) -> Ordering {
        b.priority().cmp(&a.priority())
    }
}

impl TableRow for NetRow {
    fn headers() -> &'static [&'static str] {
        &["PID", "NAME", "PROTO", "LOCAL", "REMOTE", "STATE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.conn.pid.to_string(),
            self.conn.name.clone(),
            self.conn.proto.name().to_string(),
            self.conn.local.to_string(),
            self.conn.remote.to_string(),
            self.conn.state.name().to_string(),
        ]
    }
}
