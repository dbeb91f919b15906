//! Providers reading the Linux `/proc` and `/sys` filesystems.

pub mod block;
pub mod gpu;
pub mod net;
pub mod parser;
pub mod process;
pub mod system;

pub use block::{BlockDevice, BlockDeviceCollector};
pub use gpu::{DrmCard, DrmCardCollector, GpuClient, GpuCollector, GpuCounters};
pub use net::{Connection, ConnectionCollector, InterfaceCollector, InterfaceSample};
pub use process::{CpuCounters, DiskCounters, MemCounters, ProcessCollector, ProcessIdentity};
pub use system::{SourcePaths, SystemCollector};
