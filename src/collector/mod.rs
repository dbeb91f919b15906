//! Data providers for Linux.
//!
//! Every provider reads through the [`FileSystem`] trait, so the same code
//! runs against the real `/proc` and `/sys` trees or against a [`MockFs`]
//! scenario in tests.
//!
//! ```text
//!   ProcessCollector   GpuCollector   ConnectionCollector   SystemCollector
//!   (CPU/MEM/DISK)     (GPU)          (NET)                 (info panels)
//!          \               |                 |                    /
//!           └──────────────┴───── FileSystem ┴───────────────────┘
//!                                   /      \
//!                               RealFs    MockFs
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use traits::{FileSystem, RealFs};
