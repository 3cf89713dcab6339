//! Volume HAL: block device introspection for Linux.
//!
//! Three independent, stateless queries behind the [`VolumeOps`] contract:
//! device capacity (`BLKGETSIZE64`), block-special classification (`stat`),
//! and filesystem identity (UUID, label) as reported by `udevadm`.

pub mod blockdev;
pub mod config;
pub mod hal;
pub mod udev;

pub use config::HalConfig;
pub use hal::{FakeHal, HostProcess, LinuxHal, Operation, ProcessOps, VolumeOps};
pub use udev::properties::{parse_udev_properties, FilesystemAttrs};
pub use volume_error::{ToolFailure, VolumeError, VolumeResult};
