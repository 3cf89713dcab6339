//! HAL trait definitions and implementations.
//!
//! This module defines the volume query contract and the process runner seam,
//! and provides both the real (LinuxHal) and fake (FakeHal) backends.

pub mod fake_hal;
pub mod linux_hal;
pub mod process_ops;
pub mod volume_ops;

pub use fake_hal::{FakeHal, Operation};
pub use linux_hal::LinuxHal;
pub use process_ops::{HostProcess, ProcessOps};
pub use volume_ops::VolumeOps;
