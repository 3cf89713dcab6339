//! Volume query contract.

use crate::FilesystemAttrs;
use std::path::Path;
use volume_error::VolumeResult;

/// Block device introspection queries.
///
/// Every call is independent: no state is kept between calls and any handle
/// or child process acquired by a call is released before it returns.
pub trait VolumeOps {
    /// Size of the block device in bytes.
    ///
    /// # Arguments
    /// * `device` - Block device path (e.g., `/dev/sda`)
    fn block_capacity_bytes(&self, device: &Path) -> VolumeResult<i64>;

    /// Whether `path` is a block special file (symlinks are followed).
    fn is_block(&self, path: &Path) -> VolumeResult<bool>;

    /// Filesystem UUID and label for a device, as reported by udev.
    ///
    /// # Arguments
    /// * `device` - Device path (e.g., `/dev/sda1`)
    fn filesystem_attrs(&self, device: &Path) -> VolumeResult<FilesystemAttrs>;
}
