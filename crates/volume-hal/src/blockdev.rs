//! Raw block device queries: capacity via `BLKGETSIZE64`, type via `stat(2)`.
//!
//! This is the only place in the workspace that issues an ioctl.

use nix::errno::Errno;
use nix::sys::stat::{self, SFlag};
use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::Path;
use volume_error::{VolumeError, VolumeResult};

mod sys {
    // Declared by the kernel as _IOR(0x12, 114, size_t) but always writes a u64.
    nix::ioctl_read_bad!(
        blk_getsize64,
        nix::request_code_read!(0x12, 114, std::mem::size_of::<usize>()),
        u64
    );
}

/// Returns the size in bytes of the block device at `path`.
///
/// The device is opened read-only for the duration of the call; the handle is
/// closed on every return path. Paths that open fine but do not answer the
/// size request (regular files, directories, character devices) fail with
/// [`VolumeError::Query`].
pub fn block_capacity_bytes(path: &Path) -> VolumeResult<i64> {
    let file = File::open(path).map_err(|source| VolumeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let query_failed = |source: Errno| VolumeError::Query {
        path: path.to_path_buf(),
        source,
    };

    let mut size: u64 = 0;
    // SAFETY: `file` owns the descriptor until the end of this function and
    // `size` is a live u64 for the kernel to write into.
    unsafe { sys::blk_getsize64(file.as_raw_fd(), &mut size) }.map_err(query_failed)?;

    i64::try_from(size).map_err(|_| query_failed(Errno::EOVERFLOW))
}

/// Reports whether `path` (after following symlinks) is a block special file.
pub fn is_block_device(path: &Path) -> VolumeResult<bool> {
    let st = stat::stat(path).map_err(|source| VolumeError::Lookup {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(st.st_mode & SFlag::S_IFMT.bits() == SFlag::S_IFBLK.bits())
}
