//! Process execution helpers.
//!
//! External commands are considered "world-touching" and go through this seam
//! so the udev query can be tested without spawning real processes.

use std::ffi::OsStr;
use std::io;
use std::process::{Command, Output, Stdio};
use volume_error::{ToolFailure, VolumeError, VolumeResult};

/// Process execution trait (external command runner).
pub trait ProcessOps {
    /// Runs `program` to completion and returns its captured output.
    ///
    /// A non-zero exit is not an error here; callers inspect `status`.
    fn command_output(&self, program: &str, args: &[&OsStr]) -> VolumeResult<Output>;
}

/// Runs commands on the host. Blocks until the child exits; no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProcess;

impl ProcessOps for HostProcess {
    fn command_output(&self, program: &str, args: &[&OsStr]) -> VolumeResult<Output> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| map_command_err(program, e))
    }
}

pub(crate) fn map_command_err(program: &str, err: io::Error) -> VolumeError {
    if err.kind() == io::ErrorKind::NotFound {
        return VolumeError::external_tool(program, ToolFailure::NotFound);
    }
    VolumeError::external_tool(program, ToolFailure::Spawn(err))
}
