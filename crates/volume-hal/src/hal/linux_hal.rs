//! Linux HAL implementation using real system calls.

use super::{HostProcess, ProcessOps, VolumeOps};
use crate::blockdev;
use crate::udev::properties::{parse_udev_properties, FilesystemAttrs};
use crate::HalConfig;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Output;
use volume_error::{ToolFailure, VolumeError, VolumeResult};

/// Real HAL implementation for Linux systems.
///
/// Holds only immutable configuration and a process runner, so one instance
/// can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct LinuxHal<P = HostProcess> {
    config: HalConfig,
    runner: P,
}

impl LinuxHal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HalConfig) -> Self {
        Self::with_runner(config, HostProcess)
    }
}

impl<P: ProcessOps> LinuxHal<P> {
    pub fn with_runner(config: HalConfig, runner: P) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &HalConfig {
        &self.config
    }

    pub fn runner(&self) -> &P {
        &self.runner
    }
}

fn output_failed(program: &str, output: &Output) -> VolumeError {
    VolumeError::external_tool(
        program,
        ToolFailure::Exit {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        },
    )
}

impl<P: ProcessOps> VolumeOps for LinuxHal<P> {
    fn block_capacity_bytes(&self, device: &Path) -> VolumeResult<i64> {
        blockdev::block_capacity_bytes(device)
            .inspect_err(|e| log::debug!("capacity query failed: {}", e))
    }

    fn is_block(&self, path: &Path) -> VolumeResult<bool> {
        blockdev::is_block_device(path).inspect_err(|e| log::debug!("type query failed: {}", e))
    }

    fn filesystem_attrs(&self, device: &Path) -> VolumeResult<FilesystemAttrs> {
        let program = self.config.udevadm.as_str();
        let args = [
            OsStr::new("info"),
            OsStr::new("-q"),
            OsStr::new("property"),
            device.as_os_str(),
        ];
        log::debug!("{} info -q property {}", program, device.display());

        let output = self.runner.command_output(program, &args)?;
        if !output.status.success() {
            return Err(output_failed(program, &output));
        }

        // Unused properties may carry arbitrary bytes (e.g. ID_MODEL).
        let stdout = String::from_utf8_lossy(&output.stdout);
        let properties = parse_udev_properties(&stdout)?;
        Ok(FilesystemAttrs::from_properties(&properties))
    }
}
