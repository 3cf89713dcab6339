use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type VolumeResult<T> = Result<T, VolumeError>;

#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Block size query failed for {}: {source}", .path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: nix::errno::Errno,
    },

    #[error("Failed to stat {}: {source}", .path.display())]
    Lookup {
        path: PathBuf,
        #[source]
        source: nix::errno::Errno,
    },

    #[error("External tool {program} failed: {cause}")]
    ExternalTool {
        program: String,
        #[source]
        cause: ToolFailure,
    },

    #[error(
        "Error parsing udev property data at line {line_no}, expected format <name>=<value>: {line:?}"
    )]
    Parse { line_no: usize, line: String },
}

/// Why an external command did not yield usable output.
#[derive(Error, Debug)]
pub enum ToolFailure {
    #[error("command not found")]
    NotFound,

    #[error("failed to spawn: {0}")]
    Spawn(#[source] io::Error),

    #[error("exit={code:?}: {stderr}")]
    Exit { code: Option<i32>, stderr: String },
}

impl VolumeError {
    pub fn external_tool(program: impl Into<String>, cause: ToolFailure) -> Self {
        VolumeError::ExternalTool {
            program: program.into(),
            cause,
        }
    }
}
