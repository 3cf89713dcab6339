//! Fake HAL implementation for testing.
//!
//! Records every external command without executing it and replays scripted
//! responses, allowing udev queries to be tested without `udevadm` or real
//! hardware.

use super::process_ops::{map_command_err, ProcessOps};
use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use volume_error::VolumeResult;

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Command { program: String, args: Vec<OsString> },
}

#[derive(Debug)]
enum Response {
    Output {
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        exit_code: i32,
    },
    SpawnError(io::ErrorKind),
}

#[derive(Debug, Default)]
struct FakeHalState {
    operations: Vec<Operation>,
    responses: VecDeque<Response>,
}

/// Fake process runner that records commands and replays scripted output.
///
/// Responses are consumed in order, one per command. With nothing scripted a
/// command succeeds with empty output.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given stdout and exit code.
    pub fn push_output(&self, stdout: impl Into<Vec<u8>>, exit_code: i32) {
        self.push_output_with_stderr(stdout, Vec::new(), exit_code);
    }

    pub fn push_output_with_stderr(
        &self,
        stdout: impl Into<Vec<u8>>,
        stderr: impl Into<Vec<u8>>,
        exit_code: i32,
    ) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Response::Output {
                stdout: stdout.into(),
                stderr: stderr.into(),
                exit_code,
            });
    }

    /// Queue a failure to start the process.
    pub fn push_spawn_error(&self, kind: io::ErrorKind) {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Response::SpawnError(kind));
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }
}

fn exit_status(code: i32) -> ExitStatus {
    // Wait status layout: exit code in the second byte.
    ExitStatus::from_raw((code & 0xff) << 8)
}

impl ProcessOps for FakeHal {
    fn command_output(&self, program: &str, args: &[&OsStr]) -> VolumeResult<Output> {
        let mut state = self.state.lock().unwrap();
        log::info!("FAKE HAL: {} {:?}", program, args);
        state.operations.push(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_os_string()).collect(),
        });

        match state.responses.pop_front() {
            Some(Response::Output {
                stdout,
                stderr,
                exit_code,
            }) => Ok(Output {
                status: exit_status(exit_code),
                stdout,
                stderr,
            }),
            Some(Response::SpawnError(kind)) => {
                Err(map_command_err(program, io::Error::from(kind)))
            }
            None => Ok(Output {
                status: exit_status(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            }),
        }
    }
}
