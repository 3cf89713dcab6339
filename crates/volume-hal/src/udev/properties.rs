//! Parsing helpers for `udevadm info -q property` output.

use std::collections::HashMap;
use volume_error::{VolumeError, VolumeResult};

pub const ID_FS_UUID: &str = "ID_FS_UUID";
pub const ID_FS_LABEL: &str = "ID_FS_LABEL";

/// Filesystem identity reported by udev. Missing keys are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesystemAttrs {
    pub uuid: String,
    pub label: String,
}

impl FilesystemAttrs {
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let get = |key: &str| properties.get(key).cloned().unwrap_or_default();
        Self {
            uuid: get(ID_FS_UUID),
            label: get(ID_FS_LABEL),
        }
    }
}

/// Parses newline separated `KEY=VALUE` lines into a map.
///
/// Empty lines are skipped and a repeated key keeps its last value. Every
/// other line must contain exactly one `=`; anything else fails the whole
/// parse, including values that themselves contain `=`.
pub fn parse_udev_properties(data: &str) -> VolumeResult<HashMap<String, String>> {
    let mut res = HashMap::new();
    for (idx, line) in data.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                res.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(VolumeError::Parse {
                    line_no: idx + 1,
                    line: line.to_string(),
                })
            }
        }
    }
    log::trace!("parsed {} udev properties", res.len());
    Ok(res)
}
