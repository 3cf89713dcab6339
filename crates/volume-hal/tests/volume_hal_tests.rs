use std::fs;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;
use volume_hal::{
    FakeHal, FilesystemAttrs, HalConfig, LinuxHal, ToolFailure, VolumeError, VolumeOps,
};

fn block_devices() -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir("/dev") else {
        return Vec::new();
    };
    entries
        .flatten()
        .filter(|entry| {
            entry
                .file_type()
                .map(|t| t.is_block_device())
                .unwrap_or(false)
        })
        .map(|entry| entry.path())
        .collect()
}

fn first_block_device() -> Option<PathBuf> {
    block_devices().into_iter().next()
}

#[test]
fn block_device_on_host_is_classified_and_sized() -> anyhow::Result<()> {
    let Some(device) = first_block_device() else {
        return Ok(());
    };
    let hal = LinuxHal::new();
    assert!(hal.is_block(&device)?);

    let size = match hal.block_capacity_bytes(&device) {
        Ok(size) => size,
        // Unprivileged runs or detached devices may refuse the open.
        Err(VolumeError::Open { .. }) => return Ok(()),
        Err(other) => return Err(other.into()),
    };
    assert!(size >= 0);

    let name = device.file_name().unwrap();
    let sysfs_size = Path::new("/sys/class/block").join(name).join("size");
    if let Ok(sectors) = fs::read_to_string(sysfs_size) {
        let sectors: i64 = sectors.trim().parse()?;
        assert_eq!(size, sectors * 512);
    }
    Ok(())
}

#[test]
fn openable_block_devices_always_answer_size_request() {
    let hal = LinuxHal::new();
    for device in block_devices() {
        // Only an unopenable node may fail; once open, the ioctl must be accepted.
        if fs::File::open(&device).is_err() {
            continue;
        }
        match hal.block_capacity_bytes(&device) {
            Ok(size) => assert!(size >= 0, "{}: negative size {}", device.display(), size),
            Err(VolumeError::Open { .. }) => {}
            Err(err) => panic!("{}: {}", device.display(), err),
        }
    }
}

#[test]
fn capacity_errors_distinguish_open_from_query() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let hal = LinuxHal::new();

    let missing = hal.block_capacity_bytes(&tmp.path().join("missing"));
    assert!(matches!(missing, Err(VolumeError::Open { .. })));

    let image = tmp.path().join("disk.img");
    fs::write(&image, vec![0u8; 1 << 16])?;
    let regular = hal.block_capacity_bytes(&image);
    assert!(matches!(regular, Err(VolumeError::Query { .. })));
    Ok(())
}

#[test]
fn is_block_rejects_non_devices_and_reports_lookup_failures() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let hal = LinuxHal::new();
    let file = tmp.path().join("file");
    let link = tmp.path().join("link");
    fs::write(&file, b"x")?;
    std::os::unix::fs::symlink(&file, &link)?;

    assert!(!hal.is_block(&file)?);
    assert!(!hal.is_block(tmp.path())?);
    assert!(!hal.is_block(&link)?);
    assert!(matches!(
        hal.is_block(&tmp.path().join("missing")),
        Err(VolumeError::Lookup { .. })
    ));
    Ok(())
}

#[test]
fn fake_udevadm_output_yields_attrs() -> anyhow::Result<()> {
    let hal = LinuxHal::with_runner(HalConfig::new(), FakeHal::new());
    hal.runner().push_output(
        "ID_FS_UUID=11111111-2222-3333-4444-555555555555\nID_FS_LABEL=mydata\n",
        0,
    );

    let attrs = hal.filesystem_attrs(Path::new("/dev/sdc1"))?;
    assert_eq!(
        attrs,
        FilesystemAttrs {
            uuid: "11111111-2222-3333-4444-555555555555".to_string(),
            label: "mydata".to_string(),
        }
    );
    Ok(())
}

#[test]
fn fake_udevadm_failure_is_external_tool_error() {
    let hal = LinuxHal::with_runner(HalConfig::new(), FakeHal::new());
    hal.runner().push_output("", 1);

    let err = hal.filesystem_attrs(Path::new("/dev/sdc1")).unwrap_err();
    assert!(matches!(
        err,
        VolumeError::ExternalTool {
            cause: ToolFailure::Exit { code: Some(1), .. },
            ..
        }
    ));
}

#[test]
fn real_process_exit_status_is_checked() {
    let hal = LinuxHal::with_config(HalConfig::new().with_udevadm("false"));
    let err = hal.filesystem_attrs(Path::new("/dev/sda1")).unwrap_err();
    assert!(matches!(
        err,
        VolumeError::ExternalTool {
            cause: ToolFailure::Exit { .. },
            ..
        }
    ));
}

#[test]
fn real_process_with_empty_output_yields_empty_attrs() -> anyhow::Result<()> {
    let hal = LinuxHal::with_config(HalConfig::new().with_udevadm("true"));
    let attrs = hal.filesystem_attrs(Path::new("/dev/sda1"))?;
    assert_eq!(attrs, FilesystemAttrs::default());
    Ok(())
}

#[test]
fn real_process_output_is_parsed_strictly() {
    // `echo` prints its arguments: "info -q property /dev/sda1", which has no '='.
    let hal = LinuxHal::with_config(HalConfig::new().with_udevadm("echo"));
    let err = hal.filesystem_attrs(Path::new("/dev/sda1")).unwrap_err();
    match err {
        VolumeError::Parse { line_no, line } => {
            assert_eq!(line_no, 1);
            assert_eq!(line, "info -q property /dev/sda1");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn missing_udevadm_is_external_tool_error() {
    let hal = LinuxHal::with_config(HalConfig::new().with_udevadm("/nonexistent/udevadm"));
    let err = hal.filesystem_attrs(Path::new("/dev/sda1")).unwrap_err();
    assert!(matches!(
        err,
        VolumeError::ExternalTool {
            cause: ToolFailure::NotFound,
            ..
        }
    ));
}

#[test]
fn queries_run_concurrently_on_shared_hal() {
    let hal = Arc::new(LinuxHal::with_runner(HalConfig::new(), FakeHal::new()));
    for _ in 0..8 {
        hal.runner().push_output("ID_FS_UUID=u\nID_FS_LABEL=l\n", 0);
    }

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let hal = Arc::clone(&hal);
            thread::spawn(move || {
                let device = PathBuf::from(format!("/dev/vd{}", (b'a' + i) as char));
                hal.filesystem_attrs(&device).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let attrs = handle.join().unwrap();
        assert_eq!(attrs.uuid, "u");
        assert_eq!(attrs.label, "l");
    }
    assert_eq!(hal.runner().operation_count(), 8);
}
