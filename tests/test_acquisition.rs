mod common;

use common::{Call, SimDevice};
use vicsnap::config::BypassLayout;
use vicsnap::error::TransportError;
use vicsnap::{AcquisitionError, BypassSettings, CaptureOptions, acquire};

fn text_device() -> SimDevice {
    let mut dev = SimDevice::new();
    dev.vic(0x11, 0x1B).vic(0x16, 0x08).vic(0x18, 0x14);
    dev
}

fn quick() -> BypassSettings {
    BypassSettings {
        wait_ms: 0,
        ..Default::default()
    }
}

#[test]
fn test_freeze_failure_aborts_without_resume() {
    let mut dev = text_device();
    dev.fail_freeze_at = Some(0);

    let err = acquire(&mut dev, &CaptureOptions::default(), &quick()).unwrap_err();

    assert!(matches!(err, AcquisitionError::Freeze(_)), "{:?}", err);
    assert_eq!(dev.calls, vec![Call::Freeze]);
}

#[test]
fn test_read_failure_still_resumes() {
    let mut dev = text_device();
    dev.fail_read_address = Some(0xD800);

    let err = acquire(&mut dev, &CaptureOptions::default(), &quick()).unwrap_err();

    assert!(
        matches!(
            err,
            AcquisitionError::Transport(TransportError::Status {
                operation: "readmem",
                ..
            })
        ),
        "{:?}",
        err
    );
    assert_eq!(dev.calls.last(), Some(&Call::Resume));
    assert!(!dev.frozen);
}

#[test]
fn test_resume_failure_after_good_capture() {
    let mut dev = text_device();
    dev.fail_resume = true;

    let err = acquire(&mut dev, &CaptureOptions::default(), &quick()).unwrap_err();

    assert!(matches!(err, AcquisitionError::Resume(_)), "{:?}", err);
}

#[test]
fn test_capture_error_wins_over_resume_error() {
    let mut dev = text_device();
    dev.fail_read_address = Some(0xD000);
    dev.fail_resume = true;

    let err = acquire(&mut dev, &CaptureOptions::default(), &quick()).unwrap_err();

    assert!(matches!(err, AcquisitionError::Transport(_)), "{:?}", err);
    assert_eq!(dev.calls.last(), Some(&Call::Resume));
}

#[test]
fn test_bad_layout_is_rejected_before_touching_memory() {
    let mut dev = text_device();
    dev.ram[0xDD00] = 0x94; // bank 3
    dev.vic(0x11, 0x3B).vic(0x18, 0x38); // bitmap at $E000
    let settings = BypassSettings {
        wait_ms: 0,
        layout: BypassLayout {
            scratch_address: 0x9000,
            ..Default::default()
        },
    };

    let err = acquire(&mut dev, &CaptureOptions::default(), &settings).unwrap_err();

    assert!(matches!(err, AcquisitionError::Layout(_)), "{:?}", err);
    assert!(dev.writes().is_empty());
    assert!(!dev.frozen);
}

#[test]
fn test_read_order_and_sizes() {
    let mut dev = text_device();
    dev.ram[0xDD00] = 0x96; // bank 1: RAM charset at $5000
    dev.vic(0x15, 0x02);
    dev.ram[0x47F9] = 0x20; // sprite 1 at $4800

    let snapshot = acquire(&mut dev, &CaptureOptions::default(), &quick()).unwrap();

    assert_eq!(
        dev.calls,
        vec![
            Call::Freeze,
            Call::Read(0xD000, 0x30),
            Call::Read(0xDD00, 1),
            Call::Read(0xD800, 1000),
            Call::Read(0x4400, 0x400),
            Call::Read(0x4800, 64),
            Call::Read(0x5000, 0x800),
            Call::Resume,
        ]
    );
    assert_eq!(snapshot.registers.len(), 0x30);
    assert_eq!(snapshot.bank_register, 0x96);
    assert!(snapshot.blocks.sprite_patterns[1].is_some());
    assert!(snapshot.blocks.sprite_patterns[0].is_none());
}
