//! Reading RAM that the DMA path only sees as ROM.
//!
//! The target is reprogrammed for one NMI: the routine from
//! [`super::routine`] is written into RAM, the RAM NMI vector is pointed at it
//! and CIA2 timer A is armed as a one-shot. After the machine has run for a
//! moment the marker byte tells whether the copy happened. Every byte touched
//! is saved first and written back afterwards, whatever the outcome.

use std::time::{Duration, Instant};

use super::routine::{self, ROUTINE_LEN};
use crate::config::{BypassLayout, BypassSettings};
use crate::error::{AcquisitionError, TransportError};
use crate::ultimate::DeviceControl;

pub const WINDOW_LEN: usize = 0x2000;

const CIA2_TIMER_A: u16 = 0xDD04;
const CIA2_ICR: u16 = 0xDD0D;
const CIA2_CRA: u16 = 0xDD0E;
/// Timer A underflows this many cycles after the machine resumes.
const TRIGGER_COUNT: u16 = 0x0010;
/// Set bit 7 plus timer A: enable the timer A interrupt.
const ICR_ENABLE_TIMER_A: u8 = 0x81;
/// Start, one-shot, force load.
const CRA_ONE_SHOT: u8 = 0x19;

/// Where the KERNAL NMI vector normally points.
const KERNAL_NMI_HANDLER: u16 = 0xFE47;

/// One of the two 8 KiB ROMs the DMA path cannot see past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomWindow {
    /// $A000-$BFFF, reachable by VIC bank 2.
    Basic,
    /// $E000-$FFFF, reachable by VIC bank 3.
    Kernal,
}

impl RomWindow {
    pub const ALL: [RomWindow; 2] = [RomWindow::Basic, RomWindow::Kernal];

    pub fn start(self) -> u16 {
        match self {
            Self::Basic => 0xA000,
            Self::Kernal => 0xE000,
        }
    }

    pub fn source_page(self) -> u8 {
        (self.start() >> 8) as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Kernal => "KERNAL",
        }
    }

    pub fn contains(self, address: u16, length: usize) -> bool {
        let start = self.start() as usize;
        let address = address as usize;
        address >= start && address + length <= start + WINDOW_LEN
    }

    pub fn overlaps(self, address: u16, length: usize) -> bool {
        let start = self.start() as usize;
        let address = address as usize;
        length > 0 && address < start + WINDOW_LEN && address + length > start
    }

    /// The window that holds the whole range, if any.
    pub fn containing(address: u16, length: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.contains(address, length))
    }

    /// The first window the range touches, if any.
    pub fn overlapping(address: u16, length: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.overlaps(address, length))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassPhase {
    Idle,
    Backup,
    Inject,
    Patch,
    Trigger,
    Waiting,
    Verify,
    Restore,
    Done,
    Failed,
}

/// How a bypass run ended when no transport error got in the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BypassOutcome {
    /// The 8 KiB of RAM under the window.
    Done(Vec<u8>),
    /// The routine never reported back; `marker` is what was found instead
    /// of the sentinel.
    Failed { marker: u8 },
}

/// What happened during one bypass run, for logging and the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassReport {
    pub window: RomWindow,
    /// Every phase entered, in order.
    pub phases: Vec<BypassPhase>,
    pub marker: Option<u8>,
    pub succeeded: bool,
    pub elapsed: Duration,
}

/// A saved range of target memory.
#[derive(Debug, Clone)]
struct SavedRange {
    address: u16,
    bytes: Vec<u8>,
}

/// Check that the ranges the bypass writes are sane and do not overlap.
pub fn validate_layout(layout: &BypassLayout) -> Result<(), AcquisitionError> {
    let zp = layout.zero_page_pointer;
    if zp < 0x02 || zp == 0xFF {
        return Err(AcquisitionError::Layout(format!(
            "zero-page pointer ${:02X} must leave $00/$01 alone and fit two bytes",
            zp
        )));
    }
    if layout.scratch_address & 0x00FF != 0 {
        return Err(AcquisitionError::Layout(format!(
            "scratch buffer ${:04X} is not page aligned",
            layout.scratch_address
        )));
    }
    // With BASIC and KERNAL banked out, $A000 and up is either a ROM window
    // or I/O, so the buffer has to end below it.
    if layout.scratch_address as usize + WINDOW_LEN > 0xA000 {
        return Err(AcquisitionError::Layout(format!(
            "scratch buffer ${:04X}-${:04X} must end at or below $A000",
            layout.scratch_address,
            layout.scratch_address as usize + WINDOW_LEN - 1
        )));
    }
    if layout.inject_address as usize + ROUTINE_LEN > 0xA000 {
        return Err(AcquisitionError::Layout(format!(
            "routine at ${:04X} must sit below $A000",
            layout.inject_address
        )));
    }

    let ranges = [
        ("routine", layout.inject_address as usize, ROUTINE_LEN),
        ("scratch buffer", layout.scratch_address as usize, WINDOW_LEN),
        ("zero-page pointer", zp as usize, 2),
        ("NMI vector", layout.nmi_vector as usize, 2),
        ("marker", layout.marker_address as usize, 1),
    ];
    for (i, &(name_a, start_a, len_a)) in ranges.iter().enumerate() {
        for &(name_b, start_b, len_b) in &ranges[i + 1..] {
            if start_a < start_b + len_b && start_b < start_a + len_a {
                return Err(AcquisitionError::Layout(format!(
                    "{} at ${:04X} overlaps {} at ${:04X}",
                    name_a, start_a, name_b, start_b
                )));
            }
        }
    }
    Ok(())
}

/// One run of the bypass against a frozen device. The device is frozen again
/// when [`RomBypass::run`] returns, unless the `Verify` freeze itself failed.
pub struct RomBypass<'a, D: DeviceControl> {
    device: &'a mut D,
    layout: BypassLayout,
    wait: Duration,
    phase: BypassPhase,
    phases: Vec<BypassPhase>,
    saved: Vec<SavedRange>,
    marker: Option<u8>,
}

impl<'a, D: DeviceControl> RomBypass<'a, D> {
    pub fn new(device: &'a mut D, settings: &BypassSettings) -> Self {
        Self {
            device,
            layout: settings.layout,
            wait: Duration::from_millis(settings.wait_ms),
            phase: BypassPhase::Idle,
            phases: vec![BypassPhase::Idle],
            saved: Vec::new(),
            marker: None,
        }
    }

    pub fn phase(&self) -> BypassPhase {
        self.phase
    }

    fn enter(&mut self, phase: BypassPhase) {
        log::debug!("ROM bypass: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phases.push(phase);
    }

    /// Fetch the RAM under `window`.
    ///
    /// A routine that never reports back is an `Ok(BypassOutcome::Failed)`.
    /// Transport errors are returned as errors, but only after every saved
    /// range has been written back.
    pub fn run(
        mut self,
        window: RomWindow,
    ) -> Result<(BypassOutcome, BypassReport), AcquisitionError> {
        validate_layout(&self.layout)?;
        let started = Instant::now();
        log::info!(
            "Fetching RAM under {} ROM (${:04X}) via NMI copy",
            window.name(),
            window.start()
        );

        self.enter(BypassPhase::Backup);
        self.backup()?;

        let result = self.execute(window);

        self.enter(BypassPhase::Restore);
        let restored = self.restore();

        let outcome = match (result, restored) {
            (Ok(outcome), Ok(())) => outcome,
            (Ok(_), Err(e)) => {
                self.enter(BypassPhase::Failed);
                return Err(AcquisitionError::Restore(e));
            }
            (Err(e), Ok(())) => {
                self.enter(BypassPhase::Failed);
                return Err(e.into());
            }
            (Err(e), Err(restore_error)) => {
                log::error!(
                    "ROM bypass restore failed after an earlier error: {}",
                    restore_error
                );
                self.enter(BypassPhase::Failed);
                return Err(e.into());
            }
        };

        let succeeded = matches!(outcome, BypassOutcome::Done(_));
        self.enter(if succeeded {
            BypassPhase::Done
        } else {
            BypassPhase::Failed
        });

        let report = BypassReport {
            window,
            phases: self.phases,
            marker: self.marker,
            succeeded,
            elapsed: started.elapsed(),
        };
        Ok((outcome, report))
    }

    /// NMI vector first so it is also the first thing restored.
    fn backup(&mut self) -> Result<(), TransportError> {
        let layout = self.layout;
        let ranges = [
            (layout.nmi_vector, 2),
            (layout.marker_address, 1),
            (layout.zero_page_pointer as u16, 2),
            (layout.inject_address, ROUTINE_LEN),
            (layout.scratch_address, WINDOW_LEN),
        ];
        for (address, length) in ranges {
            let bytes = self.read_exact(address, length)?;
            self.saved.push(SavedRange { address, bytes });
        }
        Ok(())
    }

    /// A read that must return exactly `length` bytes.
    fn read_exact(&mut self, address: u16, length: usize) -> Result<Vec<u8>, TransportError> {
        let bytes = self.device.read_memory(address, length)?;
        if bytes.len() != length {
            return Err(TransportError::ShortRead {
                address,
                expected: length,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }

    fn original_vector(&self) -> u16 {
        match self
            .saved
            .iter()
            .find(|r| r.address == self.layout.nmi_vector)
            .map(|r| r.bytes.as_slice())
        {
            Some(&[lo, hi, ..]) => u16::from_le_bytes([lo, hi]),
            _ => KERNAL_NMI_HANDLER,
        }
    }

    fn execute(&mut self, window: RomWindow) -> Result<BypassOutcome, TransportError> {
        let layout = self.layout;

        self.enter(BypassPhase::Inject);
        let code = routine::build(&layout, window.source_page(), self.original_vector());
        self.device.write_memory(layout.inject_address, &code)?;
        self.device
            .write_memory(layout.marker_address, &[!layout.sentinel])?;

        self.enter(BypassPhase::Patch);
        self.device
            .write_memory(layout.nmi_vector, &layout.inject_address.to_le_bytes())?;

        self.enter(BypassPhase::Trigger);
        self.device
            .write_memory(CIA2_TIMER_A, &TRIGGER_COUNT.to_le_bytes())?;
        self.device.write_memory(CIA2_ICR, &[ICR_ENABLE_TIMER_A])?;
        self.device.write_memory(CIA2_CRA, &[CRA_ONE_SHOT])?;

        self.enter(BypassPhase::Waiting);
        self.device.resume()?;
        std::thread::sleep(self.wait);

        self.enter(BypassPhase::Verify);
        self.device.freeze()?;
        let marker = self
            .device
            .read_memory(layout.marker_address, 1)?
            .first()
            .copied()
            .unwrap_or(!layout.sentinel);
        self.marker = Some(marker);

        if marker != layout.sentinel {
            log::warn!(
                "ROM bypass marker is ${:02X}, expected ${:02X}",
                marker,
                layout.sentinel
            );
            return Ok(BypassOutcome::Failed { marker });
        }

        let data = self.read_exact(layout.scratch_address, WINDOW_LEN)?;
        Ok(BypassOutcome::Done(data))
    }

    /// Write every saved range back. Keeps going past failures and reports
    /// the first one.
    fn restore(&mut self) -> Result<(), TransportError> {
        let mut first_error = None;
        for range in &self.saved {
            if let Err(e) = self.device.write_memory(range.address, &range.bytes) {
                log::error!("Could not restore ${:04X}: {}", range.address, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
