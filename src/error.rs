use thiserror::Error;

/// A request against the device control surface failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{operation} request failed: {source}")]
    Http {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} rejected by device (HTTP {status})")]
    Status { operation: &'static str, status: u16 },
    #[error("short read at ${address:04X}: wanted {expected} bytes, got {actual}")]
    ShortRead {
        address: u16,
        expected: usize,
        actual: usize,
    },
    #[error("range ${address:04X}+{length} runs past the end of the address space")]
    OutOfRange { address: u16, length: usize },
}

/// Fatal acquisition failures. The device has been resumed (and any bypass
/// patch undone) by the time one of these reaches the caller.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("could not freeze the machine: {0}")]
    Freeze(#[source] TransportError),
    #[error("could not resume the machine: {0}")]
    Resume(#[source] TransportError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("ROM bypass restore failed, target memory may be left patched: {0}")]
    Restore(#[source] TransportError),
    #[error("invalid bypass layout: {0}")]
    Layout(String),
    #[error(transparent)]
    Malformed(#[from] MalformedInput),
}

/// A memory block or register file is shorter than the fixed size the
/// decoder/renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{block} is {actual} bytes, need at least {expected}")]
pub struct MalformedInput {
    pub block: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl MalformedInput {
    pub fn check(block: &'static str, data: &[u8], expected: usize) -> Result<(), Self> {
        if data.len() < expected {
            return Err(Self {
                block,
                expected,
                actual: data.len(),
            });
        }
        Ok(())
    }
}

/// Recoverable conditions collected during one capture. None of these abort
/// the capture, but each means part of the image may not match the screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureWarning {
    #[error(
        "ROM bypass for the 8 KiB window at ${window_start:04X} did not complete (marker ${marker:02X}); graphics there may show ROM contents"
    )]
    BypassVerificationFailed { window_start: u16, marker: u8 },
    #[error("{what} at ${address:04X} overlaps ROM; the read returned firmware, not RAM")]
    RomShadowed { what: &'static str, address: u16 },
    #[error("character memory points at the character ROM image; using the built-in PETSCII set")]
    CharacterRomSubstituted,
    #[error("sprite {index} at ({x},{y}) is entirely outside the visible screen; skipped")]
    SpriteOutOfRange { index: usize, x: u16, y: u8 },
    #[error("sprite {index} is enabled but its data was not fetched; skipped")]
    SpriteDataMissing { index: usize },
}
