//! One freeze..resume bracket against the device: read the VIC-II state and
//! every memory block the renderer needs.

pub mod bypass;
pub mod routine;

use crate::config::{BypassSettings, CaptureOptions};
use crate::error::{AcquisitionError, CaptureWarning, MalformedInput};
use crate::snapshot::{
    BITMAP_LEN, CHARSET_LEN, MemoryBlocks, SCREEN_CELLS, SCREEN_FETCH_LEN, SPRITE_BLOCK_LEN,
    Snapshot,
};
use crate::ultimate::DeviceControl;
use crate::vic::registers::{CIA2_PORT_A, COLOR_RAM, VIC_BASE, VIC_REGISTER_COUNT};
use crate::vic::{CHARACTER_ROM, GraphicsMode, GraphicsState, decode};
use bypass::{BypassOutcome, BypassReport, RomBypass, RomWindow};

/// RAM fetched from under a ROM window by the bypass.
struct WindowCopy {
    window: RomWindow,
    data: Vec<u8>,
}

impl WindowCopy {
    fn slice(&self, address: u16, length: usize) -> Option<&[u8]> {
        if !self.window.contains(address, length) {
            return None;
        }
        let start = (address - self.window.start()) as usize;
        self.data.get(start..start + length)
    }
}

/// Freeze the machine, read everything needed to render the current frame and
/// resume it.
///
/// The machine is resumed on every path that got past the freeze. A capture
/// that succeeded but could not resume is reported as
/// [`AcquisitionError::Resume`]; when both fail, the capture error wins.
pub fn acquire<D: DeviceControl>(
    device: &mut D,
    options: &CaptureOptions,
    bypass: &BypassSettings,
) -> Result<Snapshot, AcquisitionError> {
    device.freeze().map_err(AcquisitionError::Freeze)?;
    log::info!("Machine frozen");

    let result = capture_frozen(device, options, bypass);
    let resumed = device.resume();

    match (result, resumed) {
        (Ok(snapshot), Ok(())) => {
            log::info!("Machine resumed");
            Ok(snapshot)
        }
        (Ok(_), Err(e)) => Err(AcquisitionError::Resume(e)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(resume_error)) => {
            log::error!(
                "Could not resume the machine after a failed capture: {}",
                resume_error
            );
            Err(e)
        }
    }
}

fn capture_frozen<D: DeviceControl>(
    device: &mut D,
    options: &CaptureOptions,
    settings: &BypassSettings,
) -> Result<Snapshot, AcquisitionError> {
    let registers = device.read_memory(VIC_BASE, VIC_REGISTER_COUNT)?;
    let port = device.read_memory(CIA2_PORT_A, 1)?;
    MalformedInput::check("CIA2 port A", &port, 1)?;
    let bank_register = port[0];
    let state = decode(&registers, bank_register)?;
    log::debug!(
        "{} in bank {} (DD00=${:02X})",
        state.mode.name(),
        state.bank,
        bank_register
    );

    let mut warnings = Vec::new();
    let color = device.read_memory(COLOR_RAM, SCREEN_CELLS)?;

    let source = GraphicsSource::of(&state);
    let window = source.bypass_window(options);

    // The bypass lets the machine run. Everything outside its window is read
    // first, so it comes from the same frozen frame as the registers.
    let screen_address = state.screen_address();
    let screen = match window {
        Some(w) if w.contains(screen_address, SCREEN_FETCH_LEN) => None,
        _ => Some(read_block(
            device,
            None,
            "screen memory",
            screen_address,
            SCREEN_FETCH_LEN,
            &mut warnings,
        )?),
    };

    let mut sprite_patterns: [Option<Vec<u8>>; 8] = Default::default();
    if options.sprites
        && let Some(screen) = &screen
    {
        let state = state.clone().with_sprite_pointers(screen)?;
        read_sprites(device, &state, None, window, &mut sprite_patterns, &mut warnings)?;
    }

    let (char_or_bitmap, window_copy, report) =
        fetch_char_or_bitmap(device, &source, window, settings, &mut warnings)?;

    let screen = match screen {
        Some(screen) => screen,
        None => read_block(
            device,
            window_copy.as_ref(),
            "screen memory",
            screen_address,
            SCREEN_FETCH_LEN,
            &mut warnings,
        )?,
    };
    let state = state.with_sprite_pointers(&screen)?;
    if options.sprites {
        read_sprites(
            device,
            &state,
            window_copy.as_ref(),
            None,
            &mut sprite_patterns,
            &mut warnings,
        )?;
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    Ok(Snapshot {
        registers,
        bank_register,
        state,
        blocks: MemoryBlocks {
            screen,
            color,
            char_or_bitmap,
            sprite_patterns,
        },
        warnings,
        bypass: report,
    })
}

/// Fill in the pattern of every enabled sprite not fetched yet. Sprites whose
/// data lies inside `skip` are left for later.
fn read_sprites<D: DeviceControl>(
    device: &mut D,
    state: &GraphicsState,
    window_copy: Option<&WindowCopy>,
    skip: Option<RomWindow>,
    patterns: &mut [Option<Vec<u8>>; 8],
    warnings: &mut Vec<CaptureWarning>,
) -> Result<(), AcquisitionError> {
    for (index, sprite) in state.sprites.iter().enumerate() {
        let address = state.sprite_data_address(index);
        if !sprite.enabled
            || patterns[index].is_some()
            || skip.is_some_and(|w| w.contains(address, SPRITE_BLOCK_LEN))
        {
            continue;
        }
        let pattern = read_block(
            device,
            window_copy,
            "sprite data",
            address,
            SPRITE_BLOCK_LEN,
            warnings,
        )?;
        patterns[index] = Some(pattern);
    }
    Ok(())
}

/// Where the character set or bitmap for the current mode comes from.
enum GraphicsSource {
    /// Invalid mode: nothing is displayed.
    Nothing,
    CharacterRom { lowercase: bool },
    Memory {
        what: &'static str,
        address: u16,
        length: usize,
    },
}

impl GraphicsSource {
    fn of(state: &GraphicsState) -> Self {
        match state.mode {
            GraphicsMode::Invalid => Self::Nothing,
            mode if mode.is_bitmap() => Self::Memory {
                what: "bitmap",
                address: state.bitmap_address(),
                length: BITMAP_LEN,
            },
            _ if state.uses_character_rom() => Self::CharacterRom {
                lowercase: state.uses_lowercase_character_rom(),
            },
            _ => Self::Memory {
                what: "character memory",
                address: state.char_address(),
                length: CHARSET_LEN,
            },
        }
    }

    /// The ROM window the bypass has to fetch, if any.
    fn bypass_window(&self, options: &CaptureOptions) -> Option<RomWindow> {
        match *self {
            Self::Memory {
                address, length, ..
            } if options.bypass => RomWindow::containing(address, length),
            _ => None,
        }
    }
}

type CharFetch = (Vec<u8>, Option<WindowCopy>, Option<BypassReport>);

/// The character set or bitmap, running the bypass over `window` when set.
fn fetch_char_or_bitmap<D: DeviceControl>(
    device: &mut D,
    source: &GraphicsSource,
    window: Option<RomWindow>,
    settings: &BypassSettings,
    warnings: &mut Vec<CaptureWarning>,
) -> Result<CharFetch, AcquisitionError> {
    let (what, address, length) = match *source {
        GraphicsSource::Nothing => return Ok((Vec::new(), None, None)),
        GraphicsSource::CharacterRom { lowercase } => {
            log::info!("Character memory is the character ROM image");
            if lowercase {
                log::warn!(
                    "Character memory is the lowercase half of the ROM; only the uppercase set is built in, glyphs are approximate"
                );
            }
            warnings.push(CaptureWarning::CharacterRomSubstituted);
            return Ok((CHARACTER_ROM.to_vec(), None, None));
        }
        GraphicsSource::Memory {
            what,
            address,
            length,
        } => (what, address, length),
    };

    let Some(window) = window else {
        let data = read_block(device, None, what, address, length, warnings)?;
        return Ok((data, None, None));
    };

    let (outcome, report) = RomBypass::new(device, settings).run(window)?;
    log::debug!("ROM bypass phases: {:?}", report.phases);
    match outcome {
        BypassOutcome::Done(data) => {
            log::info!(
                "Fetched RAM under {} ROM in {} ms",
                window.name(),
                report.elapsed.as_millis()
            );
            let copy = WindowCopy { window, data };
            let block = copy
                .slice(address, length)
                .map(<[u8]>::to_vec)
                .ok_or(MalformedInput {
                    block: what,
                    expected: length,
                    actual: copy.data.len(),
                })?;
            Ok((block, Some(copy), Some(report)))
        }
        BypassOutcome::Failed { marker } => {
            warnings.push(CaptureWarning::BypassVerificationFailed {
                window_start: window.start(),
                marker,
            });
            let data = device.read_memory(address, length)?;
            Ok((data, None, Some(report)))
        }
    }
}

/// Read a block, serving it from the bypass copy when possible and flagging
/// reads that can only return ROM.
fn read_block<D: DeviceControl>(
    device: &mut D,
    window_copy: Option<&WindowCopy>,
    what: &'static str,
    address: u16,
    length: usize,
    warnings: &mut Vec<CaptureWarning>,
) -> Result<Vec<u8>, AcquisitionError> {
    if let Some(data) = window_copy.and_then(|copy| copy.slice(address, length)) {
        log::debug!("{} at ${:04X} served from the bypass copy", what, address);
        return Ok(data.to_vec());
    }
    if RomWindow::overlapping(address, length).is_some() {
        warnings.push(CaptureWarning::RomShadowed { what, address });
    }
    Ok(device.read_memory(address, length)?)
}
