use crate::error::MalformedInput;

/// First VIC-II register, $D000.
pub const VIC_BASE: u16 = 0xD000;
/// $D000-$D02F: everything up to and including the last sprite color.
pub const VIC_REGISTER_COUNT: usize = 0x30;
/// CIA2 data port A; bits 0-1 select the VIC bank (inverted).
pub const CIA2_PORT_A: u16 = 0xDD00;
/// Color RAM, one nibble per character cell.
pub const COLOR_RAM: u16 = 0xD800;

pub const BANK_SIZE: u16 = 0x4000;
/// Offset of the eight sprite pointers within screen memory.
pub const SPRITE_POINTER_OFFSET: usize = 0x3F8;

/// Graphics mode selected by the BMM/ECM/MCM flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsMode {
    StandardText,
    MulticolorText,
    ExtendedBackground,
    HiResBitmap,
    MulticolorBitmap,
    /// ECM combined with BMM, or ECM combined with MCM. The chip outputs black.
    Invalid,
}

impl GraphicsMode {
    pub fn from_flags(bmm: bool, ecm: bool, mcm: bool) -> Self {
        match (bmm, ecm, mcm) {
            (false, false, false) => Self::StandardText,
            (false, false, true) => Self::MulticolorText,
            (false, true, false) => Self::ExtendedBackground,
            (true, false, false) => Self::HiResBitmap,
            (true, false, true) => Self::MulticolorBitmap,
            (_, true, _) => Self::Invalid,
        }
    }

    pub fn is_bitmap(self) -> bool {
        matches!(self, Self::HiResBitmap | Self::MulticolorBitmap)
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::StandardText | Self::MulticolorText | Self::ExtendedBackground
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::StandardText => "Standard Text Mode",
            Self::MulticolorText => "Multicolor Text Mode",
            Self::ExtendedBackground => "Extended Background Color Mode",
            Self::HiResBitmap => "Standard Bitmap Mode (Hi-Res)",
            Self::MulticolorBitmap => "Multicolor Bitmap Mode",
            Self::Invalid => "Invalid/Unused Mode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteDescriptor {
    pub enabled: bool,
    /// 9-bit chip X coordinate; 24 is the first visible column.
    pub x: u16,
    /// Chip Y coordinate; 50 is the first visible line.
    pub y: u8,
    pub color: u8,
    pub multicolor: bool,
    pub expand_x: bool,
    pub expand_y: bool,
    /// $D01B. Decoded for reporting only; sprites are always drawn in front.
    pub behind_background: bool,
    /// Block number within the bank; data lives at `pointer * 64`.
    pub data_pointer: u8,
}

impl SpriteDescriptor {
    fn decode(regs: &[u8], index: usize) -> Self {
        let bit = 1u8 << index;
        let x_msb = if regs[0x10] & bit != 0 { 0x100 } else { 0 };

        Self {
            enabled: regs[0x15] & bit != 0,
            x: regs[index * 2] as u16 | x_msb,
            y: regs[index * 2 + 1],
            color: regs[0x27 + index] & 0x0F,
            multicolor: regs[0x1C] & bit != 0,
            expand_x: regs[0x1D] & bit != 0,
            expand_y: regs[0x17] & bit != 0,
            behind_background: regs[0x1B] & bit != 0,
            data_pointer: 0,
        }
    }

    /// Offset of the 64-byte pattern within the VIC bank.
    pub fn data_offset(&self) -> u16 {
        self.data_pointer as u16 * 64
    }
}

/// Display state reconstructed from the VIC-II registers and CIA2 port A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsState {
    pub mode: GraphicsMode,
    pub bank: u8,
    pub screen_base: u16,
    pub char_base: u16,
    pub bitmap_base: u16,
    pub border_color: u8,
    pub background_colors: [u8; 4],
    pub sprite_multicolors: [u8; 2],
    pub rsel: bool,
    pub csel: bool,
    pub scroll_x: u8,
    pub scroll_y: u8,
    pub display_enabled: bool,
    pub sprites: [SpriteDescriptor; 8],
}

/// Decode $D000-$D02F and the CIA2 port A byte into a [`GraphicsState`].
///
/// Sprite data pointers live in screen memory rather than in the register
/// file, so every sprite comes back with `data_pointer == 0`; attach them with
/// [`GraphicsState::with_sprite_pointers`] once screen memory is known.
pub fn decode(registers: &[u8], bank_register: u8) -> Result<GraphicsState, MalformedInput> {
    // The last register used is $D02E (sprite 7 color).
    MalformedInput::check("VIC-II register file", registers, 0x2F)?;

    let d011 = registers[0x11];
    let d016 = registers[0x16];
    let d018 = registers[0x18];

    let bmm = (d011 & 0x20) != 0;
    let ecm = (d011 & 0x40) != 0;
    let mcm = (d016 & 0x10) != 0;

    let sprites = std::array::from_fn(|i| SpriteDescriptor::decode(registers, i));

    Ok(GraphicsState {
        mode: GraphicsMode::from_flags(bmm, ecm, mcm),
        bank: bank_from_port(bank_register),
        screen_base: ((d018 >> 4) & 0x0F) as u16 * 0x400,
        char_base: ((d018 >> 1) & 0x07) as u16 * 0x800,
        bitmap_base: ((d018 >> 3) & 0x01) as u16 * 0x2000,
        border_color: registers[0x20] & 0x0F,
        background_colors: [
            registers[0x21] & 0x0F,
            registers[0x22] & 0x0F,
            registers[0x23] & 0x0F,
            registers[0x24] & 0x0F,
        ],
        sprite_multicolors: [registers[0x25] & 0x0F, registers[0x26] & 0x0F],
        rsel: (d011 & 0x08) != 0,
        csel: (d016 & 0x08) != 0,
        scroll_x: d016 & 0x07,
        scroll_y: d011 & 0x07,
        display_enabled: (d011 & 0x10) != 0,
        sprites,
    })
}

/// CIA2 port A bits 0-1 are active low: %11 selects bank 0.
pub fn bank_from_port(port: u8) -> u8 {
    3 - (port & 0x03)
}

impl GraphicsState {
    /// Fill in sprite data pointers from screen memory (the bytes at +$3F8).
    pub fn with_sprite_pointers(mut self, screen: &[u8]) -> Result<Self, MalformedInput> {
        MalformedInput::check("screen memory", screen, SPRITE_POINTER_OFFSET + 8)?;
        for (sprite, &pointer) in self
            .sprites
            .iter_mut()
            .zip(&screen[SPRITE_POINTER_OFFSET..SPRITE_POINTER_OFFSET + 8])
        {
            sprite.data_pointer = pointer;
        }
        Ok(self)
    }

    pub fn bank_address(&self) -> u16 {
        self.bank as u16 * BANK_SIZE
    }

    pub fn screen_address(&self) -> u16 {
        self.bank_address() + self.screen_base
    }

    pub fn char_address(&self) -> u16 {
        self.bank_address() + self.char_base
    }

    pub fn bitmap_address(&self) -> u16 {
        self.bank_address() + self.bitmap_base
    }

    pub fn sprite_data_address(&self, index: usize) -> u16 {
        self.bank_address() + self.sprites[index].data_offset()
    }

    /// The VIC sees the character ROM instead of RAM at offsets $1000-$1FFF
    /// of banks 0 and 2.
    pub fn uses_character_rom(&self) -> bool {
        (self.bank == 0 || self.bank == 2) && (0x1000..0x2000).contains(&self.char_base)
    }

    /// The lowercase half ($1800) of the character ROM. Only the uppercase set
    /// is bundled, so these glyphs are approximate.
    pub fn uses_lowercase_character_rom(&self) -> bool {
        self.uses_character_rom() && self.char_base >= 0x1800
    }

    pub fn visible_rows(&self) -> u8 {
        if self.rsel { 25 } else { 24 }
    }

    pub fn visible_columns(&self) -> u8 {
        if self.csel { 40 } else { 38 }
    }

    /// Multi-line summary used for `--verbose` output.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Screen Mode: {}", self.mode.name()),
            format!(
                "  DEN={} (display {})",
                self.display_enabled as u8,
                if self.display_enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            ),
            format!("  RSEL={} ({} rows)", self.rsel as u8, self.visible_rows()),
            format!("  CSEL={} ({} columns)", self.csel as u8, self.visible_columns()),
            format!("VIC Bank: {} (${:04X})", self.bank, self.bank_address()),
            format!("Screen Memory: ${:04X}", self.screen_address()),
            format!("Character Memory: ${:04X}", self.char_address()),
            format!("Bitmap Memory: ${:04X}", self.bitmap_address()),
            format!("Border Color: {}", self.border_color),
            format!("Background Colors: {:?}", self.background_colors),
        ];
        for (i, sprite) in self.sprites.iter().enumerate().filter(|(_, s)| s.enabled) {
            lines.push(format!(
                "Sprite {}: pos=({},{}) color={} {}{}{} {} ptr=${:02X} data=${:04X}",
                i,
                sprite.x,
                sprite.y,
                sprite.color,
                if sprite.multicolor { "MC" } else { "HR" },
                if sprite.expand_x { " Xx2" } else { "" },
                if sprite.expand_y { " Yx2" } else { "" },
                if sprite.behind_background {
                    "behind"
                } else {
                    "front"
                },
                sprite.data_pointer,
                self.sprite_data_address(i),
            ));
        }
        lines
    }
}
