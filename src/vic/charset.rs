//! Built-in uppercase/graphics character set.
//!
//! Used whenever the VIC reads the character ROM image rather than RAM, which a
//! DMA read of the same addresses cannot return.

pub const GLYPH_COUNT: usize = 256;
pub const GLYPH_BYTES: usize = 8;

const BASE_GLYPHS: [[u8; GLYPH_BYTES]; 128] = [
    // @, A-Z, [, £, ], up arrow, left arrow
    [0x3C, 0x66, 0x6E, 0x6E, 0x60, 0x62, 0x3C, 0x00],
    [0x18, 0x3C, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00],
    [0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00],
    [0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00],
    [0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00],
    [0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x7E, 0x00],
    [0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x60, 0x00],
    [0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00],
    [0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00],
    [0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00],
    [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00],
    [0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00],
    [0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00],
    [0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00],
    [0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00],
    [0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
    [0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00],
    [0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00],
    [0x7C, 0x66, 0x66, 0x7C, 0x78, 0x6C, 0x66, 0x00],
    [0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00],
    [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00],
    [0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
    [0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00],
    [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00],
    [0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00],
    [0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00],
    [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00],
    [0x3C, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3C, 0x00],
    [0x0C, 0x12, 0x30, 0x7C, 0x30, 0x62, 0xFC, 0x00],
    [0x3C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x3C, 0x00],
    [0x00, 0x08, 0x1C, 0x3E, 0x08, 0x08, 0x00, 0x00],
    [0x00, 0x10, 0x30, 0x7F, 0x30, 0x10, 0x00, 0x00],
    // space, punctuation, digits
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x18, 0x18, 0x18, 0x18, 0x00, 0x00, 0x18, 0x00],
    [0x66, 0x66, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x66, 0x66, 0xFF, 0x66, 0xFF, 0x66, 0x66, 0x00],
    [0x18, 0x3E, 0x60, 0x3C, 0x06, 0x7C, 0x18, 0x00],
    [0x62, 0x66, 0x0C, 0x18, 0x30, 0x66, 0x46, 0x00],
    [0x3C, 0x66, 0x3C, 0x38, 0x67, 0x66, 0x3F, 0x00],
    [0x06, 0x0C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0C, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0C, 0x00],
    [0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x18, 0x30, 0x00],
    [0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00],
    [0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30],
    [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
    [0x00, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x00],
    [0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00],
    [0x18, 0x18, 0x38, 0x18, 0x18, 0x18, 0x7E, 0x00],
    [0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00],
    [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00],
    [0x06, 0x0E, 0x1E, 0x66, 0x7F, 0x06, 0x06, 0x00],
    [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00],
    [0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00],
    [0x7E, 0x66, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00],
    [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00],
    [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00],
    [0x00, 0x00, 0x18, 0x00, 0x00, 0x18, 0x00, 0x00],
    [0x00, 0x00, 0x18, 0x00, 0x00, 0x18, 0x18, 0x30],
    [0x0E, 0x18, 0x30, 0x60, 0x30, 0x18, 0x0E, 0x00],
    [0x00, 0x00, 0x7E, 0x00, 0x7E, 0x00, 0x00, 0x00],
    [0x70, 0x18, 0x0C, 0x06, 0x0C, 0x18, 0x70, 0x00],
    [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x00, 0x18, 0x00],
    // graphics
    [0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00],
    [0x08, 0x1C, 0x3E, 0x7F, 0x7F, 0x1C, 0x3E, 0x00],
    [0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18],
    [0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF],
    [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00],
    [0xF0, 0xF0, 0xF0, 0xF0, 0xF0, 0xF0, 0xF0, 0xF0],
    [0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA],
    [0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F],
    [0x00, 0x00, 0x00, 0x00, 0xAA, 0x55, 0xAA, 0x55],
    [0x0F, 0x07, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00],
    [0x55, 0xAA, 0x55, 0xAA, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x07, 0x0F],
    [0x00, 0x00, 0x00, 0x00, 0x80, 0xC0, 0xE0, 0xF0],
    [0xF0, 0xE0, 0xC0, 0x80, 0x00, 0x00, 0x00, 0x00],
    [0x01, 0x03, 0x07, 0x0F, 0x1F, 0x3F, 0x7F, 0xFF],
    [0x80, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC, 0xFE, 0xFF],
    [0xFF, 0xFE, 0xFC, 0xF8, 0xF0, 0xE0, 0xC0, 0x80],
    [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
    [0xFF, 0x7F, 0x3F, 0x1F, 0x0F, 0x07, 0x03, 0x01],
    [0x3C, 0x7E, 0xFF, 0xFF, 0xFF, 0xFF, 0x7E, 0x3C],
    [0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0],
    [0x18, 0x18, 0x7E, 0xFF, 0xFF, 0x18, 0x3C, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0xF0, 0xF0, 0xF0, 0xF0],
    [0x0F, 0x0F, 0x0F, 0x0F, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x0F, 0x0F, 0x0F, 0x0F],
    [0xF8, 0xF0, 0xE0, 0xC0, 0x80, 0x00, 0x00, 0x00],
    [0xF0, 0xF0, 0xF0, 0xF0, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x66, 0xFF, 0xFF, 0xFF, 0x7E, 0x3C, 0x18],
    [0x00, 0x00, 0x00, 0x80, 0xC0, 0xE0, 0xF0, 0xF8],
    [0x18, 0x18, 0x18, 0xFF, 0xFF, 0x18, 0x18, 0x18],
    [0x00, 0x3C, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00],
    [0x18, 0x3C, 0x7E, 0xFF, 0x7E, 0x3C, 0x18, 0x00],
    [0x00, 0x00, 0x00, 0x01, 0x03, 0x07, 0x0F, 0x1F],
    [0x1F, 0x0F, 0x07, 0x03, 0x01, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x7F, 0x36, 0x36, 0x36, 0x63, 0x00],
    [0xFF, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF],
    [0x03, 0x03, 0x03, 0x03, 0x03, 0x03, 0x03, 0x03],
    [0xC0, 0x60, 0x30, 0x18, 0x0C, 0x06, 0x03, 0x01],
    [0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA],
    [0x01, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xC0],
    [0x00, 0x00, 0x00, 0x00, 0xC0, 0xC0, 0xC0, 0xC0],
    [0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x03, 0x03],
    [0xC0, 0xC0, 0xC0, 0xC0, 0x00, 0x00, 0x00, 0x00],
    [0x03, 0x03, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0xFF, 0xFF, 0x18, 0x18, 0x18],
    [0x18, 0x18, 0x18, 0xFF, 0xFF, 0x00, 0x00, 0x00],
    [0x18, 0x18, 0x18, 0x1F, 0x1F, 0x18, 0x18, 0x18],
    [0x18, 0x18, 0x18, 0xF8, 0xF8, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0xF8, 0xF8, 0x18, 0x18, 0x18],
    [0x00, 0x00, 0x00, 0x1F, 0x1F, 0x18, 0x18, 0x18],
    [0x18, 0x18, 0x18, 0x1F, 0x1F, 0x00, 0x00, 0x00],
    [0x18, 0x18, 0x18, 0xF8, 0xF8, 0x18, 0x18, 0x18],
    [0x18, 0x18, 0x18, 0xFF, 0xFF, 0x18, 0x18, 0x18],
    [0x3C, 0x3C, 0x3C, 0x3C, 0x3C, 0x3C, 0x3C, 0x3C],
    [0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x3C, 0x3C, 0x3C, 0x3C],
    [0x3C, 0x3C, 0x3C, 0x3C, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x3C, 0x3C, 0x3C, 0x3C],
    [0x3C, 0x3C, 0x3C, 0x3C, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0xFC, 0xFC, 0x3C, 0x3C, 0x3C, 0x3C],
    [0x3C, 0x3C, 0x3C, 0x3C, 0x3F, 0x3F, 0x00, 0x00],
    [0x00, 0x7E, 0x66, 0x66, 0x66, 0x66, 0x00, 0x00],
    [0x08, 0x1C, 0x3E, 0x7F, 0x3E, 0x1C, 0x08, 0x00],
];

/// 256 screen codes, 8 bytes each. Codes $80-$FF are the reverse-video
/// counterparts of $00-$7F.
pub static CHARACTER_ROM: [u8; GLYPH_COUNT * GLYPH_BYTES] = build_character_rom();

const fn build_character_rom() -> [u8; GLYPH_COUNT * GLYPH_BYTES] {
    let mut rom = [0u8; GLYPH_COUNT * GLYPH_BYTES];
    let mut code = 0;
    while code < 128 {
        let mut row = 0;
        while row < GLYPH_BYTES {
            let bits = BASE_GLYPHS[code][row];
            rom[code * GLYPH_BYTES + row] = bits;
            rom[(code + 128) * GLYPH_BYTES + row] = !bits;
            row += 1;
        }
        code += 1;
    }
    rom
}

pub fn glyph(code: u8) -> &'static [u8] {
    let start = code as usize * GLYPH_BYTES;
    &CHARACTER_ROM[start..start + GLYPH_BYTES]
}
