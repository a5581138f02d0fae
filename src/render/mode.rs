use super::canvas::Canvas;
use super::graphics_common::{decode_multicolor_pixel, draw_hires_byte, draw_multicolor_byte};
use crate::error::MalformedInput;
use crate::snapshot::{BITMAP_LEN, CHARSET_LEN, MemoryBlocks, SCREEN_CELLS};
use crate::vic::{GraphicsMode, GraphicsState};

pub const COLUMNS: usize = 40;
pub const ROWS: usize = 25;
const CELL: usize = 8;

/// Paint the base display for `state.mode` onto a fresh 320x200 canvas.
pub fn render(state: &GraphicsState, blocks: &MemoryBlocks) -> Result<Canvas, MalformedInput> {
    if state.mode == GraphicsMode::Invalid {
        return Ok(Canvas::screen(0));
    }

    let mut canvas = Canvas::screen(state.background_colors[0]);
    match state.mode {
        GraphicsMode::Invalid => {}
        GraphicsMode::StandardText => {
            check_text_inputs(blocks)?;
            render_text(&mut canvas, blocks, |code, color| {
                (code, TextCell::HiRes(color & 0x0F, state.background_colors[0]))
            });
        }
        GraphicsMode::MulticolorText => {
            check_text_inputs(blocks)?;
            let [bg0, bg1, bg2, _] = state.background_colors;
            render_text(&mut canvas, blocks, |code, color| {
                let cell = if color & 0x08 != 0 {
                    TextCell::Multicolor([bg0, bg1, bg2, color & 0x07])
                } else {
                    TextCell::HiRes(color & 0x07, bg0)
                };
                (code, cell)
            });
        }
        GraphicsMode::ExtendedBackground => {
            check_text_inputs(blocks)?;
            render_text(&mut canvas, blocks, |code, color| {
                let background = state.background_colors[(code >> 6) as usize];
                (code & 0x3F, TextCell::HiRes(color & 0x0F, background))
            });
        }
        GraphicsMode::HiResBitmap => {
            MalformedInput::check("screen memory", &blocks.screen, SCREEN_CELLS)?;
            MalformedInput::check("bitmap memory", &blocks.char_or_bitmap, BITMAP_LEN)?;
            render_hires_bitmap(&mut canvas, blocks);
        }
        GraphicsMode::MulticolorBitmap => {
            MalformedInput::check("screen memory", &blocks.screen, SCREEN_CELLS)?;
            MalformedInput::check("color memory", &blocks.color, SCREEN_CELLS)?;
            MalformedInput::check("bitmap memory", &blocks.char_or_bitmap, BITMAP_LEN)?;
            render_multicolor_bitmap(&mut canvas, blocks, state.background_colors[0]);
        }
    }

    Ok(canvas)
}

fn check_text_inputs(blocks: &MemoryBlocks) -> Result<(), MalformedInput> {
    MalformedInput::check("screen memory", &blocks.screen, SCREEN_CELLS)?;
    MalformedInput::check("color memory", &blocks.color, SCREEN_CELLS)?;
    MalformedInput::check("character memory", &blocks.char_or_bitmap, CHARSET_LEN)
}

/// How one character cell is drawn.
enum TextCell {
    /// Foreground and background color.
    HiRes(u8, u8),
    /// Colors for bit pairs 00, 01, 10 and 11.
    Multicolor([u8; 4]),
}

/// Walk the 40x25 cells. `classify` gets the screen code and color RAM byte
/// and returns the glyph index plus how to draw it.
fn render_text<F>(canvas: &mut Canvas, blocks: &MemoryBlocks, classify: F)
where
    F: Fn(u8, u8) -> (u8, TextCell),
{
    let charset = &blocks.char_or_bitmap;
    for row in 0..ROWS {
        for col in 0..COLUMNS {
            let cell = row * COLUMNS + col;
            let (glyph, style) = classify(blocks.screen[cell], blocks.color[cell]);
            let glyph = &charset[glyph as usize * CELL..glyph as usize * CELL + CELL];

            let (x, y) = (col * CELL, row * CELL);
            for (line, &byte) in glyph.iter().enumerate() {
                match style {
                    TextCell::HiRes(fg, bg) => draw_hires_byte(canvas, x, y + line, byte, fg, bg),
                    TextCell::Multicolor(colors) => {
                        draw_multicolor_byte(canvas, x, y + line, byte, colors)
                    }
                }
            }
        }
    }
}

/// Bitmap bytes are laid out cell by cell: 8 bytes per 8x8 cell, 320 bytes per
/// cell row.
fn bitmap_cell(bitmap: &[u8], row: usize, col: usize) -> &[u8] {
    let start = row * COLUMNS * CELL + col * CELL;
    &bitmap[start..start + CELL]
}

fn render_hires_bitmap(canvas: &mut Canvas, blocks: &MemoryBlocks) {
    for row in 0..ROWS {
        for col in 0..COLUMNS {
            let colors = blocks.screen[row * COLUMNS + col];
            let (fg, bg) = ((colors >> 4) & 0x0F, colors & 0x0F);
            for (line, &byte) in bitmap_cell(&blocks.char_or_bitmap, row, col)
                .iter()
                .enumerate()
            {
                draw_hires_byte(canvas, col * CELL, row * CELL + line, byte, fg, bg);
            }
        }
    }
}

fn render_multicolor_bitmap(canvas: &mut Canvas, blocks: &MemoryBlocks, background: u8) {
    for row in 0..ROWS {
        for col in 0..COLUMNS {
            let cell = row * COLUMNS + col;
            let screen_byte = blocks.screen[cell];
            let color_ram = blocks.color[cell] & 0x0F;
            let colors = [0b00, 0b01, 0b10, 0b11]
                .map(|bits| decode_multicolor_pixel(bits, screen_byte, background, color_ram));
            for (line, &byte) in bitmap_cell(&blocks.char_or_bitmap, row, col)
                .iter()
                .enumerate()
            {
                draw_multicolor_byte(canvas, col * CELL, row * CELL + line, byte, colors);
            }
        }
    }
}
