use super::canvas::{Canvas, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::graphics_common::{extract_hires_pixels, extract_multicolor_pixels};
use crate::error::{CaptureWarning, MalformedInput};
use crate::vic::{GraphicsState, SpriteDescriptor};

pub const SPRITE_WIDTH: usize = 24;
pub const SPRITE_HEIGHT: usize = 21;
/// 21 rows of 3 bytes. The 64th byte of a block is unused.
pub const SPRITE_DATA_LEN: usize = 63;

/// Chip coordinates of the top-left visible pixel.
const FIRST_VISIBLE_X: i32 = 24;
const FIRST_VISIBLE_Y: i32 = 50;

/// A decoded sprite at its final (expanded) size. `None` is transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Option<u8>>,
}

impl SpriteImage {
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.pixels[y * self.width + x]
    }
}

/// Turn 63 bytes of pattern data into pixels, honoring the sprite's
/// multicolor and expansion flags.
pub fn decode_sprite(
    sprite: &SpriteDescriptor,
    data: &[u8],
    multicolors: [u8; 2],
) -> Result<SpriteImage, MalformedInput> {
    MalformedInput::check("sprite pattern", data, SPRITE_DATA_LEN)?;

    let mut base = Vec::with_capacity(SPRITE_WIDTH * SPRITE_HEIGHT);
    for row in data[..SPRITE_DATA_LEN].chunks_exact(3) {
        for &byte in row {
            if sprite.multicolor {
                for bits in extract_multicolor_pixels(byte) {
                    let color = match bits {
                        0b00 => None,
                        0b01 => Some(multicolors[0]),
                        0b10 => Some(sprite.color),
                        _ => Some(multicolors[1]),
                    };
                    base.push(color);
                    base.push(color);
                }
            } else {
                for bit in extract_hires_pixels(byte) {
                    base.push((bit == 1).then_some(sprite.color));
                }
            }
        }
    }

    let scale_x = if sprite.expand_x { 2 } else { 1 };
    let scale_y = if sprite.expand_y { 2 } else { 1 };
    let width = SPRITE_WIDTH * scale_x;
    let height = SPRITE_HEIGHT * scale_y;

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let src_row = &base[(y / scale_y) * SPRITE_WIDTH..(y / scale_y + 1) * SPRITE_WIDTH];
        for x in 0..width {
            pixels.push(src_row[x / scale_x]);
        }
    }

    Ok(SpriteImage {
        width,
        height,
        pixels,
    })
}

/// Overlay every enabled sprite onto `canvas`.
///
/// Sprites are drawn from 7 down to 0 so a lower-numbered sprite always ends
/// up on top, as on the real chip. Sprites that cannot be drawn are skipped
/// and reported through `warnings`.
pub fn composite(
    mut canvas: Canvas,
    state: &GraphicsState,
    patterns: &[Option<Vec<u8>>; 8],
    warnings: &mut Vec<CaptureWarning>,
) -> Result<Canvas, MalformedInput> {
    for index in (0..8).rev() {
        let sprite = &state.sprites[index];
        if !sprite.enabled {
            continue;
        }

        let Some(data) = patterns[index].as_deref() else {
            log::warn!("Sprite {} enabled but no pattern data available", index);
            warnings.push(CaptureWarning::SpriteDataMissing { index });
            continue;
        };

        let image = decode_sprite(sprite, data, state.sprite_multicolors)?;
        let left = sprite.x as i32 - FIRST_VISIBLE_X;
        let top = sprite.y as i32 - FIRST_VISIBLE_Y;

        if left + image.width as i32 <= 0
            || left >= SCREEN_WIDTH as i32
            || top + image.height as i32 <= 0
            || top >= SCREEN_HEIGHT as i32
        {
            log::debug!(
                "Sprite {} at ({},{}) is off screen",
                index,
                sprite.x,
                sprite.y
            );
            warnings.push(CaptureWarning::SpriteOutOfRange {
                index,
                x: sprite.x,
                y: sprite.y,
            });
            continue;
        }

        draw(&mut canvas, &image, left, top);
    }

    Ok(canvas)
}

fn draw(canvas: &mut Canvas, image: &SpriteImage, left: i32, top: i32) {
    for sy in 0..image.height {
        let y = top + sy as i32;
        if y < 0 || y >= canvas.height() as i32 {
            continue;
        }
        for sx in 0..image.width {
            let x = left + sx as i32;
            if x < 0 || x >= canvas.width() as i32 {
                continue;
            }
            if let Some(color) = image.get(sx, sy) {
                canvas.set(x as usize, y as usize, color);
            }
        }
    }
}
