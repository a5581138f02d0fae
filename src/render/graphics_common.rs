/// Common graphics utilities for VIC-II rendering
///
/// This module provides shared functionality for turning screen, character,
/// bitmap and sprite bytes into pixels:
/// - VIC-II color palette
/// - Color lookup helpers
/// - Pixel decoding for multicolor and single-color modes
/// - Conversion of a finished canvas into an RGB image
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use super::canvas::Canvas;

/// VIC-II RGB Palette (16 colors)
///
/// The VICE default palette. Every canvas holds indices into this table; it is
/// only resolved to RGB when the final image is produced.
pub const VIC_II_RGB: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00], // 0: Black
    [0xFF, 0xFF, 0xFF], // 1: White
    [0x68, 0x37, 0x2B], // 2: Red
    [0x70, 0xA4, 0xB2], // 3: Cyan
    [0x6F, 0x3D, 0x86], // 4: Purple
    [0x58, 0x8D, 0x43], // 5: Green
    [0x35, 0x28, 0x79], // 6: Blue
    [0xB8, 0xC7, 0x6F], // 7: Yellow
    [0x6F, 0x4F, 0x25], // 8: Orange
    [0x43, 0x39, 0x00], // 9: Brown
    [0x9A, 0x67, 0x59], // 10: Light Red
    [0x44, 0x44, 0x44], // 11: Dark Grey
    [0x6C, 0x6C, 0x6C], // 12: Grey
    [0x9A, 0xD2, 0x84], // 13: Light Green
    [0x6C, 0x5E, 0xB5], // 14: Light Blue
    [0x95, 0x95, 0x95], // 15: Light Grey
];

/// Get RGB color from VIC-II palette by index
///
/// # Arguments
/// * `index` - Color index (0-15)
///
/// # Returns
/// RGB color as [u8; 3], or black if index is out of range
#[inline]
pub fn get_vic_color(index: u8) -> [u8; 3] {
    VIC_II_RGB.get(index as usize).copied().unwrap_or([0, 0, 0])
}

#[inline]
pub fn get_vic_color_rgb(index: u8) -> Rgb<u8> {
    Rgb(get_vic_color(index))
}

/// Decode a 2-bit multicolor bitmap pixel value to color index
///
/// In multicolor bitmap mode, each 2-bit value maps to one of 4 colors:
/// - 00: Background color ($D021)
/// - 01: Upper nibble of the screen byte
/// - 10: Lower nibble of the screen byte
/// - 11: Color RAM nibble
#[inline]
pub fn decode_multicolor_pixel(bits: u8, color_byte: u8, bg_color: u8, fg_color: u8) -> u8 {
    match bits & 0b11 {
        0b00 => bg_color,
        0b01 => (color_byte >> 4) & 0x0F,
        0b10 => color_byte & 0x0F,
        _ => fg_color,
    }
}

/// Extract 4 two-bit pixel values from a byte (for multicolor mode)
///
/// Returns pixel values in left-to-right order (MSB to LSB)
#[inline]
pub fn extract_multicolor_pixels(byte: u8) -> [u8; 4] {
    [
        (byte >> 6) & 0b11,
        (byte >> 4) & 0b11,
        (byte >> 2) & 0b11,
        byte & 0b11,
    ]
}

/// Extract 8 single-bit pixel values from a byte
///
/// Returns pixel values in left-to-right order (MSB to LSB)
#[inline]
pub fn extract_hires_pixels(byte: u8) -> [u8; 8] {
    [
        (byte >> 7) & 1,
        (byte >> 6) & 1,
        (byte >> 5) & 1,
        (byte >> 4) & 1,
        (byte >> 3) & 1,
        (byte >> 2) & 1,
        (byte >> 1) & 1,
        byte & 1,
    ]
}

/// Draw one byte of hi-res data as 8 pixels starting at (x, y).
#[inline]
pub fn draw_hires_byte(canvas: &mut Canvas, x: usize, y: usize, byte: u8, fg: u8, bg: u8) {
    for (dx, bit) in extract_hires_pixels(byte).into_iter().enumerate() {
        canvas.set(x + dx, y, if bit == 1 { fg } else { bg });
    }
}

/// Draw one byte of multicolor data as 4 double-width pixels starting at
/// (x, y). `colors` is indexed by the bit pair.
#[inline]
pub fn draw_multicolor_byte(canvas: &mut Canvas, x: usize, y: usize, byte: u8, colors: [u8; 4]) {
    for (i, bits) in extract_multicolor_pixels(byte).into_iter().enumerate() {
        let color = colors[bits as usize];
        canvas.set(x + i * 2, y, color);
        canvas.set(x + i * 2 + 1, y, color);
    }
}

/// Resolve a canvas through the palette and upscale it with nearest-neighbor
/// sampling. `scale` values below 1 are treated as 1.
pub fn canvas_to_image(canvas: &Canvas, scale: u32) -> RgbImage {
    let mut img = RgbImage::new(canvas.width() as u32, canvas.height() as u32);
    for (i, pixel) in img.pixels_mut().enumerate() {
        *pixel = get_vic_color_rgb(canvas.pixels()[i]);
    }

    let scale = scale.max(1);
    if scale == 1 {
        return img;
    }
    imageops::resize(
        &img,
        img.width() * scale,
        img.height() * scale,
        FilterType::Nearest,
    )
}
