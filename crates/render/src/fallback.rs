//! Minimal text-on-canvas renderer.
//!
//! Draws plain text with the built-in 8x8 bitmap font onto a white canvas of
//! fixed size and encodes it as PNG. It needs no fonts, processes or system
//! libraries, so it is used whenever a rich renderer fails.

use std::io::Cursor;

use {
    font8x8::{BASIC_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS, MISC_FONTS, UnicodeFonts},
    image::{DynamicImage, ImageFormat, Rgb, RgbImage},
};

use crate::error::FallbackError;

/// Pixel offset of the first glyph from the top-left corner.
pub const TEXT_ORIGIN: (u32, u32) = (10, 10);

const GLYPH_SIZE: u32 = 8;
const LINE_HEIGHT: u32 = GLYPH_SIZE + 3;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Renders text onto a blank canvas of fixed dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRenderer {
    width: u32,
    height: u32,
}

impl FallbackRenderer {
    /// Canvas dimensions are clamped to at least one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw `text` and return the PNG bytes.
    ///
    /// Text is not wrapped; glyphs past the canvas edge are clipped and `\n`
    /// starts a new line.
    pub fn render(&self, text: &str) -> Result<Vec<u8>, FallbackError> {
        let mut canvas = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        draw_text(&mut canvas, TEXT_ORIGIN.0, TEXT_ORIGIN.1, text, FOREGROUND);

        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(canvas).write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

fn glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| MISC_FONTS.get(ch))
}

fn draw_text(canvas: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let mut cursor_y = y;
    for line in text.split('\n') {
        if cursor_y >= canvas.height() {
            break;
        }
        let mut cursor_x = x;
        for ch in line.chars() {
            if cursor_x >= canvas.width() {
                break;
            }
            if !ch.is_whitespace()
                && let Some(bits) = glyph(ch).or_else(|| glyph('?'))
            {
                draw_glyph(canvas, cursor_x, cursor_y, &bits, color);
            }
            cursor_x += GLYPH_SIZE;
        }
        cursor_y += LINE_HEIGHT;
    }
}

fn draw_glyph(canvas: &mut RgbImage, x: u32, y: u32, bits: &[u8; 8], color: Rgb<u8>) {
    for (row, row_bits) in bits.iter().enumerate() {
        let py = y + row as u32;
        if py >= canvas.height() {
            return;
        }
        for col in 0..GLYPH_SIZE {
            let px = x + col;
            if px >= canvas.width() {
                break;
            }
            if (row_bits >> col) & 1 == 1 {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}
