/// Visible display area of the VIC-II, in pixels.
pub const SCREEN_WIDTH: usize = 320;
pub const SCREEN_HEIGHT: usize = 200;

/// A rectangle of palette indices (0-15), row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, color: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// A 320x200 canvas filled with `color`.
    pub fn screen(color: u8) -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT, color)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: u8) {
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = row * self.width;
            self.pixels[start + x.min(x_end)..start + x_end].fill(color);
        }
    }

    /// Copy `other` into this canvas with its top-left corner at (x, y).
    pub fn blit(&mut self, other: &Canvas, x: usize, y: usize) {
        if x >= self.width {
            return;
        }
        for row in 0..other.height {
            let ty = y + row;
            if ty >= self.height {
                break;
            }
            let width = other.width.min(self.width.saturating_sub(x));
            let dst = ty * self.width + x;
            self.pixels[dst..dst + width].copy_from_slice(&other.row(row)[..width]);
        }
    }

    pub fn is_uniform(&self, color: u8) -> bool {
        self.pixels.iter().all(|&c| c == color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(10, 5, 0);
        canvas.fill_rect(8, 3, 10, 10, 7);
        assert_eq!(canvas.get(7, 3), 0);
        assert_eq!(canvas.get(8, 3), 7);
        assert_eq!(canvas.get(9, 4), 7);
        assert_eq!(canvas.pixels().iter().filter(|&&c| c == 7).count(), 4);
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut canvas = Canvas::new(4, 4, 1);
        canvas.set(4, 0, 2);
        canvas.set(0, 4, 2);
        assert!(canvas.is_uniform(1));
    }

    #[test]
    fn test_blit() {
        let mut canvas = Canvas::new(6, 6, 0);
        let patch = Canvas::new(2, 3, 5);
        canvas.blit(&patch, 3, 2);
        assert_eq!(canvas.get(3, 2), 5);
        assert_eq!(canvas.get(4, 4), 5);
        assert_eq!(canvas.get(5, 4), 0);
        assert_eq!(canvas.get(3, 5), 0);
    }
}
