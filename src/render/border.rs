use super::canvas::Canvas;

/// Width of the margin added on every side.
pub const BORDER_SIZE: usize = 32;

/// Surround `canvas` with a `BORDER_SIZE` margin of `color`. Returns the
/// canvas unchanged when `enabled` is false.
pub fn apply(canvas: Canvas, color: u8, enabled: bool) -> Canvas {
    if !enabled {
        return canvas;
    }
    let mut framed = Canvas::new(
        canvas.width() + 2 * BORDER_SIZE,
        canvas.height() + 2 * BORDER_SIZE,
        color,
    );
    framed.blit(&canvas, BORDER_SIZE, BORDER_SIZE);
    framed
}
