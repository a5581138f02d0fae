use super::canvas::Canvas;
use crate::vic::GraphicsState;

/// Rows hidden at the top and bottom of the canvas by the 24-row window.
///
/// The bands follow YSCROLL: 7-sy rows at the top and 1+sy at the bottom, so
/// with YSCROLL=7 the top band is empty and the bottom one is 8 rows.
pub fn row_bands(state: &GraphicsState) -> Option<(usize, usize)> {
    if state.rsel {
        return None;
    }
    let scroll = state.scroll_y as usize;
    Some((7 - scroll, 1 + scroll))
}

/// Columns hidden at the left and right of the canvas by the 38-column window.
pub fn column_bands(state: &GraphicsState) -> Option<(usize, usize)> {
    if state.csel {
        return None;
    }
    let scroll = state.scroll_x as usize;
    Some((7 - scroll, 9 + scroll))
}

/// Paint the bands the border covers when RSEL or CSEL is clear.
pub fn apply(mut canvas: Canvas, state: &GraphicsState) -> Canvas {
    let (width, height) = (canvas.width(), canvas.height());
    let color = state.border_color;

    if let Some((top, bottom)) = row_bands(state) {
        canvas.fill_rect(0, 0, width, top, color);
        canvas.fill_rect(0, height.saturating_sub(bottom), width, bottom, color);
    }
    if let Some((left, right)) = column_bands(state) {
        canvas.fill_rect(0, 0, left, height, color);
        canvas.fill_rect(width.saturating_sub(right), 0, right, height, color);
    }

    canvas
}

/// Human-readable summary for the state dump.
pub fn describe(state: &GraphicsState) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some((top, bottom)) = row_bands(state) {
        lines.push(format!(
            "24-row mode: blanking {} rows at top, {} at bottom (YSCROLL={})",
            top, bottom, state.scroll_y
        ));
    }
    if let Some((left, right)) = column_bands(state) {
        lines.push(format!(
            "38-column mode: blanking {} columns at left, {} at right (XSCROLL={})",
            left, right, state.scroll_x
        ));
    }
    lines
}
