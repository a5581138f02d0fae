//! Snapshot to pixels: mode rendering, sprites, blanking, border.

pub mod blanking;
pub mod border;
pub mod canvas;
pub mod graphics_common;
pub mod mode;
pub mod sprites;

pub use canvas::Canvas;
pub use graphics_common::canvas_to_image;

use crate::config::CaptureOptions;
use crate::error::{CaptureWarning, MalformedInput};
use crate::snapshot::MemoryBlocks;
use crate::vic::GraphicsState;

/// Final canvas plus anything the renderer had to skip.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub canvas: Canvas,
    pub warnings: Vec<CaptureWarning>,
}

/// Run every stage in order. Each stage takes the canvas by value and hands it
/// to the next.
pub fn render_pipeline(
    state: &GraphicsState,
    blocks: &MemoryBlocks,
    options: &CaptureOptions,
) -> Result<RenderOutput, MalformedInput> {
    let mut warnings = Vec::new();

    let mut canvas = mode::render(state, blocks)?;
    if options.sprites {
        canvas = sprites::composite(canvas, state, &blocks.sprite_patterns, &mut warnings)?;
    }
    let canvas = blanking::apply(canvas, state);
    let canvas = border::apply(canvas, state.border_color, options.border);

    Ok(RenderOutput { canvas, warnings })
}
