use crate::capture::bypass::BypassReport;
use crate::error::CaptureWarning;
use crate::vic::GraphicsState;

/// Screen memory is fetched as a full 1 KiB so the sprite pointers at +$3F8
/// come along.
pub const SCREEN_FETCH_LEN: usize = 0x400;
/// 40x25 character cells.
pub const SCREEN_CELLS: usize = 1000;
pub const CHARSET_LEN: usize = 0x800;
pub const BITMAP_LEN: usize = 8000;
pub const SPRITE_BLOCK_LEN: usize = 64;

/// Raw memory fetched for one capture. Read-only input to rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBlocks {
    pub screen: Vec<u8>,
    pub color: Vec<u8>,
    /// The 2 KiB character set in text modes, the 8000-byte bitmap in bitmap
    /// modes, empty in the invalid mode.
    pub char_or_bitmap: Vec<u8>,
    /// 64-byte patterns, fetched only for enabled sprites.
    pub sprite_patterns: [Option<Vec<u8>>; 8],
}

/// Everything one capture produced before rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// $D000-$D02F as read.
    pub registers: Vec<u8>,
    /// CIA2 port A.
    pub bank_register: u8,
    pub state: GraphicsState,
    pub blocks: MemoryBlocks,
    pub warnings: Vec<CaptureWarning>,
    /// Set when the ROM bypass ran, whether it succeeded or not.
    pub bypass: Option<BypassReport>,
}
