//! The NMI routine that copies RAM hidden under a ROM window.
//!
//! The Ultimate's DMA path always sees BASIC and KERNAL ROM, but the 6502 can
//! bank them out through the processor port at $01. The routine is entered
//! through the RAM NMI vector, banks the ROMs out, copies the 32 pages under
//! the window into a scratch buffer, puts $01 back, sets the marker byte and
//! chains to the original NMI handler with A, X and Y untouched.

use crate::config::BypassLayout;

/// Size of the assembled routine.
pub const ROUTINE_LEN: usize = 0x3A;
/// Offset of the high byte of the `STA scratch,Y` operand. The routine
/// increments it after each page.
pub const STORE_HIGH_OFFSET: usize = 0x1E;
/// 32 pages of 256 bytes.
pub const PAGES: u8 = 0x20;

const PROCESSOR_PORT: u8 = 0x01;
/// LORAM/HIRAM/CHAREN = %101: RAM everywhere except I/O at $D000.
const RAM_WITH_IO: u8 = 0x05;

mod op {
    pub const PHA: u8 = 0x48;
    pub const PLA: u8 = 0x68;
    pub const TXA: u8 = 0x8A;
    pub const TAX: u8 = 0xAA;
    pub const TYA: u8 = 0x98;
    pub const TAY: u8 = 0xA8;
    pub const LDA_IMM: u8 = 0xA9;
    pub const LDA_ZP: u8 = 0xA5;
    pub const LDA_IND_Y: u8 = 0xB1;
    pub const LDX_IMM: u8 = 0xA2;
    pub const LDY_IMM: u8 = 0xA0;
    pub const STA_ZP: u8 = 0x85;
    pub const STA_ABS: u8 = 0x8D;
    pub const STA_ABS_Y: u8 = 0x99;
    pub const AND_IMM: u8 = 0x29;
    pub const ORA_IMM: u8 = 0x09;
    pub const INY: u8 = 0xC8;
    pub const DEX: u8 = 0xCA;
    pub const INC_ZP: u8 = 0xE6;
    pub const INC_ABS: u8 = 0xEE;
    pub const BNE: u8 = 0xD0;
    pub const JMP_ABS: u8 = 0x4C;
}

/// Assemble the routine for `layout`, copying from page `source_page`
/// ($A0 or $E0) and chaining to `original_vector` when done.
pub fn build(layout: &BypassLayout, source_page: u8, original_vector: u16) -> Vec<u8> {
    let zp = layout.zero_page_pointer;
    let [scratch_lo, scratch_hi] = layout.scratch_address.to_le_bytes();
    let [marker_lo, marker_hi] = layout.marker_address.to_le_bytes();
    let [vector_lo, vector_hi] = original_vector.to_le_bytes();
    let [self_lo, self_hi] = layout
        .inject_address
        .wrapping_add(STORE_HIGH_OFFSET as u16)
        .to_le_bytes();

    let mut code = Vec::with_capacity(ROUTINE_LEN);

    // save A, X, Y and the processor port
    code.extend_from_slice(&[op::PHA, op::TXA, op::PHA, op::TYA, op::PHA]);
    code.extend_from_slice(&[op::LDA_ZP, PROCESSOR_PORT, op::PHA]);
    // bank out BASIC and KERNAL
    code.extend_from_slice(&[op::AND_IMM, 0xF8, op::ORA_IMM, RAM_WITH_IO]);
    code.extend_from_slice(&[op::STA_ZP, PROCESSOR_PORT]);
    // source pointer
    code.extend_from_slice(&[op::LDA_IMM, 0x00, op::STA_ZP, zp]);
    code.extend_from_slice(&[op::LDA_IMM, source_page, op::STA_ZP, zp.wrapping_add(1)]);
    code.extend_from_slice(&[op::LDX_IMM, PAGES, op::LDY_IMM, 0x00]);
    // copy:
    code.extend_from_slice(&[op::LDA_IND_Y, zp]);
    code.extend_from_slice(&[op::STA_ABS_Y, scratch_lo, scratch_hi]);
    code.extend_from_slice(&[op::INY, op::BNE, 0xF8]);
    code.extend_from_slice(&[op::INC_ZP, zp.wrapping_add(1)]);
    code.extend_from_slice(&[op::INC_ABS, self_lo, self_hi]);
    code.extend_from_slice(&[op::DEX, op::BNE, 0xF0]);
    // restore the port, flag completion
    code.extend_from_slice(&[op::PLA, op::STA_ZP, PROCESSOR_PORT]);
    code.extend_from_slice(&[op::LDA_IMM, layout.sentinel]);
    code.extend_from_slice(&[op::STA_ABS, marker_lo, marker_hi]);
    code.extend_from_slice(&[op::PLA, op::TAY, op::PLA, op::TAX, op::PLA]);
    code.extend_from_slice(&[op::JMP_ABS, vector_lo, vector_hi]);

    debug_assert_eq!(code.len(), ROUTINE_LEN);
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routine_layout() {
        let layout = BypassLayout::default();
        let code = build(&layout, 0xE0, 0xFE47);

        assert_eq!(code.len(), ROUTINE_LEN);
        assert_eq!(code[0], op::PHA);
        // STA $6000,Y with the high byte where the INC expects it
        assert_eq!(&code[0x1C..0x1F], &[op::STA_ABS_Y, 0x00, 0x60]);
        assert_eq!(code[STORE_HIGH_OFFSET], 0x60);
        // INC $035A = $033C + $1E
        assert_eq!(&code[0x24..0x27], &[op::INC_ABS, 0x5A, 0x03]);
        assert_eq!(&code[0x12..0x16], &[op::LDA_IMM, 0xE0, op::STA_ZP, 0xFC]);
        assert_eq!(&code[0x2D..0x32], &[op::LDA_IMM, 0xA5, op::STA_ABS, 0xA7, 0x02]);
        assert_eq!(&code[0x37..], &[op::JMP_ABS, 0x47, 0xFE]);
    }

    #[test]
    fn test_branches_land_on_copy_loop() {
        let code = build(&BypassLayout::default(), 0xA0, 0xFE47);
        // BNE at $20 and $28; target is the LDA (zp),Y at $1A
        let target = |at: usize| (at as isize + 2 + code[at + 1] as i8 as isize) as usize;
        assert_eq!(code[0x1A], op::LDA_IND_Y);
        assert_eq!(code[0x20], op::BNE);
        assert_eq!(target(0x20), 0x1A);
        assert_eq!(code[0x28], op::BNE);
        assert_eq!(target(0x28), 0x1A);
    }
}
