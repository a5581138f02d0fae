use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::snapshot::Snapshot;

/// Write the raw blocks of `snapshot` into `dir`, one file per block.
/// Returns the paths written.
pub fn write_debug_files(dir: &Path, snapshot: &Snapshot) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create dump directory {}", dir.display()))?;

    let blocks = &snapshot.blocks;
    let mut files: Vec<(String, &[u8])> = vec![
        ("vic_regs.bin".to_string(), snapshot.registers.as_slice()),
        ("color_mem.bin".to_string(), blocks.color.as_slice()),
        ("screen_mem.bin".to_string(), blocks.screen.as_slice()),
    ];
    if !blocks.char_or_bitmap.is_empty() {
        let name = if snapshot.state.mode.is_bitmap() {
            "bitmap_mem.bin"
        } else {
            "char_mem.bin"
        };
        files.push((name.to_string(), blocks.char_or_bitmap.as_slice()));
    }
    for (i, pattern) in blocks.sprite_patterns.iter().enumerate() {
        if let Some(pattern) = pattern {
            files.push((format!("sprite{}_data.bin", i), pattern.as_slice()));
        }
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, data) in files {
        let path = dir.join(name);
        std::fs::write(&path, data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Wrote {} ({} bytes)", path.display(), data.len());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MemoryBlocks;
    use crate::vic::registers::{VIC_REGISTER_COUNT, decode};

    fn snapshot(d011: u8) -> Snapshot {
        let mut registers = vec![0u8; VIC_REGISTER_COUNT];
        registers[0x11] = d011;
        let state = decode(&registers, 0x03).unwrap();
        let mut sprite_patterns: [Option<Vec<u8>>; 8] = Default::default();
        sprite_patterns[5] = Some(vec![0xAA; 64]);
        Snapshot {
            registers,
            bank_register: 0x03,
            state,
            blocks: MemoryBlocks {
                screen: vec![0x20; 0x400],
                color: vec![0x0E; 1000],
                char_or_bitmap: vec![0x55; 8000],
                sprite_patterns,
            },
            warnings: Vec::new(),
            bypass: None,
        }
    }

    #[test]
    fn test_bitmap_dump() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_debug_files(dir.path(), &snapshot(0x3B)).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "vic_regs.bin",
                "color_mem.bin",
                "screen_mem.bin",
                "bitmap_mem.bin",
                "sprite5_data.bin"
            ]
        );
        assert_eq!(
            std::fs::read(dir.path().join("bitmap_mem.bin")).unwrap().len(),
            8000
        );
        assert_eq!(
            std::fs::read(dir.path().join("vic_regs.bin")).unwrap().len(),
            VIC_REGISTER_COUNT
        );
    }

    #[test]
    fn test_text_dump_uses_char_name() {
        let dir = tempfile::tempdir().unwrap();
        write_debug_files(&dir.path().join("nested"), &snapshot(0x1B)).unwrap();
        assert!(dir.path().join("nested/char_mem.bin").exists());
        assert!(!dir.path().join("nested/bitmap_mem.bin").exists());
    }
}
