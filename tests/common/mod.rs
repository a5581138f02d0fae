//! A fake Ultimate 64 for integration tests.
//!
//! DMA reads see BASIC and KERNAL ROM at $A000/$E000 like the real device.
//! Resuming with CIA2 timer A armed runs the NMI handler found through the
//! RAM vector at $0318 on a tiny 6502 core until it reaches the KERNAL
//! handler.

#![allow(dead_code)]

use vicsnap::error::TransportError;
use vicsnap::ultimate::DeviceControl;

pub const KERNAL_NMI_HANDLER: u16 = 0xFE47;
pub const BASIC_ROM_FILL: u8 = 0xB0;
pub const KERNAL_ROM_FILL: u8 = 0xE0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Freeze,
    Resume,
    Read(u16, usize),
    Write(u16, Vec<u8>),
}

pub struct SimDevice {
    pub ram: Vec<u8>,
    pub basic_rom: Vec<u8>,
    pub kernal_rom: Vec<u8>,
    pub frozen: bool,
    /// When false, the armed NMI never fires.
    pub nmi_connected: bool,
    pub calls: Vec<Call>,
    /// Fail the n-th write (0-based), once.
    pub fail_write_at: Option<usize>,
    /// Fail the n-th freeze (0-based), once.
    pub fail_freeze_at: Option<usize>,
    /// Fail every resume.
    pub fail_resume: bool,
    /// Fail any read starting at this address.
    pub fail_read_address: Option<u16>,
    /// The read at this address that comes back one byte short, counting
    /// from 0, once.
    pub short_read_at: Option<(u16, usize)>,
    pub nmi_runs: usize,
    writes: usize,
    freezes: usize,
}

fn injected(operation: &'static str) -> TransportError {
    TransportError::Status {
        operation,
        status: 500,
    }
}

impl SimDevice {
    pub fn new() -> Self {
        let mut ram = vec![0u8; 0x10000];
        ram[0x0001] = 0x37;
        ram[0x0318..0x031A].copy_from_slice(&KERNAL_NMI_HANDLER.to_le_bytes());
        ram[0xDD00] = 0x97;
        Self {
            ram,
            basic_rom: vec![BASIC_ROM_FILL; 0x2000],
            kernal_rom: vec![KERNAL_ROM_FILL; 0x2000],
            frozen: false,
            nmi_connected: true,
            calls: Vec::new(),
            fail_write_at: None,
            fail_freeze_at: None,
            fail_resume: false,
            fail_read_address: None,
            short_read_at: None,
            nmi_runs: 0,
            writes: 0,
            freezes: 0,
        }
    }

    /// Set a VIC-II register ($D000 + `reg`).
    pub fn vic(&mut self, reg: usize, value: u8) -> &mut Self {
        self.ram[0xD000 + reg] = value;
        self
    }

    pub fn fill(&mut self, address: usize, len: usize, value: u8) -> &mut Self {
        self.ram[address..address + len].fill(value);
        self
    }

    pub fn writes(&self) -> Vec<(u16, Vec<u8>)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Write(a, d) => Some((*a, d.clone())),
                _ => None,
            })
            .collect()
    }

    fn dma_read(&self, address: usize) -> u8 {
        match address {
            0xA000..=0xBFFF => self.basic_rom[address - 0xA000],
            0xE000..=0xFFFF => self.kernal_rom[address - 0xE000],
            _ => self.ram[address],
        }
    }

    /// CIA2 timer A started with its NMI enabled.
    fn nmi_armed(&self) -> bool {
        self.ram[0xDD0D] & 0x81 == 0x81 && self.ram[0xDD0E] & 0x01 != 0
    }

    fn fire_nmi(&mut self) {
        let vector = u16::from_le_bytes([self.ram[0x0318], self.ram[0x0319]]);
        self.ram[0xDD0E] &= !0x01;
        self.nmi_runs += 1;
        Cpu::new(vector).run_until(self, KERNAL_NMI_HANDLER);
    }
}

impl DeviceControl for SimDevice {
    fn freeze(&mut self) -> Result<(), TransportError> {
        self.calls.push(Call::Freeze);
        let n = self.freezes;
        self.freezes += 1;
        if self.fail_freeze_at == Some(n) {
            self.fail_freeze_at = None;
            return Err(injected("pause"));
        }
        self.frozen = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), TransportError> {
        self.calls.push(Call::Resume);
        if self.fail_resume {
            return Err(injected("resume"));
        }
        self.frozen = false;
        if self.nmi_connected && self.nmi_armed() {
            self.fire_nmi();
        }
        Ok(())
    }

    fn read_memory(&mut self, address: u16, length: usize) -> Result<Vec<u8>, TransportError> {
        self.calls.push(Call::Read(address, length));
        if self.fail_read_address == Some(address) {
            return Err(injected("readmem"));
        }
        let start = address as usize;
        let length = match self.short_read_at {
            Some((at, 0)) if at == address => {
                self.short_read_at = None;
                length.saturating_sub(1)
            }
            Some((at, n)) if at == address => {
                self.short_read_at = Some((at, n - 1));
                length
            }
            _ => length,
        };
        Ok((start..start + length).map(|a| self.dma_read(a)).collect())
    }

    fn write_memory(&mut self, address: u16, bytes: &[u8]) -> Result<(), TransportError> {
        self.calls.push(Call::Write(address, bytes.to_vec()));
        let n = self.writes;
        self.writes += 1;
        if self.fail_write_at == Some(n) {
            self.fail_write_at = None;
            return Err(injected("writemem"));
        }
        let start = address as usize;
        self.ram[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

/// Just enough of a 6502 to run the copy routine.
struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    zero: bool,
}

impl Cpu {
    fn new(pc: u16) -> Self {
        Self {
            a: 0x11,
            x: 0x22,
            y: 0x33,
            sp: 0xF0,
            pc,
            zero: false,
        }
    }

    /// CPU view of memory, following the LORAM/HIRAM bits of $01.
    fn read(dev: &SimDevice, address: u16) -> u8 {
        let port = dev.ram[0x0001];
        let a = address as usize;
        match a {
            0xA000..=0xBFFF if port & 0x03 == 0x03 => dev.basic_rom[a - 0xA000],
            0xE000..=0xFFFF if port & 0x02 != 0 => dev.kernal_rom[a - 0xE000],
            _ => dev.ram[a],
        }
    }

    fn fetch(&mut self, dev: &SimDevice) -> u8 {
        let b = Self::read(dev, self.pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    fn fetch16(&mut self, dev: &SimDevice) -> u16 {
        let lo = self.fetch(dev);
        let hi = self.fetch(dev);
        u16::from_le_bytes([lo, hi])
    }

    fn push(&mut self, dev: &mut SimDevice, value: u8) {
        dev.ram[0x0100 + self.sp as usize] = value;
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull(&mut self, dev: &SimDevice) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        dev.ram[0x0100 + self.sp as usize]
    }

    fn set_z(&mut self, value: u8) -> u8 {
        self.zero = value == 0;
        value
    }

    fn run_until(&mut self, dev: &mut SimDevice, stop: u16) {
        for _ in 0..200_000 {
            if self.pc == stop {
                return;
            }
            let opcode = self.fetch(dev);
            match opcode {
                0x48 => self.push(dev, self.a),
                0x68 => {
                    let v = self.pull(dev);
                    self.a = self.set_z(v);
                }
                0x8A => self.a = self.set_z(self.x),
                0xAA => self.x = self.set_z(self.a),
                0x98 => self.a = self.set_z(self.y),
                0xA8 => self.y = self.set_z(self.a),
                0xA9 => {
                    let v = self.fetch(dev);
                    self.a = self.set_z(v);
                }
                0xA5 => {
                    let zp = self.fetch(dev);
                    let v = Self::read(dev, zp as u16);
                    self.a = self.set_z(v);
                }
                0xB1 => {
                    let zp = self.fetch(dev) as u16;
                    let base = u16::from_le_bytes([
                        Self::read(dev, zp),
                        Self::read(dev, (zp + 1) & 0xFF),
                    ]);
                    let v = Self::read(dev, base.wrapping_add(self.y as u16));
                    self.a = self.set_z(v);
                }
                0xA2 => {
                    let v = self.fetch(dev);
                    self.x = self.set_z(v);
                }
                0xA0 => {
                    let v = self.fetch(dev);
                    self.y = self.set_z(v);
                }
                0x85 => {
                    let zp = self.fetch(dev);
                    dev.ram[zp as usize] = self.a;
                }
                0x8D => {
                    let addr = self.fetch16(dev);
                    dev.ram[addr as usize] = self.a;
                }
                0x99 => {
                    let addr = self.fetch16(dev).wrapping_add(self.y as u16);
                    dev.ram[addr as usize] = self.a;
                }
                0x29 => {
                    let v = self.fetch(dev);
                    self.a = self.set_z(self.a & v);
                }
                0x09 => {
                    let v = self.fetch(dev);
                    self.a = self.set_z(self.a | v);
                }
                0xC8 => self.y = self.set_z(self.y.wrapping_add(1)),
                0xCA => self.x = self.set_z(self.x.wrapping_sub(1)),
                0xE6 => {
                    let zp = self.fetch(dev) as usize;
                    let v = dev.ram[zp].wrapping_add(1);
                    dev.ram[zp] = self.set_z(v);
                }
                0xEE => {
                    let addr = self.fetch16(dev) as usize;
                    let v = dev.ram[addr].wrapping_add(1);
                    dev.ram[addr] = self.set_z(v);
                }
                0xD0 => {
                    let offset = self.fetch(dev) as i8;
                    if !self.zero {
                        self.pc = self.pc.wrapping_add(offset as u16);
                    }
                }
                0x4C => self.pc = self.fetch16(dev),
                other => panic!("unsupported opcode ${:02X} at ${:04X}", other, self.pc - 1),
            }
        }
        panic!("NMI handler did not reach ${:04X}", stop);
    }
}
