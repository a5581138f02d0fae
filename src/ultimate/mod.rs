pub mod client;
pub mod protocol;

pub use client::UltimateClient;

use crate::error::TransportError;

/// What a capture needs from the machine. Reads and writes go through the
/// device's DMA path, which sees BASIC and KERNAL ROM at $A000 and $E000
/// rather than the RAM underneath.
pub trait DeviceControl {
    /// Halt the CPU. Nothing else may run until [`DeviceControl::resume`].
    fn freeze(&mut self) -> Result<(), TransportError>;
    fn resume(&mut self) -> Result<(), TransportError>;
    /// Exactly `length` bytes starting at `address`.
    fn read_memory(&mut self, address: u16, length: usize) -> Result<Vec<u8>, TransportError>;
    fn write_memory(&mut self, address: u16, bytes: &[u8]) -> Result<(), TransportError>;
}
