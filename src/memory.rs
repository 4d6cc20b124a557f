use crate::constants::{MAX_ADDRESS, MEMORY_SIZE};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of flat, byte-addressable RAM.
///
/// - 0x000..0x050 holds the font sprite sheet
/// - 0x200.. is where ROMs are loaded
///
/// Every access is bounds checked against `MAX_ADDRESS`.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEMORY_SIZE],
        }
    }

    pub fn get(&self, address: u16) -> Result<u8> {
        self.bytes
            .get(usize::from(address))
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange {
                address: usize::from(address),
            })
    }

    pub fn set(&mut self, address: u16, value: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(usize::from(address))
            .ok_or(Chip8Error::AddressOutOfRange {
                address: usize::from(address),
            })?;
        *cell = value;
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `base + offset` to an address, failing if the sum can't be represented.
///
/// Addresses that fit in a u16 but exceed `MAX_ADDRESS` are left for `Memory` to reject.
pub(crate) fn offset_address(base: u16, offset: usize) -> Result<u16> {
    let address = usize::from(base) + offset;
    if address > usize::from(u16::MAX) {
        Err(Chip8Error::AddressOutOfRange { address })
    } else {
        Ok(address as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_starts_zeroed() {
        let memory = Memory::new();
        assert!((0..=MAX_ADDRESS as u16).all(|a| memory.get(a).unwrap() == 0));
    }

    #[test]
    fn test_set_then_get_every_address() {
        let mut memory = Memory::new();
        for address in 0..=MAX_ADDRESS as u16 {
            memory.set(address, (address % 251) as u8).unwrap();
        }
        for address in 0..=MAX_ADDRESS as u16 {
            assert_eq!(memory.get(address).unwrap(), (address % 251) as u8);
        }
    }

    #[test]
    fn test_get_out_of_range() {
        let memory = Memory::new();
        assert!(matches!(
            memory.get(0x1000),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
        assert!(matches!(
            memory.get(u16::MAX),
            Err(Chip8Error::AddressOutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_out_of_range() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.set(0x1000, 0xAB),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
    }

    #[test]
    fn test_offset_address() {
        assert_eq!(offset_address(0x200, 3).unwrap(), 0x203);
        assert!(matches!(
            offset_address(u16::MAX, 1),
            Err(Chip8Error::AddressOutOfRange { address: 0x10000 })
        ));
    }
}
