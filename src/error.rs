use thiserror::Error;

use crate::opcode::Opcode;

/// Everything that can go wrong while loading or running a program.
///
/// Apart from `InvalidKey` inside the key-skip instructions, none of these are
/// recovered from; they indicate a malformed program or a driver bug.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory address {address:#06X} is out of range")]
    AddressOutOfRange { address: usize },

    #[error("register V{index:X} does not exist")]
    RegisterIndexInvalid { index: usize },

    #[error("stack pointer {sp} is outside the call stack")]
    StackPointerInvalid { sp: usize },

    #[error("pixel ({x}, {y}) is off screen")]
    CoordinateOutOfRange { x: usize, y: usize },

    #[error("key {key:#X} is not on the keypad")]
    InvalidKey { key: u8 },

    #[error("invalid instruction {opcode}")]
    InvalidInstruction { opcode: Opcode },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
