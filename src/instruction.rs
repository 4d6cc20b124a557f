use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;

/// Every instruction the interpreter understands, with its operands pulled out of the opcode.
///
/// `x` and `y` are register indices (0x0..=0xF), `kk` is an immediate byte, `addr` a 12-bit
/// address and `n` a 4-bit sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Rts,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    Ske { x: u8, kk: u8 },
    /// 4xkk
    Skne { x: u8, kk: u8 },
    /// 5xy0
    Skre { x: u8, y: u8 },
    /// 6xkk
    Load { x: u8, kk: u8 },
    /// 7xkk
    Add { x: u8, kk: u8 },
    /// 8xy0
    Move { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    Shr { x: u8, y: u8 },
    /// 8xy7
    Subn { x: u8, y: u8 },
    /// 8xyE
    Shl { x: u8, y: u8 },
    /// 9xy0
    Skrne { x: u8, y: u8 },
    /// Annn
    LoadI { addr: u16 },
    /// Bnnn
    JumpV0 { addr: u16 },
    /// Cxkk
    Rand { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    Skpr { x: u8 },
    /// ExA1
    Skup { x: u8 },
    /// Fx07
    MoveDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    LoadDelay { x: u8 },
    /// Fx18
    LoadSound { x: u8 },
    /// Fx1E
    AddI { x: u8 },
    /// Fx29
    LoadSprite { x: u8 },
    /// Fx33
    Bcd { x: u8 },
    /// Fx55
    Store { x: u8 },
    /// Fx65
    Read { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a given Opcode
    pub fn decode(op: Opcode) -> Result<Instruction> {
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Rts,
            (0x1, ..) => Instruction::Jump { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::Ske { x, kk },
            (0x4, ..) => Instruction::Skne { x, kk },
            (0x5, .., 0x0) => Instruction::Skre { x, y },
            (0x6, ..) => Instruction::Load { x, kk },
            (0x7, ..) => Instruction::Add { x, kk },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::Shr { x, y },
            (0x8, .., 0x7) => Instruction::Subn { x, y },
            (0x8, .., 0xE) => Instruction::Shl { x, y },
            (0x9, .., 0x0) => Instruction::Skrne { x, y },
            (0xA, ..) => Instruction::LoadI { addr },
            (0xB, ..) => Instruction::JumpV0 { addr },
            (0xC, ..) => Instruction::Rand { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, .., 0x9, 0xE) => Instruction::Skpr { x },
            (0xE, .., 0xA, 0x1) => Instruction::Skup { x },
            (0xF, .., 0x0, 0x7) => Instruction::MoveDelay { x },
            (0xF, .., 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, .., 0x1, 0x5) => Instruction::LoadDelay { x },
            (0xF, .., 0x1, 0x8) => Instruction::LoadSound { x },
            (0xF, .., 0x1, 0xE) => Instruction::AddI { x },
            (0xF, .., 0x2, 0x9) => Instruction::LoadSprite { x },
            (0xF, .., 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, .., 0x5, 0x5) => Instruction::Store { x },
            (0xF, .., 0x6, 0x5) => Instruction::Read { x },
            _ => return Err(Chip8Error::InvalidInstruction { opcode: op }),
        };
        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(op: u16) -> Instruction {
        Instruction::decode(Opcode(op)).unwrap()
    }

    fn is_invalid(op: u16) -> bool {
        matches!(
            Instruction::decode(Opcode(op)),
            Err(Chip8Error::InvalidInstruction { opcode }) if opcode == Opcode(op)
        )
    }

    #[test]
    fn test_decodes_every_instruction() {
        let cases = [
            (0x00E0, Instruction::Cls),
            (0x00EE, Instruction::Rts),
            (0x1234, Instruction::Jump { addr: 0x234 }),
            (0x2456, Instruction::Call { addr: 0x456 }),
            (0x342A, Instruction::Ske { x: 0x4, kk: 0x2A }),
            (0x4A75, Instruction::Skne { x: 0xA, kk: 0x75 }),
            (0x5AE0, Instruction::Skre { x: 0xA, y: 0xE }),
            (0x63F5, Instruction::Load { x: 0x3, kk: 0xF5 }),
            (0x7B12, Instruction::Add { x: 0xB, kk: 0x12 }),
            (0x8590, Instruction::Move { x: 0x5, y: 0x9 }),
            (0x8101, Instruction::Or { x: 0x1, y: 0x0 }),
            (0x8642, Instruction::And { x: 0x6, y: 0x4 }),
            (0x87F3, Instruction::Xor { x: 0x7, y: 0xF }),
            (0x8264, Instruction::AddReg { x: 0x2, y: 0x6 }),
            (0x8C45, Instruction::Sub { x: 0xC, y: 0x4 }),
            (0x8106, Instruction::Shr { x: 0x1, y: 0x0 }),
            (0x86D7, Instruction::Subn { x: 0x6, y: 0xD }),
            (0x8E0E, Instruction::Shl { x: 0xE, y: 0x0 }),
            (0x9990, Instruction::Skrne { x: 0x9, y: 0x9 }),
            (0xA568, Instruction::LoadI { addr: 0x568 }),
            (0xBABC, Instruction::JumpV0 { addr: 0xABC }),
            (0xC5AF, Instruction::Rand { x: 0x5, kk: 0xAF }),
            (0xD7B5, Instruction::Draw { x: 0x7, y: 0xB, n: 0x5 }),
            (0xE49E, Instruction::Skpr { x: 0x4 }),
            (0xECA1, Instruction::Skup { x: 0xC }),
            (0xF907, Instruction::MoveDelay { x: 0x9 }),
            (0xFD0A, Instruction::WaitKey { x: 0xD }),
            (0xF315, Instruction::LoadDelay { x: 0x3 }),
            (0xF718, Instruction::LoadSound { x: 0x7 }),
            (0xF91E, Instruction::AddI { x: 0x9 }),
            (0xFF29, Instruction::LoadSprite { x: 0xF }),
            (0xF533, Instruction::Bcd { x: 0x5 }),
            (0xF655, Instruction::Store { x: 0x6 }),
            (0xF265, Instruction::Read { x: 0x2 }),
        ];
        for (op, expected) in cases.iter() {
            assert_eq!(decode(*op), *expected, "opcode {:04X}", op);
        }
    }

    #[test]
    fn test_rejects_sys_calls() {
        assert!(is_invalid(0x0000));
        assert!(is_invalid(0x0123));
        assert!(is_invalid(0x00E1));
    }

    #[test]
    fn test_rejects_bad_low_nibbles() {
        assert!(is_invalid(0x5121));
        assert!(is_invalid(0x512F));
        assert!(is_invalid(0x8128));
        assert!(is_invalid(0x812F));
        assert!(is_invalid(0x9121));
    }

    #[test]
    fn test_rejects_bad_low_bytes() {
        assert!(is_invalid(0xE19F));
        assert!(is_invalid(0xE1A2));
        assert!(is_invalid(0xF100));
        assert!(is_invalid(0xF166));
    }
}
