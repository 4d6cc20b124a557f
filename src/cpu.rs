use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{NUM_REGISTERS, PROGRAM_START, STACK_DEPTH};
use crate::error::{Chip8Error, Result};
use crate::graphics::Graphics;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::{offset_address, Memory};
use crate::opcode::Opcode;
use crate::timer::Timer;

/// Whether the CPU is executing instructions or parked on an `FX0A` key wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuMode {
    Running,
    /// PC points at the waiting `FX0A`; the pressed key will be stored in `register`.
    AwaitingKey { register: u8 },
}

/// # Chip-8 CPU
///
/// ## Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// ## Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// ## Stack
/// - 16 return addresses
/// - (sp) the number of occupied slots; the top of the stack is `stack[sp - 1]`
///
/// ## Timers
/// - 2 8-bit timers (delay & sound)
///     - the sound timer buzzes while it's above 0
///
/// A cycle is a `fetch` followed by a `decode_execute`.
pub struct Cpu {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    pub opcode: Opcode,
    pub(crate) mode: CpuMode,
    pub(crate) screen_updated: bool,
    pub(crate) rng: StdRng,
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A CPU whose `CXKK` results are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Cpu {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: Timer::new(),
            sound_timer: Timer::new(),
            opcode: Opcode::default(),
            mode: CpuMode::Running,
            screen_updated: false,
            rng,
        }
    }

    /// Reads the opcode at the pc and moves the pc on to the next instruction.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&mut self, memory: &Memory) -> Result<()> {
        let high = memory.get(self.pc)?;
        let low = memory.get(offset_address(self.pc, 1)?)?;
        self.opcode = Opcode::from_bytes(high, low);
        self.pc = self.pc.wrapping_add(2);
        Ok(())
    }

    /// Decodes and executes the most recently fetched opcode.
    pub fn decode_execute(
        &mut self,
        memory: &mut Memory,
        graphics: &mut Graphics,
        keypad: &Keypad,
    ) -> Result<()> {
        self.screen_updated = false;
        let instruction = Instruction::decode(self.opcode)?;
        trace!(
            "{} {:?} v{:02X?} i{:04X} pc{:04X} sp{}",
            self.opcode,
            instruction,
            self.v,
            self.i,
            self.pc,
            self.sp
        );
        self.execute(instruction, memory, graphics, keypad)
    }

    /// Completes a pending key wait if a key is held.
    /// Returns true once the CPU is running again.
    pub fn poll_key(&mut self, keypad: &Keypad) -> bool {
        match (self.mode, keypad.pressed_key()) {
            (CpuMode::Running, _) => true,
            (CpuMode::AwaitingKey { register }, Some(key)) => {
                debug!("key {:X} pressed, resuming with V{:X} = {:X}", key, register, key);
                self.v[usize::from(register)] = key;
                self.pc = self.pc.wrapping_add(2);
                self.mode = CpuMode::Running;
                true
            }
            (CpuMode::AwaitingKey { .. }, None) => false,
        }
    }

    pub fn general_reg(&self, index: usize) -> Result<u8> {
        self.v
            .get(index)
            .copied()
            .ok_or(Chip8Error::RegisterIndexInvalid { index })
    }

    pub fn set_general_reg(&mut self, index: usize, value: u8) -> Result<()> {
        let register = self
            .v
            .get_mut(index)
            .ok_or(Chip8Error::RegisterIndexInvalid { index })?;
        *register = value;
        Ok(())
    }

    pub fn mode(&self) -> CpuMode {
        self.mode
    }

    /// Whether the last executed instruction changed the framebuffer.
    pub fn screen_updated(&self) -> bool {
        self.screen_updated
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
