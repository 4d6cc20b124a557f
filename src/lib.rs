pub use chip8::{Chip8, TimerMode};
pub use constants::{CLOCK_SPEED, TIMER_PERIOD};
pub use cpu::{Cpu, CpuMode};
pub use error::{Chip8Error, Result};
pub use graphics::{FrameBuffer, Graphics};
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use memory::Memory;
pub use opcode::Opcode;
pub use timer::Timer;

mod chip8;
pub mod constants;
mod cpu;
mod error;
mod graphics;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod timer;
