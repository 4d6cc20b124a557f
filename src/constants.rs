use std::time::Duration;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// 4KB of addressable memory, 0x000..=0xFFF
pub const MEMORY_SIZE: usize = 4096;
pub const MAX_ADDRESS: usize = MEMORY_SIZE - 1;

/// ROMs are loaded here and the program counter starts here
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// The font sprite sheet occupies 0x000..0x050
pub const FONT_START: u16 = 0x000;
pub const FONT_GLYPH_SIZE: u16 = 5;

pub const NUM_REGISTERS: usize = 16;
pub const FLAG_REGISTER: usize = 0xF;
pub const STACK_DEPTH: usize = 16;
pub const NUM_KEYS: usize = 16;

/// Nanoseconds per CPU cycle (500Hz)
pub const CLOCK_SPEED: u64 = 2_000_000;

/// Timers count down at 60Hz
pub const TIMER_PERIOD: Duration = Duration::from_micros(16_667);

/// In stepped mode the timers are approximated as ticking once every 8 CPU cycles
pub const CPU_CYCLES_PER_TIMER_CYCLE: u8 = 8;

/// # Sprite Sheet
/// Hexadecimal digits 0..F as 4x5 sprites, one row per byte (high nibble).
/// The glyph for digit `d` starts at `FONT_START + d * FONT_GLYPH_SIZE`.
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
