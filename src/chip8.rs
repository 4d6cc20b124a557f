use std::io::Read;
use std::time::Duration;

use log::{debug, info};

use crate::constants::{
    CPU_CYCLES_PER_TIMER_CYCLE, FONT_START, MAX_ROM_SIZE, NUM_KEYS, PROGRAM_START, SPRITE_SHEET,
};
use crate::cpu::{Cpu, CpuMode};
use crate::error::{Chip8Error, Result};
use crate::graphics::{FrameBuffer, Graphics};
use crate::keypad::Keypad;
use crate::memory::{offset_address, Memory};

/// How the delay and sound timers are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Each timer counts down on its own thread once per period.
    Threaded(Duration),
    /// The timers count down once every `cycles_per_tick` calls to `emulate_cycle`.
    Stepped { cycles_per_tick: u8 },
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Stepped {
            cycles_per_tick: CPU_CYCLES_PER_TIMER_CYCLE,
        }
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the `cpu` and the `memory`, `graphics` and `keypad` it operates on
///  - whether the frame buffer changed since the display last took a frame
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
/// - asking whether the buzzer should sound
pub struct Chip8 {
    cpu: Cpu,
    memory: Memory,
    graphics: Graphics,
    keypad: Keypad,
    timer_mode: TimerMode,
    timer_counter: u8,
    draw_flag: bool,
}

impl Chip8 {
    pub fn new(timer_mode: TimerMode) -> Result<Self> {
        Self::with_cpu(Cpu::new(), timer_mode)
    }

    /// Builds a machine around an existing CPU, e.g. one with a seeded rng.
    pub fn with_cpu(mut cpu: Cpu, timer_mode: TimerMode) -> Result<Self> {
        let mut memory = Memory::new();
        for (offset, byte) in SPRITE_SHEET.iter().enumerate() {
            memory.set(offset_address(FONT_START, offset)?, *byte)?;
        }

        if let TimerMode::Threaded(period) = timer_mode {
            cpu.delay_timer.start(period);
            cpu.sound_timer.start(period);
        }

        Ok(Chip8 {
            cpu,
            memory,
            graphics: Graphics::new(),
            keypad: Keypad::new(),
            timer_mode,
            timer_counter: 0,
            draw_flag: false,
        })
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader over a raw program image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        // One byte past the limit is enough to know the image won't fit
        let mut rom = Vec::new();
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }

        for (offset, byte) in rom.iter().enumerate() {
            self.memory
                .set(offset_address(PROGRAM_START, offset)?, *byte)?;
        }
        info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.keypad.press(key)
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.keypad.release(key)
    }

    /// Replaces the state of the whole keypad
    pub fn update_keys(&mut self, snapshot: &[bool; NUM_KEYS]) -> Result<()> {
        self.keypad.update(snapshot)
    }

    /// Advances the machine by a single cycle
    /// - while awaiting a keypress only checks whether one arrived
    /// - otherwise fetches and executes the next opcode
    /// - steps the timers if they aren't running on their own
    pub fn emulate_cycle(&mut self) -> Result<()> {
        match self.cpu.mode() {
            CpuMode::Running => {
                self.cpu.fetch(&self.memory)?;
                self.cpu
                    .decode_execute(&mut self.memory, &mut self.graphics, &self.keypad)?;
                self.draw_flag |= self.cpu.screen_updated();
            }
            CpuMode::AwaitingKey { .. } => {
                self.cpu.poll_key(&self.keypad);
            }
        }
        self.advance_timers();
        Ok(())
    }

    /// Counts cycles in stepped mode and ticks both timers every `cycles_per_tick` of them
    fn advance_timers(&mut self) {
        if let TimerMode::Stepped { cycles_per_tick } = self.timer_mode {
            self.timer_counter = self.timer_counter.saturating_add(1);
            if self.timer_counter >= cycles_per_tick {
                self.timer_counter = 0;
                self.cpu.delay_timer.tick();
                self.cpu.sound_timer.tick();
            }
        }
    }

    /// Whether the frame buffer changed since the last `take_frame`
    pub fn should_draw(&self) -> bool {
        self.draw_flag
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            debug!("frame taken");
            Some(self.graphics.frame_buffer())
        } else {
            None
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<bool> {
        self.graphics.get(x, y)
    }

    /// The buzzer sounds for as long as the sound timer is above 0
    pub fn should_buzz(&self) -> bool {
        self.cpu.sound_timer.get() > 0
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }
}
