use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8::{Chip8, TimerMode};

use crate::display::Display;
use crate::keymap::keymap;

pub struct Settings {
    pub rom: PathBuf,
    pub cycle_time: Duration,
    pub timer_mode: TimerMode,
    pub scale: u32,
}

/// Stands in for a tone generator; only reports when the buzzer turns on or off.
#[derive(Default)]
struct Buzzer {
    on: bool,
}

impl Buzzer {
    fn update(&mut self, should_buzz: bool) {
        if should_buzz != self.on {
            self.on = should_buzz;
            info!("buzzer {}", if should_buzz { "on" } else { "off" });
        }
    }
}

pub fn run(settings: Settings) -> Result<()> {
    let mut chip8 = Chip8::new(settings.timer_mode)?;

    // Load ROM
    let file = File::open(&settings.rom)
        .with_context(|| format!("unable to open {}", settings.rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, settings.scale)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;
    let mut buzzer = Buzzer::default();

    let mut last_cycle = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        // If the draw flag is set, take and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc)?,
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc)?,
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state; any error means the program can't continue
        if let Err(e) = chip8.emulate_cycle() {
            let cpu = chip8.cpu();
            error!(
                "halted at pc {:#06X} executing {}: {}",
                cpu.pc, cpu.opcode, e
            );
            return Err(e.into());
        }
        buzzer.update(chip8.should_buzz());

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if !fast_forward && settings.cycle_time > elapsed_cycle_time {
            std::thread::sleep(settings.cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("quitting");
    Ok(())
}
