use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use vip8::{TimerMode, TIMER_PERIOD};

mod display;
mod keymap;
mod run;

/// Nanoseconds in a second, for turning an instruction rate into a cycle time
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const TIMER_HZ: u64 = 60;

#[derive(Parser, Debug)]
#[command(version, about = "A CHIP-8 interpreter", long_about = None)]
struct Args {
    #[arg(help = "Path to the ROM file to run")]
    rom: PathBuf,

    #[arg(
        short,
        long,
        default_value_t = NANOS_PER_SECOND / vip8::CLOCK_SPEED,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Instructions per second"
    )]
    ips: u64,

    #[arg(
        long,
        help = "Count the timers down on their own threads instead of alongside the CPU"
    )]
    threaded_timers: bool,

    #[arg(short, long, default_value_t = 10, help = "Window pixels per Chip-8 pixel")]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let timer_mode = if args.threaded_timers {
        TimerMode::Threaded(TIMER_PERIOD)
    } else {
        TimerMode::Stepped {
            cycles_per_tick: (args.ips / TIMER_HZ).clamp(1, u64::from(u8::MAX)) as u8,
        }
    };

    run::run(run::Settings {
        rom: args.rom,
        cycle_time: Duration::from_nanos(NANOS_PER_SECOND / args.ips),
        timer_mode,
        scale: args.scale,
    })
}
