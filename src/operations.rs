use log::debug;
use rand::Rng;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_START, STACK_DEPTH,
};
use crate::cpu::{Cpu, CpuMode};
use crate::error::{Chip8Error, Result};
use crate::graphics::Graphics;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::{offset_address, Memory};

impl Cpu {
    pub(crate) fn execute(
        &mut self,
        instruction: Instruction,
        memory: &mut Memory,
        graphics: &mut Graphics,
        keypad: &Keypad,
    ) -> Result<()> {
        use Instruction::*;

        match instruction {
            Cls => self.clr(graphics),
            Rts => return self.rts(),
            Jump { addr } => self.pc = addr,
            Call { addr } => return self.call(addr),
            Ske { x, kk } => self.skip_if(self.reg(x) == kk),
            Skne { x, kk } => self.skip_if(self.reg(x) != kk),
            Skre { x, y } => self.skip_if(self.reg(x) == self.reg(y)),
            Load { x, kk } => self.set_reg(x, kk),
            Add { x, kk } => self.set_reg(x, self.reg(x).wrapping_add(kk)),
            Move { x, y } => self.set_reg(x, self.reg(y)),
            Or { x, y } => self.set_reg(x, self.reg(x) | self.reg(y)),
            And { x, y } => self.set_reg(x, self.reg(x) & self.reg(y)),
            Xor { x, y } => self.set_reg(x, self.reg(x) ^ self.reg(y)),
            AddReg { x, y } => self.addr(x, y),
            Sub { x, y } => self.sub(x, y),
            Shr { x, y } => self.shr(x, y),
            Subn { x, y } => self.subn(x, y),
            Shl { x, y } => self.shl(x, y),
            Skrne { x, y } => self.skip_if(self.reg(x) != self.reg(y)),
            LoadI { addr } => self.i = addr,
            JumpV0 { addr } => self.pc = addr + u16::from(self.v[0x0]),
            Rand { x, kk } => self.rand(x, kk),
            Draw { x, y, n } => return self.draw(x, y, n, memory, graphics),
            Skpr { x } => self.skip_if(Self::key_down(keypad, self.reg(x))),
            Skup { x } => self.skip_if(!Self::key_down(keypad, self.reg(x))),
            MoveDelay { x } => self.set_reg(x, self.delay_timer.get()),
            WaitKey { x } => self.keyd(x, keypad),
            LoadDelay { x } => self.delay_timer.set(self.reg(x)),
            LoadSound { x } => self.sound_timer.set(self.reg(x)),
            AddI { x } => self.i = self.i.wrapping_add(u16::from(self.reg(x))),
            LoadSprite { x } => self.ldspr(x),
            Bcd { x } => return self.bcd(x, memory),
            Store { x } => return self.stor(x, memory),
            Read { x } => return self.read(x, memory),
        }
        Ok(())
    }

    fn reg(&self, x: u8) -> u8 {
        self.v[usize::from(x)]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.v[usize::from(x)] = value;
    }

    fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    /// clear
    fn clr(&mut self, graphics: &mut Graphics) {
        graphics.clear();
        self.screen_updated = true;
    }

    /// PC = STACK.pop()
    fn rts(&mut self) -> Result<()> {
        let sp = usize::from(self.sp);
        if sp == 0 || sp > STACK_DEPTH {
            return Err(Chip8Error::StackPointerInvalid { sp });
        }
        self.pc = self.stack[sp - 1];
        self.sp -= 1;
        Ok(())
    }

    /// STACK.push(PC); PC = addr
    fn call(&mut self, addr: u16) -> Result<()> {
        let sp = usize::from(self.sp);
        if sp >= STACK_DEPTH {
            return Err(Chip8Error::StackPointerInvalid { sp });
        }
        self.sp += 1;
        self.stack[sp] = self.pc;
        self.pc = addr;
        Ok(())
    }

    /// Vx += Vy; VF = overflow
    fn addr(&mut self, x: u8, y: u8) {
        let (sum, overflowed) = self.reg(x).overflowing_add(self.reg(y));
        self.set_flag(overflowed);
        self.set_reg(x, sum);
    }

    /// Vx -= Vy; VF = !borrow
    fn sub(&mut self, x: u8, y: u8) {
        let (vx, vy) = (self.reg(x), self.reg(y));
        self.set_flag(vx >= vy);
        self.set_reg(x, vx.wrapping_sub(vy));
    }

    /// Vx = Vy >> 1; VF = shifted out bit
    fn shr(&mut self, x: u8, y: u8) {
        let vy = self.reg(y);
        self.set_flag(vy & 0x01 == 0x01);
        self.set_reg(x, vy >> 1);
    }

    /// Vx = Vy - Vx; VF = !borrow
    fn subn(&mut self, x: u8, y: u8) {
        let (vx, vy) = (self.reg(x), self.reg(y));
        self.set_flag(vy >= vx);
        self.set_reg(x, vy.wrapping_sub(vx));
    }

    /// Vx = Vy << 1; VF = shifted out bit
    fn shl(&mut self, x: u8, y: u8) {
        let vy = self.reg(y);
        self.set_flag(vy & 0x80 == 0x80);
        self.set_reg(x, vy << 1);
    }

    /// Vx = rand_byte & kk
    fn rand(&mut self, x: u8, kk: u8) {
        let rand_byte: u8 = self.rng.gen();
        self.set_reg(x, rand_byte & kk);
    }

    /// draw_sprite(x=Vx y=Vy size=n)
    /// XORs a sprite from memory i..i+n at position x, y on the screen with wrapping.
    /// Sets VF if any pixels were erased
    fn draw(
        &mut self,
        x: u8,
        y: u8,
        n: u8,
        memory: &Memory,
        graphics: &mut Graphics,
    ) -> Result<()> {
        let origin_x = usize::from(self.reg(x)) % DISPLAY_WIDTH;
        let origin_y = usize::from(self.reg(y)) % DISPLAY_HEIGHT;
        let mut collided = false;

        for row in 0..usize::from(n) {
            let sprite_row = memory.get(offset_address(self.i, row)?)?;
            let py = (origin_y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let px = (origin_x + bit) % DISPLAY_WIDTH;
                let pixel = (sprite_row >> (7 - bit)) & 0x1 == 0x1;
                collided |= graphics.draw(px, py, pixel)?;
            }
        }

        self.set_flag(collided);
        self.screen_updated = true;
        Ok(())
    }

    /// Keys outside the keypad count as released.
    fn key_down(keypad: &Keypad, key: u8) -> bool {
        keypad.is_pressed(key).unwrap_or(false)
    }

    /// await keypress for Vx
    /// Parks the CPU on this instruction until a key is pressed, unless one already is
    fn keyd(&mut self, x: u8, keypad: &Keypad) {
        match keypad.pressed_key() {
            Some(key) => {
                self.set_reg(x, key);
                self.mode = CpuMode::Running;
            }
            None => {
                debug!("waiting for a key press for V{:X}", x);
                self.pc = self.pc.wrapping_sub(2);
                self.mode = CpuMode::AwaitingKey { register: x };
            }
        }
    }

    /// I = address of the font glyph for the low nibble of Vx
    fn ldspr(&mut self, x: u8) {
        self.i = FONT_START + u16::from(self.reg(x) & 0x0F) * FONT_GLYPH_SIZE;
    }

    /// mem[I..I+3] = bcd(Vx)
    fn bcd(&mut self, x: u8, memory: &mut Memory) -> Result<()> {
        let vx = self.reg(x);
        let digits = [vx / 100, vx / 10 % 10, vx % 10];
        for (offset, digit) in digits.iter().enumerate() {
            memory.set(offset_address(self.i, offset)?, *digit)?;
        }
        Ok(())
    }

    /// mem[I..=I+x] = V0..=Vx; I += x + 1
    fn stor(&mut self, x: u8, memory: &mut Memory) -> Result<()> {
        for register in 0..=usize::from(x) {
            memory.set(offset_address(self.i, register)?, self.v[register])?;
        }
        self.i = offset_address(self.i, usize::from(x) + 1)?;
        Ok(())
    }

    /// V0..=Vx = mem[I..=I+x]; I += x + 1
    fn read(&mut self, x: u8, memory: &Memory) -> Result<()> {
        for register in 0..=usize::from(x) {
            self.v[register] = memory.get(offset_address(self.i, register)?)?;
        }
        self.i = offset_address(self.i, usize::from(x) + 1)?;
        Ok(())
    }
}
