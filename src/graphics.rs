use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::{Chip8Error, Result};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Graphics
/// The 64x32 monochrome framebuffer.
///
/// Sprites are XORed onto the screen one pixel at a time with `draw`, which reports a collision
/// whenever a lit pixel gets turned off.
pub struct Graphics {
    frame_buffer: FrameBuffer,
}

impl Graphics {
    pub fn new() -> Self {
        Graphics {
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        Self::check(x, y)?;
        Ok(self.frame_buffer[y][x])
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<()> {
        Self::check(x, y)?;
        self.frame_buffer[y][x] = value;
        Ok(())
    }

    /// XORs `bit` onto the pixel at x, y.
    /// Returns true if the pixel was lit and is now unlit.
    pub fn draw(&mut self, x: usize, y: usize, bit: bool) -> Result<bool> {
        let current = self.get(x, y)?;
        let new = current ^ bit;
        self.frame_buffer[y][x] = new;
        Ok(current && !new)
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    fn check(x: usize, y: usize) -> Result<()> {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            Err(Chip8Error::CoordinateOutOfRange { x, y })
        } else {
            Ok(())
        }
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_blank() {
        let graphics = Graphics::new();
        assert!(graphics.frame_buffer().iter().flatten().all(|p| !p));
    }

    #[test]
    fn test_set_and_get_corners() {
        let mut graphics = Graphics::new();
        graphics.set(0, 0, true).unwrap();
        graphics.set(DISPLAY_WIDTH - 1, DISPLAY_HEIGHT - 1, true).unwrap();
        assert!(graphics.get(0, 0).unwrap());
        assert!(graphics.get(DISPLAY_WIDTH - 1, DISPLAY_HEIGHT - 1).unwrap());
        assert!(!graphics.get(1, 0).unwrap());
    }

    #[test]
    fn test_out_of_range() {
        let mut graphics = Graphics::new();
        assert!(matches!(
            graphics.get(64, 0),
            Err(Chip8Error::CoordinateOutOfRange { x: 64, y: 0 })
        ));
        assert!(matches!(
            graphics.set(0, 32, true),
            Err(Chip8Error::CoordinateOutOfRange { x: 0, y: 32 })
        ));
        assert!(matches!(
            graphics.draw(64, 32, true),
            Err(Chip8Error::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut graphics = Graphics::new();
        graphics.set(10, 10, true).unwrap();
        graphics.clear();
        assert!(!graphics.get(10, 10).unwrap());
    }

    #[test]
    fn test_draw_xor_truth_table() {
        let mut graphics = Graphics::new();
        // off ^ 0
        assert!(!graphics.draw(0, 0, false).unwrap());
        assert!(!graphics.get(0, 0).unwrap());
        // off ^ 1
        assert!(!graphics.draw(0, 0, true).unwrap());
        assert!(graphics.get(0, 0).unwrap());
        // on ^ 0
        assert!(!graphics.draw(0, 0, false).unwrap());
        assert!(graphics.get(0, 0).unwrap());
        // on ^ 1 collides
        assert!(graphics.draw(0, 0, true).unwrap());
        assert!(!graphics.get(0, 0).unwrap());
    }
}
