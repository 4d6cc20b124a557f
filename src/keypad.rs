use crate::constants::NUM_KEYS;
use crate::error::{Chip8Error, Result};

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// Besides the state of every key this remembers the most recently pressed key for as long as
/// it's held, which is what `FX0A` waits on.
#[derive(Debug, Default)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
    key_pressed: bool,
    last_key: u8,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) -> Result<()> {
        *self.key_mut(key)? = true;
        self.key_pressed = true;
        self.last_key = key;
        Ok(())
    }

    pub fn release(&mut self, key: u8) -> Result<()> {
        *self.key_mut(key)? = false;
        self.key_pressed = false;
        Ok(())
    }

    pub fn is_pressed(&self, key: u8) -> Result<bool> {
        self.keys
            .get(usize::from(key))
            .copied()
            .ok_or(Chip8Error::InvalidKey { key })
    }

    /// The most recently pressed key, if a key is still held since then.
    pub fn pressed_key(&self) -> Option<u8> {
        if self.key_pressed {
            Some(self.last_key)
        } else {
            None
        }
    }

    /// Presses and releases keys until the keypad matches `snapshot`.
    pub fn update(&mut self, snapshot: &[bool; NUM_KEYS]) -> Result<()> {
        for (key, &down) in (0..).zip(snapshot.iter()) {
            match (self.is_pressed(key)?, down) {
                (false, true) => self.press(key)?,
                (true, false) => self.release(key)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn key_mut(&mut self, key: u8) -> Result<&mut bool> {
        self.keys
            .get_mut(usize::from(key))
            .ok_or(Chip8Error::InvalidKey { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xA).unwrap();
        assert!(keypad.is_pressed(0xA).unwrap());
        assert_eq!(keypad.pressed_key(), Some(0xA));

        keypad.release(0xA).unwrap();
        assert!(!keypad.is_pressed(0xA).unwrap());
        assert_eq!(keypad.pressed_key(), None);
    }

    #[test]
    fn test_pressed_key_tracks_latest() {
        let mut keypad = Keypad::new();
        keypad.press(0x1).unwrap();
        keypad.press(0xF).unwrap();
        assert_eq!(keypad.pressed_key(), Some(0xF));
    }

    #[test]
    fn test_invalid_key() {
        let mut keypad = Keypad::new();
        assert!(matches!(
            keypad.press(16),
            Err(Chip8Error::InvalidKey { key: 16 })
        ));
        assert!(matches!(
            keypad.release(0xFF),
            Err(Chip8Error::InvalidKey { key: 0xFF })
        ));
        assert!(matches!(
            keypad.is_pressed(16),
            Err(Chip8Error::InvalidKey { key: 16 })
        ));
        assert_eq!(keypad.pressed_key(), None);
    }

    #[test]
    fn test_update_from_snapshot() {
        let mut keypad = Keypad::new();
        keypad.press(0x2).unwrap();

        let mut snapshot = [false; NUM_KEYS];
        snapshot[0x5] = true;
        keypad.update(&snapshot).unwrap();

        assert!(!keypad.is_pressed(0x2).unwrap());
        assert!(keypad.is_pressed(0x5).unwrap());
        assert_eq!(keypad.pressed_key(), Some(0x5));
    }
}
