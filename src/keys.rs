//! Key event state
//!
//! Tracks which keys are held and when each key last changed state. The
//! matrix scanner reports the set of pressed keys every iteration; reactive
//! effects read the resulting timings.

use embassy_time::Instant;

/// State of a single key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: bool,
    /// Time of the last press or release, `None` until the first change
    last_change: Option<Instant>,
}

impl KeyState {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            last_change: None,
        }
    }

    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub const fn last_change(&self) -> Option<Instant> {
        self.last_change
    }

    /// Milliseconds since the last press or release
    pub fn millis_since_change(&self, now: Instant) -> Option<u64> {
        self.last_change
            .map(|changed| now.saturating_duration_since(changed).as_millis())
    }

    /// Mark the key as pressed; holding it does not move the timestamp
    pub fn press(&mut self, now: Instant) {
        if !self.pressed {
            self.pressed = true;
            self.last_change = Some(now);
        }
    }

    /// Mark the key as released
    pub fn release(&mut self, now: Instant) {
        if self.pressed {
            self.pressed = false;
            self.last_change = Some(now);
        }
    }
}

/// State of every key on the keyboard
#[derive(Debug, Clone)]
pub struct Keyboard<const KEYS: usize> {
    keys: [KeyState; KEYS],
    now: Instant,
}

impl<const KEYS: usize> Default for Keyboard<KEYS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const KEYS: usize> Keyboard<KEYS> {
    pub const fn new() -> Self {
        Self {
            keys: [KeyState::new(); KEYS],
            now: Instant::from_millis(0),
        }
    }

    /// Apply one scan result
    ///
    /// `pressed` lists the keys currently held. Keys missing from it are
    /// released; indices outside the keyboard are ignored.
    pub fn update<I>(&mut self, now: Instant, pressed: I)
    where
        I: IntoIterator<Item = u16>,
    {
        let mut held = [false; KEYS];
        for key in pressed {
            if let Some(slot) = held.get_mut(usize::from(key)) {
                *slot = true;
            }
        }

        for (state, held) in self.keys.iter_mut().zip(held) {
            if held {
                state.press(now);
            } else {
                state.release(now);
            }
        }
        self.now = now;
    }

    /// All key states, indexed by key
    pub fn keys(&self) -> &[KeyState] {
        &self.keys
    }

    pub fn key(&self, key: u16) -> Option<&KeyState> {
        self.keys.get(usize::from(key))
    }

    pub fn is_pressed(&self, key: u16) -> bool {
        self.key(key).is_some_and(KeyState::is_pressed)
    }

    /// Milliseconds since the last change of `key`
    pub fn millis_since_change(&self, key: u16, now: Instant) -> Option<u64> {
        self.key(key)?.millis_since_change(now)
    }

    /// Time of the last scan
    pub const fn now(&self) -> Instant {
        self.now
    }

    /// Indices of the keys currently held
    #[allow(clippy::cast_possible_truncation)]
    pub fn pressed(&self) -> impl Iterator<Item = u16> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_pressed())
            .map(|(key, _)| key as u16)
    }
}
