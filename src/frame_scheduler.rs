//! Frame scheduling
//!
//! Runs one iteration of the lighting loop per call: apply the key scan,
//! dispatch hotkeys and queued actions, render, show. No async and no
//! platform timers; the caller sleeps for the returned duration.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;
use smart_leds::SmartLedsWrite;

use crate::color::Rgb;
use crate::error::HardwareError;
use crate::hotkey::{ActionReceiver, HotkeyMap};
use crate::keys::Keyboard;
use crate::renderer::Renderer;

/// Default target frame rate
pub const DEFAULT_FPS: u32 = 90;

pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Pause after an action is applied, so a held hotkey repeats slowly
pub const HOTKEY_PAUSE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// Deadline of the next frame
    pub next_deadline: Instant,
    /// How long to wait until the next frame, zero when behind schedule
    pub sleep_duration: Duration,
    /// Number of actions applied this frame
    pub actions: usize,
}

/// Frame loop driver
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, hotkeys);
/// scheduler.start(Instant::now())?;
///
/// loop {
///     let pressed = matrix.scan();
///     let result = scheduler.tick(Instant::now(), pressed)?;
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<'a, D, P, const ROWS: usize, const COLS: usize, const LEDS: usize, const KEYS: usize>
{
    renderer: Renderer<D, P, ROWS, COLS, LEDS>,
    keyboard: Keyboard<KEYS>,
    hotkeys: HotkeyMap,
    actions: Option<ActionReceiver<'a>>,
    next_frame: Instant,
    /// Held hotkeys are ignored before this instant
    hotkeys_ready: Instant,
    frame_duration: Duration,
}

impl<'a, D, P, const ROWS: usize, const COLS: usize, const LEDS: usize, const KEYS: usize>
    FrameScheduler<'a, D, P, ROWS, COLS, LEDS, KEYS>
where
    D: SmartLedsWrite<Color = Rgb>,
    P: OutputPin,
{
    /// Create a scheduler running at [`DEFAULT_FPS`]
    pub fn new(renderer: Renderer<D, P, ROWS, COLS, LEDS>, hotkeys: HotkeyMap) -> Self {
        Self::with_frame_duration(renderer, hotkeys, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(
        renderer: Renderer<D, P, ROWS, COLS, LEDS>,
        hotkeys: HotkeyMap,
        frame_duration: Duration,
    ) -> Self {
        Self {
            renderer,
            keyboard: Keyboard::new(),
            hotkeys,
            actions: None,
            next_frame: Instant::from_millis(0),
            hotkeys_ready: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Also apply actions sent through an action queue
    #[must_use]
    pub fn with_actions(mut self, actions: ActionReceiver<'a>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Bring up the hardware and set up the first effect
    pub fn start(&mut self, now: Instant) -> Result<(), HardwareError<D::Error, P::Error>> {
        self.next_frame = now;
        self.hotkeys_ready = now;
        self.renderer.start(now)
    }

    /// Process one frame
    ///
    /// 1. Record the scan in the key state
    /// 2. Apply the action of every held hotkey, then every queued action
    /// 3. Render the active effect and show it
    /// 4. Compute the next deadline, pushed out by [`HOTKEY_PAUSE`] when any
    ///    action was applied
    ///
    /// Held hotkeys are skipped until [`HOTKEY_PAUSE`] has passed since the
    /// last applied action, even when the caller ticks early. Queued actions
    /// are always applied.
    pub fn tick<I>(
        &mut self,
        now: Instant,
        pressed: I,
    ) -> Result<FrameResult, HardwareError<D::Error, P::Error>>
    where
        I: IntoIterator<Item = u16>,
    {
        // Skip the backlog after a long stall instead of bursting
        let max_drift = Duration::from_millis(self.frame_duration.as_millis() * 2);
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.keyboard.update(now, pressed);

        let mut actions = 0;
        if now >= self.hotkeys_ready {
            for key in self.keyboard.pressed() {
                if let Some(action) = self.hotkeys.action_for(key) {
                    self.renderer
                        .apply(action, now)
                        .map_err(HardwareError::PowerPin)?;
                    actions += 1;
                }
            }
        }
        if let Some(receiver) = self.actions {
            for action in receiver.drain() {
                self.renderer
                    .apply(action, now)
                    .map_err(HardwareError::PowerPin)?;
                actions += 1;
            }
        }

        self.renderer
            .render(now, self.keyboard.keys())
            .map_err(HardwareError::Strip)?;

        self.next_frame += self.frame_duration;
        if actions > 0 {
            self.hotkeys_ready = now + HOTKEY_PAUSE;
            self.next_frame = self.next_frame.max(self.hotkeys_ready);
        }

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
            actions,
        })
    }

    pub fn keyboard(&self) -> &Keyboard<KEYS> {
        &self.keyboard
    }

    pub fn hotkeys_mut(&mut self) -> &mut HotkeyMap {
        &mut self.hotkeys
    }

    pub fn renderer(&self) -> &Renderer<D, P, ROWS, COLS, LEDS> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<D, P, ROWS, COLS, LEDS> {
        &mut self.renderer
    }
}
