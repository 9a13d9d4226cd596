use displaydoc::Display;

/// A specialized result type for lighting configuration.
pub type Result<T> = core::result::Result<T, Error>;

/// Configuration errors detected while building the lighting topology.
///
/// These are raised once at startup. Steady-state operations never fail
/// with this type: lookup misses are `None` and hardware failures are
/// reported through [`HardwareError`].
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// The key layout has {keys} keys but the LED matrix has {leds} LEDs.
    TopologyMismatch { keys: usize, leds: usize },
    /// LED index {0} is outside of the strip.
    LedOutOfRange(u16),
    /// LED index {0} is used more than once.
    DuplicateLed(u16),
    /// Key index {0} is outside of the key matrix.
    KeyOutOfRange(u16),
    /// Key index {0} is used more than once.
    DuplicateKey(u16),
    /// Strip length {0} exceeds the LED buffer capacity.
    TooManyLeds(u16),
    /// The LED matrix holds {0} LEDs, more than the snake path capacity.
    MatrixTooLarge(usize),
}

/// Failure of one of the hardware collaborators.
///
/// Wraps the error types of the strip driver and the power-enable pin
/// unchanged; the host loop decides what to do with them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HardwareError<S, P> {
    /// The strip driver failed to write a frame.
    Strip(S),
    /// The power-enable pin could not be driven.
    PowerPin(P),
}
