//! Key and LED topology
//!
//! Describes where keys and LEDs sit on the keyboard grid and how keys map
//! to LEDs. Everything here is built once at startup and never mutated.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::{Error, Result};

/// Grid of optional indices, stored row-major
///
/// Used both as a key layout (cells hold key indices) and as an LED matrix
/// (cells hold LED indices). `None` marks a position without a key or LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<const ROWS: usize, const COLS: usize> {
    cells: [[Option<u16>; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Layout<ROWS, COLS> {
    /// Create a layout from a descriptor table
    pub const fn new(cells: [[Option<u16>; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Layout with every cell populated, numbered `row * COLS + col`
    #[allow(clippy::cast_possible_truncation)]
    pub fn row_major() -> Self {
        let mut cells = [[None; COLS]; ROWS];
        for (row, row_cells) in cells.iter_mut().enumerate() {
            for (col, cell) in row_cells.iter_mut().enumerate() {
                *cell = Some((row * COLS + col) as u16);
            }
        }
        Self { cells }
    }

    /// Value at the given position
    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Populated cells in row-major order
    pub fn entries(&self) -> impl Iterator<Item = u16> + '_ {
        self.cells.as_flattened().iter().filter_map(|cell| *cell)
    }

    /// Borrowed view of the grid
    pub fn view(&self) -> Matrix<'_> {
        Matrix {
            cells: self.cells.as_flattened(),
            cols: COLS,
        }
    }
}

/// Borrowed, size-erased view of an LED matrix
#[derive(Debug, Clone, Copy)]
pub struct Matrix<'a> {
    cells: &'a [Option<u16>],
    cols: usize,
}

impl<'a> Matrix<'a> {
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.cells.len() / self.cols
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// LED at the given position
    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        if col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied().flatten()
    }

    /// Cells of one row, empty if out of range
    pub fn row(&self, row: usize) -> &'a [Option<u16>] {
        let start = row * self.cols;
        self.cells.get(start..start + self.cols).unwrap_or(&[])
    }

    /// LEDs of one column, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = u16> + use<'a> {
        let matrix = *self;
        (0..matrix.rows()).filter_map(move |row| matrix.get(row, col))
    }

    /// LEDs in boustrophedon order
    ///
    /// Even rows are walked left to right, odd rows right to left; empty
    /// cells are skipped.
    pub fn serpentine(&self) -> impl Iterator<Item = u16> + use<'a> {
        let matrix = *self;
        (0..matrix.rows()).flat_map(move |row| {
            let cells = matrix.row(row);
            let len = cells.len();
            (0..len).filter_map(move |i| {
                if row % 2 == 0 {
                    cells[i]
                } else {
                    cells[len - 1 - i]
                }
            })
        })
    }
}

/// Topology options
///
/// * `keys` - where every key sits; required
/// * `leds` - where every LED sits; defaults to `keys`, which assumes the
///   strip is wired in key order
/// * `key_leds` - explicit `(key, led)` pairs; defaults to pairing the n-th
///   key of `keys` with the n-th LED of the matrix in row-major order
/// * `num_leds` - strip length
///
/// Both layouts share the `ROWS x COLS` grid. A key map narrower than the
/// LED matrix is padded with `None` cells, and since the two layouts then
/// hold different counts the pairing needs an explicit `key_leds` table.
#[derive(Debug, Clone, Copy)]
pub struct TopologyConfig<'a, const ROWS: usize, const COLS: usize> {
    pub keys: Layout<ROWS, COLS>,
    pub leds: Option<Layout<ROWS, COLS>>,
    pub key_leds: Option<&'a [(u16, Option<u16>)]>,
    pub num_leds: u16,
}

/// Fully populated row-major keyboard with one LED per key
impl<const ROWS: usize, const COLS: usize> Default for TopologyConfig<'_, ROWS, COLS> {
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self::new(Layout::row_major(), (ROWS * COLS) as u16)
    }
}

impl<const ROWS: usize, const COLS: usize> TopologyConfig<'_, ROWS, COLS> {
    /// Key layout whose LEDs are wired in key order
    pub const fn new(keys: Layout<ROWS, COLS>, num_leds: u16) -> Self {
        Self {
            keys,
            leds: None,
            key_leds: None,
            num_leds,
        }
    }
}

/// Validated LED matrix and key to LED map
#[derive(Debug, Clone)]
pub struct Topology<const ROWS: usize, const COLS: usize> {
    matrix: Layout<ROWS, COLS>,
    /// LED of every key, indexed by key index in row-major slot order
    key_leds: [[Option<u16>; COLS]; ROWS],
    num_leds: u16,
}

impl<const ROWS: usize, const COLS: usize> Topology<ROWS, COLS> {
    /// Build and validate the topology
    pub fn build(config: &TopologyConfig<'_, ROWS, COLS>) -> Result<Self> {
        let num_leds = config.num_leds;

        check_keys(&config.keys)?;

        let matrix = config.leds.unwrap_or(config.keys);
        check_matrix(&matrix, num_leds)?;

        let mut key_leds = [[None; COLS]; ROWS];
        let slots = key_leds.as_flattened_mut();
        match config.key_leds {
            Some(table) => {
                for (i, &(key, led)) in table.iter().enumerate() {
                    let previous = &table[..i];
                    let slot = slots
                        .get_mut(usize::from(key))
                        .ok_or(Error::KeyOutOfRange(key))?;
                    if previous.iter().any(|&(other, _)| other == key) {
                        return Err(Error::DuplicateKey(key));
                    }
                    if let Some(led) = led {
                        if led >= num_leds {
                            return Err(Error::LedOutOfRange(led));
                        }
                        if previous.iter().any(|&(_, other)| other == Some(led)) {
                            return Err(Error::DuplicateLed(led));
                        }
                    }
                    *slot = led;
                }
            }
            None => {
                let keys = config.keys.entries().count();
                let leds = matrix.entries().count();
                if keys != leds {
                    return Err(Error::TopologyMismatch { keys, leds });
                }
                for (key, led) in config.keys.entries().zip(matrix.entries()) {
                    // Keys were range-checked above
                    slots[usize::from(key)] = Some(led);
                }
            }
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[Topology.build] {}x{} matrix, {} leds, {} mapped keys",
            ROWS,
            COLS,
            num_leds,
            key_leds.as_flattened().iter().flatten().count()
        );

        Ok(Self {
            matrix,
            key_leds,
            num_leds,
        })
    }

    pub const fn num_rows(&self) -> usize {
        ROWS
    }

    pub const fn num_cols(&self) -> usize {
        COLS
    }

    pub const fn num_leds(&self) -> u16 {
        self.num_leds
    }

    /// LED at the given matrix position
    pub fn led_at(&self, row: usize, col: usize) -> Option<u16> {
        self.matrix.get(row, col)
    }

    /// LED lit by the given key, if any
    pub fn led_for_key(&self, key: u16) -> Option<u16> {
        self.key_leds
            .as_flattened()
            .get(usize::from(key))
            .copied()
            .flatten()
    }

    pub fn matrix(&self) -> Matrix<'_> {
        self.matrix.view()
    }

    /// Key to LED map as a slice indexed by key
    pub fn key_leds(&self) -> &[Option<u16>] {
        self.key_leds.as_flattened()
    }
}

fn check_keys<const ROWS: usize, const COLS: usize>(keys: &Layout<ROWS, COLS>) -> Result<()> {
    let capacity = ROWS * COLS;
    for (i, key) in keys.entries().enumerate() {
        if usize::from(key) >= capacity {
            return Err(Error::KeyOutOfRange(key));
        }
        if keys.entries().take(i).any(|other| other == key) {
            return Err(Error::DuplicateKey(key));
        }
    }
    Ok(())
}

fn check_matrix<const ROWS: usize, const COLS: usize>(
    matrix: &Layout<ROWS, COLS>,
    num_leds: u16,
) -> Result<()> {
    for (i, led) in matrix.entries().enumerate() {
        if led >= num_leds {
            return Err(Error::LedOutOfRange(led));
        }
        if matrix.entries().take(i).any(|other| other == led) {
            return Err(Error::DuplicateLed(led));
        }
    }
    Ok(())
}
