//! Packed calendar date storage and compressed day-cell state.
//!
//! Calendar dates are packed into single machine words so they can be hashed, compared
//! and stored cheaply:
//!
//! - [`DayStorage`]: era, year, month and day in one 64-bit word.
//! - [`WideMonthStorage`] / [`WideYearStorage`]: the same fields in a 64-bit word, with
//!   the finer-grained fields zeroed.
//! - [`TaggedMonthStorage`] / [`TaggedYearStorage`]: a 32-bit word whose low bits carry a
//!   [`Layout`] tag deciding how the rest is split between era, year and month.
//!
//! [`native`] picks one of the two month/year families at build time.
//!
//! Day cells of a calendar view carry a [`CellState`]. The eight states made only of a
//! background and the "today" flag compress onto `0..=7`, which [`CellStateMap`] uses as
//! a dense table index.
//!
//! ```
//! use packed_calendar::{DayStorage, Layout, TaggedMonthStorage};
//!
//! let day = DayStorage::new(1, 2024, 8, 15);
//! let month = TaggedMonthStorage::containing(day, Layout::Japanese);
//! assert_eq!((month.era(), month.year(), month.month()), (1, 2024, 8));
//! assert_eq!(month.to_string(), "Era 1, year 2024, month 8");
//! ```

mod components;
mod consts;
mod day;
mod field;
mod layout;
pub mod native;
mod prelude;
mod state;
mod state_map;
mod storage;
mod tagged;
#[cfg(test)]
mod test_utils;
mod wide;

pub use components::{Component, DateComponents, decode_month, encode_month};
pub use consts::*;
pub use day::DayStorage;
pub use layout::Layout;
pub use state::{BackgroundState, CellState, StateError};
pub use state_map::CellStateMap;
pub use storage::{PackedMonth, PackedYear};
pub use tagged::{TaggedMonthStorage, TaggedYearStorage};
pub use wide::{WideMonthStorage, WideYearStorage};

/// Errors raised while packing or unpacking dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The tag bits of a tagged word name no layout
    #[error("Unknown layout tag: {tag}")]
    UnknownLayoutTag { tag: u8 },

    /// The calendar has more eras than any layout can hold
    #[error("No layout holds eras needing {required_bits} bits (max {max})", max = CHINESE_ERA_BITS)]
    UnsupportedEraCount { required_bits: u32 },

    #[error("Invalid {component}: {value} (must be {min}-{max})")]
    FieldOverflow {
        component: Component,
        value:     i64,
        min:       i64,
        max:       i64,
    },

    #[error("Missing {0} component")]
    MissingComponent(Component),

    /// Bits outside the stored fields are set
    #[error("Raw value {raw:#x} sets reserved bits")]
    ReservedBits { raw: i64 },
}
