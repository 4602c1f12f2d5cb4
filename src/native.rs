//! Month and year storages of the word family chosen for this build.
//!
//! The 64-bit family is the default. Enabling the `tagged-words` feature switches to the
//! tagged 32-bit family, whose values carry the [`Layout`](crate::Layout) they were
//! packed with. The choice never follows the target's pointer width.

#[cfg(not(feature = "tagged-words"))]
pub type MonthStorage = crate::WideMonthStorage;
#[cfg(not(feature = "tagged-words"))]
pub type YearStorage = crate::WideYearStorage;

#[cfg(feature = "tagged-words")]
pub type MonthStorage = crate::TaggedMonthStorage;
#[cfg(feature = "tagged-words")]
pub type YearStorage = crate::TaggedYearStorage;

/// Raw value type of [`MonthStorage`] and [`YearStorage`]
pub type RawValue = <MonthStorage as crate::PackedMonth>::Raw;

/// Width of the selected word
pub const WORD_BITS: u32 = <MonthStorage as crate::PackedMonth>::WORD_BITS;
