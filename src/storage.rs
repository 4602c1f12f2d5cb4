//! Interface shared by the two month/year word families.
//!
//! The 64-bit family ([`WideMonthStorage`](crate::WideMonthStorage),
//! [`WideYearStorage`](crate::WideYearStorage)) ignores layouts; the tagged 32-bit family
//! ([`TaggedMonthStorage`](crate::TaggedMonthStorage),
//! [`TaggedYearStorage`](crate::TaggedYearStorage)) encodes under the layout it is given.
//! Code generic over these traits works with either, and [`crate::native`] picks one at
//! build time.

use std::{fmt, hash::Hash};

use crate::{DayStorage, Layout};

/// A packed calendar year.
pub trait PackedYear: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// Signed integer of the word's width
    type Raw: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display;

    /// Width of the packed word
    const WORD_BITS: u32;

    fn with_fields(era: i32, year: i32, layout: Layout) -> Self;

    /// Drops month and day from `day`.
    fn from_day(day: DayStorage, layout: Layout) -> Self;

    fn era(self) -> i32;

    fn year(self) -> i32;

    /// `None` for families without layout selection
    fn layout(self) -> Option<Layout>;

    fn raw_value(self) -> Self::Raw;
}

/// A packed calendar month.
pub trait PackedMonth: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    type Raw: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display;
    /// Year storage of the same family
    type Year: PackedYear<Raw = Self::Raw>;

    const WORD_BITS: u32;

    fn with_fields(era: i32, year: i32, month: i32, layout: Layout) -> Self;

    /// Drops the day from `day`.
    fn from_day(day: DayStorage, layout: Layout) -> Self;

    fn era(self) -> i32;

    fn year(self) -> i32;

    fn month(self) -> i32;

    fn layout(self) -> Option<Layout>;

    fn raw_value(self) -> Self::Raw;

    /// Drops the month.
    fn to_year(self) -> Self::Year;
}
