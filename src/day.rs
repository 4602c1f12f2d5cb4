use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Component, Layout, PackedMonth, PackedYear, StorageError,
    consts::{DAY_DAY_BITS, DAY_ERA_BITS, DAY_MONTH_BITS, DAY_YEAR_BITS},
    field::BitField,
};

pub(crate) const ERA: BitField = BitField::signed(0, DAY_ERA_BITS);
pub(crate) const YEAR: BitField = ERA.then_signed(DAY_YEAR_BITS);
pub(crate) const MONTH: BitField = YEAR.then_signed(DAY_MONTH_BITS);
pub(crate) const DAY: BitField = MONTH.then_signed(DAY_DAY_BITS);

const _: () = assert!(DAY.end() == u64::BITS);
const _: () = assert!(size_of::<DayStorage>() == size_of::<u64>());

/// A calendar day packed into 64 bits on every platform.
///
/// Bits from the lowest: era (20), year (28), month (8), day (8). All fields are signed;
/// a negative month marks a leap month. Values wider than their field are truncated by
/// [`DayStorage::new`]; use [`DayStorage::try_new`] to reject them instead.
///
/// Ordering follows the raw value and is not chronological.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
#[repr(transparent)]
pub struct DayStorage(u64);

impl DayStorage {
    /// Packs a day, truncating every component to its field.
    pub const fn new(era: i32, year: i32, month: i32, day: i32) -> Self {
        Self(ERA.pack(era as i64) | YEAR.pack(year as i64) | MONTH.pack(month as i64) | DAY.pack(day as i64))
    }

    /// Packs a day, rejecting components that do not fit.
    ///
    /// # Errors
    /// Returns `StorageError::FieldOverflow` naming the first oversized component.
    pub fn try_new(era: i32, year: i32, month: i32, day: i32) -> Result<Self, StorageError> {
        ERA.check(Component::Era, era)?;
        YEAR.check(Component::Year, year)?;
        MONTH.check(Component::Month, month)?;
        DAY.check(Component::Day, day)?;
        Ok(Self::new(era, year, month, day))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn era(self) -> i32 {
        ERA.unpack(self.0) as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn year(self) -> i32 {
        YEAR.unpack(self.0) as i32
    }

    /// Stored month number, negative for leap months
    #[allow(clippy::cast_possible_truncation)]
    pub const fn month(self) -> i32 {
        MONTH.unpack(self.0) as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn day(self) -> i32 {
        DAY.unpack(self.0) as i32
    }

    pub const fn is_leap_month(self) -> bool {
        self.month() < 0
    }

    /// The packed bits reinterpreted as a signed 64-bit integer
    #[allow(clippy::cast_possible_wrap)]
    pub const fn raw_value(self) -> i64 {
        self.0 as i64
    }

    /// Inverse of [`DayStorage::raw_value`]; every bit pattern is a valid day.
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw as u64)
    }

    pub(crate) const fn bits(self) -> u64 {
        self.0
    }

    /// The month containing this day, in the word family `M`.
    pub fn containing_month<M: PackedMonth>(self, layout: Layout) -> M {
        M::from_day(self, layout)
    }

    /// The year containing this day, in the word family `Y`.
    pub fn containing_year<Y: PackedYear>(self, layout: Layout) -> Y {
        Y::from_day(self, layout)
    }
}

impl From<i64> for DayStorage {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<DayStorage> for i64 {
    fn from(storage: DayStorage) -> Self {
        storage.raw_value()
    }
}

impl PartialOrd for DayStorage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DayStorage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw_value().cmp(&other.raw_value())
    }
}

impl fmt::Display for DayStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Era {} {}-{}-{}", self.era(), self.year(), self.month(), self.day())
    }
}

impl fmt::Debug for DayStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayStorage")
            .field("era", &self.era())
            .field("year", &self.year())
            .field("month", &self.month())
            .field("day", &self.day())
            .field("raw", &self.raw_value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_round_trip() {
        let day = DayStorage::new(1, 2024, 8, 15);
        assert_eq!((day.era(), day.year(), day.month(), day.day()), (1, 2024, 8, 15));
        assert!(!day.is_leap_month());
    }

    #[test]
    fn test_bit_positions() {
        let day = DayStorage::new(1, 2, 3, 4);
        assert_eq!(day.raw_value(), 1 | (2 << 20) | (3 << 48) | (4 << 56));
    }

    #[test]
    fn test_negative_fields() {
        let day = DayStorage::new(-1, -4000, -6, 30);
        assert_eq!((day.era(), day.year(), day.month(), day.day()), (-1, -4000, -6, 30));
        assert!(day.is_leap_month());
    }

    #[test]
    fn test_full_width_values() {
        let day = DayStorage::new((1 << 19) - 1, (1 << 27) - 1, 127, 127);
        assert_eq!(day.era(), (1 << 19) - 1);
        assert_eq!(day.year(), (1 << 27) - 1);
        assert_eq!(day.month(), 127);
        assert_eq!(day.day(), 127);
    }

    #[test]
    fn test_new_truncates_silently() {
        let day = DayStorage::new(1 << 20, 2024, 1, 1);
        assert_eq!(day.era(), 0);
        assert_eq!(day.year(), 2024);
    }

    #[test]
    fn test_try_new_rejects_overflow() {
        assert!(DayStorage::try_new(1, 2024, 12, 31).is_ok());

        let result = DayStorage::try_new(1 << 20, 2024, 1, 1);
        assert!(matches!(
            result,
            Err(StorageError::FieldOverflow {
                component: Component::Era,
                ..
            })
        ));

        let result = DayStorage::try_new(1, 2024, 1, 200);
        assert!(matches!(
            result,
            Err(StorageError::FieldOverflow {
                component: Component::Day,
                value: 200,
                ..
            })
        ));
    }

    #[test]
    fn test_raw_value_identity() {
        let a = DayStorage::new(1, 2024, 8, 15);
        let b = DayStorage::new(1, 2024, 8, 15);
        let c = DayStorage::new(1, 2024, 8, 16);
        assert_eq!(a.raw_value(), b.raw_value());
        assert_ne!(a.raw_value(), c.raw_value());
        assert_eq!(DayStorage::from_raw(a.raw_value()), a);
    }

    #[test]
    fn test_raw_value_is_signed() {
        let day = DayStorage::new(0, 0, 0, -1);
        assert!(day.raw_value() < 0);
        assert_eq!(DayStorage::from_raw(day.raw_value()).day(), -1);
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let a = DayStorage::new(0, 0, 0, -1);
        let b = DayStorage::new(1, 2024, 8, 15);
        assert!(a < b);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        let day = DayStorage::new(1, 2024, 8, 15);
        assert_eq!(day.to_string(), "Era 1 2024-8-15");
    }

    #[test]
    fn test_debug_includes_raw_value() {
        let day = DayStorage::new(1, 2024, 8, 15);
        let debug = format!("{day:?}");
        assert!(debug.starts_with("DayStorage { era: 1, year: 2024, month: 8, day: 15, raw: "));
    }

    #[test]
    fn test_serde() {
        let day = DayStorage::new(1, 2024, 8, 15);
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, day.raw_value().to_string());

        let parsed: DayStorage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, day);
    }

    proptest! {
        #[test]
        fn prop_fields_round_trip(
            era in -(1_i32 << 19)..(1 << 19),
            year in -(1_i32 << 27)..(1 << 27),
            month in -128_i32..128,
            day in -128_i32..128,
        ) {
            let storage = DayStorage::new(era, year, month, day);
            prop_assert_eq!((storage.era(), storage.year(), storage.month(), storage.day()), (era, year, month, day));
            prop_assert_eq!(DayStorage::try_new(era, year, month, day), Ok(storage));
        }

        #[test]
        fn prop_raw_value_round_trip(raw in any::<i64>()) {
            prop_assert_eq!(DayStorage::from_raw(raw).raw_value(), raw);
        }
    }
}
