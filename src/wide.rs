//! The 64-bit word family: month and year storages reuse the day's field positions, so a
//! projection is a mask and never a re-encoding.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Component, DayStorage, Layout, PackedMonth, PackedYear, StorageError,
    day::{ERA, MONTH, YEAR},
};

const MONTH_MASK: u64 = ERA.mask() | YEAR.mask() | MONTH.mask();
const YEAR_MASK: u64 = ERA.mask() | YEAR.mask();

const _: () = assert!(size_of::<WideMonthStorage>() == size_of::<u64>());
const _: () = assert!(size_of::<WideYearStorage>() == size_of::<u64>());

/// A calendar month packed into 64 bits: era (20), year (28), month (8), 8 zero bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(transparent)]
pub struct WideMonthStorage(u64);

/// A calendar year packed into 64 bits: era (20), year (28), 16 zero bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(transparent)]
pub struct WideYearStorage(u64);

#[allow(clippy::cast_sign_loss)]
const fn checked_word(raw: i64, mask: u64) -> Result<u64, StorageError> {
    let word = raw as u64;
    if word & !mask == 0 { Ok(word) } else { Err(StorageError::ReservedBits { raw }) }
}

impl WideMonthStorage {
    pub const fn new(era: i32, year: i32, month: i32) -> Self {
        Self(ERA.pack(era as i64) | YEAR.pack(year as i64) | MONTH.pack(month as i64))
    }

    /// # Errors
    /// Returns `StorageError::FieldOverflow` naming the first oversized component.
    pub fn try_new(era: i32, year: i32, month: i32) -> Result<Self, StorageError> {
        ERA.check(Component::Era, era)?;
        YEAR.check(Component::Year, year)?;
        MONTH.check(Component::Month, month)?;
        Ok(Self::new(era, year, month))
    }

    /// The month containing `day`
    pub const fn containing(day: DayStorage) -> Self {
        Self(day.bits() & MONTH_MASK)
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

    pub const fn containing_year(self) -> WideYearStorage {
        WideYearStorage::from_month(self)
    }

    #[allow(clippy::cast_possible_wrap)]
    pub const fn raw_value(self) -> i64 {
        self.0 as i64
    }

    /// Inverse of [`WideMonthStorage::raw_value`].
    ///
    /// # Errors
    /// Returns `StorageError::ReservedBits` when the day bits are not zero.
    pub const fn from_raw(raw: i64) -> Result<Self, StorageError> {
        match checked_word(raw, MONTH_MASK) {
            Ok(word) => Ok(Self(word)),
            Err(err) => Err(err),
        }
    }
}

impl WideYearStorage {
    pub const fn new(era: i32, year: i32) -> Self {
        Self(ERA.pack(era as i64) | YEAR.pack(year as i64))
    }

    /// # Errors
    /// Returns `StorageError::FieldOverflow` naming the first oversized component.
    pub fn try_new(era: i32, year: i32) -> Result<Self, StorageError> {
        ERA.check(Component::Era, era)?;
        YEAR.check(Component::Year, year)?;
        Ok(Self::new(era, year))
    }

    /// The year containing `day`
    pub const fn containing(day: DayStorage) -> Self {
        Self(day.bits() & YEAR_MASK)
    }

    /// The year containing `month`
    pub const fn from_month(month: WideMonthStorage) -> Self {
        Self(month.0 & YEAR_MASK)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn era(self) -> i32 {
        ERA.unpack(self.0) as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn year(self) -> i32 {
        YEAR.unpack(self.0) as i32
    }

    #[allow(clippy::cast_possible_wrap)]
    pub const fn raw_value(self) -> i64 {
        self.0 as i64
    }

    /// Inverse of [`WideYearStorage::raw_value`].
    ///
    /// # Errors
    /// Returns `StorageError::ReservedBits` when the month or day bits are not zero.
    pub const fn from_raw(raw: i64) -> Result<Self, StorageError> {
        match checked_word(raw, YEAR_MASK) {
            Ok(word) => Ok(Self(word)),
            Err(err) => Err(err),
        }
    }
}

impl PackedMonth for WideMonthStorage {
    type Raw = i64;
    type Year = WideYearStorage;

    const WORD_BITS: u32 = u64::BITS;

    fn with_fields(era: i32, year: i32, month: i32, _layout: Layout) -> Self {
        Self::new(era, year, month)
    }

    fn from_day(day: DayStorage, _layout: Layout) -> Self {
        Self::containing(day)
    }

    fn era(self) -> i32 {
        Self::era(self)
    }

    fn year(self) -> i32 {
        Self::year(self)
    }

    fn month(self) -> i32 {
        Self::month(self)
    }

    fn layout(self) -> Option<Layout> {
        None
    }

    fn raw_value(self) -> i64 {
        Self::raw_value(self)
    }

    fn to_year(self) -> WideYearStorage {
        self.containing_year()
    }
}

impl PackedYear for WideYearStorage {
    type Raw = i64;

    const WORD_BITS: u32 = u64::BITS;

    fn with_fields(era: i32, year: i32, _layout: Layout) -> Self {
        Self::new(era, year)
    }

    fn from_day(day: DayStorage, _layout: Layout) -> Self {
        Self::containing(day)
    }

    fn era(self) -> i32 {
        Self::era(self)
    }

    fn year(self) -> i32 {
        Self::year(self)
    }

    fn layout(self) -> Option<Layout> {
        None
    }

    fn raw_value(self) -> i64 {
        Self::raw_value(self)
    }
}

impl TryFrom<i64> for WideMonthStorage {
    type Error = StorageError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<WideMonthStorage> for i64 {
    fn from(storage: WideMonthStorage) -> Self {
        storage.raw_value()
    }
}

impl TryFrom<i64> for WideYearStorage {
    type Error = StorageError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<WideYearStorage> for i64 {
    fn from(storage: WideYearStorage) -> Self {
        storage.raw_value()
    }
}

impl PartialOrd for WideMonthStorage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WideMonthStorage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw_value().cmp(&other.raw_value())
    }
}

impl PartialOrd for WideYearStorage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WideYearStorage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw_value().cmp(&other.raw_value())
    }
}

impl fmt::Display for WideMonthStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Era {}, year {}, month {}", self.era(), self.year(), self.month())
    }
}

impl fmt::Debug for WideMonthStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WideMonthStorage")
            .field("era", &self.era())
            .field("year", &self.year())
            .field("month", &self.month())
            .field("raw", &self.raw_value())
            .finish()
    }
}

impl fmt::Display for WideYearStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Era {}, year {}", self.era(), self.year())
    }
}

impl fmt::Debug for WideYearStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WideYearStorage")
            .field("era", &self.era())
            .field("year", &self.year())
            .field("raw", &self.raw_value())
            .finish()
    }
}
