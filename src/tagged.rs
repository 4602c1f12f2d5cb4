//! The tagged 32-bit word family.
//!
//! A single word holds a two-bit [`Layout`] tag in its lowest bits and the layout's
//! era/year/month fields above it. Every decode reads the tag first and dispatches on it.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::{Component, DayStorage, Layout, PackedMonth, PackedYear, StorageError};

const _: () = assert!(size_of::<TaggedMonthStorage>() == size_of::<u32>());
const _: () = assert!(size_of::<TaggedYearStorage>() == size_of::<u32>());

/// Shared word of the tagged month and year storages; the tag is always valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
struct YearMonthWord(u32);

impl YearMonthWord {
    #[allow(clippy::cast_possible_truncation)]
    const fn new(era: i32, year: i32, month: i32, layout: Layout) -> Self {
        let fields = layout.fields();
        let word = Layout::TAG.pack(layout.tag() as i64)
            | fields.era.pack(era as i64)
            | fields.year.pack(year as i64)
            | fields.month.pack(month as i64);
        Self(word as u32)
    }

    fn try_new(era: i32, year: i32, month: i32, layout: Layout) -> Result<Self, StorageError> {
        let fields = layout.fields();
        fields.era.check(Component::Era, era)?;
        fields.year.check(Component::Year, year)?;
        fields.month.check(Component::Month, month)?;
        Ok(Self::new(era, year, month, layout))
    }

    fn from_raw(raw: i32) -> Result<Self, StorageError> {
        #[allow(clippy::cast_sign_loss)]
        let word = raw as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let tag = Layout::TAG.unpack(u64::from(word)) as u8;
        Layout::from_tag(tag)?;
        Ok(Self(word))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    const fn layout(self) -> Layout {
        match Layout::decode(Layout::TAG.unpack(self.0 as u64) as u8) {
            Some(layout) => layout,
            None => panic!("corrupt layout tag in packed year/month word"),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn era(self) -> i32 {
        self.layout().fields().era.unpack(self.0 as u64) as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn year(self) -> i32 {
        self.layout().fields().year.unpack(self.0 as u64) as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn month(self) -> i32 {
        self.layout().fields().month.unpack(self.0 as u64) as i32
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn raw_value(self) -> i32 {
        self.0 as i32
    }
}

/// A calendar month packed into one 32-bit word under an explicit [`Layout`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(transparent)]
pub struct TaggedMonthStorage(YearMonthWord);

/// A calendar year packed into one 32-bit word under an explicit [`Layout`].
///
/// Shares the month word format with a month of zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(transparent)]
pub struct TaggedYearStorage(YearMonthWord);

impl TaggedMonthStorage {
    /// Packs a month, truncating every component to the layout's fields.
    pub const fn new(era: i32, year: i32, month: i32, layout: Layout) -> Self {
        Self(YearMonthWord::new(era, year, month, layout))
    }

    /// Packs a month, rejecting components the layout cannot hold.
    ///
    /// # Errors
    /// Returns `StorageError::FieldOverflow` naming the first oversized component.
    pub fn try_new(era: i32, year: i32, month: i32, layout: Layout) -> Result<Self, StorageError> {
        YearMonthWord::try_new(era, year, month, layout).map(Self)
    }

    /// The month containing `day`, re-encoded under `layout`
    pub const fn containing(day: DayStorage, layout: Layout) -> Self {
        Self::new(day.era(), day.year(), day.month(), layout)
    }

    pub const fn layout(self) -> Layout {
        self.0.layout()
    }

    pub const fn era(self) -> i32 {
        self.0.era()
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// Stored month number, negative for leap months where the layout allows it
    pub const fn month(self) -> i32 {
        self.0.month()
    }

    /// The year containing this month, under the same layout
    pub const fn containing_year(self) -> TaggedYearStorage {
        TaggedYearStorage::from_month(self)
    }

    pub const fn raw_value(self) -> i32 {
        self.0.raw_value()
    }

    /// Inverse of [`TaggedMonthStorage::raw_value`].
    ///
    /// # Errors
    /// Returns `StorageError::UnknownLayoutTag` when the tag bits name no layout.
    pub fn from_raw(raw: i32) -> Result<Self, StorageError> {
        YearMonthWord::from_raw(raw).map(Self)
    }
}

impl TaggedYearStorage {
    /// Packs a year, truncating every component to the layout's fields.
    pub const fn new(era: i32, year: i32, layout: Layout) -> Self {
        Self(YearMonthWord::new(era, year, 0, layout))
    }

    /// Packs a year, rejecting components the layout cannot hold.
    ///
    /// # Errors
    /// Returns `StorageError::FieldOverflow` naming the first oversized component.
    pub fn try_new(era: i32, year: i32, layout: Layout) -> Result<Self, StorageError> {
        YearMonthWord::try_new(era, year, 0, layout).map(Self)
    }

    /// The year containing `day`, re-encoded under `layout`
    pub const fn containing(day: DayStorage, layout: Layout) -> Self {
        Self::new(day.era(), day.year(), layout)
    }

    /// The year containing `month`, under the month's layout
    pub const fn from_month(month: TaggedMonthStorage) -> Self {
        Self::new(month.era(), month.year(), month.layout())
    }

    pub const fn layout(self) -> Layout {
        self.0.layout()
    }

    pub const fn era(self) -> i32 {
        self.0.era()
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    pub const fn raw_value(self) -> i32 {
        self.0.raw_value()
    }

    /// Inverse of [`TaggedYearStorage::raw_value`].
    ///
    /// # Errors
    /// Returns `StorageError::UnknownLayoutTag` when the tag bits name no layout, and
    /// `StorageError::ReservedBits` when the month bits are not zero.
    pub fn from_raw(raw: i32) -> Result<Self, StorageError> {
        let word = YearMonthWord::from_raw(raw)?;
        if word.month() != 0 {
            return Err(StorageError::ReservedBits { raw: i64::from(raw) });
        }
        Ok(Self(word))
    }
}

impl PackedMonth for TaggedMonthStorage {
    type Raw = i32;
    type Year = TaggedYearStorage;

    const WORD_BITS: u32 = u32::BITS;

    fn with_fields(era: i32, year: i32, month: i32, layout: Layout) -> Self {
        Self::new(era, year, month, layout)
    }

    fn from_day(day: DayStorage, layout: Layout) -> Self {
        Self::containing(day, layout)
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
        Some(Self::layout(self))
    }

    fn raw_value(self) -> i32 {
        Self::raw_value(self)
    }

    fn to_year(self) -> TaggedYearStorage {
        self.containing_year()
    }
}

impl PackedYear for TaggedYearStorage {
    type Raw = i32;

    const WORD_BITS: u32 = u32::BITS;

    fn with_fields(era: i32, year: i32, layout: Layout) -> Self {
        Self::new(era, year, layout)
    }

    fn from_day(day: DayStorage, layout: Layout) -> Self {
        Self::containing(day, layout)
    }

    fn era(self) -> i32 {
        Self::era(self)
    }

    fn year(self) -> i32 {
        Self::year(self)
    }

    fn layout(self) -> Option<Layout> {
        Some(Self::layout(self))
    }

    fn raw_value(self) -> i32 {
        Self::raw_value(self)
    }
}

impl TryFrom<i32> for TaggedMonthStorage {
    type Error = StorageError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<TaggedMonthStorage> for i32 {
    fn from(storage: TaggedMonthStorage) -> Self {
        storage.raw_value()
    }
}

impl TryFrom<i32> for TaggedYearStorage {
    type Error = StorageError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<TaggedYearStorage> for i32 {
    fn from(storage: TaggedYearStorage) -> Self {
        storage.raw_value()
    }
}

impl PartialOrd for TaggedMonthStorage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TaggedMonthStorage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw_value().cmp(&other.raw_value())
    }
}

impl PartialOrd for TaggedYearStorage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TaggedYearStorage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw_value().cmp(&other.raw_value())
    }
}

impl fmt::Display for TaggedMonthStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Era {}, year {}, month {}", self.era(), self.year(), self.month())
    }
}

impl fmt::Debug for TaggedMonthStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedMonthStorage")
            .field("era", &self.era())
            .field("year", &self.year())
            .field("month", &self.month())
            .field("layout", &self.layout())
            .field("raw", &self.raw_value())
            .finish()
    }
}

impl fmt::Display for TaggedYearStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Era {}, year {}", self.era(), self.year())
    }
}

impl fmt::Debug for TaggedYearStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedYearStorage")
            .field("era", &self.era())
            .field("year", &self.year())
            .field("layout", &self.layout())
            .field("raw", &self.raw_value())
            .finish()
    }
}
