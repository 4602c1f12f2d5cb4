use std::{fmt, ops::Range};

use serde::{Deserialize, Serialize};

use crate::{
    StorageError,
    consts::{
        CHINESE_ERA_BITS, CHINESE_MONTH_BITS, CHINESE_YEAR_BITS, DEFAULT_ERA_BITS, DEFAULT_MONTH_BITS,
        DEFAULT_YEAR_BITS, JAPANESE_ERA_BITS, JAPANESE_MONTH_BITS, JAPANESE_YEAR_BITS, LAYOUT_TAG_BITS,
    },
    field::BitField,
};

/// Partition of a tagged 32-bit word between era, year and month.
///
/// The discriminant is the tag stored in the two lowest bits of the word. Tag `1` is
/// unassigned; a fourth layout would need a wider tag and therefore a new word format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Layout {
    /// Calendars with at most two eras (Gregorian BC/AD)
    Default  = 0,
    /// Calendars with many eras and a moderate year range (imperial eras)
    Japanese = 2,
    /// Calendars with a very large era count and a small year range (sexagenary cycles).
    ///
    /// The year field is unsigned (0-63) so a full 60-year cycle fits; read as a signed
    /// 6-bit field the same bits would give -32..=31.
    Chinese  = 3,
}

/// Field descriptors of one layout, tag excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LayoutFields {
    pub(crate) era:   BitField,
    pub(crate) year:  BitField,
    pub(crate) month: BitField,
}

const TAG_FIELD: BitField = BitField::unsigned(0, LAYOUT_TAG_BITS);

const DEFAULT_ERA: BitField = TAG_FIELD.then_unsigned(DEFAULT_ERA_BITS);
const DEFAULT_YEAR: BitField = DEFAULT_ERA.then_signed(DEFAULT_YEAR_BITS);
const DEFAULT_MONTH: BitField = DEFAULT_YEAR.then_unsigned(DEFAULT_MONTH_BITS);

const JAPANESE_ERA: BitField = TAG_FIELD.then_unsigned(JAPANESE_ERA_BITS);
const JAPANESE_YEAR: BitField = JAPANESE_ERA.then_signed(JAPANESE_YEAR_BITS);
const JAPANESE_MONTH: BitField = JAPANESE_YEAR.then_unsigned(JAPANESE_MONTH_BITS);

const CHINESE_ERA: BitField = TAG_FIELD.then_unsigned(CHINESE_ERA_BITS);
const CHINESE_YEAR: BitField = CHINESE_ERA.then_unsigned(CHINESE_YEAR_BITS);
const CHINESE_MONTH: BitField = CHINESE_YEAR.then_signed(CHINESE_MONTH_BITS);

const _: () = assert!(DEFAULT_MONTH.end() == u32::BITS);
const _: () = assert!(JAPANESE_MONTH.end() == u32::BITS);
const _: () = assert!(CHINESE_MONTH.end() == u32::BITS);

impl Layout {
    /// Every layout, ordered by era capacity
    pub const ALL: [Self; 3] = [Self::Default, Self::Japanese, Self::Chinese];

    pub(crate) const TAG: BitField = TAG_FIELD;

    /// Tag value stored in the word
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Resolves a stored tag.
    ///
    /// # Errors
    /// Returns `StorageError::UnknownLayoutTag` for tags no layout is assigned to.
    pub fn from_tag(tag: u8) -> Result<Self, StorageError> {
        Self::decode(tag).ok_or_else(|| {
            tracing::error!(tag, "corrupt layout tag in packed year/month word");
            StorageError::UnknownLayoutTag { tag }
        })
    }

    pub(crate) const fn decode(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Default),
            2 => Some(Self::Japanese),
            3 => Some(Self::Chinese),
            _ => None,
        }
    }

    pub(crate) const fn fields(self) -> LayoutFields {
        match self {
            Self::Default => LayoutFields {
                era:   DEFAULT_ERA,
                year:  DEFAULT_YEAR,
                month: DEFAULT_MONTH,
            },
            Self::Japanese => LayoutFields {
                era:   JAPANESE_ERA,
                year:  JAPANESE_YEAR,
                month: JAPANESE_MONTH,
            },
            Self::Chinese => LayoutFields {
                era:   CHINESE_ERA,
                year:  CHINESE_YEAR,
                month: CHINESE_MONTH,
            },
        }
    }

    /// Number of bits this layout reserves for the era
    pub const fn era_bits(self) -> u32 {
        self.fields().era.width()
    }

    /// Picks the smallest layout whose era field holds `required_bits`.
    ///
    /// # Errors
    /// Returns `StorageError::UnsupportedEraCount` when no layout is wide enough.
    pub fn for_era_bits(required_bits: u32) -> Result<Self, StorageError> {
        let Some(layout) = Self::ALL.into_iter().find(|layout| layout.era_bits() >= required_bits) else {
            tracing::warn!(required_bits, "no year/month layout can hold the calendar's eras");
            return Err(StorageError::UnsupportedEraCount { required_bits });
        };
        tracing::debug!(required_bits, layout = %layout, "selected year/month storage layout");
        Ok(layout)
    }

    /// Picks the layout for a calendar whose eras span `eras` (end exclusive).
    ///
    /// The requirement is the bit length of the largest era; a negative era can never
    /// be stored and needs the full 64 bits. This is not the bit count of the span
    /// `end - start - 1`: eras are stored as-is, not offset by `start`, so a range like
    /// `10..12` still needs the bits for era 11.
    ///
    /// # Errors
    /// Returns `StorageError::UnsupportedEraCount` when no layout is wide enough.
    pub fn for_era_range(eras: Range<i64>) -> Result<Self, StorageError> {
        let required_bits = if eras.is_empty() {
            0
        } else {
            let largest = eras.end - 1;
            if largest < 0 { i64::BITS } else { i64::BITS - largest.leading_zeros() }
        };
        Self::for_era_bits(required_bits)
    }
}

impl TryFrom<u8> for Layout {
    type Error = StorageError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

impl From<Layout> for u8 {
    fn from(layout: Layout) -> Self {
        layout.tag()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Japanese => "japanese",
            Self::Chinese => "chinese",
        };
        if f.alternate() {
            write!(f, "{name} (bits: {:02b})", self.tag())
        } else {
            f.write_str(name)
        }
    }
}
