//! Resolved date components exchanged with the calendar collaborator.

use serde::{Deserialize, Serialize};

use crate::{
    DayStorage, Layout, StorageError, TaggedMonthStorage, TaggedYearStorage, WideMonthStorage, WideYearStorage,
    prelude::*,
};

/// A single date component, used to name missing or oversized values in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Component {
    #[display(fmt = "era")]
    Era,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

/// Date components as resolved by a calendar system.
///
/// `month` is the ordinal month number; leap months are flagged separately and are
/// folded into a negative month number when packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateComponents {
    pub era:           Option<i32>,
    pub year:          Option<i32>,
    pub month:         Option<i32>,
    pub day:           Option<i32>,
    #[serde(default)]
    pub is_leap_month: bool,
}

impl DateComponents {
    /// Components of a full day
    pub const fn day(era: i32, year: i32, month: i32, day: i32) -> Self {
        Self {
            era:           Some(era),
            year:          Some(year),
            month:         Some(month),
            day:           Some(day),
            is_leap_month: false,
        }
    }

    /// Components of a month
    pub const fn month(era: i32, year: i32, month: i32) -> Self {
        Self {
            era:           Some(era),
            year:          Some(year),
            month:         Some(month),
            day:           None,
            is_leap_month: false,
        }
    }

    /// Components of a year
    pub const fn year(era: i32, year: i32) -> Self {
        Self {
            era:           Some(era),
            year:          Some(year),
            month:         None,
            day:           None,
            is_leap_month: false,
        }
    }

    /// Marks the month as a leap month
    #[must_use]
    pub const fn leap(mut self) -> Self {
        self.is_leap_month = true;
        self
    }

    pub(crate) const fn require(value: Option<i32>, component: Component) -> Result<i32, StorageError> {
        match value {
            Some(value) => Ok(value),
            None => Err(StorageError::MissingComponent(component)),
        }
    }

    /// Month number as stored in packed values (negative for leap months)
    pub(crate) fn encoded_month(&self) -> Result<i32, StorageError> {
        Self::require(self.month, Component::Month).map(|month| encode_month(month, self.is_leap_month))
    }
}

impl DayStorage {
    pub const REQUIRED_COMPONENTS: &'static [Component] =
        &[Component::Era, Component::Year, Component::Month, Component::Day];

    /// # Errors
    /// Returns `StorageError::MissingComponent` when a required component is absent.
    pub fn from_components(components: &DateComponents) -> Result<Self, StorageError> {
        Ok(Self::new(
            DateComponents::require(components.era, Component::Era)?,
            DateComponents::require(components.year, Component::Year)?,
            components.encoded_month()?,
            DateComponents::require(components.day, Component::Day)?,
        ))
    }

    pub const fn to_components(self) -> DateComponents {
        let (month, is_leap_month) = decode_month(self.month());
        DateComponents {
            era: Some(self.era()),
            year: Some(self.year()),
            month: Some(month),
            day: Some(self.day()),
            is_leap_month,
        }
    }
}

impl WideMonthStorage {
    pub const REQUIRED_COMPONENTS: &'static [Component] = &[Component::Era, Component::Year, Component::Month];

    /// # Errors
    /// Returns `StorageError::MissingComponent` when a required component is absent.
    pub fn from_components(components: &DateComponents) -> Result<Self, StorageError> {
        Ok(Self::new(
            DateComponents::require(components.era, Component::Era)?,
            DateComponents::require(components.year, Component::Year)?,
            components.encoded_month()?,
        ))
    }

    pub const fn to_components(self) -> DateComponents {
        let (month, is_leap_month) = decode_month(self.month());
        DateComponents {
            era: Some(self.era()),
            year: Some(self.year()),
            month: Some(month),
            day: None,
            is_leap_month,
        }
    }
}

impl TaggedMonthStorage {
    pub const REQUIRED_COMPONENTS: &'static [Component] = &[Component::Era, Component::Year, Component::Month];

    /// # Errors
    /// Returns `StorageError::MissingComponent` when a required component is absent.
    pub fn from_components(components: &DateComponents, layout: Layout) -> Result<Self, StorageError> {
        Ok(Self::new(
            DateComponents::require(components.era, Component::Era)?,
            DateComponents::require(components.year, Component::Year)?,
            components.encoded_month()?,
            layout,
        ))
    }

    pub const fn to_components(self) -> DateComponents {
        let (month, is_leap_month) = decode_month(self.month());
        DateComponents {
            era: Some(self.era()),
            year: Some(self.year()),
            month: Some(month),
            day: None,
            is_leap_month,
        }
    }
}

impl WideYearStorage {
    pub const REQUIRED_COMPONENTS: &'static [Component] = &[Component::Era, Component::Year];

    /// # Errors
    /// Returns `StorageError::MissingComponent` when a required component is absent.
    pub fn from_components(components: &DateComponents) -> Result<Self, StorageError> {
        Ok(Self::new(
            DateComponents::require(components.era, Component::Era)?,
            DateComponents::require(components.year, Component::Year)?,
        ))
    }

    pub const fn to_components(self) -> DateComponents {
        DateComponents::year(self.era(), self.year())
    }
}

impl TaggedYearStorage {
    pub const REQUIRED_COMPONENTS: &'static [Component] = &[Component::Era, Component::Year];

    /// # Errors
    /// Returns `StorageError::MissingComponent` when a required component is absent.
    pub fn from_components(components: &DateComponents, layout: Layout) -> Result<Self, StorageError> {
        Ok(Self::new(
            DateComponents::require(components.era, Component::Era)?,
            DateComponents::require(components.year, Component::Year)?,
            layout,
        ))
    }

    pub const fn to_components(self) -> DateComponents {
        DateComponents::year(self.era(), self.year())
    }
}

/// Folds the leap flag into the month number.
///
/// Wraps instead of overflowing, so `i32::MIN` stays `i32::MIN` and truncates when packed.
pub const fn encode_month(month: i32, is_leap_month: bool) -> i32 {
    if is_leap_month { month.wrapping_abs().wrapping_neg() } else { month }
}

/// Splits a stored month number into the ordinal month and the leap flag.
pub const fn decode_month(encoded: i32) -> (i32, bool) {
    (encoded.wrapping_abs(), encoded < 0)
}
