//! Explicit shift/mask descriptors for the packed layouts.
//!
//! Fields are listed from the lowest bit upwards, so a layout is built by chaining
//! [`BitField::then_signed`] / [`BitField::then_unsigned`] from its first field.

use crate::{Component, StorageError};

/// A contiguous run of bits inside a packed word (at most 64 bits wide).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BitField {
    shift:  u32,
    width:  u32,
    signed: bool,
}

impl BitField {
    pub(crate) const fn signed(shift: u32, width: u32) -> Self {
        Self::checked(shift, width, true)
    }

    pub(crate) const fn unsigned(shift: u32, width: u32) -> Self {
        Self::checked(shift, width, false)
    }

    const fn checked(shift: u32, width: u32, signed: bool) -> Self {
        assert!(width > 0 && width < u64::BITS, "field width out of range");
        assert!(shift + width <= u64::BITS, "field does not fit into 64 bits");
        Self { shift, width, signed }
    }

    /// Signed field placed right above this one
    pub(crate) const fn then_signed(self, width: u32) -> Self {
        Self::signed(self.end(), width)
    }

    /// Unsigned field placed right above this one
    pub(crate) const fn then_unsigned(self, width: u32) -> Self {
        Self::unsigned(self.end(), width)
    }

    /// First bit above this field
    pub(crate) const fn end(self) -> u32 {
        self.shift + self.width
    }

    pub(crate) const fn width(self) -> u32 {
        self.width
    }

    pub(crate) const fn mask(self) -> u64 {
        ((1_u64 << self.width) - 1) << self.shift
    }

    /// Places `value` into the field, dropping whatever does not fit.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) const fn pack(self, value: i64) -> u64 {
        ((value as u64) << self.shift) & self.mask()
    }

    /// Reads the field back, sign-extending signed fields.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) const fn unpack(self, word: u64) -> i64 {
        let bits = (word & self.mask()) >> self.shift;
        if self.signed {
            let unused = u64::BITS - self.width;
            ((bits << unused) as i64) >> unused
        } else {
            bits as i64
        }
    }

    /// Smallest value the field can hold
    pub(crate) const fn min(self) -> i64 {
        if self.signed { -(1_i64 << (self.width - 1)) } else { 0 }
    }

    /// Largest value the field can hold
    pub(crate) const fn max(self) -> i64 {
        if self.signed {
            (1_i64 << (self.width - 1)) - 1
        } else {
            (1_i64 << self.width) - 1
        }
    }

    pub(crate) const fn fits(self, value: i64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Fails when `value` would be truncated by [`BitField::pack`].
    pub(crate) fn check(self, component: Component, value: i32) -> Result<(), StorageError> {
        let value = i64::from(value);
        if self.fits(value) {
            return Ok(());
        }
        tracing::debug!(%component, value, min = self.min(), max = self.max(), "date component overflows its field");
        Err(StorageError::FieldOverflow {
            component,
            value,
            min: self.min(),
            max: self.max(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_round_trip() {
        let field = BitField::unsigned(2, 19);
        assert_eq!(field.unpack(field.pack(300_000)), 300_000);
        assert_eq!(field.unpack(field.pack(0)), 0);
        assert_eq!(field.unpack(field.pack(field.max())), field.max());
    }

    #[test]
    fn test_signed_round_trip() {
        let field = BitField::signed(27, 5);
        for value in -16..=15 {
            assert_eq!(field.unpack(field.pack(value)), value, "value {value}");
        }
    }

    #[test]
    fn test_pack_truncates_to_width() {
        let field = BitField::unsigned(0, 4);
        assert_eq!(field.pack(0x1F), 0xF);
        assert_eq!(field.unpack(field.pack(16)), 0);

        let signed = BitField::signed(0, 4);
        assert_eq!(signed.unpack(signed.pack(8)), -8);
    }

    #[test]
    fn test_pack_stays_inside_mask() {
        let field = BitField::signed(20, 28);
        assert_eq!(field.pack(-1), field.mask());
        assert_eq!(field.mask(), 0x0000_FFFF_FFF0_0000);
    }

    #[test]
    fn test_check_reports_range() {
        let field = BitField::unsigned(2, 8);
        assert_eq!(field.check(Component::Era, 255), Ok(()));
        assert_eq!(
            field.check(Component::Era, 256),
            Err(StorageError::FieldOverflow {
                component: Component::Era,
                value:     256,
                min:       0,
                max:       255,
            })
        );
        assert!(field.check(Component::Era, -1).is_err());
    }

    #[test]
    fn test_chaining() {
        let era = BitField::signed(0, 20);
        let year = era.then_signed(28);
        let month = year.then_unsigned(8);
        assert_eq!(year.end(), 48);
        assert_eq!(month.end(), 56);
        assert_eq!(era.mask() & year.mask(), 0);
        assert_eq!(year.mask() & month.mask(), 0);
    }

    #[test]
    fn test_bounds() {
        struct TestCase {
            field: BitField,
            min:   i64,
            max:   i64,
        }

        let cases = [
            TestCase {
                field: BitField::unsigned(0, 1),
                min:   0,
                max:   1,
            },
            TestCase {
                field: BitField::signed(0, 6),
                min:   -32,
                max:   31,
            },
            TestCase {
                field: BitField::signed(0, 28),
                min:   -(1 << 27),
                max:   (1 << 27) - 1,
            },
        ];

        for case in &cases {
            assert_eq!(case.field.min(), case.min);
            assert_eq!(case.field.max(), case.max);
            assert!(case.field.fits(case.min));
            assert!(case.field.fits(case.max));
            assert!(!case.field.fits(case.min - 1));
            assert!(!case.field.fits(case.max + 1));
        }
    }
}
