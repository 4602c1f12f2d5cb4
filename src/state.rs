//! Day-cell state and its perfect-hash compression.
//!
//! A state is a 16-bit mask: the background sub-state in bits 0–1 and the "today" flag
//! at bit 8. Every other bit belongs to flags defined by the view layer. States that use
//! only the background and today bits are *compressible* and map onto `0..=7`.

use serde::{Deserialize, Serialize};

use crate::{
    consts::{BACKGROUND_MASK, COMPRESSED_MASK, COMPRESSIBLE_MASK, TODAY_MASK, TODAY_SHIFT},
    prelude::*,
};

/// Background part of a cell state, assigned through user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BackgroundState {
    /// Not selected, highlighted or disabled
    #[default]
    #[display(fmt = "normal")]
    Normal      = 0,
    /// A touch is currently inside the cell
    #[display(fmt = "highlighted")]
    Highlighted = 1,
    /// The cell is part of the selection
    #[display(fmt = "selected")]
    Selected    = 2,
    /// Displayed but excluded from selection
    #[display(fmt = "disabled")]
    Disabled    = 3,
}

impl BackgroundState {
    pub const ALL: [Self; 4] = [Self::Normal, Self::Highlighted, Self::Selected, Self::Disabled];

    const fn from_bits(bits: u16) -> Self {
        match bits & BACKGROUND_MASK {
            0 => Self::Normal,
            1 => Self::Highlighted,
            2 => Self::Selected,
            _ => Self::Disabled,
        }
    }
}

bitflags::bitflags! {
    /// State of a single day cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct CellState: u16 {
        const HIGHLIGHTED = 0b01;
        const SELECTED    = 0b10;
        const DISABLED    = 0b11;
        const TODAY       = TODAY_MASK;

        // Flags owned by the view layer
        const _ = !0;
    }
}

/// Contract violations of the perfect hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StateError {
    #[display(fmt = "State {_0:#06x} is not compressible")]
    NotCompressible(u16),
    #[display(fmt = "Perfect hash {_0} is out of range (must be 0-{})", COMPRESSED_MASK)]
    HashOutOfRange(u8),
}

impl std::error::Error for StateError {}

impl CellState {
    pub const NORMAL: Self = Self::empty();

    /// The eight compressible states, indexed by their perfect hash
    pub const COMPRESSIBLE: [Self; 8] = [
        Self::from_bits_retain(0),
        Self::from_bits_retain(1),
        Self::from_bits_retain(2),
        Self::from_bits_retain(3),
        Self::from_bits_retain(TODAY_MASK),
        Self::from_bits_retain(TODAY_MASK | 1),
        Self::from_bits_retain(TODAY_MASK | 2),
        Self::from_bits_retain(TODAY_MASK | 3),
    ];

    pub const fn new(background: BackgroundState, is_today: bool) -> Self {
        let today = if is_today { TODAY_MASK } else { 0 };
        Self::from_bits_retain(background as u16 | today)
    }

    pub const fn background(self) -> BackgroundState {
        BackgroundState::from_bits(self.bits())
    }

    pub const fn is_today(self) -> bool {
        self.bits() & TODAY_MASK != 0
    }

    /// True when no bit outside the background and today bits is set
    pub const fn is_compressible(self) -> bool {
        self.bits() & !COMPRESSIBLE_MASK == 0
    }

    /// Dense index of a compressible state, in `0..=7`.
    ///
    /// # Errors
    /// Returns `StateError::NotCompressible` for states with other bits set.
    pub const fn perfect_hash(self) -> Result<u8, StateError> {
        if !self.is_compressible() {
            return Err(StateError::NotCompressible(self.bits()));
        }
        Ok(Self::compress(self.bits()))
    }

    /// Inverse of [`CellState::perfect_hash`].
    ///
    /// # Errors
    /// Returns `StateError::HashOutOfRange` for values above `COMPRESSED_MASK`.
    pub const fn from_perfect_hash(hash: u8) -> Result<Self, StateError> {
        if hash & !COMPRESSED_MASK != 0 {
            return Err(StateError::HashOutOfRange(hash));
        }
        let hash = hash as u16;
        Ok(Self::from_bits_retain((hash & BACKGROUND_MASK) | ((hash << TODAY_SHIFT) & TODAY_MASK)))
    }

    /// Best-effort hash of any state: the perfect hash when compressible, otherwise the
    /// raw bits (not dense, may overlap the perfect-hash range).
    pub const fn hash_value(self) -> u16 {
        if self.is_compressible() { Self::compress(self.bits()) as u16 } else { self.bits() }
    }

    /// The perfect hash as a table index
    pub(crate) const fn compressed_index(self) -> Option<usize> {
        if self.is_compressible() { Some(Self::compress(self.bits()) as usize) } else { None }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn compress(bits: u16) -> u8 {
        ((bits & BACKGROUND_MASK) | ((bits & TODAY_MASK) >> TODAY_SHIFT)) as u8
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<BackgroundState> for CellState {
    fn from(background: BackgroundState) -> Self {
        Self::new(background, false)
    }
}

impl Serialize for CellState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for CellState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_and_accessors() {
        for background in BackgroundState::ALL {
            for is_today in [false, true] {
                let state = CellState::new(background, is_today);
                assert_eq!(state.background(), background);
                assert_eq!(state.is_today(), is_today);
                assert!(state.is_compressible());
            }
        }
    }

    #[test]
    fn test_flag_constants() {
        assert_eq!(CellState::new(BackgroundState::Highlighted, false), CellState::HIGHLIGHTED);
        assert_eq!(CellState::new(BackgroundState::Selected, false), CellState::SELECTED);
        assert_eq!(CellState::new(BackgroundState::Disabled, false), CellState::DISABLED);
        assert_eq!(CellState::new(BackgroundState::Normal, true), CellState::TODAY);
        assert_eq!(CellState::TODAY.bits(), 1 << 8);
        assert_eq!(CellState::default(), CellState::NORMAL);
    }

    #[test]
    fn test_compressible_cases() {
        struct TestCase {
            bits:         u16,
            compressible: bool,
            description:  &'static str,
        }

        let cases = [
            TestCase {
                bits:         0,
                compressible: true,
                description:  "normal",
            },
            TestCase {
                bits:         0b11,
                compressible: true,
                description:  "disabled",
            },
            TestCase {
                bits:         0x103,
                compressible: true,
                description:  "disabled today",
            },
            TestCase {
                bits:         1 << 3,
                compressible: false,
                description:  "bit 3",
            },
            TestCase {
                bits:         1 << 2,
                compressible: false,
                description:  "bit 2",
            },
            TestCase {
                bits:         (1 << 9) | 1,
                compressible: false,
                description:  "bit 9 with highlight",
            },
            TestCase {
                bits:         0x8000,
                compressible: false,
                description:  "top bit",
            },
        ];

        for case in &cases {
            assert_eq!(
                CellState::from_bits_retain(case.bits).is_compressible(),
                case.compressible,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_perfect_hash_bijection() {
        let mut seen = HashSet::new();
        for background in BackgroundState::ALL {
            for is_today in [false, true] {
                let state = CellState::new(background, is_today);
                let hash = state.perfect_hash().unwrap();
                assert!(hash <= COMPRESSED_MASK);
                assert_eq!(CellState::from_perfect_hash(hash), Ok(state));
                seen.insert(hash);
            }
        }
        assert_eq!(seen, (0..=COMPRESSED_MASK).collect::<HashSet<_>>());
    }

    #[test]
    fn test_compressible_table_is_indexed_by_hash() {
        for (index, state) in CellState::COMPRESSIBLE.iter().enumerate() {
            assert_eq!(usize::from(state.perfect_hash().unwrap()), index);
            assert_eq!(state.compressed_index(), Some(index));
        }
    }

    #[test]
    fn test_selected_today() {
        let state = CellState::new(BackgroundState::Selected, true);
        assert_eq!(state.bits(), 2 | (1 << 8));
        assert_eq!(state.perfect_hash(), Ok(2 | (TODAY_MASK >> TODAY_SHIFT) as u8));
        assert_eq!(state.perfect_hash(), Ok(6));

        let restored = CellState::from_perfect_hash(6).unwrap();
        assert_eq!(restored.background(), BackgroundState::Selected);
        assert!(restored.is_today());
        assert_eq!(restored.bits() & !(0b11 | (1 << 8)), 0);
    }

    #[test]
    fn test_perfect_hash_rejects_incompressible() {
        let state = CellState::from_bits_retain(1 << 3);
        assert_eq!(state.perfect_hash(), Err(StateError::NotCompressible(8)));
        assert_eq!(state.compressed_index(), None);
    }

    #[test]
    fn test_from_perfect_hash_rejects_out_of_range() {
        assert_eq!(CellState::from_perfect_hash(8), Err(StateError::HashOutOfRange(8)));
        assert!(CellState::from_perfect_hash(0xFF).is_err());
    }

    #[test]
    fn test_hash_value() {
        assert_eq!(CellState::new(BackgroundState::Disabled, true).hash_value(), 7);
        let extra = CellState::from_bits_retain((1 << 12) | 2);
        assert_eq!(extra.hash_value(), (1 << 12) | 2);
    }

    #[test]
    fn test_unknown_bits_survive_removal() {
        let mut state = CellState::from_bits_retain((1 << 12) | TODAY_MASK | 1);
        state.remove(CellState::TODAY);
        assert_eq!(state.bits(), (1 << 12) | 1);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            StateError::NotCompressible(8).to_string(),
            "State 0x0008 is not compressible"
        );
        assert_eq!(
            StateError::HashOutOfRange(9).to_string(),
            "Perfect hash 9 is out of range (must be 0-7)"
        );
    }

    #[test]
    fn test_serde() {
        let state = CellState::new(BackgroundState::Highlighted, true);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "257");
        let parsed: CellState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);

        let json = serde_json::to_string(&BackgroundState::Disabled).unwrap();
        assert_eq!(json, r#""disabled""#);
    }

    proptest! {
        #[test]
        fn prop_round_trip_when_compressible(bits in any::<u16>()) {
            let state = CellState::from_bits_retain(bits);
            match state.perfect_hash() {
                Ok(hash) => prop_assert_eq!(CellState::from_perfect_hash(hash), Ok(state)),
                Err(err) => {
                    prop_assert!(!state.is_compressible());
                    prop_assert_eq!(err, StateError::NotCompressible(bits));
                }
            }
        }
    }
}
