use std::{array, collections::HashMap};

use crate::{CellState, consts::COMPRESSED_STATE_COUNT};

/// Per-state values (colors, images) keyed by [`CellState`].
///
/// Compressible states live in a dense table indexed by their perfect hash; any other
/// state goes to a map that is only allocated once such a state is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStateMap<V> {
    common: [Option<V>; COMPRESSED_STATE_COUNT],
    extra:  Option<HashMap<CellState, V>>,
}

impl<V> CellStateMap<V> {
    pub fn new() -> Self {
        Self {
            common: array::from_fn(|_| None),
            extra:  None,
        }
    }

    /// Stores `value` for exactly `state`, returning the previous value.
    pub fn insert(&mut self, state: CellState, value: V) -> Option<V> {
        match state.compressed_index() {
            Some(index) => self.common[index].replace(value),
            None => {
                tracing::trace!(state = state.bits(), "storing value for incompressible cell state");
                self.extra.get_or_insert_with(HashMap::new).insert(state, value)
            }
        }
    }

    pub fn remove(&mut self, state: CellState) -> Option<V> {
        match state.compressed_index() {
            Some(index) => self.common[index].take(),
            None => self.extra.as_mut()?.remove(&state),
        }
    }

    /// Value stored for exactly `state`, without fallback
    pub fn get_exact(&self, state: CellState) -> Option<&V> {
        match state.compressed_index() {
            Some(index) => self.common[index].as_ref(),
            None => self.extra.as_ref()?.get(&state),
        }
    }

    /// Value for `state`, falling back to less specific states.
    ///
    /// A compressible state without a value retries without TODAY, then without
    /// DISABLED, SELECTED or HIGHLIGHTED, in that order. Incompressible states never
    /// fall back.
    pub fn get(&self, state: CellState) -> Option<&V> {
        if !state.is_compressible() {
            return self.get_exact(state);
        }

        let mut state = state;
        loop {
            if let Some(value) = self.get_exact(state) {
                return Some(value);
            }
            state = Self::less_specific(state)?;
        }
    }

    fn less_specific(state: CellState) -> Option<CellState> {
        [CellState::TODAY, CellState::DISABLED, CellState::SELECTED, CellState::HIGHLIGHTED]
            .into_iter()
            .find(|flag| state.contains(*flag))
            .map(|flag| state.difference(flag))
    }

    pub fn len(&self) -> usize {
        self.common.iter().flatten().count() + self.extra.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for CellStateMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(CellState, V)> for CellStateMap<V> {
    fn extend<I: IntoIterator<Item = (CellState, V)>>(&mut self, iter: I) {
        for (state, value) in iter {
            self.insert(state, value);
        }
    }
}

impl<V> FromIterator<(CellState, V)> for CellStateMap<V> {
    fn from_iter<I: IntoIterator<Item = (CellState, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
