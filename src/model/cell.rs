use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One cell of the live board. `is_valid` is derived state: it is written only
/// by `Board::apply_value` and reset by `Board::clear_cell`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: u8,
    pub is_given: bool,
    pub is_valid: bool,
    pub notes: BTreeSet<u8>,
}

impl Cell {
    /// A zero value creates an empty editable cell; anything else is a given.
    pub fn new(value: u8) -> Self {
        Self {
            value,
            is_given: value != 0,
            is_valid: true,
            notes: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}
