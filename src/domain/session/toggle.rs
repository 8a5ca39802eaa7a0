//! Chart-visibility toggle addressing.

use crate::shared::AreaKey;
use std::collections::HashMap;

/// Address of one chart-visibility flag: a message, and for comparison
/// messages the area within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToggleTarget {
    pub message: usize,
    pub area: Option<AreaKey>,
}

impl ToggleTarget {
    /// The flag of a single-area result message.
    pub fn message(index: usize) -> Self {
        Self {
            message: index,
            area: None,
        }
    }

    /// The flag of one area within a comparison message.
    pub fn area(index: usize, key: impl Into<AreaKey>) -> Self {
        Self {
            message: index,
            area: Some(key.into()),
        }
    }
}

/// Per-area chart flags of one comparison message, all `false` initially.
///
/// Built once from the result's keys so flipping is a single map lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaToggles {
    flags: HashMap<AreaKey, bool>,
}

impl AreaToggles {
    pub fn for_areas<'a>(keys: impl IntoIterator<Item = &'a AreaKey>) -> Self {
        Self {
            flags: keys.into_iter().map(|k| (k.clone(), false)).collect(),
        }
    }

    /// Flip one area's flag. Returns the new value, or `None` for an unknown key.
    pub fn flip(&mut self, key: &str) -> Option<bool> {
        let flag = self.flags.get_mut(key)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Whether the chart for `key` is shown. Unknown keys read as hidden.
    pub fn is_shown(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
