//! Interned external names.
//!
//! Matches and rules refer to externals by a small `Copy` handle rather than
//! an owned `String`, so that the full set of known externals (needed for
//! `forbid`-polarity fan-out, see `chart`) is cheap to enumerate.

use std::collections::HashMap;

#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExternalId(u32);

impl ExternalId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only interner from external name to `ExternalId`.
#[derive(Default, Debug)]
pub struct ExternalTable {
    names: Vec<String>,
    ids: HashMap<String, ExternalId>,
}

impl ExternalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, interning it if this is the first time
    /// it's seen.
    pub fn intern(&mut self, name: &str) -> ExternalId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = ExternalId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn name(&self, id: ExternalId) -> &str {
        &self.names[id.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ExternalId> + '_ {
        (0..self.names.len() as u32).map(ExternalId)
    }

    pub fn lookup(&self, name: &str) -> Option<ExternalId> {
        self.ids.get(name).copied()
    }
}
