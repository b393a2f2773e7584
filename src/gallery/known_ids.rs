use std::collections::HashSet;

use crate::source::ItemId;

/// Ids of the images currently shown.
///
/// Kept in lockstep with the card list by [`Gallery`](super::Gallery): an id
/// is a member exactly while a card carrying it exists.
#[derive(Debug, Default)]
pub struct KnownIds {
    ids: HashSet<ItemId>,
}

impl KnownIds {
    pub fn has(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Returns `false` if the id was already present.
    pub fn add(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    pub fn delete(&mut self, id: &ItemId) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
