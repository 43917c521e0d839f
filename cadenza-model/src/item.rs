//! Renderable showcase entries and the ordered, de-duplicated set the
//! carousel and grid are built from.

use std::collections::HashSet;

use crate::ids::ItemId;

/// One renderable entry. `payload` is opaque to the engine; only the host's
/// renderer and measurer look inside it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<P> {
    pub id: ItemId,
    pub payload: P,
}

impl<P> Item<P> {
    pub fn new(id: ItemId, payload: P) -> Self {
        Self { id, payload }
    }
}

/// Ordered sequence of items, unique by id. The first occurrence of an id
/// wins; later duplicates are dropped and counted.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSet<P> {
    items: Vec<Item<P>>,
    duplicates_dropped: usize,
}

impl<P> Default for ItemSet<P> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            duplicates_dropped: 0,
        }
    }
}

impl<P> ItemSet<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect items in display order, dropping repeated ids.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Item<P>>,
    {
        let mut set = Self::new();
        for item in items {
            set.push(item);
        }
        set
    }

    /// Append an item. Returns `false` (and drops the item) when its id is
    /// already present.
    pub fn push(&mut self, item: Item<P>) -> bool {
        if self.contains(&item.id) {
            self.duplicates_dropped += 1;
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item<P>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item<P>> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item<P>] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Number of duplicate entries rejected while building this set.
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    /// Count of distinct ids. Always equals `len()`; kept as an explicit
    /// check for callers auditing replicated tracks.
    pub fn unique_ids(&self) -> usize {
        self.ids().collect::<HashSet<_>>().len()
    }
}

impl<P> FromIterator<Item<P>> for ItemSet<P> {
    fn from_iter<I: IntoIterator<Item = Item<P>>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<'a, P> IntoIterator for &'a ItemSet<P> {
    type Item = &'a Item<P>;
    type IntoIter = std::slice::Iter<'a, Item<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(feature = "serde")]
impl<P: serde::Serialize> serde::Serialize for ItemSet<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.items, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: serde::Deserialize<'de>> serde::Deserialize<'de> for ItemSet<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items: Vec<Item<P>> = serde::Deserialize::deserialize(deserializer)?;
        Ok(Self::from_items(items))
    }
}
