/// Stable identity of a rendered item, used by UI layers to diff windows across scroll events.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKey<K> {
    Id(K),
    Index(usize),
}

/// Items that may carry their own identity.
pub trait Identified {
    type Id;

    fn id(&self) -> Option<Self::Id>;
}

/// Keys an item by its id, falling back to its index.
pub fn default_item_key<T: Identified>(item: &T, index: usize) -> ItemKey<T::Id> {
    match item.id() {
        Some(id) => ItemKey::Id(id),
        None => ItemKey::Index(index),
    }
}
