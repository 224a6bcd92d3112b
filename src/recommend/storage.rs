// the two stores are filled once from the record files and are read-only afterwards,
// except for the similarity cache inside each item.
//
// rating store:
// user -> { item -> rating }            ordered by item, last record for a (user, item) pair wins
//
// item catalog:
// item -> title
//      -> raters: [user]                load order, duplicates kept
//      -> similarities: { item -> f64 } filled lazily, always on both sides of a pair

use crate::error::{ItemId, RecommendError, Result, UserId};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug, Default)]
pub struct RatingStore {
    users: HashMap<UserId, BTreeMap<ItemId, f64>>,
}

impl RatingStore {
    pub(crate) fn insert(&mut self, user: UserId, item: ItemId, rating: f64) {
        self.users.entry(user).or_default().insert(item, rating);
    }

    pub fn rating(&self, user: UserId, item: ItemId) -> Option<f64> {
        self.users.get(&user)?.get(&item).copied()
    }

    pub fn ratings_of(&self, user: UserId) -> Option<&BTreeMap<ItemId, f64>> {
        self.users.get(&user)
    }

    pub fn contains_user(&self, user: UserId) -> bool {
        self.users.contains_key(&user)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn rating_count(&self) -> usize {
        self.users.values().map(|r| r.len()).sum()
    }
}

#[derive(Clone, Debug)]
pub struct Item {
    pub title: String,
    pub raters: Vec<UserId>,
    similarities: HashMap<ItemId, f64>,
}

impl Item {
    fn new(title: String) -> Self {
        Self {
            title,
            raters: Vec::new(),
            similarities: HashMap::new(),
        }
    }

    pub fn cached_similarity(&self, other: ItemId) -> Option<f64> {
        self.similarities.get(&other).copied()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemId, Item>,
}

impl ItemCatalog {
    pub(crate) fn add_item(&mut self, id: ItemId, title: String) {
        if let Some(previous) = self.items.insert(id, Item::new(title)) {
            warn!("item {} listed twice, replacing {:?}", id, previous.title);
        }
    }

    pub(crate) fn add_rater(&mut self, id: ItemId, user: UserId) -> Result<()> {
        let item = self.items.get_mut(&id).ok_or_else(|| {
            RecommendError::InvalidInput(format!(
                "rating by user {} references item {} missing from the catalog",
                user, id
            ))
        })?;
        item.raters.push(user);
        Ok(())
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn title(&self, id: ItemId) -> Option<&str> {
        self.items.get(&id).map(|i| i.title.as_str())
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub(super) fn cached_similarity(&self, a: ItemId, b: ItemId) -> Option<f64> {
        self.items.get(&a)?.cached_similarity(b)
    }

    // both ids are known to the catalog when this is called
    pub(super) fn store_similarity(&mut self, a: ItemId, b: ItemId, similarity: f64) {
        if let Some(item) = self.items.get_mut(&a) {
            item.similarities.insert(b, similarity);
        }
        if let Some(item) = self.items.get_mut(&b) {
            item.similarities.insert(a, similarity);
        }
    }

    /// Number of cache entries across all items; a pair of distinct items counts twice.
    pub fn cached_entries(&self) -> usize {
        self.items.values().map(|i| i.similarities.len()).sum()
    }
}
