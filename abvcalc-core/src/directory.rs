//! The known-ingredient directory.
//!
//! A persisted list of ingredients with known ABV. Ledger entries whose name
//! matches one of them (ignoring case) get that ABV filled in. Every
//! mutation is written back to the store before the call returns.

use std::collections::BTreeMap;
use tokio::sync::broadcast;

use crate::coerce::{clamp_abv, parse_optional};
use crate::error::CalcError;
use crate::ledger::{AbvLookup, EVENT_CAPACITY};
use crate::models::{KnownField, KnownIngredient};
use crate::storage::{KeyValueStore, StorageError};

/// Store key the directory lives under.
pub const STORAGE_KEY: &str = "customIngredients";

/// A change made to a [`Directory`].
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryEvent {
    Added { index: usize },
    Updated { index: usize, field: KnownField },
    Removed { index: usize },
}

/// Known ingredients backed by a key-value store.
///
/// Names need not be unique; lookups use the first match in list order.
#[derive(Debug)]
pub struct Directory<S: KeyValueStore> {
    items: Vec<KnownIngredient>,
    store: S,
    events: broadcast::Sender<DirectoryEvent>,
}

impl<S: KeyValueStore> Directory<S> {
    /// Reads the directory from `store`.
    ///
    /// Missing or unreadable data gives an empty directory.
    pub fn load(store: S) -> Self {
        let items = match store.get(STORAGE_KEY) {
            Some(raw) => decode(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring unreadable data under '{}'", STORAGE_KEY);
                Vec::new()
            }),
            None => Vec::new(),
        };
        tracing::debug!("Loaded {} known ingredient(s)", items.len());

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            items,
            store,
            events,
        }
    }

    pub fn items(&self) -> &[KnownIngredient] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a receiver for every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    /// ABV of the first ingredient named `name`, ignoring case.
    ///
    /// `None` when nothing matches or the first match has no ABV yet.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.items.iter().find(|i| i.matches(name)).and_then(|i| i.abv)
    }

    /// Appends a blank row. Returns its index.
    pub fn add(&mut self) -> usize {
        self.insert(KnownIngredient::default())
    }

    /// Appends `item`. Returns its index.
    pub fn insert(&mut self, item: KnownIngredient) -> usize {
        self.items.push(item);
        let index = self.items.len() - 1;
        self.persist();
        self.publish(DirectoryEvent::Added { index });
        index
    }

    /// Sets one field of the row at `index` from raw input.
    ///
    /// A blank ABV clears it; anything else takes the leading number or 0.
    pub fn update(
        &mut self,
        index: usize,
        field: KnownField,
        value: &str,
    ) -> Result<(), CalcError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CalcError::IndexOutOfRange { index, len })?;

        match field {
            KnownField::Name => item.name = value.to_string(),
            KnownField::Abv => item.abv = parse_optional(value).map(clamp_abv),
        }

        self.persist();
        self.publish(DirectoryEvent::Updated { index, field });
        Ok(())
    }

    /// Removes and returns the row at `index`.
    pub fn remove(&mut self, index: usize) -> Result<KnownIngredient, CalcError> {
        if index >= self.items.len() {
            return Err(CalcError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.persist();
        self.publish(DirectoryEvent::Removed { index });
        Ok(removed)
    }

    /// Writes the current list to the store.
    pub fn save(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.items)
            .map_err(|e| StorageError::Encode(STORAGE_KEY.to_string(), e))?;
        self.store.set(STORAGE_KEY, &json)
    }

    // The in-memory list stays authoritative when a write fails.
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save known ingredients: {}", e);
        }
    }

    fn publish(&self, event: DirectoryEvent) {
        let _ = self.events.send(event);
    }
}

impl<S: KeyValueStore> AbvLookup for Directory<S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        Directory::lookup(self, name)
    }
}

// Current format is a list of `{name, abv}`. Older builds wrote a single
// object mapping names to ABV, which is still accepted.
fn decode(raw: &str) -> Option<Vec<KnownIngredient>> {
    if let Ok(items) = serde_json::from_str::<Vec<KnownIngredient>>(raw) {
        return Some(items);
    }

    let legacy: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw).ok()?;
    Some(
        legacy
            .into_iter()
            .map(|(name, value)| {
                let abv = match value {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(s) => parse_optional(&s),
                    _ => None,
                };
                KnownIngredient {
                    name,
                    abv: abv.map(clamp_abv),
                }
            })
            .collect(),
    )
}
