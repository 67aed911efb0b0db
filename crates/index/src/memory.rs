//! In-memory implementation of the tiered index.

use crate::{TextIndex, Tiered};
use std::collections::HashMap;
use theke_meta::{fold, nfc};

/// Hash-map-backed tiered index.
///
/// Exact tiers are plain map probes. The partial tier scans the folded key
/// space for substring containment, which is linear in the number of distinct
/// keys. Fine for the catalog sizes this store handles, and callers only pay
/// for it when they ask for partial matches anyway (the maps are probed
/// first).
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex<V> {
    accented: HashMap<String, Vec<V>>,
    folded: HashMap<String, Vec<V>>,
    entries: usize,
}

impl<V> MemoryIndex<V> {
    pub fn new() -> Self {
        Self {
            accented: HashMap::new(),
            folded: HashMap::new(),
            entries: 0,
        }
    }
}

impl<V: Clone + PartialEq> TextIndex<V> for MemoryIndex<V> {
    fn add(&mut self, key: &str, value: V) {
        let key = nfc(key);
        if key.is_empty() {
            tracing::debug!("refusing to index under the empty key");
            return;
        }
        let accented = self.accented.entry(key.clone().into_owned()).or_default();
        if accented.contains(&value) {
            return;
        }
        accented.push(value.clone());
        let folded = self.folded.entry(fold(&key)).or_default();
        if !folded.contains(&value) {
            folded.push(value);
        }
        self.entries += 1;
    }

    fn lookup(&self, key: &str) -> Tiered<V> {
        let key = nfc(key);
        let folded_key = fold(&key);
        let exact_accented = self.accented.get(key.as_ref()).cloned().unwrap_or_default();
        let exact_unaccented = self.folded.get(&folded_key).cloned().unwrap_or_default();
        let mut partial = Vec::new();
        if !folded_key.is_empty() {
            for (candidate, values) in &self.folded {
                if candidate != &folded_key && candidate.contains(&folded_key) {
                    for value in values {
                        if !partial.contains(value) {
                            partial.push(value.clone());
                        }
                    }
                }
            }
        }
        Tiered { exact_accented, exact_unaccented, partial }
    }

    fn len(&self) -> usize {
        self.entries
    }
}
