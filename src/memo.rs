use std::fmt::Debug;
use std::sync::Arc;

/// Single-entry memo for derived views.
///
/// Holds the most recently computed value together with the key it was
/// computed for. A lookup with any other key recomputes and replaces the
/// entry, so memory stays bounded to one value.
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, Arc<V>)>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq + Debug, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value for `key`, computing it on a miss.
    #[tracing::instrument(name = "query_memo", level = "debug", skip(self, compute))]
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some((stored, value)) = &self.entry {
            if *stored == key {
                tracing::debug!("Key found");
                self.hits += 1;
                return Arc::clone(value);
            }
        }

        tracing::debug!("Key not found, recomputing");
        self.misses += 1;
        let value = Arc::new(compute());
        self.entry = Some((key, Arc::clone(&value)));
        value
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss() {
        let mut memo: Memo<(u64, &str), Vec<u32>> = Memo::new();
        let mut calls = 0;

        let first = memo.get_or_compute((1, "rain"), || {
            calls += 1;
            vec![1, 2, 3]
        });
        let second = memo.get_or_compute((1, "rain"), || {
            calls += 1;
            vec![9]
        });

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.hits(), 1);
        assert_eq!(memo.misses(), 1);
    }

    #[test]
    fn test_new_key_replaces_entry() {
        let mut memo: Memo<u64, u32> = Memo::new();
        assert_eq!(*memo.get_or_compute(1, || 10), 10);
        assert_eq!(*memo.get_or_compute(2, || 20), 20);
        assert_eq!(*memo.get_or_compute(1, || 30), 30);
        assert_eq!(memo.misses(), 3);
    }
}
