//! Single-entry cache for derived values.

/// Remembers the last key/value pair and recomputes only when the key changes.
#[derive(Debug, Clone)]
pub(crate) struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Value for `key`, computing it when the cached key differs.
    pub(crate) fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let entry = match self.entry.take() {
            Some((cached, value)) if cached == key => (cached, value),
            _ => (key, compute()),
        };
        &self.entry.insert(entry).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recomputes_only_on_key_change() {
        let mut memo = Memo::default();
        let mut calls = 0;
        for key in [1, 1, 2, 2, 1] {
            memo.get_or_compute(key, || {
                calls += 1;
                key * 10
            });
        }
        assert_eq!(calls, 3);
        assert_eq!(*memo.get_or_compute(1, || 0), 10);
    }

    #[test]
    fn cached_value_survives_repeated_reads() {
        let mut memo = Memo::default();
        let first = memo.get_or_compute("a", || vec![1, 2]).clone();
        let second = memo.get_or_compute("a", || unreachable!("cached")).clone();
        assert_eq!(first, second);
        assert_eq!(memo.get_or_compute("b", Vec::new), &Vec::<i32>::new());
    }
}
