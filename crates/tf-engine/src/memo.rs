//! Per-engine result caches keyed by (T, P, symbol).

use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Exact key: temperature and pressure compared bit for bit.
type MemoKey = (u64, u64, String);

/// Hit/miss counters of one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Cache of successful results. Failures are never stored, so a failing
/// evaluation is retried on the next request.
#[derive(Debug)]
pub struct Memo<V> {
    name: &'static str,
    entries: RefCell<HashMap<MemoKey, V>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<V: Clone> Memo<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Cached value for the key, or the result of `compute`, stored on success.
    ///
    /// The cache is not borrowed while `compute` runs, so it may re-enter this
    /// cache for other keys.
    pub fn get_or_try_insert<E>(
        &self,
        t: f64,
        p: f64,
        symbol: &str,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        let key = (t.to_bits(), p.to_bits(), symbol.to_string());
        let cached = self.entries.borrow().get(&key).cloned();
        if let Some(value) = cached {
            self.hits.set(self.hits.get() + 1);
            tracing::trace!(cache = self.name, symbol, t, p, "cache hit");
            return Ok(value);
        }

        self.misses.set(self.misses.get() + 1);
        let value = compute()?;
        self.entries.borrow_mut().insert(key, value.clone());
        Ok(value)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_is_a_hit() {
        let memo: Memo<f64> = Memo::new("test");
        let mut calls = 0;
        let a = memo
            .get_or_try_insert::<()>(298.15, 1e5, "A", || {
                calls += 1;
                Ok(1.5)
            })
            .unwrap();
        let b = memo
            .get_or_try_insert::<()>(298.15, 1e5, "A", || {
                calls += 1;
                Ok(2.5)
            })
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(calls, 1);
        assert_eq!(
            memo.stats(),
            MemoStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn keys_distinguish_state_and_symbol() {
        let memo: Memo<u32> = Memo::new("test");
        memo.get_or_try_insert::<()>(300.0, 1e5, "A", || Ok(1)).unwrap();
        memo.get_or_try_insert::<()>(300.0, 2e5, "A", || Ok(2)).unwrap();
        memo.get_or_try_insert::<()>(300.0, 1e5, "B", || Ok(3)).unwrap();
        assert_eq!(memo.len(), 3);
    }

    #[test]
    fn failures_are_not_cached() {
        let memo: Memo<u32> = Memo::new("test");
        assert!(memo.get_or_try_insert(300.0, 1e5, "A", || Err("boom")).is_err());
        assert!(memo.is_empty());
        assert_eq!(memo.get_or_try_insert::<&str>(300.0, 1e5, "A", || Ok(7)), Ok(7));
    }

    #[test]
    fn compute_may_reenter() {
        let memo: Memo<u32> = Memo::new("test");
        let outer = memo
            .get_or_try_insert::<()>(300.0, 1e5, "outer", || {
                let inner = memo.get_or_try_insert::<()>(300.0, 1e5, "inner", || Ok(2))?;
                Ok(inner + 1)
            })
            .unwrap();
        assert_eq!(outer, 3);
        memo.clear();
        assert!(memo.is_empty());
    }
}
