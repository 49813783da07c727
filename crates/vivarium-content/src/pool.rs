//! Weighted selection pools.
//!
//! A pool is a multiset: an entry added with rate `n` appears `n` times, so
//! uniform sampling favors higher rates proportionally without a separate
//! weighted-sampling structure. Pools are reset before linking, populated
//! once during the linking pass, and read-only afterward.

use rand::Rng;

/// Weighted multiset sampled uniformly at selection time.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    entries: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: Copy + PartialEq> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one occurrence of `entry`.
    pub fn add(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Insert `rate` occurrences of `entry`. A rate of zero inserts nothing.
    pub fn add_times(&mut self, rate: u32, entry: T) {
        for _ in 0..rate {
            self.entries.push(entry);
        }
    }

    /// Pick one entry uniformly, or `None` if the pool is empty.
    pub fn sample(&self, rng: &mut impl Rng) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries[rng.gen_range(0..self.entries.len())])
    }

    /// Number of occurrences of `entry` in the pool.
    pub fn count(&self, entry: T) -> usize {
        self.entries.iter().filter(|e| **e == entry).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_times_cardinality() {
        let mut pool = Pool::new();
        pool.add_times(3, 7u32);
        pool.add_times(1, 9u32);
        pool.add_times(0, 11u32);

        assert_eq!(pool.len(), 4);
        assert_eq!(pool.count(7), 3);
        assert_eq!(pool.count(9), 1);
        assert_eq!(pool.count(11), 0);
    }

    #[test]
    fn test_sample_empty_and_member() {
        let mut rng = rand::thread_rng();
        let empty: Pool<u32> = Pool::new();
        assert_eq!(empty.sample(&mut rng), None);

        let mut pool = Pool::new();
        pool.add_times(5, 42u32);
        for _ in 0..20 {
            assert_eq!(pool.sample(&mut rng), Some(42));
        }
    }
}
