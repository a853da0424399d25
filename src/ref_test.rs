// Reference model for OrderedMap<i64, i64>, keys are expected within
// 0..capacity.
struct RefNodes {
    capacity: usize,
    entries: std::collections::BTreeMap<i64, i64>,
}

type RefItems = std::vec::IntoIter<(i64, i64)>;

impl RefNodes {
    fn new(capacity: usize) -> RefNodes {
        RefNodes {
            capacity,
            entries: Default::default(),
        }
    }

    fn check(&self, key: i64) {
        assert!(key >= 0 && (key as usize) < self.capacity, "key {}", key);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, key: i64) -> Option<i64> {
        self.entries.get(&key).cloned()
    }

    fn iter(&self) -> RefItems {
        let items: Vec<(i64, i64)> = self.entries.iter().map(|(k, v)| (*k, *v)).collect();
        items.into_iter()
    }

    // BTreeMap::range panics on inverted or empty-excluded bounds,
    // those yield nothing here.
    fn span(&self, low: Bound<i64>, high: Bound<i64>) -> Vec<(i64, i64)> {
        let start = match low {
            Bound::Included(k) => k,
            Bound::Excluded(k) => k.saturating_add(1),
            Bound::Unbounded => i64::min_value(),
        };
        let end = match high {
            Bound::Included(k) => k,
            Bound::Excluded(k) => k.saturating_sub(1),
            Bound::Unbounded => i64::max_value(),
        };
        if start > end {
            return vec![];
        }
        self.entries
            .range(start..=end)
            .map(|(k, v)| (*k, *v))
            .collect()
    }

    fn range(&self, low: Bound<i64>, high: Bound<i64>) -> RefItems {
        self.span(low, high).into_iter()
    }

    fn reverse(&self, low: Bound<i64>, high: Bound<i64>) -> RefItems {
        let mut items = self.span(low, high);
        items.reverse();
        items.into_iter()
    }

    fn create(&mut self, key: i64, value: i64) -> bool {
        self.check(key);
        match self.entries.entry(key) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    fn set(&mut self, key: i64, value: i64) -> Option<i64> {
        self.check(key);
        self.entries.insert(key, value)
    }

    fn delete(&mut self, key: i64) -> Option<i64> {
        self.entries.remove(&key)
    }
}

fn random_bound(size: u64) -> Bound<i64> {
    let key = (random::<u64>() % size) as i64;
    match random::<u8>() % 3 {
        0 => Bound::Included(key),
        1 => Bound::Excluded(key),
        _ => Bound::Unbounded,
    }
}

fn random_low_high(size: usize) -> (Bound<i64>, Bound<i64>) {
    let size = size as u64;
    (random_bound(size), random_bound(size))
}
