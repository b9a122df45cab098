use gridpath_core::Point;

/// The search frontier: discovered but not yet finalized cells, kept in
/// insertion order.
///
/// Selection is a linear scan for the smallest key where the first minimum
/// in insertion order wins ties. Removal preserves the order of the
/// remaining entries, so tie-breaking is reproducible run to run.
#[derive(Debug, Clone, Default)]
pub(crate) struct OpenSet {
    items: Vec<Point>,
}

impl OpenSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            items: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, p: Point) {
        self.items.push(p);
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.items.shrink_to_fit();
    }

    /// Remove and return the first entry with the smallest `key`, together
    /// with that key.
    pub(crate) fn pop_min(&mut self, key: impl Fn(Point) -> f64) -> Option<(Point, f64)> {
        let (mut best, mut best_key) = self.items.first().map(|&p| (0, key(p)))?;
        for (i, &p) in self.items.iter().enumerate().skip(1) {
            let k = key(p);
            if k < best_key {
                best = i;
                best_key = k;
            }
        }
        Some((self.items.remove(best), best_key))
    }
}
