//! Frequency tables over cell indices.

/// Counts how often each cell index occurs in a stream of labels or
/// predictions.
///
/// Useful for sanity-checking a synthesized dataset (are labels spread
/// over the grid, or collapsed onto a few cells?) and for comparing a
/// model's prediction spread against the label distribution.
///
/// # Examples
///
/// ```
/// use molesniper_stats::counts::CellCounts;
///
/// let mut counts = CellCounts::new(8);
/// for label in [3, 3, 3, 5, 7] {
///     counts.record(label);
/// }
/// assert_eq!(counts.total(), 5);
/// assert_eq!(counts.most_common(), Some((3, 3)));
/// assert_eq!(counts.top(2), vec![(3, 3), (5, 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct CellCounts {
    counts: Vec<u64>,
    total: u64,
}

impl CellCounts {
    /// Creates an empty table over `cell_count` indices.
    #[must_use]
    pub fn new(cell_count: usize) -> Self {
        Self {
            counts: vec![0; cell_count],
            total: 0,
        }
    }

    /// Records one occurrence of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of range for the table.
    pub fn record(&mut self, cell: usize) {
        self.counts[cell] += 1;
        self.total += 1;
    }

    /// Total number of recorded occurrences.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Per-cell counts, indexed by cell.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Fraction of cells that occurred at least once.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn coverage(&self) -> f32 {
        if self.counts.is_empty() {
            return 0.0;
        }
        let hit = self.counts.iter().filter(|&&c| c > 0).count();
        hit as f32 / self.counts.len() as f32
    }

    /// The most frequent cell and its count; `None` when nothing has been
    /// recorded. Ties resolve to the lowest index.
    #[must_use]
    pub fn most_common(&self) -> Option<(usize, u64)> {
        if self.total == 0 {
            return None;
        }
        self.counts
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
            .map(|(i, &c)| (i, c))
    }

    /// The `k` most frequent cells that occurred at least once, most
    /// frequent first. Ties resolve to the lowest index.
    #[must_use]
    pub fn top(&self, k: usize) -> Vec<(usize, u64)> {
        let mut entries: Vec<(usize, u64)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i, c))
            .collect();
        entries.sort_by(|(ia, a), (ib, b)| b.cmp(a).then(ia.cmp(ib)));
        entries.truncate(k);
        entries
    }
}
