//! Sparse symmetric relation of confusable characters.
//!
//! Pairs are stored in compressed-row form: each pair lives in the row of its
//! smaller byte, and each row owns a contiguous bucket of the larger bytes it
//! is paired with. Buckets are scanned linearly; their order is unspecified.

use std::sync::OnceLock;

/// Characters commonly confused when copying calls and serials by ear or eye.
///
/// Vowels, sound-alike consonants, digit/letter lookalikes, and three
/// "trailing space" pairs modelling a dropped final character.
pub const DEFAULT_ADJ_TABLE: [(u8, u8); 39] = [
    (b'A', b'E'),
    (b'A', b'I'),
    (b'A', b'O'),
    (b'A', b'U'),
    (b'B', b'V'),
    (b'E', b'I'),
    (b'E', b'O'),
    (b'E', b'U'),
    (b'I', b'O'),
    (b'I', b'U'),
    (b'O', b'U'),
    (b'I', b'Y'),
    (b'E', b'Y'),
    (b'C', b'G'),
    (b'E', b'F'),
    (b'W', b'U'),
    (b'W', b'V'),
    (b'X', b'K'),
    (b'S', b'Z'),
    (b'X', b'S'),
    (b'Q', b'C'),
    (b'U', b'V'),
    (b'M', b'N'),
    (b'L', b'I'),
    (b'Q', b'O'),
    (b'P', b'R'),
    (b'I', b'J'),
    (b'2', b'Z'),
    (b'5', b'S'),
    (b'8', b'B'),
    (b'1', b'I'),
    (b'1', b'L'),
    (b'0', b'O'),
    (b'0', b'Q'),
    (b'C', b'K'),
    (b'G', b'J'),
    (b'E', b' '),
    (b'Y', b' '),
    (b'S', b' '),
];

/// Immutable compressed-row adjacency relation.
///
/// Built once by [`AdjacencyBuilder::build`]; there is no way to add pairs to
/// an existing matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    /// One past the largest row byte; rows at or beyond it are empty.
    max_row: usize,
    /// `max_row + 1` offsets into `col_index`.
    row_start: Vec<usize>,
    col_index: Vec<u8>,
}

impl AdjacencyMatrix {
    /// Builds a relation from `pairs` in a single bulk pass.
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Self {
        let mut builder = AdjacencyBuilder::new(pairs.len());
        builder.extend(pairs.iter().copied());
        builder.build()
    }

    /// Shared relation over [`DEFAULT_ADJ_TABLE`], built on first use.
    pub fn standard() -> &'static AdjacencyMatrix {
        static STANDARD: OnceLock<AdjacencyMatrix> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let matrix = Self::from_pairs(&DEFAULT_ADJ_TABLE);
            tracing::debug!(pairs = matrix.len(), "built standard adjacency matrix");
            matrix
        })
    }

    /// True when `x` and `y` were paired; symmetric and total.
    pub fn contains(&self, x: u8, y: u8) -> bool {
        let (row, column) = order(x, y);
        let row = usize::from(row);
        if row >= self.max_row {
            return false;
        }
        self.col_index[self.row_start[row]..self.row_start[row + 1]]
            .iter()
            .any(|&c| c == column)
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.col_index.len()
    }

    /// True when the relation holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.col_index.is_empty()
    }
}

/// Accumulates pairs for a single [`AdjacencyMatrix`] build.
///
/// Pairs past `capacity` are dropped.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyBuilder {
    capacity: usize,
    pairs: Vec<(u8, u8)>,
}

impl AdjacencyBuilder {
    /// Creates a builder that keeps at most `capacity` pairs.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            pairs: Vec::with_capacity(capacity),
        }
    }

    /// Adds one pair; returns false when the builder is already full.
    pub fn push(&mut self, x: u8, y: u8) -> bool {
        if self.pairs.len() >= self.capacity {
            return false;
        }
        self.pairs.push((x, y));
        true
    }

    /// Number of pairs accepted so far.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pair has been accepted.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Consumes the builder into an immutable matrix.
    pub fn build(self) -> AdjacencyMatrix {
        let max_row = self
            .pairs
            .iter()
            .map(|&(x, y)| usize::from(x.min(y)) + 1)
            .max()
            .unwrap_or(0);

        // Count per row, then prefix-sum counts into bucket offsets.
        let mut row_start = vec![0usize; max_row + 1];
        for &(x, y) in &self.pairs {
            row_start[usize::from(x.min(y))] += 1;
        }
        let mut offset = 0;
        for slot in row_start.iter_mut() {
            let count = *slot;
            *slot = offset;
            offset += count;
        }

        // Scatter each column into the next free slot of its row.
        let mut next = row_start.clone();
        let mut col_index = vec![0u8; self.pairs.len()];
        for &(x, y) in &self.pairs {
            let (row, column) = order(x, y);
            let slot = &mut next[usize::from(row)];
            col_index[*slot] = column;
            *slot += 1;
        }

        AdjacencyMatrix {
            max_row,
            row_start,
            col_index,
        }
    }
}

impl Extend<(u8, u8)> for AdjacencyBuilder {
    fn extend<I: IntoIterator<Item = (u8, u8)>>(&mut self, iter: I) {
        for (x, y) in iter {
            if !self.push(x, y) {
                tracing::debug!(capacity = self.capacity, "adjacency builder full, dropping pairs");
                break;
            }
        }
    }
}

fn order(x: u8, y: u8) -> (u8, u8) {
    if y < x { (y, x) } else { (x, y) }
}
