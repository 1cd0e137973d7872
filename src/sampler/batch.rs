//! Packed storage for the trajectory seeds of one batch

/// The seeds emitted for a single birth time, packed row by row.
///
/// Each row is one electron: position at the tunneling exit, initial
/// momentum, birth time and ionization rate, followed by the initial
/// phase unless the phase method is CTMC. The row width is fixed per
/// sampler (6/7 in 2D, 8/9 in 3D). A batch with no rows is the
/// "nothing survived the cutoff" sentinel, not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedBatch {
    width: usize,
    data: Vec<f64>,
}

impl SeedBatch {
    pub fn new(width: usize) -> Self {
        SeedBatch { width, data: Vec::new() }
    }

    pub fn with_capacity(width: usize, rows: usize) -> Self {
        SeedBatch { width, data: Vec::with_capacity(width * rows) }
    }

    pub fn push_row(&mut self, row: &[f64]) {
        assert!(row.len() == self.width, "seed row has {} entries, batch expects {}", row.len(), self.width);
        self.data.extend_from_slice(row);
    }

    /// Number of entries per seed
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of seeds in the batch
    pub fn len(&self) -> usize {
        self.data.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.width)
    }

    /// The packed storage, row-major
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
