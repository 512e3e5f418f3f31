//! Compressed-sparse-row arrays
//!
//! Row `i` owns the half-open slice `indptr[i]..indptr[i + 1]` of `indices`
//! (neighbour vertex) and `data` (per-edge payload). Columns within a row are
//! sorted and unique, so membership tests are binary searches.

use crate::errors::{GraphError, Result};

/// Immutable CSR array with per-edge payload `D`.
///
/// `D = ()` stores no payload at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCsrArray<D> {
    indptr: Box<[usize]>,
    indices: Box<[u32]>,
    data: Box<[D]>,
}

impl<D> StaticCsrArray<D> {
    /// Assemble an array from raw parts, checking the layout invariants.
    pub fn new(indptr: Vec<usize>, indices: Vec<u32>, data: Vec<D>) -> Result<Self> {
        if indptr.first() != Some(&0) {
            return Err(GraphError::invalid_csr("indptr must start with 0"));
        }
        if indices.len() != data.len() {
            return Err(GraphError::invalid_csr(format!(
                "indices ({}) and data ({}) lengths differ",
                indices.len(),
                data.len()
            )));
        }
        if let Some(pos) = indptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(GraphError::invalid_csr(format!(
                "indptr decreases at row {}",
                pos
            )));
        }
        let last = indptr[indptr.len() - 1];
        if last != indices.len() {
            return Err(GraphError::invalid_csr(format!(
                "indptr ends at {} but there are {} edges",
                last,
                indices.len()
            )));
        }
        let n_rows = indptr.len() - 1;
        if let Some(col) = indices.iter().find(|&&c| c as usize >= n_rows) {
            return Err(GraphError::invalid_csr(format!(
                "column {} out of bounds for {} rows",
                col, n_rows
            )));
        }

        Ok(Self::from_parts_unchecked(indptr, indices, data))
    }

    fn from_parts_unchecked(indptr: Vec<usize>, indices: Vec<u32>, data: Vec<D>) -> Self {
        Self {
            indptr: indptr.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
            data: data.into_boxed_slice(),
        }
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn data(&self) -> &[D] {
        &self.data
    }

    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn n_edges(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    fn bounds(&self, row: usize) -> (usize, usize) {
        (self.indptr[row], self.indptr[row + 1])
    }

    /// Column indices of `row`
    #[inline]
    pub fn row_indices(&self, row: usize) -> &[u32] {
        let (start, end) = self.bounds(row);
        &self.indices[start..end]
    }

    /// Column indices and payloads of `row`
    #[inline]
    pub fn row(&self, row: usize) -> (&[u32], &[D]) {
        let (start, end) = self.bounds(row);
        (&self.indices[start..end], &self.data[start..end])
    }

    /// Payload stored at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&D> {
        let (cols, data) = self.row(row);
        cols.binary_search(&(col as u32)).ok().map(|pos| &data[pos])
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.row_indices(row).binary_search(&(col as u32)).is_ok()
    }

    pub fn degree(&self, row: usize) -> usize {
        let (start, end) = self.bounds(row);
        end - start
    }
}

/// Transient per-vertex buckets, frozen into a [`StaticCsrArray`].
///
/// Counting-sort style: O(V + E) plus sorting within each bucket.
#[derive(Debug)]
pub struct CsrArrayBuilder<D> {
    buckets: Vec<Vec<(u32, D)>>,
}

impl<D: Copy> CsrArrayBuilder<D> {
    pub fn new(n_rows: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); n_rows],
        }
    }

    #[inline]
    pub fn push(&mut self, row: usize, col: usize, data: D) {
        self.buckets[row].push((col as u32, data));
    }

    /// Freeze the buckets; entries sharing a `(row, col)` slot are combined
    /// with `merge`.
    pub fn finish_with<F>(self, mut merge: F) -> StaticCsrArray<D>
    where
        F: FnMut(D, D) -> D,
    {
        let n_edges: usize = self.buckets.iter().map(Vec::len).sum();
        let mut indptr = Vec::with_capacity(self.buckets.len() + 1);
        let mut indices = Vec::with_capacity(n_edges);
        let mut data = Vec::with_capacity(n_edges);
        indptr.push(0);

        for mut bucket in self.buckets {
            bucket.sort_by_key(|(col, _)| *col);
            let row_start = indices.len();
            for (col, value) in bucket {
                if indices.len() > row_start && indices[indices.len() - 1] == col {
                    let last = data.len() - 1;
                    data[last] = merge(data[last], value);
                } else {
                    indices.push(col);
                    data.push(value);
                }
            }
            indptr.push(indices.len());
        }

        StaticCsrArray::from_parts_unchecked(indptr, indices, data)
    }

    /// Freeze the buckets, keeping the first payload of a repeated slot.
    pub fn finish(self) -> StaticCsrArray<D> {
        self.finish_with(|first, _| first)
    }
}
