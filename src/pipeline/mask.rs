//! Triangle mask for symmetric matrices

/// Boolean mask over an `n x n` matrix; `true` hides a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleMask {
    size: usize,
    hidden: Vec<bool>,
}

impl TriangleMask {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        self.hidden[row * self.size + col]
    }

    /// Cells left visible, row-major.
    pub fn visible_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size)
            .flat_map(move |row| (0..self.size).map(move |col| (row, col)))
            .filter(move |&(row, col)| !self.is_masked(row, col))
    }
}

/// Mask the diagonal and everything above it, leaving the strictly lower
/// triangle visible.
pub fn upper_triangle_mask(size: usize) -> TriangleMask {
    let hidden = (0..size)
        .flat_map(|row| (0..size).map(move |col| col >= row))
        .collect();
    TriangleMask { size, hidden }
}
