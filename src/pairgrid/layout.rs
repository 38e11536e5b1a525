//! Cell planning for the pair grid.
//!
//! Planning is separate from rendering: [`plan_cells`] decides which of
//! the n×n grid positions get content and what kind, and the renderer
//! walks the plan. Grid positions missing from the plan stay blank (no
//! axes, no border).

/// What a populated grid cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Parameter name centred at (i, i), no axes.
    Diagonal,
    /// Scatter of the pair's normalized values at (a, b), a < b.
    Upper,
    /// Scatter of the pair's raw values at (b, a).
    Mirror,
}

/// A populated cell of the n×n grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlan {
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
    /// Parameter pair (a, b) with a <= b; equal on the diagonal.
    pub pair: (usize, usize),
}

/// Plan the populated cells for an n×n pair grid.
///
/// Yields the C(n,2) upper-triangle cells in pair order (each followed by
/// its mirror when `mirror` is set), then the n diagonal label cells.
pub fn plan_cells(n: usize, mirror: bool) -> Vec<CellPlan> {
    let pairs = n * n.saturating_sub(1) / 2;
    let mut cells = Vec::with_capacity(pairs * if mirror { 2 } else { 1 } + n);
    for a in 0..n {
        for b in (a + 1)..n {
            cells.push(CellPlan {
                row: a,
                col: b,
                kind: CellKind::Upper,
                pair: (a, b),
            });
            if mirror {
                cells.push(CellPlan {
                    row: b,
                    col: a,
                    kind: CellKind::Mirror,
                    pair: (a, b),
                });
            }
        }
    }
    for i in 0..n {
        cells.push(CellPlan {
            row: i,
            col: i,
            kind: CellKind::Diagonal,
            pair: (i, i),
        });
    }
    cells
}
