//! Tick-label visibility rules for pair-grid cells.
//!
//! Only edge cells carry tick labels so the interior of the grid stays
//! clean. Upper-triangle cells label the top and right edges keyed on odd
//! row/column parity; mirrored lower-triangle cells label the bottom and
//! left edges keyed on even parity. Both rules are pure functions of the
//! cell position and grid size, so they are testable without rendering
//! anything.

/// Tick values shared by every labelled normalized axis.
pub const TICK_VALUES: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

/// Which edges of a cell carry tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPolicy {
    TopAndRight,
    TopOnly,
    RightOnly,
    BottomAndLeft,
    BottomOnly,
    LeftOnly,
    Hidden,
}

impl TickPolicy {
    pub fn shows_top(self) -> bool {
        matches!(self, TickPolicy::TopAndRight | TickPolicy::TopOnly)
    }

    pub fn shows_right(self) -> bool {
        matches!(self, TickPolicy::TopAndRight | TickPolicy::RightOnly)
    }

    pub fn shows_bottom(self) -> bool {
        matches!(self, TickPolicy::BottomAndLeft | TickPolicy::BottomOnly)
    }

    pub fn shows_left(self) -> bool {
        matches!(self, TickPolicy::BottomAndLeft | TickPolicy::LeftOnly)
    }

    /// Any x-axis labels, top or bottom.
    pub fn has_x_labels(self) -> bool {
        self.shows_top() || self.shows_bottom()
    }

    /// Any y-axis labels, left or right.
    pub fn has_y_labels(self) -> bool {
        self.shows_left() || self.shows_right()
    }
}

/// Tick policy for an upper-triangle cell (row < col) of an n×n grid.
///
/// Branches are evaluated in order. The combined top-and-right branch
/// requires the row to be both first and odd, so it never fires; it is
/// kept because the lower-triangle rule's combined branch is reachable
/// and the two rules stay symmetric.
pub fn upper_tick_policy(row: usize, col: usize, n: usize) -> TickPolicy {
    debug_assert!(row < col && col < n);
    let top = row == 0 && col % 2 == 1;
    let right = col == n - 1 && row % 2 == 1;
    if top && right {
        TickPolicy::TopAndRight
    } else if top {
        TickPolicy::TopOnly
    } else if right {
        TickPolicy::RightOnly
    } else {
        TickPolicy::Hidden
    }
}

/// Tick policy for a mirrored lower-triangle cell (row > col).
///
/// The even-parity counterpart of [`upper_tick_policy`], labelling the
/// bottom and left edges instead. The combined branch fires at
/// (n - 1, 0) when n is odd.
pub fn mirror_tick_policy(row: usize, col: usize, n: usize) -> TickPolicy {
    debug_assert!(col < row && row < n);
    let left = col == 0 && row % 2 == 0;
    let bottom = row == n - 1 && col % 2 == 0;
    if left && bottom {
        TickPolicy::BottomAndLeft
    } else if left {
        TickPolicy::LeftOnly
    } else if bottom {
        TickPolicy::BottomOnly
    } else {
        TickPolicy::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_policy_table_n7() {
        let cases = [
            ((0, 1), TickPolicy::TopOnly),
            ((0, 2), TickPolicy::Hidden),
            ((0, 3), TickPolicy::TopOnly),
            ((0, 5), TickPolicy::TopOnly),
            // Last column, even column index: the top rule cannot apply.
            ((0, 6), TickPolicy::Hidden),
            ((1, 6), TickPolicy::RightOnly),
            ((2, 6), TickPolicy::Hidden),
            ((3, 6), TickPolicy::RightOnly),
            ((5, 6), TickPolicy::RightOnly),
            ((1, 2), TickPolicy::Hidden),
            ((2, 5), TickPolicy::Hidden),
        ];
        for ((row, col), expected) in cases {
            assert_eq!(
                upper_tick_policy(row, col, 7),
                expected,
                "cell ({}, {})",
                row,
                col
            );
        }
    }

    #[test]
    fn test_upper_combined_branch_is_unreachable() {
        for n in 2..10 {
            for row in 0..n {
                for col in (row + 1)..n {
                    assert_ne!(upper_tick_policy(row, col, n), TickPolicy::TopAndRight);
                }
            }
        }
    }

    #[test]
    fn test_mirror_policy_table_n7() {
        let cases = [
            // Odd grid size: the bottom-left corner satisfies both rules.
            ((6, 0), TickPolicy::BottomAndLeft),
            ((2, 0), TickPolicy::LeftOnly),
            ((4, 0), TickPolicy::LeftOnly),
            ((1, 0), TickPolicy::Hidden),
            ((6, 2), TickPolicy::BottomOnly),
            ((6, 4), TickPolicy::BottomOnly),
            ((6, 1), TickPolicy::Hidden),
            ((3, 2), TickPolicy::Hidden),
            ((5, 4), TickPolicy::Hidden),
        ];
        for ((row, col), expected) in cases {
            assert_eq!(
                mirror_tick_policy(row, col, 7),
                expected,
                "cell ({}, {})",
                row,
                col
            );
        }
    }

    #[test]
    fn test_mirror_combined_branch_needs_odd_grid() {
        // Even n: row n-1 is odd, so the left rule fails at the corner.
        assert_eq!(mirror_tick_policy(5, 0, 6), TickPolicy::BottomOnly);
        // Odd n: reachable exactly at (n-1, 0).
        assert_eq!(mirror_tick_policy(4, 0, 5), TickPolicy::BottomAndLeft);
    }

    #[test]
    fn test_policy_edge_queries() {
        assert!(TickPolicy::TopAndRight.shows_top());
        assert!(TickPolicy::TopAndRight.shows_right());
        assert!(!TickPolicy::TopAndRight.shows_bottom());
        assert!(TickPolicy::BottomAndLeft.has_x_labels());
        assert!(TickPolicy::BottomAndLeft.has_y_labels());
        assert!(!TickPolicy::Hidden.has_x_labels());
        assert!(!TickPolicy::Hidden.has_y_labels());
        assert!(TickPolicy::LeftOnly.has_y_labels());
        assert!(!TickPolicy::LeftOnly.has_x_labels());
    }

    #[test]
    fn test_tick_values_are_the_fixed_set() {
        assert_eq!(TICK_VALUES.len(), 6);
        assert_eq!(TICK_VALUES[0], 0.0);
        assert_eq!(TICK_VALUES[5], 1.0);
        for w in TICK_VALUES.windows(2) {
            assert!((w[1] - w[0] - 0.2).abs() < 1e-12);
        }
    }
}
