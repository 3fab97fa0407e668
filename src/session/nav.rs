/// Outcome of moving forward through a drill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Index(usize),
    /// Past the last record. The only terminal condition in the system;
    /// callers render a completion state instead of reading out of range.
    Complete,
}

pub fn next(current: usize, total: usize) -> Advance {
    if current + 1 < total {
        Advance::Index(current + 1)
    } else {
        Advance::Complete
    }
}

/// No-op at position 0, never an error.
pub fn prev(current: usize) -> usize {
    current.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_within_bounds() {
        assert_eq!(next(0, 3), Advance::Index(1));
        assert_eq!(next(1, 3), Advance::Index(2));
    }

    #[test]
    fn test_next_at_last_index_completes() {
        assert_eq!(next(2, 3), Advance::Complete);
        assert_eq!(next(0, 1), Advance::Complete);
    }

    #[test]
    fn test_next_never_yields_out_of_range_index() {
        for total in 1..10usize {
            for current in 0..total {
                match next(current, total) {
                    Advance::Index(i) => assert!(i < total),
                    Advance::Complete => assert_eq!(current, total - 1),
                }
            }
        }
    }

    #[test]
    fn test_prev_saturates_at_zero() {
        assert_eq!(prev(0), 0);
        assert_eq!(prev(1), 0);
        assert_eq!(prev(5), 4);
    }
}
