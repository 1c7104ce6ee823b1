//! Completion-percentage arithmetic for project progress widgets.

/// Percentage of `done` over `total`, rounded to one decimal place.
///
/// Returns `0.0` when `total` is zero (a project with no tasks shows an
/// empty bar, not a division error).
pub fn completion_pct(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = done as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_zero_pct() {
        assert_eq!(completion_pct(0, 0), 0.0);
        // done > total cannot normally happen, but must still not divide by zero.
        assert_eq!(completion_pct(3, 0), 0.0);
    }

    #[test]
    fn all_done_is_one_hundred() {
        assert_eq!(completion_pct(7, 7), 100.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        // 1/3 = 33.333... -> 33.3
        assert_eq!(completion_pct(1, 3), 33.3);
        // 2/3 = 66.666... -> 66.7
        assert_eq!(completion_pct(2, 3), 66.7);
    }

    #[test]
    fn half_done() {
        assert_eq!(completion_pct(5, 10), 50.0);
    }
}
