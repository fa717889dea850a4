//! Utility functions for working with value grids

/// Index of the element of `values` nearest to `target`
///
/// Ties keep the first-encountered index. Returns `None` for an empty slice.
///
/// # Examples
///
/// ```rust
/// use tolerance_core::utils::search_nearest;
///
/// let grid = [0.0, 1.0, 2.0, 3.0];
/// assert_eq!(search_nearest(&grid, 1.4), Some(1));
/// assert_eq!(search_nearest(&grid, -10.0), Some(0));
/// assert_eq!(search_nearest(&[], 1.0), None);
/// ```
pub fn search_nearest(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        let distance = (v - target).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// `n` evenly spaced values over the inclusive range [start, stop]
///
/// A single-point request yields `[start]`.
///
/// # Examples
///
/// ```rust
/// use tolerance_core::utils::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 2.0, 1), vec![2.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_nearest_ties_keep_first() {
        // 1.5 is equidistant from 1.0 and 2.0
        let grid = [1.0, 2.0];
        assert_eq!(search_nearest(&grid, 1.5), Some(0));
    }

    #[test]
    fn test_search_nearest_exact_match() {
        let grid = [0.0, 0.5, 1.0];
        assert_eq!(search_nearest(&grid, 0.5), Some(1));
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(0.0, 5.0, 50);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0);
        assert!((grid[49] - 5.0).abs() < 1e-12);
    }
}
