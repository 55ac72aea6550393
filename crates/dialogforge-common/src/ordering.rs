//! Ordering utilities
//!
//! Members are rendered in rank order; equal ranks keep their declaration
//! order. The sort is stable, so repeated re-sorting of a merged list is
//! deterministic.

/// Rank assigned to members that declare none; sorts after negative ranks
pub const DEFAULT_RANK: i64 = 0;

/// Sort items by `(rank, declaration index)` as reported by `key`
///
/// Lower ranks come first; the declaration index breaks ties.
pub fn sort_by_rank<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (i64, usize),
{
    items.sort_by_key(key);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_then_declaration_order() {
        let mut items = vec![("c", 1, 2), ("a", 0, 0), ("b", 1, 1), ("d", -5, 3)];
        sort_by_rank(&mut items, |(_, rank, index)| (*rank, *index));
        let names: Vec<&str> = items.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(names, vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn test_resort_is_stable() {
        let mut items = vec![("a", 0, 0), ("b", 0, 1), ("c", 0, 2)];
        sort_by_rank(&mut items, |(_, rank, index)| (*rank, *index));
        sort_by_rank(&mut items, |(_, rank, index)| (*rank, *index));
        let names: Vec<&str> = items.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
