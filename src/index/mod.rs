//! Sorted-range search primitives
//!
//! Binary searches over ascending sorted slices, used for per-element and
//! per-frame lookups on large datasets. These are hot-path primitives driven
//! from interactive queries, so out-of-range and not-found results come back
//! as sentinel values instead of errors.
//!
//! Precondition for every function here: the slice is sorted ascending.
//! Behavior on unsorted input is undefined; this is not validated at runtime.

use std::cmp::Ordering;

/// Binary search with an explicit comparator.
///
/// Returns the index of `element` if present. Otherwise returns
/// `-(insertion point) - 1`, so a negative result both signals "not found"
/// and encodes where the element would keep the slice sorted.
pub fn binary_search_index_of_by<T, F>(slice: &[T], element: &T, mut compare: F) -> isize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut low: isize = 0;
    let mut high: isize = slice.len() as isize - 1;
    while low <= high {
        let mid = (low + high) >> 1;
        match compare(element, &slice[mid as usize]) {
            Ordering::Greater => low = mid + 1,
            Ordering::Less => high = mid - 1,
            Ordering::Equal => return mid,
        }
    }
    -low - 1
}

/// Binary search using the natural (lexicographic) ordering of `T`.
pub fn binary_search_index_of<T: Ord>(slice: &[T], element: &T) -> isize {
    binary_search_index_of_by(slice, element, T::cmp)
}

/// Smallest index whose value is `>= min`, or -1 if every element is below
/// the bound (or the slice is empty).
pub fn left_range_index<T: PartialOrd>(slice: &[T], min: &T) -> isize {
    match slice.last() {
        None => -1,
        Some(last) if last < min => -1,
        _ => {
            let mut low: isize = 0;
            let mut high: isize = slice.len() as isize - 1;
            while low <= high {
                let mid = (low + high) >> 1;
                if slice[mid as usize] >= *min {
                    high = mid - 1;
                } else {
                    low = mid + 1;
                }
            }
            high + 1
        }
    }
}

/// Largest index whose value is `<= max`, or -1 if every element is above
/// the bound (or the slice is empty).
pub fn right_range_index<T: PartialOrd>(slice: &[T], max: &T) -> isize {
    match slice.first() {
        None => -1,
        Some(first) if first > max => -1,
        _ => {
            let mut low: isize = 0;
            let mut high: isize = slice.len() as isize - 1;
            while low <= high {
                let mid = (low + high) >> 1;
                if slice[mid as usize] > *max {
                    high = mid - 1;
                } else {
                    low = mid + 1;
                }
            }
            low - 1
        }
    }
}

/// Number of elements inside `[min, max]` inclusive. Returns 0 when either
/// bound search fails or the bounds cross.
pub fn range_in_sorted<T: PartialOrd>(slice: &[T], min: &T, max: &T) -> usize {
    let left = left_range_index(slice, min);
    let right = right_range_index(slice, max);
    if left == -1 || right == -1 || left > right {
        0
    } else {
        (right - left + 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_search_finds_present_elements() {
        let values = [1, 2, 3, 4, 5, 6];
        assert_eq!(binary_search_index_of(&values, &4), 3);
        assert_eq!(binary_search_index_of(&values, &1), 0);
        assert_eq!(binary_search_index_of(&values, &6), 5);
    }

    #[test]
    fn exact_search_encodes_insertion_point() {
        let values = [10, 20, 30];
        // 25 would be inserted at index 2: -(2) - 1 = -3.
        assert_eq!(binary_search_index_of(&values, &25), -3);
        assert_eq!(binary_search_index_of(&values, &5), -1);
        assert_eq!(binary_search_index_of(&values, &40), -4);
    }

    #[test]
    fn exact_search_on_empty_slice() {
        let values: [i32; 0] = [];
        assert_eq!(binary_search_index_of(&values, &1), -1);
    }

    #[test]
    fn exact_search_with_custom_comparator() {
        let values = [6, 5, 4, 3, 2, 1];
        let descending = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(binary_search_index_of_by(&values, &4, descending), 2);
    }

    #[test]
    fn left_range_index_finds_lower_bound() {
        let values = [1.0, 2.0, 4.0, 4.0, 7.0];
        assert_eq!(left_range_index(&values, &3.0), 2);
        assert_eq!(left_range_index(&values, &4.0), 2);
        assert_eq!(left_range_index(&values, &0.0), 0);
        assert_eq!(left_range_index(&values, &8.0), -1);
    }

    #[test]
    fn right_range_index_finds_upper_bound() {
        let values = [1.0, 2.0, 4.0, 4.0, 7.0];
        assert_eq!(right_range_index(&values, &5.0), 3);
        assert_eq!(right_range_index(&values, &4.0), 3);
        assert_eq!(right_range_index(&values, &7.0), 4);
        assert_eq!(right_range_index(&values, &0.5), -1);
    }

    #[test]
    fn range_count_matches_linear_scan() {
        let values = [1, 3, 3, 5, 8, 13, 21];
        for min in 0..23 {
            for max in 0..23 {
                let expected = values.iter().filter(|&&v| v >= min && v <= max).count();
                assert_eq!(
                    range_in_sorted(&values, &min, &max),
                    expected,
                    "range [{min}, {max}]"
                );
            }
        }
    }

    #[test]
    fn range_count_is_zero_on_empty_or_crossed_bounds() {
        let empty: [i32; 0] = [];
        assert_eq!(range_in_sorted(&empty, &1, &10), 0);
        assert_eq!(range_in_sorted(&[1, 2, 3], &3, &1), 0);
    }
}
