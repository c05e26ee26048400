//! Partition sort and exact-match binary search over record fields.
//!
//! Both algorithms are driven by the shared comparator [`compare_field`]:
//! - **Partition Sort**: Quicksort variant with a last-element pivot (Lomuto style),
//!   never mutating its input.
//! - **Exact Search**: Binary search over a collection already sorted ascending
//!   by the same key.
//!
//! The main entry points are [`partition_sort`] and [`exact_search`].

use crate::core::{Direction, FieldAccessor, FieldValue, Probe, compare_field};
use serde_json::Value;
use std::cmp::Ordering;

/// Computes the sorted order of `records` by `key` without touching the input.
///
/// Returns a vector of indices into `records`. Partitioning follows the
/// last-element-pivot scheme:
///
/// 1. The last element of a range is the pivot.
/// 2. Every other element goes to the low bucket when it compares `<= pivot`
///    (ascending) or `>= pivot` (descending), otherwise to the high bucket.
///    Buckets keep the relative order of their elements.
/// 3. The range becomes `low ++ [pivot] ++ high` and both buckets are sorted
///    the same way.
///
/// Ties land in the low bucket, which spreads runs of duplicates over both
/// sides of later partitions. Stability is **not** part of the contract:
/// callers must not rely on the relative order of equal elements.
///
/// Average cost is O(n log n) comparisons; already-ordered input degrades to
/// O(n²) because of the fixed pivot choice. Pending ranges are kept on an
/// explicit stack, so deep partitions do not grow the call stack.
///
/// # Examples
///
/// ```
/// use shelfsort::{partition_sort_indices, Direction, Record};
///
/// let records = vec![
///     Record::new().with("price", 10.0),
///     Record::new().with("price", 5.0),
///     Record::new().with("price", 20.0),
/// ];
///
/// let indices = partition_sort_indices(&records, "price", Direction::Ascending);
/// assert_eq!(indices, vec![1, 0, 2]);
/// ```
pub fn partition_sort_indices<R: FieldAccessor>(
    records: &[R],
    key: &str,
    direction: Direction,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    if order.len() < 2 {
        return order;
    }

    let mut low = Vec::with_capacity(order.len());
    let mut high = Vec::with_capacity(order.len());
    let mut pending = vec![(0, order.len())];

    while let Some((start, end)) = pending.pop() {
        if end - start < 2 {
            continue;
        }

        let pivot = order[end - 1];
        low.clear();
        high.clear();
        for &index in &order[start..end - 1] {
            if goes_low(&records[index], &records[pivot], key, direction) {
                low.push(index);
            } else {
                high.push(index);
            }
        }

        let split = start + low.len();
        order[start..split].copy_from_slice(&low);
        order[split] = pivot;
        order[split + 1..end].copy_from_slice(&high);

        pending.push((split + 1, end));
        pending.push((start, split));
    }

    order
}

#[inline(always)]
fn goes_low<R: FieldAccessor>(element: &R, pivot: &R, key: &str, direction: Direction) -> bool {
    let ordering = compare_field(element, pivot, key);
    match direction {
        Direction::Ascending => ordering.is_le(),
        Direction::Descending => ordering.is_ge(),
    }
}

/// Returns a newly built, ordered copy of `records`.
///
/// This is a convenience wrapper for [`partition_sort_indices`] which clones
/// the records into their sorted positions. `records` itself is left as is.
///
/// # Examples
///
/// ```
/// use shelfsort::{partition_sort, Direction, Record};
///
/// let records = vec![
///     Record::new().with("name", "banana"),
///     Record::new().with("name", "Apple"),
///     Record::new().with("name", "carrot"),
/// ];
///
/// let sorted = partition_sort(&records, "name", Direction::Descending);
/// let names: Vec<String> = sorted.iter().map(|r| r.get("name").unwrap().to_string()).collect();
/// assert_eq!(names, vec!["carrot", "banana", "Apple"]);
/// ```
pub fn partition_sort<R: FieldAccessor + Clone>(
    records: &[R],
    key: &str,
    direction: Direction,
) -> Vec<R> {
    partition_sort_indices(records, key, direction)
        .into_iter()
        .map(|index| records[index].clone())
        .collect()
}

/// Sorts a JSON document that is expected to be an array of records.
///
/// Anything other than an array yields an empty result instead of an error.
/// Array elements that are not objects read every field as missing.
pub fn partition_sort_json(value: &Value, key: &str, direction: Direction) -> Vec<Value> {
    match value.as_array() {
        Some(items) => partition_sort(items, key, direction),
        None => Vec::new(),
    }
}

/// Finds the position of a record whose `key` equals `value`.
///
/// `sorted` must already be ordered ascending by `key` (for instance by
/// [`partition_sort`]). This is not checked: an unsorted input just gives an
/// unreliable answer.
///
/// When several records match, the first one hit by the halving procedure is
/// returned, which is not necessarily the lowest or highest such index.
pub fn exact_search_index<R: FieldAccessor>(
    sorted: &[R],
    key: &str,
    value: &FieldValue<'_>,
) -> Option<usize> {
    let probe = Probe::new(key, value.as_borrowed());

    // Window is [low, high).
    let mut low = 0;
    let mut high = sorted.len();
    while low < high {
        let mid = low + (high - 1 - low) / 2;
        match compare_field(&sorted[mid], &probe, key) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    None
}

/// Finds a record whose `key` equals `value` in an ascending-sorted slice.
///
/// `None` means no record matched; that is an ordinary outcome, not a failure.
///
/// # Examples
///
/// ```
/// use shelfsort::{exact_search, partition_sort, Direction, FieldValue, Record};
///
/// let records = vec![
///     Record::new().with("name", "Widget"),
///     Record::new().with("name", "bolt"),
///     Record::new().with("name", "Gear"),
/// ];
/// let sorted = partition_sort(&records, "name", Direction::Ascending);
///
/// let hit = exact_search(&sorted, "name", &FieldValue::text("gear"));
/// assert_eq!(hit.and_then(|r| r.get("name")), Some(&FieldValue::from("Gear".to_string())));
///
/// assert!(exact_search(&sorted, "name", &FieldValue::text("nut")).is_none());
/// ```
pub fn exact_search<'a, R: FieldAccessor>(
    sorted: &'a [R],
    key: &str,
    value: &FieldValue<'_>,
) -> Option<&'a R> {
    exact_search_index(sorted, key, value).map(|index| &sorted[index])
}
