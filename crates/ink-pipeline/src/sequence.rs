//! Neighbor links between items in an ordered collection.
//!
//! Items relate to their neighbors positionally, not through ownership:
//! links are indices into the backing slice, so there is nothing to clean
//! up and no reference cycles to break. Re-running the assignment on the
//! same slice produces the same links.

use ink_item::Item;

/// Assign `previous`/`next` links for an ordered sequence of items.
///
/// The first item has no predecessor and the last no successor; every
/// interior item points at its adjacent elements. Runs in O(N) with no
/// allocation; an empty slice is a no-op.
pub fn assign_neighbors(items: &mut [Item]) {
    let len = items.len();
    for (index, item) in items.iter_mut().enumerate() {
        item.previous = index.checked_sub(1);
        item.next = if index + 1 < len { Some(index + 1) } else { None };
    }
}

/// The item preceding `index`, following the stored link.
#[must_use]
pub fn previous_of(items: &[Item], index: usize) -> Option<&Item> {
    items.get(index)?.previous.and_then(|p| items.get(p))
}

/// The item following `index`, following the stored link.
#[must_use]
pub fn next_of(items: &[Item], index: usize) -> Option<&Item> {
    items.get(index)?.next.and_then(|n| items.get(n))
}
