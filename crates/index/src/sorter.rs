//! Bulk Sorter - whole-catalog orderings for display and export.
//!
//! Independent of the indices: both functions reorder a caller-owned slice in
//! place and accept anything that can be viewed as a [`Movie`] (plain records
//! or shared [`data_loader::MovieRef`] handles).
//!
//! - [`sort_by_popularity_descending`]: top-down merge sort, stable.
//! - [`sort_by_title_ascending`]: quicksort with a last-element (Lomuto)
//!   pivot. Not stable: records with identical titles may swap places.

use data_loader::Movie;

/// Sort by view count, highest first, keeping the input order of equal counts.
pub fn sort_by_popularity_descending<T>(records: &mut [T])
where
    T: AsRef<Movie> + Clone,
{
    if records.len() < 2 {
        return;
    }
    let mut buffer = records.to_vec();
    merge_sort(records, &mut buffer);
}

/// Sort `records` using `scratch` (same length, same contents) as workspace.
fn merge_sort<T>(records: &mut [T], scratch: &mut [T])
where
    T: AsRef<Movie> + Clone,
{
    let len = records.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    {
        let (left, right) = records.split_at_mut(mid);
        let (scratch_left, scratch_right) = scratch.split_at_mut(mid);
        merge_sort(left, scratch_left);
        merge_sort(right, scratch_right);
    }

    scratch.clone_from_slice(records);
    let (left, right) = scratch.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in records.iter_mut() {
        // `>=` takes from the left run on ties, which is what makes this stable
        let take_left = j >= right.len()
            || (i < left.len() && left[i].as_ref().view_count >= right[j].as_ref().view_count);
        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}

/// Sort by title, byte-wise ascending (case-sensitive).
pub fn sort_by_title_ascending<T>(records: &mut [T])
where
    T: AsRef<Movie>,
{
    let mut slice = records;
    // Recurse into the smaller side, loop on the larger, so already-sorted
    // input cannot blow the stack
    while slice.len() > 1 {
        let pivot = partition(slice);
        let current = slice;
        let (left, rest) = current.split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            sort_by_title_ascending(left);
            slice = right;
        } else {
            sort_by_title_ascending(right);
            slice = left;
        }
    }
}

/// Lomuto partition around the last element; returns the pivot's final index.
fn partition<T>(records: &mut [T]) -> usize
where
    T: AsRef<Movie>,
{
    let high = records.len() - 1;
    let mut store = 0;
    for j in 0..high {
        if records[j].as_ref().title < records[high].as_ref().title {
            records.swap(store, j);
            store += 1;
        }
    }
    records.swap(store, high);
    store
}
