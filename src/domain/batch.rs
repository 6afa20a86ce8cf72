use std::num::NonZeroUsize;
use std::ops::Range;

/// Hard per-request recipient cap enforced (undocumented) by the gateway.
pub const SEND_MAX_RECIPIENTS_PER_REQUEST: usize = 100;

/// [`SEND_MAX_RECIPIENTS_PER_REQUEST`] as a chunk size.
pub const SEND_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(SEND_MAX_RECIPIENTS_PER_REQUEST) {
    Some(size) => size,
    None => panic!("batch size must be non-zero"),
};

/// One contiguous slice of a larger input, with its position in that input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a, T> {
    pub index: usize,
    pub start: usize,
    pub items: &'a [T],
}

impl<T> Batch<'_, T> {
    /// Index range of `items` within the original input.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.items.len()
    }
}

/// Split `items` into contiguous, order-preserving batches of at most `size`.
///
/// All batches but the last hold exactly `size` items; the last holds the remainder.
/// An empty input yields no batches.
pub fn batch<T>(items: &[T], size: NonZeroUsize) -> impl Iterator<Item = Batch<'_, T>> {
    let size = size.get();
    items
        .chunks(size)
        .enumerate()
        .map(move |(index, items)| Batch {
            index,
            start: index * size,
            items,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn empty_input_yields_no_batches() {
        let items = numbers(0);
        assert_eq!(batch(&items, SEND_BATCH_SIZE).count(), 0);
    }

    #[test]
    fn batch_counts_follow_ceiling_division() {
        for n in [1, 99, 100, 101, 199, 200, 201, 250] {
            let items = numbers(n);
            let batches = batch(&items, SEND_BATCH_SIZE).collect::<Vec<_>>();
            assert_eq!(batches.len(), n.div_ceil(100), "n = {n}");

            let (last, full) = batches.split_last().unwrap();
            assert!(full.iter().all(|b| b.items.len() == 100), "n = {n}");
            assert!((1..=100).contains(&last.items.len()), "n = {n}");
        }
    }

    #[test]
    fn concatenated_batches_preserve_order() {
        let items = numbers(250);
        let joined = batch(&items, SEND_BATCH_SIZE)
            .flat_map(|b| b.items.iter().copied())
            .collect::<Vec<_>>();
        assert_eq!(joined, items);
    }

    #[test]
    fn ranges_cover_input_positions() {
        let items = numbers(250);
        let ranges = batch(&items, SEND_BATCH_SIZE)
            .map(|b| (b.index, b.range()))
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec![(0, 0..100), (1, 100..200), (2, 200..250)]);
    }

    #[test]
    fn custom_sizes_are_honored() {
        let items = numbers(5);
        let sizes = batch(&items, NonZeroUsize::new(2).unwrap())
            .map(|b| b.items.len())
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![2, 2, 1]);
    }
}
