//! Lexicographic permutation enumeration.

/// Iterator over every permutation of `0..n` in lexicographic order.
///
/// The first item is the identity; each following item is the next
/// permutation in dictionary order, so ties broken by "first seen" are
/// reproducible across runs.
#[derive(Debug, Clone)]
pub(crate) struct Lexicographic {
    next: Option<Vec<usize>>,
}

impl Lexicographic {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            next: Some((0..n).collect()),
        }
    }
}

impl Iterator for Lexicographic {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if advance(&mut successor) {
            self.next = Some(successor);
        }
        Some(current)
    }
}

/// Rearrange `items` into the next permutation; `false` once the last one
/// (descending order) has been reached.
fn advance(items: &mut [usize]) -> bool {
    let Some(pivot) = items
        .windows(2)
        .rposition(|pair| matches!(pair, [left, right] if left < right))
    else {
        return false;
    };
    let Some(&pivot_value) = items.get(pivot) else {
        return false;
    };
    // The suffix after `pivot` is descending, so the last larger element is
    // the smallest one exceeding the pivot.
    let Some(swap_with) = items.iter().rposition(|&item| item > pivot_value) else {
        return false;
    };
    items.swap(pivot, swap_with);
    if let Some(suffix) = items.get_mut(pivot + 1..) {
        suffix.reverse();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn three_items_in_dictionary_order() {
        let all: Vec<_> = Lexicographic::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[rstest]
    fn four_items_yield_twenty_four_sorted_orders() {
        let all: Vec<_> = Lexicographic::new(4).collect();
        assert_eq!(all.len(), 24);
        assert!(all.windows(2).all(|pair| pair.first() < pair.get(1)));
        assert_eq!(all.last(), Some(&vec![3, 2, 1, 0]));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn trivial_sizes_yield_one_order(#[case] n: usize) {
        assert_eq!(Lexicographic::new(n).count(), 1);
    }
}
