use crate::index::PropertyIndex;
use crate::models::Property;
use rustc_hash::FxHashSet;

/// Sorts sibling positions by `(rank, id)` ascending. The sort is stable, so
/// exact ties keep input order.
pub fn sort_siblings(props: &[Property], siblings: &[usize]) -> Vec<usize> {
    let mut sorted = siblings.to_vec();
    sorted.sort_by(|&a, &b| props[a].cmp_siblings(&props[b]));
    sorted
}

/// Pre-order depth-first walk from `root`, visiting children in sibling order.
///
/// Uses an explicit stack so deep sheets cannot overflow. A record already
/// visited in this walk is not expanded again, which keeps cyclic input from
/// looping forever.
pub fn walk_subtree(props: &[Property], index: &PropertyIndex, root: usize) -> Vec<usize> {
    let mut order = Vec::new();
    let mut visited = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(pos) = stack.pop() {
        if !visited.insert(pos) {
            continue;
        }
        order.push(pos);
        let kids = sort_siblings(props, index.children_of(props[pos].id()));
        stack.extend(kids.into_iter().rev());
    }

    order
}
