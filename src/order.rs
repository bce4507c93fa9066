use crate::index::PropertyIndex;
use crate::models::Property;
use crate::walk::{sort_siblings, walk_subtree};

/// Arranges rewritten properties for output: each tab subtree in walk order
/// (tabs sorted as siblings), then everything no walk reached in input order.
///
/// `props` and `index` describe the original list; `rewritten[i]` must be
/// the rewritten form of `props[i]`. Each record is emitted exactly once.
pub fn order_output(
    props: &[Property],
    index: &PropertyIndex,
    rewritten: Vec<Property>,
) -> Vec<Property> {
    let tab_roots: Vec<usize> = index
        .top_level()
        .iter()
        .copied()
        .filter(|&pos| props[pos].is_tab_root())
        .collect();

    let mut emitted = vec![false; rewritten.len()];
    let mut sequence = Vec::with_capacity(rewritten.len());

    for root in sort_siblings(props, &tab_roots) {
        for pos in walk_subtree(props, index, root) {
            if !emitted[pos] {
                emitted[pos] = true;
                sequence.push(pos);
            }
        }
    }
    sequence.extend((0..rewritten.len()).filter(|&pos| !emitted[pos]));

    let mut slots: Vec<Option<Property>> = rewritten.into_iter().map(Some).collect();
    sequence
        .into_iter()
        .filter_map(|pos| slots[pos].take())
        .collect()
}
