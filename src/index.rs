use crate::models::{Property, PropertyId};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Lookup tables over a flat property list. Entries are positions into the
/// slice the index was built from.
pub struct PropertyIndex {
    by_id: FxHashMap<Option<PropertyId>, usize>,
    children: FxHashMap<Option<PropertyId>, Vec<usize>>,
}

impl PropertyIndex {
    pub fn build(props: &[Property]) -> Self {
        let mut by_id = FxHashMap::with_capacity_and_hasher(props.len(), Default::default());
        let mut children: FxHashMap<Option<PropertyId>, Vec<usize>> = FxHashMap::default();

        for (pos, prop) in props.iter().enumerate() {
            // Last write wins on duplicate ids
            if let Some(prev) = by_id.insert(prop.id(), pos) {
                debug!(id = ?prop.id(), first = prev, second = pos, "Duplicate property id");
            }
            children.entry(prop.parent_id()).or_default().push(pos);
        }

        debug!(
            properties = props.len(),
            parents = children.len(),
            "Property index built"
        );

        Self { by_id, children }
    }

    /// Position of the record holding `id`. Duplicates resolve to the last one.
    pub fn position(&self, id: Option<PropertyId>) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Direct children of the record with `id`, in input order. A record
    /// without an id has no children.
    pub fn children_of(&self, id: Option<PropertyId>) -> &[usize] {
        match id {
            Some(_) => self.children.get(&id).map(Vec::as_slice).unwrap_or(&[]),
            None => &[],
        }
    }

    /// Records with no `parentId`, in input order.
    pub fn top_level(&self) -> &[usize] {
        self.children.get(&None).map(Vec::as_slice).unwrap_or(&[])
    }
}
