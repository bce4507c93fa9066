use crate::config::CategoryBases;
use crate::index::PropertyIndex;
use crate::models::{Property, PropertyId};
use crate::walk::walk_subtree;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Old id to new id.
pub type IdMap = FxHashMap<PropertyId, PropertyId>;

/// Result of one allocation pass.
#[derive(Debug, Default)]
pub struct Allocation {
    pub id_map: IdMap,
    /// `(tab name, ids assigned)` in the order tabs were processed
    pub per_tab: Vec<(String, usize)>,
    /// Tab roots whose name has no base
    pub skipped_tabs: Vec<String>,
}

/// Assigns sequential ids to every record reachable from a known tab root.
pub struct IdAllocator {
    bases: CategoryBases,
}

impl IdAllocator {
    pub fn new(bases: CategoryBases) -> Self {
        Self { bases }
    }

    /// Walks each tab root in input order. Ids run from `base + 1` in walk
    /// order; a record already mapped by an earlier tab keeps its first id.
    pub fn allocate(&self, props: &[Property], index: &PropertyIndex) -> Allocation {
        let mut allocation = Allocation::default();

        for &root in index.top_level() {
            let tab = &props[root];
            if !tab.is_tab_root() {
                continue;
            }
            let name = tab.tab_name();
            let Some(base) = self.bases.base_for(name) else {
                debug!(tab = name, "No id base for tab, leaving subtree unchanged");
                allocation.skipped_tabs.push(name.to_string());
                continue;
            };

            let mut seq = base;
            for pos in walk_subtree(props, index, root) {
                let Some(old_id) = props[pos].id() else {
                    continue;
                };
                if allocation.id_map.contains_key(&old_id) {
                    continue;
                }
                seq += 1;
                allocation.id_map.insert(old_id, seq);
            }

            let assigned = (seq - base) as usize;
            debug!(tab = name, base, assigned, "Tab renumbered");
            allocation.per_tab.push((name.to_string(), assigned));
        }

        allocation
    }
}
